use std::sync::Arc;

use tokio::sync::watch;

use plantdesk_core::{Entity, EntityId};

/// In-memory ordered collection for one entity kind.
///
/// Order is insertion order, newest first: creates prepend, updates keep
/// the entry's position, deletes do not reorder the remainder. Every
/// write publishes the new snapshot to watch subscribers, so rendering
/// surfaces re-render without polling.
///
/// Writes are crate-private: only the query layer and the mutation
/// methods on [`EntityCache`](crate::EntityCache) touch the contents.
pub struct EntityStore<T: Entity> {
    items: watch::Sender<Arc<Vec<T>>>,
}

impl<T: Entity> EntityStore<T> {
    pub(crate) fn new() -> Self {
        let (items, _) = watch::channel(Arc::new(Vec::new()));
        Self { items }
    }

    /// Current collection snapshot.
    pub fn snapshot(&self) -> Arc<Vec<T>> {
        self.items.borrow().clone()
    }

    /// Watch collection snapshots. The receiver observes every write.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Vec<T>>> {
        self.items.subscribe()
    }

    /// Discard prior contents and install `items` verbatim.
    pub(crate) fn replace_all(&self, items: Vec<T>) {
        self.items.send_replace(Arc::new(items));
    }

    /// Prepend a newly created entity. Id collisions are undefined input
    /// (the server assigns ids) and are not deduplicated.
    pub(crate) fn insert_at_head(&self, entity: T) {
        self.items
            .send_modify(|v| Arc::make_mut(v).insert(0, entity));
    }

    /// Replace the entry with `id` by `merge(current)`, keeping its
    /// position. Returns the merged entity, or `None` when `id` is not
    /// present (a mutation raced a reload and its target is gone).
    pub(crate) fn merge_by_id(
        &self,
        id: EntityId,
        merge: impl FnOnce(&T) -> T,
    ) -> Option<T> {
        let mut merged = None;
        self.items.send_if_modified(|v| {
            let Some(pos) = v.iter().position(|e| e.id() == id) else {
                return false;
            };
            let items = Arc::make_mut(v);
            let next = merge(&items[pos]);
            merged = Some(next.clone());
            items[pos] = next;
            true
        });
        merged
    }

    /// Remove the entry with `id`. Removing an absent id is a no-op;
    /// returns whether an entry was removed.
    pub(crate) fn remove_by_id(&self, id: EntityId) -> bool {
        let mut removed = false;
        self.items.send_if_modified(|v| {
            let Some(pos) = v.iter().position(|e| e.id() == id) else {
                return false;
            };
            Arc::make_mut(v).remove(pos);
            removed = true;
            true
        });
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plantdesk_core::{Machine, MachineStatus};

    fn machine(id: EntityId, name: &str) -> Machine {
        Machine {
            id,
            name: name.into(),
            status: MachineStatus::Operational,
            last_maintenance_date: "2024-01-01".into(),
            created_at: "2024-01-01T00:00:00Z".into(),
            updated_at: "2024-01-01T00:00:00Z".into(),
        }
    }

    fn ids(store: &EntityStore<Machine>) -> Vec<EntityId> {
        store.snapshot().iter().map(|m| m.id).collect()
    }

    #[test]
    fn insert_at_head_prepends() {
        let store = EntityStore::new();
        store.replace_all(vec![machine(1, "A"), machine(2, "B")]);
        store.insert_at_head(machine(3, "C"));
        assert_eq!(ids(&store), vec![3, 1, 2]);
    }

    #[test]
    fn merge_preserves_position() {
        let store = EntityStore::new();
        store.replace_all(vec![machine(1, "A"), machine(2, "B"), machine(3, "C")]);

        let merged = store.merge_by_id(2, |cur| Machine {
            name: "B'".into(),
            ..cur.clone()
        });
        assert_eq!(merged.map(|m| m.name), Some("B'".to_string()));
        assert_eq!(ids(&store), vec![1, 2, 3]);
        assert_eq!(store.snapshot()[1].name, "B'");
    }

    #[test]
    fn merge_of_absent_id_is_a_noop() {
        let store = EntityStore::new();
        store.replace_all(vec![machine(1, "A")]);
        let merged = store.merge_by_id(99, |cur| cur.clone());
        assert!(merged.is_none());
        assert_eq!(ids(&store), vec![1]);
    }

    #[test]
    fn remove_is_idempotent_and_keeps_order() {
        let store = EntityStore::new();
        store.replace_all(vec![machine(1, "A"), machine(2, "B"), machine(3, "C")]);

        assert!(store.remove_by_id(2));
        assert_eq!(ids(&store), vec![1, 3]);

        assert!(!store.remove_by_id(2));
        assert_eq!(ids(&store), vec![1, 3]);
    }

    #[test]
    fn every_write_notifies_subscribers() {
        let store = EntityStore::new();
        let mut rx = store.subscribe();

        store.replace_all(vec![machine(1, "A")]);
        assert!(rx.has_changed().unwrap());
        rx.mark_unchanged();

        store.insert_at_head(machine(2, "B"));
        assert!(rx.has_changed().unwrap());
        rx.mark_unchanged();

        // A no-op write publishes nothing.
        store.remove_by_id(99);
        assert!(!rx.has_changed().unwrap());
    }
}
