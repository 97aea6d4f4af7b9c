//! Referential merge of partial update responses.
//!
//! Update responses may carry only the fields a form actually changed.
//! Every field present in the response overwrites the cached entity;
//! every field absent is retained unmodified. A reference arriving as a
//! bare id is reconstituted from the referenced kind's cached
//! collection where possible, so the embedded object stays structurally
//! complete.
//!
//! No cascading: merging a machine update does not revise the machine
//! snapshots embedded in cached workers or orders.

use plantdesk_core::{
    Entity, EntityId, EntityRef, Machine, MachinePatch, OrderPatch, ProductionOrder, StockItem,
    StockItemPatch, Worker, WorkerPatch,
};

/// Resolve a reference update against the current embedded value and
/// the referenced kind's cached collection.
///
/// A full object in the response always wins. A bare id (under the
/// relation key or the payload-style id key) keeps the current embedded
/// entity when the id is unchanged, otherwise embeds the cached entity
/// with that id, otherwise falls back to an id-only placeholder the UI
/// must tolerate until the collection is loaded.
fn resolve_ref<T: Entity>(
    current: &EntityRef<T>,
    from_response: Option<EntityRef<T>>,
    bare_id: Option<EntityId>,
    cached: &[T],
) -> EntityRef<T> {
    match from_response {
        Some(EntityRef::Resolved(entity)) => EntityRef::Resolved(entity),
        Some(EntityRef::Id(id)) => resolve_bare(current, id, cached),
        None => match bare_id {
            None => current.clone(),
            Some(id) => resolve_bare(current, id, cached),
        },
    }
}

fn resolve_bare<T: Entity>(current: &EntityRef<T>, id: EntityId, cached: &[T]) -> EntityRef<T> {
    if id == current.id() && current.is_resolved() {
        return current.clone();
    }
    cached
        .iter()
        .find(|e| e.id() == id)
        .map(|e| EntityRef::Resolved(e.clone()))
        .unwrap_or(EntityRef::Id(id))
}

pub(crate) fn merge_machine(current: &Machine, patch: MachinePatch) -> Machine {
    Machine {
        id: current.id,
        name: patch.name.unwrap_or_else(|| current.name.clone()),
        status: patch.status.unwrap_or(current.status),
        last_maintenance_date: patch
            .last_maintenance_date
            .unwrap_or_else(|| current.last_maintenance_date.clone()),
        created_at: current.created_at.clone(),
        updated_at: patch.updated_at.unwrap_or_else(|| current.updated_at.clone()),
    }
}

pub(crate) fn merge_worker(current: &Worker, patch: WorkerPatch, machines: &[Machine]) -> Worker {
    Worker {
        id: current.id,
        name: patch.name.unwrap_or_else(|| current.name.clone()),
        position: patch.position.unwrap_or(current.position),
        employee_machine: resolve_ref(
            &current.employee_machine,
            patch.employee_machine,
            patch.machine_id,
            machines,
        ),
        created_at: current.created_at.clone(),
        updated_at: patch.updated_at.unwrap_or_else(|| current.updated_at.clone()),
    }
}

pub(crate) fn merge_stock_item(current: &StockItem, patch: StockItemPatch) -> StockItem {
    StockItem {
        id: current.id,
        name: patch.name.unwrap_or_else(|| current.name.clone()),
        item_type: patch.item_type.unwrap_or(current.item_type),
        stock: patch.stock.unwrap_or(current.stock),
        supplier: patch.supplier.unwrap_or_else(|| current.supplier.clone()),
        created_at: current.created_at.clone(),
        updated_at: patch.updated_at.unwrap_or_else(|| current.updated_at.clone()),
    }
}

pub(crate) fn merge_order(
    current: &ProductionOrder,
    patch: OrderPatch,
    stock_items: &[StockItem],
    machines: &[Machine],
) -> ProductionOrder {
    ProductionOrder {
        id: current.id,
        project: patch.project.unwrap_or_else(|| current.project.clone()),
        status: patch.status.unwrap_or(current.status),
        quantity: patch.quantity.unwrap_or(current.quantity),
        date: patch.date.unwrap_or_else(|| current.date.clone()),
        product: resolve_ref(&current.product, patch.product, patch.product_id, stock_items),
        machine: resolve_ref(&current.machine, patch.machine, patch.machine_id, machines),
        created_at: current.created_at.clone(),
        updated_at: patch.updated_at.unwrap_or_else(|| current.updated_at.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plantdesk_core::{MachineStatus, WorkerPosition};

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

    fn worker() -> Worker {
        Worker {
            id: 1,
            name: "John Smith".into(),
            position: WorkerPosition::Operator,
            employee_machine: EntityRef::Resolved(machine(3, "Lathe A")),
            created_at: "2024-01-01T00:00:00Z".into(),
            updated_at: "2024-01-01T00:00:00Z".into(),
        }
    }

    #[test]
    fn absent_fields_are_retained() {
        let current = machine(7, "CNC Mill #4");
        let patch = MachinePatch {
            status: Some(MachineStatus::UnderMaintenance),
            updated_at: Some("2024-02-01T00:00:00Z".into()),
            ..Default::default()
        };
        let merged = merge_machine(&current, patch);
        assert_eq!(merged.status, MachineStatus::UnderMaintenance);
        assert_eq!(merged.name, "CNC Mill #4");
        assert_eq!(merged.last_maintenance_date, "2024-01-01");
        assert_eq!(merged.created_at, "2024-01-01T00:00:00Z");
        assert_eq!(merged.updated_at, "2024-02-01T00:00:00Z");
    }

    #[test]
    fn unchanged_bare_id_keeps_embedded_machine() {
        let current = worker();
        let patch = WorkerPatch {
            name: Some("John A. Smith".into()),
            machine_id: Some(3),
            ..Default::default()
        };
        // Machine collection not loaded: the unchanged id must not
        // downgrade the embedded object.
        let merged = merge_worker(&current, patch, &[]);
        assert_eq!(merged.name, "John A. Smith");
        assert!(merged.employee_machine.is_resolved());
        assert_eq!(merged.employee_machine.id(), 3);
    }

    #[test]
    fn changed_bare_id_resolves_from_cache() {
        let current = worker();
        let patch = WorkerPatch {
            machine_id: Some(9),
            ..Default::default()
        };
        let machines = vec![machine(3, "Lathe A"), machine(9, "Press B")];
        let merged = merge_worker(&current, patch, &machines);
        assert_eq!(merged.employee_machine.id(), 9);
        assert_eq!(
            merged.employee_machine.entity().map(|m| m.name.as_str()),
            Some("Press B")
        );
    }

    #[test]
    fn changed_bare_id_without_cache_leaves_placeholder() {
        let current = worker();
        let patch = WorkerPatch {
            machine_id: Some(9),
            ..Default::default()
        };
        let merged = merge_worker(&current, patch, &[]);
        assert_eq!(merged.employee_machine, EntityRef::Id(9));
    }

    #[test]
    fn full_object_in_response_wins_over_bare_id() {
        let current = worker();
        let patch = WorkerPatch {
            employee_machine: Some(EntityRef::Resolved(machine(9, "Press B"))),
            machine_id: Some(3),
            ..Default::default()
        };
        let merged = merge_worker(&current, patch, &[]);
        assert_eq!(merged.employee_machine.id(), 9);
        assert!(merged.employee_machine.is_resolved());
    }

    #[test]
    fn id_only_placeholder_upgrades_once_cached() {
        let mut current = worker();
        current.employee_machine = EntityRef::Id(9);
        let patch = WorkerPatch {
            machine_id: Some(9),
            ..Default::default()
        };
        let machines = vec![machine(9, "Press B")];
        let merged = merge_worker(&current, patch, &machines);
        assert!(merged.employee_machine.is_resolved());
    }

    #[test]
    fn order_merges_both_references() {
        let current = ProductionOrder {
            id: 5,
            project: "Gearbox revision B".into(),
            status: plantdesk_core::OrderStatus::Pending,
            quantity: 250,
            date: "2024-04-01T00:00:00Z".into(),
            product: EntityRef::Id(12),
            machine: EntityRef::Resolved(machine(7, "CNC Mill #4")),
            created_at: "2024-01-01T00:00:00Z".into(),
            updated_at: "2024-01-01T00:00:00Z".into(),
        };
        let patch = OrderPatch {
            status: Some(plantdesk_core::OrderStatus::InProgress),
            product_id: Some(12),
            machine_id: Some(7),
            ..Default::default()
        };
        let stock = vec![StockItem {
            id: 12,
            name: "Gear housing".into(),
            item_type: plantdesk_core::StockItemType::Assembly,
            stock: 80,
            supplier: "In-house".into(),
            created_at: "2024-01-01T00:00:00Z".into(),
            updated_at: "2024-01-01T00:00:00Z".into(),
        }];
        let merged = merge_order(&current, patch, &stock, &[]);
        assert_eq!(merged.status, plantdesk_core::OrderStatus::InProgress);
        // Placeholder upgraded from the now-cached stock collection.
        assert!(merged.product.is_resolved());
        // Unchanged machine id: embedded object preserved even though
        // the machine slice is empty.
        assert!(merged.machine.is_resolved());
        assert_eq!(merged.quantity, 250);
    }
}
