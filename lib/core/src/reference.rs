use serde::{Deserialize, Serialize};

use crate::entity::{Entity, EntityId};

/// An embedded cross-entity reference.
///
/// The server embeds full objects in canonical responses. Merging an
/// update response that carries only a bare reference id, while the
/// referenced collection is not cached, leaves the id-only state;
/// consumers must tolerate it (no display name) until that collection
/// is loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityRef<T> {
    /// Fully resolved referenced entity.
    Resolved(T),
    /// Known id whose entity is not cached.
    Id(EntityId),
}

impl<T: Entity> EntityRef<T> {
    pub fn id(&self) -> EntityId {
        match self {
            EntityRef::Resolved(e) => e.id(),
            EntityRef::Id(id) => *id,
        }
    }

    pub fn entity(&self) -> Option<&T> {
        match self {
            EntityRef::Resolved(e) => Some(e),
            EntityRef::Id(_) => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, EntityRef::Resolved(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::machine::{Machine, MachineStatus};

    #[test]
    fn full_object_decodes_as_resolved() {
        let json = serde_json::json!({
            "id": 7,
            "name": "CNC Mill #4",
            "status": "OPERATIONAL",
            "lastMaintenanceDate": "2024-01-01",
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-01T00:00:00Z",
        });
        let r: EntityRef<Machine> = serde_json::from_value(json).unwrap();
        assert!(r.is_resolved());
        assert_eq!(r.id(), 7);
        assert_eq!(r.entity().unwrap().status, MachineStatus::Operational);
    }

    #[test]
    fn bare_id_decodes_as_placeholder() {
        let r: EntityRef<Machine> = serde_json::from_value(serde_json::json!(7)).unwrap();
        assert!(!r.is_resolved());
        assert_eq!(r.id(), 7);
        assert!(r.entity().is_none());
    }
}
