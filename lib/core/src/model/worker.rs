use serde::{Deserialize, Serialize};

use crate::entity::{Entity, EntityId};
use crate::error::ValidationError;
use crate::model::machine::Machine;
use crate::model::{require_name, require_ref};
use crate::reference::EntityRef;

/// Worker role on the floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkerPosition {
    Operator,
    Technician,
    Supervisor,
    LogisticsCoordinator,
    Assembler,
    ProductionManager,
    ShiftLeader,
    QualityInspector,
    MaintenanceEngineer,
    SafetyOfficer,
    Toolmaker,
}

impl Default for WorkerPosition {
    fn default() -> Self {
        Self::Operator
    }
}

impl WorkerPosition {
    pub fn label(&self) -> &'static str {
        match self {
            WorkerPosition::Operator => "Operator",
            WorkerPosition::Technician => "Technician",
            WorkerPosition::Supervisor => "Supervisor",
            WorkerPosition::LogisticsCoordinator => "Logistics Coordinator",
            WorkerPosition::Assembler => "Assembler",
            WorkerPosition::ProductionManager => "Production Manager",
            WorkerPosition::ShiftLeader => "Shift Leader",
            WorkerPosition::QualityInspector => "Quality Inspector",
            WorkerPosition::MaintenanceEngineer => "Maintenance Engineer",
            WorkerPosition::SafetyOfficer => "Safety Officer",
            WorkerPosition::Toolmaker => "Toolmaker",
        }
    }
}

/// Worker — a staff member assigned to one machine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Worker {
    /// Server-assigned numeric id.
    pub id: EntityId,

    pub name: String,

    pub position: WorkerPosition,

    /// Machine this worker is assigned to.
    pub employee_machine: EntityRef<Machine>,

    pub created_at: String,
    pub updated_at: String,
}

impl Entity for Worker {
    type Payload = WorkerPayload;
    type Patch = WorkerPatch;
    const KIND: &'static str = "worker";
    const PATH: &'static str = "employees";

    fn id(&self) -> EntityId {
        self.id
    }
}

/// Client-settable worker fields. The machine reference is submitted as
/// a bare id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkerPayload {
    pub name: String,
    pub position: WorkerPosition,
    pub machine_id: EntityId,
}

impl WorkerPayload {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_name("name", &self.name)?;
        require_ref("machineId", self.machine_id)
    }
}

/// Partial worker update response.
///
/// Observed server behavior: a worker update may come back with only
/// `name`/`position`/`machineId` and no rehydrated machine object.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkerPatch {
    pub name: Option<String>,
    pub position: Option<WorkerPosition>,
    /// Machine reference, fully rehydrated or as a bare id, when the
    /// server includes one under this key.
    pub employee_machine: Option<EntityRef<Machine>>,
    /// Bare machine reference under its payload key.
    pub machine_id: Option<EntityId>,
    pub updated_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::machine::MachineStatus;

    fn machine() -> Machine {
        Machine {
            id: 3,
            name: "Lathe A".into(),
            status: MachineStatus::Operational,
            last_maintenance_date: "2024-01-01".into(),
            created_at: "2024-01-01T00:00:00Z".into(),
            updated_at: "2024-01-01T00:00:00Z".into(),
        }
    }

    #[test]
    fn worker_json_roundtrip() {
        let w = Worker {
            id: 1,
            name: "John Smith".into(),
            position: WorkerPosition::ShiftLeader,
            employee_machine: EntityRef::Resolved(machine()),
            created_at: "2024-01-01T00:00:00Z".into(),
            updated_at: "2024-01-01T00:00:00Z".into(),
        };
        let json = serde_json::to_string(&w).unwrap();
        let back: Worker = serde_json::from_str(&json).unwrap();
        assert_eq!(w, back);
    }

    #[test]
    fn position_wire_format() {
        let json = serde_json::to_value(WorkerPosition::LogisticsCoordinator).unwrap();
        assert_eq!(json, serde_json::json!("LOGISTICS_COORDINATOR"));
    }

    #[test]
    fn payload_requires_machine() {
        let p = WorkerPayload {
            name: "John Smith".into(),
            position: WorkerPosition::Operator,
            machine_id: 0,
        };
        assert_eq!(p.validate().unwrap_err().field, "machineId");
    }

    #[test]
    fn patch_decodes_bare_machine_id() {
        let patch: WorkerPatch = serde_json::from_value(serde_json::json!({
            "id": 1,
            "name": "John Smith",
            "position": "TECHNICIAN",
            "machineId": 9,
            "updatedAt": "2024-03-01T00:00:00Z",
        }))
        .unwrap();
        assert_eq!(patch.machine_id, Some(9));
        assert!(patch.employee_machine.is_none());
    }

    #[test]
    fn patch_decodes_machine_under_relation_key_either_shape() {
        let patch: WorkerPatch =
            serde_json::from_value(serde_json::json!({"employeeMachine": 9})).unwrap();
        assert_eq!(patch.employee_machine, Some(EntityRef::Id(9)));

        let patch: WorkerPatch = serde_json::from_value(serde_json::json!({
            "employeeMachine": serde_json::to_value(machine()).unwrap(),
        }))
        .unwrap();
        assert_eq!(patch.employee_machine, Some(EntityRef::Resolved(machine())));
    }
}
