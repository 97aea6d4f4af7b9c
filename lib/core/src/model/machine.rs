use serde::{Deserialize, Serialize};

use crate::entity::{Entity, EntityId};
use crate::error::ValidationError;
use crate::model::{require_date, require_name};

/// Machine status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MachineStatus {
    Operational,
    UnderMaintenance,
    OutOfOrder,
    Idle,
    Decommissioned,
}

impl Default for MachineStatus {
    fn default() -> Self {
        Self::Operational
    }
}

impl MachineStatus {
    /// Human-readable label for rendering surfaces.
    pub fn label(&self) -> &'static str {
        match self {
            MachineStatus::Operational => "Operational",
            MachineStatus::UnderMaintenance => "Under Maintenance",
            MachineStatus::OutOfOrder => "Out of Order",
            MachineStatus::Idle => "Idle",
            MachineStatus::Decommissioned => "Decommissioned",
        }
    }
}

/// Machine — a production machine on the shop floor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Machine {
    /// Server-assigned numeric id.
    pub id: EntityId,

    pub name: String,

    pub status: MachineStatus,

    /// RFC 3339 timestamp or bare `YYYY-MM-DD` date.
    pub last_maintenance_date: String,

    pub created_at: String,
    pub updated_at: String,
}

impl Entity for Machine {
    type Payload = MachinePayload;
    type Patch = MachinePatch;
    const KIND: &'static str = "machine";
    const PATH: &'static str = "machines";

    fn id(&self) -> EntityId {
        self.id
    }
}

/// Client-settable machine fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MachinePayload {
    pub name: String,
    pub status: MachineStatus,
    pub last_maintenance_date: String,
}

impl MachinePayload {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_name("name", &self.name)?;
        require_date("lastMaintenanceDate", &self.last_maintenance_date)
    }
}

/// Partial machine update response. Absent fields keep their cached
/// value on merge.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MachinePatch {
    pub name: Option<String>,
    pub status: Option<MachineStatus>,
    pub last_maintenance_date: Option<String>,
    pub updated_at: Option<String>,
}
