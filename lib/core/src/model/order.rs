use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::entity::{Entity, EntityId};
use crate::error::ValidationError;
use crate::model::machine::Machine;
use crate::model::stock::StockItem;
use crate::model::{require_date, require_name, require_ref};
use crate::reference::EntityRef;

/// Production order lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    InProgress,
    Completed,
}

impl Default for OrderStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl OrderStatus {
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::InProgress => "In Progress",
            OrderStatus::Completed => "Completed",
        }
    }
}

impl FromStr for OrderStatus {
    type Err = ValidationError;

    /// Parses the wire form, case-insensitively (`in_progress`,
    /// `IN_PROGRESS`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PENDING" => Ok(OrderStatus::Pending),
            "IN_PROGRESS" => Ok(OrderStatus::InProgress),
            "COMPLETED" => Ok(OrderStatus::Completed),
            _ => Err(ValidationError::new(
                "status",
                format!("unknown status {s:?} (expected PENDING, IN_PROGRESS, or COMPLETED)"),
            )),
        }
    }
}

/// ProductionOrder — a scheduled production run of one stock item on
/// one machine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductionOrder {
    /// Server-assigned numeric id.
    pub id: EntityId,

    /// Project the run belongs to.
    pub project: String,

    pub status: OrderStatus,

    /// Units to produce, at least 1.
    pub quantity: u32,

    /// Scheduled date, RFC 3339.
    pub date: String,

    /// Stock item being produced.
    pub product: EntityRef<StockItem>,

    /// Machine the run is scheduled on.
    pub machine: EntityRef<Machine>,

    pub created_at: String,
    pub updated_at: String,
}

impl Entity for ProductionOrder {
    type Payload = OrderPayload;
    type Patch = OrderPatch;
    const KIND: &'static str = "order";
    const PATH: &'static str = "manufacturing-orders";

    fn id(&self) -> EntityId {
        self.id
    }
}

/// Client-settable order fields. References are submitted as bare ids.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayload {
    pub project: String,
    pub status: OrderStatus,
    pub quantity: u32,
    pub date: String,
    pub product_id: EntityId,
    pub machine_id: EntityId,
}

impl OrderPayload {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_name("project", &self.project)?;
        if self.quantity < 1 {
            return Err(ValidationError::new("quantity", "must be at least 1"));
        }
        require_date("date", &self.date)?;
        require_ref("productId", self.product_id)?;
        require_ref("machineId", self.machine_id)
    }
}

/// Partial order update response. Either a full embedded object or a
/// bare reference id may arrive for each relation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderPatch {
    pub project: Option<String>,
    pub status: Option<OrderStatus>,
    pub quantity: Option<u32>,
    pub date: Option<String>,
    pub product: Option<EntityRef<StockItem>>,
    pub product_id: Option<EntityId>,
    pub machine: Option<EntityRef<Machine>>,
    pub machine_id: Option<EntityId>,
    pub updated_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::machine::MachineStatus;
    use crate::model::stock::StockItemType;

    fn order() -> ProductionOrder {
        ProductionOrder {
            id: 5,
            project: "Gearbox revision B".into(),
            status: OrderStatus::Pending,
            quantity: 250,
            date: "2024-04-01T00:00:00Z".into(),
            product: EntityRef::Resolved(StockItem {
                id: 12,
                name: "Gear housing".into(),
                item_type: StockItemType::Assembly,
                stock: 80,
                supplier: "In-house".into(),
                created_at: "2024-01-01T00:00:00Z".into(),
                updated_at: "2024-01-01T00:00:00Z".into(),
            }),
            machine: EntityRef::Resolved(Machine {
                id: 7,
                name: "CNC Mill #4".into(),
                status: MachineStatus::Operational,
                last_maintenance_date: "2024-01-01".into(),
                created_at: "2024-01-01T00:00:00Z".into(),
                updated_at: "2024-01-01T00:00:00Z".into(),
            }),
            created_at: "2024-01-01T00:00:00Z".into(),
            updated_at: "2024-01-01T00:00:00Z".into(),
        }
    }

    #[test]
    fn order_json_roundtrip() {
        let o = order();
        let json = serde_json::to_string(&o).unwrap();
        let back: ProductionOrder = serde_json::from_str(&json).unwrap();
        assert_eq!(o, back);
    }

    #[test]
    fn status_from_str() {
        assert_eq!("IN_PROGRESS".parse::<OrderStatus>().unwrap(), OrderStatus::InProgress);
        assert_eq!("pending".parse::<OrderStatus>().unwrap(), OrderStatus::Pending);
        assert!("DONE".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn zero_quantity_rejected_before_any_request() {
        let p = OrderPayload {
            project: "Gearbox revision B".into(),
            status: OrderStatus::Pending,
            quantity: 0,
            date: "2024-04-01T00:00:00Z".into(),
            product_id: 12,
            machine_id: 7,
        };
        assert_eq!(p.validate().unwrap_err().field, "quantity");
    }

    #[test]
    fn payload_wire_shape() {
        let p = OrderPayload {
            project: "Gearbox revision B".into(),
            status: OrderStatus::InProgress,
            quantity: 250,
            date: "2024-04-01T00:00:00Z".into(),
            product_id: 12,
            machine_id: 7,
        };
        let v = serde_json::to_value(&p).unwrap();
        assert_eq!(v.get("productId"), Some(&serde_json::json!(12)));
        assert_eq!(v.get("machineId"), Some(&serde_json::json!(7)));
        assert_eq!(v.get("status"), Some(&serde_json::json!("IN_PROGRESS")));
        assert!(v.get("id").is_none());
    }
}
