use serde::{Deserialize, Serialize};

use crate::entity::{Entity, EntityId};
use crate::error::ValidationError;
use crate::model::{require_name, require_text};

/// Stock item category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StockItemType {
    Part,
    Assembly,
    Material,
}

impl Default for StockItemType {
    fn default() -> Self {
        Self::Part
    }
}

impl StockItemType {
    pub fn label(&self) -> &'static str {
        match self {
            StockItemType::Part => "Part",
            StockItemType::Assembly => "Assembly",
            StockItemType::Material => "Material",
        }
    }
}

/// StockItem — an inventory line served under `/products/`.
///
/// Quantity is unsigned: a negative stock level is unrepresentable on
/// this side of the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StockItem {
    /// Server-assigned numeric id.
    pub id: EntityId,

    pub name: String,

    #[serde(rename = "type")]
    pub item_type: StockItemType,

    /// Units on hand.
    pub stock: u32,

    pub supplier: String,

    pub created_at: String,
    pub updated_at: String,
}

impl Entity for StockItem {
    type Payload = StockItemPayload;
    type Patch = StockItemPatch;
    const KIND: &'static str = "stock item";
    const PATH: &'static str = "products";

    fn id(&self) -> EntityId {
        self.id
    }
}

/// Client-settable stock item fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StockItemPayload {
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: StockItemType,
    pub stock: u32,
    pub supplier: String,
}

impl StockItemPayload {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_name("name", &self.name)?;
        require_text("supplier", &self.supplier)
    }
}

/// Partial stock item update response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StockItemPatch {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub item_type: Option<StockItemType>,
    pub stock: Option<u32>,
    pub supplier: Option<String>,
    pub updated_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_item_json_roundtrip() {
        let s = StockItem {
            id: 12,
            name: "M8 hex bolt".into(),
            item_type: StockItemType::Part,
            stock: 4200,
            supplier: "Fastenal".into(),
            created_at: "2024-01-01T00:00:00Z".into(),
            updated_at: "2024-01-01T00:00:00Z".into(),
        };
        let json = serde_json::to_string(&s).unwrap();
        let back: StockItem = serde_json::from_str(&json).unwrap();
        assert_eq!(s, back);
    }

    #[test]
    fn type_field_wire_name() {
        let s = StockItemPayload {
            name: "Sheet steel".into(),
            item_type: StockItemType::Material,
            stock: 30,
            supplier: "ArcelorMittal".into(),
        };
        let v = serde_json::to_value(&s).unwrap();
        assert_eq!(v.get("type"), Some(&serde_json::json!("MATERIAL")));
    }

    #[test]
    fn negative_stock_is_a_decode_error() {
        let result = serde_json::from_value::<StockItem>(serde_json::json!({
            "id": 1,
            "name": "Bad line",
            "type": "PART",
            "stock": -1,
            "supplier": "Nobody",
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-01T00:00:00Z",
        }));
        assert!(result.is_err());
    }

    #[test]
    fn payload_requires_supplier() {
        let p = StockItemPayload {
            name: "M8 hex bolt".into(),
            item_type: StockItemType::Part,
            stock: 0,
            supplier: " ".into(),
        };
        assert_eq!(p.validate().unwrap_err().field, "supplier");
    }
}
