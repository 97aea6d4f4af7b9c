//! plantdesk core types.
//!
//! The four record kinds of the plant back-office (workers, machines,
//! stock items, and production orders) plus their client-settable
//! payload shapes, partial update-response shapes, and payload
//! validation. Shared by the HTTP client and the entity cache.

pub mod entity;
pub mod error;
pub mod model;
pub mod reference;

pub use entity::{Entity, EntityId};
pub use error::ValidationError;
pub use model::machine::{Machine, MachinePatch, MachinePayload, MachineStatus};
pub use model::order::{OrderPatch, OrderPayload, OrderStatus, ProductionOrder};
pub use model::stock::{StockItem, StockItemPatch, StockItemPayload, StockItemType};
pub use model::worker::{Worker, WorkerPatch, WorkerPayload, WorkerPosition};
pub use reference::EntityRef;
