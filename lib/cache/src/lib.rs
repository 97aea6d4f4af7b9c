//! In-memory entity cache over the plantdesk back-office API.
//!
//! Each entity kind gets one ordered collection, loaded lazily on first
//! access and kept consistent with the remote source of truth by merging
//! confirmed mutation results. The discipline is confirm-then-commit:
//! the cache is written only after the server acknowledges an operation,
//! never before, so there is no rollback path.
//!
//! Cross-entity references (a worker's machine, an order's stock item
//! and machine) are preserved across partial update responses by the
//! referential merge resolver; see [`EntityCache`] for the write
//! surface.

mod cache;
mod collection;
mod error;
mod merge;
mod store;

pub use cache::EntityCache;
pub use collection::{Collection, LoadState};
pub use error::{FetchError, MutationError};
pub use store::EntityStore;
