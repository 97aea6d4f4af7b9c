use serde::Serialize;
use serde::de::DeserializeOwned;

/// Server-assigned numeric identifier, unique within an entity kind.
/// The client never generates one.
pub type EntityId = u64;

/// A record kind served by the back-office API.
///
/// `Payload` is the client-settable shape submitted on create and update
/// (no id, no timestamps; references as bare ids). `Patch` is the
/// all-optional shape update responses are decoded into, since the
/// server may return only the fields a form actually changed.
pub trait Entity: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    type Payload: Serialize + Send + Sync;
    type Patch: DeserializeOwned + Send + 'static;

    /// Singular name used in logs and error messages.
    const KIND: &'static str;

    /// REST collection segment, e.g. `employees`.
    const PATH: &'static str;

    fn id(&self) -> EntityId;
}
