use std::sync::Arc;

use thiserror::Error;

use plantdesk_client::ApiError;

/// Failure of a collection load. Distinct from [`MutationError`]: a
/// failed load leaves the store in its prior state (empty on first
/// load). Cheap to clone so it can ride the load-state watch channel.
#[derive(Debug, Clone, Error)]
#[error("loading {kind} collection failed: {source}")]
pub struct FetchError {
    /// Entity kind the load was for.
    pub kind: &'static str,
    #[source]
    pub source: Arc<ApiError>,
}

impl FetchError {
    pub(crate) fn new(kind: &'static str, source: ApiError) -> Self {
        Self {
            kind,
            source: Arc::new(source),
        }
    }
}

/// Failure of a create/update/delete attempt. The store is untouched;
/// each user action maps to exactly one attempt, so there is no retry.
#[derive(Debug, Clone, Error)]
#[error("{op} {kind} failed: {source}")]
pub struct MutationError {
    /// Operation that failed: `create`, `update`, or `delete`.
    pub op: &'static str,
    /// Entity kind the operation targeted.
    pub kind: &'static str,
    #[source]
    pub source: Arc<ApiError>,
}

impl MutationError {
    pub(crate) fn new(op: &'static str, kind: &'static str, source: ApiError) -> Self {
        Self {
            op,
            kind,
            source: Arc::new(source),
        }
    }
}
