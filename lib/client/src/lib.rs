//! plantdesk HTTP client.
//!
//! A type-safe CRUD client per entity kind. Authentication is handled by
//! pluggable [`TokenSource`] implementations (Go-style
//! `oauth2.TokenSource` pattern).
//!
//! # Usage
//!
//! ```ignore
//! use plantdesk_client::{NoAuth, ResourceClient};
//! use plantdesk_core::Machine;
//!
//! let client = ResourceClient::<Machine>::new("http://localhost:8080", Arc::new(NoAuth));
//! let machines = client.list().await?;
//! ```

use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::debug;

use plantdesk_core::{Entity, EntityId, OrderStatus, ProductionOrder};

// ── Error ───────────────────────────────────────────────────────────

/// Client-side API error.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server answered with a non-success status. Covers validation
    /// rejections and not-found alike; the status tells them apart.
    #[error("HTTP {status}: {message}")]
    Server { status: u16, message: String },

    #[error("network: {0}")]
    Network(#[from] reqwest::Error),

    #[error("auth: {0}")]
    Auth(String),

    #[error("decode: {0}")]
    Decode(String),
}

// ── TokenSource ─────────────────────────────────────────────────────

/// Pluggable token provider. Called before every API request.
///
/// Returns `Ok(None)` to skip the Authorization header (anonymous).
#[async_trait::async_trait]
pub trait TokenSource: Send + Sync + 'static {
    async fn token(&self) -> Result<Option<String>, ApiError>;
}

/// No authentication — anonymous requests.
pub struct NoAuth;

#[async_trait::async_trait]
impl TokenSource for NoAuth {
    async fn token(&self) -> Result<Option<String>, ApiError> {
        Ok(None)
    }
}

/// Static bearer token (already obtained externally).
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

#[async_trait::async_trait]
impl TokenSource for StaticToken {
    async fn token(&self) -> Result<Option<String>, ApiError> {
        Ok(Some(self.0.clone()))
    }
}

// ── ResourceClient ──────────────────────────────────────────────────

/// Type-safe CRUD client for a single entity kind.
///
/// Paths follow the back-office API layout: the collection lives at
/// `{base_url}/{path}/` (trailing slash) and items at
/// `{base_url}/{path}/{id}`.
pub struct ResourceClient<T: Entity> {
    http: reqwest::Client,
    base_url: String,
    token_source: Arc<dyn TokenSource>,
    _phantom: PhantomData<T>,
}

impl<T: Entity> ResourceClient<T> {
    pub fn new(base_url: impl Into<String>, token_source: Arc<dyn TokenSource>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token_source,
            _phantom: PhantomData,
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/{}/", self.base_url, T::PATH)
    }

    fn item_url(&self, id: EntityId) -> String {
        format!("{}/{}/{}", self.base_url, T::PATH, id)
    }

    /// Build a request with auth header.
    async fn authed(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<reqwest::RequestBuilder, ApiError> {
        match self.token_source.token().await? {
            Some(token) => Ok(builder.bearer_auth(token)),
            None => Ok(builder),
        }
    }

    /// Parse an API response, mapping HTTP errors to `ApiError`.
    async fn parse<R: DeserializeOwned>(resp: reqwest::Response) -> Result<R, ApiError> {
        let status = resp.status();
        if !status.is_success() {
            let code = status.as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::Server {
                status: code,
                message: body,
            });
        }
        resp.json::<R>()
            .await
            .map_err(|e| ApiError::Decode(format!("response body: {}", e)))
    }

    /// Fetch the full collection. The server answers with a bare JSON
    /// array.
    pub async fn list(&self) -> Result<Vec<T>, ApiError> {
        debug!(kind = T::KIND, "GET collection");
        let req = self.http.get(self.collection_url());
        let req = self.authed(req).await?;
        let resp = req.send().await?;
        Self::parse(resp).await
    }

    /// Create a record. The response is the canonical new entity with
    /// server-assigned id and timestamps.
    pub async fn create(&self, payload: &T::Payload) -> Result<T, ApiError> {
        debug!(kind = T::KIND, "POST create");
        let req = self.http.post(self.collection_url()).json(payload);
        let req = self.authed(req).await?;
        let resp = req.send().await?;
        Self::parse(resp).await
    }

    /// Update a record by id. Decoded as a patch: servers may return
    /// only the fields the request changed.
    pub async fn update(&self, id: EntityId, payload: &T::Payload) -> Result<T::Patch, ApiError> {
        debug!(kind = T::KIND, id, "PUT update");
        let req = self.http.put(self.item_url(id)).json(payload);
        let req = self.authed(req).await?;
        let resp = req.send().await?;
        Self::parse(resp).await
    }

    /// Delete a record by id. Only an explicit success status counts;
    /// any error, "not found" included, is surfaced.
    pub async fn delete(&self, id: EntityId) -> Result<(), ApiError> {
        debug!(kind = T::KIND, id, "DELETE");
        let req = self.http.delete(self.item_url(id));
        let req = self.authed(req).await?;
        let resp = req.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let code = status.as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::Server {
                status: code,
                message: body,
            });
        }
        Ok(())
    }
}

impl ResourceClient<ProductionOrder> {
    /// Status-only update: `PUT /manufacturing-orders/{id}/status`.
    pub async fn update_status(
        &self,
        id: EntityId,
        status: OrderStatus,
    ) -> Result<<ProductionOrder as Entity>::Patch, ApiError> {
        debug!(kind = ProductionOrder::KIND, id, "PUT status");
        let url = format!("{}/status", self.item_url(id));
        let req = self
            .http
            .put(url)
            .json(&serde_json::json!({ "status": status }));
        let req = self.authed(req).await?;
        let resp = req.send().await?;
        Self::parse(resp).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plantdesk_core::{Machine, Worker};

    #[tokio::test]
    async fn no_auth_returns_none() {
        let ts = NoAuth;
        assert!(ts.token().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn static_token_returns_value() {
        let ts = StaticToken::new("my-jwt-token");
        assert_eq!(ts.token().await.unwrap(), Some("my-jwt-token".to_string()));
    }

    #[test]
    fn url_layout() {
        let client = ResourceClient::<Worker>::new("http://localhost:8080/", Arc::new(NoAuth));
        assert_eq!(client.collection_url(), "http://localhost:8080/employees/");
        assert_eq!(client.item_url(7), "http://localhost:8080/employees/7");

        let client = ResourceClient::<Machine>::new("http://localhost:8080", Arc::new(NoAuth));
        assert_eq!(client.collection_url(), "http://localhost:8080/machines/");
    }
}
