use std::sync::Arc;

use tracing::{debug, warn};

use plantdesk_client::{ApiError, NoAuth, ResourceClient, TokenSource};
use plantdesk_core::{
    Entity, EntityId, Machine, MachinePayload, OrderPayload, OrderStatus, ProductionOrder,
    StockItem, StockItemPayload, Worker, WorkerPayload,
};

use crate::collection::Collection;
use crate::error::MutationError;
use crate::merge;

/// Session-scoped cache over the four back-office collections.
///
/// Construct one per application session and clone it into whichever
/// tasks render or mutate records; dropping the last clone tears the
/// cache down. All writes go through the mutation methods here; the
/// per-kind [`Collection`]s expose reads only.
///
/// Payload constraints are the caller's job (the form layer validates
/// before submitting); the server re-checks and a rejection surfaces as
/// a [`MutationError`] with the store untouched.
#[derive(Clone)]
pub struct EntityCache {
    inner: Arc<Inner>,
}

struct Inner {
    workers: Collection<Worker>,
    machines: Collection<Machine>,
    stock_items: Collection<StockItem>,
    orders: Collection<ProductionOrder>,
}

impl EntityCache {
    /// Cache talking anonymously to `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_token_source(base_url, Arc::new(NoAuth))
    }

    /// Cache with a pluggable token source, for deployments behind
    /// bearer auth.
    pub fn with_token_source(
        base_url: impl Into<String>,
        token_source: Arc<dyn TokenSource>,
    ) -> Self {
        let base_url = base_url.into();
        Self {
            inner: Arc::new(Inner {
                workers: Collection::new(ResourceClient::new(&base_url, token_source.clone())),
                machines: Collection::new(ResourceClient::new(&base_url, token_source.clone())),
                stock_items: Collection::new(ResourceClient::new(&base_url, token_source.clone())),
                orders: Collection::new(ResourceClient::new(&base_url, token_source)),
            }),
        }
    }

    pub fn workers(&self) -> &Collection<Worker> {
        &self.inner.workers
    }

    pub fn machines(&self) -> &Collection<Machine> {
        &self.inner.machines
    }

    pub fn stock_items(&self) -> &Collection<StockItem> {
        &self.inner.stock_items
    }

    pub fn orders(&self) -> &Collection<ProductionOrder> {
        &self.inner.orders
    }

    // ── Workers ─────────────────────────────────────────────────────

    pub async fn create_worker(&self, payload: &WorkerPayload) -> Result<Worker, MutationError> {
        create_in(&self.inner.workers, payload).await
    }

    /// Update a worker. Returns the merged cached entity, or `None`
    /// when the id is not cached (the server-side update still took
    /// effect).
    pub async fn update_worker(
        &self,
        id: EntityId,
        payload: &WorkerPayload,
    ) -> Result<Option<Worker>, MutationError> {
        let col = &self.inner.workers;
        let _guard = col.begin_mutation();
        let patch = col
            .client
            .update(id, payload)
            .await
            .map_err(|e| fail("update", Worker::KIND, e))?;
        let machines = self.inner.machines.snapshot();
        Ok(merge_into(col, id, |cur| {
            merge::merge_worker(cur, patch, &machines)
        }))
    }

    pub async fn delete_worker(&self, id: EntityId) -> Result<(), MutationError> {
        delete_in(&self.inner.workers, id).await
    }

    // ── Machines ────────────────────────────────────────────────────

    pub async fn create_machine(&self, payload: &MachinePayload) -> Result<Machine, MutationError> {
        create_in(&self.inner.machines, payload).await
    }

    pub async fn update_machine(
        &self,
        id: EntityId,
        payload: &MachinePayload,
    ) -> Result<Option<Machine>, MutationError> {
        let col = &self.inner.machines;
        let _guard = col.begin_mutation();
        let patch = col
            .client
            .update(id, payload)
            .await
            .map_err(|e| fail("update", Machine::KIND, e))?;
        Ok(merge_into(col, id, |cur| merge::merge_machine(cur, patch)))
    }

    pub async fn delete_machine(&self, id: EntityId) -> Result<(), MutationError> {
        delete_in(&self.inner.machines, id).await
    }

    // ── Stock items ─────────────────────────────────────────────────

    pub async fn create_stock_item(
        &self,
        payload: &StockItemPayload,
    ) -> Result<StockItem, MutationError> {
        create_in(&self.inner.stock_items, payload).await
    }

    pub async fn update_stock_item(
        &self,
        id: EntityId,
        payload: &StockItemPayload,
    ) -> Result<Option<StockItem>, MutationError> {
        let col = &self.inner.stock_items;
        let _guard = col.begin_mutation();
        let patch = col
            .client
            .update(id, payload)
            .await
            .map_err(|e| fail("update", StockItem::KIND, e))?;
        Ok(merge_into(col, id, |cur| {
            merge::merge_stock_item(cur, patch)
        }))
    }

    pub async fn delete_stock_item(&self, id: EntityId) -> Result<(), MutationError> {
        delete_in(&self.inner.stock_items, id).await
    }

    // ── Production orders ───────────────────────────────────────────

    pub async fn create_order(
        &self,
        payload: &OrderPayload,
    ) -> Result<ProductionOrder, MutationError> {
        create_in(&self.inner.orders, payload).await
    }

    pub async fn update_order(
        &self,
        id: EntityId,
        payload: &OrderPayload,
    ) -> Result<Option<ProductionOrder>, MutationError> {
        let col = &self.inner.orders;
        let _guard = col.begin_mutation();
        let patch = col
            .client
            .update(id, payload)
            .await
            .map_err(|e| fail("update", ProductionOrder::KIND, e))?;
        Ok(self.merge_order(id, patch))
    }

    /// Status-only order update (`PUT /manufacturing-orders/{id}/status`).
    pub async fn update_order_status(
        &self,
        id: EntityId,
        status: OrderStatus,
    ) -> Result<Option<ProductionOrder>, MutationError> {
        let col = &self.inner.orders;
        let _guard = col.begin_mutation();
        let patch = col
            .client
            .update_status(id, status)
            .await
            .map_err(|e| fail("update", ProductionOrder::KIND, e))?;
        Ok(self.merge_order(id, patch))
    }

    pub async fn delete_order(&self, id: EntityId) -> Result<(), MutationError> {
        delete_in(&self.inner.orders, id).await
    }

    fn merge_order(
        &self,
        id: EntityId,
        patch: <ProductionOrder as Entity>::Patch,
    ) -> Option<ProductionOrder> {
        let stock_items = self.inner.stock_items.snapshot();
        let machines = self.inner.machines.snapshot();
        merge_into(&self.inner.orders, id, |cur| {
            merge::merge_order(cur, patch, &stock_items, &machines)
        })
    }
}

async fn create_in<T: Entity>(
    col: &Collection<T>,
    payload: &T::Payload,
) -> Result<T, MutationError> {
    let _guard = col.begin_mutation();
    let created = col
        .client
        .create(payload)
        .await
        .map_err(|e| fail("create", T::KIND, e))?;
    debug!(kind = T::KIND, id = created.id(), "created");
    col.store().insert_at_head(created.clone());
    Ok(created)
}

async fn delete_in<T: Entity>(col: &Collection<T>, id: EntityId) -> Result<(), MutationError> {
    let _guard = col.begin_mutation();
    col.client
        .delete(id)
        .await
        .map_err(|e| fail("delete", T::KIND, e))?;
    // Removal is idempotent against the cache: the entry may already be
    // gone locally even though the server confirmed this delete.
    col.store().remove_by_id(id);
    debug!(kind = T::KIND, id, "deleted");
    Ok(())
}

fn merge_into<T: Entity>(
    col: &Collection<T>,
    id: EntityId,
    f: impl FnOnce(&T) -> T,
) -> Option<T> {
    let merged = col.store().merge_by_id(id, f);
    match &merged {
        Some(entity) => debug!(kind = T::KIND, id = entity.id(), "merged update response"),
        None => debug!(kind = T::KIND, id, "update response for uncached id ignored"),
    }
    merged
}

fn fail(op: &'static str, kind: &'static str, source: ApiError) -> MutationError {
    let err = MutationError::new(op, kind, source);
    warn!(error = %err, "mutation failed; store untouched");
    err
}
