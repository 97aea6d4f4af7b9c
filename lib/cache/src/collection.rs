use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::watch;
use tracing::{debug, warn};

use plantdesk_client::ResourceClient;
use plantdesk_core::Entity;

use crate::error::FetchError;
use crate::store::EntityStore;

/// Load state of a collection.
#[derive(Debug, Clone, Default)]
pub enum LoadState {
    /// No fetch attempted yet.
    #[default]
    NotLoaded,
    /// Initial fetch in flight.
    Loading,
    /// Collection installed in the store.
    Ready,
    /// Fetch failed; the store was left untouched.
    Failed(FetchError),
}

impl LoadState {
    pub fn is_ready(&self) -> bool {
        matches!(self, LoadState::Ready)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }
}

/// One entity kind's cached collection: the store plus its lazy query
/// layer.
///
/// The first `ensure_loaded` issues the get-all request; later calls
/// return the cached snapshot without refetching. Staleness is the
/// deliberate trade-off for not re-fetching after every local mutation.
pub struct Collection<T: Entity> {
    pub(crate) client: ResourceClient<T>,
    store: EntityStore<T>,
    state: watch::Sender<LoadState>,
    in_flight: AtomicUsize,
}

impl<T: Entity> Collection<T> {
    pub(crate) fn new(client: ResourceClient<T>) -> Self {
        let (state, _) = watch::channel(LoadState::NotLoaded);
        Self {
            client,
            store: EntityStore::new(),
            state,
            in_flight: AtomicUsize::new(0),
        }
    }

    pub(crate) fn store(&self) -> &EntityStore<T> {
        &self.store
    }

    /// Current collection snapshot, whatever the load state.
    pub fn snapshot(&self) -> Arc<Vec<T>> {
        self.store.snapshot()
    }

    /// Watch collection snapshots.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Vec<T>>> {
        self.store.subscribe()
    }

    /// Current load state.
    pub fn load_state(&self) -> LoadState {
        self.state.borrow().clone()
    }

    /// Watch load state transitions (spinner and error banners).
    pub fn watch_state(&self) -> watch::Receiver<LoadState> {
        self.state.subscribe()
    }

    /// Number of mutations currently in flight against this kind.
    pub fn mutations_in_flight(&self) -> usize {
        self.in_flight.load(Ordering::Relaxed)
    }

    /// Fetch the collection on first access.
    ///
    /// Concurrent first accesses share one request: the caller that wins
    /// the claim fetches, the rest await its outcome. A failed load
    /// stays failed, with no automatic retry; call [`refresh`] for a
    /// deliberate reload.
    ///
    /// [`refresh`]: Collection::refresh
    pub async fn ensure_loaded(&self) -> Result<Arc<Vec<T>>, FetchError> {
        loop {
            let mut claimed = false;
            self.state.send_if_modified(|s| {
                if matches!(s, LoadState::NotLoaded) {
                    *s = LoadState::Loading;
                    claimed = true;
                    true
                } else {
                    false
                }
            });
            if claimed {
                return self.fetch().await;
            }

            let mut rx = self.state.subscribe();
            loop {
                let state = rx.borrow_and_update().clone();
                match state {
                    LoadState::Ready => return Ok(self.store.snapshot()),
                    LoadState::Failed(e) => return Err(e),
                    LoadState::NotLoaded => break,
                    LoadState::Loading => {
                        if rx.changed().await.is_err() {
                            break;
                        }
                    }
                }
            }
        }
    }

    /// Deliberate manual reload. Never runs automatically.
    pub async fn refresh(&self) -> Result<Arc<Vec<T>>, FetchError> {
        self.state.send_replace(LoadState::Loading);
        self.fetch().await
    }

    async fn fetch(&self) -> Result<Arc<Vec<T>>, FetchError> {
        debug!(kind = T::KIND, "loading collection");
        match self.client.list().await {
            Ok(items) => {
                debug!(kind = T::KIND, count = items.len(), "collection loaded");
                self.store.replace_all(items);
                self.state.send_replace(LoadState::Ready);
                Ok(self.store.snapshot())
            }
            Err(e) => {
                let err = FetchError::new(T::KIND, e);
                warn!(kind = T::KIND, error = %err, "collection load failed");
                self.state.send_replace(LoadState::Failed(err.clone()));
                Err(err)
            }
        }
    }

    /// Count one in-flight mutation until the returned guard drops.
    pub(crate) fn begin_mutation(&self) -> InFlightGuard<'_> {
        self.in_flight.fetch_add(1, Ordering::Relaxed);
        InFlightGuard {
            counter: &self.in_flight,
        }
    }
}

pub(crate) struct InFlightGuard<'a> {
    counter: &'a AtomicUsize,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.counter.fetch_sub(1, Ordering::Relaxed);
    }
}
