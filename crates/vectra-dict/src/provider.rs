//! Dictionary provider: TTL cache plus in-flight load deduplication.
//!
//! `load(code)` resolves in this order:
//!
//! 1. Fresh cache entry (caching enabled and `now - timestamp < expiry`)
//! 2. The load already in flight for `code`, if any
//! 3. A new loader call, run as its own task and shared by every caller
//!    that joins before it settles
//!
//! A load keeps running when all of its callers go away; its cache write
//! still applies. The in-flight marker is removed when the load settles,
//! on success or failure.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use serde_json::Value;
use tokio::time::Instant;
use tracing::{debug, warn};

use vectra_core::config::dict::DictDefaults;
use vectra_core::error::AppError;
use vectra_core::result::AppResult;
use vectra_core::types::{stringify, values_equal};

use crate::config::{DictConfig, DictLoader};
use crate::item::DictItem;

type SharedLoad = Shared<BoxFuture<'static, AppResult<Arc<Vec<DictItem>>>>>;

/// A cached dictionary.
#[derive(Debug, Clone)]
struct CachedDict {
    data: Arc<Vec<DictItem>>,
    timestamp: Instant,
}

/// The single outstanding load of one code.
struct InFlight {
    /// Distinguishes this load from a later one for the same code.
    generation: u64,
    /// Callers currently awaiting the load, including the one that
    /// started it. A caller that drops its future stops counting.
    waiters: usize,
    future: SharedLoad,
}

struct DictInner {
    configs: DashMap<String, DictConfig>,
    cache: DashMap<String, CachedDict>,
    in_flight: DashMap<String, InFlight>,
    defaults: DictDefaults,
    generation: AtomicU64,
}

/// Removes the in-flight marker of one load when dropped, including when
/// the loader panics.
struct InFlightGuard {
    inner: Arc<DictInner>,
    code: String,
    generation: u64,
}

/// Counts one caller among the waiters of a load while it is alive.
struct WaiterGuard {
    inner: Arc<DictInner>,
    code: String,
    generation: u64,
}

impl Drop for WaiterGuard {
    fn drop(&mut self) {
        if let Some(mut entry) = self.inner.in_flight.get_mut(&self.code) {
            if entry.generation == self.generation {
                entry.waiters = entry.waiters.saturating_sub(1);
            }
        }
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        let generation = self.generation;
        self.inner
            .in_flight
            .remove_if(&self.code, |_, entry| entry.generation == generation);
    }
}

/// Loads and caches dictionaries by code.
///
/// Cheap to clone; clones share configuration, cache, and in-flight table.
/// Loads are spawned on the current tokio runtime.
#[derive(Clone)]
pub struct DictProvider {
    inner: Arc<DictInner>,
}

impl DictProvider {
    /// Create a provider with the built-in defaults (cache on, 5 minutes).
    pub fn new() -> Self {
        Self::with_defaults(DictDefaults::default())
    }

    /// Create a provider with explicit defaults.
    pub fn with_defaults(defaults: DictDefaults) -> Self {
        Self {
            inner: Arc::new(DictInner {
                configs: DashMap::new(),
                cache: DashMap::new(),
                in_flight: DashMap::new(),
                defaults,
                generation: AtomicU64::new(0),
            }),
        }
    }

    /// Register configurations. A code registered again replaces its
    /// previous configuration; cached data is kept.
    pub fn register<I>(&self, configs: I)
    where
        I: IntoIterator<Item = DictConfig>,
    {
        for config in configs {
            debug!(code = %config.code, "Dictionary registered");
            self.inner.configs.insert(config.code.clone(), config);
        }
    }

    /// Load the items of `code`, from cache when fresh.
    ///
    /// An unknown code or a config without a loader yields an empty list
    /// and caches nothing. Loader failures reach every waiting caller.
    pub async fn load(&self, code: &str) -> AppResult<Vec<DictItem>> {
        let Some(config) = self.inner.configs.get(code).map(|c| c.clone()) else {
            warn!(code = %code, "Dictionary config not found");
            return Ok(Vec::new());
        };

        let cache_enabled = config.cache_enabled(&self.inner.defaults);
        if cache_enabled {
            let expiry = config.effective_expiry(&self.inner.defaults);
            if let Some(data) = self.fresh(code, expiry) {
                debug!(code = %code, "Dictionary served from cache");
                return Ok(data.as_ref().clone());
            }
        }

        let Some(loader) = config.loader.clone() else {
            warn!(code = %code, "Dictionary has no loader");
            return Ok(Vec::new());
        };

        let (load, generation) = self.join_or_start(code, loader, cache_enabled);
        let waiter = WaiterGuard {
            inner: self.inner.clone(),
            code: code.to_string(),
            generation,
        };
        let data = load.await;
        drop(waiter);
        let data = data?;
        Ok(data.as_ref().clone())
    }

    /// Drop one cached dictionary, or all of them. Loads in flight are not
    /// cancelled and still write their result when they settle.
    pub fn clear(&self, code: Option<&str>) {
        match code {
            Some(code) => {
                self.inner.cache.remove(code);
                debug!(code = %code, "Dictionary cache cleared");
            }
            None => {
                self.inner.cache.clear();
                debug!("All dictionary caches cleared");
            }
        }
    }

    /// Last cached items of `code`, fresh or not, without loading.
    pub fn get(&self, code: &str) -> Vec<DictItem> {
        self.inner
            .cache
            .get(code)
            .map(|entry| entry.data.as_ref().clone())
            .unwrap_or_default()
    }

    /// Seed the cache for `code` as if it had just been loaded.
    pub fn set(&self, code: &str, items: Vec<DictItem>) {
        self.inner.cache.insert(
            code.to_string(),
            CachedDict {
                data: Arc::new(items),
                timestamp: Instant::now(),
            },
        );
    }

    /// Label of the cached item whose value equals `value`, or the value
    /// itself rendered as text.
    pub fn get_label(&self, code: &str, value: &Value) -> String {
        self.get_item(code, value)
            .map(|item| item.label)
            .unwrap_or_else(|| stringify(value))
    }

    /// Cached item whose value equals `value`. Numbers compare by value.
    pub fn get_item(&self, code: &str, value: &Value) -> Option<DictItem> {
        let entry = self.inner.cache.get(code)?;
        entry
            .data
            .iter()
            .find(|item| values_equal(&item.value, value))
            .cloned()
    }

    /// Whether a load of `code` is outstanding.
    pub fn is_loading(&self, code: &str) -> bool {
        self.inner.in_flight.contains_key(code)
    }

    /// Number of callers still awaiting the outstanding load of `code`.
    pub fn waiters(&self, code: &str) -> usize {
        self.inner
            .in_flight
            .get(code)
            .map(|entry| entry.waiters)
            .unwrap_or(0)
    }

    fn fresh(&self, code: &str, expiry: std::time::Duration) -> Option<Arc<Vec<DictItem>>> {
        let entry = self.inner.cache.get(code)?;
        if entry.timestamp.elapsed() < expiry {
            Some(entry.data.clone())
        } else {
            None
        }
    }

    fn join_or_start(
        &self,
        code: &str,
        loader: Arc<dyn DictLoader>,
        cache_enabled: bool,
    ) -> (SharedLoad, u64) {
        match self.inner.in_flight.entry(code.to_string()) {
            Entry::Occupied(mut occupied) => {
                let entry = occupied.get_mut();
                entry.waiters += 1;
                debug!(code = %code, waiters = entry.waiters, "Joined in-flight dictionary load");
                (entry.future.clone(), entry.generation)
            }
            Entry::Vacant(vacant) => {
                let generation = self.inner.generation.fetch_add(1, Ordering::Relaxed);
                let future = self.spawn_load(code, loader, cache_enabled, generation);
                vacant.insert(InFlight {
                    generation,
                    waiters: 1,
                    future: future.clone(),
                });
                (future, generation)
            }
        }
    }

    fn spawn_load(
        &self,
        code: &str,
        loader: Arc<dyn DictLoader>,
        cache_enabled: bool,
        generation: u64,
    ) -> SharedLoad {
        let guard = InFlightGuard {
            inner: self.inner.clone(),
            code: code.to_string(),
            generation,
        };

        debug!(code = %code, generation, "Starting dictionary load");

        let handle = tokio::spawn(async move {
            let result = loader.load(&guard.code).await.map(Arc::new);
            match &result {
                Ok(data) => {
                    if cache_enabled {
                        guard.inner.cache.insert(
                            guard.code.clone(),
                            CachedDict {
                                data: data.clone(),
                                timestamp: Instant::now(),
                            },
                        );
                    }
                    debug!(code = %guard.code, items = data.len(), "Dictionary loaded");
                }
                Err(e) => {
                    warn!(code = %guard.code, error = %e, "Dictionary loader failed");
                }
            }
            drop(guard);
            result
        });

        async move {
            handle.await.unwrap_or_else(|e| {
                Err(AppError::dictionary(format!("Dictionary load task failed: {e}")))
            })
        }
        .boxed()
        .shared()
    }
}

impl Default for DictProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DictProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DictProvider")
            .field("configs", &self.inner.configs.len())
            .field("cached", &self.inner.cache.len())
            .field("in_flight", &self.inner.in_flight.len())
            .finish()
    }
}
