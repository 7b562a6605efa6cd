//! Per-code dictionary configuration and loaders.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::FutureExt;
use futures::future::BoxFuture;

use vectra_core::config::dict::DictDefaults;
use vectra_core::result::AppResult;

use crate::item::DictItem;

/// Fetches the items of one dictionary.
#[async_trait]
pub trait DictLoader: Send + Sync + 'static {
    /// Load the items for `code`.
    async fn load(&self, code: &str) -> AppResult<Vec<DictItem>>;
}

/// Closure-backed loader.
pub struct FnLoader {
    f: Arc<dyn Fn(String) -> BoxFuture<'static, AppResult<Vec<DictItem>>> + Send + Sync>,
}

impl FnLoader {
    /// Wrap an async closure receiving the dictionary code.
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = AppResult<Vec<DictItem>>> + Send + 'static,
    {
        Self {
            f: Arc::new(move |code| f(code).boxed()),
        }
    }
}

#[async_trait]
impl DictLoader for FnLoader {
    async fn load(&self, code: &str) -> AppResult<Vec<DictItem>> {
        (self.f)(code.to_string()).await
    }
}

/// Loader returning a fixed list.
#[derive(Debug, Clone)]
pub struct StaticLoader(pub Vec<DictItem>);

#[async_trait]
impl DictLoader for StaticLoader {
    async fn load(&self, _code: &str) -> AppResult<Vec<DictItem>> {
        Ok(self.0.clone())
    }
}

/// Configuration of one dictionary code.
///
/// `cache` and `expiry` left unset fall back to the provider's
/// [`DictDefaults`] (caching on, 300 000 ms).
#[derive(Clone)]
pub struct DictConfig {
    /// Dictionary code.
    pub code: String,
    /// Loader; a config without one always yields an empty list.
    pub loader: Option<Arc<dyn DictLoader>>,
    /// Whether loaded items are cached.
    pub cache: Option<bool>,
    /// How long a cache entry stays fresh.
    pub expiry: Option<Duration>,
}

impl DictConfig {
    /// Config with no loader and default caching.
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            loader: None,
            cache: None,
            expiry: None,
        }
    }

    /// Set the loader.
    pub fn with_loader(mut self, loader: impl DictLoader) -> Self {
        self.loader = Some(Arc::new(loader));
        self
    }

    /// Set an async closure as the loader.
    pub fn with_fn<F, Fut>(self, f: F) -> Self
    where
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = AppResult<Vec<DictItem>>> + Send + 'static,
    {
        self.with_loader(FnLoader::new(f))
    }

    /// Use a fixed item list as the loader.
    pub fn with_items(self, items: Vec<DictItem>) -> Self {
        self.with_loader(StaticLoader(items))
    }

    /// Turn caching on or off.
    pub fn with_cache(mut self, cache: bool) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Set the cache lifetime.
    pub fn with_expiry(mut self, expiry: Duration) -> Self {
        self.expiry = Some(expiry);
        self
    }

    /// Effective cache flag.
    pub fn cache_enabled(&self, defaults: &DictDefaults) -> bool {
        self.cache.unwrap_or(defaults.cache)
    }

    /// Effective cache lifetime.
    pub fn effective_expiry(&self, defaults: &DictDefaults) -> Duration {
        self.expiry.unwrap_or_else(|| defaults.expiry())
    }
}

impl std::fmt::Debug for DictConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DictConfig")
            .field("code", &self.code)
            .field("loader", &self.loader.as_ref().map(|_| "<loader>"))
            .field("cache", &self.cache)
            .field("expiry", &self.expiry)
            .finish()
    }
}
