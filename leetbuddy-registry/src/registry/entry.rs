//! Provider factories and the write-once provider registry.
//!
//! A registry is assembled once through [`ProviderRegistryBuilder`] and is
//! immutable afterwards; resolution only reads the factory map, so a built
//! registry can be shared freely across tasks.

use async_trait::async_trait;
use leetbuddy_core::error::{BuddyError, Result, keys};
use leetbuddy_core::execution::http::HttpConfig;
use leetbuddy_core::traits::LlmPort;
use secrecy::SecretString;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

/// Builds LLM ports for one provider id.
#[async_trait]
pub trait ProviderFactory: Send + Sync {
    /// Create a port bound to `model_id`.
    async fn language_model(&self, model_id: &str, ctx: &BuildContext) -> Result<Arc<dyn LlmPort>>;

    /// Provider id this factory is registered under.
    fn provider_id(&self) -> Cow<'static, str>;
}

/// Build-time context for [`ProviderFactory`] port construction.
///
/// Every field is an override; factories fall back to environment variables
/// or provider defaults when a field is `None`.
#[derive(Default, Clone)]
pub struct BuildContext {
    /// API key override.
    pub api_key: Option<SecretString>,
    /// Base URL override.
    pub base_url: Option<String>,
    /// HTTP configuration used when no client is supplied.
    pub http_config: Option<HttpConfig>,
    /// Pre-built HTTP client; preferred over `http_config`.
    pub http_client: Option<reqwest::Client>,
    /// Default timeout budget for calls that set none.
    pub timeout: Option<Duration>,
}

impl BuildContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_api_key(mut self, api_key: SecretString) -> Self {
        self.api_key = Some(api_key);
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_http_config(mut self, http_config: HttpConfig) -> Self {
        self.http_config = Some(http_config);
        self
    }

    pub fn with_http_client(mut self, http_client: reqwest::Client) -> Self {
        self.http_client = Some(http_client);
        self
    }

    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl std::fmt::Debug for BuildContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuildContext")
            .field("has_api_key", &self.api_key.is_some())
            .field("base_url", &self.base_url)
            .field("http_config", &self.http_config)
            .field("has_http_client", &self.http_client.is_some())
            .field("timeout", &self.timeout)
            .finish()
    }
}

type BuildFn = dyn Fn(&str, &BuildContext) -> Result<Arc<dyn LlmPort>> + Send + Sync;

/// Factory backed by a plain closure, for custom or test providers.
pub struct FnFactory {
    id: Cow<'static, str>,
    build: Box<BuildFn>,
}

impl FnFactory {
    pub fn new<F>(id: impl Into<Cow<'static, str>>, build: F) -> Self
    where
        F: Fn(&str, &BuildContext) -> Result<Arc<dyn LlmPort>> + Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            build: Box::new(build),
        }
    }
}

#[async_trait]
impl ProviderFactory for FnFactory {
    async fn language_model(&self, model_id: &str, ctx: &BuildContext) -> Result<Arc<dyn LlmPort>> {
        (self.build)(model_id, ctx)
    }

    fn provider_id(&self) -> Cow<'static, str> {
        self.id.clone()
    }
}

impl std::fmt::Debug for FnFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnFactory").field("id", &self.id).finish_non_exhaustive()
    }
}

/// Collects factories before the registry is frozen.
#[derive(Default)]
pub struct ProviderRegistryBuilder {
    factories: BTreeMap<String, Arc<dyn ProviderFactory>>,
}

impl ProviderRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `factory` under its own provider id. A later registration
    /// for the same id replaces the earlier one.
    pub fn register(self, factory: impl ProviderFactory + 'static) -> Self {
        self.register_arc(Arc::new(factory))
    }

    pub fn register_arc(mut self, factory: Arc<dyn ProviderFactory>) -> Self {
        let id = factory.provider_id().into_owned();
        if self.factories.insert(id.clone(), factory).is_some() {
            tracing::warn!(
                provider_id = %id,
                "provider registered twice; keeping the last factory"
            );
        }
        self
    }

    /// Register a closure as the factory for `id`.
    pub fn register_fn<F>(self, id: impl Into<Cow<'static, str>>, build: F) -> Self
    where
        F: Fn(&str, &BuildContext) -> Result<Arc<dyn LlmPort>> + Send + Sync + 'static,
    {
        self.register(FnFactory::new(id, build))
    }

    pub fn build(self) -> ProviderRegistry {
        ProviderRegistry {
            factories: Arc::new(self.factories),
        }
    }
}

/// Immutable map from provider id to factory.
///
/// Cloning is cheap; clones share the same factories.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    factories: Arc<BTreeMap<String, Arc<dyn ProviderFactory>>>,
}

impl ProviderRegistry {
    pub fn builder() -> ProviderRegistryBuilder {
        ProviderRegistryBuilder::new()
    }

    /// Build a port for `model` from the factory registered as `provider_id`.
    ///
    /// Fails with `UnknownProvider` (listing the known ids) when nothing is
    /// registered under `provider_id`; factory failures pass through.
    pub async fn resolve(
        &self,
        provider_id: &str,
        model: &str,
        ctx: &BuildContext,
    ) -> Result<Arc<dyn LlmPort>> {
        let Some(factory) = self.factories.get(provider_id) else {
            let known: Vec<String> = self.factories.keys().cloned().collect();
            tracing::warn!(provider_id, ?known, "unknown provider requested");
            return Err(BuddyError::unknown_provider(provider_id)
                .with_context(keys::KNOWN_PROVIDERS, known));
        };

        tracing::debug!(provider_id, model, "resolving language model");
        factory.language_model(model, ctx).await
    }

    pub fn contains(&self, provider_id: &str) -> bool {
        self.factories.contains_key(provider_id)
    }

    /// Registered provider ids in sorted order.
    pub fn provider_ids(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.provider_ids())
            .finish()
    }
}
