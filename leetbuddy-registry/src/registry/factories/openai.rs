use async_trait::async_trait;
use leetbuddy_core::error::Result;
use leetbuddy_core::traits::LlmPort;
use leetbuddy_core::utils::builder_helpers::{get_api_key_with_env, resolve_base_url};
use leetbuddy_provider_openai::providers::openai::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use leetbuddy_provider_openai::{OPENAI_PROVIDER_ID, OpenAiClient, OpenAiConfig};
use std::borrow::Cow;
use std::sync::Arc;

use crate::registry::entry::{BuildContext, ProviderFactory};

/// OpenAI provider factory
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenAiProviderFactory;

#[async_trait]
impl ProviderFactory for OpenAiProviderFactory {
    async fn language_model(&self, model_id: &str, ctx: &BuildContext) -> Result<Arc<dyn LlmPort>> {
        // Context override, then OPENAI_API_KEY.
        let api_key = get_api_key_with_env(ctx.api_key.clone(), OPENAI_PROVIDER_ID)?;
        let base_url = resolve_base_url(ctx.base_url.clone(), DEFAULT_BASE_URL);
        let model = if model_id.trim().is_empty() {
            DEFAULT_MODEL
        } else {
            model_id
        };

        let mut config = OpenAiConfig::with_secret(api_key)
            .with_base_url(base_url)
            .with_model(model)
            .with_http_config(ctx.http_config.clone().unwrap_or_default());
        if let Some(timeout) = ctx.timeout {
            config = config.with_default_timeout(timeout);
        }

        let client = match &ctx.http_client {
            Some(http_client) => OpenAiClient::new(config, http_client.clone()),
            None => OpenAiClient::new_with_config(config)?,
        };
        Ok(Arc::new(client))
    }

    fn provider_id(&self) -> Cow<'static, str> {
        Cow::Borrowed(OPENAI_PROVIDER_ID)
    }
}
