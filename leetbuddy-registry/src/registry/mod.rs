//! Provider registries.
//!
//! `entry` holds the provider-agnostic pieces (`ProviderFactory`,
//! `BuildContext`, `ProviderRegistry`). Built-in factories live in
//! `factories` behind the `builtins` feature, and this module owns the
//! process-wide handle.

pub mod entry;

#[cfg(feature = "builtins")]
pub mod factories;

use leetbuddy_core::error::{BuddyError, Result};
use std::sync::OnceLock;

use entry::{ProviderRegistry, ProviderRegistryBuilder};

static GLOBAL_REGISTRY: OnceLock<ProviderRegistry> = OnceLock::new();

/// A builder pre-loaded with every built-in factory enabled at compile time.
pub fn builtin_registry_builder() -> ProviderRegistryBuilder {
    let builder = ProviderRegistry::builder();
    #[cfg(feature = "openai")]
    let builder = builder.register(factories::OpenAiProviderFactory);
    builder
}

/// A registry with all built-in factories.
pub fn with_builtin_providers() -> ProviderRegistry {
    builtin_registry_builder().build()
}

/// Install the process-wide registry.
///
/// Write-once: fails with `ConfigurationError` if a registry was already
/// installed, or if [`global`] was read before installation.
pub fn install_global(registry: ProviderRegistry) -> Result<()> {
    GLOBAL_REGISTRY.set(registry).map_err(|_| {
        BuddyError::configuration("global provider registry is already installed")
    })?;
    tracing::debug!("global provider registry installed");
    Ok(())
}

/// The process-wide registry; built-in providers unless one was installed.
pub fn global() -> &'static ProviderRegistry {
    GLOBAL_REGISTRY.get_or_init(with_builtin_providers)
}
