//! leetbuddy-registry
//!
//! Provider registry, factories, and the process-wide handle.
#![deny(unsafe_code)]

pub mod registry;

pub use registry::entry::{
    BuildContext, FnFactory, ProviderFactory, ProviderRegistry, ProviderRegistryBuilder,
};
pub use registry::{builtin_registry_builder, global, install_global, with_builtin_providers};

#[cfg(feature = "openai")]
pub use registry::factories::OpenAiProviderFactory;
