//! Problem-details gateway port.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{ProblemDetails, ProblemSlug};

/// Supplies problem metadata by slug.
///
/// Implementations fail with `ProblemNotFound` when the slug is unknown and
/// with `GatewayUnavailable` for transport, status or decoding failures. Both
/// carry the endpoint and slug in context, plus status code and response body
/// when available.
#[async_trait]
pub trait ProblemDetailsGateway: Send + Sync {
    async fn fetch(&self, slug: &ProblemSlug) -> Result<ProblemDetails>;
}

#[async_trait]
impl<T: ProblemDetailsGateway + ?Sized> ProblemDetailsGateway for std::sync::Arc<T> {
    async fn fetch(&self, slug: &ProblemSlug) -> Result<ProblemDetails> {
        (**self).fetch(slug).await
    }
}
