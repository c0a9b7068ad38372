use async_trait::async_trait;

use crate::domain::{CompletionRequest, DomainError};

/// An interface for sending role-tagged prompts to a text-completion provider.
///
/// Implementors encapsulate transport, serialization, and vendor-specific API
/// details. One call to [`CompletionClient::complete`] is at most one logical
/// provider request; failures are classified into
/// [`DomainError::RateLimited`], [`DomainError::PaymentRequired`],
/// [`DomainError::Configuration`] or [`DomainError::Provider`].
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Return the generated text for `request`.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, DomainError>;
}
