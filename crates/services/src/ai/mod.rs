mod chat;

use async_trait::async_trait;

use crate::error::AiError;

pub use chat::ChatClient;

/// A text-generation backend that answers one system + user prompt pair.
#[async_trait]
pub trait CompletionModel: Send + Sync {
    /// Send a single completion request.
    ///
    /// # Errors
    ///
    /// Returns `AiError` when the request fails or the response is empty.
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, AiError>;
}
