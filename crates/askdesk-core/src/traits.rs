//! Seams the engine is generic over.

use async_trait::async_trait;

use crate::error::Result;

/// External generative-answer service. Opaque to the engine: it takes the raw
/// user query plus a context slice and returns reply text, or fails. The
/// engine never lets a provider failure escape — it degrades to the apology.
#[async_trait]
pub trait AnswerProvider: Send + Sync {
    /// Provider name, for logs.
    fn name(&self) -> &str;

    /// Generate a reply for `query`, grounded in `context`.
    async fn generate(&self, query: &str, context: &str) -> Result<String>;
}
