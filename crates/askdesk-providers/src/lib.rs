//! # AskDesk Providers
//!
//! The external generative-answer service behind the engine's last resolution
//! strategy. One OpenAI-compatible HTTP implementation covers every hosted
//! backend; the engine only sees the `AnswerProvider` trait and treats the
//! service as opaque and unreliable.

pub mod generative;

use askdesk_core::config::AskDeskConfig;
use askdesk_core::error::Result;
use askdesk_core::traits::AnswerProvider;

/// Create the configured provider, or `None` when the fallback is disabled —
/// the engine then answers no-match queries with the fixed apology instead.
pub fn create_provider(config: &AskDeskConfig) -> Result<Option<Box<dyn AnswerProvider>>> {
    if !config.llm.enabled {
        tracing::debug!("generative fallback disabled by config");
        return Ok(None);
    }
    let provider = generative::GenerativeProvider::from_config(config)?;
    Ok(Some(Box::new(provider)))
}
