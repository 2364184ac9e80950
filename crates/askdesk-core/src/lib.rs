//! # AskDesk Core
//!
//! Shared foundation for the AskDesk support-chat engine: the dataset model,
//! answer types, configuration, error taxonomy, and the provider trait the
//! generative fallback is implemented behind.

pub mod config;
pub mod error;
pub mod traits;
pub mod types;

pub use config::AskDeskConfig;
pub use error::{AskDeskError, Result};
pub use traits::AnswerProvider;
pub use types::{Answer, AnswerKind, ChatHistory, Dataset};
