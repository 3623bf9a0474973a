use colloquy_persist::PersistError;
use thiserror::Error;

/// Failures surfaced to the orchestrator
///
/// Engine trouble never shows up here: the summarizer absorbs it.
#[derive(Error, Debug)]
pub enum ContextError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistError),

    #[error("Storage rejected write of {what} for {key}")]
    WriteRejected { what: &'static str, key: String },

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Tokenizer error: {0}")]
    Tokenizer(String),
}

pub type Result<T> = std::result::Result<T, ContextError>;

pub(crate) fn validate_thread_id(thread_id: &str) -> Result<&str> {
    if thread_id.trim().is_empty() {
        return Err(ContextError::InvalidInput("thread_id must not be empty".to_string()));
    }
    Ok(thread_id)
}
