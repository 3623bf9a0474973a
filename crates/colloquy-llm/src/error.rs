use thiserror::Error;

#[derive(Error, Debug)]
pub enum LLMError {
    #[error("Missing or invalid credentials: {0}")]
    MissingCredentials(String),

    #[error("Rate limited by provider: {0}")]
    RateLimited(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Provider API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Coarse failure class, used for logging and fallback bookkeeping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    RateLimit,
    Transport,
    Protocol,
}

impl LLMError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingCredentials(_) => ErrorKind::Configuration,
            Self::RateLimited(_) => ErrorKind::RateLimit,
            Self::Transport(_) => ErrorKind::Transport,
            Self::Api { status, .. } if *status >= 500 => ErrorKind::Transport,
            Self::Api { .. } | Self::InvalidResponse(_) => ErrorKind::Protocol,
        }
    }
}

pub type Result<T> = std::result::Result<T, LLMError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(LLMError::MissingCredentials("k".into()).kind(), ErrorKind::Configuration);
        assert_eq!(LLMError::RateLimited("slow down".into()).kind(), ErrorKind::RateLimit);
        assert_eq!(
            LLMError::Api { status: 503, body: String::new() }.kind(),
            ErrorKind::Transport
        );
        assert_eq!(
            LLMError::Api { status: 400, body: String::new() }.kind(),
            ErrorKind::Protocol
        );
    }
}
