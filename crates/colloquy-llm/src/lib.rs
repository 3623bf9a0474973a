pub mod types;
pub mod traits;
pub mod error;
pub mod config;
pub mod openai;

pub use traits::{ChatClient, ChatRequest, ChatResponse, ChatOptions, TokenUsage};
pub use error::{LLMError, ErrorKind, Result};
pub use config::{ProviderConfig, OpenAIConfig, ClientFactory};
pub use openai::OpenAIClient;
pub use types::Message;
