pub mod models;
pub mod error;
pub mod trait_client;
pub mod dbs;

pub use models::{
    ChartKind, Complexity, DBMessage, MessageMetadata, MessageRole, MessageType, Sentiment,
    SummaryFields, ThreadSummary,
};
pub use error::{PersistError, Result};
pub use trait_client::PersistenceClient;
pub use dbs::memory::InMemoryPersistenceClient;
