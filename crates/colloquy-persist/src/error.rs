use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistError {
    /// Backend unreachable or the operation failed
    #[error("Storage error: {0}")]
    Storage(String),
}

pub type Result<T> = std::result::Result<T, PersistError>;
