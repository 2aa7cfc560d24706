use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReviewError {
    #[error("Invalid bundle JSON: {0}")]
    InvalidBundle(String),

    #[error("Invalid analysis CSV: {0}")]
    InvalidAnalysisCsv(String),

    #[error("Registry list contains no registration numbers")]
    EmptyRegistry,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

pub type Result<T> = std::result::Result<T, ReviewError>;
