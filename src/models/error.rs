use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TidyError {
    #[error("Invalid scan configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to start storage client runtime: {0}")]
    Runtime(io::Error),

    #[error("Failed to list objects in bucket '{bucket}': {cause}")]
    ListObjects { bucket: String, cause: String },

    #[error("Failed to delete object '{key}': {cause}")]
    DeleteObject { key: String, cause: String },

    #[error("Failed to write scan output: {0}")]
    Output(#[from] io::Error),

    #[error("Failed to serialize scan summary: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TidyError>;
