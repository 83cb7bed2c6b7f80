use thiserror::Error;

#[derive(Error, Debug)]
pub enum WanderlustError {
    #[error("Failed to read/write storage file: {0}")]
    StorageIOError(std::io::Error),
    #[error("Failed to serialize/deserialize stored value: {0}")]
    StorageSerializationError(serde_json::Error),
    #[error("File not found: {0}")]
    FileNotFound(String),
    #[error("File read error: {0}")]
    FileReadError(std::io::Error),
    #[error("Trip not found: {0}")]
    TripNotFound(String),
}
