use thiserror::Error;

/// Errors produced while normalizing engine output or configuring a tracker.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Malformed geometry: expected {expected} values, got {got}")]
    MalformedGeometry { expected: usize, got: usize },

    #[error("Detection {text:?} has no car box")]
    MissingCarBox { text: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid engine result: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
