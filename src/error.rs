use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid meeting record: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid meeting record: {0}")]
    InvalidRecord(String),

    /// Layout or serialization failure. The render is aborted and no bytes
    /// are handed out.
    #[error("render error: {0}")]
    Render(String),
}
