use thiserror::Error;

/// Errors raised by the collaborators around the normalizer.
///
/// The normalizer itself is total and never produces one of these; they
/// only surface from payload decoding, readers, config loading and the CLI.
#[derive(Debug, Error)]
pub enum MrzError {
    #[error("Payload decode error: {0}")]
    PayloadDecode(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("MRZ reader error: {0}")]
    Reader(String),
    #[error("Config error: {0}")]
    Config(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
