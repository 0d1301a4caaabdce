use thiserror::Error;

/// Canonical result for the archiving pipeline.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Malformed manifest: {0}")]
    Format(String),

    // Surfaced to the caller, never retried; the pipeline assumes a stable
    // filesystem during a single run.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
