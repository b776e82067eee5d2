//! Error handling for code training and emission.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The corpus contained no characters from the allowed alphabet, so
    /// there is nothing to build a code over.
    #[error("no symbols to encode")]
    NoSymbols,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
