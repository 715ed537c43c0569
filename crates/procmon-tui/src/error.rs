//! TUI error types.

use thiserror::Error;

/// Errors raised while driving the terminal.
#[derive(Debug, Error)]
pub enum TuiError {
    /// Terminal setup, polling, or drawing failed.
    #[error("terminal I/O failed: {source}")]
    Terminal {
        /// Underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}

/// Convenience alias for TUI operations.
pub type Result<T> = std::result::Result<T, TuiError>;
