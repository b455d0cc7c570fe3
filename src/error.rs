//! Error types for vtcore.
//!
//! Per the core's error-handling design, only I/O and terminal-acquisition
//! failures surface through this type. Decoder errors (malformed UTF-8,
//! malformed escape sequences) and contract violations (negative sizes,
//! `pop_clip` below root) are recovered locally and never reach here.

use std::io;

/// Error type for vtcore operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error reading from or writing to the terminal.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Terminal acquisition or mode-switch failed (raw mode, alt screen,
    /// mouse reporting).
    #[error("terminal error: {0}")]
    Terminal(String),

    /// Layout calculation failed.
    #[error("layout error: {0}")]
    Layout(String),

    /// Rendering failed.
    #[error("render error: {0}")]
    Render(String),

    /// Widget-level error surfaced from a callback.
    #[error("widget error: {0}")]
    Widget(String),
}

/// Result type alias for vtcore operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = Error::Terminal("no tty".into());
        assert_eq!(err.to_string(), "terminal error: no tty");
    }

    #[test]
    fn io_error_converts() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "missing");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
