//! Error taxonomy shared by every windowing component.

use thiserror::Error;

/// Result type for windowing operations
pub type WindowResult<T> = Result<T, WindowError>;

/// Errors that can occur while reading, windowing or encoding records
#[derive(Debug, Error)]
pub enum WindowError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    #[error("Unknown symbol '{symbol}' at position {position}")]
    UnknownSymbol { symbol: char, position: usize },

    #[error("Invalid offset {offset} for a record of length {len}")]
    InvalidOffset { offset: usize, len: usize },

    #[error("Window [{start}, {start}+{window}) exceeds record of length {len}")]
    OutOfRange { start: usize, window: usize, len: usize },

    #[error("Index mismatch: {0}")]
    IndexMismatch(String),

    #[error("Ordinal {ordinal} out of range for index of length {len}")]
    IndexOutOfRange { ordinal: usize, len: usize },

    #[error("Invalid parameters: {0}")]
    InvalidParams(String),
}

impl From<needletail::errors::ParseError> for WindowError {
    fn from(err: needletail::errors::ParseError) -> Self {
        WindowError::MalformedRecord(err.to_string())
    }
}

impl WindowError {
    pub(crate) fn mismatch<S: Into<String>>(message: S) -> Self {
        WindowError::IndexMismatch(message.into())
    }

    pub(crate) fn malformed<S: Into<String>>(message: S) -> Self {
        WindowError::MalformedRecord(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = WindowError::UnknownSymbol { symbol: 'N', position: 7 };
        assert_eq!(err.to_string(), "Unknown symbol 'N' at position 7");

        let err = WindowError::IndexOutOfRange { ordinal: 15, len: 15 };
        assert_eq!(err.to_string(), "Ordinal 15 out of range for index of length 15");
    }
}
