//! Error types for the textpress library.
//!
//! Only the I/O boundary (extraction, external generators, JSON output) is
//! fallible. Classification, section rendering and cleanup always produce
//! some HTML string.

use std::io;
use thiserror::Error;

/// Result type alias for textpress operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur around a conversion.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input cannot be turned into text by any registered extractor.
    #[error("Unsupported input: {0}")]
    UnsupportedInput(String),

    /// The input bytes are not valid text.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// The external HTML generator failed.
    #[error("HTML generator error: {0}")]
    Generator(String),

    /// Error while serializing a conversion result.
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<std::string::FromUtf8Error> for Error {
    fn from(err: std::string::FromUtf8Error) -> Self {
        Error::Encoding(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnsupportedInput("docx".to_string());
        assert_eq!(err.to_string(), "Unsupported input: docx");

        let err = Error::Generator("timeout".to_string());
        assert_eq!(err.to_string(), "HTML generator error: timeout");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_utf8_error_conversion() {
        let bad = String::from_utf8(vec![0xff, 0xfe, 0x41]).unwrap_err();
        let err: Error = bad.into();
        assert!(matches!(err, Error::Encoding(_)));
    }
}
