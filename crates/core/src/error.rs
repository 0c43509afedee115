//! Error types shared across the deck generation crates.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while extracting text or rendering a deck.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to read or write a file.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// Required API credential is missing.
    #[error("API key not configured: {0}")]
    MissingCredential(String),

    /// No usable input text was provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The uploaded file format is not supported or could not be detected.
    #[error("Unsupported or unrecognized file format: {0}")]
    UnsupportedFormat(String),

    /// Failed to extract text from an uploaded file.
    #[error("Text extraction error: {0}")]
    ExtractionError(String),

    /// Failed to assemble the output document.
    #[error("Deck rendering error: {0}")]
    RenderError(String),

    /// ZIP archive error (OOXML container).
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// XML parsing error (OOXML parts).
    #[error("XML parsing error: {0}")]
    XmlError(String),
}
