//! Text extraction from uploaded documents.
//!
//! Supported inputs: plain text, Markdown, and the OOXML office formats
//! (.docx, .pptx). Format detection prefers magic bytes over the file
//! extension; ZIP payloads are disambiguated by their member names
//! since .docx and .pptx share the PK signature.

pub mod ooxml;

use deckgen_core::{Error, Result};

/// The detected format of an uploaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Plain text or Markdown.
    PlainText,
    /// Word document (Office Open XML).
    Docx,
    /// PowerPoint presentation (Office Open XML).
    Pptx,
}

impl SourceFormat {
    /// Detect format from a file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "txt" | "md" | "text" | "markdown" => Some(Self::PlainText),
            "docx" => Some(Self::Docx),
            "pptx" => Some(Self::Pptx),
            _ => None,
        }
    }

    /// Detect format from file content, falling back to the extension.
    ///
    /// A ZIP signature (PK\x03\x04) means an OOXML container; the
    /// member names decide whether it is a document or a presentation.
    /// A ZIP that is neither falls back to the extension like any other
    /// payload.
    pub fn detect(bytes: &[u8], filename: &str) -> Option<Self> {
        if bytes.starts_with(&[0x50, 0x4B, 0x03, 0x04]) {
            if let Some(format) = ooxml::classify_container(bytes) {
                return Some(format);
            }
        }

        let ext = filename.rsplit_once('.').map(|(_, ext)| ext)?;
        SourceFormat::from_extension(ext)
    }
}

/// Extract plain text from an uploaded file.
///
/// Fails with [`Error::UnsupportedFormat`] when the format cannot be
/// determined and with [`Error::ExtractionError`] when a recognized
/// file yields no text.
pub fn extract_text(bytes: &[u8], filename: &str) -> Result<String> {
    let format = SourceFormat::detect(bytes, filename)
        .ok_or_else(|| Error::UnsupportedFormat(filename.to_string()))?;

    log::debug!("extracting text from {} as {:?}", filename, format);

    let text = match format {
        SourceFormat::PlainText => String::from_utf8_lossy(bytes).into_owned(),
        SourceFormat::Docx => ooxml::docx_text(bytes)?,
        SourceFormat::Pptx => ooxml::pptx_text(bytes)?,
    };

    if text.trim().is_empty() {
        return Err(Error::ExtractionError(format!(
            "no text content found in {}",
            filename
        )));
    }

    Ok(text)
}
