//! PPTX (Office Open XML) deck writer.
//!
//! Produces .pptx files, which are ZIP archives containing XML documents.

pub mod writer;

pub use writer::DeckWriter;
