//! Core domain types, outline normalization, and prompt building
//! for text-to-deck generation.

pub mod error;
pub mod outline;
pub mod prompt;
pub mod style;
pub mod types;

pub use error::{Error, Result};
pub use outline::{fallback_outline, normalize_outline};
pub use style::{DeckStyle, Palette};
pub use types::Slide;
