//! Deck style palettes.
//!
//! A style selects a cosmetic color palette only; it has no effect on
//! outline normalization.

use std::str::FromStr;

/// An RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Uppercase hex form without a leading `#`, as used in DrawingML
    /// `srgbClr` values.
    pub fn to_hex(self) -> String {
        format!("{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

/// Color palette applied by the deck renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Rgb,
    pub title: Rgb,
    pub body: Rgb,
    pub accent: Rgb,
}

/// The fixed set of deck styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeckStyle {
    #[default]
    Professional,
    Creative,
    Minimal,
}

impl DeckStyle {
    /// Parse a style name, falling back to `Professional` for anything
    /// unrecognized. Case-insensitive.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "creative" => Self::Creative,
            "minimal" => Self::Minimal,
            _ => Self::Professional,
        }
    }

    /// Canonical lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Professional => "professional",
            Self::Creative => "creative",
            Self::Minimal => "minimal",
        }
    }

    /// The color palette for this style.
    pub fn palette(self) -> Palette {
        match self {
            Self::Professional => Palette {
                background: Rgb(255, 255, 255),
                title: Rgb(31, 73, 125),
                body: Rgb(0, 0, 0),
                accent: Rgb(79, 129, 189),
            },
            Self::Creative => Palette {
                background: Rgb(240, 240, 240),
                title: Rgb(192, 0, 0),
                body: Rgb(64, 64, 64),
                accent: Rgb(255, 192, 0),
            },
            Self::Minimal => Palette {
                background: Rgb(255, 255, 255),
                title: Rgb(0, 0, 0),
                body: Rgb(64, 64, 64),
                accent: Rgb(192, 192, 192),
            },
        }
    }
}

impl FromStr for DeckStyle {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}
