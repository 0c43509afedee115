//! Domain types for representing generated slide content.

use serde::{Deserialize, Serialize};

/// One normalized content slide: a heading, bullet points, and an
/// optional visualization note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slide {
    /// Slide heading. Non-empty after normalization.
    pub heading: String,

    /// Bullet points in display order. Each entry is a non-empty
    /// trimmed string; may be empty as a whole.
    pub points: Vec<String>,

    /// Optional free-text visualization note. `None` means no suggestion.
    pub visual_suggestion: Option<String>,
}

impl Slide {
    /// Create a new slide with the given heading and no points.
    pub fn new(heading: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            points: Vec::new(),
            visual_suggestion: None,
        }
    }

    /// Create a slide with a heading and points.
    pub fn with_points(heading: impl Into<String>, points: Vec<String>) -> Self {
        Self {
            heading: heading.into(),
            points,
            visual_suggestion: None,
        }
    }

    /// Append a bullet point.
    pub fn add_point(&mut self, point: impl Into<String>) {
        self.points.push(point.into());
    }
}
