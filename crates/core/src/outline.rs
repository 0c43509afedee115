//! Outline normalization: turn raw LLM output into a valid, non-empty
//! slide sequence.
//!
//! The model is asked for a JSON array of slide objects but routinely
//! wraps it in prose or emits near-miss formatting, so three tiers are
//! tried in order:
//!
//! 1. decode the first embedded JSON array-of-objects span,
//! 2. heuristic line parsing (`#`/`Slide` headings, `-`/`*` bullets,
//!    `Visual:` notes),
//! 3. a fixed two-slide fallback.
//!
//! [`normalize_outline`] is total: it never fails and never returns an
//! empty sequence.

use crate::types::Slide;
use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;

/// First bracket-delimited array-of-objects span, dot matching newlines.
static JSON_SPAN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\[\s*\{.*\}\s*\]").unwrap());

/// Heading used when a slide arrives with an empty title.
const PLACEHOLDER_HEADING: &str = "Untitled";

/// One slide object as the model is asked to emit it.
#[derive(Debug, Deserialize)]
struct RawSlide {
    title: String,
    #[serde(default)]
    points: Vec<String>,
    #[serde(default)]
    visual_suggestion: Option<String>,
}

impl RawSlide {
    /// Apply the slide invariants: non-empty heading, trimmed non-empty
    /// points, empty visual note treated as absent.
    fn into_slide(self) -> Slide {
        let heading = non_empty_or_placeholder(&self.title);
        let points = self
            .points
            .iter()
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();
        let visual_suggestion = self
            .visual_suggestion
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string);

        Slide {
            heading,
            points,
            visual_suggestion,
        }
    }
}

fn non_empty_or_placeholder(heading: &str) -> String {
    let trimmed = heading.trim();
    if trimmed.is_empty() {
        PLACEHOLDER_HEADING.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Normalize raw model output into an ordered, non-empty slide sequence.
///
/// `title` is only used for the hard fallback. Every failure path
/// resolves to a fallback value; this function never errors.
pub fn normalize_outline(raw: &str, title: &str) -> Vec<Slide> {
    if let Some(slides) = structured_outline(raw) {
        log::debug!("outline: structured span decoded ({} slides)", slides.len());
        return slides;
    }

    let slides = heuristic_outline(raw);
    if !slides.is_empty() {
        log::debug!("outline: heuristic parse yielded {} slides", slides.len());
        return slides;
    }

    log::debug!("outline: no usable structure, using fallback deck");
    fallback_outline(title)
}

/// Tier 1: find the first array-of-objects span and decode it.
///
/// The decode is all-or-nothing: a single malformed element fails the
/// whole span and drops us to the heuristic parser.
fn structured_outline(raw: &str) -> Option<Vec<Slide>> {
    let span = JSON_SPAN_REGEX.find(raw)?.as_str();

    match serde_json::from_str::<Vec<RawSlide>>(span) {
        Ok(raw_slides) if !raw_slides.is_empty() => {
            Some(raw_slides.into_iter().map(RawSlide::into_slide).collect())
        }
        Ok(_) => None,
        Err(e) => {
            log::debug!("outline: structured span failed to decode: {}", e);
            None
        }
    }
}

/// Line parser state: either between slides or accumulating into one.
enum ParseState {
    NoOpenRecord,
    RecordOpen(Slide),
}

/// Tier 2: permissive line-oriented parse.
///
/// A `#` or `Slide` prefix opens a new record, `-`/`*` lines become
/// points of the open record, a `Visual:` line sets its note, and
/// everything else is ignored. May return an empty vec.
fn heuristic_outline(raw: &str) -> Vec<Slide> {
    let mut slides = Vec::new();
    let mut state = ParseState::NoOpenRecord;

    for line in raw.lines() {
        let line = line.trim();

        if line.starts_with('#') || line.starts_with("Slide") {
            if let ParseState::RecordOpen(slide) = state {
                slides.push(slide);
            }
            let heading = non_empty_or_placeholder(line.trim_start_matches('#'));
            state = ParseState::RecordOpen(Slide::new(heading));
        } else if line.starts_with('-') || line.starts_with('*') {
            if let ParseState::RecordOpen(ref mut slide) = state {
                let point = line.trim_start_matches(['-', '*']).trim();
                if !point.is_empty() {
                    slide.add_point(point);
                }
            }
        } else if let Some(rest) = line.strip_prefix("Visual:") {
            if let ParseState::RecordOpen(ref mut slide) = state {
                let note = rest.trim();
                if !note.is_empty() {
                    slide.visual_suggestion = Some(note.to_string());
                }
            }
        }
    }

    if let ParseState::RecordOpen(slide) = state {
        slides.push(slide);
    }

    slides
}

/// Tier 3: the fixed two-slide fallback deck.
///
/// Also returned when the upstream LLM call itself fails, so callers
/// cannot distinguish a transport failure from unparseable output.
pub fn fallback_outline(title: &str) -> Vec<Slide> {
    vec![
        Slide::with_points(title, vec!["Generated from text content".to_string()]),
        Slide::with_points(
            "Main Points",
            vec!["Please check the original text".to_string()],
        ),
    ]
}
