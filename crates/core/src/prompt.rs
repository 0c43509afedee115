//! Prompt construction for the outline request.

use crate::style::DeckStyle;

/// System instruction sent with every outline request.
pub const SYSTEM_INSTRUCTION: &str = "You are a presentation expert that converts text to \
     well-structured PowerPoint slides. Respond only with the requested JSON format.";

/// Maximum number of input characters included in the prompt, to stay
/// clear of model token limits.
pub const MAX_INPUT_CHARS: usize = 6000;

/// Default chat model. Overridable via `DECKGEN_MODEL` or CLI flags.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Default completion token budget.
pub const DEFAULT_MAX_TOKENS: u32 = 2000;

/// Build the user prompt asking the model for a structured outline.
pub fn build_outline_prompt(text: &str, title: &str, style: DeckStyle) -> String {
    let text = truncate_chars(text, MAX_INPUT_CHARS);

    format!(
        "I need to convert the following text into a well-structured PowerPoint presentation.\n\
         The presentation title is: \"{title}\"\n\
         Style/Tone: {style}\n\
         \n\
         Please analyze the text below and create a structured presentation outline with:\n\
         1. A title slide\n\
         2. An introduction/overview slide\n\
         3. Several content slides with main points and supporting details\n\
         4. A conclusion/summary slide\n\
         \n\
         For each slide, provide:\n\
         - A clear, concise heading (maximum 7 words)\n\
         - Bullet points for key content (2-5 points per slide, each point should be brief)\n\
         - Any visualization suggestions (charts, graphs, images)\n\
         \n\
         Text to convert:\n\
         {text}\n\
         \n\
         Format your response as a JSON array of slide objects with 'title', 'points' (array), \
         and 'visual_suggestion' properties.",
        title = title,
        style = style.name(),
        text = text,
    )
}

/// Truncate to at most `max` characters without splitting a char.
fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
