//! Outline request pipeline: prompt the provider, normalize the reply,
//! and absorb provider failures into the fallback deck.

use crate::client::{CompletionRequest, OutlineProvider};
use deckgen_core::prompt::{
    build_outline_prompt, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE,
    SYSTEM_INSTRUCTION,
};
use deckgen_core::{fallback_outline, normalize_outline, DeckStyle, Slide};

/// Model parameters for an outline request.
#[derive(Debug, Clone)]
pub struct OutlineParams {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for OutlineParams {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

impl OutlineParams {
    /// Defaults with the model name taken from `DECKGEN_MODEL` when set.
    pub fn from_env() -> Self {
        let mut params = Self::default();
        if let Ok(model) = std::env::var("DECKGEN_MODEL") {
            if !model.trim().is_empty() {
                params.model = model;
            }
        }
        params
    }
}

/// Ask the provider for an outline of `text` and normalize the reply.
///
/// Never fails: provider errors of any kind are logged and produce the
/// same two-slide fallback deck as unparseable output, so the caller
/// cannot distinguish the two.
pub async fn request_outline(
    provider: &dyn OutlineProvider,
    text: &str,
    title: &str,
    style: DeckStyle,
    params: &OutlineParams,
) -> Vec<Slide> {
    let request = CompletionRequest {
        model: params.model.clone(),
        system: SYSTEM_INSTRUCTION.to_string(),
        prompt: build_outline_prompt(text, title, style),
        temperature: params.temperature,
        max_tokens: params.max_tokens,
    };

    match provider.complete(&request).await {
        Ok(raw) => normalize_outline(&raw, title),
        Err(e) => {
            log::warn!("outline request failed, using fallback deck: {}", e);
            fallback_outline(title)
        }
    }
}
