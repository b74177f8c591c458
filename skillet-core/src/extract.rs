//! Extraction relay: fetch a webpage and pull a recipe out of it.

use crate::ai::prompts::extract::{render_extract_prompt, EXTRACT_SYSTEM_PROMPT};
use crate::ai::{AiClient, ChatMessage, ChatRequest};
use crate::error::RelayError;
use crate::fetch::SourceClient;
use crate::types::ExtractedRecipe;

/// Maximum number of characters of page content forwarded to the gateway.
///
/// A cost/latency bound: recipe content beyond this offset is invisible to
/// extraction.
pub const MAX_SOURCE_CHARS: usize = 50_000;

/// Sampling temperature for extraction. Low: we want fidelity, not flair.
const EXTRACT_TEMPERATURE: f32 = 0.3;

/// Extract a recipe from the page at `url`.
///
/// Stateless: one source fetch, then one gateway call, strictly sequential.
/// Nothing is persisted.
pub async fn extract_recipe(
    source: &dyn SourceClient,
    ai: &dyn AiClient,
    url: &str,
) -> Result<ExtractedRecipe, RelayError> {
    if url.is_empty() {
        return Err(RelayError::InvalidInput("URL is required"));
    }

    let html = source
        .fetch_text(url)
        .await
        .map_err(|e| RelayError::SourceFetch {
            url: url.to_string(),
            source: e,
        })?;

    let truncated = truncate_chars(&html, MAX_SOURCE_CHARS);

    let request = ChatRequest {
        messages: vec![
            ChatMessage::system(EXTRACT_SYSTEM_PROMPT),
            ChatMessage::user(render_extract_prompt(truncated)),
        ],
        temperature: Some(EXTRACT_TEMPERATURE),
        max_tokens: None,
        json_response: true,
    };

    let response = ai.complete(request).await?;

    tracing::debug!(url, "extraction reply received");

    ExtractedRecipe::from_model_json(&response.content, "", "")
        .map_err(|e| RelayError::MalformedResponse(e.to_string()))
}

/// Truncate to at most `max` characters, respecting char boundaries.
fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
