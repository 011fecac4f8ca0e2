//! Wire format of the upstream `generateContent` API.
//!
//! The request carries the user query as content and the persona prompt as a
//! separate `systemInstruction`; the two are never concatenated. The response
//! envelope is navigated defensively: any missing hop yields the fallback
//! text instead of an error.

use serde::Serialize;
use serde_json::Value;

/// Text returned when the envelope carries no generated text.
pub const NO_RESPONSE_FALLBACK: &str = "No response generated.";

/// Sampling temperature sent with every request.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
/// Nucleus sampling cutoff sent with every request.
pub const DEFAULT_TOP_P: f32 = 0.95;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub system_instruction: Content,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Part {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub top_p: f32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            top_p: DEFAULT_TOP_P,
        }
    }
}

impl Content {
    fn text(text: &str) -> Self {
        Self {
            parts: vec![Part {
                text: text.to_string(),
            }],
        }
    }
}

impl GenerateContentRequest {
    /// Build a single-turn request: `query` as content, `system_prompt` as
    /// the system instruction.
    pub fn new(query: &str, system_prompt: &str) -> Self {
        Self {
            contents: vec![Content::text(query)],
            system_instruction: Content::text(system_prompt),
            generation_config: Some(GenerationConfig::default()),
        }
    }
}

/// `candidates[0].content.parts[0].text`, if present and non-empty.
pub fn extract_text(envelope: &Value) -> Option<&str> {
    envelope
        .get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .get(0)?
        .get("text")?
        .as_str()
        .filter(|text| !text.is_empty())
}

/// Generated text, or [`NO_RESPONSE_FALLBACK`] when there is none.
pub fn generated_text(envelope: &Value) -> &str {
    extract_text(envelope).unwrap_or(NO_RESPONSE_FALLBACK)
}
