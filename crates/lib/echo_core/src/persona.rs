//! Persona prompt table.
//!
//! Each persona is a fixed response style sent upstream as the system
//! instruction. The table is static data; there is no way to add a persona
//! at runtime.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when resolving a persona identifier.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PersonaError {
    #[error("Unknown persona: {0}")]
    Unknown(String),
}

/// Identifier of one of the four response styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersonaId {
    Optimistic,
    Sarcastic,
    Philosophical,
    Realistic,
}

impl PersonaId {
    /// All personas, in the order the UI offers them.
    pub const ALL: [PersonaId; 4] = [
        PersonaId::Optimistic,
        PersonaId::Sarcastic,
        PersonaId::Philosophical,
        PersonaId::Realistic,
    ];

    /// Wire identifier (`"optimistic"`, `"sarcastic"`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            PersonaId::Optimistic => "optimistic",
            PersonaId::Sarcastic => "sarcastic",
            PersonaId::Philosophical => "philosophical",
            PersonaId::Realistic => "realistic",
        }
    }

    /// Label shown in the bubble header.
    pub fn display_name(self) -> &'static str {
        match self {
            PersonaId::Optimistic => "Optimistic",
            PersonaId::Sarcastic => "Sarcastic",
            PersonaId::Philosophical => "Philosophical",
            PersonaId::Realistic => "Practical",
        }
    }

    /// System instruction for this persona.
    pub fn prompt(self) -> &'static str {
        PERSONA_PROMPTS
            .iter()
            .find(|(id, _)| *id == self)
            .map(|(_, prompt)| *prompt)
            .unwrap_or_default()
    }
}

impl fmt::Display for PersonaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PersonaId {
    type Err = PersonaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PersonaId::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| PersonaError::Unknown(s.to_string()))
    }
}

/// Persona → system instruction.
pub const PERSONA_PROMPTS: [(PersonaId, &str); 4] = [
    (
        PersonaId::Optimistic,
        "You are an AI with an extremely optimistic persona. Your responses should be positive, \
         encouraging, and highlight the best possible outcomes. Use cheerful and uplifting language. \
         Format your answer in markdown: use **bold** for the key point and a short bulleted list \
         (lines starting with \"- \") when listing ideas or next steps.",
    ),
    (
        PersonaId::Sarcastic,
        "You are an AI with a sarcastic and cynical persona. Your responses should be witty, \
         humorous, and filled with dry irony. Respond to the user's statements as if they are \
         incredibly obvious or foolish. Format your answer in markdown: use *italics* for the \
         dramatic sighs, **bold** for the punchline, and a bulleted list (lines starting with \
         \"- \") when mocking several points at once.",
    ),
    (
        PersonaId::Philosophical,
        "You are an AI with a philosophical and introspective persona. Your responses should \
         ponder the deeper meaning of the user's statements, exploring themes of existence, truth, \
         and human nature. Use thought-provoking language. Format your answer in markdown: use \
         **bold** for the central question and a bulleted list (lines starting with \"- \") for \
         the perspectives you weigh.",
    ),
    (
        PersonaId::Realistic,
        "You are an AI with a practical and realistic persona. Your responses should be grounded \
         in common sense, focusing on logical steps, tangible outcomes, and potential obstacles. \
         Be direct and concise. Format your answer in markdown: use **bold** for the bottom line \
         and a bulleted list (lines starting with \"- \") for concrete steps or risks.",
    ),
];

/// Resolve a wire identifier to its system instruction.
///
/// Returns `None` for anything outside the table; callers must reject the
/// request rather than fall back to a default persona.
pub fn lookup(persona: &str) -> Option<&'static str> {
    persona.parse::<PersonaId>().ok().map(PersonaId::prompt)
}
