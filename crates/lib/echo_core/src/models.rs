//! JSON contract of `POST /api/echo`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::persona::PersonaId;

/// Message returned when `query` or `persona` is missing or empty.
pub const MISSING_FIELDS_MESSAGE: &str = "Missing query or persona in request body.";
/// Message returned when `persona` is not in the persona table.
pub const INVALID_PERSONA_MESSAGE: &str = "Invalid persona selected.";

/// Why an incoming body was rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EchoRequestError {
    #[error("{}", MISSING_FIELDS_MESSAGE)]
    MissingFields,

    #[error("{}", INVALID_PERSONA_MESSAGE)]
    InvalidPersona,
}

/// Request body as it arrives on the wire, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EchoRequestBody {
    pub query: Option<String>,
    pub persona: Option<String>,
}

impl EchoRequestBody {
    /// Check presence first, then resolve the persona.
    pub fn validate(self) -> Result<EchoRequest, EchoRequestError> {
        let query = self.query.filter(|q| !q.is_empty());
        let persona = self.persona.filter(|p| !p.is_empty());
        let (Some(query), Some(persona)) = (query, persona) else {
            return Err(EchoRequestError::MissingFields);
        };
        let persona = persona
            .parse::<PersonaId>()
            .map_err(|_| EchoRequestError::InvalidPersona)?;
        Ok(EchoRequest { query, persona })
    }
}

/// A validated echo request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EchoRequest {
    pub query: String,
    pub persona: PersonaId,
}

/// Successful reply.
///
/// `response` defaults to empty when absent so a client can apply its own
/// fallback instead of failing to decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EchoResponse {
    #[serde(default)]
    pub response: String,
}

/// Error reply for 4xx/5xx statuses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(query: Option<&str>, persona: Option<&str>) -> EchoRequestBody {
        EchoRequestBody {
            query: query.map(String::from),
            persona: persona.map(String::from),
        }
    }

    #[test]
    fn valid_body_resolves_persona() {
        let req = body(Some("hi"), Some("sarcastic")).validate().expect("valid");
        assert_eq!(req.query, "hi");
        assert_eq!(req.persona, PersonaId::Sarcastic);
    }

    #[test]
    fn missing_or_empty_fields_are_rejected() {
        for b in [
            body(None, Some("optimistic")),
            body(Some(""), Some("optimistic")),
            body(Some("hi"), None),
            body(Some("hi"), Some("")),
            body(None, None),
        ] {
            assert_eq!(b.validate(), Err(EchoRequestError::MissingFields));
        }
    }

    #[test]
    fn unknown_persona_is_rejected() {
        let err = body(Some("hi"), Some("unknown")).validate().unwrap_err();
        assert_eq!(err, EchoRequestError::InvalidPersona);
        assert_eq!(err.to_string(), "Invalid persona selected.");
    }

    #[test]
    fn whitespace_query_is_present() {
        // Only empty strings are falsy; trimming is the client's job.
        assert!(body(Some("  "), Some("realistic")).validate().is_ok());
    }

    #[test]
    fn error_response_omits_absent_details() {
        let json = serde_json::to_value(ErrorResponse {
            error: "Invalid persona selected.".into(),
            details: None,
        })
        .expect("serialize");
        assert_eq!(json, serde_json::json!({ "error": "Invalid persona selected." }));
    }

    #[test]
    fn echo_response_tolerates_missing_field() {
        let parsed: EchoResponse = serde_json::from_str("{}").expect("parse");
        assert!(parsed.response.is_empty());
    }
}
