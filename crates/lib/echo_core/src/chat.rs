//! Chat controller state machine.
//!
//! Holds the per-submission UI state as an explicit value and turns user
//! events into a list of [`Effect`]s for a display layer to apply. Nothing
//! here touches a DOM, so every transition can be tested directly.
//!
//! ```text
//! Idle ──submit──▶ AwaitingPersonaChoice ──choose──▶ Pending ──complete──▶ Idle
//! ```

use crate::markdown;
use crate::models::{EchoRequest, EchoResponse};
use crate::persona::PersonaId;

/// Default location of the proxy endpoint.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:3000/api/echo";

/// Shown when a persona is picked with nothing to send.
pub const NO_QUERY_MESSAGE: &str = "Please type a message first!";

/// Shown when the proxy answers 2xx without a usable `response` field.
pub const MISSING_RESPONSE_MESSAGE: &str =
    "Error: Backend did not return a valid 'response' field.";

/// Identifies one issued request within a session.
///
/// Ids increase monotonically, so a reply can always be matched to the
/// submission that caused it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(pub u64);

/// Who a bubble belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Persona(PersonaId),
    Error,
}

impl Role {
    /// CSS class of the bubble.
    pub fn class_name(self) -> &'static str {
        match self {
            Role::User => "user-message",
            Role::Persona(persona) => persona.as_str(),
            Role::Error => "error",
        }
    }

    /// Header label; users get no header.
    pub fn label(self) -> Option<&'static str> {
        match self {
            Role::User => None,
            Role::Persona(persona) => Some(persona.display_name()),
            Role::Error => Some("Error"),
        }
    }
}

/// One bubble in the conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub text: String,
    pub role: Role,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            role: Role::User,
        }
    }

    pub fn persona(persona: PersonaId, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            role: Role::Persona(persona),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            role: Role::Error,
        }
    }

    /// Rendered body for persona and error bubbles. User text is shown
    /// verbatim, so it has none.
    pub fn html(&self) -> Option<String> {
        match self.role {
            Role::User => None,
            Role::Persona(_) | Role::Error => Some(markdown::render(&self.text)),
        }
    }
}

/// Where the current submission cycle stands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ChatState {
    #[default]
    Idle,
    AwaitingPersonaChoice {
        query: String,
    },
    Pending {
        id: RequestId,
        query: String,
        persona: PersonaId,
    },
}

/// What the display layer must do in response to an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    HideWelcome,
    ClearInput,
    ShowMessage(ChatMessage),
    ShowPersonaChoices,
    HidePersonaChoices,
    ShowThinking { id: RequestId, persona: PersonaId },
    HideThinking(RequestId),
    SendRequest { id: RequestId, request: EchoRequest },
}

/// Why a proxy round-trip failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestFailure {
    /// The request never produced a response.
    Network(String),
    /// The proxy answered with a non-2xx status.
    Status(u16),
}

impl std::fmt::Display for RequestFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestFailure::Network(message) => f.write_str(message),
            RequestFailure::Status(status) => write!(f, "HTTP error! status: {status}"),
        }
    }
}

/// Drives one chat session.
#[derive(Debug, Clone)]
pub struct ChatController {
    state: ChatState,
    backend_url: String,
    next_id: u64,
}

impl Default for ChatController {
    fn default() -> Self {
        Self::new(DEFAULT_BACKEND_URL)
    }
}

impl ChatController {
    pub fn new(backend_url: impl Into<String>) -> Self {
        Self {
            state: ChatState::Idle,
            backend_url: backend_url.into(),
            next_id: 0,
        }
    }

    pub fn state(&self) -> &ChatState {
        &self.state
    }

    pub fn backend_url(&self) -> &str {
        &self.backend_url
    }

    /// The user pressed send. Blank input is ignored entirely.
    pub fn submit(&mut self, input: &str) -> Vec<Effect> {
        let query = input.trim();
        if query.is_empty() {
            return Vec::new();
        }

        let mut effects = Vec::with_capacity(5);
        if matches!(self.state, ChatState::AwaitingPersonaChoice { .. }) {
            effects.push(Effect::HidePersonaChoices);
        }
        effects.extend([
            Effect::HideWelcome,
            Effect::ShowMessage(ChatMessage::user(query)),
            Effect::ShowPersonaChoices,
            Effect::ClearInput,
        ]);

        self.state = ChatState::AwaitingPersonaChoice {
            query: query.to_string(),
        };
        effects
    }

    /// The user picked a persona. Only issues a request when a query is
    /// waiting for one.
    pub fn choose_persona(&mut self, persona: PersonaId) -> Vec<Effect> {
        match std::mem::take(&mut self.state) {
            ChatState::AwaitingPersonaChoice { query } => {
                let id = RequestId(self.next_id);
                self.next_id += 1;
                self.state = ChatState::Pending {
                    id,
                    query: query.clone(),
                    persona,
                };
                vec![
                    Effect::HidePersonaChoices,
                    Effect::ShowThinking { id, persona },
                    Effect::SendRequest {
                        id,
                        request: EchoRequest { query, persona },
                    },
                ]
            }
            other => {
                self.state = other;
                vec![
                    Effect::HidePersonaChoices,
                    Effect::ShowMessage(ChatMessage::error(NO_QUERY_MESSAGE)),
                ]
            }
        }
    }

    /// Request `id`, issued for `persona`, finished.
    ///
    /// Returns to `Idle` only when `id` is the request still pending; a late
    /// answer for an older submission is shown without disturbing a newer
    /// cycle, whatever persona either of them used.
    pub fn complete(
        &mut self,
        id: RequestId,
        persona: PersonaId,
        outcome: Result<EchoResponse, RequestFailure>,
    ) -> Vec<Effect> {
        if matches!(self.state, ChatState::Pending { id: pending, .. } if pending == id) {
            self.state = ChatState::Idle;
        }

        let message = match outcome {
            Ok(EchoResponse { response }) if !response.is_empty() => {
                ChatMessage::persona(persona, response)
            }
            Ok(_) => ChatMessage::persona(persona, MISSING_RESPONSE_MESSAGE),
            Err(failure) => ChatMessage::error(format!(
                "[NETWORK ERROR] Could not connect. Ensure your backend is running on {}. Details: {failure}",
                self.backend_url
            )),
        };

        vec![Effect::HideThinking(id), Effect::ShowMessage(message)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sends(effects: &[Effect]) -> Vec<&EchoRequest> {
        effects
            .iter()
            .filter_map(|e| match e {
                Effect::SendRequest { request, .. } => Some(request),
                _ => None,
            })
            .collect()
    }

    fn sent_id(effects: &[Effect]) -> RequestId {
        effects
            .iter()
            .find_map(|e| match e {
                Effect::SendRequest { id, .. } => Some(*id),
                _ => None,
            })
            .expect("a request was sent")
    }

    fn messages(effects: &[Effect]) -> Vec<&ChatMessage> {
        effects
            .iter()
            .filter_map(|e| match e {
                Effect::ShowMessage(msg) => Some(msg),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn blank_submit_is_ignored() {
        let mut chat = ChatController::default();
        for input in ["", "   ", "\n\t "] {
            assert!(chat.submit(input).is_empty());
            assert_eq!(chat.state(), &ChatState::Idle);
        }
    }

    #[test]
    fn submit_shows_user_bubble_and_choices() {
        let mut chat = ChatController::default();
        let effects = chat.submit("  should I learn Rust?  ");

        assert_eq!(
            messages(&effects),
            vec![&ChatMessage::user("should I learn Rust?")]
        );
        assert!(effects.contains(&Effect::ShowPersonaChoices));
        assert!(effects.contains(&Effect::ClearInput));
        assert_eq!(
            chat.state(),
            &ChatState::AwaitingPersonaChoice {
                query: "should I learn Rust?".into()
            }
        );
    }

    #[test]
    fn choosing_persona_sends_remembered_query() {
        let mut chat = ChatController::default();
        chat.submit("hello");
        let effects = chat.choose_persona(PersonaId::Philosophical);

        assert_eq!(
            effects,
            vec![
                Effect::HidePersonaChoices,
                Effect::ShowThinking {
                    id: RequestId(0),
                    persona: PersonaId::Philosophical,
                },
                Effect::SendRequest {
                    id: RequestId(0),
                    request: EchoRequest {
                        query: "hello".into(),
                        persona: PersonaId::Philosophical,
                    },
                },
            ]
        );
        assert!(matches!(chat.state(), ChatState::Pending { .. }));
    }

    #[test]
    fn choosing_persona_without_query_is_an_error_bubble() {
        let mut chat = ChatController::default();
        let effects = chat.choose_persona(PersonaId::Optimistic);

        assert!(sends(&effects).is_empty());
        let shown = messages(&effects);
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0], &ChatMessage::error(NO_QUERY_MESSAGE));
        assert_eq!(chat.state(), &ChatState::Idle);
    }

    #[test]
    fn query_is_consumed_once_sent() {
        let mut chat = ChatController::default();
        chat.submit("once");
        assert_eq!(sends(&chat.choose_persona(PersonaId::Sarcastic)).len(), 1);
        assert!(sends(&chat.choose_persona(PersonaId::Realistic)).is_empty());
    }

    #[test]
    fn success_returns_to_idle_with_persona_bubble() {
        let mut chat = ChatController::default();
        chat.submit("hi");
        let id = sent_id(&chat.choose_persona(PersonaId::Realistic));
        let effects = chat.complete(
            id,
            PersonaId::Realistic,
            Ok(EchoResponse {
                response: "**Do it.**".into(),
            }),
        );

        assert_eq!(effects[0], Effect::HideThinking(id));
        let shown = messages(&effects);
        assert_eq!(shown, vec![&ChatMessage::persona(PersonaId::Realistic, "**Do it.**")]);
        assert_eq!(
            shown[0].html().as_deref(),
            Some("<p><strong>Do it.</strong></p>")
        );
        assert_eq!(shown[0].role.label(), Some("Practical"));
        assert_eq!(chat.state(), &ChatState::Idle);
    }

    #[test]
    fn empty_response_uses_fallback_text() {
        let mut chat = ChatController::default();
        chat.submit("hi");
        let id = sent_id(&chat.choose_persona(PersonaId::Optimistic));
        let effects = chat.complete(
            id,
            PersonaId::Optimistic,
            Ok(EchoResponse {
                response: String::new(),
            }),
        );
        assert_eq!(
            messages(&effects)[0],
            &ChatMessage::persona(PersonaId::Optimistic, MISSING_RESPONSE_MESSAGE)
        );
    }

    #[test]
    fn network_failure_names_backend_and_returns_to_idle() {
        let mut chat = ChatController::new("http://example.test/api/echo");
        chat.submit("hi");
        let id = sent_id(&chat.choose_persona(PersonaId::Sarcastic));
        let effects = chat.complete(id, PersonaId::Sarcastic, Err(RequestFailure::Status(500)));

        let shown = messages(&effects);
        assert_eq!(shown[0].role, Role::Error);
        assert!(shown[0].text.contains("http://example.test/api/echo"));
        assert!(shown[0].text.ends_with("Details: HTTP error! status: 500"));
        assert_eq!(chat.state(), &ChatState::Idle);
    }

    #[test]
    fn resubmitting_replaces_pending_choice() {
        let mut chat = ChatController::default();
        chat.submit("first");
        let effects = chat.submit("second");

        assert_eq!(effects[0], Effect::HidePersonaChoices);
        let sent = chat.choose_persona(PersonaId::Optimistic);
        assert_eq!(sends(&sent)[0].query, "second");
    }

    #[test]
    fn late_answer_does_not_reset_newer_cycle() {
        let mut chat = ChatController::default();
        chat.submit("first");
        let first = sent_id(&chat.choose_persona(PersonaId::Optimistic));
        chat.submit("second");

        let effects = chat.complete(
            first,
            PersonaId::Optimistic,
            Ok(EchoResponse {
                response: "late".into(),
            }),
        );
        assert_eq!(messages(&effects).len(), 1);
        assert_eq!(
            chat.state(),
            &ChatState::AwaitingPersonaChoice {
                query: "second".into()
            }
        );
    }

    #[test]
    fn late_answer_for_same_persona_keeps_newer_request_pending() {
        let mut chat = ChatController::default();
        chat.submit("first");
        let first = sent_id(&chat.choose_persona(PersonaId::Optimistic));
        chat.submit("second");
        let second = sent_id(&chat.choose_persona(PersonaId::Optimistic));
        assert!(second > first);

        let effects = chat.complete(
            first,
            PersonaId::Optimistic,
            Ok(EchoResponse {
                response: "for first".into(),
            }),
        );
        assert_eq!(effects[0], Effect::HideThinking(first));
        assert_eq!(
            messages(&effects),
            vec![&ChatMessage::persona(PersonaId::Optimistic, "for first")]
        );
        assert_eq!(
            chat.state(),
            &ChatState::Pending {
                id: second,
                query: "second".into(),
                persona: PersonaId::Optimistic,
            }
        );

        let effects = chat.complete(
            second,
            PersonaId::Optimistic,
            Ok(EchoResponse {
                response: "for second".into(),
            }),
        );
        assert_eq!(effects[0], Effect::HideThinking(second));
        assert_eq!(chat.state(), &ChatState::Idle);
    }

    #[test]
    fn roles_map_to_bubble_classes() {
        assert_eq!(Role::User.class_name(), "user-message");
        assert_eq!(Role::Persona(PersonaId::Sarcastic).class_name(), "sarcastic");
        assert_eq!(Role::Error.class_name(), "error");
        assert_eq!(Role::User.label(), None);
        assert!(ChatMessage::user("<b>").html().is_none());
    }
}
