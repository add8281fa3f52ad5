//! Unified session state.
//!
//! One tagged enum holds the phase and the data that phase admits, so
//! invalid combinations (a conversation without an active session, a goal
//! without a session at all) are unrepresentable rather than merely
//! avoided by convention. Transition methods enforce the one-directional
//! lifecycle; an invalid transition is a logged no-op, never a panic.

use super::conversation::ConversationTracker;
use super::model::SessionModel;
use super::phase::SessionPhase;

/// End reason recorded when the stream closes without a server-side
/// conclusion message.
pub const CONNECTION_CLOSED_REASON: &str = "connection_closed";

/// The client's complete view of the tracked session.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    /// No session tracked
    #[default]
    Idle,
    /// Identifier issued, stream not yet open
    Connecting { session: SessionModel },
    /// Stream open, events flowing
    Active {
        session: SessionModel,
        conversation: ConversationTracker,
    },
    /// Concluded normally or server-side; data retained for inspection
    Ended { session: SessionModel, reason: String },
    /// Start failure (no session) or stream failure (session frozen)
    Error {
        session: Option<SessionModel>,
        message: String,
    },
}

impl SessionState {
    pub fn phase(&self) -> SessionPhase {
        match self {
            SessionState::Idle => SessionPhase::Idle,
            SessionState::Connecting { .. } => SessionPhase::Connecting,
            SessionState::Active { .. } => SessionPhase::Active,
            SessionState::Ended { .. } => SessionPhase::Ended,
            SessionState::Error { .. } => SessionPhase::Error,
        }
    }

    pub fn session(&self) -> Option<&SessionModel> {
        match self {
            SessionState::Idle => None,
            SessionState::Connecting { session }
            | SessionState::Active { session, .. }
            | SessionState::Ended { session, .. } => Some(session),
            SessionState::Error { session, .. } => session.as_ref(),
        }
    }

    pub fn conversation(&self) -> Option<&ConversationTracker> {
        match self {
            SessionState::Active { conversation, .. } => Some(conversation),
            _ => None,
        }
    }

    /// Begin tracking a freshly started session, discarding whatever was
    /// tracked before. Valid from any state: a new start always replaces
    /// the previous client-side view.
    pub fn begin(&mut self, session: SessionModel) {
        *self = SessionState::Connecting { session };
    }

    /// The stream opened; events may now flow.
    ///
    /// Returns true if the transition happened.
    pub fn channel_opened(&mut self) -> bool {
        match std::mem::take(self) {
            SessionState::Connecting { session } => {
                *self = SessionState::Active {
                    session,
                    conversation: ConversationTracker::default(),
                };
                true
            }
            other => {
                tracing::warn!(
                    "Ignoring stream open in phase {}",
                    other.phase().as_str()
                );
                *self = other;
                false
            }
        }
    }

    /// Conclude the session (server message, user end call, or stream
    /// close). A no-op in `Idle` and in terminal states, which makes the
    /// caller-facing `end` idempotent.
    ///
    /// Returns true if the transition happened.
    pub fn conclude(&mut self, reason: &str) -> bool {
        match std::mem::take(self) {
            SessionState::Connecting { mut session }
            | SessionState::Active { mut session, .. } => {
                session.mark_ended(reason);
                *self = SessionState::Ended {
                    session,
                    reason: reason.to_string(),
                };
                true
            }
            other => {
                *self = other;
                false
            }
        }
    }

    /// Record a failure: start rejection (no session yet) or stream
    /// failure (session data retained, frozen). A no-op in terminal
    /// states so a late stream error cannot overwrite a conclusion.
    ///
    /// Returns true if the transition happened.
    pub fn fail(&mut self, message: impl Into<String>) -> bool {
        match std::mem::take(self) {
            SessionState::Idle => {
                *self = SessionState::Error {
                    session: None,
                    message: message.into(),
                };
                true
            }
            SessionState::Connecting { session } | SessionState::Active { session, .. } => {
                *self = SessionState::Error {
                    session: Some(session),
                    message: message.into(),
                };
                true
            }
            other => {
                *self = other;
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wonderland_protocol::{SessionId, UserId};

    fn pending_model() -> SessionModel {
        SessionModel::pending(SessionId::new(), UserId::new(), "Alice", None, None)
    }

    #[test]
    fn test_happy_path_transitions() {
        let mut state = SessionState::default();
        assert_eq!(state.phase(), SessionPhase::Idle);

        state.begin(pending_model());
        assert_eq!(state.phase(), SessionPhase::Connecting);

        assert!(state.channel_opened());
        assert_eq!(state.phase(), SessionPhase::Active);
        assert!(state.conversation().is_some());

        assert!(state.conclude("user_request"));
        assert_eq!(state.phase(), SessionPhase::Ended);
        assert_eq!(
            state.session().and_then(|s| s.ended_reason.as_deref()),
            Some("user_request")
        );
    }

    #[test]
    fn test_conclude_is_idempotent() {
        let mut state = SessionState::default();
        state.begin(pending_model());
        state.channel_opened();

        assert!(state.conclude("user_request"));
        assert!(!state.conclude("connection_closed"));

        // The first reason sticks
        match &state {
            SessionState::Ended { reason, .. } => assert_eq!(reason, "user_request"),
            other => panic!("expected Ended, got {other:?}"),
        }
    }

    #[test]
    fn test_fail_from_idle_has_no_session() {
        let mut state = SessionState::default();
        assert!(state.fail("server rejected"));
        assert_eq!(state.phase(), SessionPhase::Error);
        assert!(state.session().is_none());
    }

    #[test]
    fn test_fail_retains_session_data() {
        let mut state = SessionState::default();
        state.begin(pending_model());
        state.channel_opened();

        assert!(state.fail("socket reset"));
        assert_eq!(state.phase(), SessionPhase::Error);
        assert!(state.session().is_some());
    }

    #[test]
    fn test_fail_does_not_overwrite_conclusion() {
        let mut state = SessionState::default();
        state.begin(pending_model());
        state.channel_opened();
        state.conclude("user_request");

        assert!(!state.fail("late socket error"));
        assert_eq!(state.phase(), SessionPhase::Ended);
    }

    #[test]
    fn test_open_ignored_when_not_connecting() {
        let mut state = SessionState::default();
        assert!(!state.channel_opened());
        assert_eq!(state.phase(), SessionPhase::Idle);
    }

    #[test]
    fn test_restart_from_terminal_state() {
        let mut state = SessionState::default();
        state.begin(pending_model());
        state.channel_opened();
        state.conclude("user_request");

        state.begin(pending_model());
        assert_eq!(state.phase(), SessionPhase::Connecting);
        assert!(state.session().is_some_and(|s| s.events.is_empty()));
    }
}
