//! Event reducer.
//!
//! Applies each decoded stream message to the session state, in receipt
//! order, and collects the notifications to fire once the state lock is
//! released. The engine guarantees the full snapshot precedes any
//! incremental message on a connection; a message arriving in the wrong
//! phase is a protocol error, logged and dropped rather than coerced.

use wonderland_protocol::{ConversationMessage, ServerMessage};

use crate::channel::ChannelSignal;
use crate::error::ClientError;
use crate::hooks::Notification;
use crate::session::model::SessionModel;
use crate::session::phase::SessionPhase;
use crate::session::state::{SessionState, CONNECTION_CLOSED_REASON};

/// Apply one channel signal to the state, pushing resulting notifications.
pub fn apply_signal(
    state: &mut SessionState,
    signal: ChannelSignal,
    notifications: &mut Vec<Notification>,
) {
    match signal {
        ChannelSignal::Opened => {
            if state.channel_opened() {
                notifications.push(Notification::PhaseChanged(SessionPhase::Active));
            }
        }
        ChannelSignal::Message(message) => apply_message(state, *message, notifications),
        ChannelSignal::Failed(message) => {
            if state.fail(ClientError::Channel(message).to_string()) {
                notifications.push(Notification::PhaseChanged(SessionPhase::Error));
            }
        }
        ChannelSignal::Closed => {
            // A closed stream always means the exploration is over; closure
            // alone is a conclusion, not a failure.
            if state.conclude(CONNECTION_CLOSED_REASON) {
                notifications.push(Notification::PhaseChanged(SessionPhase::Ended));
            }
        }
    }
}

/// Apply one decoded server message to the state.
pub fn apply_message(
    state: &mut SessionState,
    message: ServerMessage,
    notifications: &mut Vec<Notification>,
) {
    match message {
        ServerMessage::SessionState { session: snapshot } => match state {
            // The snapshot can also land while still connecting if the open
            // signal races it; either way it replaces the session wholesale.
            SessionState::Connecting { session } | SessionState::Active { session, .. } => {
                *session = SessionModel::from(snapshot);
            }
            other => drop_message("session_state", other.phase()),
        },
        ServerMessage::SessionEvent { event } => match state {
            SessionState::Active { session, .. } => {
                notifications.push(Notification::EventAppended(event.clone()));
                session.record_event(event);
            }
            other => drop_message("session_event", other.phase()),
        },
        ServerMessage::GoalProgress { goal } => match state {
            SessionState::Active { session, .. } => session.goal.progress(goal),
            other => drop_message("goal_progress", other.phase()),
        },
        ServerMessage::GoalCompleted { goal } => match state {
            SessionState::Active { session, .. } => {
                notifications.push(Notification::GoalCompleted(goal.clone()));
                // The server also emits a goal_completed session event; the
                // log entry arrives on its own, so none is synthesized here.
                session.goal.progress(goal);
            }
            other => drop_message("goal_completed", other.phase()),
        },
        ServerMessage::ConversationStart {
            npc_name,
            npc_title,
        } => match state {
            SessionState::Active { conversation, .. } => {
                conversation.start(npc_name, npc_title);
                notifications.push(Notification::ConversationChanged);
            }
            other => drop_message("conversation_start", other.phase()),
        },
        ServerMessage::ConversationMessage {
            speaker,
            content,
            is_agent,
            thought,
        } => match state {
            SessionState::Active { conversation, .. } => {
                let appended = conversation.push_message(ConversationMessage {
                    speaker,
                    content,
                    is_agent,
                    thought,
                });
                if appended {
                    notifications.push(Notification::ConversationChanged);
                }
            }
            other => drop_message("conversation_message", other.phase()),
        },
        ServerMessage::ConversationEnd { npc_name } => match state {
            SessionState::Active { conversation, .. } => {
                if conversation
                    .npc_name()
                    .is_some_and(|active| active != npc_name)
                {
                    tracing::warn!(
                        "conversation_end names {} but {} is active",
                        npc_name,
                        conversation.npc_name().unwrap_or_default()
                    );
                }
                if conversation.end() {
                    notifications.push(Notification::ConversationChanged);
                }
            }
            other => drop_message("conversation_end", other.phase()),
        },
        ServerMessage::SessionEnded { reason } => {
            if state.conclude(&reason) {
                notifications.push(Notification::PhaseChanged(SessionPhase::Ended));
            } else {
                drop_message("session_ended", state.phase());
            }
        }
    }
}

fn drop_message(kind: &str, phase: SessionPhase) {
    tracing::warn!(
        "Dropping {} message in phase {} (protocol error)",
        kind,
        phase.as_str()
    );
}
