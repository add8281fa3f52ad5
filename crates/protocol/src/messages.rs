//! WebSocket message types for the exploration event stream
//!
//! This module contains all message types exchanged over the per-session
//! stream connection. The engine sends `ServerMessage`; the client sends
//! `ClientMessage` (currently only the keepalive signal).

use serde::{Deserialize, Serialize};

use crate::types::{ExplorationEvent, ExplorationGoal, SessionSnapshot};

// =============================================================================
// Client Messages (Client → Engine)
// =============================================================================

/// Messages from the client to the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Transport-level liveness signal; carries no session semantics.
    Keepalive,
}

// =============================================================================
// Server Messages (Engine → Client)
// =============================================================================

/// Messages from the engine to the client.
///
/// The `type` field discriminates the kind. The engine guarantees that
/// `SessionState` precedes any incremental message on a given connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Full session snapshot; replaces the entire local state.
    SessionState { session: SessionSnapshot },
    /// One incremental exploration event, appended to the log.
    SessionEvent { event: ExplorationEvent },
    /// Goal progressed; the payload is the complete replacement goal.
    GoalProgress { goal: ExplorationGoal },
    /// Goal reached its target; the payload is the completed goal.
    GoalCompleted { goal: ExplorationGoal },
    /// An NPC conversation opened.
    ConversationStart {
        npc_name: String,
        #[serde(default)]
        npc_title: Option<String>,
    },
    /// One line of the active NPC conversation.
    ConversationMessage {
        speaker: String,
        content: String,
        is_agent: bool,
        #[serde(default)]
        thought: Option<String>,
    },
    /// The active NPC conversation closed.
    ConversationEnd { npc_name: String },
    /// The exploration concluded server-side.
    SessionEnded { reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{EventId, GoalId};
    use crate::types::EventKind;

    #[test]
    fn test_keepalive_wire_shape() {
        let json = serde_json::to_string(&ClientMessage::Keepalive).unwrap();
        assert_eq!(json, r#"{"type":"keepalive"}"#);
    }

    #[test]
    fn test_decode_session_event() {
        let json = serde_json::json!({
            "type": "session_event",
            "event": {
                "id": EventId::new(),
                "event_type": "arrival",
                "timestamp": "2026-08-08T10:00:00Z",
                "location_id": "threshold",
                "location_name": "The Threshold",
                "description": "Alice arrives at the threshold."
            }
        });

        let msg: ServerMessage = serde_json::from_value(json).unwrap();
        match msg {
            ServerMessage::SessionEvent { event } => {
                assert_eq!(event.event_type, EventKind::Arrival);
                assert_eq!(event.location_id.as_deref(), Some("threshold"));
                assert!(event.raw_output.is_none());
            }
            other => panic!("expected SessionEvent, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_goal_progress() {
        let json = serde_json::json!({
            "type": "goal_progress",
            "goal": {
                "id": GoalId::new(),
                "title": "Meet three NPCs",
                "type": "meet_npcs",
                "target": 3,
                "current": 1,
                "is_completed": false
            }
        });

        let msg: ServerMessage = serde_json::from_value(json).unwrap();
        match msg {
            ServerMessage::GoalProgress { goal } => {
                assert_eq!(goal.current, 1);
                assert!(!goal.is_completed);
            }
            other => panic!("expected GoalProgress, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_conversation_messages() {
        let start: ServerMessage = serde_json::from_value(serde_json::json!({
            "type": "conversation_start",
            "npc_name": "Keeper",
            "npc_title": "Keeper of the Gate"
        }))
        .unwrap();
        assert!(matches!(start, ServerMessage::ConversationStart { .. }));

        let line: ServerMessage = serde_json::from_value(serde_json::json!({
            "type": "conversation_message",
            "speaker": "Keeper",
            "content": "Who goes there?",
            "is_agent": false
        }))
        .unwrap();
        match line {
            ServerMessage::ConversationMessage { thought, .. } => assert!(thought.is_none()),
            other => panic!("expected ConversationMessage, got {other:?}"),
        }

        let end: ServerMessage = serde_json::from_value(serde_json::json!({
            "type": "conversation_end",
            "npc_name": "Keeper"
        }))
        .unwrap();
        assert!(matches!(end, ServerMessage::ConversationEnd { .. }));
    }

    #[test]
    fn test_decode_session_state() {
        let json = serde_json::json!({
            "type": "session_state",
            "session": {
                "id": "550e8400-e29b-41d4-a716-446655440000",
                "user_id": "550e8400-e29b-41d4-a716-446655440001",
                "agent_name": "Alice",
                "started_at": "2026-08-08T10:00:00Z",
                "status": "active",
                "events": [],
                "visited_rooms": ["threshold"],
                "current_room": "threshold",
                "current_room_name": "The Threshold"
            }
        });

        let msg: ServerMessage = serde_json::from_value(json).unwrap();
        match msg {
            ServerMessage::SessionState { session } => {
                assert_eq!(session.current_room.as_deref(), Some("threshold"));
                assert!(session.events.is_empty());
            }
            other => panic!("expected SessionState, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_goal_completed() {
        let json = serde_json::json!({
            "type": "goal_completed",
            "goal": {
                "id": GoalId::new(),
                "title": "Meet three NPCs",
                "type": "meet_npcs",
                "target": 3,
                "current": 3,
                "is_completed": true,
                "completed_at": "2026-08-08T10:05:00Z"
            }
        });

        let msg: ServerMessage = serde_json::from_value(json).unwrap();
        match msg {
            ServerMessage::GoalCompleted { goal } => {
                assert!(goal.is_completed);
                assert!(goal.completed_at.is_some());
            }
            other => panic!("expected GoalCompleted, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_session_ended() {
        let msg: ServerMessage = serde_json::from_value(serde_json::json!({
            "type": "session_ended",
            "reason": "user_request"
        }))
        .unwrap();
        match msg {
            ServerMessage::SessionEnded { reason } => assert_eq!(reason, "user_request"),
            other => panic!("expected SessionEnded, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_kind_fails_to_decode() {
        let result = serde_json::from_str::<ServerMessage>(r#"{"type":"telemetry","n":1}"#);
        assert!(result.is_err());
    }
}
