//! Shared vocabulary types for the exploration protocol
//!
//! These are the payload shapes carried both inside the full session
//! snapshot and inside incremental stream messages. Pure data, no logic.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{AgentId, EventId, GoalId, PresetId, SessionId, UserId};

// =============================================================================
// Session Status
// =============================================================================

/// Server-side lifecycle status of a session.
///
/// This is distinct from the client's connection phase: the server only
/// knows `active` and `ended`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Active,
    Ended,
}

// =============================================================================
// Exploration Events
// =============================================================================

/// Kind of a single exploration event.
///
/// The set is closed: a frame carrying an unknown kind fails to decode and
/// is dropped by the channel, never partially applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Arrival,
    Movement,
    Observation,
    Speech,
    Reflection,
    NpcEncounter,
    Expression,
    TravelStart,
    TravelThrough,
    Departure,
    GoalCompleted,
    ConversationStart,
    ConversationMessage,
    ConversationEnd,
}

/// One immutable record of something that happened during exploration.
///
/// Ordering is arrival order on the stream, not timestamp order; the client
/// never re-sorts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplorationEvent {
    pub id: EventId,
    pub event_type: EventKind,
    pub timestamp: DateTime<Utc>,
    /// Room slug this event happened in, if any (e.g. "threshold")
    #[serde(default)]
    pub location_id: Option<String>,
    /// Display name for the room, if any
    #[serde(default)]
    pub location_name: Option<String>,
    pub description: String,
    /// Raw engine output backing the description
    #[serde(default)]
    pub raw_output: Option<String>,
    /// The agent's internal annotation, when the engine exposes one
    #[serde(default)]
    pub thought: Option<String>,
}

// =============================================================================
// Exploration Goals
// =============================================================================

/// An exploration goal scoped to one session.
///
/// The engine always sends the full goal object; progress messages replace
/// the previous goal wholesale, there is no field-level merge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplorationGoal {
    pub id: GoalId,
    pub title: String,
    #[serde(rename = "type")]
    pub goal_type: String,
    pub target: u32,
    pub current: u32,
    pub is_completed: bool,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

/// A named template used to seed an exploration goal at session start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalPreset {
    pub id: PresetId,
    pub title: String,
    #[serde(rename = "type")]
    pub goal_type: String,
    pub target: u32,
}

// =============================================================================
// Conversations
// =============================================================================

/// One line of an NPC dialogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub speaker: String,
    pub content: String,
    pub is_agent: bool,
    #[serde(default)]
    pub thought: Option<String>,
}

// =============================================================================
// Session Snapshot
// =============================================================================

/// Full session state, sent once per channel open.
///
/// Re-establishes a consistent baseline even if the client attaches to a
/// session that already has history. Receiving it twice yields the same
/// state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub id: SessionId,
    pub user_id: UserId,
    #[serde(default)]
    pub agent_id: Option<AgentId>,
    pub agent_name: String,
    pub started_at: DateTime<Utc>,
    pub status: SessionStatus,
    #[serde(default)]
    pub ended_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub ended_reason: Option<String>,
    #[serde(default)]
    pub events: Vec<ExplorationEvent>,
    /// Room slugs in first-visit order
    #[serde(default)]
    pub visited_rooms: Vec<String>,
    #[serde(default)]
    pub current_room: Option<String>,
    #[serde(default)]
    pub current_room_name: Option<String>,
    #[serde(default)]
    pub goal: Option<ExplorationGoal>,
}
