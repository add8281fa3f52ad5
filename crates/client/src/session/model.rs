//! Local session model.
//!
//! The client's reconstruction of one exploration run: the append-only
//! event log, room tracking, and the current goal. Mutated only by the
//! event reducer in response to stream frames, or by the local end call.

use chrono::{DateTime, Utc};
use wonderland_protocol::{
    AgentId, ExplorationEvent, ExplorationGoal, SessionId, SessionSnapshot, UserId,
};

use super::goal::GoalTracker;

/// Client-side state of one exploration session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionModel {
    pub id: SessionId,
    pub user_id: UserId,
    pub agent_id: Option<AgentId>,
    pub agent_name: String,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub ended_reason: Option<String>,
    /// Append-only, ordered by arrival on the stream
    pub events: Vec<ExplorationEvent>,
    /// Room slugs in first-visit order, deduplicated
    pub visited_rooms: Vec<String>,
    pub current_room: Option<String>,
    pub current_room_name: Option<String>,
    pub goal: GoalTracker,
}

impl SessionModel {
    /// State for a freshly issued session identifier, before the snapshot
    /// arrives. `seeded_goal` is the goal the server created from a preset
    /// at start time, if any.
    pub fn pending(
        id: SessionId,
        user_id: UserId,
        agent_name: impl Into<String>,
        agent_id: Option<AgentId>,
        seeded_goal: Option<ExplorationGoal>,
    ) -> Self {
        let mut goal = GoalTracker::default();
        if let Some(seeded) = seeded_goal {
            goal.progress(seeded);
        }
        Self {
            id,
            user_id,
            agent_id,
            agent_name: agent_name.into(),
            started_at: Utc::now(),
            ended_at: None,
            ended_reason: None,
            events: Vec::new(),
            visited_rooms: Vec::new(),
            current_room: None,
            current_room_name: None,
            goal,
        }
    }

    /// Append one event in arrival order, updating room tracking when the
    /// event carries a location. Never reorders or deduplicates the log.
    pub fn record_event(&mut self, event: ExplorationEvent) {
        if let Some(location_id) = &event.location_id {
            if !self.visited_rooms.iter().any(|room| room == location_id) {
                self.visited_rooms.push(location_id.clone());
            }
            self.current_room = Some(location_id.clone());
            self.current_room_name = event.location_name.clone();
        }
        self.events.push(event);
    }

    /// Record the conclusion of the run.
    pub fn mark_ended(&mut self, reason: &str) {
        self.ended_reason = Some(reason.to_string());
        self.ended_at = Some(Utc::now());
    }
}

impl From<SessionSnapshot> for SessionModel {
    fn from(snapshot: SessionSnapshot) -> Self {
        let mut goal = GoalTracker::default();
        if let Some(current) = snapshot.goal {
            goal.progress(current);
        }
        Self {
            id: snapshot.id,
            user_id: snapshot.user_id,
            agent_id: snapshot.agent_id,
            agent_name: snapshot.agent_name,
            started_at: snapshot.started_at,
            ended_at: snapshot.ended_at,
            ended_reason: snapshot.ended_reason,
            events: snapshot.events,
            visited_rooms: snapshot.visited_rooms,
            current_room: snapshot.current_room,
            current_room_name: snapshot.current_room_name,
            goal,
        }
    }
}
