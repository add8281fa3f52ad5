//! Goal tracking for the active session.
//!
//! Pure state holder driven entirely by the event reducer; there is no
//! independent polling. Completion is a property of the received goal
//! object, not a separately tracked flag.

use wonderland_protocol::ExplorationGoal;

/// Tracks the session's current exploration goal, if any.
///
/// Every progress or completion message replaces the goal wholesale; the
/// server is the sole source of truth and no field-level merge occurs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GoalTracker {
    current: Option<ExplorationGoal>,
}

impl GoalTracker {
    /// Replace the tracked goal with the one received from the server.
    pub fn progress(&mut self, goal: ExplorationGoal) {
        self.current = Some(goal);
    }

    /// Drop the tracked goal. Called only when a new session starts.
    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<&ExplorationGoal> {
        self.current.as_ref()
    }

    pub fn is_completed(&self) -> bool {
        self.current.as_ref().is_some_and(|goal| goal.is_completed)
    }
}
