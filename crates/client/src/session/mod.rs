//! Session state: the phase machine, the local model, the event reducer,
//! and the nested goal/conversation trackers.

pub mod conversation;
pub mod goal;
pub mod model;
pub mod phase;
pub mod reducer;
pub mod state;

pub use conversation::ConversationTracker;
pub use goal::GoalTracker;
pub use model::SessionModel;
pub use phase::{PhaseObserver, SessionPhase};
pub use state::{SessionState, CONNECTION_CLOSED_REASON};
