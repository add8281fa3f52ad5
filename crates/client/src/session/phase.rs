//! Session phase observation.
//!
//! The phase is the client-side lifecycle of one exploration run. It is
//! stored alongside the full session state and mirrored into an atomic so
//! observers (UI bindings, tests) can read it without taking the state lock.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

/// Client-side lifecycle phase of the tracked session.
///
/// Transitions are one-directional: `Idle → Connecting → Active →
/// (Ended | Error)`. The terminal phases only restart via a fresh `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No session tracked
    Idle,
    /// Session identifier issued, stream not yet open
    Connecting,
    /// Stream open, events flowing
    Active,
    /// Graceful or server-driven conclusion
    Ended,
    /// Start failure or stream failure
    Error,
}

impl SessionPhase {
    /// Convert to u8 for atomic storage.
    pub fn to_u8(self) -> u8 {
        match self {
            SessionPhase::Idle => 0,
            SessionPhase::Connecting => 1,
            SessionPhase::Active => 2,
            SessionPhase::Ended => 3,
            SessionPhase::Error => 4,
        }
    }

    /// Convert from u8 (atomic storage).
    pub fn from_u8(v: u8) -> Self {
        match v {
            1 => SessionPhase::Connecting,
            2 => SessionPhase::Active,
            3 => SessionPhase::Ended,
            4 => SessionPhase::Error,
            _ => SessionPhase::Idle,
        }
    }

    /// Whether this phase admits no further transitions for the current
    /// session instance.
    pub fn is_terminal(self) -> bool {
        matches!(self, SessionPhase::Ended | SessionPhase::Error)
    }

    /// Stable lower-case label for display and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            SessionPhase::Idle => "idle",
            SessionPhase::Connecting => "connecting",
            SessionPhase::Active => "active",
            SessionPhase::Ended => "ended",
            SessionPhase::Error => "error",
        }
    }
}

/// Observable session phase for UI binding.
///
/// Multiple observers can share the same underlying atomic; reads never
/// contend with the dispatcher.
#[derive(Clone)]
pub struct PhaseObserver {
    phase: Arc<AtomicU8>,
}

impl PhaseObserver {
    pub fn new(phase: Arc<AtomicU8>) -> Self {
        Self { phase }
    }

    /// Get the current session phase.
    pub fn phase(&self) -> SessionPhase {
        SessionPhase::from_u8(self.phase.load(Ordering::SeqCst))
    }

    /// Check if the session is currently active.
    pub fn is_active(&self) -> bool {
        self.phase() == SessionPhase::Active
    }
}

/// Internal helper to publish a phase change (used by the dispatcher).
pub(crate) fn publish_phase(cell: &AtomicU8, phase: SessionPhase) {
    cell.store(phase.to_u8(), Ordering::SeqCst);
}
