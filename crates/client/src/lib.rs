//! Wonderland Client - Live exploration session client
//!
//! This crate is the protocol/state-machine side of the Wonderland
//! control panel: it opens a real-time session against the exploration
//! engine, reconstructs session state from the event stream, tracks the
//! nested goal and NPC-conversation sub-states, and exposes a small
//! observable surface to the UI and to tests.
//!
//! The CRUD pages around it talk plain request/response and live
//! elsewhere; everything here exists to keep one client-side session
//! consistent with a server-driven stream across disconnects, partial
//! initialization, and malformed or out-of-phase frames.

pub mod channel;
pub mod client;
pub mod config;
pub mod error;
pub mod hooks;
pub mod lifecycle;
pub mod session;

// =============================================================================
// Facade
// =============================================================================
pub use client::ExplorationClient;

// =============================================================================
// Configuration & Errors
// =============================================================================
pub use config::{
    ClientConfig, DEFAULT_API_URL, DEFAULT_KEEPALIVE_INTERVAL, DEFAULT_REQUEST_TIMEOUT,
};
pub use error::ClientError;

// =============================================================================
// Lifecycle Port
// =============================================================================
pub use lifecycle::{AuthContext, ExportFormat, HttpLifecycleClient, LifecyclePort, StartedSession};

#[cfg(any(test, feature = "testing"))]
pub use lifecycle::MockLifecyclePort;

// =============================================================================
// Session State
// =============================================================================
pub use session::{
    ConversationTracker, GoalTracker, PhaseObserver, SessionModel, SessionPhase, SessionState,
    CONNECTION_CLOSED_REASON,
};

// =============================================================================
// Stream Channel & Hooks
// =============================================================================
pub use channel::{ChannelHandle, ChannelSignal};
pub use hooks::{Notification, SessionHooks};
