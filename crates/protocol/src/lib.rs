//! Wonderland Protocol - Shared types for engine and client communication
//!
//! This crate contains all types that cross the wire between the Wonderland
//! exploration engine and its clients:
//! - Wire-format DTOs (REST lifecycle calls)
//! - Stream message types (ClientMessage, ServerMessage)
//! - Shared vocabulary types (events, goals, conversations, snapshots)
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - Only serde, uuid, chrono, and serde_json
//! 2. **No business logic** - Pure data types and serialization

pub mod dto;
pub mod ids;
pub mod messages;
pub mod types;

// =============================================================================
// Identifiers
// =============================================================================
pub use ids::{AgentId, EventId, GoalId, PresetId, SessionId, UserId};

// =============================================================================
// Stream Message Types
// =============================================================================
pub use messages::{ClientMessage, ServerMessage};

// =============================================================================
// Shared Types
// =============================================================================
pub use types::{
    ConversationMessage, EventKind, ExplorationEvent, ExplorationGoal, GoalPreset,
    SessionSnapshot, SessionStatus,
};

// =============================================================================
// DTOs
// =============================================================================
pub use dto::{
    ErrorDetail, ExportResponse, PresetsResponse, StartSessionRequest, StartSessionResponse,
};
