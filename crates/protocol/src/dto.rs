//! Data Transfer Objects (DTOs)
//!
//! Wire-format types for the REST-style session lifecycle calls. These
//! carry typed IDs but no business logic; conversions into client state
//! happen on the client side.

use serde::{Deserialize, Serialize};

use crate::ids::{AgentId, PresetId, SessionId};
use crate::types::{ExplorationGoal, GoalPreset};

// =============================================================================
// Preset Catalog
// =============================================================================

/// Response DTO for `GET /presets`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresetsResponse {
    pub presets: Vec<GoalPreset>,
}

// =============================================================================
// Session Lifecycle
// =============================================================================

/// Request DTO for `POST /sessions`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartSessionRequest {
    pub agent_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<AgentId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal_preset: Option<PresetId>,
}

/// Response DTO for a successful `POST /sessions` (201)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartSessionResponse {
    pub session_id: SessionId,
    /// Present when the server seeded a goal from the requested preset
    #[serde(default)]
    pub goal: Option<ExplorationGoal>,
}

/// Error body returned by the lifecycle API on 4xx/5xx
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub detail: String,
}

// =============================================================================
// Export
// =============================================================================

/// Response DTO for `GET /sessions/{id}/export`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportResponse {
    pub content: String,
}
