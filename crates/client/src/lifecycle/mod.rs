//! Session lifecycle port.
//!
//! The REST-style calls (presets, start, end, export) sit behind a trait
//! so the facade can be exercised against a mock. The HTTP adapter lives
//! in [`http`].

use async_trait::async_trait;

use wonderland_protocol::{
    ExplorationGoal, GoalPreset, SessionId, StartSessionRequest, UserId,
};

use crate::error::ClientError;

pub mod http;

pub use http::HttpLifecycleClient;

/// Authentication context required to start a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    /// Bearer token attached to lifecycle requests
    pub token: String,
    /// The user the session is started for
    pub user_id: UserId,
}

impl AuthContext {
    pub fn new(token: impl Into<String>, user_id: UserId) -> Self {
        Self {
            token: token.into(),
            user_id,
        }
    }
}

/// Transcript rendering requested from the export endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Markdown,
    Json,
}

impl ExportFormat {
    /// Value of the `format` query parameter.
    pub fn as_query(self) -> &'static str {
        match self {
            ExportFormat::Markdown => "md",
            ExportFormat::Json => "json",
        }
    }
}

/// A successfully created session.
#[derive(Debug, Clone, PartialEq)]
pub struct StartedSession {
    pub session_id: SessionId,
    /// Goal the server seeded from the requested preset, if any
    pub goal: Option<ExplorationGoal>,
}

/// Port for the REST-style session lifecycle calls.
///
/// Methods take owned arguments for mockall compatibility. Failure policy
/// (empty catalog for presets, swallowed errors for end) belongs to the
/// facade, not the adapter.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait LifecyclePort: Send + Sync {
    /// Fetch the goal preset catalog.
    async fn fetch_presets(&self) -> Result<Vec<GoalPreset>, ClientError>;

    /// Create a session for the authenticated user.
    async fn start_session(
        &self,
        auth: AuthContext,
        request: StartSessionRequest,
    ) -> Result<StartedSession, ClientError>;

    /// Ask the server to conclude a session. Best-effort from the caller's
    /// point of view.
    async fn end_session(
        &self,
        auth: AuthContext,
        session_id: SessionId,
        reason: String,
    ) -> Result<(), ClientError>;

    /// Request a rendered transcript.
    async fn export_session(
        &self,
        auth: AuthContext,
        session_id: SessionId,
        format: ExportFormat,
    ) -> Result<String, ClientError>;
}
