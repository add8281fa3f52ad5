//! Unified error type for the exploration client
//!
//! Transport and decode errors are handled locally (logged and dropped or
//! mapped to the `error` phase); the variants here are the only failures
//! that cross a component boundary.

use thiserror::Error;

/// Unified error type for client operations
#[derive(Debug, Error, Clone)]
pub enum ClientError {
    /// No authentication context is set; blocks `start`
    #[error("Not authenticated")]
    NotAuthenticated,

    /// The server rejected session creation
    #[error("Session start failed: {0}")]
    StartFailed(String),

    /// The event stream failed at the transport level
    #[error("Event stream failed: {0}")]
    Channel(String),

    /// Transcript export failed (transport or server)
    #[error("Export failed: {0}")]
    ExportFailed(String),

    /// A lifecycle request failed in transit; the facade converts this
    /// per-operation (presets: empty catalog, end: swallowed)
    #[error("Lifecycle request failed: {0}")]
    Transport(String),
}
