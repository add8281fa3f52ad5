//! Exploration client facade.
//!
//! Ties the lifecycle port, the event stream channel, and the session
//! state together behind a small imperative surface (start, end, export)
//! plus observable accessors. All stream-driven mutation funnels through
//! one dispatcher task per channel, so the reducer runs to completion on
//! each message before the next is applied.

use std::sync::atomic::AtomicU8;
use std::sync::{Arc, Mutex, MutexGuard, RwLock};

use tokio::sync::mpsc;

use wonderland_protocol::{
    AgentId, ExplorationGoal, GoalPreset, PresetId, SessionId, StartSessionRequest,
};

use crate::channel::{self, ChannelHandle, ChannelSignal};
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::hooks::{Notification, SessionHooks};
use crate::lifecycle::{AuthContext, ExportFormat, HttpLifecycleClient, LifecyclePort};
use crate::session::conversation::ConversationTracker;
use crate::session::model::SessionModel;
use crate::session::phase::{self, PhaseObserver, SessionPhase};
use crate::session::reducer;
use crate::session::state::SessionState;

/// End reason recorded when the user concludes the session locally.
const USER_REQUEST_REASON: &str = "user_request";

/// Session state plus the epoch of the channel allowed to mutate it.
///
/// Each `start` bumps the epoch, so a dispatcher still draining a prior
/// channel's signals can never touch the new session's state.
struct Runtime {
    state: SessionState,
    epoch: u64,
}

/// The open channel and the epoch it belongs to.
struct ChannelSlot {
    epoch: u64,
    handle: ChannelHandle,
}

/// Client for live exploration sessions against the Wonderland engine.
///
/// Cheap to clone; clones share the same session state, auth context, and
/// channel. Exactly one channel is open at a time: starting a new session
/// closes and discards the prior one first.
#[derive(Clone)]
pub struct ExplorationClient {
    config: ClientConfig,
    api: Arc<dyn LifecyclePort>,
    auth: Arc<RwLock<Option<AuthContext>>>,
    runtime: Arc<Mutex<Runtime>>,
    phase_cell: Arc<AtomicU8>,
    hooks: Arc<SessionHooks>,
    channel: Arc<Mutex<Option<ChannelSlot>>>,
}

impl ExplorationClient {
    pub fn new(config: ClientConfig) -> Self {
        let api = Arc::new(HttpLifecycleClient::new(&config));
        Self::with_port(config, api)
    }

    /// Construct with a custom lifecycle port (tests, alternate transports).
    pub fn with_port(config: ClientConfig, api: Arc<dyn LifecyclePort>) -> Self {
        Self {
            config,
            api,
            auth: Arc::new(RwLock::new(None)),
            runtime: Arc::new(Mutex::new(Runtime {
                state: SessionState::default(),
                epoch: 0,
            })),
            phase_cell: Arc::new(AtomicU8::new(SessionPhase::Idle.to_u8())),
            hooks: Arc::new(SessionHooks::default()),
            channel: Arc::new(Mutex::new(None)),
        }
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    pub fn set_auth(&self, auth: AuthContext) {
        *write_lock(&self.auth) = Some(auth);
    }

    pub fn clear_auth(&self) {
        *write_lock(&self.auth) = None;
    }

    fn auth_context(&self) -> Option<AuthContext> {
        read_lock(&self.auth).clone()
    }

    // =========================================================================
    // Imperative actions
    // =========================================================================

    /// Fetch the goal preset catalog.
    ///
    /// Presets are optional UX: a failure yields an empty catalog and a
    /// log line, never a session-blocking error.
    pub async fn fetch_presets(&self) -> Vec<GoalPreset> {
        match self.api.fetch_presets().await {
            Ok(presets) => presets,
            Err(e) => {
                tracing::warn!("Failed to fetch goal presets: {}", e);
                Vec::new()
            }
        }
    }

    /// Start a new exploration session, discarding any previously tracked
    /// one. On success the phase is `connecting` and the stream channel is
    /// being attached; on failure the phase is `error`.
    pub async fn start(
        &self,
        agent_name: &str,
        agent_id: Option<AgentId>,
        goal_preset: Option<PresetId>,
    ) -> Result<SessionId, ClientError> {
        let Some(auth) = self.auth_context() else {
            return Err(ClientError::NotAuthenticated);
        };

        // The previous session's channel must be gone before the new
        // session takes over the state.
        self.close_channel();

        let request = StartSessionRequest {
            agent_name: agent_name.to_string(),
            agent_id,
            goal_preset,
        };

        let started = match self.api.start_session(auth.clone(), request).await {
            Ok(started) => started,
            Err(e) => {
                {
                    let mut rt = lock(&self.runtime);
                    rt.epoch += 1;
                    rt.state = SessionState::Error {
                        session: None,
                        message: e.to_string(),
                    };
                    phase::publish_phase(&self.phase_cell, SessionPhase::Error);
                }
                self.hooks
                    .notify(&Notification::PhaseChanged(SessionPhase::Error));
                return Err(e);
            }
        };

        let epoch = {
            let mut rt = lock(&self.runtime);
            rt.epoch += 1;
            rt.state.begin(SessionModel::pending(
                started.session_id,
                auth.user_id,
                agent_name,
                agent_id,
                started.goal,
            ));
            phase::publish_phase(&self.phase_cell, SessionPhase::Connecting);
            rt.epoch
        };
        self.hooks
            .notify(&Notification::PhaseChanged(SessionPhase::Connecting));

        let url = self.config.stream_url(started.session_id);
        let (handle, signals) = channel::connect(url, self.config.keepalive_interval);
        *lock(&self.channel) = Some(ChannelSlot { epoch, handle });
        self.spawn_dispatcher(signals, epoch);

        Ok(started.session_id)
    }

    /// Conclude the tracked session.
    ///
    /// Idempotent: ending an already-ended (or never-started) session is a
    /// no-op with no further REST side effects. The local view of "ended"
    /// is authoritative; a failed server acknowledgment is only logged.
    pub async fn end(&self) {
        let (session_id, changed) = {
            let mut rt = lock(&self.runtime);
            let session_id = rt.state.session().map(|session| session.id);
            let changed = rt.state.conclude(USER_REQUEST_REASON);
            if changed {
                phase::publish_phase(&self.phase_cell, SessionPhase::Ended);
            }
            (session_id, changed)
        };

        if !changed {
            return;
        }

        self.hooks
            .notify(&Notification::PhaseChanged(SessionPhase::Ended));
        self.close_channel();

        if let (Some(auth), Some(session_id)) = (self.auth_context(), session_id) {
            if let Err(e) = self
                .api
                .end_session(auth, session_id, USER_REQUEST_REASON.to_string())
                .await
            {
                tracing::warn!("Failed to end session on server: {}", e);
            }
        }
    }

    /// Request a rendered transcript of the tracked session.
    ///
    /// Returns `None` before any session exists or on any failure; the
    /// caller decides the UI treatment.
    pub async fn export(&self, format: ExportFormat) -> Option<String> {
        let Some(auth) = self.auth_context() else {
            tracing::warn!("Export requested without authentication");
            return None;
        };
        let session_id = lock(&self.runtime).state.session().map(|s| s.id);
        let Some(session_id) = session_id else {
            tracing::warn!("Export requested before any session exists");
            return None;
        };

        match self.api.export_session(auth, session_id, format).await {
            Ok(content) => Some(content),
            Err(e) => {
                tracing::warn!("Export failed: {}", e);
                None
            }
        }
    }

    // =========================================================================
    // Observable surface
    // =========================================================================

    pub fn phase(&self) -> SessionPhase {
        self.phase_observer().phase()
    }

    /// Lock-free phase observer for UI binding.
    pub fn phase_observer(&self) -> PhaseObserver {
        PhaseObserver::new(Arc::clone(&self.phase_cell))
    }

    /// Snapshot clone of the tracked session, if any.
    pub fn session(&self) -> Option<SessionModel> {
        lock(&self.runtime).state.session().cloned()
    }

    pub fn current_room(&self) -> Option<String> {
        lock(&self.runtime)
            .state
            .session()
            .and_then(|session| session.current_room.clone())
    }

    pub fn goal(&self) -> Option<ExplorationGoal> {
        lock(&self.runtime)
            .state
            .session()
            .and_then(|session| session.goal.current().cloned())
    }

    /// The conversation tracker; `Inactive` outside an active session.
    pub fn conversation(&self) -> ConversationTracker {
        lock(&self.runtime)
            .state
            .conversation()
            .cloned()
            .unwrap_or_default()
    }

    /// Human-readable message for the `error` phase.
    pub fn error_message(&self) -> Option<String> {
        match &lock(&self.runtime).state {
            SessionState::Error { message, .. } => Some(message.clone()),
            _ => None,
        }
    }

    /// Notification hook registry.
    pub fn hooks(&self) -> &SessionHooks {
        &self.hooks
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn close_channel(&self) {
        if let Some(slot) = lock(&self.channel).take() {
            slot.handle.close();
        }
    }

    fn spawn_dispatcher(&self, mut signals: mpsc::Receiver<ChannelSignal>, epoch: u64) {
        let runtime = Arc::clone(&self.runtime);
        let phase_cell = Arc::clone(&self.phase_cell);
        let hooks = Arc::clone(&self.hooks);
        let channel = Arc::clone(&self.channel);

        tokio::spawn(async move {
            while let Some(signal) = signals.recv().await {
                let mut notifications = Vec::new();
                let terminal = {
                    let mut rt = lock(&runtime);
                    if rt.epoch != epoch {
                        // A newer session owns the state now
                        break;
                    }
                    reducer::apply_signal(&mut rt.state, signal, &mut notifications);
                    phase::publish_phase(&phase_cell, rt.state.phase());
                    rt.state.phase().is_terminal()
                };
                // Hooks run outside the state lock so they may re-enter
                // accessors without deadlock.
                for notification in &notifications {
                    hooks.notify(notification);
                }
                if terminal {
                    // The session concluded; stop the keepalive and drop
                    // the socket. Epoch check keeps a newer session's
                    // channel untouched.
                    let mut guard = lock(&channel);
                    if guard.as_ref().is_some_and(|slot| slot.epoch == epoch) {
                        if let Some(slot) = guard.take() {
                            slot.handle.close();
                        }
                    }
                    break;
                }
            }
        });
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

fn read_lock<T>(rwlock: &RwLock<T>) -> std::sync::RwLockReadGuard<'_, T> {
    rwlock
        .read()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}

fn write_lock<T>(rwlock: &RwLock<T>) -> std::sync::RwLockWriteGuard<'_, T> {
    rwlock
        .write()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::MockLifecyclePort;
    use wonderland_protocol::UserId;

    fn client_with(mock: MockLifecyclePort) -> ExplorationClient {
        ExplorationClient::with_port(ClientConfig::default(), Arc::new(mock))
    }

    fn auth() -> AuthContext {
        AuthContext::new("token", UserId::new())
    }

    #[tokio::test]
    async fn test_start_without_auth_is_rejected_before_any_request() {
        // No expectations set: a lifecycle call would panic the mock
        let client = client_with(MockLifecyclePort::new());

        let result = client.start("Alice", None, None).await;
        assert!(matches!(result, Err(ClientError::NotAuthenticated)));
        assert_eq!(client.phase(), SessionPhase::Idle);
    }

    #[tokio::test]
    async fn test_start_failure_sets_error_phase_with_message() {
        let mut mock = MockLifecyclePort::new();
        mock.expect_start_session()
            .returning(|_, _| Err(ClientError::StartFailed("no capacity".to_string())));

        let client = client_with(mock);
        client.set_auth(auth());

        let result = client.start("Alice", None, None).await;
        assert!(matches!(result, Err(ClientError::StartFailed(_))));
        assert_eq!(client.phase(), SessionPhase::Error);
        assert!(client
            .error_message()
            .is_some_and(|message| message.contains("no capacity")));
        assert!(client.session().is_none());
    }

    #[tokio::test]
    async fn test_end_before_start_is_a_noop() {
        // No expectations: end must not issue a REST call from idle
        let client = client_with(MockLifecyclePort::new());
        client.set_auth(auth());

        client.end().await;
        assert_eq!(client.phase(), SessionPhase::Idle);
    }

    #[tokio::test]
    async fn test_export_before_session_returns_none() {
        let client = client_with(MockLifecyclePort::new());
        client.set_auth(auth());

        assert!(client.export(ExportFormat::Markdown).await.is_none());
    }

    #[tokio::test]
    async fn test_fetch_presets_failure_yields_empty_catalog() {
        let mut mock = MockLifecyclePort::new();
        mock.expect_fetch_presets()
            .returning(|| Err(ClientError::Transport("connection refused".to_string())));

        let client = client_with(mock);
        assert!(client.fetch_presets().await.is_empty());
    }
}
