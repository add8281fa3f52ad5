//! HTTP adapter for the session lifecycle API.

use async_trait::async_trait;
use reqwest::Client;

use wonderland_protocol::{
    ErrorDetail, ExportResponse, GoalPreset, PresetsResponse, SessionId, StartSessionRequest,
    StartSessionResponse,
};

use crate::config::ClientConfig;
use crate::error::ClientError;

use super::{AuthContext, ExportFormat, LifecyclePort, StartedSession};

/// Client for the lifecycle REST endpoints.
#[derive(Clone)]
pub struct HttpLifecycleClient {
    client: Client,
    base_url: String,
}

impl HttpLifecycleClient {
    pub fn new(config: &ClientConfig) -> Self {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
        }
    }

    /// Read the error detail the server attached, falling back to the
    /// status line when the body is not the documented shape.
    async fn error_detail(response: reqwest::Response) -> String {
        let status = response.status();
        match response.json::<ErrorDetail>().await {
            Ok(body) => body.detail,
            Err(_) => format!("HTTP {status}"),
        }
    }
}

#[async_trait]
impl LifecyclePort for HttpLifecycleClient {
    async fn fetch_presets(&self) -> Result<Vec<GoalPreset>, ClientError> {
        let response = self
            .client
            .get(format!("{}/presets", self.base_url))
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ClientError::Transport(Self::error_detail(response).await));
        }

        let body: PresetsResponse = response
            .json()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        Ok(body.presets)
    }

    async fn start_session(
        &self,
        auth: AuthContext,
        request: StartSessionRequest,
    ) -> Result<StartedSession, ClientError> {
        let response = self
            .client
            .post(format!("{}/sessions", self.base_url))
            .bearer_auth(&auth.token)
            .json(&request)
            .send()
            .await
            .map_err(|e| ClientError::StartFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ClientError::StartFailed(Self::error_detail(response).await));
        }

        let body: StartSessionResponse = response
            .json()
            .await
            .map_err(|e| ClientError::StartFailed(e.to_string()))?;
        Ok(StartedSession {
            session_id: body.session_id,
            goal: body.goal,
        })
    }

    async fn end_session(
        &self,
        auth: AuthContext,
        session_id: SessionId,
        reason: String,
    ) -> Result<(), ClientError> {
        let response = self
            .client
            .post(format!("{}/sessions/{}/end", self.base_url, session_id))
            .bearer_auth(&auth.token)
            .query(&[("reason", reason.as_str())])
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ClientError::Transport(Self::error_detail(response).await));
        }
        Ok(())
    }

    async fn export_session(
        &self,
        auth: AuthContext,
        session_id: SessionId,
        format: ExportFormat,
    ) -> Result<String, ClientError> {
        let response = self
            .client
            .get(format!("{}/sessions/{}/export", self.base_url, session_id))
            .bearer_auth(&auth.token)
            .query(&[("format", format.as_query())])
            .send()
            .await
            .map_err(|e| ClientError::ExportFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ClientError::ExportFailed(Self::error_detail(response).await));
        }

        let body: ExportResponse = response
            .json()
            .await
            .map_err(|e| ClientError::ExportFailed(e.to_string()))?;
        Ok(body.content)
    }
}
