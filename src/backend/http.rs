//! HTTP implementation of the collaborator seam.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use super::{AssignmentBackend, BackendError};
use crate::config::ClientConfig;
use crate::models::{AssignmentRequest, AssignmentResult, TechnicianLoad};

/// Scoring endpoint.
pub const RECOMMENDATION_PATH: &str = "/api/interventions/recommendation";

/// Technician load endpoint.
pub const TECHNICIAN_LOAD_PATH: &str = "/api/dashboard/technician-load";

/// Talks to the collaborator API over HTTP with JSON bodies.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
    auth_token: Option<String>,
}

impl HttpBackend {
    /// Builds a backend from connection settings.
    pub fn new(config: &ClientConfig) -> Result<Self, BackendError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(Self::with_client(client, config))
    }

    /// Builds a backend around an existing `reqwest::Client`.
    pub fn with_client(client: Client, config: &ClientConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            auth_token: config.auth_token.clone(),
        }
    }

    /// API origin used for every call.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.auth_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, BackendError> {
        let status = response.status();
        let body = response.bytes().await?;
        if !status.is_success() {
            let err = BackendError::from_status(status.as_u16(), &body);
            warn!(status = status.as_u16(), error = %err, "collaborator call failed");
            return Err(err);
        }
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl AssignmentBackend for HttpBackend {
    #[instrument(skip(self, request), fields(intervention_id = ?request.intervention_id))]
    async fn recommend(
        &self,
        request: &AssignmentRequest,
    ) -> Result<AssignmentResult, BackendError> {
        let response = self
            .authorize(self.client.post(self.endpoint(RECOMMENDATION_PATH)))
            .json(request)
            .send()
            .await?;
        let result: AssignmentResult = Self::read_json(response).await?;
        debug!(
            recommended = result.recommended.technician_id,
            alternatives = result.alternatives.len(),
            "recommendation received"
        );
        Ok(result)
    }

    #[instrument(skip(self))]
    async fn technician_load(&self) -> Result<Vec<TechnicianLoad>, BackendError> {
        let response = self
            .authorize(self.client.get(self.endpoint(TECHNICIAN_LOAD_PATH)))
            .send()
            .await?;
        Self::read_json(response).await
    }

    fn name(&self) -> &str {
        "HttpBackend"
    }
}
