use std::time::Duration;

use async_trait::async_trait;
use portal_client_core::api::{
    HttpMethod, PortalRequest, PortalResponse, PortalTransport, RequestBody, TransportError,
    endpoint_url,
};
use portal_client_core::auth::{BaseUrlError, normalize_base_url};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Clone)]
pub struct HttpTransportConfig {
    pub base_url: String,
    pub timeout_ms: u64,
}

impl HttpTransportConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

#[derive(Debug, Error)]
pub enum HttpTransportError {
    #[error(transparent)]
    BaseUrl(#[from] BaseUrlError),
    #[error("failed to build http client: {message}")]
    Client { message: String },
}

/// `reqwest` implementation of [`PortalTransport`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: String,
    timeout: Duration,
    http: reqwest::Client,
}

impl HttpTransport {
    pub fn new(config: HttpTransportConfig) -> Result<Self, HttpTransportError> {
        let base_url = normalize_base_url(&config.base_url)?;
        let http = reqwest::Client::builder()
            .build()
            .map_err(|error| HttpTransportError::Client {
                message: error.to_string(),
            })?;
        Ok(Self {
            base_url,
            timeout: Duration::from_millis(config.timeout_ms.max(250)),
            http,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        endpoint_url(&self.base_url, path)
    }
}

#[async_trait(?Send)]
impl PortalTransport for HttpTransport {
    async fn execute(&self, request: PortalRequest) -> Result<PortalResponse, TransportError> {
        let url = self.endpoint(request.path());
        let request_id = format!("req_{}", Uuid::new_v4().simple());
        debug!(
            method = request.method().as_str(),
            url = %url,
            request_id = %request_id,
            "sending portal request"
        );

        let mut builder = match request.method() {
            HttpMethod::Get => self.http.get(url.as_str()),
            HttpMethod::Post => self.http.post(url.as_str()),
        }
        .header("x-request-id", request_id)
        .timeout(self.timeout);

        if let Some(token) = request.bearer.as_deref() {
            builder = builder.bearer_auth(token);
        }
        builder = match &request.body {
            RequestBody::Empty => builder,
            RequestBody::Form(fields) => builder.form(fields),
            RequestBody::Json(value) => builder.json(value),
        };

        let response = builder
            .send()
            .await
            .map_err(|error| TransportError::new(format!("request failed: {error}")))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|error| TransportError::new(format!("failed to read response: {error}")))?;
        Ok(PortalResponse::new(status, body))
    }
}
