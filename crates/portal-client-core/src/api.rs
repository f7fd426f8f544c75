use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::error::PageError;
use crate::models::ApiErrorBody;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

/// Every backend route the portal pages consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortalEndpoint {
    Login,
    Signup,
    Me,
    Content,
    MemberDashboard,
    MemberEvents,
    MemberMessages,
    SendMessage,
    AdminStats,
    AdminMembers,
}

impl PortalEndpoint {
    #[must_use]
    pub fn method(self) -> HttpMethod {
        match self {
            Self::Login | Self::Signup | Self::SendMessage => HttpMethod::Post,
            Self::Me
            | Self::Content
            | Self::MemberDashboard
            | Self::MemberEvents
            | Self::MemberMessages
            | Self::AdminStats
            | Self::AdminMembers => HttpMethod::Get,
        }
    }

    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Signup => "/signup",
            Self::Me => "/me",
            Self::Content => "/content",
            Self::MemberDashboard => "/member/dashboard",
            Self::MemberEvents => "/member/events",
            Self::MemberMessages | Self::SendMessage => "/member/messages",
            Self::AdminStats => "/admin/stats",
            Self::AdminMembers => "/admin/members",
        }
    }

    #[must_use]
    pub fn requires_bearer(self) -> bool {
        !matches!(self, Self::Login | Self::Signup)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Form(Vec<(String, String)>),
    Json(serde_json::Value),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PortalRequest {
    pub endpoint: PortalEndpoint,
    pub body: RequestBody,
    pub bearer: Option<String>,
}

impl PortalRequest {
    #[must_use]
    pub fn new(endpoint: PortalEndpoint) -> Self {
        Self {
            endpoint,
            body: RequestBody::Empty,
            bearer: None,
        }
    }

    #[must_use]
    pub fn with_bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }

    #[must_use]
    pub fn with_form(mut self, fields: Vec<(String, String)>) -> Self {
        self.body = RequestBody::Form(fields);
        self
    }

    #[must_use]
    pub fn with_json(mut self, value: serde_json::Value) -> Self {
        self.body = RequestBody::Json(value);
        self
    }

    #[must_use]
    pub fn method(&self) -> HttpMethod {
        self.endpoint.method()
    }

    #[must_use]
    pub fn path(&self) -> &'static str {
        self.endpoint.path()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalResponse {
    pub status: u16,
    pub body: String,
}

impl PortalResponse {
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }

    /// `detail` from a `{"detail": ...}` error body, when the body has one.
    #[must_use]
    pub fn error_detail(&self) -> Option<String> {
        serde_json::from_str::<ApiErrorBody>(&self.body)
            .ok()
            .and_then(|body| body.detail_text())
    }

    pub fn decode_json<T: DeserializeOwned>(&self) -> Result<T, PageError> {
        serde_json::from_str(&self.body).map_err(|error| PageError::Decode {
            message: error.to_string(),
        })
    }
}

/// The request could not complete: connection refused, DNS, timeout, or an
/// unreadable body.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// One request, one response; any HTTP status is a response, not an error.
///
/// Futures are not required to be `Send` so the browser fetch binding can
/// implement this trait.
#[async_trait(?Send)]
pub trait PortalTransport {
    async fn execute(&self, request: PortalRequest) -> Result<PortalResponse, TransportError>;
}

#[must_use]
pub fn endpoint_url(base_url: &str, path: &str) -> String {
    let base_url = base_url.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{base_url}{path}")
    } else {
        format!("{base_url}/{path}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_table_matches_backend_routes() {
        assert_eq!(PortalEndpoint::Login.path(), "/login");
        assert_eq!(PortalEndpoint::Login.method(), HttpMethod::Post);
        assert!(!PortalEndpoint::Login.requires_bearer());
        assert!(!PortalEndpoint::Signup.requires_bearer());

        assert_eq!(PortalEndpoint::MemberMessages.path(), "/member/messages");
        assert_eq!(PortalEndpoint::MemberMessages.method(), HttpMethod::Get);
        assert_eq!(PortalEndpoint::SendMessage.path(), "/member/messages");
        assert_eq!(PortalEndpoint::SendMessage.method(), HttpMethod::Post);
        assert!(PortalEndpoint::SendMessage.requires_bearer());
        assert!(PortalEndpoint::AdminMembers.requires_bearer());
    }

    #[test]
    fn endpoint_url_joins_without_double_slash() {
        assert_eq!(
            endpoint_url("http://127.0.0.1:8000/", "/content"),
            "http://127.0.0.1:8000/content"
        );
        assert_eq!(
            endpoint_url("http://127.0.0.1:8000", "member/events"),
            "http://127.0.0.1:8000/member/events"
        );
    }

    #[test]
    fn error_detail_ignores_missing_or_blank_detail() {
        let response = PortalResponse::new(401, r#"{"detail":"Invalid credentials"}"#);
        assert_eq!(response.error_detail().as_deref(), Some("Invalid credentials"));
        assert_eq!(PortalResponse::new(500, "oops").error_detail(), None);
        assert_eq!(PortalResponse::new(400, r#"{"detail":" "}"#).error_detail(), None);
    }

    #[test]
    fn decode_failure_maps_to_decode_error() {
        let response = PortalResponse::new(200, "<html>");
        let error = response
            .decode_json::<serde_json::Value>()
            .expect_err("html is not json");
        assert!(matches!(error, PageError::Decode { .. }));
    }
}
