use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::api::{PortalEndpoint, PortalRequest, PortalResponse, PortalTransport};
use crate::auth::TokenStore;
use crate::error::{FailureDisposition, PageError, PageMessages};
use crate::surface::{Destination, PageSurface};

/// Stored bearer token, or `MissingSession` when none (or a blank one) is stored.
pub fn require_token<S: TokenStore + ?Sized>(store: &S) -> Result<String, PageError> {
    store
        .load_token()
        .map_err(PageError::storage)?
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
        .ok_or(PageError::MissingSession)
}

/// Authenticated request scope shared by every guarded page.
///
/// Any non-success status on a bearer request is reported as
/// [`PageError::AuthRejected`]; the caller decides nothing about retries
/// because there are none.
pub struct PortalSession<'a, T: PortalTransport + ?Sized> {
    transport: &'a T,
    token: String,
}

impl<'a, T: PortalTransport + ?Sized> PortalSession<'a, T> {
    pub fn open<S: TokenStore + ?Sized>(transport: &'a T, store: &S) -> Result<Self, PageError> {
        let token = require_token(store)?;
        Ok(Self::with_token(transport, token))
    }

    pub fn with_token(transport: &'a T, token: impl Into<String>) -> Self {
        Self {
            transport,
            token: token.into(),
        }
    }

    pub async fn get_json<R: DeserializeOwned>(
        &self,
        endpoint: PortalEndpoint,
    ) -> Result<R, PageError> {
        let response = self.send(PortalRequest::new(endpoint)).await?;
        response.decode_json()
    }

    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        endpoint: PortalEndpoint,
        body: &B,
    ) -> Result<(), PageError> {
        let body = serde_json::to_value(body).map_err(|error| PageError::Decode {
            message: format!("failed to serialize request body: {error}"),
        })?;
        self.send(PortalRequest::new(endpoint).with_json(body))
            .await
            .map(|_| ())
    }

    async fn send(&self, request: PortalRequest) -> Result<PortalResponse, PageError> {
        let request = request.with_bearer(self.token.as_str());
        debug!(
            method = request.method().as_str(),
            path = request.path(),
            "portal request"
        );
        let response = self.transport.execute(request).await?;
        if !response.is_success() {
            return Err(PageError::AuthRejected {
                status: response.status,
                detail: response.error_detail(),
            });
        }
        Ok(response)
    }
}

/// Applies the shared failure policy: alert, then redirect for auth failures.
pub fn report_page_failure<V: PageSurface + ?Sized>(
    surface: &mut V,
    error: &PageError,
    messages: &PageMessages,
) -> FailureDisposition {
    warn!(kind = error.kind(), error = %error, "page action failed");
    let disposition = error.disposition(messages);
    surface.alert(&disposition.alert);
    if disposition.redirect_to_login {
        surface.navigate(Destination::Login);
    }
    disposition
}
