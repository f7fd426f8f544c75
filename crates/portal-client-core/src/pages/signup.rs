use tracing::warn;

use crate::api::{PortalEndpoint, PortalRequest, PortalTransport};
use crate::auth::SignupRequest;
use crate::error::PageError;
use crate::models::ApiErrorBody;
use crate::pages::login::SERVER_ERROR;
use crate::surface::{Destination, Input, PageSurface, Region};

pub const SIGNUP_SUCCEEDED: &str = "Account created. Please log in.";
pub const SIGNUP_FAILED: &str = "Signup failed.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignupOutcome {
    InvalidInput,
    Rejected { message: String },
    ServerError,
    Created,
}

pub async fn submit_signup<T, V>(transport: &T, surface: &mut V) -> SignupOutcome
where
    T: PortalTransport + ?Sized,
    V: PageSurface + ?Sized,
{
    let request = match SignupRequest::from_input(
        &surface.read_input(Input::Name),
        &surface.read_input(Input::Email),
        &surface.read_input(Input::Password),
    ) {
        Ok(request) => request,
        Err(error) => {
            surface.set_text(Region::MessageArea, &error.to_string());
            return SignupOutcome::InvalidInput;
        }
    };

    match register(transport, &request).await {
        Ok(None) => {
            surface.set_text(Region::MessageArea, SIGNUP_SUCCEEDED);
            surface.navigate(Destination::Login);
            SignupOutcome::Created
        }
        Ok(Some(message)) => {
            surface.set_text(Region::MessageArea, &message);
            SignupOutcome::Rejected { message }
        }
        Err(error) => {
            warn!(kind = error.kind(), error = %error, "signup failed");
            surface.set_text(Region::MessageArea, SERVER_ERROR);
            SignupOutcome::ServerError
        }
    }
}

/// `Ok(None)` on success, `Ok(Some(message))` when the backend refused.
async fn register<T: PortalTransport + ?Sized>(
    transport: &T,
    request: &SignupRequest,
) -> Result<Option<String>, PageError> {
    let body = serde_json::to_value(request).map_err(|error| PageError::Decode {
        message: format!("failed to serialize signup request: {error}"),
    })?;
    let response = transport
        .execute(PortalRequest::new(PortalEndpoint::Signup).with_json(body))
        .await?;
    if response.is_success() {
        return Ok(None);
    }
    let body: ApiErrorBody = response.decode_json()?;
    Ok(Some(
        body.detail_text()
            .unwrap_or_else(|| SIGNUP_FAILED.to_string()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::RequestBody;
    use crate::testing::{RecordingSurface, StubTransport};
    use serde_json::json;

    fn filled_form() -> RecordingSurface {
        RecordingSurface::default()
            .with_input(Input::Name, "Ada")
            .with_input(Input::Email, "ada@example.org")
            .with_input(Input::Password, "pw")
    }

    #[tokio::test]
    async fn created_account_redirects_to_login() {
        let transport = StubTransport::new().respond_json(
            PortalEndpoint::Signup,
            200,
            json!({ "msg": "User created successfully" }),
        );
        let mut surface = filled_form();

        let outcome = submit_signup(&transport, &mut surface).await;

        assert_eq!(outcome, SignupOutcome::Created);
        assert_eq!(surface.navigations(), vec![Destination::Login]);
        assert_eq!(
            transport.requests()[0].body,
            RequestBody::Json(json!({
                "email": "ada@example.org",
                "password": "pw",
                "name": "Ada",
                "is_admin": false
            }))
        );
    }

    #[tokio::test]
    async fn duplicate_email_shows_detail() {
        let transport = StubTransport::new().respond_json(
            PortalEndpoint::Signup,
            400,
            json!({ "detail": "Email already registered" }),
        );
        let mut surface = filled_form();

        let outcome = submit_signup(&transport, &mut surface).await;

        assert_eq!(
            outcome,
            SignupOutcome::Rejected {
                message: "Email already registered".to_string()
            }
        );
        assert!(surface.navigations().is_empty());
    }

    #[tokio::test]
    async fn missing_name_is_rejected_locally() {
        let transport = StubTransport::new();
        let mut surface = RecordingSurface::default()
            .with_input(Input::Email, "ada@example.org")
            .with_input(Input::Password, "pw");

        let outcome = submit_signup(&transport, &mut surface).await;

        assert_eq!(outcome, SignupOutcome::InvalidInput);
        assert!(transport.requests().is_empty());
    }
}
