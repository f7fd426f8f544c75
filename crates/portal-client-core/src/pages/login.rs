use tracing::{info, warn};

use crate::api::{PortalEndpoint, PortalRequest, PortalTransport};
use crate::auth::{LoginCredentials, TokenStore};
use crate::error::PageError;
use crate::models::{ApiErrorBody, Identity, LoginResponse};
use crate::session::PortalSession;
use crate::surface::{Destination, Input, PageSurface, Region};

pub const LOGIN_IN_PROGRESS: &str = "Logging in...";
pub const LOGIN_FAILED: &str = "Login failed.";
pub const SERVER_ERROR: &str = "Server error. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// A field was empty; nothing was sent.
    InvalidInput,
    /// The backend refused the credentials.
    Rejected { message: String },
    ServerError,
    Redirected {
        destination: Destination,
        identity: Identity,
    },
}

enum LoginFailure {
    Rejected(String),
    Server(PageError),
}

/// Login form submit. All feedback goes to the message area; the only
/// navigation is the role-based redirect after a successful login.
pub async fn submit_login<T, S, V>(transport: &T, store: &S, surface: &mut V) -> LoginOutcome
where
    T: PortalTransport + ?Sized,
    S: TokenStore + ?Sized,
    V: PageSurface + ?Sized,
{
    let email = surface.read_input(Input::Email);
    let password = surface.read_input(Input::Password);
    let credentials = match LoginCredentials::from_input(&email, &password) {
        Ok(credentials) => credentials,
        Err(error) => {
            surface.set_text(Region::MessageArea, &error.to_string());
            return LoginOutcome::InvalidInput;
        }
    };

    surface.set_text(Region::MessageArea, LOGIN_IN_PROGRESS);

    match authenticate(transport, store, &credentials).await {
        Ok(identity) => {
            let destination = if identity.is_admin {
                Destination::AdminDashboard
            } else {
                Destination::MemberDashboard
            };
            info!(destination = destination.path(), "login succeeded");
            surface.navigate(destination);
            LoginOutcome::Redirected {
                destination,
                identity,
            }
        }
        Err(LoginFailure::Rejected(message)) => {
            surface.set_text(Region::MessageArea, &message);
            LoginOutcome::Rejected { message }
        }
        Err(LoginFailure::Server(error)) => {
            warn!(kind = error.kind(), error = %error, "login failed");
            surface.set_text(Region::MessageArea, SERVER_ERROR);
            LoginOutcome::ServerError
        }
    }
}

async fn authenticate<T, S>(
    transport: &T,
    store: &S,
    credentials: &LoginCredentials,
) -> Result<Identity, LoginFailure>
where
    T: PortalTransport + ?Sized,
    S: TokenStore + ?Sized,
{
    let request = PortalRequest::new(PortalEndpoint::Login).with_form(credentials.form_fields());
    let response = transport
        .execute(request)
        .await
        .map_err(|error| LoginFailure::Server(error.into()))?;

    if !response.is_success() {
        let body: ApiErrorBody = response.decode_json().map_err(LoginFailure::Server)?;
        let message = body
            .detail_text()
            .unwrap_or_else(|| LOGIN_FAILED.to_string());
        return Err(LoginFailure::Rejected(message));
    }

    let login: LoginResponse = response.decode_json().map_err(LoginFailure::Server)?;
    store
        .persist_token(&login.access_token)
        .map_err(|error| LoginFailure::Server(PageError::storage(error)))?;

    PortalSession::with_token(transport, login.access_token)
        .get_json(PortalEndpoint::Me)
        .await
        .map_err(LoginFailure::Server)
}
