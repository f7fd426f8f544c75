use serde::Serialize;

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";
pub const ENV_API_BASE_URL: &str = "PORTAL_API_BASE_URL";
pub const TOKEN_STORAGE_KEY: &str = "token";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BaseUrlError {
    #[error("base url must not be empty")]
    EmptyBaseUrl,
    #[error("base url must use http:// or https:// and include a host")]
    InvalidBaseUrl,
}

/// Inline validation failures of the login form. The display text is what
/// the message area shows.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginInputError {
    #[error("Please enter both email and password.")]
    MissingCredentials,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignupInputError {
    #[error("Please fill in all fields.")]
    MissingFields,
}

/// Client-side home of the single bearer token.
///
/// Implementations take `&self`; browser storage and files are shared
/// handles, so interior mutability is expected.
pub trait TokenStore {
    type Error: std::fmt::Display;

    fn load_token(&self) -> Result<Option<String>, Self::Error>;
    fn persist_token(&self, token: &str) -> Result<(), Self::Error>;
    fn clear_token(&self) -> Result<(), Self::Error>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

impl LoginCredentials {
    pub fn from_input(email: &str, password: &str) -> Result<Self, LoginInputError> {
        let email = email.trim();
        let password = password.trim();
        if email.is_empty() || password.is_empty() {
            return Err(LoginInputError::MissingCredentials);
        }
        Ok(Self {
            email: email.to_string(),
            password: password.to_string(),
        })
    }

    /// Form fields of `POST /login`. The backend expects the email under
    /// `username`.
    #[must_use]
    pub fn form_fields(&self) -> Vec<(String, String)> {
        vec![
            ("username".to_string(), self.email.clone()),
            ("password".to_string(), self.password.clone()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub is_admin: bool,
}

impl SignupRequest {
    pub fn from_input(name: &str, email: &str, password: &str) -> Result<Self, SignupInputError> {
        let name = name.trim();
        let email = email.trim();
        let password = password.trim();
        if name.is_empty() || email.is_empty() || password.is_empty() {
            return Err(SignupInputError::MissingFields);
        }
        Ok(Self {
            email: email.to_string(),
            password: password.to_string(),
            name: name.to_string(),
            is_admin: false,
        })
    }
}

/// Trims whitespace and trailing slashes; the scheme must be http(s) and a
/// host must follow it.
pub fn normalize_base_url(raw: &str) -> Result<String, BaseUrlError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(BaseUrlError::EmptyBaseUrl);
    }
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(BaseUrlError::InvalidBaseUrl);
    }
    let Some((_, remainder)) = trimmed.split_once("://") else {
        return Err(BaseUrlError::InvalidBaseUrl);
    };
    if remainder.trim().is_empty() || remainder.starts_with('/') {
        return Err(BaseUrlError::InvalidBaseUrl);
    }
    Ok(trimmed.to_string())
}
