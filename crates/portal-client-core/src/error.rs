use crate::api::TransportError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PageError {
    #[error("no stored session token")]
    MissingSession,
    #[error("request rejected with status {status}")]
    AuthRejected { status: u16, detail: Option<String> },
    #[error("network error: {message}")]
    Network { message: String },
    #[error("failed to decode response: {message}")]
    Decode { message: String },
    #[error("token storage error: {message}")]
    Storage { message: String },
}

impl PageError {
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingSession => "missing_session",
            Self::AuthRejected { .. } => "auth_rejected",
            Self::Network { .. } => "network",
            Self::Decode { .. } => "decode",
            Self::Storage { .. } => "storage",
        }
    }

    /// Missing and rejected sessions both send the user back to login.
    #[must_use]
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::MissingSession | Self::AuthRejected { .. })
    }

    #[must_use]
    pub fn disposition(&self, messages: &PageMessages) -> FailureDisposition {
        let alert = match self {
            Self::MissingSession => messages.login_required,
            _ => messages.action_failed,
        };
        FailureDisposition {
            alert: alert.to_string(),
            redirect_to_login: self.is_auth_failure(),
        }
    }

    pub(crate) fn storage(error: impl std::fmt::Display) -> Self {
        Self::Storage {
            message: error.to_string(),
        }
    }
}

impl From<TransportError> for PageError {
    fn from(error: TransportError) -> Self {
        Self::Network {
            message: error.message,
        }
    }
}

/// User-facing alert texts of one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageMessages {
    pub login_required: &'static str,
    pub action_failed: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureDisposition {
    pub alert: String,
    pub redirect_to_login: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    const MESSAGES: PageMessages = PageMessages {
        login_required: "Please login.",
        action_failed: "Could not load.",
    };

    #[test]
    fn auth_failures_redirect_and_others_only_alert() {
        let missing = PageError::MissingSession.disposition(&MESSAGES);
        assert_eq!(missing.alert, "Please login.");
        assert!(missing.redirect_to_login);

        let rejected = PageError::AuthRejected {
            status: 401,
            detail: None,
        }
        .disposition(&MESSAGES);
        assert_eq!(rejected.alert, "Could not load.");
        assert!(rejected.redirect_to_login);

        for error in [
            PageError::Network {
                message: "refused".to_string(),
            },
            PageError::Decode {
                message: "eof".to_string(),
            },
            PageError::Storage {
                message: "quota".to_string(),
            },
        ] {
            let disposition = error.disposition(&MESSAGES);
            assert_eq!(disposition.alert, "Could not load.");
            assert!(!disposition.redirect_to_login, "{}", error.kind());
        }
    }

    #[test]
    fn transport_errors_are_network_failures() {
        let error = PageError::from(TransportError::new("connection refused"));
        assert_eq!(
            error,
            PageError::Network {
                message: "connection refused".to_string()
            }
        );
        assert_eq!(error.kind(), "network");
    }
}
