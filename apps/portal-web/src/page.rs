use thiserror::Error;

/// Which portal page the shell was loaded into, taken from the body's
/// `data-page` attribute or, failing that, the document file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortalPage {
    Login,
    Signup,
    MemberDashboard,
    AdminDashboard,
    Content,
    Events,
    Messages,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown portal page: {0}")]
pub struct UnknownPage(pub String);

impl PortalPage {
    pub const ALL: [Self; 7] = [
        Self::Login,
        Self::Signup,
        Self::MemberDashboard,
        Self::AdminDashboard,
        Self::Content,
        Self::Events,
        Self::Messages,
    ];

    #[must_use]
    pub fn attr(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Signup => "signup",
            Self::MemberDashboard => "member-dashboard",
            Self::AdminDashboard => "admin-dashboard",
            Self::Content => "content",
            Self::Events => "my-events",
            Self::Messages => "messages",
        }
    }

    pub fn from_attr(raw: &str) -> Result<Self, UnknownPage> {
        let normalized = raw.trim().to_ascii_lowercase();
        let name = normalized.strip_suffix(".html").unwrap_or(&normalized);
        Self::ALL
            .into_iter()
            .find(|page| page.attr() == name)
            .ok_or_else(|| UnknownPage(raw.to_string()))
    }

    /// Last path segment, e.g. `/portal/my-events.html`.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        let segment = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .rsplit('/')
            .next()
            .unwrap_or_default();
        if segment.is_empty() {
            return None;
        }
        Self::from_attr(segment).ok()
    }
}
