use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// Error body shape of the backend: `{"detail": ...}`. Validation errors
/// carry a list instead of a string, so the raw value is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ApiErrorBody {
    /// `detail` when it is a non-blank string.
    #[must_use]
    pub fn detail_text(&self) -> Option<String> {
        self.detail
            .as_ref()
            .and_then(serde_json::Value::as_str)
            .map(str::trim)
            .filter(|detail| !detail.is_empty())
            .map(ToString::to_string)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Identity {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub registered_events: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContentItem {
    pub title: String,
    #[serde(rename = "type", default)]
    pub content_type: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DashboardSummary {
    #[serde(default)]
    pub upcoming_events: Vec<String>,
    #[serde(default)]
    pub recommended_events: Vec<String>,
    #[serde(default)]
    pub messages: u64,
    #[serde(default)]
    pub courses: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EventsSummary {
    #[serde(default)]
    pub upcoming: Vec<String>,
    #[serde(default)]
    pub registered: Vec<String>,
    #[serde(default)]
    pub past: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ConversationList {
    #[serde(default)]
    pub conversations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutgoingMessage {
    pub to: String,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AdminStats {
    #[serde(default)]
    pub active_members: u64,
    #[serde(default)]
    pub signups_this_month: u64,
    #[serde(default)]
    pub events_this_month: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MemberRecord {
    pub name: String,
    pub email: String,
    #[serde(default = "default_member_status")]
    pub status: String,
}

fn default_member_status() -> String {
    "Active".to_string()
}
