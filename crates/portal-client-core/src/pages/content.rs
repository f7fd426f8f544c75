use tracing::debug;

use crate::api::{PortalEndpoint, PortalTransport};
use crate::auth::TokenStore;
use crate::error::{PageError, PageMessages};
use crate::models::ContentItem;
use crate::session::{PortalSession, report_page_failure};
use crate::surface::{ContentCard, PageSurface, Region};

pub const CONTENT_PAGE: PageMessages = PageMessages {
    login_required: "Please login to view content.",
    action_failed: "Unable to load content. Please try again.",
};

const MISSING_DESCRIPTION: &str = "No description available.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Course,
    Video,
    Document,
    Other,
}

impl ContentKind {
    #[must_use]
    pub fn from_type(raw: &str) -> Self {
        match raw {
            "course" => Self::Course,
            "video" => Self::Video,
            "document" => Self::Document,
            _ => Self::Other,
        }
    }

    #[must_use]
    pub fn action_label(self) -> &'static str {
        match self {
            Self::Course => "Start Course",
            Self::Video => "Watch Now",
            Self::Document => "Download",
            Self::Other => "Open",
        }
    }

    #[must_use]
    pub fn action_alert(self, title: &str) -> String {
        match self {
            Self::Course => format!("Opening course: {title}"),
            Self::Video => format!("Playing video: {title}"),
            Self::Document => format!("Downloading: {title}"),
            Self::Other => format!("Opening: {title}"),
        }
    }
}

#[must_use]
pub fn content_card(item: &ContentItem) -> ContentCard {
    let kind = ContentKind::from_type(&item.content_type);
    let description = item
        .description
        .as_deref()
        .filter(|description| !description.is_empty())
        .unwrap_or(MISSING_DESCRIPTION);
    ContentCard {
        heading: format!("{} ({})", item.title, capitalize(&item.content_type)),
        description: description.to_string(),
        action_label: kind.action_label(),
        action_alert: kind.action_alert(&item.title),
    }
}

/// Upper-cases the first character only.
#[must_use]
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub async fn load_content_page<T, S, V>(
    transport: &T,
    store: &S,
    surface: &mut V,
) -> Result<Vec<ContentCard>, PageError>
where
    T: PortalTransport + ?Sized,
    S: TokenStore + ?Sized,
    V: PageSurface + ?Sized,
{
    let result = render_content(transport, store, surface).await;
    if let Err(error) = &result {
        report_page_failure(surface, error, &CONTENT_PAGE);
    }
    result
}

async fn render_content<T, S, V>(
    transport: &T,
    store: &S,
    surface: &mut V,
) -> Result<Vec<ContentCard>, PageError>
where
    T: PortalTransport + ?Sized,
    S: TokenStore + ?Sized,
    V: PageSurface + ?Sized,
{
    let session = PortalSession::open(transport, store)?;
    let items: Vec<ContentItem> = session.get_json(PortalEndpoint::Content).await?;
    debug!(count = items.len(), "content loaded");
    let cards = items.iter().map(content_card).collect::<Vec<_>>();
    surface.replace_cards(Region::ContentGrid, &cards);
    Ok(cards)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Destination;
    use crate::testing::{MemoryTokenStore, RecordingSurface, StubTransport};
    use serde_json::json;

    fn item(title: &str, content_type: &str) -> ContentItem {
        ContentItem {
            title: title.to_string(),
            content_type: content_type.to_string(),
            description: None,
        }
    }

    #[test]
    fn action_label_is_a_function_of_type_only() {
        let cases = [
            ("course", "Start Course"),
            ("video", "Watch Now"),
            ("document", "Download"),
            ("other", "Open"),
            ("podcast", "Open"),
            ("Video", "Open"),
            ("", "Open"),
        ];
        for (content_type, label) in cases {
            for title in ["A", "Something else"] {
                assert_eq!(
                    content_card(&item(title, content_type)).action_label,
                    label,
                    "type {content_type:?}"
                );
            }
        }
    }

    #[test]
    fn card_heading_capitalizes_type_and_falls_back_on_description() {
        let card = content_card(&item("Intro", "video"));
        assert_eq!(card.heading, "Intro (Video)");
        assert_eq!(card.description, "No description available.");
        assert_eq!(card.action_alert, "Playing video: Intro");

        let card = content_card(&ContentItem {
            title: "Guide".to_string(),
            content_type: "document".to_string(),
            description: Some("Step by step".to_string()),
        });
        assert_eq!(card.description, "Step by step");
        assert_eq!(card.action_alert, "Downloading: Guide");
    }

    #[test]
    fn capitalize_handles_empty_and_multibyte_text() {
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("course"), "Course");
        assert_eq!(capitalize("éclair"), "Éclair");
    }

    #[tokio::test]
    async fn renders_intro_video_card() {
        let transport = StubTransport::new().respond_json(
            PortalEndpoint::Content,
            200,
            json!([{ "title": "Intro", "type": "video" }]),
        );
        let store = MemoryTokenStore::with_token("t1");
        let mut surface = RecordingSurface::default();

        let cards = load_content_page(&transport, &store, &mut surface)
            .await
            .expect("content page");

        assert_eq!(cards.len(), 1);
        let rendered = surface.cards(Region::ContentGrid).expect("grid rendered");
        assert_eq!(rendered[0].heading, "Intro (Video)");
        assert_eq!(rendered[0].action_label, "Watch Now");
        assert!(surface.alerts().is_empty());
    }

    #[tokio::test]
    async fn missing_token_redirects_once_without_request() {
        let transport = StubTransport::new();
        let mut surface = RecordingSurface::default();

        let error = load_content_page(&transport, &MemoryTokenStore::default(), &mut surface)
            .await
            .expect_err("no session");

        assert_eq!(error, PageError::MissingSession);
        assert!(transport.requests().is_empty());
        assert_eq!(surface.navigations(), vec![Destination::Login]);
        assert_eq!(surface.alerts(), vec![CONTENT_PAGE.login_required.to_string()]);
    }

    #[tokio::test]
    async fn network_failure_alerts_without_redirect() {
        let transport = StubTransport::new().fail(PortalEndpoint::Content, "connection refused");
        let store = MemoryTokenStore::with_token("t1");
        let mut surface = RecordingSurface::default();

        let error = load_content_page(&transport, &store, &mut surface)
            .await
            .expect_err("network failure");

        assert!(matches!(error, PageError::Network { .. }));
        assert_eq!(surface.alerts(), vec![CONTENT_PAGE.action_failed.to_string()]);
        assert!(surface.navigations().is_empty());
        assert!(surface.cards(Region::ContentGrid).is_none());
    }
}
