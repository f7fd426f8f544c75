use crate::api::{PortalEndpoint, PortalTransport};
use crate::auth::TokenStore;
use crate::error::{PageError, PageMessages};
use crate::models::DashboardSummary;
use crate::session::{PortalSession, report_page_failure};
use crate::surface::{PageSurface, Region};

pub const DASHBOARD_PAGE: PageMessages = PageMessages {
    login_required: "You must be logged in to view this page.",
    action_failed: "Failed to load dashboard data.",
};

#[must_use]
pub fn unread_messages_text(count: u64) -> String {
    let suffix = if count == 1 { "" } else { "s" };
    format!("You have {count} unread message{suffix}")
}

pub async fn load_dashboard_page<T, S, V>(
    transport: &T,
    store: &S,
    surface: &mut V,
) -> Result<DashboardSummary, PageError>
where
    T: PortalTransport + ?Sized,
    S: TokenStore + ?Sized,
    V: PageSurface + ?Sized,
{
    let result = fetch_summary(transport, store).await;
    match &result {
        Ok(summary) => render_dashboard(surface, summary),
        Err(error) => {
            report_page_failure(surface, error, &DASHBOARD_PAGE);
        }
    }
    result
}

async fn fetch_summary<T, S>(transport: &T, store: &S) -> Result<DashboardSummary, PageError>
where
    T: PortalTransport + ?Sized,
    S: TokenStore + ?Sized,
{
    let session = PortalSession::open(transport, store)?;
    session.get_json(PortalEndpoint::MemberDashboard).await
}

pub fn render_dashboard<V: PageSurface + ?Sized>(surface: &mut V, summary: &DashboardSummary) {
    surface.replace_list(Region::UpcomingEvents, &summary.upcoming_events);
    surface.replace_list(Region::RecommendedEvents, &summary.recommended_events);
    surface.set_text(
        Region::UnreadMessages,
        &unread_messages_text(summary.messages),
    );
    surface.replace_list(Region::Courses, &summary.courses);
}
