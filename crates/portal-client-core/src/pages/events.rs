use crate::api::{PortalEndpoint, PortalTransport};
use crate::auth::TokenStore;
use crate::error::{PageError, PageMessages};
use crate::models::EventsSummary;
use crate::session::{PortalSession, report_page_failure};
use crate::surface::{PageSurface, Region};

pub const EVENTS_PAGE: PageMessages = PageMessages {
    login_required: "Please log in to view your events.",
    action_failed: "Could not load events.",
};

pub async fn load_events_page<T, S, V>(
    transport: &T,
    store: &S,
    surface: &mut V,
) -> Result<EventsSummary, PageError>
where
    T: PortalTransport + ?Sized,
    S: TokenStore + ?Sized,
    V: PageSurface + ?Sized,
{
    let result = match PortalSession::open(transport, store) {
        Ok(session) => session.get_json(PortalEndpoint::MemberEvents).await,
        Err(error) => Err(error),
    };
    match &result {
        Ok(summary) => render_events(surface, summary),
        Err(error) => {
            report_page_failure(surface, error, &EVENTS_PAGE);
        }
    }
    result
}

pub fn render_events<V: PageSurface + ?Sized>(surface: &mut V, summary: &EventsSummary) {
    surface.replace_list(Region::UpcomingEvents, &summary.upcoming);
    surface.replace_list(Region::RegisteredEvents, &summary.registered);
    surface.replace_list(Region::PastEvents, &summary.past);
}
