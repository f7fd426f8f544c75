use crate::api::{PortalEndpoint, PortalTransport};
use crate::auth::TokenStore;
use crate::error::{PageError, PageMessages};
use crate::models::{AdminStats, MemberRecord};
use crate::session::{PortalSession, report_page_failure};
use crate::surface::{PageSurface, Region};

pub const ADMIN_PAGE: PageMessages = PageMessages {
    login_required: "You must be logged in to view this page.",
    action_failed: "Failed to load admin dashboard.",
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminOverview {
    pub stats: AdminStats,
    pub members: Vec<MemberRecord>,
}

#[must_use]
pub fn member_line(member: &MemberRecord) -> String {
    format!("{} <{}> ({})", member.name, member.email, member.status)
}

pub async fn load_admin_page<T, S, V>(
    transport: &T,
    store: &S,
    surface: &mut V,
) -> Result<AdminOverview, PageError>
where
    T: PortalTransport + ?Sized,
    S: TokenStore + ?Sized,
    V: PageSurface + ?Sized,
{
    let result = fetch_overview(transport, store).await;
    match &result {
        Ok(overview) => render_admin(surface, overview),
        Err(error) => {
            report_page_failure(surface, error, &ADMIN_PAGE);
        }
    }
    result
}

async fn fetch_overview<T, S>(transport: &T, store: &S) -> Result<AdminOverview, PageError>
where
    T: PortalTransport + ?Sized,
    S: TokenStore + ?Sized,
{
    let session = PortalSession::open(transport, store)?;
    let stats = session.get_json(PortalEndpoint::AdminStats).await?;
    let members = session.get_json(PortalEndpoint::AdminMembers).await?;
    Ok(AdminOverview { stats, members })
}

pub fn render_admin<V: PageSurface + ?Sized>(surface: &mut V, overview: &AdminOverview) {
    surface.set_text(
        Region::ActiveMembers,
        &overview.stats.active_members.to_string(),
    );
    surface.set_text(
        Region::SignupsThisMonth,
        &overview.stats.signups_this_month.to_string(),
    );
    surface.set_text(
        Region::EventsThisMonth,
        &overview.stats.events_this_month.to_string(),
    );
    let members = overview.members.iter().map(member_line).collect::<Vec<_>>();
    surface.replace_list(Region::MemberList, &members);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Destination;
    use crate::testing::{MemoryTokenStore, RecordingSurface, StubTransport};
    use serde_json::json;

    #[tokio::test]
    async fn stats_and_members_render_into_regions() {
        let transport = StubTransport::new()
            .respond_json(
                PortalEndpoint::AdminStats,
                200,
                json!({ "active_members": 12, "signups_this_month": 30, "events_this_month": 4 }),
            )
            .respond_json(
                PortalEndpoint::AdminMembers,
                200,
                json!([
                    { "name": "Ada", "email": "ada@example.org", "status": "Active" },
                    { "name": "Grace", "email": "grace@example.org" }
                ]),
            );
        let store = MemoryTokenStore::with_token("admin-token");
        let mut surface = RecordingSurface::default();

        let overview = load_admin_page(&transport, &store, &mut surface)
            .await
            .expect("admin page");

        assert_eq!(overview.members.len(), 2);
        assert_eq!(surface.text(Region::ActiveMembers).as_deref(), Some("12"));
        assert_eq!(surface.text(Region::SignupsThisMonth).as_deref(), Some("30"));
        assert_eq!(surface.text(Region::EventsThisMonth).as_deref(), Some("4"));
        assert_eq!(
            surface.list(Region::MemberList),
            Some(vec![
                "Ada <ada@example.org> (Active)".to_string(),
                "Grace <grace@example.org> (Active)".to_string(),
            ])
        );
    }

    #[tokio::test]
    async fn forbidden_member_is_sent_to_login_before_member_list() {
        let transport = StubTransport::new().respond_json(
            PortalEndpoint::AdminStats,
            403,
            json!({ "detail": "Admins only" }),
        );
        let store = MemoryTokenStore::with_token("member-token");
        let mut surface = RecordingSurface::default();

        let error = load_admin_page(&transport, &store, &mut surface)
            .await
            .expect_err("forbidden");

        assert_eq!(
            error,
            PageError::AuthRejected {
                status: 403,
                detail: Some("Admins only".to_string())
            }
        );
        assert_eq!(transport.requests().len(), 1);
        assert_eq!(surface.navigations(), vec![Destination::Login]);
    }

    #[tokio::test]
    async fn missing_token_redirects_once_without_request() {
        let transport = StubTransport::new();
        let mut surface = RecordingSurface::default();

        let error = load_admin_page(&transport, &MemoryTokenStore::default(), &mut surface)
            .await
            .expect_err("no session");

        assert_eq!(error, PageError::MissingSession);
        assert!(transport.requests().is_empty());
        assert_eq!(surface.alerts(), vec![ADMIN_PAGE.login_required.to_string()]);
        assert_eq!(surface.navigations(), vec![Destination::Login]);
        assert!(surface.list(Region::MemberList).is_none());
    }
}
