//! Page controllers. Each one guards the session, performs its request(s),
//! and renders onto a [`crate::surface::PageSurface`]. Failures are reported
//! on the surface before being returned to the caller.

pub mod admin;
pub mod content;
pub mod dashboard;
pub mod events;
pub mod login;
pub mod messaging;
pub mod signup;

pub use admin::{ADMIN_PAGE, load_admin_page};
pub use content::{CONTENT_PAGE, ContentKind, content_card, load_content_page};
pub use dashboard::{DASHBOARD_PAGE, load_dashboard_page, unread_messages_text};
pub use events::{EVENTS_PAGE, load_events_page};
pub use login::{LoginOutcome, submit_login};
pub use messaging::{
    ChatView, MESSAGES_PAGE, SEND_MESSAGE, SendOutcome, load_messages_page, logout,
};
pub use signup::{SignupOutcome, submit_signup};
