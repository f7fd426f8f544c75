//! Target-independent core of the membership portal client.
//!
//! Every page follows the same shape: the session guard reads the stored
//! bearer token, one authenticated request is issued through a
//! [`api::PortalTransport`], and the decoded payload is rendered onto a
//! [`surface::PageSurface`] by region id. Browser, terminal, and test
//! front-ends only differ in the transport, token store, and surface they
//! plug in.

pub mod api;
pub mod auth;
pub mod error;
pub mod models;
pub mod pages;
pub mod session;
pub mod surface;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use api::{
    HttpMethod, PortalEndpoint, PortalRequest, PortalResponse, PortalTransport, RequestBody,
    TransportError,
};
pub use auth::{TOKEN_STORAGE_KEY, TokenStore};
pub use error::{FailureDisposition, PageError, PageMessages};
pub use session::{PortalSession, report_page_failure, require_token};
pub use surface::{ContentCard, Destination, Input, PageSurface, Region, TranscriptLine};
