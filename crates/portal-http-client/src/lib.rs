//! Native plumbing for the portal client core: a `reqwest` transport and a
//! token store kept in a file.

mod token_file;
mod transport;

pub use token_file::{FileTokenStore, FileTokenStoreError};
pub use transport::{
    DEFAULT_TIMEOUT_MS, HttpTransport, HttpTransportConfig, HttpTransportError,
};
