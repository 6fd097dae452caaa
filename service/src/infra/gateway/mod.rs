//! API gateway implementations.

#[cfg(feature = "http")]
pub mod http;

use derive_more::{Display, Error as StdError, From};

#[cfg(feature = "http")]
pub use self::http::Http;

/// API gateway operation.
pub use common::Handler as Gateway;

/// [`Gateway`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    #[cfg(feature = "http")]
    /// [`Http`] error.
    Http(http::Error),
}

impl Error {
    /// Indicates whether this [`Error`] represents an authorization refused
    /// by the server (HTTP 401/403).
    #[must_use]
    pub fn is_auth_refusal(&self) -> bool {
        match self {
            #[cfg(feature = "http")]
            Self::Http(e) => {
                matches!(e, http::Error::Unauthorized | http::Error::Forbidden)
            }
        }
    }
}
