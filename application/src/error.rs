//! [`Error`]-related definitions.

use std::fmt;

use derive_more::Error as StdError;
use service::{command, infra::gateway, query};
use tracerr::Traced;

/// User-facing application [`Error`].
///
/// Every failure is terminal for its request: there are no retries, and a
/// re-fetch takes an explicit user action.
#[derive(Clone, Debug, StdError)]
pub struct Error {
    /// [`Error`] code.
    pub code: Code,

    /// [`Error`] message.
    pub message: String,
}

impl Error {
    /// Creates a new [`Error`] representing an unexpected internal failure.
    #[must_use]
    pub fn internal(msg: &impl ToString) -> Self {
        Self {
            code: "INTERNAL_ERROR",
            message: msg.to_string(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { code, message } = self;

        write!(f, "[{code}]: {message}")
    }
}

/// [`Error`] code.
pub type Code = &'static str;

/// Helper trait for converting types into [`Error`]s.
pub trait AsError {
    /// Tries to convert the type into an [`Error`].
    ///
    /// [`None`] is returned if the type carries no dedicated user-facing
    /// representation.
    fn try_as_error(&self) -> Option<Error>;

    /// Converts the type into an [`Error`].
    fn as_error(&self) -> Error
    where
        Self: fmt::Display,
    {
        self.try_as_error()
            .unwrap_or_else(|| Error::internal(&self))
    }
}

impl<E: AsError> AsError for Traced<E> {
    fn try_as_error(&self) -> Option<Error> {
        self.as_ref().try_as_error()
    }
}

impl AsError for gateway::Error {
    fn try_as_error(&self) -> Option<Error> {
        self.is_auth_refusal().then(|| Error {
            code: "AUTHORIZATION_REQUIRED",
            message: "Your session is missing, expired or not permitted \
                      to do this. Please sign in again."
                .to_owned(),
        })
    }
}

impl AsError for command::create_session::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Gateway(e) => e.is_auth_refusal().then(|| Error {
                code: "WRONG_CREDENTIALS",
                message: "Invalid email or password.".to_owned(),
            }),
            Self::Store(_) => None,
        }
    }
}

impl AsError for command::destroy_session::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        None
    }
}

impl AsError for command::register_by_invitation::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Gateway(_) => Some(Error {
                code: "REGISTRATION_FAILED",
                message: "Registration failed.".to_owned(),
            }),
        }
    }
}

impl AsError for query::shared_asset::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::NotAccessible(_) => Some(Error {
                code: "NOT_ACCESSIBLE",
                message: "This asset is private and not accessible."
                    .to_owned(),
            }),
            Self::Gateway(e) => e.try_as_error(),
        }
    }
}
