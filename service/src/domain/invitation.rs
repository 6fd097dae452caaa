//! Invitation definitions.

use derive_more::{AsRef, Display, From, FromStr};
use secrecy::SecretBox;

use crate::domain::user;

/// Token of an invitation to join the platform.
///
/// Opaque to the client: issued and verified by the server.
#[derive(AsRef, Clone, Debug, Display, Eq, From, FromStr, PartialEq)]
#[as_ref(str, String)]
#[from(&str, String)]
pub struct Token(String);

/// Registration of a new user accepting an invitation.
#[derive(Debug)]
pub struct Registration {
    /// [`Token`] of the accepted invitation.
    pub token: Token,

    /// [`user::FullName`] of the registering user.
    pub full_name: user::FullName,

    /// [`user::Password`] chosen by the registering user.
    pub password: SecretBox<user::Password>,
}
