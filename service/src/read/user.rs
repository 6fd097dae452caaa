//! User read model definitions.

use crate::domain::user;

/// User record of the platform directory.
#[derive(Clone, Debug)]
pub struct Record {
    /// ID of the user.
    pub id: user::Id,

    /// Full name of the user.
    pub full_name: String,

    /// Email address of the user.
    pub email: String,

    /// Recognized [`user::Role`] of the user.
    ///
    /// [`None`] for roles this client does not know about.
    pub role: Option<user::Role>,

    /// When the user was created, if reported.
    pub created_at: Option<user::CreationDateTime>,
}

/// Minimal reference to a user.
#[derive(Clone, Debug)]
pub struct Contact {
    /// ID of the user.
    pub id: user::Id,

    /// Full name of the user.
    pub full_name: String,

    /// Email address of the user.
    pub email: String,
}
