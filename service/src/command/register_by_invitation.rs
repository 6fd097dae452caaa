//! [`Command`] for registering a new user by an invitation.

use common::operations::Perform;
use derive_more::{Display, Error, From};
use secrecy::SecretBox;
use tracerr::Traced;

use crate::{
    domain::{invitation, user},
    infra::{gateway, Gateway},
    Service,
};

use super::Command;

/// [`Command`] for registering a new user accepting an [`invitation::Token`].
///
/// Registration does not sign the user in: they proceed to the regular
/// sign-in with their fresh credentials afterwards.
#[derive(Debug)]
pub struct RegisterByInvitation {
    /// [`invitation::Token`] of the accepted invitation.
    pub token: invitation::Token,

    /// [`user::FullName`] of the registering user.
    pub full_name: user::FullName,

    /// [`user::Password`] chosen by the registering user.
    pub password: SecretBox<user::Password>,
}

impl<Gw, St> Command<RegisterByInvitation> for Service<Gw, St>
where
    Gw: Gateway<
        Perform<invitation::Registration>,
        Ok = (),
        Err = Traced<gateway::Error>,
    >,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: RegisterByInvitation,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let RegisterByInvitation {
            token,
            full_name,
            password,
        } = cmd;

        self.gateway()
            .execute(Perform(invitation::Registration {
                token,
                full_name,
                password,
            }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`RegisterByInvitation`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Gateway`] error.
    #[display("`Gateway` operation failed: {_0}")]
    Gateway(gateway::Error),
}
