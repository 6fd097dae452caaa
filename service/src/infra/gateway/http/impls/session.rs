//! Session-related [`Gateway`] implementations.

use common::operations::{Perform, Update};
use reqwest::Method;
use secrecy::ExposeSecret as _;
use serde::Deserialize;
use tracerr::Traced;

use crate::{
    domain::{invitation, session, user},
    infra::{
        gateway::{self, http::Http},
        Gateway,
    },
};

/// Wire representation of an issued session token.
#[derive(Debug, Deserialize)]
struct TokenData {
    /// Issued bearer token.
    token: String,
}

impl Gateway<Perform<user::Credentials>> for Http {
    type Ok = session::Token;
    type Err = Traced<gateway::Error>;

    async fn execute(
        &self,
        Perform(credentials): Perform<user::Credentials>,
    ) -> Result<Self::Ok, Self::Err> {
        let user::Credentials { email, password } = credentials;
        let email: &str = email.as_ref();
        let password: &str = password.expose_secret().as_ref();

        let data: TokenData = self
            .fetch(
                Method::POST,
                "auth/login",
                Some(serde_json::json!({
                    "email": email,
                    "password": password,
                })),
            )
            .await
            .map_err(tracerr::wrap!())?;

        Ok(data.token.into())
    }
}

impl Gateway<Perform<invitation::Registration>> for Http {
    type Ok = ();
    type Err = Traced<gateway::Error>;

    async fn execute(
        &self,
        Perform(registration): Perform<invitation::Registration>,
    ) -> Result<Self::Ok, Self::Err> {
        let invitation::Registration {
            token,
            full_name,
            password,
        } = registration;
        let token: &str = token.as_ref();
        let full_name: &str = full_name.as_ref();
        let password: &str = password.expose_secret().as_ref();

        self.perform(
            Method::POST,
            "invitations/register",
            Some(serde_json::json!({
                "token": token,
                "full_name": full_name,
                "password": password,
            })),
        )
        .await
        .map_err(tracerr::wrap!())
    }
}

impl Gateway<Update<Option<session::Token>>> for Http {
    type Ok = ();
    type Err = Traced<gateway::Error>;

    async fn execute(
        &self,
        Update(token): Update<Option<session::Token>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.set_auth(token);
        Ok(())
    }
}
