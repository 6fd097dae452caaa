//! [`Command`] for creating a [`Session`].

use common::{
    operations::{By, Delete, Insert, Perform, Update},
    DateTime,
};
use derive_more::{Display, Error, From};
use secrecy::SecretBox;
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::domain::session::Token;
use crate::{
    domain::{session, user, Session},
    infra::{gateway, store, Gateway, Store},
    Service,
};

use super::Command;

/// [`Command`] for creating a [`Session`].
#[derive(Debug, From)]
pub enum CreateSession {
    /// Create a new [`Session`] by user credentials.
    ByCredentials {
        /// [`user::Email`] of the user.
        email: user::Email,

        /// [`user::Password`] of the user.
        password: SecretBox<user::Password>,
    },

    /// Create a new [`Session`] by a raw [`Token`].
    ///
    /// The [`Token`] is applied unconditionally, without any structural
    /// validation upfront: the derivation pass decides whether it holds up,
    /// and an unusable [`Token`] converges to a logged-out [`Session`]
    /// rather than an error.
    ByToken(session::Token),
}

impl<Gw, St> Command<CreateSession> for Service<Gw, St>
where
    Gw: Gateway<
            Perform<user::Credentials>,
            Ok = session::Token,
            Err = Traced<gateway::Error>,
        > + Gateway<
            Update<Option<session::Token>>,
            Ok = (),
            Err = Traced<gateway::Error>,
        >,
    St: Store<Insert<session::Token>, Ok = (), Err = Traced<store::Error>>
        + Store<
            Delete<By<session::Token, ()>>,
            Ok = (),
            Err = Traced<store::Error>,
        >,
{
    type Ok = Session;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateSession,
    ) -> Result<Self::Ok, Self::Err> {
        use CreateSession as Cmd;
        use ExecutionError as E;

        let token = match cmd {
            Cmd::ByCredentials { email, password } => self
                .gateway()
                .execute(Perform(user::Credentials { email, password }))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?,
            Cmd::ByToken(token) => token,
        };

        match Session::derive(Some(token), DateTime::now()) {
            Ok(session) => {
                if let Session::Authenticated(auth) = &session {
                    self.store()
                        .execute(Insert(auth.token.clone()))
                        .await
                        .map_err(tracerr::map_from_and_wrap!(=> E))?;
                    self.gateway()
                        .execute(Update(Some(auth.token.clone())))
                        .await
                        .map_err(tracerr::map_from_and_wrap!(=> E))?;
                }
                self.set_session(session.clone());
                Ok(session)
            }
            Err(rejection) => {
                log::warn!("discarding unusable token: {rejection}");
                self.store()
                    .execute(Delete(By::new(())))
                    .await
                    .map_err(tracerr::map_from_and_wrap!(=> E))?;
                self.gateway()
                    .execute(Update(None))
                    .await
                    .map_err(tracerr::map_from_and_wrap!(=> E))?;
                self.set_session(Session::Guest);
                Ok(Session::Guest)
            }
        }
    }
}

/// Error of [`CreateSession`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Gateway`] error.
    #[display("`Gateway` operation failed: {_0}")]
    Gateway(gateway::Error),

    /// [`Store`] error.
    #[display("`Store` operation failed: {_0}")]
    Store(store::Error),
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use common::DateTime;
    use secrecy::SecretBox;

    use crate::command::{stub, Command as _};

    use super::CreateSession;

    #[tokio::test]
    async fn by_token_establishes_session_and_persists() {
        let gateway = stub::StubGateway::default();
        let store = stub::StubStore::default();
        let svc = stub::service(gateway.clone(), store.clone());

        let claims = stub::claims(DateTime::now() + Duration::from_secs(600));
        let token = stub::token(&claims);

        let session = svc
            .execute(CreateSession::ByToken(token.clone()))
            .await
            .unwrap();

        assert_eq!(session.token(), Some(&token));
        assert_eq!(session.user_id(), Some(claims.user_id));
        assert_eq!(store.persisted(), Some(token.clone()));
        assert_eq!(gateway.auth(), Some(token));
        assert!(svc.session().is_authenticated());
    }

    #[tokio::test]
    async fn by_token_with_expired_token_converges_to_guest() {
        let gateway = stub::StubGateway::default();
        let store = stub::StubStore::default();
        let svc = stub::service(gateway.clone(), store.clone());

        let token = stub::token(&stub::claims(
            DateTime::now() - Duration::from_secs(1),
        ));
        store.seed(token.clone());

        let session =
            svc.execute(CreateSession::ByToken(token)).await.unwrap();

        assert!(!session.is_authenticated());
        assert_eq!(store.persisted(), None);
        assert_eq!(gateway.auth(), None);
        assert!(!svc.session().is_authenticated());
    }

    #[tokio::test]
    async fn by_token_with_garbage_converges_to_guest() {
        let gateway = stub::StubGateway::default();
        let store = stub::StubStore::default();
        let svc = stub::service(gateway.clone(), store.clone());

        let session = svc
            .execute(CreateSession::ByToken("not-a-jwt".into()))
            .await
            .unwrap();

        assert!(!session.is_authenticated());
        assert_eq!(store.persisted(), None);
    }

    #[tokio::test]
    async fn by_credentials_applies_issued_token() {
        let issued = stub::token(&stub::claims(
            DateTime::now() + Duration::from_secs(600),
        ));
        let gateway = stub::StubGateway::issuing(issued.clone());
        let store = stub::StubStore::default();
        let svc = stub::service(gateway.clone(), store.clone());

        let session = svc
            .execute(CreateSession::ByCredentials {
                email: "someone@example.com".parse().unwrap(),
                password: SecretBox::new(Box::new(
                    "correct horse".parse().unwrap(),
                )),
            })
            .await
            .unwrap();

        assert_eq!(session.token(), Some(&issued));
        assert_eq!(store.persisted(), Some(issued.clone()));
        assert_eq!(gateway.auth(), Some(issued));
    }
}
