//! [`Command`] for restoring a [`Session`] from the persisted token.

use common::operations::{By, Delete, Select, Update};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{session, Session},
    infra::{gateway, store, Gateway, Store},
    Service,
};

use super::{create_session, Command, CreateSession};

/// [`Command`] for restoring a [`Session`] from the persisted token.
///
/// Runs once at application start: an absent, expired or malformed
/// persisted token yields a guest [`Session`] (removing the stale token
/// along the way), not an error.
#[derive(Clone, Copy, Debug)]
pub struct RestoreSession;

impl<Gw, St> Command<RestoreSession> for Service<Gw, St>
where
    Self: Command<
        CreateSession,
        Ok = Session,
        Err = Traced<create_session::ExecutionError>,
    >,
    Gw: Gateway<
        Update<Option<session::Token>>,
        Ok = (),
        Err = Traced<gateway::Error>,
    >,
    St: Store<
            Select<By<Option<session::Token>, ()>>,
            Ok = Option<session::Token>,
            Err = Traced<store::Error>,
        > + Store<
            Delete<By<session::Token, ()>>,
            Ok = (),
            Err = Traced<store::Error>,
        >,
{
    type Ok = Session;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, _: RestoreSession) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let persisted = self
            .store()
            .execute(Select(By::new(())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        match persisted {
            Some(token) => self
                .execute(CreateSession::ByToken(token))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E)),
            None => {
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

/// Error of [`RestoreSession`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Gateway`] error.
    #[display("`Gateway` operation failed: {_0}")]
    Gateway(gateway::Error),

    /// [`Store`] error.
    #[display("`Store` operation failed: {_0}")]
    Store(store::Error),

    /// [`CreateSession`] error.
    #[display("Cannot apply the persisted token: {_0}")]
    Session(create_session::ExecutionError),
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use common::DateTime;

    use crate::command::{stub, Command as _};

    use super::RestoreSession;

    #[tokio::test]
    async fn restores_valid_persisted_token() {
        let gateway = stub::StubGateway::default();
        let store = stub::StubStore::default();
        let svc = stub::service(gateway.clone(), store.clone());

        let token = stub::token(&stub::claims(
            DateTime::now() + Duration::from_secs(600),
        ));
        store.seed(token.clone());

        let session = svc.execute(RestoreSession).await.unwrap();

        assert_eq!(session.token(), Some(&token));
        assert_eq!(gateway.auth(), Some(token));
    }

    #[tokio::test]
    async fn absent_persisted_token_yields_guest() {
        let gateway = stub::StubGateway::default();
        let store = stub::StubStore::default();
        let svc = stub::service(gateway.clone(), store.clone());

        let session = svc.execute(RestoreSession).await.unwrap();

        assert!(!session.is_authenticated());
        assert_eq!(gateway.auth(), None);
    }

    #[tokio::test]
    async fn stale_persisted_token_is_removed() {
        let gateway = stub::StubGateway::default();
        let store = stub::StubStore::default();
        let svc = stub::service(gateway, store.clone());

        store.seed(stub::token(&stub::claims(
            DateTime::now() - Duration::from_secs(600),
        )));

        let session = svc.execute(RestoreSession).await.unwrap();

        assert!(!session.is_authenticated());
        assert_eq!(store.persisted(), None);
    }
}
