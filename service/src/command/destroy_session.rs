//! [`Command`] for destroying the current [`Session`].

use common::operations::{By, Delete, Update};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{session, Session},
    infra::{gateway, store, Gateway, Store},
    Service,
};

use super::Command;

/// [`Command`] for destroying the current [`Session`].
///
/// Idempotent: destroying an absent [`Session`] is a no-op.
#[derive(Clone, Copy, Debug)]
pub struct DestroySession;

impl<Gw, St> Command<DestroySession> for Service<Gw, St>
where
    Gw: Gateway<
        Update<Option<session::Token>>,
        Ok = (),
        Err = Traced<gateway::Error>,
    >,
    St: Store<
        Delete<By<session::Token, ()>>,
        Ok = (),
        Err = Traced<store::Error>,
    >,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(&self, _: DestroySession) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        self.set_session(Session::Guest);
        self.store()
            .execute(Delete(By::new(())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        self.gateway()
            .execute(Update(None))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`DestroySession`] [`Command`] execution.
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

    use crate::command::{stub, Command as _, CreateSession};

    use super::DestroySession;

    #[tokio::test]
    async fn clears_session_and_persisted_token() {
        let gateway = stub::StubGateway::default();
        let store = stub::StubStore::default();
        let svc = stub::service(gateway.clone(), store.clone());

        let token = stub::token(&stub::claims(
            DateTime::now() + Duration::from_secs(600),
        ));
        drop(svc.execute(CreateSession::ByToken(token)).await.unwrap());
        assert!(svc.session().is_authenticated());

        svc.execute(DestroySession).await.unwrap();

        assert!(!svc.session().is_authenticated());
        assert!(svc.session().token().is_none());
        assert!(svc.session().role().is_none());
        assert!(svc.session().user_id().is_none());
        assert_eq!(store.persisted(), None);
        assert_eq!(gateway.auth(), None);
    }

    #[tokio::test]
    async fn is_idempotent() {
        let gateway = stub::StubGateway::default();
        let store = stub::StubStore::default();
        let svc = stub::service(gateway, store.clone());

        svc.execute(DestroySession).await.unwrap();
        svc.execute(DestroySession).await.unwrap();

        assert!(!svc.session().is_authenticated());
        assert_eq!(store.persisted(), None);
    }
}
