//! [`SweepExpiredSession`] [`Task`].

use std::{convert::Infallible, error::Error, time};

use common::{
    operations::{By, Perform, Start},
    DateTime,
};
use tokio::time::interval;
use tracerr::Traced;
use tracing as log;

use crate::{
    command::{destroy_session, Command, DestroySession},
    domain::Session,
    Service,
};

use super::Task;

/// Configuration for [`SweepExpiredSession`] [`Task`].
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Interval between [`Session`] expiry checks.
    pub interval: time::Duration,
}

/// [`Task`] periodically checking whether the current [`Session`] has
/// expired, and destroying it once it has.
///
/// Exists because the derivation pass fires on token change only, not on
/// the passage of time.
#[derive(Clone, Copy, Debug)]
pub struct SweepExpiredSession<S> {
    /// [`Config`] of this [`Task`].
    config: Config,

    /// [`Service`] instance.
    service: S,
}

impl<Gw, St> Task<Start<By<SweepExpiredSession<Self>, Config>>>
    for Service<Gw, St>
where
    SweepExpiredSession<Service<Gw, St>>:
        Task<Perform<()>, Ok = (), Err: Error> + 'static,
    Self: Clone,
{
    type Ok = ();
    type Err = Infallible;

    async fn execute(
        &self,
        Start(by): Start<By<SweepExpiredSession<Self>, Config>>,
    ) -> Result<Self::Ok, Self::Err> {
        let config = by.into_inner();
        let task = SweepExpiredSession {
            config,
            service: self.clone(),
        };

        let mut interval = interval(task.config.interval);
        loop {
            let _ = interval.tick().await;
            _ = task.execute(Perform(())).await.map_err(|e| {
                log::error!("`task::SweepExpiredSession` failed: {e}");
            });
        }
    }
}

impl<Gw, St> Task<Perform<()>> for SweepExpiredSession<Service<Gw, St>>
where
    Service<Gw, St>: Command<
        DestroySession,
        Ok = (),
        Err = Traced<destroy_session::ExecutionError>,
    >,
{
    type Ok = ();
    type Err = ExecutionError;

    async fn execute(&self, _: Perform<()>) -> Result<Self::Ok, Self::Err> {
        let expired = match self.service.session() {
            Session::Guest => return Ok(()),
            Session::Authenticated(auth) => {
                auth.expires_at <= DateTime::now().coerce()
            }
        };
        if !expired {
            return Ok(());
        }

        log::info!("current session expired, signing out");
        self.service.execute(DestroySession).await
    }
}

/// Error of [`SweepExpiredSession`] execution.
pub type ExecutionError = Traced<destroy_session::ExecutionError>;

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use common::{
        operations::{By, Perform, Start},
        DateTime,
    };

    use crate::{
        command::{stub, Command as _, CreateSession},
        domain::{
            session::{Authenticated, Token},
            Session,
        },
        task::Task as _,
    };

    use super::SweepExpiredSession;

    /// Publishes an already expired [`Session`] bypassing the derivation
    /// pass, the way time passing under a live session would.
    fn expire(
        svc: &crate::Service<stub::StubGateway, stub::StubStore>,
        store: &stub::StubStore,
    ) {
        let token = Token::from("expired-but-still-around");
        store.seed(token.clone());
        svc.set_session(Session::Authenticated(Authenticated {
            token,
            user_id: crate::domain::user::Id::new(),
            role: None,
            expires_at: (DateTime::now() - Duration::from_secs(1)).coerce(),
        }));
    }

    #[tokio::test]
    async fn destroys_expired_session_on_tick() {
        let gateway = stub::StubGateway::default();
        let store = stub::StubStore::default();
        let svc = stub::service(gateway, store.clone());

        expire(&svc, &store);
        assert!(svc.session().is_authenticated());

        let task = SweepExpiredSession {
            config: super::Config {
                interval: Duration::from_secs(60),
            },
            service: svc.clone(),
        };
        task.execute(Perform(())).await.unwrap();

        assert!(!svc.session().is_authenticated());
        assert_eq!(store.persisted(), None);
    }

    #[tokio::test]
    async fn leaves_unexpired_session_alone() {
        let gateway = stub::StubGateway::default();
        let store = stub::StubStore::default();
        let svc = stub::service(gateway, store.clone());

        let token = stub::token(&stub::claims(
            DateTime::now() + Duration::from_secs(600),
        ));
        drop(
            svc.execute(CreateSession::ByToken(token.clone()))
                .await
                .unwrap(),
        );

        let task = SweepExpiredSession {
            config: super::Config {
                interval: Duration::from_secs(60),
            },
            service: svc.clone(),
        };
        task.execute(Perform(())).await.unwrap();

        assert!(svc.session().is_authenticated());
        assert_eq!(store.persisted(), Some(token));
    }

    #[tokio::test]
    async fn start_keeps_ticking() {
        let gateway = stub::StubGateway::default();
        let store = stub::StubStore::default();
        let svc = stub::service(gateway, store.clone());

        expire(&svc, &store);

        let sweeping = svc.execute(Start(By::new(super::Config {
            interval: Duration::from_millis(20),
        })));
        let timeout =
            tokio::time::timeout(Duration::from_millis(200), sweeping);
        // The sweep loop never completes on its own: the timeout cuts it
        // short once the expired session is destroyed.
        drop(timeout.await.unwrap_err());

        assert!(!svc.session().is_authenticated());
        assert_eq!(store.persisted(), None);
    }
}
