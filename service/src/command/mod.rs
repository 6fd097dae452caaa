//! [`Command`] definition.

pub mod create_session;
pub mod destroy_session;
pub mod register_by_invitation;
pub mod restore_session;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    create_session::CreateSession, destroy_session::DestroySession,
    register_by_invitation::RegisterByInvitation,
    restore_session::RestoreSession,
};

#[cfg(test)]
pub(crate) mod stub {
    //! Stub infrastructure for [`Command`] tests.

    use std::{
        sync::{Arc, Mutex},
        time::Duration,
    };

    use common::operations::{By, Delete, Insert, Perform, Select, Update};
    use tracerr::Traced;

    use crate::{
        domain::{invitation, session, user},
        infra::{gateway, store, Gateway, Store},
        task, Config, Service,
    };

    /// Creates a [`Service`] over the provided stub infrastructure.
    pub(crate) fn service(
        gateway: StubGateway,
        store: StubStore,
    ) -> Service<StubGateway, StubStore> {
        Service::new(
            Config {
                sweep_expired_session: task::sweep_expired_session::Config {
                    interval: Duration::from_secs(60),
                },
            },
            gateway,
            store,
        )
        .0
    }

    /// In-memory [`Store`] stub.
    #[derive(Clone, Debug, Default)]
    pub(crate) struct StubStore(Arc<Mutex<Option<session::Token>>>);

    impl StubStore {
        /// Returns the currently persisted token, if any.
        pub(crate) fn persisted(&self) -> Option<session::Token> {
            self.0.lock().unwrap().clone()
        }

        /// Persists the provided token directly, bypassing operations.
        pub(crate) fn seed(&self, token: session::Token) {
            *self.0.lock().unwrap() = Some(token);
        }
    }

    impl Store<Select<By<Option<session::Token>, ()>>> for StubStore {
        type Ok = Option<session::Token>;
        type Err = Traced<store::Error>;

        async fn execute(
            &self,
            _: Select<By<Option<session::Token>, ()>>,
        ) -> Result<Self::Ok, Self::Err> {
            Ok(self.persisted())
        }
    }

    impl Store<Insert<session::Token>> for StubStore {
        type Ok = ();
        type Err = Traced<store::Error>;

        async fn execute(
            &self,
            Insert(token): Insert<session::Token>,
        ) -> Result<Self::Ok, Self::Err> {
            *self.0.lock().unwrap() = Some(token);
            Ok(())
        }
    }

    impl Store<Delete<By<session::Token, ()>>> for StubStore {
        type Ok = ();
        type Err = Traced<store::Error>;

        async fn execute(
            &self,
            _: Delete<By<session::Token, ()>>,
        ) -> Result<Self::Ok, Self::Err> {
            *self.0.lock().unwrap() = None;
            Ok(())
        }
    }

    /// [`Gateway`] stub issuing a predefined token.
    #[derive(Clone, Debug, Default)]
    pub(crate) struct StubGateway {
        /// Token issued on a sign-in request.
        issued: Arc<Mutex<Option<session::Token>>>,

        /// Current default `Authorization` value.
        auth: Arc<Mutex<Option<session::Token>>>,
    }

    impl StubGateway {
        /// Creates a new [`StubGateway`] issuing the provided token on
        /// sign-in.
        pub(crate) fn issuing(token: session::Token) -> Self {
            let this = Self::default();
            *this.issued.lock().unwrap() = Some(token);
            this
        }

        /// Returns the current default `Authorization` value, if any.
        pub(crate) fn auth(&self) -> Option<session::Token> {
            self.auth.lock().unwrap().clone()
        }
    }

    impl Gateway<Perform<user::Credentials>> for StubGateway {
        type Ok = session::Token;
        type Err = Traced<gateway::Error>;

        async fn execute(
            &self,
            _: Perform<user::Credentials>,
        ) -> Result<Self::Ok, Self::Err> {
            Ok(self.issued.lock().unwrap().clone().expect("issued token"))
        }
    }

    impl Gateway<Perform<invitation::Registration>> for StubGateway {
        type Ok = ();
        type Err = Traced<gateway::Error>;

        async fn execute(
            &self,
            _: Perform<invitation::Registration>,
        ) -> Result<Self::Ok, Self::Err> {
            Ok(())
        }
    }

    impl Gateway<Update<Option<session::Token>>> for StubGateway {
        type Ok = ();
        type Err = Traced<gateway::Error>;

        async fn execute(
            &self,
            Update(token): Update<Option<session::Token>>,
        ) -> Result<Self::Ok, Self::Err> {
            *self.auth.lock().unwrap() = token;
            Ok(())
        }
    }

    /// Encodes a token with the provided claims.
    pub(crate) fn token(claims: &session::Claims) -> session::Token {
        jsonwebtoken::encode(
            &jsonwebtoken::Header::default(),
            claims,
            &jsonwebtoken::EncodingKey::from_secret(b"irrelevant"),
        )
        .unwrap()
        .into()
    }

    /// Builds [`session::Claims`] expiring at the provided instant.
    pub(crate) fn claims(
        expires_at: common::DateTime,
    ) -> session::Claims {
        session::Claims {
            user_id: user::Id::new(),
            role: Some("USER".to_owned()),
            expires_at: expires_at.coerce(),
        }
    }
}
