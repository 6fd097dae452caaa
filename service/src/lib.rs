//! Service contains the client-side logic of the application.
//!
//! List of available Cargo features:
#![doc = document_features::document_features!()]
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod command;
pub mod domain;
pub mod infra;
pub mod query;
pub mod read;
pub mod task;

use std::{
    error::Error as StdError,
    sync::{Arc, PoisonError, RwLock},
};

use common::operations::{By, Start};

use crate::domain::Session;

pub use self::{command::Command, query::Query, task::Task};

/// [`Service`] configuration.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// [`task::SweepExpiredSession`] configuration.
    pub sweep_expired_session: task::sweep_expired_session::Config,
}

/// Domain service.
///
/// Holds the shared [`Session`] state and the injected infrastructure: the
/// `Gw` API gateway and the `St` token store.
#[derive(Clone, Debug)]
pub struct Service<Gw, St> {
    /// Configuration of this [`Service`].
    config: Config,

    /// API gateway of this [`Service`].
    gateway: Gw,

    /// Token store of this [`Service`].
    store: St,

    /// Current [`Session`] of this [`Service`].
    session: Arc<RwLock<Session>>,
}

impl<Gw, St> Service<Gw, St> {
    /// Creates a new [`Service`] with the provided parameters.
    pub fn new(config: Config, gateway: Gw, store: St) -> (Self, task::Background)
    where
        Self: Task<
                Start<
                    By<
                        task::SweepExpiredSession<Self>,
                        task::sweep_expired_session::Config,
                    >,
                >,
                Ok = (),
                Err: StdError + 'static,
            > + Clone
            + 'static,
    {
        let this = Service {
            config,
            gateway,
            store,
            session: Arc::new(RwLock::new(Session::Guest)),
        };

        let mut bg = task::Background::default();
        let svc = this.clone();
        bg.spawn(async move {
            svc.execute(Start(By::new(svc.config().sweep_expired_session)))
                .await
        });

        (this, bg)
    }

    /// Returns [`Config`] of this [`Service`].
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the API gateway of this [`Service`].
    #[must_use]
    pub fn gateway(&self) -> &Gw {
        &self.gateway
    }

    /// Returns the token store of this [`Service`].
    #[must_use]
    pub fn store(&self) -> &St {
        &self.store
    }

    /// Returns a snapshot of the current [`Session`].
    #[must_use]
    pub fn session(&self) -> Session {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replaces the current [`Session`] with the provided one.
    pub(crate) fn set_session(&self, session: Session) {
        *self
            .session
            .write()
            .unwrap_or_else(PoisonError::into_inner) = session;
    }
}
