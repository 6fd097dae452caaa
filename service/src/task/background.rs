//! Background environment for running [`Task`]s.

use std::{
    error::Error,
    fmt,
    future::{Future, IntoFuture},
};

use futures::{
    future::{self, LocalBoxFuture},
    FutureExt as _, TryFutureExt as _,
};

#[cfg(doc)]
use crate::Task;

/// Background environment for running [`Task`]s.
///
/// Collected [`Task`]s are driven concurrently once the [`Background`] is
/// awaited; the first failing one fails the whole environment.
#[derive(Default)]
pub struct Background {
    /// Collected [`Task`] futures.
    tasks: Vec<LocalBoxFuture<'static, Result<(), Box<dyn Error>>>>,
}

impl fmt::Debug for Background {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Background")
            .field("tasks", &self.tasks.len())
            .finish()
    }
}

impl Background {
    /// Collects a new [`Task`] into the [`Background`] environment.
    pub fn spawn<F, E>(&mut self, future: F)
    where
        F: Future<Output = Result<(), E>> + 'static,
        E: Error + 'static,
    {
        self.tasks.push(
            future
                .map_err(|e| Box::<dyn Error + 'static>::from(Box::new(e)))
                .boxed_local(),
        );
    }
}

impl IntoFuture for Background {
    type Output = Result<(), Box<dyn Error>>;
    type IntoFuture = LocalBoxFuture<'static, Self::Output>;

    fn into_future(self) -> Self::IntoFuture {
        future::try_join_all(self.tasks).map_ok(drop).boxed_local()
    }
}
