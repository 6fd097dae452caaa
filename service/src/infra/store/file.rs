//! File-backed token [`Store`] implementation.
//!
//! [`Store`]: crate::infra::Store

use std::{io, path::PathBuf};

use common::operations::{By, Delete, Insert, Select};
use tokio::fs;
use tracerr::Traced;

#[cfg(doc)]
use crate::infra::Store;
use crate::{domain::session, infra::store};

/// [`Store`] persisting the token as a single plain-text file.
///
/// The single fixed location plays the role the fixed browser-storage key
/// plays for a web client: absence of the file means logged out.
#[derive(Clone, Debug)]
pub struct File {
    /// Path of the token file.
    path: PathBuf,
}

impl File {
    /// Creates a new [`File`] store at the provided `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl store::Store<Select<By<Option<session::Token>, ()>>> for File {
    type Ok = Option<session::Token>;
    type Err = Traced<store::Error>;

    async fn execute(
        &self,
        _: Select<By<Option<session::Token>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        match fs::read_to_string(&self.path).await {
            Ok(raw) => {
                let raw = raw.trim();
                Ok((!raw.is_empty()).then(|| raw.into()))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(tracerr::new!(store::Error::Io(e))),
        }
    }
}

impl store::Store<Insert<session::Token>> for File {
    type Ok = ();
    type Err = Traced<store::Error>;

    async fn execute(
        &self,
        Insert(token): Insert<session::Token>,
    ) -> Result<Self::Ok, Self::Err> {
        use store::Error as E;

        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .await
                .map_err(tracerr::from_and_wrap!(=> E))?;
        }
        fs::write(&self.path, token.to_string())
            .await
            .map_err(tracerr::from_and_wrap!(=> E))
    }
}

impl store::Store<Delete<By<session::Token, ()>>> for File {
    type Ok = ();
    type Err = Traced<store::Error>;

    async fn execute(
        &self,
        _: Delete<By<session::Token, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(tracerr::new!(store::Error::Io(e))),
        }
    }
}
