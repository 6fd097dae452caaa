//! Token store implementations.

pub mod file;

use derive_more::{Display, Error as StdError, From};

pub use self::file::File;

/// Token store operation.
pub use common::Handler as Store;

/// [`Store`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// [`File`] I/O error.
    #[display("`File` store operation failed: {_0}")]
    Io(std::io::Error),
}
