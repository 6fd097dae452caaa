//! Infrastructure layer.

pub mod gateway;
pub mod store;

#[cfg(feature = "http")]
pub use self::gateway::{http, Http};
pub use self::{gateway::Gateway, store::Store};
