//! Read models of the domain.
//!
//! Display-oriented views mirrored from API responses: no client-side
//! consistency rules beyond typed IDs and recognized enums.

pub mod asset;
pub mod share;
pub mod user;
