//! [`Query`] collection related to shares received by the current user.
//!
//! [`Query`]: crate::Query

use common::operations::By;

use crate::read;

use super::GatewayQuery;

/// Queries all the shares received by the current user.
pub type List = GatewayQuery<By<Vec<read::share::Received>, ()>>;
