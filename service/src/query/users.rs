//! [`Query`] collection related to the platform user directory.
//!
//! [`Query`]: crate::Query

use common::operations::By;

use crate::read;

use super::GatewayQuery;

/// Queries all the users of the platform.
pub type List = GatewayQuery<By<Vec<read::user::Record>, ()>>;
