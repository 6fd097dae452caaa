//! [`Query`] collection related to media asset listings.
//!
//! [`Query`]: crate::Query

use common::operations::By;

use crate::read;

use super::GatewayQuery;

/// Queries all the media assets visible to the current user.
pub type List = GatewayQuery<By<Vec<read::asset::Summary>, ()>>;
