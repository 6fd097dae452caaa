//! [`Query`] for looking up a publicly shared asset.
//!
//! [`Query`]: crate::Query

use common::operations::{By, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{asset, share},
    infra::{gateway, Gateway},
    read, Service,
};

use super::Query;

/// [`Query`] looking up a shared asset by its [`asset::Id`] without
/// authentication.
///
/// The asset's visibility is checked first: a private asset is not
/// accessible at all, a public or restricted one is fetched through the
/// corresponding endpoint.
#[derive(Clone, Copy, Debug, From)]
pub struct ByAssetId(pub asset::Id);

/// Scope of a shared asset lookup: which asset, through which kind of
/// share.
#[derive(Clone, Copy, Debug)]
pub struct Scope {
    /// [`asset::Id`] of the asset to look up.
    pub asset_id: asset::Id,

    /// [`share::Kind`] the asset is served under.
    pub kind: share::Kind,
}

impl<Gw, St> Query<ByAssetId> for Service<Gw, St>
where
    Gw: Gateway<
            Select<By<asset::Visibility, asset::Id>>,
            Ok = asset::Visibility,
            Err = Traced<gateway::Error>,
        > + Gateway<
            Select<By<read::share::SharedAsset, Scope>>,
            Ok = read::share::SharedAsset,
            Err = Traced<gateway::Error>,
        >,
{
    type Ok = read::share::SharedAsset;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        ByAssetId(asset_id): ByAssetId,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let visibility = self
            .gateway()
            .execute(Select(By::new(asset_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let kind = match visibility {
            asset::Visibility::Public => share::Kind::Public,
            asset::Visibility::Restricted => share::Kind::Restricted,
            asset::Visibility::Private => {
                return Err(tracerr::new!(E::NotAccessible(asset_id)));
            }
        };

        self.gateway()
            .execute(Select(By::new(Scope { asset_id, kind })))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`ByAssetId`] [`Query`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Gateway`] error.
    #[display("`Gateway` operation failed: {_0}")]
    Gateway(gateway::Error),

    /// Asset is private and not accessible.
    #[display("Asset `{_0}` is private and not accessible")]
    #[from(ignore)]
    NotAccessible(#[error(not(source))] asset::Id),
}
