//! Share-related [`Gateway`] implementations.

use common::operations::{By, Select};
use reqwest::Method;
use serde::Deserialize;
use tracerr::Traced;

use crate::{
    domain::share,
    infra::{
        gateway::{self, http::Http},
        Gateway,
    },
    read,
};

use super::{AssetData, UserData};

/// Wire representation of a share received by the current user.
#[derive(Debug, Deserialize)]
struct ShareData {
    /// ID of the share.
    id: share::Id,

    /// Kind of the share.
    share_type: share::Kind,

    /// Whether the share is still active.
    is_active: bool,

    /// When the share was created.
    created_at: String,

    /// Shared asset.
    asset: AssetData,

    /// User the asset was shared by.
    #[serde(rename = "sharedBy")]
    shared_by: UserData,
}

impl Gateway<Select<By<Vec<read::share::Received>, ()>>> for Http {
    type Ok = Vec<read::share::Received>;
    type Err = Traced<gateway::Error>;

    async fn execute(
        &self,
        Select(_): Select<By<Vec<read::share::Received>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        use gateway::http::Error as E;

        let data: Vec<ShareData> = self
            .fetch(Method::GET, "shares/shared-with-me", None)
            .await
            .map_err(tracerr::wrap!())?;

        data.into_iter()
            .map(|received| {
                let shared_at = share::CreationDateTime::from_rfc3339(
                    &received.created_at,
                )
                .map_err(|e| E::Malformed(format!("`created_at`: {e}")))
                .map_err(tracerr::from_and_wrap!(=> gateway::Error))?;

                Ok(read::share::Received {
                    id: received.id,
                    asset: received
                        .asset
                        .into_summary(self)
                        .map_err(tracerr::from_and_wrap!(=> gateway::Error))?,
                    shared_by: received.shared_by.into_contact(),
                    kind: received.share_type,
                    is_active: received.is_active,
                    shared_at,
                })
            })
            .collect()
    }
}
