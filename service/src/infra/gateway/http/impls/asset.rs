//! Asset-related [`Gateway`] implementations.

use std::collections::HashMap;

use common::operations::{By, Select};
use reqwest::Method;
use serde::Deserialize;
use tracerr::Traced;

use crate::{
    domain::{asset, share},
    infra::{
        gateway::{self, http::Http},
        Gateway,
    },
    query::shared_asset,
    read,
};

use super::{AssetData, UserData};

impl Gateway<Select<By<Vec<read::asset::Summary>, ()>>> for Http {
    type Ok = Vec<read::asset::Summary>;
    type Err = Traced<gateway::Error>;

    async fn execute(
        &self,
        Select(_): Select<By<Vec<read::asset::Summary>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        let data: Vec<AssetData> = self
            .fetch(Method::GET, "assets", None)
            .await
            .map_err(tracerr::wrap!())?;

        data.into_iter()
            .map(|asset| {
                asset
                    .into_summary(self)
                    .map_err(tracerr::from_and_wrap!(=> gateway::Error))
            })
            .collect()
    }
}

/// Wire representation of an asset visibility lookup.
#[derive(Debug, Deserialize)]
struct VisibilityData {
    /// Reported visibility of the asset.
    visibility_status: asset::Visibility,
}

impl Gateway<Select<By<asset::Visibility, asset::Id>>> for Http {
    type Ok = asset::Visibility;
    type Err = Traced<gateway::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<asset::Visibility, asset::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        let data: VisibilityData = self
            .fetch(Method::GET, &format!("assets/{id}/visibility"), None)
            .await
            .map_err(tracerr::wrap!())?;

        Ok(data.visibility_status)
    }
}

/// Wire representation of a publicly shared asset.
#[derive(Debug, Deserialize)]
struct SharedAssetData {
    /// ID of the asset.
    asset_id: asset::Id,

    /// File name of the asset.
    filename: String,

    /// MIME type of the asset.
    mime_type: String,

    /// Size of the asset file in bytes, if reported.
    #[serde(default)]
    size_bytes: Option<u64>,

    /// When the asset was created.
    created_at: String,

    /// Uploader of the asset, if reported.
    #[serde(default)]
    uploader: Option<UserData>,

    /// User the asset was shared by, if reported.
    #[serde(default)]
    shared_by: Option<UserData>,

    /// Storage paths of the asset's variants, keyed by variant name.
    #[serde(default)]
    paths: HashMap<String, String>,
}

impl Gateway<Select<By<read::share::SharedAsset, shared_asset::Scope>>>
    for Http
{
    type Ok = read::share::SharedAsset;
    type Err = Traced<gateway::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<read::share::SharedAsset, shared_asset::Scope>>,
    ) -> Result<Self::Ok, Self::Err> {
        use gateway::http::Error as E;

        let shared_asset::Scope { asset_id, kind } = by.into_inner();
        let segment = match kind {
            share::Kind::Public => "public",
            share::Kind::Restricted => "restricted",
        };

        let data: SharedAssetData = self
            .fetch(
                Method::GET,
                &format!("assets/{asset_id}/{segment}"),
                None,
            )
            .await
            .map_err(tracerr::wrap!())?;

        let created_at = asset::CreationDateTime::from_rfc3339(
            &data.created_at,
        )
        .map_err(|e| E::Malformed(format!("`created_at`: {e}")))
        .map_err(tracerr::from_and_wrap!(=> gateway::Error))?;

        Ok(read::share::SharedAsset {
            id: data.asset_id,
            name: data.filename,
            mime_type: data.mime_type.into(),
            created_at,
            size_bytes: data.size_bytes,
            uploader: data.uploader.map(UserData::into_record),
            shared_by: data.shared_by.map(UserData::into_contact),
            visibility: match kind {
                share::Kind::Public => asset::Visibility::Public,
                share::Kind::Restricted => asset::Visibility::Restricted,
            },
            paths: data
                .paths
                .into_iter()
                .map(|(variant, path)| {
                    let url = self.asset_url(&path);
                    (variant, url)
                })
                .collect(),
        })
    }
}
