//! [`Gateway`] implementations.
//!
//! [`Gateway`]: crate::infra::Gateway

#[path = "asset.rs"]
mod asset_impls;
mod session;
mod share;
#[path = "user.rs"]
mod user_impls;

use std::time::Duration;

use serde::Deserialize;

use crate::{
    domain::{asset, user},
    read,
};

use super::{Error, Http};

/// Wire representation of a user reference.
#[derive(Debug, Deserialize)]
pub(super) struct UserData {
    /// ID of the user.
    id: user::Id,

    /// Full name of the user.
    full_name: String,

    /// Email address of the user.
    email: String,

    /// Raw role of the user.
    #[serde(default)]
    role: Option<String>,

    /// When the user was created, if reported.
    #[serde(default, rename = "createdAt")]
    created_at: Option<String>,
}

impl UserData {
    /// Maps this [`UserData`] into a [`read::user::Record`].
    fn into_record(self) -> read::user::Record {
        read::user::Record {
            id: self.id,
            full_name: self.full_name,
            email: self.email,
            role: self.role.as_deref().and_then(user::Role::recognize),
            created_at: self.created_at.as_deref().and_then(|raw| {
                user::CreationDateTime::from_rfc3339(raw).ok()
            }),
        }
    }

    /// Maps this [`UserData`] into a [`read::user::Contact`].
    fn into_contact(self) -> read::user::Contact {
        read::user::Contact {
            id: self.id,
            full_name: self.full_name,
            email: self.email,
        }
    }
}

/// Wire representation of a single asset metadata entry.
#[derive(Debug, Deserialize)]
pub(super) struct MetadataEntry {
    /// Key of the entry.
    key: String,

    /// Free-form value of the entry.
    value: serde_json::Value,
}

/// Wire representation of a listed asset.
#[derive(Debug, Deserialize)]
pub(super) struct AssetData {
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

    /// Metadata entries of the asset.
    #[serde(default)]
    metadata: Vec<MetadataEntry>,

    /// Uploader of the asset, if reported.
    #[serde(default)]
    uploader: Option<UserData>,
}

impl AssetData {
    /// Maps this [`AssetData`] into a [`read::asset::Summary`], resolving
    /// thumbnail/duration/size out of the metadata entries.
    fn into_summary(self, http: &Http) -> Result<read::asset::Summary, Error> {
        let created_at = asset::CreationDateTime::from_rfc3339(
            &self.created_at,
        )
        .map_err(|e| Error::Malformed(format!("`created_at`: {e}")))?;

        let mime_type = asset::MimeType::from(self.mime_type);
        Ok(read::asset::Summary {
            id: self.asset_id,
            thumbnail_url: thumbnail_path(&self.metadata)
                .map(|path| http.asset_url(path)),
            created_at,
            duration: mime_type
                .is_video()
                .then(|| duration(&self.metadata))
                .flatten(),
            size_bytes: original_size(self.size_bytes, &self.metadata),
            uploader: self.uploader.map(UserData::into_record),
            name: self.filename,
            mime_type,
        })
    }
}

/// Looks up a thumbnail path among the provided metadata entries.
fn thumbnail_path(metadata: &[MetadataEntry]) -> Option<&str> {
    metadata
        .iter()
        .find(|m| m.key.contains("variants"))
        .and_then(|m| {
            m.value.get("thumbnails")?.get(0)?.get("path")?.as_str()
        })
}

/// Looks up the original video duration among the provided metadata entries.
fn duration(metadata: &[MetadataEntry]) -> Option<Duration> {
    metadata
        .iter()
        .find(|m| m.key == "video_variants")?
        .value
        .get("original")?
        .get("duration")?
        .as_f64()
        .map(Duration::from_secs_f64)
}

/// Resolves the original file size: the reported one, or the one recorded in
/// the variants metadata.
fn original_size(
    size_bytes: Option<u64>,
    metadata: &[MetadataEntry],
) -> Option<u64> {
    size_bytes.or_else(|| {
        ["video_variants", "image_variants"].iter().find_map(|key| {
            metadata
                .iter()
                .find(|m| &m.key == key)?
                .value
                .get("original")?
                .get("size")?
                .as_u64()
        })
    })
}
