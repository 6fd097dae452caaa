//! Media asset read model definitions.

use std::time::Duration;

use crate::{domain::asset, read};

/// Listed media asset.
#[derive(Clone, Debug)]
pub struct Summary {
    /// [`asset::Id`] of the asset.
    pub id: asset::Id,

    /// File name of the asset.
    pub name: String,

    /// [`asset::MimeType`] of the asset.
    pub mime_type: asset::MimeType,

    /// Resolved thumbnail URL of the asset, if it has one.
    pub thumbnail_url: Option<String>,

    /// When the asset was created.
    pub created_at: asset::CreationDateTime,

    /// [`Duration`] of the asset, when it's a video.
    pub duration: Option<Duration>,

    /// Size of the original file in bytes, if reported.
    pub size_bytes: Option<u64>,

    /// Uploader of the asset, if reported.
    pub uploader: Option<read::user::Record>,
}
