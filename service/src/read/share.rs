//! Asset share read model definitions.

use std::collections::HashMap;

use crate::{
    domain::{asset, share},
    read,
};

/// Share received by the current user.
#[derive(Clone, Debug)]
pub struct Received {
    /// [`share::Id`] of the share itself.
    pub id: share::Id,

    /// Shared asset.
    pub asset: read::asset::Summary,

    /// User who shared the asset.
    pub shared_by: read::user::Contact,

    /// [`share::Kind`] of the share.
    pub kind: share::Kind,

    /// Whether the share is still active.
    pub is_active: bool,

    /// When the share was created.
    pub shared_at: share::CreationDateTime,
}

/// Publicly shared asset, looked up without authentication.
#[derive(Clone, Debug)]
pub struct SharedAsset {
    /// [`asset::Id`] of the asset.
    pub id: asset::Id,

    /// File name of the asset.
    pub name: String,

    /// [`asset::MimeType`] of the asset.
    pub mime_type: asset::MimeType,

    /// When the asset was created.
    pub created_at: asset::CreationDateTime,

    /// Size of the original file in bytes, if reported.
    pub size_bytes: Option<u64>,

    /// Uploader of the asset, if reported.
    pub uploader: Option<read::user::Record>,

    /// User who shared the asset, if reported.
    pub shared_by: Option<read::user::Contact>,

    /// [`asset::Visibility`] the asset was served under.
    pub visibility: asset::Visibility,

    /// Resolved URLs of the asset's variants, keyed by variant name.
    pub paths: HashMap<String, String>,
}
