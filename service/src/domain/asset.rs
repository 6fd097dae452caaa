//! Media asset definitions.

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf};
use derive_more::{AsRef, Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// ID of a media asset.
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
pub struct Id(Uuid);

/// Visibility of a media asset towards non-owners.
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Eq,
    PartialEq,
    Serialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Visibility {
    /// Anyone with the link may access the asset.
    Public,

    /// Only the users the asset was shared with may access it.
    Restricted,

    /// Only the owner may access the asset.
    Private,
}

/// MIME type of a media asset.
#[derive(AsRef, Clone, Debug, Display, Eq, From, PartialEq)]
#[as_ref(str, String)]
#[from(&str, String)]
pub struct MimeType(String);

impl MimeType {
    /// Indicates whether this [`MimeType`] describes a video.
    #[must_use]
    pub fn is_video(&self) -> bool {
        self.0.starts_with("video")
    }

    /// Indicates whether this [`MimeType`] describes an image.
    #[must_use]
    pub fn is_image(&self) -> bool {
        self.0.starts_with("image")
    }
}

/// [`DateTime`] when a media asset was created.
pub type CreationDateTime = DateTimeOf<(Id, unit::Creation)>;
