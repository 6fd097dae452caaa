//! Plain-line rendering of read models.
//!
//! Line output only: anything resembling grid or layout chrome is out of
//! scope for this client.

use std::time::Duration;

use service::read;

/// Renders the provided [`Duration`] as `h:mm:ss`, or `m:ss` while under
/// an hour.
#[must_use]
pub fn duration(value: Duration) -> String {
    let total = value.as_secs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;

    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}

/// Renders the provided byte count with a binary unit, one decimal place
/// for anything above bytes.
#[expect(clippy::cast_precision_loss, reason = "display only")]
#[must_use]
pub fn size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];

    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{size:.0} {}", UNITS[unit])
    } else {
        format!("{size:.1} {}", UNITS[unit])
    }
}

/// Renders a single asset listing row.
#[must_use]
pub fn asset_row(asset: &read::asset::Summary) -> String {
    let mut row = format!("{}  [{}]", asset.name, asset.mime_type);
    if let Some(bytes) = asset.size_bytes {
        row = format!("{row}  {}", size(bytes));
    }
    if let Some(length) = asset.duration {
        row = format!("{row}  {}", duration(length));
    }
    if let Some(uploader) = &asset.uploader {
        row = format!("{row}  by {}", uploader.full_name);
    }
    row
}

/// Renders a single received-share row.
#[must_use]
pub fn share_row(received: &read::share::Received) -> String {
    let state = if received.is_active { "" } else { "  (inactive)" };
    format!(
        "{}  [{}]  {}  from {}{state}",
        received.asset.name,
        received.asset.mime_type,
        received.kind,
        received.shared_by.full_name,
    )
}

/// Renders a single user directory row.
#[must_use]
pub fn user_row(user: &read::user::Record) -> String {
    let role = user
        .role
        .map_or_else(|| "-".to_owned(), |role| role.to_string());
    format!("{}  <{}>  {role}", user.full_name, user.email)
}

/// Renders a publicly shared asset, one property per line.
#[must_use]
pub fn shared_asset(asset: &read::share::SharedAsset) -> String {
    let mut lines = vec![
        format!("name: {}", asset.name),
        format!("type: {}", asset.mime_type),
        format!("visibility: {}", asset.visibility),
        format!("created: {}", asset.created_at.to_rfc3339()),
    ];
    if let Some(bytes) = asset.size_bytes {
        lines.push(format!("size: {}", size(bytes)));
    }
    if let Some(uploader) = &asset.uploader {
        lines.push(format!("uploaded by: {}", uploader.full_name));
    }
    if let Some(contact) = &asset.shared_by {
        lines.push(format!("shared by: {}", contact.full_name));
    }
    for (variant, url) in &asset.paths {
        lines.push(format!("{variant}: {url}"));
    }
    lines.join("\n")
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use super::{duration, size};

    #[test]
    fn duration_renders_minutes_and_seconds() {
        assert_eq!(duration(Duration::from_secs(0)), "0:00");
        assert_eq!(duration(Duration::from_secs(61)), "1:01");
        assert_eq!(duration(Duration::from_secs(599)), "9:59");
    }

    #[test]
    fn duration_renders_hours_when_present() {
        assert_eq!(duration(Duration::from_secs(3600)), "1:00:00");
        assert_eq!(duration(Duration::from_secs(3661)), "1:01:01");
        assert_eq!(duration(Duration::from_secs(7325)), "2:02:05");
    }

    #[test]
    fn size_renders_bytes_without_decimals() {
        assert_eq!(size(0), "0 B");
        assert_eq!(size(500), "500 B");
        assert_eq!(size(1023), "1023 B");
    }

    #[test]
    fn size_scales_binary_units() {
        assert_eq!(size(1024), "1.0 KB");
        assert_eq!(size(1536), "1.5 KB");
        assert_eq!(size(1024 * 1024), "1.0 MB");
        assert_eq!(size(5 * 1024 * 1024 * 1024), "5.0 GB");
    }
}
