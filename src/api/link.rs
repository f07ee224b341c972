//! Download link resolution
//!
//! Pure mapping from an icon and its download options to the rendered asset
//! URL. No I/O happens here.

use crate::icon::{DownloadOptions, IconMeta};

/// Compute the raster asset URL for `icon` under `options`
///
/// Multi-color icons never carry a color override.
pub fn resolve_download_link(base_url: &str, icon: &IconMeta, options: &DownloadOptions) -> String {
    let mut link = format!(
        "{}/?size={}&id={}&format={}",
        base_url.trim_end_matches('/'),
        options.size,
        urlencoding::encode(&icon.id),
        options.format.as_str()
    );

    if let Some(color) = options.color.as_ref().filter(|_| !icon.is_color) {
        link.push_str(&format!("&color={}", color.hex()));
    }

    link
}
