//! Shared name generation for stored files.
//!
//! Stored filename: `<timestamp_ms>_<sanitize(first 60 chars of stem) or "file"><ext>`.
//! Item id: `<folder>/<filename>`. Public URL: `/uploads/<folder>/<filename>`.

use mediafold_core::{sanitize_segment, Item};

/// Public route prefix under which stored media is served.
pub const PUBLIC_URL_PREFIX: &str = "/uploads";

/// How much of the original stem is considered before sanitizing.
const MAX_STEM_CHARS: usize = 60;

/// Split an uploaded file name into stem and extension (with its dot).
///
/// Any client-side directory part is dropped. A leading dot does not start
/// an extension, so `.bashrc` has no extension.
fn split_original_name(original: &str) -> (&str, &str) {
    let base = original.rsplit(['/', '\\']).next().unwrap_or(original);
    match base.rfind('.') {
        Some(idx) if idx > 0 => (&base[..idx], &base[idx..]),
        _ => (base, ""),
    }
}

/// Name a file is stored under inside its folder.
///
/// The extension is kept exactly as uploaded. Two files with the same
/// sanitized stem in the same millisecond collide; see
/// [`numbered_filename`] for disambiguating within one batch.
pub fn stored_filename(timestamp_ms: i64, original: &str) -> String {
    numbered_filename(timestamp_ms, original, 0)
}

/// [`stored_filename`] with `-<n>` appended to the stem when `n > 0`.
pub fn numbered_filename(timestamp_ms: i64, original: &str, n: usize) -> String {
    let (stem, ext) = split_original_name(original);
    let head: String = stem.chars().take(MAX_STEM_CHARS).collect();
    let mut safe = sanitize_segment(&head);
    if safe.is_empty() {
        safe = "file".to_string();
    }
    if n > 0 {
        safe = format!("{}-{}", safe, n);
    }
    format!("{}_{}{}", timestamp_ms, safe, ext)
}

pub fn item_id(folder: &str, filename: &str) -> String {
    format!("{}/{}", folder, filename)
}

pub fn public_url(folder: &str, filename: &str) -> String {
    format!("{}/{}/{}", PUBLIC_URL_PREFIX, folder, filename)
}

/// Split an item id into `(folder, filename)`; both must be non-empty.
pub fn parse_item_id(id: &str) -> Option<(&str, &str)> {
    let (folder, filename) = id.split_once('/')?;
    if folder.is_empty() || filename.is_empty() {
        return None;
    }
    Some((folder, filename))
}

/// Fill fields that records from older versions lack. Applied when items
/// are served; the manifest on disk is left as it is.
pub fn backfill_item(item: &mut Item, folder: &str) {
    if item.filename.is_none() {
        item.filename = item
            .url
            .as_deref()
            .and_then(|url| url.rsplit('/').next())
            .filter(|name| !name.is_empty())
            .map(str::to_string);
    }
    if let Some(filename) = item.filename.clone() {
        if item.id.is_none() {
            item.id = Some(item_id(folder, &filename));
        }
        if item.url.is_none() {
            item.url = Some(public_url(folder, &filename));
        }
    }
    item.folder_name = Some(folder.to_string());
}
