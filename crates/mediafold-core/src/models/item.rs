use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Kind of uploaded media, derived from the MIME type prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Image,
    Video,
}

impl ItemType {
    /// `image/*` maps to `Image`, `video/*` to `Video`, anything else to `None`.
    pub fn from_mime(content_type: &str) -> Option<Self> {
        let mime = content_type.trim().to_ascii_lowercase();
        if mime.starts_with("image/") {
            Some(ItemType::Image)
        } else if mime.starts_with("video/") {
            Some(ItemType::Video)
        } else {
            None
        }
    }
}

/// One uploaded file record as stored in a folder's `index.json`.
///
/// Records written by older versions may lack `type`, `mimeType`, `filename`
/// or `id`, so those are optional on read and back-filled when served.
/// `folderName` is never persisted; it is attached when items are listed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub item_type: Option<ItemType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Epoch milliseconds, shared by every item of one upload batch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploaded_at: Option<i64>,
    #[serde(default)]
    pub description: String,
    /// Raw class name as submitted, not sanitized
    #[serde(default)]
    pub class_name: String,
    /// Raw person name as submitted, not sanitized
    #[serde(default)]
    pub person_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_name: Option<String>,
}

impl Item {
    /// Timestamp used for ordering; records without one sort as 0.
    pub fn sort_key(&self) -> i64 {
        self.uploaded_at.unwrap_or(0)
    }

    /// Match against an `<folder>/<filename>` id, tolerating legacy records
    /// that only carry a `filename` or only a `url`.
    pub fn matches(&self, id: &str, filename: &str) -> bool {
        if self.id.as_deref() == Some(id) {
            return true;
        }
        if self.filename.as_deref() == Some(filename) {
            return true;
        }
        let suffix = format!("/{}", filename);
        self.url.as_deref().is_some_and(|url| url.ends_with(&suffix))
    }
}

/// Contents of one folder's `index.json`, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Manifest {
    #[serde(default)]
    pub items: Vec<Item>,
}
