//! API constants

/// API base path prefix
pub const API_PREFIX: &str = "/api";

/// Longest description kept on an item, in characters
pub const MAX_DESCRIPTION_CHARS: usize = 2000;

/// Multipart field names accepted by the upload endpoint
pub const FIELD_CLASS_NAME: &str = "className";
pub const FIELD_PERSON_NAME: &str = "personName";
pub const FIELD_DESCRIPTION: &str = "description";
pub const FIELD_FILES: &str = "files";
