//! Folder naming rules
//!
//! Uploads for a `(className, personName)` pair land in a folder named
//! `<sanitize(className)>_<sanitize(personName)>`. The inverse mapping
//! ([`person_from_folder_name`]) splits on the last `_` and is lossy: a
//! person name that itself contains `_` cannot be told apart from the
//! class/person boundary. Deletion by person name inherits that ambiguity.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::error::AppError;

/// Maximum length of a sanitized segment, in characters.
pub const MAX_SEGMENT_CHARS: usize = 80;

/// Separator between the class and person components of a folder name.
pub const FOLDER_SEPARATOR: char = '_';

fn is_allowed(c: char) -> bool {
    c.is_alphabetic() || c.is_numeric() || is_combining_mark(c) || matches!(c, '-' | '_' | '.')
}

/// Turn arbitrary user text into a single safe path segment.
///
/// The text is NFKC-normalized and trimmed, path separators become `-`,
/// whitespace runs collapse to `_`, and anything that is not a letter,
/// number, mark, `-`, `_` or `.` is dropped. Letters from every script are
/// kept. The result is capped at [`MAX_SEGMENT_CHARS`] characters.
///
/// An empty result means the input carried nothing usable; callers treat
/// that as a missing required field.
pub fn sanitize_segment(text: &str) -> String {
    let normalized: String = text.nfkc().collect();

    let mut out = String::with_capacity(normalized.len());
    let mut in_whitespace = false;
    for c in normalized.trim().chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                out.push('_');
            }
            in_whitespace = true;
            continue;
        }
        in_whitespace = false;

        let c = if c == '/' || c == '\\' { '-' } else { c };
        if is_allowed(c) {
            out.push(c);
        }
    }

    out.chars().take(MAX_SEGMENT_CHARS).collect()
}

/// Derive the folder name for a `(className, personName)` pair.
///
/// Deterministic; does not validate. Use [`checked_folder_name`] where an
/// empty component must be rejected.
pub fn folder_name(class_name: &str, person_name: &str) -> String {
    format!(
        "{}{}{}",
        sanitize_segment(class_name),
        FOLDER_SEPARATOR,
        sanitize_segment(person_name)
    )
}

/// Like [`folder_name`] but fails when either component sanitizes to nothing.
pub fn checked_folder_name(class_name: &str, person_name: &str) -> Result<String, AppError> {
    let class_segment = sanitize_segment(class_name);
    let person_segment = sanitize_segment(person_name);
    if class_segment.is_empty() || person_segment.is_empty() {
        return Err(AppError::InvalidInput(
            "className and personName are required".to_string(),
        ));
    }
    Ok(format!(
        "{}{}{}",
        class_segment, FOLDER_SEPARATOR, person_segment
    ))
}

/// Best-effort inverse of [`folder_name`]: everything after the last `_`,
/// or the whole name when there is no `_`.
pub fn person_from_folder_name(folder_name: &str) -> &str {
    folder_name
        .rsplit_once(FOLDER_SEPARATOR)
        .map(|(_, person)| person)
        .unwrap_or(folder_name)
}
