//! Upload policy: which files are accepted and how they are named on disk.

use uuid::Uuid;

use crate::error::CoreError;

/// Default per-file size limit (10 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Accepted content types and the extension used when storing them.
pub const ALLOWED_CONTENT_TYPES: &[(&str, &str)] = &[
    ("image/png", "png"),
    ("image/jpeg", "jpg"),
    ("image/webp", "webp"),
    ("image/gif", "gif"),
    ("application/pdf", "pdf"),
    (
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "docx",
    ),
    ("text/plain", "txt"),
];

/// Extension for an accepted content type, ignoring parameters such as `; charset=`.
pub fn extension_for(content_type: &str) -> Option<&'static str> {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    ALLOWED_CONTENT_TYPES
        .iter()
        .find(|(ct, _)| *ct == essence)
        .map(|(_, ext)| *ext)
}

/// Validate an incoming file and return the extension to store it under.
pub fn validate_upload(
    content_type: &str,
    size: usize,
    max_bytes: usize,
) -> Result<&'static str, CoreError> {
    let ext = extension_for(content_type).ok_or_else(|| {
        CoreError::Validation(format!("Unsupported file type '{content_type}'"))
    })?;
    if size == 0 {
        return Err(CoreError::Validation("Uploaded file is empty".to_string()));
    }
    if size > max_bytes {
        return Err(CoreError::Validation(format!(
            "File is {size} bytes; the limit is {max_bytes} bytes"
        )));
    }
    Ok(ext)
}

/// Name a stored file. Client file names never reach the filesystem.
pub fn stored_file_name(id: Uuid, ext: &str) -> String {
    format!("{}.{ext}", id.simple())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_type_parameters_are_ignored() {
        assert_eq!(extension_for("text/plain; charset=utf-8"), Some("txt"));
        assert_eq!(extension_for("IMAGE/PNG"), Some("png"));
        assert_eq!(extension_for("application/x-msdownload"), None);
    }

    #[test]
    fn size_limits_enforced() {
        assert_eq!(validate_upload("application/pdf", 10, 100).unwrap(), "pdf");
        assert!(validate_upload("application/pdf", 0, 100).is_err());
        assert!(validate_upload("application/pdf", 101, 100).is_err());
        assert!(validate_upload("application/zip", 10, 100).is_err());
    }

    #[test]
    fn stored_name_has_no_client_input() {
        let id = Uuid::new_v4();
        let name = stored_file_name(id, "pdf");
        assert!(name.ends_with(".pdf"));
        assert_eq!(name.len(), 32 + 4);
        assert!(!name.contains('/'));
    }
}
