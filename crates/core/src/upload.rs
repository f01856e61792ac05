//! Image upload validation and stored-filename rules.
//!
//! Uploads are accepted by extension and size only. Stored names are derived
//! from the client filename after stripping anything that could escape the
//! target directory, then made unique with a random hex suffix.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Image extensions accepted for upload and shown in listings.
pub const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp"];

/// Default upload size limit (16 MiB).
pub const MAX_UPLOAD_BYTES: u64 = 16 * 1024 * 1024;

/// Length of the hex disambiguator appended to stored filenames.
pub const DISAMBIGUATOR_LEN: usize = 8;

/// Stem used when sanitization leaves nothing of the original name.
const FALLBACK_STEM: &str = "image";

const MIB: u64 = 1024 * 1024;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadError {
    #[error("No file part in the request")]
    MissingFile,

    #[error("No file selected")]
    EmptyFilename,

    #[error("File is too large. Maximum size is {} MB", .max / MIB)]
    FileTooLarge { size: u64, max: u64 },

    #[error("Unsupported file format. Allowed formats: png, jpg, jpeg, gif, webp")]
    UnsupportedExtension(String),
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Lowercased text after the last dot, if any.
pub fn file_extension(filename: &str) -> Option<String> {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty())
}

/// Whether `filename` carries one of [`ALLOWED_EXTENSIONS`].
pub fn is_image_filename(filename: &str) -> bool {
    file_extension(filename).is_some_and(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
}

/// Check an incoming upload against the size limit and extension set.
pub fn validate_upload(filename: &str, size: u64, max_bytes: u64) -> Result<(), UploadError> {
    if filename.trim().is_empty() {
        return Err(UploadError::EmptyFilename);
    }

    if size > max_bytes {
        return Err(UploadError::FileTooLarge {
            size,
            max: max_bytes,
        });
    }

    if !is_image_filename(filename) {
        return Err(UploadError::UnsupportedExtension(
            file_extension(filename).unwrap_or_default(),
        ));
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Filenames
// ---------------------------------------------------------------------------

/// Reduce a client-supplied filename to a safe single path component.
///
/// Drops any directory part (both `/` and `\`), keeps ASCII alphanumerics,
/// `.`, `-` and `_`, turns whitespace into `_`, and trims leading and
/// trailing dots and underscores. The result may be empty.
pub fn sanitize_filename(filename: &str) -> String {
    let base = filename.rsplit(['/', '\\']).next().unwrap_or_default();

    let mut out = String::with_capacity(base.len());
    for ch in base.chars() {
        if ch.is_ascii_alphanumeric() || matches!(ch, '.' | '-' | '_') {
            out.push(ch);
        } else if ch.is_whitespace() {
            out.push('_');
        }
    }

    out.trim_matches(|c| c == '.' || c == '_').to_string()
}

/// Random lowercase hex token of [`DISAMBIGUATOR_LEN`] characters.
pub fn random_disambiguator() -> String {
    format!("{:08x}", rand::random::<u32>())
}

/// Build the on-disk name for an upload: `<stem>_<token>.<ext>`.
///
/// The extension is taken from the original name and lowercased. Fails with
/// [`UploadError::UnsupportedExtension`] when there is none.
pub fn stored_filename(original: &str, token: &str) -> Result<String, UploadError> {
    let ext = file_extension(original)
        .ok_or_else(|| UploadError::UnsupportedExtension(String::new()))?;

    let raw_stem = original
        .rsplit_once('.')
        .map_or(original, |(stem, _)| stem);
    let sanitized = sanitize_filename(raw_stem);
    let stem = if sanitized.is_empty() {
        FALLBACK_STEM
    } else {
        sanitized.as_str()
    };

    Ok(format!("{stem}_{token}.{ext}"))
}

/// Require a directory name that is a single safe path component.
///
/// Used for attraction `folder` values before they are joined onto a root.
pub fn validate_folder_name(folder: &str) -> Result<(), CoreError> {
    let valid = !folder.is_empty()
        && !folder.starts_with('.')
        && folder
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));

    if valid {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid folder name '{folder}'"
        )))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn extension_is_case_insensitive() {
        assert_eq!(file_extension("Photo.JPG").as_deref(), Some("jpg"));
        assert!(is_image_filename("a.WebP"));
    }

    #[test]
    fn extension_uses_last_segment() {
        assert_eq!(file_extension("archive.tar.gz").as_deref(), Some("gz"));
        assert!(!is_image_filename("photo.jpg.exe"));
    }

    #[test]
    fn no_dot_means_no_extension() {
        assert_eq!(file_extension("README"), None);
        assert_eq!(file_extension("trailing."), None);
    }

    #[test]
    fn oversized_upload_rejected() {
        let size = 17 * 1024 * 1024;
        let err = validate_upload("photo.jpg", size, MAX_UPLOAD_BYTES).unwrap_err();
        assert_matches!(err, UploadError::FileTooLarge { .. });
        assert_eq!(err.to_string(), "File is too large. Maximum size is 16 MB");
    }

    #[test]
    fn limit_is_inclusive() {
        assert!(validate_upload("photo.png", MAX_UPLOAD_BYTES, MAX_UPLOAD_BYTES).is_ok());
    }

    #[test]
    fn text_file_rejected() {
        let err = validate_upload("doc.txt", 10, MAX_UPLOAD_BYTES).unwrap_err();
        assert_eq!(err, UploadError::UnsupportedExtension("txt".into()));
        assert!(err.to_string().starts_with("Unsupported file format"));
    }

    #[test]
    fn dotless_filename_rejected() {
        assert_matches!(
            validate_upload("photo", 10, MAX_UPLOAD_BYTES),
            Err(UploadError::UnsupportedExtension(_))
        );
    }

    #[test]
    fn blank_filename_rejected() {
        assert_eq!(
            validate_upload("  ", 10, MAX_UPLOAD_BYTES),
            Err(UploadError::EmptyFilename)
        );
    }

    #[test]
    fn sanitize_strips_traversal() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("..\\..\\boot.ini"), "boot.ini");
        assert_eq!(sanitize_filename(".."), "");
    }

    #[test]
    fn sanitize_replaces_whitespace_and_drops_unsafe() {
        assert_eq!(sanitize_filename("my photo (1).jpg"), "my_photo_1.jpg");
        assert_eq!(sanitize_filename(".hidden.png"), "hidden.png");
    }

    #[test]
    fn sanitize_drops_non_ascii() {
        assert_eq!(sanitize_filename("водопад.jpg"), "jpg");
    }

    #[test]
    fn stored_name_keeps_stem_and_lowercases_extension() {
        let name = stored_filename("My Falls.JPG", "0123abcd").unwrap();
        assert_eq!(name, "My_Falls_0123abcd.jpg");
    }

    #[test]
    fn stored_name_falls_back_when_stem_is_empty() {
        let name = stored_filename("водопад.jpg", "deadbeef").unwrap();
        assert_eq!(name, "image_deadbeef.jpg");
    }

    #[test]
    fn stored_name_never_contains_separators() {
        let name = stored_filename("../../x.png", "00000000").unwrap();
        assert_eq!(name, "x_00000000.png");
    }

    #[test]
    fn disambiguator_shape() {
        let token = random_disambiguator();
        assert_eq!(token.len(), DISAMBIGUATOR_LEN);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn folder_names() {
        assert!(validate_folder_name("block-3").is_ok());
        assert!(validate_folder_name("").is_err());
        assert!(validate_folder_name("..").is_err());
        assert!(validate_folder_name("a/b").is_err());
    }
}
