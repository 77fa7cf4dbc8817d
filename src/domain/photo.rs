//! Photo file encoding.
//!
//! Selected images are embedded into contact records as data URIs
//! (`data:<mime>;base64,<payload>`). The MIME type is taken from the file
//! extension; files that are not recognised images are rejected.

use crate::domain::error::{ContactsError, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::path::Path;

/// Largest photo file accepted, in bytes.
pub const MAX_PHOTO_BYTES: u64 = 5 * 1024 * 1024;

/// Returns the image MIME type for a file path, based on its extension.
///
/// # Examples
///
/// ```
/// use zcontacts::domain::photo::mime_for_path;
/// use std::path::Path;
///
/// assert_eq!(mime_for_path(Path::new("me.JPG")), Some("image/jpeg"));
/// assert_eq!(mime_for_path(Path::new("notes.txt")), None);
/// ```
#[must_use]
pub fn mime_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        _ => return None,
    };
    Some(mime)
}

/// Encodes raw bytes as a data URI.
#[must_use]
pub fn encode_data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// Reads an image file and returns it as a data URI.
///
/// # Errors
///
/// Returns [`ContactsError::PhotoRead`] if the extension is not a known image
/// type, the file exceeds [`MAX_PHOTO_BYTES`], or the file cannot be read.
pub fn read_photo(path: &Path) -> Result<String> {
    let _span = tracing::debug_span!("read_photo", path = ?path).entered();

    let mime = mime_for_path(path).ok_or_else(|| {
        ContactsError::PhotoRead(format!("not a supported image: {}", path.display()))
    })?;

    let size = std::fs::metadata(path)
        .map_err(|e| ContactsError::PhotoRead(format!("{}: {e}", path.display())))?
        .len();
    if size > MAX_PHOTO_BYTES {
        return Err(ContactsError::PhotoRead(format!(
            "{} is {size} bytes, limit is {MAX_PHOTO_BYTES}",
            path.display()
        )));
    }

    let bytes = std::fs::read(path)
        .map_err(|e| ContactsError::PhotoRead(format!("{}: {e}", path.display())))?;

    tracing::debug!(bytes = bytes.len(), mime = mime, "photo encoded");
    Ok(encode_data_uri(mime, &bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_png_bytes() {
        assert_eq!(encode_data_uri("image/png", b"abc"), "data:image/png;base64,YWJj");
    }

    #[test]
    fn reads_image_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("avatar.png");
        std::fs::write(&path, [0x89, b'P', b'N', b'G']).unwrap();

        let uri = read_photo(&path).unwrap();
        assert!(uri.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("avatar.txt");
        std::fs::write(&path, "hello").unwrap();

        assert!(matches!(read_photo(&path), Err(ContactsError::PhotoRead(_))));
    }

    #[test]
    fn missing_file_is_photo_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gone.jpg");
        assert!(matches!(read_photo(&path), Err(ContactsError::PhotoRead(_))));
    }
}
