//! Input limits shared by the client and the generation endpoints.

use std::path::Path;

use crate::error::{TopicLensError, TopicLensResult};

/// Largest accepted image upload (10 MiB, inclusive).
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// Minimum trimmed question length accepted by the live endpoint.
pub const MIN_QUESTION_CHARS: usize = 3;

/// Whether a MIME type names an image.
pub fn is_image_mime(mime: &str) -> bool {
    mime.trim().to_ascii_lowercase().starts_with("image/")
}

/// Trim a question and reject it when blank.
pub fn require_question(question: &str) -> TopicLensResult<&str> {
    let trimmed = question.trim();
    if trimmed.is_empty() {
        return Err(TopicLensError::validation("Please enter a question"));
    }
    Ok(trimmed)
}

/// Trim a question and reject it when shorter than [`MIN_QUESTION_CHARS`].
pub fn require_question_length(question: &str) -> TopicLensResult<&str> {
    let trimmed = question.trim();
    if trimmed.chars().count() < MIN_QUESTION_CHARS {
        return Err(TopicLensError::validation(format!(
            "Question must be at least {} characters long",
            MIN_QUESTION_CHARS
        )));
    }
    Ok(trimmed)
}

/// Reject non-image MIME types.
pub fn require_image_mime(mime: &str) -> TopicLensResult<()> {
    if !is_image_mime(mime) {
        return Err(TopicLensError::UnsupportedMediaType(mime.to_string()));
    }
    Ok(())
}

/// Reject images larger than [`MAX_IMAGE_BYTES`].
pub fn require_image_size(size: usize) -> TopicLensResult<()> {
    if size > MAX_IMAGE_BYTES {
        return Err(TopicLensError::ImageTooLarge {
            size,
            limit: MAX_IMAGE_BYTES,
        });
    }
    Ok(())
}

/// Detect an image media type from a file extension.
///
/// Returns `application/octet-stream` for anything that is not a known image
/// extension, so the caller's MIME check rejects it.
pub fn media_type_from_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        "heic" => "image/heic",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_mime_prefix() {
        assert!(is_image_mime("image/png"));
        assert!(is_image_mime("IMAGE/JPEG"));
        assert!(!is_image_mime("application/pdf"));
        assert!(!is_image_mime("text/image"));
    }

    #[test]
    fn test_blank_question_rejected() {
        assert!(require_question("   \n").is_err());
        assert_eq!(require_question("  why?  ").unwrap(), "why?");
    }

    #[test]
    fn test_question_length_counts_trimmed_chars() {
        assert!(require_question_length("  ab  ").is_err());
        assert_eq!(require_question_length(" abc ").unwrap(), "abc");
    }

    #[test]
    fn test_image_size_boundary() {
        assert!(require_image_size(MAX_IMAGE_BYTES).is_ok());
        assert!(matches!(
            require_image_size(MAX_IMAGE_BYTES + 1),
            Err(TopicLensError::ImageTooLarge { .. })
        ));
    }

    #[test]
    fn test_media_type_from_path() {
        assert_eq!(media_type_from_path(Path::new("diagram.PNG")), "image/png");
        assert_eq!(media_type_from_path(Path::new("a/b/photo.jpeg")), "image/jpeg");
        assert_eq!(
            media_type_from_path(Path::new("notes.pdf")),
            "application/octet-stream"
        );
        assert_eq!(media_type_from_path(Path::new("noext")), "application/octet-stream");
    }
}
