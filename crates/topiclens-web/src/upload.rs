//! Multipart form decoding for the generation endpoints.

use axum::extract::multipart::{Multipart, MultipartError};
use axum::http::StatusCode;
use tracing::debug;

/// An uploaded image part.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub file_name: Option<String>,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// The `question` and `image` parts of a submission; either may be absent.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub question: Option<String>,
    pub image: Option<UploadedImage>,
}

impl UploadForm {
    /// Read all parts. Unknown parts are skipped.
    pub async fn read(mut multipart: Multipart) -> Result<Self, MultipartError> {
        let mut form = UploadForm::default();

        while let Some(field) = multipart.next_field().await? {
            match field.name() {
                Some("question") => {
                    form.question = Some(field.text().await?);
                }
                Some("image") => {
                    let file_name = field.file_name().map(str::to_string);
                    let content_type = field
                        .content_type()
                        .unwrap_or("application/octet-stream")
                        .to_string();
                    let bytes = field.bytes().await?.to_vec();
                    debug!(size = bytes.len(), content_type = %content_type, "Received image part");
                    form.image = Some(UploadedImage {
                        file_name,
                        content_type,
                        bytes,
                    });
                }
                other => {
                    debug!(field = ?other, "Skipping unknown multipart field");
                }
            }
        }

        Ok(form)
    }

    /// The trimmed question, if present and non-blank.
    pub fn question(&self) -> Option<&str> {
        self.question
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
    }

    /// The image, if present and non-empty.
    pub fn image(&self) -> Option<&UploadedImage> {
        self.image.as_ref().filter(|i| !i.bytes.is_empty())
    }
}

/// Whether a multipart failure came from the body size limit.
pub fn is_too_large(err: &MultipartError) -> bool {
    err.status() == StatusCode::PAYLOAD_TOO_LARGE
}
