//! Answer service client.
//!
//! Validates a question and image locally, uploads them as multipart to a
//! generation endpoint, and persists the successful result for display.

use std::path::Path;

use reqwest::multipart::{Form, Part};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::result::{ResultStore, StoredResult};
use crate::validation::{is_image_mime, media_type_from_path, require_question, MAX_IMAGE_BYTES};

/// Errors surfaced to the person submitting a question.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Please enter a question")]
    BlankQuestion,

    #[error("Please select an image")]
    MissingImage,

    #[error("Image is too large ({size} bytes); the limit is 10 MB")]
    ImageTooLarge { size: usize },

    #[error("Please select a valid image file (got {0})")]
    NotAnImage(String),

    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("Invalid response format from server: {0}")]
    InvalidResponse(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to read image: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// Whether the submission was rejected before any network call.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::BlankQuestion | Self::MissingImage | Self::ImageTooLarge { .. } | Self::NotAnImage(_)
        )
    }
}

/// An image file selected for upload.
#[derive(Debug, Clone)]
pub struct ImageFile {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Read an image from disk, inferring its MIME type from the extension.
    pub fn from_path(path: &Path) -> Result<Self, ClientError> {
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("image")
            .to_string();
        Ok(Self::new(file_name, media_type_from_path(path), bytes))
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Local checks run before any upload.
pub fn validate_submission(question: &str, image: Option<&ImageFile>) -> Result<(), ClientError> {
    require_question(question).map_err(|_| ClientError::BlankQuestion)?;
    let image = image.ok_or(ClientError::MissingImage)?;
    if image.size() > MAX_IMAGE_BYTES {
        return Err(ClientError::ImageTooLarge { size: image.size() });
    }
    if !is_image_mime(&image.mime_type) {
        return Err(ClientError::NotAnImage(image.mime_type.clone()));
    }
    Ok(())
}

/// User-facing message for a failed HTTP response.
pub fn status_message(status: u16, server_message: Option<&str>) -> String {
    match status {
        404 => "API endpoint not found. Please check that the server is running.".to_string(),
        401 => "Invalid or missing API key. Please check the server configuration.".to_string(),
        403 => "Access denied. Please check your API key permissions.".to_string(),
        429 => "Too many requests. Please wait a moment and try again.".to_string(),
        _ => server_message
            .filter(|m| !m.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("Request failed with status {}", status)),
    }
}

/// HTTP client for the generation endpoints.
#[derive(Clone)]
pub struct AnswerClient {
    base_url: String,
    client: reqwest::Client,
}

impl AnswerClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Endpoint URL for the selected mode.
    pub fn endpoint(&self, demo: bool) -> String {
        let path = if demo { "/api/generate-demo" } else { "/api/generate" };
        format!("{}{}", self.base_url, path)
    }

    /// Validate, upload, and persist a result.
    ///
    /// A storage failure is logged and does not fail the submission.
    pub async fn ask(
        &self,
        question: &str,
        image: Option<&ImageFile>,
        demo: bool,
        store: &ResultStore,
    ) -> Result<StoredResult, ClientError> {
        validate_submission(question, image)?;
        let image = image.ok_or(ClientError::MissingImage)?;
        let question = question.trim();

        let body = self.submit(question, image, demo).await?;
        let stored = StoredResult::from_response(body, question)
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))?;

        match store.save(&stored) {
            Ok(path) => debug!(path = %path.display(), "Result saved"),
            Err(e) => warn!(error = %e, "Failed to store result"),
        }

        Ok(stored)
    }

    /// Upload one multipart request and return the JSON body on success.
    pub async fn submit(
        &self,
        question: &str,
        image: &ImageFile,
        demo: bool,
    ) -> Result<serde_json::Value, ClientError> {
        let image_part = Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(&image.mime_type)
            .map_err(|e| ClientError::NotAnImage(e.to_string()))?;
        let form = Form::new()
            .text("question", question.to_string())
            .part("image", image_part);

        let url = self.endpoint(demo);
        info!(url = %url, size = image.size(), demo, "Submitting question");

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        if !status.is_success() {
            let server_message = serde_json::from_str::<serde_json::Value>(&text)
                .ok()
                .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
                .unwrap_or(text);
            return Err(ClientError::Server {
                status: status.as_u16(),
                message: status_message(status.as_u16(), Some(&server_message)),
            });
        }

        serde_json::from_str(&text).map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }
}
