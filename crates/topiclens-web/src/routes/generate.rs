//! Live generation route handlers.

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{info, warn, Instrument};
use topiclens_core::generate::generate_live;
use topiclens_core::model::ImageInput;
use topiclens_core::result::{LiveResponse, ResponseMetadata};
use topiclens_core::validation::{require_image_mime, require_image_size, require_question_length};

use crate::error::ApiError;
use crate::state::AppState;
use crate::upload::{is_too_large, UploadForm};

/// POST /api/generate - answer a question about an image with the model.
pub async fn generate(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let request_id = uuid::Uuid::new_v4();
    let span = tracing::info_span!("generate", %request_id);
    let include_details = state.config.is_development();

    match handle(state, multipart).instrument(span).await {
        Ok(body) => Json(body).into_response(),
        Err(err) => {
            warn!(%request_id, status = %err.status, code = err.code, "Generation failed");
            err.into_response_with(include_details)
        }
    }
}

async fn handle(
    state: AppState,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<LiveResponse, ApiError> {
    let model = state.model().ok_or_else(ApiError::missing_api_key)?;

    let multipart = multipart.map_err(|e| {
        ApiError::bad_request("INVALID_FORM_DATA", "Invalid form data").with_details(e.body_text())
    })?;
    let form = UploadForm::read(multipart).await.map_err(|e| {
        if is_too_large(&e) {
            ApiError::new(
                StatusCode::PAYLOAD_TOO_LARGE,
                "FILE_TOO_LARGE",
                "Image file too large. Maximum size is 10MB.",
            )
        } else {
            ApiError::bad_request("INVALID_FORM_DATA", "Invalid form data").with_details(e.body_text())
        }
    })?;

    let (Some(question), Some(image)) = (form.question(), form.image()) else {
        return Err(ApiError::bad_request(
            "MISSING_FIELDS",
            "Both question and image are required",
        ));
    };

    let question = require_question_length(question)?;
    require_image_mime(&image.content_type)?;
    require_image_size(image.bytes.len())?;

    info!(
        question_len = question.chars().count(),
        image_size = image.bytes.len(),
        image_type = %image.content_type,
        "Processing generation request"
    );

    let input = ImageInput::from_bytes(&image.content_type, &image.bytes);
    let result = generate_live(model.as_ref(), question, &input, state.timeouts()).await?;

    info!(topic = %result.topic, units = result.units.len(), "Generation complete");

    Ok(LiveResponse::new(
        result,
        ResponseMetadata {
            image_size: image.bytes.len(),
            image_type: image.content_type.clone(),
            question_length: question.chars().count(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        },
    ))
}
