//! Demo generation route handler.
//!
//! Returns a canned result chosen by keyword matching; never calls a model.

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use tracing::{error, info};
use topiclens_core::generate::demo_result;
use topiclens_core::GenerationResult;

use crate::state::AppState;
use crate::upload::UploadForm;

type DemoError = (StatusCode, Json<Value>);

/// POST /api/generate-demo - keyword-matched canned answer.
pub async fn generate_demo(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<GenerationResult>, DemoError> {
    let form = match multipart {
        Ok(multipart) => UploadForm::read(multipart).await.map_err(|e| {
            error!(error = %e, "Failed to read demo form");
            internal_error()
        })?,
        Err(e) => {
            error!(error = %e, "Rejected demo form");
            return Err(internal_error());
        }
    };

    let (Some(question), Some(_image)) = (form.question(), form.image()) else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Question and image are required" })),
        ));
    };

    tokio::time::sleep(state.config.demo_delay()).await;

    let result = demo_result(question);
    info!(topic = %result.topic, "Demo response generated");
    Ok(Json(result))
}

fn internal_error() -> DemoError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Failed to generate demo response" })),
    )
}
