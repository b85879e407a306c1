//! Prediction route handler.

use axum::{
    extract::{rejection::JsonRejection, State},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use tracing::{error, info};

use crate::error::AppError;
use crate::pipeline::PipelineError;
use crate::types::{ErrorResult, InferenceResult, NutritionProfile, ValidationError};

use super::AppState;

/// Failed prediction, rendered as an [`ErrorResult`] body
pub struct PredictFailure {
    error: AppError,
    input: Value,
}

impl PredictFailure {
    fn new(error: impl Into<AppError>, input: Value) -> Self {
        Self {
            error: error.into(),
            input,
        }
    }
}

impl IntoResponse for PredictFailure {
    fn into_response(self) -> Response {
        let status = self.error.status_code();
        if status.is_server_error() {
            error!(code = self.error.code(), error = %self.error, "Prediction failed");
        } else {
            info!(code = self.error.code(), error = %self.error, "Rejected prediction request");
        }

        let body = ErrorResult::new(self.error.to_string(), self.input);
        (status, Json(body)).into_response()
    }
}

/// POST /api/ml/predict
///
/// Predict mood and recommend foods for a nutrition profile. The body is
/// validated field by field so type errors echo the input as submitted.
/// A body that is not JSON at all echoes `null`.
pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<InferenceResult>, PredictFailure> {
    let Json(body) = payload.map_err(|rejection| {
        let error = ValidationError::InvalidBody(rejection.body_text());
        PredictFailure::new(PipelineError::from(error), Value::Null)
    })?;

    let profile = NutritionProfile::from_json(&body)
        .map_err(|e| PredictFailure::new(PipelineError::from(e), body.clone()))?;

    state
        .pipeline
        .try_infer(&profile)
        .map(Json)
        .map_err(|e| PredictFailure::new(e, profile.to_json()))
}
