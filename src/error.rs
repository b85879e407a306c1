use thiserror::Error;

use crate::pipeline::PipelineError;

/// Application-level errors
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

impl AppError {
    /// Returns a machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            Self::Pipeline(PipelineError::Validation(_)) => "VALIDATION_ERROR",
            Self::Pipeline(PipelineError::ComponentsNotLoaded(_))
            | Self::Pipeline(PipelineError::RecommenderNotLoaded) => "NOT_LOADED",
            Self::Pipeline(PipelineError::Prediction(_)) => "PREDICTION_ERROR",
        }
    }
}

#[cfg(feature = "server")]
mod http {
    use axum::http::StatusCode;

    use super::AppError;

    impl AppError {
        /// Returns the appropriate HTTP status code for this error
        pub fn status_code(&self) -> StatusCode {
            match self {
                Self::Pipeline(e) if e.is_validation() => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            }
        }
    }
}
