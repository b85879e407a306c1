//! NutriMood inference
//!
//! Predicts a mood category from a quantized nutrition profile and
//! recommends foods for that mood, using pre-trained artifacts exported by
//! the training pipeline (classifier, feature scaler, label encoder and
//! food recommender).

pub mod config;
pub mod error;
pub mod inference;
pub mod math;
pub mod mood;
pub mod pipeline;
pub mod recommend;
#[cfg(feature = "server")]
pub mod server;
pub mod types;

pub use config::AppConfig;
pub use error::AppError;
pub use inference::{ArtifactPaths, ModelArtifacts};
pub use pipeline::{Pipeline, PipelineError};
pub use types::{ErrorResult, InferenceResult, MoodLabel, NutritionProfile};
