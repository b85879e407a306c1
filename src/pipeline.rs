//! Prediction and recommendation pipeline.
//!
//! `validate -> predict mood -> recommend -> assemble`. Validation and
//! prediction failures fail the whole request; recommender lookup failures
//! only empty the recommendation list.

use std::sync::Arc;

use tracing::{debug, info};

use crate::inference::{ModelArtifacts, ModelError};
use crate::mood::MoodPredictor;
use crate::recommend::{RecommendationRetriever, DEFAULT_TOP_N};
use crate::types::{ErrorResult, InferenceResult, MoodPrediction, NutritionProfile, ValidationError};

/// Failures that abort a pipeline run
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Model components not properly loaded (missing: {})", .0.join(", "))]
    ComponentsNotLoaded(Vec<&'static str>),

    #[error("Food recommender not loaded")]
    RecommenderNotLoaded,

    #[error("Mood prediction failed: {0}")]
    Prediction(#[from] ModelError),
}

impl PipelineError {
    /// Whether the caller submitted bad input, as opposed to the process
    /// being misconfigured
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// Runs profiles through the loaded artifacts.
///
/// Cheap to clone; artifacts are shared read-only.
#[derive(Debug, Clone)]
pub struct Pipeline {
    artifacts: Arc<ModelArtifacts>,
    top_n: usize,
}

impl Pipeline {
    pub fn new(artifacts: Arc<ModelArtifacts>) -> Self {
        Self {
            artifacts,
            top_n: DEFAULT_TOP_N,
        }
    }

    /// Builder method to set how many recommendations to request
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    pub fn artifacts(&self) -> &ModelArtifacts {
        &self.artifacts
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    /// Predict the mood for `profile`
    pub fn predict_mood(
        &self,
        profile: &NutritionProfile,
    ) -> Result<MoodPrediction, PipelineError> {
        MoodPredictor::from_artifacts(&self.artifacts)?.predict(profile)
    }

    /// Run the full pipeline, keeping the typed error
    pub fn try_infer(&self, profile: &NutritionProfile) -> Result<InferenceResult, PipelineError> {
        profile.validate()?;
        debug!(%profile, "Running inference");

        let mood_prediction = self.predict_mood(profile)?;
        let food_recommendations =
            RecommendationRetriever::from_artifacts(&self.artifacts, self.top_n)?
                .recommend(mood_prediction.mood);

        info!(
            mood = %mood_prediction.mood,
            confidence = mood_prediction.confidence,
            recommendations = food_recommendations.len(),
            "Inference complete"
        );

        Ok(InferenceResult {
            mood_prediction,
            food_recommendations,
            input: *profile,
        })
    }

    /// Run the full pipeline. Failures become an [`ErrorResult`] echoing
    /// the submitted profile.
    pub fn infer(&self, profile: &NutritionProfile) -> Result<InferenceResult, ErrorResult> {
        self.try_infer(profile)
            .map_err(|e| ErrorResult::for_profile(e, profile))
    }
}
