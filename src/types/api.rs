//! Response types shared by the CLI and the HTTP server.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{MoodLabel, MoodPrediction, NutritionProfile};

/// A recommended food, flattened for output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodRecommendation {
    pub food_name: String,
    pub calories: f64,
    pub proteins: f64,
    pub fats: f64,
    pub carbohydrates: f64,
    pub similarity_score: f64,
    /// The mood that was queried, not a property of the food
    pub mood_category: MoodLabel,
}

/// Successful prediction and recommendation result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceResult {
    pub mood_prediction: MoodPrediction,
    /// Recommender order, possibly empty
    pub food_recommendations: Vec<FoodRecommendation>,
    pub input: NutritionProfile,
}

/// Failure result echoing the submitted input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResult {
    pub error: String,
    /// The input as submitted. Usually a profile, but HTTP requests that
    /// fail type validation are echoed verbatim.
    pub input: Value,
}

impl ErrorResult {
    pub fn new(error: impl Into<String>, input: Value) -> Self {
        Self {
            error: error.into(),
            input,
        }
    }

    /// Error result for a typed profile
    pub fn for_profile(error: impl ToString, profile: &NutritionProfile) -> Self {
        Self::new(error.to_string(), profile.to_json())
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    #[serde(default)]
    pub uptime_seconds: u64,
    pub artifacts: ArtifactStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
}

/// Which artifact slots were filled at load time
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArtifactStatus {
    pub classifier: bool,
    pub scaler: bool,
    pub encoder: bool,
    pub recommender: bool,
}

impl ArtifactStatus {
    pub fn all_loaded(&self) -> bool {
        self.classifier && self.scaler && self.encoder && self.recommender
    }
}

/// One entry of the mood listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodInfo {
    /// Classifier output index
    pub index: usize,
    pub mood: MoodLabel,
}

/// Response listing the mood enumeration in classifier order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListMoodsResponse {
    pub moods: Vec<MoodInfo>,
}

impl ListMoodsResponse {
    pub fn from_labels() -> Self {
        Self {
            moods: MoodLabel::ALL
                .iter()
                .map(|&mood| MoodInfo {
                    index: mood.index(),
                    mood,
                })
                .collect(),
        }
    }
}
