//! Mood-conditioned food recommendations.
//!
//! The recommender itself is an external artifact reached through the
//! [`Recommender`] trait. [`RecommendationRetriever`] normalizes its
//! records and absorbs query failures so a bad lookup never fails a
//! prediction.

mod indexed;

pub use indexed::IndexedRecommender;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::inference::ModelArtifacts;
use crate::pipeline::PipelineError;
use crate::types::{FoodRecommendation, MoodLabel};

/// Default number of recommendations per query
pub const DEFAULT_TOP_N: usize = 5;

/// Error type for recommender lookups
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecommendError {
    #[error("Mood not present in recommender index: {0}")]
    UnknownMood(MoodLabel),

    #[error("Recommender lookup failed: {0}")]
    Backend(String),
}

/// A food record as stored by the recommender. Every field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FoodRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub calories: Option<f64>,
    #[serde(default)]
    pub proteins: Option<f64>,
    #[serde(default)]
    pub fat: Option<f64>,
    #[serde(default)]
    pub carbohydrate: Option<f64>,
    #[serde(default)]
    pub similarity_score: Option<f64>,
}

impl FoodRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Builder method to set macro-nutrients
    pub fn with_nutrients(
        mut self,
        calories: f64,
        proteins: f64,
        fat: f64,
        carbohydrate: f64,
    ) -> Self {
        self.calories = Some(calories);
        self.proteins = Some(proteins);
        self.fat = Some(fat);
        self.carbohydrate = Some(carbohydrate);
        self
    }

    /// Builder method to set the similarity score
    pub fn with_similarity(mut self, score: f64) -> Self {
        self.similarity_score = Some(score);
        self
    }

    /// Flatten into an output record tagged with the queried mood.
    /// Missing text becomes `""`, missing numbers become `0.0`.
    pub fn into_recommendation(self, mood: MoodLabel) -> FoodRecommendation {
        FoodRecommendation {
            food_name: self.name.unwrap_or_default(),
            calories: self.calories.unwrap_or(0.0),
            proteins: self.proteins.unwrap_or(0.0),
            fats: self.fat.unwrap_or(0.0),
            carbohydrates: self.carbohydrate.unwrap_or(0.0),
            similarity_score: self.similarity_score.unwrap_or(0.0),
            mood_category: mood,
        }
    }
}

/// Mood-conditioned food lookup
pub trait Recommender: Send + Sync {
    /// Up to `top_n` records for `mood`, best first
    fn recommend_for_mood(
        &self,
        mood: MoodLabel,
        top_n: usize,
    ) -> Result<Vec<FoodRecord>, RecommendError>;
}

/// Queries the loaded recommender and normalizes its output
pub struct RecommendationRetriever<'a> {
    recommender: &'a dyn Recommender,
    top_n: usize,
}

impl<'a> RecommendationRetriever<'a> {
    pub fn new(recommender: &'a dyn Recommender, top_n: usize) -> Self {
        Self { recommender, top_n }
    }

    /// Borrow the recommender slot, failing if it was never loaded
    pub fn from_artifacts(
        artifacts: &'a ModelArtifacts,
        top_n: usize,
    ) -> Result<Self, PipelineError> {
        let recommender = artifacts
            .recommender()
            .ok_or(PipelineError::RecommenderNotLoaded)?;
        Ok(Self::new(recommender, top_n))
    }

    /// Recommendations for `mood`.
    ///
    /// Lookup errors are logged and collapse to an empty list. The
    /// recommender order is kept as is.
    pub fn recommend(&self, mood: MoodLabel) -> Vec<FoodRecommendation> {
        match self.try_recommend(mood) {
            Ok(recommendations) => recommendations,
            Err(e) => {
                warn!(%mood, error = %e, "Error getting food recommendations");
                Vec::new()
            }
        }
    }

    /// Like [`Self::recommend`] but surfaces the lookup error
    pub fn try_recommend(
        &self,
        mood: MoodLabel,
    ) -> Result<Vec<FoodRecommendation>, RecommendError> {
        let records = self.recommender.recommend_for_mood(mood, self.top_n)?;
        debug!(
            %mood,
            count = records.len(),
            requested = self.top_n,
            "Recommender returned records"
        );

        Ok(records
            .into_iter()
            .take(self.top_n)
            .map(|record| record.into_recommendation(mood))
            .collect())
    }
}
