//! Recommender backed by precomputed per-mood rankings.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{FoodRecord, RecommendError, Recommender};
use crate::types::MoodLabel;

/// Rankings exported by the training pipeline, keyed by mood name.
///
/// Each list is already sorted by similarity; lookups only slice it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexedRecommender {
    pub rankings: HashMap<String, Vec<FoodRecord>>,
}

impl IndexedRecommender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to add a ranking for one mood
    pub fn with_ranking(mut self, mood: MoodLabel, records: Vec<FoodRecord>) -> Self {
        self.rankings.insert(mood.as_str().to_string(), records);
        self
    }

    /// Number of moods with a ranking
    pub fn mood_count(&self) -> usize {
        self.rankings.len()
    }
}

impl Recommender for IndexedRecommender {
    fn recommend_for_mood(
        &self,
        mood: MoodLabel,
        top_n: usize,
    ) -> Result<Vec<FoodRecord>, RecommendError> {
        let ranking = self
            .rankings
            .get(mood.as_str())
            .ok_or(RecommendError::UnknownMood(mood))?;

        Ok(ranking.iter().take(top_n).cloned().collect())
    }
}
