//! Mood labels produced by the classifier.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Mood category, in classifier output order.
///
/// The variant order is the index mapping fixed at training time.
/// Reordering variants silently mislabels every prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoodLabel {
    Energizing,
    Focusing,
    MultiCategory,
    Relaxing,
    Uncategorized,
}

impl MoodLabel {
    /// All labels, indexed by classifier output position
    pub const ALL: [MoodLabel; 5] = [
        MoodLabel::Energizing,
        MoodLabel::Focusing,
        MoodLabel::MultiCategory,
        MoodLabel::Relaxing,
        MoodLabel::Uncategorized,
    ];

    /// Label at a classifier output index
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Classifier output index of this label
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Energizing => "energizing",
            Self::Focusing => "focusing",
            Self::MultiCategory => "multi_category",
            Self::Relaxing => "relaxing",
            Self::Uncategorized => "uncategorized",
        }
    }
}

impl fmt::Display for MoodLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown mood label: {0}")]
pub struct UnknownMood(pub String);

impl FromStr for MoodLabel {
    type Err = UnknownMood;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|label| label.as_str() == s)
            .ok_or_else(|| UnknownMood(s.to_string()))
    }
}

/// Predicted mood with the probability mass of the selected class
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoodPrediction {
    pub mood: MoodLabel,
    /// Probability of the selected class (0.0 to 1.0)
    pub confidence: f64,
}
