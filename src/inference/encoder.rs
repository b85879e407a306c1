//! Label encoder exported alongside the classifier.

use serde::{Deserialize, Serialize};

use crate::types::MoodLabel;

/// Class names in the order the encoder was fitted with.
///
/// Decoding always goes through [`MoodLabel::ALL`]; the encoder is kept so
/// that a training run with a different class order can be detected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelEncoder {
    pub classes: Vec<String>,
}

impl LabelEncoder {
    pub fn new(classes: Vec<String>) -> Self {
        Self { classes }
    }

    /// Encoder matching the fixed mood enumeration
    pub fn from_labels() -> Self {
        Self::new(
            MoodLabel::ALL
                .iter()
                .map(|label| label.as_str().to_string())
                .collect(),
        )
    }

    /// Whether the fitted classes equal the fixed mood enumeration, in order
    pub fn matches_labels(&self) -> bool {
        self.classes.len() == MoodLabel::ALL.len()
            && self
                .classes
                .iter()
                .zip(MoodLabel::ALL)
                .all(|(class, label)| class == label.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_labels() {
        assert!(LabelEncoder::from_labels().matches_labels());
    }

    #[test]
    fn test_detects_reordered_classes() {
        let mut encoder = LabelEncoder::from_labels();
        encoder.classes.swap(0, 1);
        assert!(!encoder.matches_labels());
    }

    #[test]
    fn test_detects_extra_class() {
        let mut encoder = LabelEncoder::from_labels();
        encoder.classes.push("sleepy".to_string());
        assert!(!encoder.matches_labels());
    }
}
