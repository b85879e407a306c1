//! Mood prediction from a nutrition profile.
//!
//! Scales the four nutrition levels, runs the classifier and decodes the
//! most probable class against the fixed [`MoodLabel`] order.

use tracing::{debug, warn};

use crate::inference::{Classifier, ModelArtifacts, ModelError, Scaler};
use crate::math::argmax;
use crate::pipeline::PipelineError;
use crate::types::{MoodLabel, MoodPrediction, NutritionProfile};

/// Borrowed view of the components needed for prediction
pub struct MoodPredictor<'a> {
    classifier: &'a dyn Classifier,
    scaler: &'a dyn Scaler,
}

impl<'a> MoodPredictor<'a> {
    /// Borrow classifier and scaler from `artifacts`. The label encoder
    /// must be loaded as well even though decoding uses the fixed order.
    ///
    /// Fails with [`PipelineError::ComponentsNotLoaded`] listing every
    /// missing slot.
    pub fn from_artifacts(artifacts: &'a ModelArtifacts) -> Result<Self, PipelineError> {
        match (artifacts.classifier(), artifacts.scaler(), artifacts.encoder()) {
            (Some(classifier), Some(scaler), Some(_)) => Ok(Self { classifier, scaler }),
            (classifier, scaler, encoder) => {
                let mut missing = Vec::new();
                if classifier.is_none() {
                    missing.push("classifier");
                }
                if scaler.is_none() {
                    missing.push("scaler");
                }
                if encoder.is_none() {
                    missing.push("encoder");
                }
                Err(PipelineError::ComponentsNotLoaded(missing))
            }
        }
    }

    /// Predict the mood for a validated profile
    pub fn predict(&self, profile: &NutritionProfile) -> Result<MoodPrediction, PipelineError> {
        profile.validate()?;

        let features = profile.features();
        let scaled = self.scaler.transform(&features)?;
        let distribution = self.classifier.predict(&scaled)?;

        let prediction = select_mood(&distribution)?;
        debug!(
            mood = %prediction.mood,
            confidence = prediction.confidence,
            "Mood predicted"
        );
        Ok(prediction)
    }
}

/// Pick the most probable class from a classifier distribution.
///
/// Ties resolve to the lowest index. An index beyond the label order
/// decodes to [`MoodLabel::Uncategorized`] and is logged. The selected
/// value must be a probability in `[0, 1]`.
pub fn select_mood(distribution: &[f64]) -> Result<MoodPrediction, ModelError> {
    let index = argmax(distribution).ok_or(ModelError::EmptyDistribution)?;
    let confidence = distribution[index];
    if !(0.0..=1.0).contains(&confidence) {
        return Err(ModelError::InvalidParameters(format!(
            "classifier output {confidence} at index {index} is not a probability"
        )));
    }

    let mood = MoodLabel::from_index(index).unwrap_or_else(|| {
        warn!(
            index,
            classes = distribution.len(),
            "Classifier index outside mood labels, falling back to uncategorized"
        );
        MoodLabel::Uncategorized
    });

    Ok(MoodPrediction { mood, confidence })
}
