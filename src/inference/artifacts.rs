//! Artifact loading from a model directory.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{info, warn};

use super::{
    ArtifactError, Classifier, DenseClassifier, LabelEncoder, ModelError, Scaler, StandardScaler,
};
use crate::config::ArtifactConfig;
use crate::recommend::{IndexedRecommender, Recommender};
use crate::types::ArtifactStatus;

/// The four artifacts a model directory may hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    Classifier,
    Scaler,
    LabelEncoder,
    Recommender,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Classifier => write!(f, "mood classifier"),
            Self::Scaler => write!(f, "feature scaler"),
            Self::LabelEncoder => write!(f, "mood encoder"),
            Self::Recommender => write!(f, "food recommender"),
        }
    }
}

/// Resolved paths of the four artifact files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub classifier: PathBuf,
    pub scaler: PathBuf,
    pub encoder: PathBuf,
    pub recommender: PathBuf,
}

impl ArtifactPaths {
    /// Default file names inside `dir`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::from_config(&ArtifactConfig {
            dir: dir.as_ref().to_path_buf(),
            ..ArtifactConfig::default()
        })
    }

    pub fn from_config(config: &ArtifactConfig) -> Self {
        Self {
            classifier: config.dir.join(&config.classifier_file),
            scaler: config.dir.join(&config.scaler_file),
            encoder: config.dir.join(&config.encoder_file),
            recommender: config.dir.join(&config.recommender_file),
        }
    }
}

/// Loaded artifact slots. Each slot is either filled or absent; absent
/// slots surface as usage errors when an operation needs them.
///
/// Slots are read-only after construction, so one instance can be shared
/// across requests behind an `Arc`.
#[derive(Clone, Default)]
pub struct ModelArtifacts {
    classifier: Option<Arc<dyn Classifier>>,
    scaler: Option<Arc<dyn Scaler>>,
    encoder: Option<LabelEncoder>,
    recommender: Option<Arc<dyn Recommender>>,
}

impl fmt::Debug for ModelArtifacts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelArtifacts")
            .field("status", &self.status())
            .finish()
    }
}

impl ModelArtifacts {
    /// Load every artifact found at `paths`.
    ///
    /// A missing file leaves its slot empty and loading continues. A file
    /// that exists but cannot be read, parsed or validated aborts loading.
    pub fn load(paths: &ArtifactPaths) -> Result<Self, ArtifactError> {
        let mut artifacts = Self::default();

        if let Some(classifier) =
            load_artifact::<DenseClassifier>(ArtifactKind::Classifier, &paths.classifier)?
        {
            validated(ArtifactKind::Classifier, &paths.classifier, classifier.validate())?;
            artifacts.classifier = Some(Arc::new(classifier));
        }

        if let Some(scaler) =
            load_artifact::<StandardScaler>(ArtifactKind::Scaler, &paths.scaler)?
        {
            validated(ArtifactKind::Scaler, &paths.scaler, scaler.validate())?;
            artifacts.scaler = Some(Arc::new(scaler));
        }

        if let Some(encoder) =
            load_artifact::<LabelEncoder>(ArtifactKind::LabelEncoder, &paths.encoder)?
        {
            if !encoder.matches_labels() {
                warn!(
                    classes = ?encoder.classes,
                    "Mood encoder classes differ from the fixed label order"
                );
            }
            artifacts.encoder = Some(encoder);
        }

        if let Some(recommender) =
            load_artifact::<IndexedRecommender>(ArtifactKind::Recommender, &paths.recommender)?
        {
            artifacts.recommender = Some(Arc::new(recommender));
        }

        Ok(artifacts)
    }

    /// Builder method to set the classifier slot
    pub fn with_classifier(mut self, classifier: impl Classifier + 'static) -> Self {
        self.classifier = Some(Arc::new(classifier));
        self
    }

    /// Builder method to set the scaler slot
    pub fn with_scaler(mut self, scaler: impl Scaler + 'static) -> Self {
        self.scaler = Some(Arc::new(scaler));
        self
    }

    /// Builder method to set the label encoder slot
    pub fn with_encoder(mut self, encoder: LabelEncoder) -> Self {
        self.encoder = Some(encoder);
        self
    }

    /// Builder method to set the recommender slot
    pub fn with_recommender(mut self, recommender: impl Recommender + 'static) -> Self {
        self.recommender = Some(Arc::new(recommender));
        self
    }

    pub fn classifier(&self) -> Option<&dyn Classifier> {
        self.classifier.as_deref()
    }

    pub fn scaler(&self) -> Option<&dyn Scaler> {
        self.scaler.as_deref()
    }

    pub fn encoder(&self) -> Option<&LabelEncoder> {
        self.encoder.as_ref()
    }

    pub fn recommender(&self) -> Option<&dyn Recommender> {
        self.recommender.as_deref()
    }

    /// Which slots are filled
    pub fn status(&self) -> ArtifactStatus {
        ArtifactStatus {
            classifier: self.classifier.is_some(),
            scaler: self.scaler.is_some(),
            encoder: self.encoder.is_some(),
            recommender: self.recommender.is_some(),
        }
    }
}

/// Read and parse one artifact. `Ok(None)` means the file does not exist.
fn load_artifact<T: DeserializeOwned>(
    kind: ArtifactKind,
    path: &Path,
) -> Result<Option<T>, ArtifactError> {
    // The handle is closed once the bytes are in memory
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!(artifact = %kind, path = %path.display(), "Artifact not found");
            return Ok(None);
        }
        Err(source) => {
            return Err(ArtifactError::Read {
                kind,
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let value = serde_json::from_str(&raw).map_err(|source| ArtifactError::Parse {
        kind,
        path: path.to_path_buf(),
        source,
    })?;

    info!(artifact = %kind, path = %path.display(), "Artifact loaded");
    Ok(Some(value))
}

fn validated(
    kind: ArtifactKind,
    path: &Path,
    result: Result<(), ModelError>,
) -> Result<(), ArtifactError> {
    result.map_err(|source| ArtifactError::Invalid {
        kind,
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let paths = ArtifactPaths::in_dir("models");
        assert_eq!(paths.classifier, Path::new("models/mood_classifier_model.json"));
        assert_eq!(paths.scaler, Path::new("models/mood_feature_scaler.json"));
        assert_eq!(paths.encoder, Path::new("models/mood_encoder.json"));
        assert_eq!(paths.recommender, Path::new("models/food_recommender.json"));
    }

    #[test]
    fn test_empty_directory_loads_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let artifacts = ModelArtifacts::load(&ArtifactPaths::in_dir(dir.path())).unwrap();
        assert_eq!(artifacts.status(), ArtifactStatus::default());
    }

    #[test]
    fn test_builder_fills_slots() {
        let artifacts = ModelArtifacts::default()
            .with_scaler(StandardScaler::new(vec![0.0; 4], vec![1.0; 4]))
            .with_encoder(LabelEncoder::from_labels());

        let status = artifacts.status();
        assert!(status.scaler && status.encoder);
        assert!(!status.classifier && !status.recommender);
        assert!(artifacts.classifier().is_none());
    }

    #[test]
    fn test_artifact_kind_display() {
        assert_eq!(ArtifactKind::Classifier.to_string(), "mood classifier");
        assert_eq!(ArtifactKind::Recommender.to_string(), "food recommender");
    }
}
