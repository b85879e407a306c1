//! Model artifacts and their inference contracts.
//!
//! The pipeline only talks to models through the [`Scaler`] and
//! [`Classifier`] traits, so any fitted model can be plugged in. The
//! concrete implementations here read JSON parameter files exported by
//! the training side.

mod artifacts;
mod classifier;
mod encoder;
mod scaler;

pub use artifacts::{ArtifactKind, ArtifactPaths, ModelArtifacts};
pub use classifier::{Activation, DenseClassifier, DenseLayer};
pub use encoder::LabelEncoder;
pub use scaler::StandardScaler;

use std::path::PathBuf;

/// Number of input features (calorie, protein, fat, carb)
pub const FEATURE_COUNT: usize = 4;

/// Pre-fitted feature transform
pub trait Scaler: Send + Sync {
    /// Transform one feature row. Must not mutate the scaler.
    fn transform(&self, features: &[f64]) -> Result<Vec<f64>, ModelError>;
}

/// Pre-trained multi-class classifier
pub trait Classifier: Send + Sync {
    /// Probability distribution over mood classes for one scaled row
    fn predict(&self, features: &[f64]) -> Result<Vec<f64>, ModelError>;
}

/// Errors produced while evaluating or validating model parameters
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    #[error("Invalid input dimension: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("Classifier returned an empty distribution")]
    EmptyDistribution,

    #[error("Invalid model parameters: {0}")]
    InvalidParameters(String),
}

/// Fatal errors raised while loading an artifact that exists on disk
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("Failed to read {kind} at {}: {source}", .path.display())]
    Read {
        kind: ArtifactKind,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {kind} at {}: {source}", .path.display())]
    Parse {
        kind: ArtifactKind,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid {kind} at {}: {source}", .path.display())]
    Invalid {
        kind: ArtifactKind,
        path: PathBuf,
        #[source]
        source: ModelError,
    },
}

impl ArtifactError {
    /// Which artifact failed
    pub fn kind(&self) -> ArtifactKind {
        match self {
            Self::Read { kind, .. } | Self::Parse { kind, .. } | Self::Invalid { kind, .. } => {
                *kind
            }
        }
    }
}
