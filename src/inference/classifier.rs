//! Feed-forward dense network classifier.

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::{Classifier, ModelError, FEATURE_COUNT};
use crate::math::{sigmoid, softmax};

/// Layer activation function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    #[default]
    Linear,
    Relu,
    Sigmoid,
    Tanh,
    Softmax,
}

impl Activation {
    fn apply(self, values: Vec<f64>) -> Vec<f64> {
        match self {
            Self::Linear => values,
            Self::Relu => values.into_iter().map(|v| v.max(0.0)).collect(),
            Self::Sigmoid => values.into_iter().map(sigmoid).collect(),
            Self::Tanh => values.into_iter().map(f64::tanh).collect(),
            Self::Softmax => softmax(&values),
        }
    }
}

/// Fully connected layer. `weights` is `input x output`, the Keras `Dense`
/// kernel layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenseLayer {
    pub weights: Vec<Vec<f64>>,
    pub bias: Vec<f64>,
    #[serde(default)]
    pub activation: Activation,
}

impl DenseLayer {
    fn input_dim(&self) -> usize {
        self.weights.len()
    }

    fn output_dim(&self) -> usize {
        self.bias.len()
    }

    fn forward(&self, input: &[f64]) -> Vec<f64> {
        let mut out = self.bias.clone();
        for (x, row) in input.iter().zip(&self.weights) {
            for (o, w) in out.iter_mut().zip(row) {
                *o += x * w;
            }
        }
        self.activation.apply(out)
    }
}

/// Dense network producing a distribution over mood classes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenseClassifier {
    #[serde(default = "default_input_dim")]
    pub input_dim: usize,
    pub layers: Vec<DenseLayer>,
}

fn default_input_dim() -> usize {
    FEATURE_COUNT
}

impl DenseClassifier {
    pub fn new(layers: Vec<DenseLayer>) -> Self {
        Self {
            input_dim: FEATURE_COUNT,
            layers,
        }
    }

    /// Number of output classes
    pub fn output_dim(&self) -> usize {
        self.layers.last().map(DenseLayer::output_dim).unwrap_or(0)
    }

    /// Check that layer shapes chain from `input_dim` to a non-empty output
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.layers.is_empty() {
            return Err(ModelError::InvalidParameters(
                "classifier has no layers".to_string(),
            ));
        }

        let mut expected = self.input_dim;
        for (idx, layer) in self.layers.iter().enumerate() {
            if layer.input_dim() != expected {
                return Err(ModelError::InvalidParameters(format!(
                    "layer {idx} expects {} inputs but receives {expected}",
                    layer.input_dim()
                )));
            }
            if layer.output_dim() == 0 {
                return Err(ModelError::InvalidParameters(format!(
                    "layer {idx} has no outputs"
                )));
            }
            if let Some(row) = layer
                .weights
                .iter()
                .position(|row| row.len() != layer.output_dim())
            {
                return Err(ModelError::InvalidParameters(format!(
                    "layer {idx} weight row {row} has {} columns, expected {}",
                    layer.weights[row].len(),
                    layer.output_dim()
                )));
            }
            expected = layer.output_dim();
        }

        Ok(())
    }
}

impl Classifier for DenseClassifier {
    fn predict(&self, features: &[f64]) -> Result<Vec<f64>, ModelError> {
        if features.len() != self.input_dim {
            return Err(ModelError::DimensionMismatch {
                expected: self.input_dim,
                got: features.len(),
            });
        }

        let mut activations = features.to_vec();
        for layer in &self.layers {
            activations = layer.forward(&activations);
        }

        trace!(?activations, "Classifier output");

        if activations.is_empty() {
            return Err(ModelError::EmptyDistribution);
        }
        Ok(activations)
    }
}
