//! Nutrition profile input and its validation rules.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Lowest accepted nutrition level
pub const MIN_LEVEL: i64 = 0;

/// Highest accepted nutrition level
pub const MAX_LEVEL: i64 = 3;

/// Field names in feature order
pub const FIELD_NAMES: [&str; 4] = ["calorie_level", "protein_level", "fat_level", "carb_level"];

/// Validation failure for a submitted nutrition profile
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Missing { field: &'static str },

    #[error("{field} must be an integer between 0 and 3, got {value}")]
    NotInteger { field: &'static str, value: String },

    #[error("{field} must be between 0 and 3, got {value}")]
    OutOfRange { field: &'static str, value: i64 },

    #[error("Nutrition profile must be a JSON object")]
    NotAnObject,

    /// The request body could not be read as JSON at all
    #[error("Invalid request body: {0}")]
    InvalidBody(String),
}

/// Quantized nutrition level with its display label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NutritionLevel {
    VeryLow,
    Low,
    Medium,
    High,
}

impl NutritionLevel {
    /// Map a raw level to its named variant
    pub fn from_value(value: i64) -> Option<Self> {
        match value {
            0 => Some(Self::VeryLow),
            1 => Some(Self::Low),
            2 => Some(Self::Medium),
            3 => Some(Self::High),
            _ => None,
        }
    }

    /// Human-readable label
    pub fn label(self) -> &'static str {
        match self {
            Self::VeryLow => "very low",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for NutritionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Four quantized nutrition levels submitted for prediction.
///
/// Values are kept as submitted; [`NutritionProfile::validate`] must pass
/// before the profile is turned into features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutritionProfile {
    pub calorie_level: i64,
    pub protein_level: i64,
    pub fat_level: i64,
    pub carb_level: i64,
}

impl NutritionProfile {
    pub fn new(calorie_level: i64, protein_level: i64, fat_level: i64, carb_level: i64) -> Self {
        Self {
            calorie_level,
            protein_level,
            fat_level,
            carb_level,
        }
    }

    /// Raw levels in feature order `[calorie, protein, fat, carb]`
    pub fn levels(&self) -> [i64; 4] {
        [
            self.calorie_level,
            self.protein_level,
            self.fat_level,
            self.carb_level,
        ]
    }

    /// Check that every level lies in `[0, 3]`
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in FIELD_NAMES.into_iter().zip(self.levels()) {
            if !(MIN_LEVEL..=MAX_LEVEL).contains(&value) {
                return Err(ValidationError::OutOfRange { field, value });
            }
        }
        Ok(())
    }

    /// Single-row feature vector for the scaler
    pub fn features(&self) -> Vec<f64> {
        self.levels().iter().map(|&level| level as f64).collect()
    }

    /// Parse an untyped JSON object, checking presence, type and range.
    ///
    /// Floats (including `2.0`), strings and booleans are rejected as
    /// non-integers.
    pub fn from_json(value: &Value) -> Result<Self, ValidationError> {
        let object = value.as_object().ok_or(ValidationError::NotAnObject)?;

        let mut levels = [0i64; 4];
        for (slot, field) in levels.iter_mut().zip(FIELD_NAMES) {
            let raw = object
                .get(field)
                .ok_or(ValidationError::Missing { field })?;
            *slot = raw.as_i64().ok_or_else(|| ValidationError::NotInteger {
                field,
                value: raw.to_string(),
            })?;
        }

        let profile = Self::new(levels[0], levels[1], levels[2], levels[3]);
        profile.validate()?;
        Ok(profile)
    }

    /// JSON echo block used in results and errors
    pub fn to_json(&self) -> Value {
        serde_json::json!({
            "calorie_level": self.calorie_level,
            "protein_level": self.protein_level,
            "fat_level": self.fat_level,
            "carb_level": self.carb_level,
        })
    }
}

impl fmt::Display for NutritionProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = ["calories", "protein", "fat", "carbs"];
        for (i, (name, value)) in names.iter().zip(self.levels()).enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match NutritionLevel::from_value(value) {
                Some(level) => write!(f, "{name}: {level}")?,
                None => write!(f, "{name}: {value}")?,
            }
        }
        Ok(())
    }
}
