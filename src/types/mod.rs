//! Shared types for pipeline input and output.
//!
//! These types define the JSON contract of both the CLI and the HTTP
//! server.

pub mod api;
pub mod mood;
pub mod nutrition;

pub use api::*;
pub use mood::{MoodLabel, MoodPrediction, UnknownMood};
pub use nutrition::{NutritionLevel, NutritionProfile, ValidationError};
