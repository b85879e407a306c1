//! Pipeline behaviour against fake model components.
//!
//! No trained artifacts are needed: every model slot is filled with a
//! small fake implementing the inference traits.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use nutrimood::inference::{Classifier, LabelEncoder, ModelArtifacts, ModelError, Scaler};
use nutrimood::recommend::{FoodRecord, RecommendError, Recommender};
use nutrimood::types::MoodLabel;
use nutrimood::{NutritionProfile, Pipeline, PipelineError};

/// Classifier returning a fixed distribution and counting calls
#[derive(Clone)]
struct SpyClassifier {
    distribution: Vec<f64>,
    calls: Arc<AtomicUsize>,
    seen: Arc<Mutex<Vec<Vec<f64>>>>,
}

impl SpyClassifier {
    fn new(distribution: Vec<f64>) -> Self {
        Self {
            distribution,
            calls: Arc::new(AtomicUsize::new(0)),
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Classifier for SpyClassifier {
    fn predict(&self, features: &[f64]) -> Result<Vec<f64>, ModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(features.to_vec());
        Ok(self.distribution.clone())
    }
}

/// Scaler that doubles every feature
struct DoublingScaler;

impl Scaler for DoublingScaler {
    fn transform(&self, features: &[f64]) -> Result<Vec<f64>, ModelError> {
        Ok(features.iter().map(|x| x * 2.0).collect())
    }
}

/// Scaler that rejects every row
struct BrokenScaler;

impl Scaler for BrokenScaler {
    fn transform(&self, features: &[f64]) -> Result<Vec<f64>, ModelError> {
        Err(ModelError::DimensionMismatch {
            expected: 6,
            got: features.len(),
        })
    }
}

/// Recommender returning `count` items for any mood and recording queries
#[derive(Clone, Default)]
struct FakeRecommender {
    count: usize,
    queries: Arc<Mutex<Vec<(MoodLabel, usize)>>>,
}

impl Recommender for FakeRecommender {
    fn recommend_for_mood(
        &self,
        mood: MoodLabel,
        top_n: usize,
    ) -> Result<Vec<FoodRecord>, RecommendError> {
        self.queries.lock().unwrap().push((mood, top_n));
        Ok((0..self.count.min(top_n))
            .map(|i| {
                FoodRecord::new(format!("food {i}"))
                    .with_nutrients(100.0 + i as f64, 5.0, 3.0, 20.0)
                    .with_similarity(1.0 - i as f64 * 0.1)
            })
            .collect())
    }
}

struct FailingRecommender;

impl Recommender for FailingRecommender {
    fn recommend_for_mood(
        &self,
        mood: MoodLabel,
        _top_n: usize,
    ) -> Result<Vec<FoodRecord>, RecommendError> {
        Err(RecommendError::UnknownMood(mood))
    }
}

fn artifacts_with(
    classifier: SpyClassifier,
    recommender: impl Recommender + 'static,
) -> ModelArtifacts {
    ModelArtifacts::default()
        .with_classifier(classifier)
        .with_scaler(DoublingScaler)
        .with_encoder(LabelEncoder::from_labels())
        .with_recommender(recommender)
}

fn focusing_distribution() -> Vec<f64> {
    vec![0.1, 0.6, 0.1, 0.1, 0.1]
}

#[test]
fn test_end_to_end_focusing() {
    let classifier = SpyClassifier::new(focusing_distribution());
    let recommender = FakeRecommender {
        count: 3,
        ..Default::default()
    };
    let pipeline = Pipeline::new(Arc::new(artifacts_with(
        classifier.clone(),
        recommender.clone(),
    )));

    let profile = NutritionProfile::new(2, 1, 0, 3);
    let result = pipeline.infer(&profile).unwrap();

    assert_eq!(result.mood_prediction.mood, MoodLabel::Focusing);
    assert_eq!(result.mood_prediction.confidence, 0.6);
    assert_eq!(result.food_recommendations.len(), 3);
    assert!(result
        .food_recommendations
        .iter()
        .all(|r| r.mood_category == MoodLabel::Focusing));
    assert_eq!(result.input, profile);

    // Scaled features reach the classifier in [calorie, protein, fat, carb] order
    assert_eq!(classifier.seen.lock().unwrap()[0], vec![4.0, 2.0, 0.0, 6.0]);
    // Recommender was asked for the predicted mood with the default count
    assert_eq!(
        recommender.queries.lock().unwrap().as_slice(),
        &[(MoodLabel::Focusing, 5)]
    );
}

#[test]
fn test_end_to_end_json_shape() {
    let pipeline = Pipeline::new(Arc::new(artifacts_with(
        SpyClassifier::new(focusing_distribution()),
        FakeRecommender {
            count: 3,
            ..Default::default()
        },
    )));

    let result = pipeline.infer(&NutritionProfile::new(2, 1, 0, 3)).unwrap();
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["mood_prediction"]["mood"], "focusing");
    assert_eq!(json["mood_prediction"]["confidence"], 0.6);
    assert_eq!(json["food_recommendations"].as_array().unwrap().len(), 3);
    let first = &json["food_recommendations"][0];
    for key in [
        "food_name",
        "calories",
        "proteins",
        "fats",
        "carbohydrates",
        "similarity_score",
        "mood_category",
    ] {
        assert!(first.get(key).is_some(), "missing {key}");
    }
    assert_eq!(
        json["input"],
        serde_json::json!({"calorie_level": 2, "protein_level": 1, "fat_level": 0, "carb_level": 3})
    );
}

#[test]
fn test_out_of_range_never_reaches_classifier() {
    let classifier = SpyClassifier::new(focusing_distribution());
    let pipeline = Pipeline::new(Arc::new(artifacts_with(
        classifier.clone(),
        FakeRecommender::default(),
    )));

    let invalid = [
        NutritionProfile::new(4, 0, 0, 0),
        NutritionProfile::new(0, -1, 0, 0),
        NutritionProfile::new(0, 0, 10, 0),
        NutritionProfile::new(0, 0, 0, -3),
    ];

    for profile in invalid {
        let err = pipeline.try_infer(&profile).unwrap_err();
        assert!(err.is_validation(), "expected validation error, got {err}");

        let error_result = pipeline.infer(&profile).unwrap_err();
        assert!(error_result.error.contains("between 0 and 3"));
        assert_eq!(error_result.input, profile.to_json());
    }

    assert_eq!(classifier.calls(), 0);
}

#[test]
fn test_argmax_tie_selects_lowest_index() {
    let pipeline = Pipeline::new(Arc::new(artifacts_with(
        SpyClassifier::new(vec![0.25, 0.25, 0.25, 0.25, 0.0]),
        FakeRecommender::default(),
    )));

    let prediction = pipeline
        .predict_mood(&NutritionProfile::new(1, 1, 1, 1))
        .unwrap();
    assert_eq!(prediction.mood, MoodLabel::Energizing);
    assert_eq!(prediction.confidence, 0.25);
}

#[test]
fn test_extra_class_falls_back_to_uncategorized() {
    let pipeline = Pipeline::new(Arc::new(artifacts_with(
        SpyClassifier::new(vec![0.05, 0.05, 0.05, 0.05, 0.1, 0.7]),
        FakeRecommender::default(),
    )));

    let prediction = pipeline
        .predict_mood(&NutritionProfile::new(3, 0, 3, 0))
        .unwrap();
    assert_eq!(prediction.mood, MoodLabel::Uncategorized);
    assert_eq!(prediction.confidence, 0.7);
}

#[test]
fn test_recommender_failure_degrades_to_empty() {
    let pipeline = Pipeline::new(Arc::new(artifacts_with(
        SpyClassifier::new(focusing_distribution()),
        FailingRecommender,
    )));

    let result = pipeline.infer(&NutritionProfile::new(2, 1, 0, 3)).unwrap();
    assert_eq!(result.mood_prediction.mood, MoodLabel::Focusing);
    assert!(result.food_recommendations.is_empty());

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["food_recommendations"], serde_json::json!([]));
}

#[test]
fn test_missing_components_are_usage_errors() {
    let classifier = SpyClassifier::new(focusing_distribution());
    let full = artifacts_with(classifier.clone(), FakeRecommender::default());

    let variants = [
        ModelArtifacts::default()
            .with_scaler(DoublingScaler)
            .with_encoder(LabelEncoder::from_labels()),
        ModelArtifacts::default()
            .with_classifier(classifier.clone())
            .with_encoder(LabelEncoder::from_labels()),
        ModelArtifacts::default()
            .with_classifier(classifier.clone())
            .with_scaler(DoublingScaler),
    ];

    for artifacts in variants {
        let pipeline = Pipeline::new(Arc::new(artifacts));
        let err = pipeline
            .predict_mood(&NutritionProfile::new(1, 2, 1, 2))
            .unwrap_err();
        assert!(matches!(err, PipelineError::ComponentsNotLoaded(_)));
        assert!(err.to_string().contains("not properly loaded"));
    }

    // Sanity check: the complete set predicts
    assert!(Pipeline::new(Arc::new(full))
        .predict_mood(&NutritionProfile::new(1, 2, 1, 2))
        .is_ok());
}

#[test]
fn test_missing_recommender_fails_pipeline() {
    let artifacts = ModelArtifacts::default()
        .with_classifier(SpyClassifier::new(focusing_distribution()))
        .with_scaler(DoublingScaler)
        .with_encoder(LabelEncoder::from_labels());
    let pipeline = Pipeline::new(Arc::new(artifacts));

    let profile = NutritionProfile::new(2, 1, 0, 3);
    assert_eq!(
        pipeline.try_infer(&profile),
        Err(PipelineError::RecommenderNotLoaded)
    );

    let error_result = pipeline.infer(&profile).unwrap_err();
    assert_eq!(error_result.error, "Food recommender not loaded");
    assert_eq!(error_result.input, profile.to_json());
}

#[test]
fn test_scaler_failure_is_prediction_error() {
    let artifacts = ModelArtifacts::default()
        .with_classifier(SpyClassifier::new(focusing_distribution()))
        .with_scaler(BrokenScaler)
        .with_encoder(LabelEncoder::from_labels())
        .with_recommender(FakeRecommender::default());
    let pipeline = Pipeline::new(Arc::new(artifacts));

    let err = pipeline
        .try_infer(&NutritionProfile::new(2, 1, 0, 3))
        .unwrap_err();
    assert!(matches!(err, PipelineError::Prediction(_)));
}

#[test]
fn test_input_echo_for_every_valid_profile() {
    let ok = Pipeline::new(Arc::new(artifacts_with(
        SpyClassifier::new(focusing_distribution()),
        FakeRecommender {
            count: 1,
            ..Default::default()
        },
    )));
    let failing = Pipeline::new(Arc::new(ModelArtifacts::default()));

    for c in 0..=3 {
        for p in 0..=3 {
            for f in 0..=3 {
                for k in 0..=3 {
                    let profile = NutritionProfile::new(c, p, f, k);
                    assert_eq!(ok.infer(&profile).unwrap().input, profile);
                    assert_eq!(failing.infer(&profile).unwrap_err().input, profile.to_json());
                }
            }
        }
    }
}

#[test]
fn test_top_n_is_forwarded() {
    let recommender = FakeRecommender {
        count: 10,
        ..Default::default()
    };
    let pipeline = Pipeline::new(Arc::new(artifacts_with(
        SpyClassifier::new(focusing_distribution()),
        recommender.clone(),
    )))
    .with_top_n(2);

    let result = pipeline.infer(&NutritionProfile::new(0, 0, 0, 0)).unwrap();
    assert_eq!(result.food_recommendations.len(), 2);
    assert_eq!(recommender.queries.lock().unwrap()[0].1, 2);
}

#[test]
fn test_repeated_inference_is_deterministic() {
    let pipeline = Pipeline::new(Arc::new(artifacts_with(
        SpyClassifier::new(focusing_distribution()),
        FakeRecommender {
            count: 3,
            ..Default::default()
        },
    )));

    let profile = NutritionProfile::new(1, 3, 2, 0);
    let first = pipeline.infer(&profile).unwrap();
    let second = pipeline.infer(&profile).unwrap();
    assert_eq!(first, second);
}
