//! Trained risk-model artifacts
//!
//! Three JSON files exported from the training pipeline:
//! - `risk_scaler.json`: standardization parameters (`mean`, `scale`)
//! - `risk_classifier.json`: linear classifier (`classes`, `coef`, `intercept`, `probability`)
//! - `risk_encoder.json`: class id -> label (`classes`)
//!
//! Shapes are validated at load time so inference itself can only fail on
//! non-finite inputs or undecodable classes.

use super::RiskCategory;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Width of the model input vector. Fixed at training time.
pub const MODEL_INPUT_WIDTH: usize = 10;

pub const SCALER_FILE: &str = "risk_scaler.json";
pub const CLASSIFIER_FILE: &str = "risk_classifier.json";
pub const ENCODER_FILE: &str = "risk_encoder.json";

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid artifact shape: {0}")]
    Shape(String),

    #[error("non-finite value in model input or output")]
    NonFinite,

    #[error("class id {0} has no label")]
    UnknownClass(i64),

    #[error("label '{0}' is not a risk category")]
    UnknownLabel(String),
}

// ============================================================================
// Scaler
// ============================================================================

/// Standardization: `(x - mean) / scale`.
#[derive(Debug, Clone, Deserialize)]
pub struct StandardScaler {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

impl StandardScaler {
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Result<Self, ModelError> {
        let scaler = Self { mean, scale };
        scaler.validate()?;
        Ok(scaler)
    }

    fn validate(&self) -> Result<(), ModelError> {
        if self.mean.len() != MODEL_INPUT_WIDTH || self.scale.len() != MODEL_INPUT_WIDTH {
            return Err(ModelError::Shape(format!(
                "scaler expects {} features, got mean={} scale={}",
                MODEL_INPUT_WIDTH,
                self.mean.len(),
                self.scale.len()
            )));
        }
        Ok(())
    }

    pub fn transform(&self, input: &[f64; MODEL_INPUT_WIDTH]) -> Result<[f64; MODEL_INPUT_WIDTH], ModelError> {
        let mut out = [0.0; MODEL_INPUT_WIDTH];
        for (i, value) in input.iter().enumerate() {
            // Zero-variance features pass through centered only
            let scale = if self.scale[i] == 0.0 { 1.0 } else { self.scale[i] };
            out[i] = (value - self.mean[i]) / scale;
            if !out[i].is_finite() {
                return Err(ModelError::NonFinite);
            }
        }
        Ok(out)
    }
}

// ============================================================================
// Classifier
// ============================================================================

/// Linear classifier exported from a logistic-regression style model.
///
/// One coefficient row per class means argmax over decision scores and a
/// softmax for probabilities. A single row with two classes is binary: the
/// sign of the score picks the class and probabilities come from the
/// logistic function.
#[derive(Debug, Clone, Deserialize)]
pub struct LinearClassifier {
    classes: Vec<i64>,
    coef: Vec<Vec<f64>>,
    intercept: Vec<f64>,
    #[serde(default)]
    probability: bool,
}

impl LinearClassifier {
    pub fn new(
        classes: Vec<i64>,
        coef: Vec<Vec<f64>>,
        intercept: Vec<f64>,
        probability: bool,
    ) -> Result<Self, ModelError> {
        let classifier = Self { classes, coef, intercept, probability };
        classifier.validate()?;
        Ok(classifier)
    }

    fn validate(&self) -> Result<(), ModelError> {
        let binary = self.classes.len() == 2 && self.coef.len() == 1;
        if self.classes.len() < 2 {
            return Err(ModelError::Shape("classifier needs at least two classes".to_string()));
        }
        if !binary && self.coef.len() != self.classes.len() {
            return Err(ModelError::Shape(format!(
                "{} coefficient rows for {} classes",
                self.coef.len(),
                self.classes.len()
            )));
        }
        if self.intercept.len() != self.coef.len() {
            return Err(ModelError::Shape(format!(
                "{} intercepts for {} coefficient rows",
                self.intercept.len(),
                self.coef.len()
            )));
        }
        if let Some(row) = self.coef.iter().find(|row| row.len() != MODEL_INPUT_WIDTH) {
            return Err(ModelError::Shape(format!(
                "coefficient row has {} weights, expected {}",
                row.len(),
                MODEL_INPUT_WIDTH
            )));
        }
        Ok(())
    }

    /// Whether [`Self::predict_proba`] is available.
    pub fn has_probabilities(&self) -> bool {
        self.probability
    }

    fn decision_scores(&self, input: &[f64; MODEL_INPUT_WIDTH]) -> Vec<f64> {
        self.coef
            .iter()
            .zip(&self.intercept)
            .map(|(row, bias)| row.iter().zip(input).map(|(w, x)| w * x).sum::<f64>() + bias)
            .collect()
    }

    /// Encoded class id for one input row.
    pub fn predict(&self, input: &[f64; MODEL_INPUT_WIDTH]) -> Result<i64, ModelError> {
        let scores = self.decision_scores(input);
        if scores.iter().any(|s| !s.is_finite()) {
            return Err(ModelError::NonFinite);
        }

        let index = if scores.len() == 1 {
            usize::from(scores[0] > 0.0)
        } else {
            argmax(&scores)
        };
        Ok(self.classes[index])
    }

    /// Class probabilities in `classes` order, or `None` when the model was
    /// exported without probability output.
    pub fn predict_proba(&self, input: &[f64; MODEL_INPUT_WIDTH]) -> Option<Vec<f64>> {
        if !self.probability {
            return None;
        }

        let scores = self.decision_scores(input);
        if scores.len() == 1 {
            let positive = 1.0 / (1.0 + (-scores[0]).exp());
            return Some(vec![1.0 - positive, positive]);
        }

        let max = scores.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
        let total: f64 = exps.iter().sum();
        Some(exps.into_iter().map(|e| e / total).collect())
    }
}

fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, value) in values.iter().enumerate() {
        if *value > values[best] {
            best = i;
        }
    }
    best
}

// ============================================================================
// Label Encoder
// ============================================================================

/// Maps encoded class ids back to category labels.
#[derive(Debug, Clone, Deserialize)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    pub fn new(classes: Vec<String>) -> Self {
        Self { classes }
    }

    pub fn inverse_transform(&self, class_id: i64) -> Result<&str, ModelError> {
        usize::try_from(class_id)
            .ok()
            .and_then(|i| self.classes.get(i))
            .map(String::as_str)
            .ok_or(ModelError::UnknownClass(class_id))
    }
}

// ============================================================================
// Bundle
// ============================================================================

/// Scaler + classifier + encoder loaded together.
#[derive(Debug, Clone)]
pub struct RiskModel {
    scaler: StandardScaler,
    classifier: LinearClassifier,
    encoder: LabelEncoder,
}

/// Decoded model output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelOutput {
    pub category: RiskCategory,
    /// Max class probability x 100, when the classifier exposes probabilities.
    pub confidence: Option<f64>,
}

impl RiskModel {
    pub fn new(scaler: StandardScaler, classifier: LinearClassifier, encoder: LabelEncoder) -> Self {
        Self { scaler, classifier, encoder }
    }

    /// Load all three artifacts from `dir`.
    pub fn load(dir: &Path) -> Result<Self, ModelError> {
        let scaler: StandardScaler = read_artifact(&dir.join(SCALER_FILE))?;
        scaler.validate()?;

        let classifier: LinearClassifier = read_artifact(&dir.join(CLASSIFIER_FILE))?;
        classifier.validate()?;

        let encoder: LabelEncoder = read_artifact(&dir.join(ENCODER_FILE))?;

        Ok(Self::new(scaler, classifier, encoder))
    }

    /// Scale, predict, decode.
    pub fn predict(&self, input: &[f64; MODEL_INPUT_WIDTH]) -> Result<ModelOutput, ModelError> {
        let scaled = self.scaler.transform(input)?;
        let class_id = self.classifier.predict(&scaled)?;
        let label = self.encoder.inverse_transform(class_id)?;
        let category: RiskCategory = label
            .parse()
            .map_err(|_| ModelError::UnknownLabel(label.to_string()))?;

        let confidence = self
            .classifier
            .predict_proba(&scaled)
            .map(|probas| probas.into_iter().fold(0.0, f64::max) * 100.0);

        Ok(ModelOutput { category, confidence })
    }
}

fn read_artifact<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ModelError> {
    let contents = fs::read_to_string(path).map_err(|source| ModelError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| ModelError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn identity_scaler() -> StandardScaler {
        StandardScaler::new(vec![0.0; MODEL_INPUT_WIDTH], vec![1.0; MODEL_INPUT_WIDTH]).unwrap()
    }

    fn weights(index: usize, weight: f64) -> Vec<f64> {
        let mut row = vec![0.0; MODEL_INPUT_WIDTH];
        row[index] = weight;
        row
    }

    #[test]
    fn test_scaler_transform() {
        let mut mean = vec![0.0; MODEL_INPUT_WIDTH];
        let mut scale = vec![1.0; MODEL_INPUT_WIDTH];
        mean[0] = 10.0;
        scale[0] = 2.0;
        scale[9] = 0.0;
        let scaler = StandardScaler::new(mean, scale).unwrap();

        let mut input = [0.0; MODEL_INPUT_WIDTH];
        input[0] = 14.0;
        let out = scaler.transform(&input).unwrap();
        assert_relative_eq!(out[0], 2.0);
        assert_relative_eq!(out[9], 0.0);
    }

    #[test]
    fn test_scaler_rejects_wrong_width() {
        let err = StandardScaler::new(vec![0.0; 7], vec![1.0; 7]).unwrap_err();
        assert!(matches!(err, ModelError::Shape(_)));
    }

    #[test]
    fn test_multiclass_argmax_and_softmax() {
        // Class 0 follows high-risk count, class 1 is a constant baseline
        let classifier = LinearClassifier::new(
            vec![0, 1],
            vec![weights(1, 2.0), vec![0.0; MODEL_INPUT_WIDTH]],
            vec![0.0, 1.0],
            true,
        )
        .unwrap();

        let mut input = [0.0; MODEL_INPUT_WIDTH];
        assert_eq!(classifier.predict(&input).unwrap(), 1);

        input[1] = 3.0;
        assert_eq!(classifier.predict(&input).unwrap(), 0);

        let probas = classifier.predict_proba(&input).unwrap();
        assert_relative_eq!(probas.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
        assert!(probas[0] > probas[1]);
    }

    #[test]
    fn test_binary_classifier_uses_sign() {
        let classifier = LinearClassifier::new(vec![4, 7], vec![weights(0, 1.0)], vec![-2.0], false).unwrap();

        let mut input = [0.0; MODEL_INPUT_WIDTH];
        input[0] = 1.0;
        assert_eq!(classifier.predict(&input).unwrap(), 4);
        input[0] = 5.0;
        assert_eq!(classifier.predict(&input).unwrap(), 7);
        assert!(classifier.predict_proba(&input).is_none());
    }

    #[test]
    fn test_classifier_shape_validation() {
        assert!(LinearClassifier::new(vec![0, 1, 2], vec![weights(0, 1.0)], vec![0.0], true).is_err());
        assert!(LinearClassifier::new(vec![0, 1], vec![vec![1.0; 3], vec![1.0; 3]], vec![0.0, 0.0], true).is_err());
        assert!(LinearClassifier::new(vec![0, 1], vec![weights(0, 1.0), weights(1, 1.0)], vec![0.0], true).is_err());
    }

    #[test]
    fn test_encoder_rejects_unknown_ids() {
        let encoder = LabelEncoder::new(vec!["High".into(), "Low".into()]);
        assert_eq!(encoder.inverse_transform(1).unwrap(), "Low");
        assert!(matches!(encoder.inverse_transform(2), Err(ModelError::UnknownClass(2))));
        assert!(matches!(encoder.inverse_transform(-1), Err(ModelError::UnknownClass(-1))));
    }

    #[test]
    fn test_bundle_rejects_unknown_label() {
        let model = RiskModel::new(
            identity_scaler(),
            LinearClassifier::new(vec![0, 1], vec![weights(0, 1.0)], vec![1.0], false).unwrap(),
            LabelEncoder::new(vec!["Low".into(), "Catastrophic".into()]),
        );
        let err = model.predict(&[0.0; MODEL_INPUT_WIDTH]).unwrap_err();
        assert!(matches!(err, ModelError::UnknownLabel(label) if label == "Catastrophic"));
    }

    #[test]
    fn test_load_missing_directory() {
        let err = RiskModel::load(Path::new("/nonexistent/models")).unwrap_err();
        assert!(matches!(err, ModelError::Io { .. }));
    }
}
