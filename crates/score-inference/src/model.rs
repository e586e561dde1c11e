//! The fitted regression model.
//!
//! A [`RegressionModel`] maps one feature vector to one predicted score. The
//! scoring function lives in [`Estimator`]; the surrounding struct carries
//! descriptive metadata recorded at training time.
//!
//! # Security
//!
//! Models are plain JSON. Loading one never executes code.

use crate::artifacts::Artifact;
use crate::error::{PredictError, Result};
use crate::preprocessor::FeatureMatrix;
use serde::{Deserialize, Serialize};

/// Scoring function of a fitted model.
///
/// Tagged by `kind` in the serialized form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[non_exhaustive]
pub enum Estimator {
    /// `intercept + Σ coefficients[i] * x[i]`.
    ///
    /// Also covers ridge and lasso fits, which share the inference formula.
    Linear {
        coefficients: Vec<f64>,
        intercept: f64,
    },
}

impl Estimator {
    /// Number of features the estimator consumes.
    pub fn input_width(&self) -> usize {
        match self {
            Estimator::Linear { coefficients, .. } => coefficients.len(),
        }
    }

    fn score(&self, features: &[f64]) -> f64 {
        match self {
            Estimator::Linear {
                coefficients,
                intercept,
            } => {
                intercept
                    + coefficients
                        .iter()
                        .zip(features)
                        .map(|(c, x)| c * x)
                        .sum::<f64>()
            }
        }
    }
}

/// A fitted regression model with its training metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionModel {
    pub format_version: u32,

    /// Display name of the selected algorithm (e.g. "Linear Regression").
    pub name: String,

    /// Name of the predicted column.
    pub target: String,

    /// R² on the held-out set, if it was recorded.
    #[serde(default)]
    pub r2_score: Option<f64>,

    pub estimator: Estimator,
}

impl Artifact for RegressionModel {
    const NAME: &'static str = "model";

    fn format_version(&self) -> u32 {
        self.format_version
    }

    fn validate(&self) -> std::result::Result<(), String> {
        match &self.estimator {
            Estimator::Linear {
                coefficients,
                intercept,
            } => {
                if coefficients.is_empty() {
                    return Err("linear estimator has no coefficients".to_string());
                }
                if !intercept.is_finite() || coefficients.iter().any(|c| !c.is_finite()) {
                    return Err("linear estimator has non-finite parameters".to_string());
                }
            }
        }
        Ok(())
    }
}

impl RegressionModel {
    /// Number of features each input row must have.
    pub fn input_width(&self) -> usize {
        self.estimator.input_width()
    }

    /// Score a single feature vector.
    ///
    /// # Errors
    ///
    /// Returns [`PredictError::Scoring`] if `features` does not have exactly
    /// [`input_width()`](Self::input_width) values.
    pub fn predict_one(&self, features: &[f64]) -> Result<f64> {
        let expected = self.input_width();
        if features.len() != expected {
            return Err(PredictError::Scoring {
                expected,
                actual: features.len(),
            });
        }
        Ok(self.estimator.score(features))
    }

    /// Score every row, preserving order. Stops at the first failing row.
    pub fn predict(&self, features: &FeatureMatrix) -> Result<Vec<f64>> {
        features.iter().map(|row| self.predict_one(row)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> RegressionModel {
        RegressionModel {
            format_version: 1,
            name: "Linear Regression".to_string(),
            target: "math_score".to_string(),
            r2_score: Some(0.88),
            estimator: Estimator::Linear {
                coefficients: vec![2.0, -1.0, 0.5],
                intercept: 10.0,
            },
        }
    }

    #[test]
    fn test_predict_one() {
        let score = model().predict_one(&[1.0, 2.0, 4.0]).unwrap();
        assert_eq!(score, 12.0);
    }

    #[test]
    fn test_predict_preserves_order() {
        let scores = model()
            .predict(&vec![vec![0.0, 0.0, 0.0], vec![1.0, 0.0, 0.0]])
            .unwrap();
        assert_eq!(scores, vec![10.0, 12.0]);
    }

    #[test]
    fn test_width_mismatch() {
        let err = model().predict_one(&[1.0, 2.0]).unwrap_err();
        assert!(matches!(
            err,
            PredictError::Scoring {
                expected: 3,
                actual: 2
            }
        ));
    }

    #[test]
    fn test_deserialize_tagged_estimator() {
        let json = serde_json::json!({
            "format_version": 1,
            "name": "Ridge",
            "target": "math_score",
            "estimator": { "kind": "linear", "coefficients": [1.0], "intercept": 0.0 }
        });
        let model: RegressionModel = serde_json::from_value(json).unwrap();
        assert_eq!(model.input_width(), 1);
        assert_eq!(model.r2_score, None);
    }

    #[test]
    fn test_unknown_estimator_kind_is_rejected() {
        let json = serde_json::json!({
            "format_version": 1,
            "name": "Forest",
            "target": "math_score",
            "estimator": { "kind": "random_forest", "trees": [] }
        });
        assert!(serde_json::from_value::<RegressionModel>(json).is_err());
    }

    #[test]
    fn test_validate_rejects_empty_coefficients() {
        let mut m = model();
        m.estimator = Estimator::Linear {
            coefficients: vec![],
            intercept: 1.0,
        };
        assert!(m.validate().is_err());
    }
}
