//! Binary linear classifier (margin-based, e.g. passive-aggressive or linear SVM).

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::ModelError;
use super::read_artifact;
use super::sparse::SparseVector;
use crate::constants::FALLBACK_CLASS_LABELS;

/// Platt scaling parameters: `P(classes[1]) = 1 / (1 + exp(a * score + b))`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlattScaling {
    pub a: f64,
    pub b: f64,
}

/// On-disk representation of the classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierArtifact {
    #[serde(default)]
    pub classes: Option<Vec<String>>,
    pub coef: Vec<f64>,
    #[serde(default)]
    pub intercept: f64,
    #[serde(default)]
    pub probability: Option<PlattScaling>,
}

#[derive(Debug, Clone)]
pub struct LinearClassifier {
    classes: Vec<String>,
    coef: Vec<f64>,
    intercept: f64,
    probability: Option<PlattScaling>,
}

impl LinearClassifier {
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let artifact: ClassifierArtifact = read_artifact(path)?;
        Self::from_artifact(artifact)
    }

    pub fn from_artifact(artifact: ClassifierArtifact) -> Result<Self, ModelError> {
        let classes = match artifact.classes {
            Some(classes) if classes.len() > 2 => {
                return Err(ModelError::InvalidArtifact {
                    reason: format!(
                        "only binary classifiers are supported, got {} classes",
                        classes.len()
                    ),
                });
            }
            Some(classes) if classes.len() == 2 => classes,
            _ => FALLBACK_CLASS_LABELS.iter().map(|c| c.to_string()).collect(),
        };

        if artifact.coef.is_empty() {
            return Err(ModelError::InvalidArtifact {
                reason: "classifier has no coefficients".to_string(),
            });
        }

        if !artifact.intercept.is_finite() || artifact.coef.iter().any(|w| !w.is_finite()) {
            return Err(ModelError::InvalidArtifact {
                reason: "classifier weights must be finite".to_string(),
            });
        }

        if let Some(platt) = artifact.probability
            && !(platt.a.is_finite() && platt.b.is_finite())
        {
            return Err(ModelError::InvalidArtifact {
                reason: "probability calibration must be finite".to_string(),
            });
        }

        Ok(Self {
            classes,
            coef: artifact.coef,
            intercept: artifact.intercept,
            probability: artifact.probability,
        })
    }

    /// Class labels in model order; `classes()[1]` is the class favored by positive scores.
    #[inline]
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Label favored by a positive decision score.
    #[inline]
    pub fn positive_class(&self) -> &str {
        &self.classes[1]
    }

    #[inline]
    pub fn negative_class(&self) -> &str {
        &self.classes[0]
    }

    #[inline]
    pub fn coefficients(&self) -> &[f64] {
        &self.coef
    }

    #[inline]
    pub fn n_features(&self) -> usize {
        self.coef.len()
    }

    /// `true` when the artifact ships a probability calibration.
    #[inline]
    pub fn supports_probability(&self) -> bool {
        self.probability.is_some()
    }

    /// Signed distance from the separating hyperplane.
    pub fn decision_function(&self, features: &SparseVector) -> Result<f64, ModelError> {
        let score = features.dot_dense(&self.coef)? + self.intercept;
        if score.is_finite() {
            Ok(score)
        } else {
            Err(ModelError::MalformedOutput {
                reason: format!("decision score is not finite ({})", score),
            })
        }
    }

    /// Label for a decision score.
    pub fn predict(&self, score: f64) -> &str {
        if score > 0.0 {
            self.positive_class()
        } else {
            self.negative_class()
        }
    }

    /// Calibrated class probabilities in class order, when calibration is available.
    pub fn predict_proba(&self, score: f64) -> Option<[f64; 2]> {
        let platt = self.probability?;
        let p = 1.0 / (1.0 + (platt.a * score + platt.b).exp());
        p.is_finite().then_some([1.0 - p, p])
    }

    /// Index of `label` among the classes.
    pub fn class_index(&self, label: &str) -> Option<usize> {
        self.classes.iter().position(|c| c == label)
    }
}
