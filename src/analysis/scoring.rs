//! Score damping, probability orientation and the final verdict.

use serde::Serialize;

use crate::constants::UNSURE_LABEL;
use crate::model::LinearClassifier;

/// Multiplier applied to the raw score given headline similarity.
///
/// `1 - sim_weight * (1 - clamp(similarity, 0, 1))`, or `1` without a similarity.
pub fn damping_factor(similarity: Option<f64>, sim_weight: f64) -> f64 {
    match similarity {
        Some(sim) => {
            let sim = if sim.is_nan() { 0.0 } else { sim.clamp(0.0, 1.0) };
            1.0 - sim_weight * (1.0 - sim)
        }
        None => 1.0,
    }
}

#[inline]
pub fn adjust_score(raw: f64, similarity: Option<f64>, sim_weight: f64) -> f64 {
    raw * damping_factor(similarity, sim_weight)
}

#[inline]
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Resolved label vocabulary for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelSpace {
    /// Reference class for probabilities.
    pub positive: String,
    /// First model class different from `positive`.
    pub other: String,
    /// `positive` is the class the decision function points toward.
    pub positive_is_model_positive: bool,
    /// `positive` is one of the model's classes.
    pub known: bool,
}

impl LabelSpace {
    pub fn resolve(classes: &[String], requested: Option<&str>) -> Self {
        let model_positive = classes.get(1).or(classes.first()).cloned().unwrap_or_default();
        let positive = requested.map(str::to_string).unwrap_or_else(|| model_positive.clone());
        let other = classes
            .iter()
            .find(|c| **c != positive)
            .or(classes.first())
            .cloned()
            .unwrap_or_default();

        Self {
            positive_is_model_positive: positive == model_positive,
            known: classes.contains(&positive),
            positive,
            other,
        }
    }

    /// `σ(score)` oriented toward the positive label.
    pub fn oriented(&self, score: f64) -> f64 {
        let p = sigmoid(score);
        if self.positive_is_model_positive {
            p
        } else {
            1.0 - p
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbabilitySource {
    /// Platt-calibrated probability from the classifier artifact.
    Calibrated,
    /// Logistic transform of the decision score.
    Logistic,
}

/// Probability of the positive label before and after damping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProbabilityEstimate {
    pub raw: f64,
    pub adjusted: f64,
    pub threshold: f64,
    pub source: ProbabilitySource,
}

/// Computes positive-label probabilities; `None` if any value is not finite.
pub fn estimate_probability(
    classifier: &LinearClassifier,
    labels: &LabelSpace,
    raw_score: f64,
    adjusted_score: f64,
    threshold: f64,
) -> Option<ProbabilityEstimate> {
    let (raw, source) = match classifier.predict_proba(raw_score) {
        Some(proba) => {
            let index = classifier.class_index(&labels.positive).unwrap_or(1);
            (proba.get(index).copied()?, ProbabilitySource::Calibrated)
        }
        None => (labels.oriented(raw_score), ProbabilitySource::Logistic),
    };
    let adjusted = labels.oriented(adjusted_score);

    if !raw.is_finite() || !adjusted.is_finite() {
        return None;
    }

    Some(ProbabilityEstimate {
        raw,
        adjusted,
        threshold,
        source,
    })
}

/// Final verdict of an analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Label(String),
    Unsure,
}

impl Verdict {
    pub fn as_str(&self) -> &str {
        match self {
            Verdict::Label(label) => label,
            Verdict::Unsure => UNSURE_LABEL,
        }
    }

    #[inline]
    pub fn is_unsure(&self) -> bool {
        matches!(self, Verdict::Unsure)
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Verdict {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Picks the label, then applies the UNSURE deadband.
///
/// With a probability the positive label wins when `p_adj >= threshold`.
/// Without one, the adjusted score's sign decides in favour of the class the
/// decision function points toward (`classes[1]` for non-negative scores).
pub fn decide_label(
    labels: &LabelSpace,
    adjusted_score: f64,
    probability: Option<&ProbabilityEstimate>,
    margin: f64,
) -> Verdict {
    if adjusted_score.abs() < margin {
        return Verdict::Unsure;
    }

    let positive_wins = match probability {
        Some(p) => p.adjusted >= p.threshold,
        None => (adjusted_score >= 0.0) == labels.positive_is_model_positive,
    };

    if positive_wins {
        Verdict::Label(labels.positive.clone())
    } else {
        Verdict::Label(labels.other.clone())
    }
}
