use serde::{Deserialize, Serialize};

use super::error::AnalysisError;
use crate::constants::{DEFAULT_MARGIN, DEFAULT_PROB_THRESHOLD, DEFAULT_SIM_WEIGHT};

/// Per-request analysis knobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisParams {
    pub use_headlines: bool,
    pub use_gemini: bool,
    pub disable_translation: bool,
    /// `|adjusted score|` below this is reported as UNSURE.
    pub margin: f64,
    /// How strongly headline similarity damps the raw score, in `[0, 1]`.
    pub sim_weight: f64,
    /// Minimum positive-class probability for a positive verdict, in `[0, 1]`.
    pub prob_threshold: f64,
    /// Reference class for probability orientation. `None` means `classes[1]`.
    pub positive_label: Option<String>,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self {
            use_headlines: true,
            use_gemini: true,
            disable_translation: false,
            margin: DEFAULT_MARGIN,
            sim_weight: DEFAULT_SIM_WEIGHT,
            prob_threshold: DEFAULT_PROB_THRESHOLD,
            positive_label: None,
        }
    }
}

impl AnalysisParams {
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if !self.margin.is_finite() {
            return Err(AnalysisError::InvalidParameter {
                name: "margin",
                reason: "must be a finite number".to_string(),
            });
        }

        check_unit_interval("simWeight", self.sim_weight)?;
        check_unit_interval("probThreshold", self.prob_threshold)?;

        Ok(())
    }

    /// Requested positive label with blank values treated as absent.
    pub fn requested_positive_label(&self) -> Option<&str> {
        self.positive_label
            .as_deref()
            .map(str::trim)
            .filter(|label| !label.is_empty())
    }
}

fn check_unit_interval(name: &'static str, value: f64) -> Result<(), AnalysisError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(AnalysisError::InvalidParameter {
            name,
            reason: format!("must be within [0, 1], got {}", value),
        });
    }
    Ok(())
}
