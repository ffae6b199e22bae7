//! Scoring configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;
use crate::application::Granularity;
use crate::domain::classification::{ClassifierRules, PassiveGate};
use crate::domain::scoring::{Rubric, RubricError};

/// Which F-condition variant the classifier uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateKind {
    /// `e_avg <= 1`, F confidence 0.9
    #[default]
    EvaluationAverageAtMost,
    /// Metrics converter: `e_avg < 1.5` and `p_avg < 2`, F confidence 0.85
    EvaluationAverageBelow,
    /// Aligned scorer: `E1 <= 1`, F confidence 0.9
    VerificationAtMost,
}

impl GateKind {
    fn default_threshold(&self) -> f64 {
        match self {
            Self::EvaluationAverageAtMost => 1.0,
            Self::EvaluationAverageBelow => 1.5,
            Self::VerificationAtMost => 1.0,
        }
    }
}

/// Scoring and classification settings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringConfig {
    /// Entity each output record describes
    #[serde(default)]
    pub granularity: Granularity,

    /// YAML rubric replacing the built-in tables
    #[serde(default)]
    pub rubric_path: Option<PathBuf>,

    /// F-condition variant
    #[serde(default)]
    pub gate: GateKind,

    /// Overrides the variant's default threshold
    #[serde(default)]
    pub gate_threshold: Option<f64>,
}

impl ScoringConfig {
    pub fn gate_threshold(&self) -> f64 {
        self.gate_threshold
            .unwrap_or_else(|| self.gate.default_threshold())
    }

    pub fn passive_gate(&self) -> PassiveGate {
        let threshold = self.gate_threshold();
        match self.gate {
            GateKind::EvaluationAverageAtMost => PassiveGate::EvaluationAverageAtMost { threshold },
            GateKind::EvaluationAverageBelow => PassiveGate::EvaluationAverageBelow {
                threshold,
                planning_below: Some(2.0),
            },
            GateKind::VerificationAtMost => PassiveGate::VerificationAtMost {
                threshold: threshold as u8,
            },
        }
    }

    /// Default rules with the configured gate and its F confidence.
    pub fn classifier_rules(&self) -> ClassifierRules {
        ClassifierRules::default().with_passive_gate(self.passive_gate())
    }

    /// The configured rubric file, or the built-in tables.
    pub fn rubric(&self) -> Result<Rubric, RubricError> {
        match &self.rubric_path {
            Some(path) => Rubric::from_yaml_file(path),
            None => Ok(Rubric::aligned()),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(path) = &self.rubric_path {
            if !path.is_file() {
                return Err(ValidationError::RubricNotFound(path.clone()));
            }
        }

        let threshold = self.gate_threshold();
        if !(0.0..=3.0).contains(&threshold) {
            return Err(ValidationError::InvalidGateThreshold(threshold));
        }
        if self.gate == GateKind::VerificationAtMost && threshold.fract() != 0.0 {
            return Err(ValidationError::FractionalGateThreshold(threshold));
        }
        Ok(())
    }
}
