//! Rule-based pattern classifier.
//!
//! The rules form a priority list, not a partition: several rules can hold
//! for the same vector, and the first one in this order wins:
//!
//! 1. F - passive over-reliance: `total <= 15` and the passive gate
//!    (`e_avg <= 1` by default, see [`PassiveGate`] for the alternatives)
//! 2. A - strategic decomposition: `p_avg >= 2.5` and `e_avg >= 2`
//! 3. D - critical evaluation: `e_avg >= 2.5`
//! 4. E - pedagogical reflection: `r_avg >= 2.5`, `p_avg >= 2`, `e_avg >= 2`
//! 5. B - iterative refinement: `m_avg >= 2`
//! 6. C - moderate balanced: everything else

use serde::{Deserialize, Serialize};

use super::pattern::{Classification, Pattern};
use crate::domain::foundation::{DomainError, ValidationError};
use crate::domain::scoring::{Dimension, ScoreAggregate, ScoreVector};
use crate::ports::PatternModel;

/// The evaluation condition that, together with a low total, marks F.
///
/// These are alternative rule sets; exactly one is active. Each carries the
/// confidence its rule set assigns to F, see [`PassiveGate::confidence`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PassiveGate {
    /// `e_avg <= threshold`. The default, with threshold 1.0.
    EvaluationAverageAtMost { threshold: f64 },
    /// `e_avg < threshold`, and `p_avg < planning_below` when that is set.
    ///
    /// The metrics converter uses 1.5 and 2.0; the batch validator uses 1.5
    /// with no planning clause.
    EvaluationAverageBelow {
        threshold: f64,
        #[serde(default)]
        planning_below: Option<f64>,
    },
    /// `E1 <= threshold` on the verification slot alone. This is the aligned
    /// scorer's gate, threshold 1.
    VerificationAtMost { threshold: u8 },
}

impl PassiveGate {
    /// The aligned scorer's gate: `E1 <= 1`.
    pub fn aligned_scorer() -> Self {
        Self::VerificationAtMost { threshold: 1 }
    }

    /// The metrics converter's gate: `e_avg < 1.5` and `p_avg < 2`.
    pub fn metrics_converter() -> Self {
        Self::EvaluationAverageBelow {
            threshold: 1.5,
            planning_below: Some(2.0),
        }
    }

    pub fn holds(&self, scores: &ScoreVector, aggregate: &ScoreAggregate) -> bool {
        match self {
            Self::EvaluationAverageAtMost { threshold } => aggregate.e_avg <= *threshold,
            Self::EvaluationAverageBelow {
                threshold,
                planning_below,
            } => {
                aggregate.e_avg < *threshold
                    && planning_below.map_or(true, |limit| aggregate.p_avg < limit)
            }
            Self::VerificationAtMost { threshold } => scores.get(Dimension::E1).value() <= *threshold,
        }
    }

    /// Confidence of an F decision under this gate.
    pub fn confidence(&self) -> f64 {
        match self {
            Self::EvaluationAverageBelow { .. } => 0.85,
            Self::EvaluationAverageAtMost { .. } | Self::VerificationAtMost { .. } => 0.9,
        }
    }

    fn thresholds(&self) -> Vec<(&'static str, f64)> {
        match self {
            Self::EvaluationAverageAtMost { threshold } => vec![("passive_gate.threshold", *threshold)],
            Self::EvaluationAverageBelow {
                threshold,
                planning_below,
            } => {
                let mut values = vec![("passive_gate.threshold", *threshold)];
                if let Some(limit) = planning_below {
                    values.push(("passive_gate.planning_below", *limit));
                }
                values
            }
            Self::VerificationAtMost { threshold } => {
                vec![("passive_gate.threshold", f64::from(*threshold))]
            }
        }
    }
}

impl Default for PassiveGate {
    fn default() -> Self {
        Self::EvaluationAverageAtMost { threshold: 1.0 }
    }
}

/// Thresholds and confidences of the decision list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierRules {
    pub passive_total_max: u32,
    pub passive_gate: PassiveGate,
    pub passive_confidence: f64,

    pub strategic_planning_min: f64,
    pub strategic_evaluation_min: f64,
    pub strategic_confidence: f64,

    pub critical_evaluation_min: f64,
    pub critical_confidence: f64,

    pub reflective_regulation_min: f64,
    pub reflective_planning_min: f64,
    pub reflective_evaluation_min: f64,
    pub reflective_confidence: f64,

    pub iterative_monitoring_min: f64,
    pub iterative_confidence: f64,

    pub balanced_confidence: f64,
}

impl Default for ClassifierRules {
    fn default() -> Self {
        Self {
            passive_total_max: 15,
            passive_gate: PassiveGate::default(),
            passive_confidence: 0.9,
            strategic_planning_min: 2.5,
            strategic_evaluation_min: 2.0,
            strategic_confidence: 0.85,
            critical_evaluation_min: 2.5,
            critical_confidence: 0.85,
            reflective_regulation_min: 2.5,
            reflective_planning_min: 2.0,
            reflective_evaluation_min: 2.0,
            reflective_confidence: 0.8,
            iterative_monitoring_min: 2.0,
            iterative_confidence: 0.8,
            balanced_confidence: 0.7,
        }
    }
}

impl ClassifierRules {
    /// Swaps the F gate and takes over that gate's F confidence.
    pub fn with_passive_gate(mut self, gate: PassiveGate) -> Self {
        self.passive_gate = gate;
        self.passive_confidence = gate.confidence();
        self
    }

    /// Checks confidences lie in (0, 1] and thresholds in the score range.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let confidences = [
            ("passive_confidence", self.passive_confidence),
            ("strategic_confidence", self.strategic_confidence),
            ("critical_confidence", self.critical_confidence),
            ("reflective_confidence", self.reflective_confidence),
            ("iterative_confidence", self.iterative_confidence),
            ("balanced_confidence", self.balanced_confidence),
        ];
        for (field, value) in confidences {
            if !(value > 0.0 && value <= 1.0) {
                return Err(ValidationError::invalid_format(
                    field,
                    format!("confidence must be in (0, 1], got {}", value),
                ));
            }
        }

        let mut averages = self.passive_gate.thresholds();
        averages.extend([
            ("strategic_planning_min", self.strategic_planning_min),
            ("strategic_evaluation_min", self.strategic_evaluation_min),
            ("critical_evaluation_min", self.critical_evaluation_min),
            ("reflective_regulation_min", self.reflective_regulation_min),
            ("reflective_planning_min", self.reflective_planning_min),
            ("reflective_evaluation_min", self.reflective_evaluation_min),
            ("iterative_monitoring_min", self.iterative_monitoring_min),
        ]);
        for (field, value) in averages {
            if !(0.0..=3.0).contains(&value) {
                return Err(ValidationError::invalid_format(
                    field,
                    format!("threshold must be in [0, 3], got {}", value),
                ));
            }
        }

        if self.passive_total_max > 36 {
            return Err(ValidationError::out_of_range(
                "passive_total_max",
                0,
                36,
                self.passive_total_max as i32,
            ));
        }
        Ok(())
    }
}

/// Priority-ordered decision list over a score vector's aggregates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RuleClassifier {
    rules: ClassifierRules,
}

impl RuleClassifier {
    pub fn new(rules: ClassifierRules) -> Self {
        Self { rules }
    }

    /// Builds a classifier from rules that have not been checked yet.
    pub fn try_new(rules: ClassifierRules) -> Result<Self, DomainError> {
        rules.validate()?;
        Ok(Self::new(rules))
    }

    pub fn rules(&self) -> &ClassifierRules {
        &self.rules
    }

    /// Classifies a score vector. Total over every valid vector.
    pub fn decide(&self, scores: &ScoreVector) -> Classification {
        let r = &self.rules;
        let agg = scores.aggregate();

        if agg.total <= r.passive_total_max && r.passive_gate.holds(scores, &agg) {
            return Classification::new(Pattern::F, r.passive_confidence);
        }
        if agg.p_avg >= r.strategic_planning_min && agg.e_avg >= r.strategic_evaluation_min {
            return Classification::new(Pattern::A, r.strategic_confidence);
        }
        if agg.e_avg >= r.critical_evaluation_min {
            return Classification::new(Pattern::D, r.critical_confidence);
        }
        if agg.r_avg >= r.reflective_regulation_min
            && agg.p_avg >= r.reflective_planning_min
            && agg.e_avg >= r.reflective_evaluation_min
        {
            return Classification::new(Pattern::E, r.reflective_confidence);
        }
        if agg.m_avg >= r.iterative_monitoring_min {
            return Classification::new(Pattern::B, r.iterative_confidence);
        }
        Classification::new(Pattern::C, r.balanced_confidence)
    }
}

impl PatternModel for RuleClassifier {
    fn name(&self) -> &str {
        "rule-classifier"
    }

    fn classify(&self, scores: &ScoreVector) -> Result<Classification, DomainError> {
        Ok(self.decide(scores))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;

    fn classify(values: [u8; 12]) -> Classification {
        RuleClassifier::default().decide(&ScoreVector::from_values(values))
    }

    #[test]
    fn zero_vector_is_passive_with_canonical_confidence() {
        let c = classify([0; 12]);
        assert_eq!(c.pattern, Pattern::F);
        assert!((c.confidence - 0.9).abs() < f64::EPSILON);
    }

    #[test]
    fn low_total_and_low_evaluation_is_f_regardless_of_other_groups() {
        // total 12, e_avg 0.33; m_avg 3 would otherwise satisfy B
        let c = classify([0, 0, 0, 0, 3, 3, 3, 1, 0, 0, 2, 0]);
        assert_eq!(c.pattern, Pattern::F);
    }

    #[test]
    fn a_is_checked_before_d() {
        // p_avg 3, e_avg 2.67: both A and D hold
        let c = classify([3, 3, 3, 3, 0, 0, 0, 3, 3, 2, 0, 0]);
        assert_eq!(c.pattern, Pattern::A);
        assert!((c.confidence - 0.85).abs() < f64::EPSILON);
    }

    #[test]
    fn high_evaluation_without_planning_is_d() {
        let c = classify([1, 1, 1, 1, 1, 1, 1, 3, 3, 3, 1, 1]);
        assert_eq!(c.pattern, Pattern::D);
    }

    #[test]
    fn reflection_needs_planning_and_evaluation() {
        let c = classify([2, 2, 2, 2, 1, 1, 1, 2, 2, 2, 3, 2]);
        assert_eq!(c.pattern, Pattern::E);
        assert!((c.confidence - 0.8).abs() < f64::EPSILON);
    }

    #[test]
    fn monitoring_alone_is_b() {
        let c = classify([1, 1, 2, 1, 2, 2, 2, 2, 1, 1, 1, 1]);
        assert_eq!(c.pattern, Pattern::B);
    }

    #[test]
    fn default_is_c() {
        let c = classify([2, 2, 2, 2, 1, 1, 1, 2, 2, 1, 1, 1]);
        assert_eq!(c.pattern, Pattern::C);
        assert!((c.confidence - 0.7).abs() < f64::EPSILON);
    }

    #[test]
    fn total_above_fifteen_escapes_f_even_with_zero_evaluation() {
        let c = classify([3, 3, 3, 3, 2, 2, 0, 0, 0, 0, 0, 0]);
        assert_eq!(c.pattern, Pattern::C);
    }

    #[test]
    fn verification_gate_only_looks_at_e1() {
        let rules = ClassifierRules::default().with_passive_gate(PassiveGate::aligned_scorer());
        let classifier = RuleClassifier::new(rules);
        // e_avg 2.0 fails the canonical gate but E1 = 0
        let v = ScoreVector::from_values([1, 1, 1, 1, 1, 1, 1, 0, 3, 3, 0, 0]);
        assert_eq!(classifier.decide(&v).pattern, Pattern::F);
        assert_eq!(RuleClassifier::default().decide(&v).pattern, Pattern::C);
    }

    #[test]
    fn below_gate_is_strict() {
        let rules = ClassifierRules::default()
            .with_passive_gate(PassiveGate::EvaluationAverageBelow {
                threshold: 1.0,
                planning_below: None,
            });
        let classifier = RuleClassifier::new(rules);
        let v = ScoreVector::from_values([0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 0, 0]);
        assert_eq!(classifier.decide(&v).pattern, Pattern::C);
        assert_eq!(RuleClassifier::default().decide(&v).pattern, Pattern::F);
    }

    #[test]
    fn each_gate_carries_its_own_f_confidence() {
        let cases = [
            (PassiveGate::default(), 0.9),
            (PassiveGate::aligned_scorer(), 0.9),
            (PassiveGate::metrics_converter(), 0.85),
            (
                PassiveGate::EvaluationAverageBelow {
                    threshold: 1.5,
                    planning_below: None,
                },
                0.85,
            ),
        ];
        for (gate, expected) in cases {
            let classifier = RuleClassifier::new(ClassifierRules::default().with_passive_gate(gate));
            let c = classifier.decide(&ScoreVector::zero());
            assert_eq!(c.pattern, Pattern::F, "{:?}", gate);
            assert!((c.confidence - expected).abs() < f64::EPSILON, "{:?}", gate);
        }
    }

    #[test]
    fn metrics_converter_gate_requires_low_planning() {
        let converter =
            RuleClassifier::new(ClassifierRules::default().with_passive_gate(PassiveGate::metrics_converter()));
        // total 11, p_avg 2.0, e_avg 1.0
        let planned = ScoreVector::from_values([2, 2, 2, 2, 0, 0, 0, 1, 1, 1, 0, 0]);
        assert_eq!(converter.decide(&planned).pattern, Pattern::C);
        assert_eq!(RuleClassifier::default().decide(&planned).pattern, Pattern::F);

        // p_avg 1.75, e_avg 1.33: F only under the converter gate
        let unplanned = ScoreVector::from_values([2, 2, 2, 1, 0, 0, 0, 2, 1, 1, 0, 0]);
        let c = converter.decide(&unplanned);
        assert_eq!(c.pattern, Pattern::F);
        assert!((c.confidence - 0.85).abs() < f64::EPSILON);
        assert_eq!(RuleClassifier::default().decide(&unplanned).pattern, Pattern::C);
    }

    #[test]
    fn planning_limit_out_of_range_is_rejected() {
        let rules = ClassifierRules::default().with_passive_gate(PassiveGate::EvaluationAverageBelow {
            threshold: 1.5,
            planning_below: Some(3.5),
        });
        assert!(rules.validate().is_err());
    }

    #[test]
    fn default_rules_validate() {
        assert!(ClassifierRules::default().validate().is_ok());
    }

    #[test]
    fn invalid_confidence_is_rejected() {
        let rules = ClassifierRules {
            balanced_confidence: 0.0,
            ..Default::default()
        };
        assert!(rules.validate().is_err());

        let rules = ClassifierRules {
            passive_confidence: 1.2,
            ..Default::default()
        };
        assert!(rules.validate().is_err());
    }

    #[test]
    fn out_of_range_threshold_is_rejected() {
        let rules = ClassifierRules::default()
            .with_passive_gate(PassiveGate::EvaluationAverageAtMost { threshold: 4.0 });
        assert!(rules.validate().is_err());
    }

    #[test]
    fn try_new_reports_the_offending_field() {
        let rules = ClassifierRules {
            critical_confidence: 1.5,
            ..Default::default()
        };
        let err = RuleClassifier::try_new(rules).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidFormat);
        assert_eq!(
            err.details.get("field").map(String::as_str),
            Some("critical_confidence")
        );
        assert!(RuleClassifier::try_new(ClassifierRules::default()).is_ok());
    }

    #[test]
    fn rules_deserialize_with_defaults() {
        let rules: ClassifierRules = serde_json::from_str(
            r#"{"passive_gate":{"kind":"evaluation_average_below","threshold":1.5},"passive_confidence":0.85}"#,
        )
        .unwrap();
        assert_eq!(
            rules.passive_gate,
            PassiveGate::EvaluationAverageBelow {
                threshold: 1.5,
                planning_below: None,
            }
        );
        assert!((rules.passive_confidence - 0.85).abs() < f64::EPSILON);
        assert_eq!(rules.passive_total_max, 15);
    }

    #[test]
    fn implements_pattern_model() {
        let model: &dyn PatternModel = &RuleClassifier::default();
        let c = model.classify(&ScoreVector::zero()).unwrap();
        assert_eq!(c.pattern, Pattern::F);
    }
}
