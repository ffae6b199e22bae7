//! Agreement between a pattern model and labelled vectors.

use serde::Serialize;
use std::collections::BTreeMap;

use super::pattern::Pattern;
use crate::domain::foundation::DomainError;
use crate::domain::scoring::ScoreVector;
use crate::ports::PatternModel;

/// Rows are expected patterns, columns predicted patterns, both in
/// [`Pattern::ALL`] order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConfusionMatrix {
    counts: [[usize; 6]; 6],
}

impl ConfusionMatrix {
    pub fn record(&mut self, expected: Pattern, predicted: Pattern) {
        self.counts[expected.index()][predicted.index()] += 1;
    }

    pub fn count(&self, expected: Pattern, predicted: Pattern) -> usize {
        self.counts[expected.index()][predicted.index()]
    }

    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }

    pub fn correct(&self) -> usize {
        (0..6).map(|i| self.counts[i][i]).sum()
    }

    fn expected_count(&self, pattern: Pattern) -> usize {
        self.counts[pattern.index()].iter().sum()
    }

    fn predicted_count(&self, pattern: Pattern) -> usize {
        self.counts.iter().map(|row| row[pattern.index()]).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClassMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    /// Number of samples whose expected label is this class.
    pub support: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationReport {
    pub accuracy: f64,
    /// Only classes seen as expected or predicted label.
    pub per_class: BTreeMap<Pattern, ClassMetrics>,
    pub confusion: ConfusionMatrix,
}

impl EvaluationReport {
    /// Builds the report from `(expected, predicted)` pairs.
    ///
    /// Undefined ratios (no predictions or no support) are reported as 0.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (Pattern, Pattern)>,
    {
        let mut confusion = ConfusionMatrix::default();
        for (expected, predicted) in pairs {
            confusion.record(expected, predicted);
        }

        let total = confusion.total();
        let accuracy = ratio(confusion.correct(), total);

        let mut per_class = BTreeMap::new();
        for pattern in Pattern::ALL {
            let support = confusion.expected_count(pattern);
            let predicted = confusion.predicted_count(pattern);
            if support == 0 && predicted == 0 {
                continue;
            }
            let hits = confusion.count(pattern, pattern);
            let precision = ratio(hits, predicted);
            let recall = ratio(hits, support);
            let f1 = if precision + recall > 0.0 {
                2.0 * precision * recall / (precision + recall)
            } else {
                0.0
            };
            per_class.insert(
                pattern,
                ClassMetrics {
                    precision,
                    recall,
                    f1,
                    support,
                },
            );
        }

        Self {
            accuracy,
            per_class,
            confusion,
        }
    }

    /// Runs `model` over labelled vectors and compares against the labels.
    pub fn evaluate(
        model: &dyn PatternModel,
        labelled: &[(ScoreVector, Pattern)],
    ) -> Result<Self, DomainError> {
        let pairs = labelled
            .iter()
            .map(|(scores, expected)| Ok((*expected, model.classify(scores)?.pattern)))
            .collect::<Result<Vec<_>, DomainError>>()?;
        Ok(Self::from_pairs(pairs))
    }

    pub fn sample_count(&self) -> usize {
        self.confusion.total()
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::classification::RuleClassifier;

    #[test]
    fn empty_input_has_zero_accuracy() {
        let report = EvaluationReport::from_pairs(Vec::<(Pattern, Pattern)>::new());
        assert_eq!(report.accuracy, 0.0);
        assert!(report.per_class.is_empty());
        assert_eq!(report.sample_count(), 0);
    }

    #[test]
    fn perfect_agreement() {
        let report = EvaluationReport::from_pairs(vec![
            (Pattern::A, Pattern::A),
            (Pattern::F, Pattern::F),
            (Pattern::F, Pattern::F),
        ]);
        assert_eq!(report.accuracy, 1.0);
        let f = report.per_class[&Pattern::F];
        assert_eq!(f.support, 2);
        assert_eq!(f.f1, 1.0);
    }

    #[test]
    fn per_class_metrics_from_confusion() {
        let report = EvaluationReport::from_pairs(vec![
            (Pattern::C, Pattern::C),
            (Pattern::C, Pattern::B),
            (Pattern::B, Pattern::B),
            (Pattern::F, Pattern::C),
        ]);
        assert_eq!(report.accuracy, 0.5);

        let c = report.per_class[&Pattern::C];
        assert_eq!(c.support, 2);
        assert_eq!(c.precision, 0.5);
        assert_eq!(c.recall, 0.5);
        assert_eq!(c.f1, 0.5);

        let f = report.per_class[&Pattern::F];
        assert_eq!(f.precision, 0.0);
        assert_eq!(f.recall, 0.0);
        assert_eq!(f.f1, 0.0);

        assert_eq!(report.confusion.count(Pattern::C, Pattern::B), 1);
        assert!(!report.per_class.contains_key(&Pattern::A));
    }

    #[test]
    fn evaluate_runs_model() {
        let labelled = vec![
            (ScoreVector::zero(), Pattern::F),
            (ScoreVector::from_values([3; 12]), Pattern::A),
            (ScoreVector::from_values([2; 12]), Pattern::D),
        ];
        let report = EvaluationReport::evaluate(&RuleClassifier::default(), &labelled).unwrap();
        // all-2 vector falls through to B on m_avg
        assert_eq!(report.confusion.count(Pattern::D, Pattern::B), 1);
        assert!((report.accuracy - 2.0 / 3.0).abs() < 1e-9);
    }
}
