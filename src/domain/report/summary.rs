//! Batch-level statistics over pattern records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::record::PatternRecord;
use crate::domain::classification::Pattern;
use crate::domain::scoring::Dimension;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatternShare {
    pub count: usize,
    /// 0..=100
    pub percentage: f64,
}

/// Distribution and means of one scoring run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub generated_at: DateTime<Utc>,
    pub entity_count: usize,
    /// Every pattern letter is present, zero counts included.
    pub distribution: BTreeMap<Pattern, PatternShare>,
    pub dimension_means: BTreeMap<Dimension, f64>,
    pub mean_total: f64,
    /// Fraction (0..=1) of entities classified as a critical pattern.
    pub critical_share: f64,
}

impl BatchSummary {
    pub fn from_records(records: &[PatternRecord]) -> Self {
        Self::from_records_at(records, Utc::now())
    }

    pub fn from_records_at(records: &[PatternRecord], generated_at: DateTime<Utc>) -> Self {
        let n = records.len();

        let mut counts = [0usize; 6];
        for record in records {
            counts[record.pattern.index()] += 1;
        }
        let distribution = Pattern::ALL
            .iter()
            .map(|p| {
                let count = counts[p.index()];
                (
                    *p,
                    PatternShare {
                        count,
                        percentage: fraction(count as f64, n) * 100.0,
                    },
                )
            })
            .collect();

        let dimension_means = Dimension::ALL
            .iter()
            .map(|d| {
                let sum: f64 = records
                    .iter()
                    .map(|r| f64::from(r.scores.get(*d).value()))
                    .sum();
                (*d, fraction(sum, n))
            })
            .collect();

        let total_sum: f64 = records.iter().map(|r| f64::from(r.total_score)).sum();
        let critical = records.iter().filter(|r| r.is_critical()).count();

        Self {
            generated_at,
            entity_count: n,
            distribution,
            dimension_means,
            mean_total: fraction(total_sum, n),
            critical_share: fraction(critical as f64, n),
        }
    }

    pub fn count(&self, pattern: Pattern) -> usize {
        self.distribution.get(&pattern).map_or(0, |s| s.count)
    }

    /// The most frequent pattern; ties go to the earlier letter.
    pub fn dominant_pattern(&self) -> Option<Pattern> {
        if self.entity_count == 0 {
            return None;
        }
        Pattern::ALL
            .iter()
            .copied()
            .rev()
            .max_by_key(|p| self.count(*p))
    }
}

fn fraction(numerator: f64, n: usize) -> f64 {
    if n == 0 {
        0.0
    } else {
        numerator / n as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::classification::Classification;
    use crate::domain::scoring::ScoreVector;

    fn record(id: &str, values: [u8; 12], pattern: Pattern, confidence: f64) -> PatternRecord {
        PatternRecord::new(
            id,
            ScoreVector::from_values(values),
            Classification::new(pattern, confidence),
        )
    }

    #[test]
    fn empty_batch_has_zeroed_summary() {
        let summary = BatchSummary::from_records(&[]);
        assert_eq!(summary.entity_count, 0);
        assert_eq!(summary.distribution.len(), 6);
        assert!(summary.distribution.values().all(|s| s.count == 0 && s.percentage == 0.0));
        assert_eq!(summary.mean_total, 0.0);
        assert_eq!(summary.critical_share, 0.0);
        assert_eq!(summary.dominant_pattern(), None);
    }

    #[test]
    fn distribution_and_means() {
        let records = vec![
            record("a", [0; 12], Pattern::F, 0.9),
            record("b", [2; 12], Pattern::B, 0.8),
            record("c", [1; 12], Pattern::F, 0.9),
            record("d", [3; 12], Pattern::A, 0.85),
        ];
        let summary = BatchSummary::from_records(&records);

        assert_eq!(summary.entity_count, 4);
        assert_eq!(summary.count(Pattern::F), 2);
        assert_eq!(summary.distribution[&Pattern::F].percentage, 50.0);
        assert_eq!(summary.distribution[&Pattern::D].count, 0);
        assert_eq!(summary.dimension_means[&Dimension::E2], 1.5);
        assert_eq!(summary.mean_total, 18.0);
        assert_eq!(summary.critical_share, 0.5);
        assert_eq!(summary.dominant_pattern(), Some(Pattern::F));
    }

    #[test]
    fn dominant_pattern_ties_prefer_earlier_letter() {
        let records = vec![
            record("a", [2; 12], Pattern::C, 0.7),
            record("b", [2; 12], Pattern::B, 0.8),
        ];
        let summary = BatchSummary::from_records(&records);
        assert_eq!(summary.dominant_pattern(), Some(Pattern::B));
    }

    #[test]
    fn summary_serializes_with_letter_and_code_keys() {
        let summary = BatchSummary::from_records(&[record("a", [0; 12], Pattern::F, 0.9)]);
        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["distribution"]["F"]["count"], 1);
        assert_eq!(value["dimension_means"]["P1"], 0.0);
    }
}
