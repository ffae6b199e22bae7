//! The per-entity output record.

use serde::{Deserialize, Serialize};

use crate::domain::classification::{Classification, Pattern};
use crate::domain::scoring::ScoreVector;

/// One scored and classified user or conversation.
///
/// Serializes flat as
/// `{id, pattern, confidence, p1..r2, total_score}`; the twelve integers are
/// the feature vector read by learned pattern models.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternRecord {
    pub id: String,
    pub pattern: Pattern,
    pub confidence: f64,
    #[serde(flatten)]
    pub scores: ScoreVector,
    pub total_score: u32,
}

impl PatternRecord {
    pub fn new(id: impl Into<String>, scores: ScoreVector, classification: Classification) -> Self {
        Self {
            id: id.into(),
            pattern: classification.pattern,
            confidence: classification.confidence,
            total_score: scores.total(),
            scores,
        }
    }

    pub fn classification(&self) -> Classification {
        Classification::new(self.pattern, self.confidence)
    }

    pub fn is_critical(&self) -> bool {
        self.pattern.is_critical()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn record_serializes_flat() {
        let scores = ScoreVector::from_values([1, 2, 3, 0, 1, 1, 1, 2, 2, 2, 0, 1]);
        let record = PatternRecord::new("u1", scores, Classification::new(Pattern::C, 0.7));
        let value: Value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "u1",
                "pattern": "C",
                "confidence": 0.7,
                "p1": 1, "p2": 2, "p3": 3, "p4": 0,
                "m1": 1, "m2": 1, "m3": 1,
                "e1": 2, "e2": 2, "e3": 2,
                "r1": 0, "r2": 1,
                "total_score": 16
            })
        );
    }

    #[test]
    fn record_reads_back_from_json_line() {
        let line = r#"{"id":"u9","pattern":"F","confidence":0.9,"p1":0,"p2":0,"p3":0,"p4":0,"m1":0,"m2":0,"m3":0,"e1":0,"e2":0,"e3":0,"r1":0,"r2":0,"total_score":0}"#;
        let record: PatternRecord = serde_json::from_str(line).unwrap();
        assert_eq!(record.scores, ScoreVector::zero());
        assert!(record.is_critical());
    }
}
