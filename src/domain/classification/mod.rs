//! Classification module - Maps score vectors to usage patterns A-F.
//!
//! # Components
//!
//! - `Pattern` / `Classification` - Archetype letters and model output
//! - `RuleClassifier` - Priority-ordered decision list, configurable via `ClassifierRules`
//! - `EvaluationReport` - Accuracy, per-class metrics and confusion matrix

mod evaluation;
mod pattern;
mod rules;

pub use evaluation::{ClassMetrics, ConfusionMatrix, EvaluationReport};
pub use pattern::{Classification, Pattern};
pub use rules::{ClassifierRules, PassiveGate, RuleClassifier};
