//! Compiled rubric and the dimension scoring engine.
//!
//! Compilation resolves cue names to indices and builds every regex once, so
//! scoring is a total function: it never fails and never allocates regexes.

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use std::collections::HashMap;

use super::dimension::Dimension;
use super::errors::RubricError;
use super::rubric::{Condition, CueKind, CueSet, DimensionRubric, Rubric, ScoringMode, Signal};
use super::score::{DimensionScore, ScoreVector};

static ALIGNED: Lazy<RubricScorer> = Lazy::new(|| {
    RubricScorer::compile(&Rubric::aligned()).expect("built-in aligned rubric must compile")
});

#[derive(Debug, Clone)]
enum Matcher {
    /// Lower-cased literal terms.
    Keywords(Vec<String>),
    Patterns(Vec<Regex>),
}

impl Matcher {
    fn compile(dimension: Dimension, cue: &CueSet) -> Result<Self, RubricError> {
        if cue.terms.iter().any(|t| t.is_empty()) {
            return Err(RubricError::EmptyTerm {
                dimension,
                cue: cue.name.clone(),
            });
        }
        match cue.kind {
            CueKind::Keywords => Ok(Self::Keywords(
                cue.terms.iter().map(|t| t.to_lowercase()).collect(),
            )),
            CueKind::Patterns => cue
                .terms
                .iter()
                .map(|pattern| {
                    RegexBuilder::new(pattern)
                        .case_insensitive(cue.case_insensitive)
                        .build()
                        .map_err(|e| RubricError::InvalidPattern {
                            dimension,
                            cue: cue.name.clone(),
                            pattern: pattern.clone(),
                            reason: e.to_string(),
                        })
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Self::Patterns),
        }
    }

    /// Sum over messages of the number of terms each message contains.
    fn count_per_message(&self, texts: &[&str], lowered: &[String]) -> usize {
        match self {
            Self::Keywords(terms) => lowered
                .iter()
                .map(|m| terms.iter().filter(|t| m.contains(t.as_str())).count())
                .sum(),
            Self::Patterns(regexes) => texts
                .iter()
                .map(|m| regexes.iter().filter(|re| re.is_match(m)).count())
                .sum(),
        }
    }

    /// Number of distinct terms found in the joined text.
    fn count_in_blob(&self, blob: &str) -> usize {
        match self {
            Self::Keywords(terms) => terms.iter().filter(|t| blob.contains(t.as_str())).count(),
            Self::Patterns(regexes) => regexes.iter().filter(|re| re.is_match(blob)).count(),
        }
    }
}

#[derive(Debug, Clone)]
enum CompiledSignal {
    Cues(Vec<usize>),
    MessageCount,
    AverageLength,
    LongestMessage,
}

#[derive(Debug, Clone)]
enum CompiledCondition {
    Always,
    Gt(CompiledSignal, f64),
    Ge(CompiledSignal, f64),
    All(Vec<CompiledCondition>),
    Any(Vec<CompiledCondition>),
}

/// Numeric features of one message list, as seen by one dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct Features {
    /// Hit counts, in the order of the dimension's cue tables.
    pub cue_counts: Vec<usize>,
    pub message_count: usize,
    pub average_length: f64,
    pub longest_message: usize,
}

impl CompiledSignal {
    fn value(&self, features: &Features) -> f64 {
        match self {
            Self::Cues(indices) => indices.iter().map(|i| features.cue_counts[*i]).sum::<usize>() as f64,
            Self::MessageCount => features.message_count as f64,
            Self::AverageLength => features.average_length,
            Self::LongestMessage => features.longest_message as f64,
        }
    }
}

impl CompiledCondition {
    fn holds(&self, features: &Features) -> bool {
        match self {
            Self::Always => true,
            Self::Gt(signal, value) => signal.value(features) > *value,
            Self::Ge(signal, value) => signal.value(features) >= *value,
            Self::All(children) => children.iter().all(|c| c.holds(features)),
            Self::Any(children) => children.iter().any(|c| c.holds(features)),
        }
    }
}

/// Scores a single dimension from a list of human messages.
#[derive(Debug, Clone)]
pub struct DimensionScorer {
    dimension: Dimension,
    mode: ScoringMode,
    cue_names: Vec<String>,
    matchers: Vec<Matcher>,
    ladder: Vec<(DimensionScore, CompiledCondition)>,
}

impl DimensionScorer {
    /// Compiles one dimension's table.
    pub fn compile(table: &DimensionRubric) -> Result<Self, RubricError> {
        let dimension = table.dimension;
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut matchers = Vec::with_capacity(table.cues.len());

        for (i, cue) in table.cues.iter().enumerate() {
            if index.insert(cue.name.as_str(), i).is_some() {
                return Err(RubricError::DuplicateCue {
                    dimension,
                    cue: cue.name.clone(),
                });
            }
            matchers.push(Matcher::compile(dimension, cue)?);
        }

        let resolve_signal = |signal: &Signal| -> Result<CompiledSignal, RubricError> {
            Ok(match signal {
                Signal::Cue(_) | Signal::CueSum(_) => CompiledSignal::Cues(
                    signal
                        .cue_names()
                        .into_iter()
                        .map(|name| {
                            index.get(name).copied().ok_or_else(|| RubricError::UnknownCue {
                                dimension,
                                cue: name.to_string(),
                            })
                        })
                        .collect::<Result<Vec<_>, _>>()?,
                ),
                Signal::MessageCount => CompiledSignal::MessageCount,
                Signal::AverageLength => CompiledSignal::AverageLength,
                Signal::LongestMessage => CompiledSignal::LongestMessage,
            })
        };

        fn resolve_condition(
            condition: &Condition,
            resolve_signal: &dyn Fn(&Signal) -> Result<CompiledSignal, RubricError>,
        ) -> Result<CompiledCondition, RubricError> {
            Ok(match condition {
                Condition::Always => CompiledCondition::Always,
                Condition::Gt { signal, value } => CompiledCondition::Gt(resolve_signal(signal)?, *value),
                Condition::Ge { signal, value } => CompiledCondition::Ge(resolve_signal(signal)?, *value),
                Condition::All(children) => CompiledCondition::All(
                    children
                        .iter()
                        .map(|c| resolve_condition(c, resolve_signal))
                        .collect::<Result<_, _>>()?,
                ),
                Condition::Any(children) => CompiledCondition::Any(
                    children
                        .iter()
                        .map(|c| resolve_condition(c, resolve_signal))
                        .collect::<Result<_, _>>()?,
                ),
            })
        }

        let mut ladder = Vec::with_capacity(table.ladder.len());
        for rung in &table.ladder {
            if rung.score > DimensionScore::MAX.value() {
                return Err(RubricError::ScoreOutOfRange {
                    dimension,
                    score: rung.score,
                });
            }
            ladder.push((
                DimensionScore::new(rung.score),
                resolve_condition(&rung.when, &resolve_signal)?,
            ));
        }

        Ok(Self {
            dimension,
            mode: table.mode,
            cue_names: table.cues.iter().map(|c| c.name.clone()).collect(),
            matchers,
            ladder,
        })
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    pub fn mode(&self) -> ScoringMode {
        self.mode
    }

    /// Cue table names, in the order used by [`Features::cue_counts`].
    pub fn cue_names(&self) -> &[String] {
        &self.cue_names
    }

    /// Computes cue counts and numeric features for a message list.
    pub fn features(&self, messages: &[&str]) -> Features {
        let message_count = messages.len();
        let lengths: Vec<usize> = messages.iter().map(|m| m.chars().count()).collect();
        let average_length = if message_count == 0 {
            0.0
        } else {
            lengths.iter().sum::<usize>() as f64 / message_count as f64
        };
        let longest_message = lengths.iter().copied().max().unwrap_or(0);

        let lowered: Vec<String> = messages.iter().map(|m| m.to_lowercase()).collect();
        let cue_counts = match self.mode {
            ScoringMode::PerMessage => self
                .matchers
                .iter()
                .map(|m| m.count_per_message(messages, &lowered))
                .collect(),
            ScoringMode::Concatenated => {
                let blob = lowered.join(" ");
                self.matchers.iter().map(|m| m.count_in_blob(&blob)).collect()
            }
        };

        Features {
            cue_counts,
            message_count,
            average_length,
            longest_message,
        }
    }

    /// Walks the ladder top-down over precomputed features.
    pub fn score_features(&self, features: &Features) -> DimensionScore {
        self.ladder
            .iter()
            .find(|(_, condition)| condition.holds(features))
            .map(|(score, _)| *score)
            .unwrap_or(DimensionScore::MIN)
    }

    /// Scores a message list. An empty list scores 0 without matching.
    pub fn score(&self, messages: &[&str]) -> DimensionScore {
        if messages.is_empty() {
            return DimensionScore::MIN;
        }
        self.score_features(&self.features(messages))
    }
}

/// All twelve compiled dimension scorers.
#[derive(Debug, Clone)]
pub struct RubricScorer {
    /// Indexed by [`Dimension::index`].
    scorers: Vec<DimensionScorer>,
}

impl RubricScorer {
    /// Compiles a rubric, requiring exactly one table per dimension.
    pub fn compile(rubric: &Rubric) -> Result<Self, RubricError> {
        let mut slots: Vec<Option<DimensionScorer>> = vec![None; Dimension::ALL.len()];
        for table in &rubric.dimensions {
            let slot = &mut slots[table.dimension.index()];
            if slot.is_some() {
                return Err(RubricError::DuplicateDimension(table.dimension));
            }
            *slot = Some(DimensionScorer::compile(table)?);
        }

        let scorers = Dimension::ALL
            .iter()
            .zip(slots)
            .map(|(dim, slot)| slot.ok_or(RubricError::MissingDimension(*dim)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { scorers })
    }

    /// Shared compiled instance of [`Rubric::aligned`].
    pub fn aligned() -> &'static RubricScorer {
        &ALIGNED
    }

    pub fn dimension(&self, dimension: Dimension) -> &DimensionScorer {
        &self.scorers[dimension.index()]
    }

    pub fn score_dimension(&self, dimension: Dimension, messages: &[&str]) -> DimensionScore {
        self.dimension(dimension).score(messages)
    }

    /// Scores all twelve dimensions.
    pub fn score(&self, messages: &[&str]) -> ScoreVector {
        let mut vector = ScoreVector::zero();
        if messages.is_empty() {
            return vector;
        }
        for scorer in &self.scorers {
            vector.set(scorer.dimension(), scorer.score(messages));
        }
        vector
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::scoring::rubric::{CueSet, Rung};

    fn tool_table(mode: ScoringMode) -> DimensionRubric {
        DimensionRubric::new(
            Dimension::R2,
            vec![
                CueSet::keywords("tools", &["google", "search"]),
                CueSet::patterns("switch", &[r"我.*google", r"claude|chatgpt"]).ignoring_case(),
            ],
            vec![
                Rung::new(3, Condition::cue_gt("switch", 1.0)),
                Rung::new(2, Condition::cue_gt("tools", 1.0)),
                Rung::new(1, Condition::cue_gt("tools", 0.0)),
            ],
        )
        .with_mode(mode)
    }

    #[test]
    fn empty_messages_score_zero() {
        let scorer = DimensionScorer::compile(&tool_table(ScoringMode::PerMessage)).unwrap();
        assert_eq!(scorer.score(&[]).value(), 0);
    }

    #[test]
    fn keywords_match_case_insensitively_per_message() {
        let scorer = DimensionScorer::compile(&tool_table(ScoringMode::PerMessage)).unwrap();
        let features = scorer.features(&["I used Google", "then GOOGLE again"]);
        assert_eq!(features.cue_counts[0], 2);
        assert_eq!(scorer.score(&["I used Google", "then GOOGLE again"]).value(), 2);
    }

    #[test]
    fn concatenated_mode_counts_distinct_terms() {
        let scorer = DimensionScorer::compile(&tool_table(ScoringMode::Concatenated)).unwrap();
        let features = scorer.features(&["google it", "google it again"]);
        assert_eq!(features.cue_counts[0], 1);
        assert_eq!(scorer.score(&["google it", "google it again"]).value(), 1);
    }

    #[test]
    fn concatenated_mode_matches_across_message_boundaries() {
        let per_message = DimensionScorer::compile(&tool_table(ScoringMode::PerMessage)).unwrap();
        let blob = DimensionScorer::compile(&tool_table(ScoringMode::Concatenated)).unwrap();
        let messages = ["我先问一下", "然后去 google"];
        assert_eq!(per_message.features(&messages).cue_counts[1], 0);
        assert_eq!(blob.features(&messages).cue_counts[1], 1);
    }

    #[test]
    fn first_matching_rung_wins() {
        let table = DimensionRubric::new(
            Dimension::E1,
            vec![CueSet::keywords("good", &["good"])],
            vec![
                Rung::new(1, Condition::cue_gt("good", 0.0)),
                Rung::new(3, Condition::cue_gt("good", 0.0)),
            ],
        );
        let scorer = DimensionScorer::compile(&table).unwrap();
        assert_eq!(scorer.score(&["good"]).value(), 1);
    }

    #[test]
    fn numeric_features_use_character_counts() {
        let scorer = DimensionScorer::compile(&tool_table(ScoringMode::PerMessage)).unwrap();
        let features = scorer.features(&["你好", "abcd"]);
        assert_eq!(features.message_count, 2);
        assert!((features.average_length - 3.0).abs() < f64::EPSILON);
        assert_eq!(features.longest_message, 4);
    }

    #[test]
    fn ge_and_longest_message_signals_evaluate() {
        let table = DimensionRubric::new(
            Dimension::P1,
            vec![],
            vec![
                Rung::new(3, Condition::gt(Signal::LongestMessage, 100.0)),
                Rung::new(2, Condition::ge(Signal::MessageCount, 2.0)),
                Rung::new(1, Condition::Always),
            ],
        );
        let scorer = DimensionScorer::compile(&table).unwrap();
        let long = "x".repeat(101);
        assert_eq!(scorer.score(&[long.as_str()]).value(), 3);
        assert_eq!(scorer.score(&["a", "b"]).value(), 2);
        assert_eq!(scorer.score(&["a"]).value(), 1);
    }

    #[test]
    fn cue_sum_adds_tables() {
        let table = DimensionRubric::new(
            Dimension::M3,
            vec![
                CueSet::keywords("a", &["trust"]),
                CueSet::keywords("b", &["doubt"]),
            ],
            vec![Rung::new(2, Condition::gt(Signal::cue_sum(&["a", "b"]), 1.0))],
        );
        let scorer = DimensionScorer::compile(&table).unwrap();
        assert_eq!(scorer.score(&["trust", "doubt"]).value(), 2);
        assert_eq!(scorer.score(&["trust"]).value(), 0);
    }

    #[test]
    fn unknown_cue_is_rejected_at_compile_time() {
        let table = DimensionRubric::new(
            Dimension::E2,
            vec![],
            vec![Rung::new(1, Condition::cue_gt("risk", 0.0))],
        );
        let err = DimensionScorer::compile(&table).unwrap_err();
        assert!(matches!(err, RubricError::UnknownCue { dimension: Dimension::E2, .. }));
    }

    #[test]
    fn invalid_regex_is_rejected_at_compile_time() {
        let table = DimensionRubric::new(
            Dimension::E2,
            vec![CueSet::patterns("bad", &["(unclosed"])],
            vec![],
        );
        assert!(matches!(
            DimensionScorer::compile(&table),
            Err(RubricError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn empty_term_and_duplicate_cue_are_rejected() {
        let empty = DimensionRubric::new(Dimension::E2, vec![CueSet::keywords("k", &[""])], vec![]);
        assert!(matches!(DimensionScorer::compile(&empty), Err(RubricError::EmptyTerm { .. })));

        let dup = DimensionRubric::new(
            Dimension::E2,
            vec![CueSet::keywords("k", &["a"]), CueSet::keywords("k", &["b"])],
            vec![],
        );
        assert!(matches!(DimensionScorer::compile(&dup), Err(RubricError::DuplicateCue { .. })));
    }

    #[test]
    fn ladder_score_above_three_is_rejected() {
        let table = DimensionRubric::new(Dimension::E2, vec![], vec![Rung::new(4, Condition::Always)]);
        assert!(matches!(
            DimensionScorer::compile(&table),
            Err(RubricError::ScoreOutOfRange { score: 4, .. })
        ));
    }

    #[test]
    fn rubric_requires_every_dimension_once() {
        let partial = Rubric::new(vec![tool_table(ScoringMode::PerMessage)]);
        assert!(matches!(
            RubricScorer::compile(&partial),
            Err(RubricError::MissingDimension(Dimension::P1))
        ));

        let replaced = Rubric::aligned().with_dimension(tool_table(ScoringMode::PerMessage));
        assert!(RubricScorer::compile(&replaced).is_ok());

        let mut dup = Rubric::aligned();
        dup.dimensions.push(tool_table(ScoringMode::PerMessage));
        assert!(matches!(
            RubricScorer::compile(&dup),
            Err(RubricError::DuplicateDimension(Dimension::R2))
        ));
    }

    #[test]
    fn substitute_table_changes_only_its_dimension() {
        let rubric = Rubric::aligned().with_dimension(tool_table(ScoringMode::PerMessage));
        let scorer = RubricScorer::compile(&rubric).unwrap();
        let messages = ["google", "search"];
        assert_eq!(scorer.score_dimension(Dimension::R2, &messages).value(), 2);
        assert_eq!(
            scorer.score_dimension(Dimension::E2, &messages),
            RubricScorer::aligned().score_dimension(Dimension::E2, &messages)
        );
    }
}
