//! Scoring rubric configuration.
//!
//! A rubric is plain data: for each dimension a set of named cue tables
//! (keywords or regular expressions) and an ordered threshold ladder. It can
//! be written in Rust (see [`Rubric::aligned`]) or loaded from YAML, and is
//! compiled into a [`RubricScorer`](super::RubricScorer) before use.
//!
//! # Ladder semantics
//!
//! Rungs are evaluated top-down and the first rung whose condition holds
//! supplies the score. If no rung holds the score is 0. Rungs are never
//! re-ordered, so the written order is the tie-breaking order.

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::dimension::Dimension;
use super::errors::RubricError;

/// How cue tables are matched against a user's messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringMode {
    /// Each message is matched separately; a cue counts (message, term) hits.
    #[default]
    PerMessage,
    /// Messages are lower-cased and joined with a space; a cue counts the
    /// distinct terms found anywhere in the joined text.
    Concatenated,
}

/// Whether a cue table holds literal phrases or regular expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CueKind {
    /// Case-insensitive substring containment.
    Keywords,
    /// Regular expressions; case sensitivity per [`CueSet::case_insensitive`].
    Patterns,
}

/// A named table of keywords or patterns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CueSet {
    pub name: String,
    pub kind: CueKind,
    /// Only meaningful for patterns; keywords always ignore case.
    #[serde(default)]
    pub case_insensitive: bool,
    pub terms: Vec<String>,
}

impl CueSet {
    pub fn keywords(name: impl Into<String>, terms: &[&str]) -> Self {
        Self {
            name: name.into(),
            kind: CueKind::Keywords,
            case_insensitive: true,
            terms: terms.iter().map(|t| t.to_string()).collect(),
        }
    }

    /// A case-sensitive pattern table.
    pub fn patterns(name: impl Into<String>, terms: &[&str]) -> Self {
        Self {
            name: name.into(),
            kind: CueKind::Patterns,
            case_insensitive: false,
            terms: terms.iter().map(|t| t.to_string()).collect(),
        }
    }

    pub fn ignoring_case(mut self) -> Self {
        self.case_insensitive = true;
        self
    }
}

/// A numeric feature a ladder condition can test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    /// Hit count of one cue table.
    Cue(String),
    /// Sum of several cue tables' hit counts.
    CueSum(Vec<String>),
    /// Number of human messages.
    MessageCount,
    /// Mean characters per human message.
    AverageLength,
    /// Characters in the longest human message.
    LongestMessage,
}

impl Signal {
    pub fn cue(name: impl Into<String>) -> Self {
        Self::Cue(name.into())
    }

    pub fn cue_sum(names: &[&str]) -> Self {
        Self::CueSum(names.iter().map(|n| n.to_string()).collect())
    }

    /// Cue names this signal depends on.
    pub fn cue_names(&self) -> Vec<&str> {
        match self {
            Self::Cue(name) => vec![name.as_str()],
            Self::CueSum(names) => names.iter().map(String::as_str).collect(),
            Self::MessageCount | Self::AverageLength | Self::LongestMessage => Vec::new(),
        }
    }
}

/// A predicate over signals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    Always,
    Gt { signal: Signal, value: f64 },
    Ge { signal: Signal, value: f64 },
    All(Vec<Condition>),
    Any(Vec<Condition>),
}

impl Condition {
    pub fn gt(signal: Signal, value: f64) -> Self {
        Self::Gt { signal, value }
    }

    pub fn ge(signal: Signal, value: f64) -> Self {
        Self::Ge { signal, value }
    }

    /// `cue > value`, the most common rung shape.
    pub fn cue_gt(name: &str, value: f64) -> Self {
        Self::gt(Signal::cue(name), value)
    }

    pub fn all(conditions: Vec<Condition>) -> Self {
        Self::All(conditions)
    }

    pub fn any(conditions: Vec<Condition>) -> Self {
        Self::Any(conditions)
    }

    /// Every signal referenced by this condition, depth first.
    pub fn signals(&self) -> Vec<&Signal> {
        match self {
            Self::Always => Vec::new(),
            Self::Gt { signal, .. } | Self::Ge { signal, .. } => vec![signal],
            Self::All(children) | Self::Any(children) => {
                children.iter().flat_map(|c| c.signals()).collect()
            }
        }
    }
}

/// One step of a threshold ladder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rung {
    pub score: u8,
    pub when: Condition,
}

impl Rung {
    pub fn new(score: u8, when: Condition) -> Self {
        Self { score, when }
    }
}

/// Cue tables and ladder for a single dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionRubric {
    pub dimension: Dimension,
    #[serde(default)]
    pub mode: ScoringMode,
    pub cues: Vec<CueSet>,
    pub ladder: Vec<Rung>,
}

impl DimensionRubric {
    pub fn new(dimension: Dimension, cues: Vec<CueSet>, ladder: Vec<Rung>) -> Self {
        Self {
            dimension,
            mode: ScoringMode::default(),
            cues,
            ladder,
        }
    }

    pub fn with_mode(mut self, mode: ScoringMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn cue(&self, name: &str) -> Option<&CueSet> {
        self.cues.iter().find(|c| c.name == name)
    }
}

/// The full twelve-dimension rubric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rubric {
    pub dimensions: Vec<DimensionRubric>,
}

impl Rubric {
    pub fn new(dimensions: Vec<DimensionRubric>) -> Self {
        Self { dimensions }
    }

    /// Parses a rubric from YAML text.
    ///
    /// Enum values are written as single-key maps (`gt: {signal: {cue: x}}`)
    /// rather than YAML `!tags`.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, RubricError> {
        let de = serde_yaml::Deserializer::from_str(yaml);
        Ok(serde_yaml::with::singleton_map_recursive::deserialize(de)?)
    }

    /// Reads and parses a rubric YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, RubricError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    pub fn to_yaml(&self) -> Result<String, RubricError> {
        let mut buf = Vec::new();
        let mut ser = serde_yaml::Serializer::new(&mut buf);
        serde_yaml::with::singleton_map_recursive::serialize(self, &mut ser)?;
        String::from_utf8(buf)
            .map_err(|e| RubricError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
    }

    pub fn get(&self, dimension: Dimension) -> Option<&DimensionRubric> {
        self.dimensions.iter().find(|d| d.dimension == dimension)
    }

    /// Replaces (or adds) the table for one dimension.
    pub fn with_dimension(mut self, table: DimensionRubric) -> Self {
        match self.dimensions.iter_mut().find(|d| d.dimension == table.dimension) {
            Some(slot) => *slot = table,
            None => self.dimensions.push(table),
        }
        self
    }

    /// Sets the scoring mode of every dimension.
    pub fn with_mode(mut self, mode: ScoringMode) -> Self {
        for table in &mut self.dimensions {
            table.mode = mode;
        }
        self
    }
}
