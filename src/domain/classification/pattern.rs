//! Usage-pattern archetypes and classification results.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Behavioural archetype assigned from a score vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Pattern {
    /// Strategic Decomposition
    A,
    /// Iterative Refinement
    B,
    /// Moderate Balanced
    C,
    /// Critical Evaluation
    D,
    /// Pedagogical Reflection
    E,
    /// Passive Over-Reliance
    F,
}

impl Pattern {
    pub const ALL: [Pattern; 6] = [
        Pattern::A,
        Pattern::B,
        Pattern::C,
        Pattern::D,
        Pattern::E,
        Pattern::F,
    ];

    /// Position in [`Pattern::ALL`].
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn letter(&self) -> char {
        match self {
            Self::A => 'A',
            Self::B => 'B',
            Self::C => 'C',
            Self::D => 'D',
            Self::E => 'E',
            Self::F => 'F',
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::A => "Strategic Decomposition",
            Self::B => "Iterative Refinement",
            Self::C => "Moderate Balanced",
            Self::D => "Critical Evaluation",
            Self::E => "Pedagogical Reflection",
            Self::F => "Passive Over-Reliance",
        }
    }

    /// Only passive over-reliance is treated as high risk.
    pub fn is_critical(&self) -> bool {
        matches!(self, Self::F)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl FromStr for Pattern {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "A" | "a" => Ok(Self::A),
            "B" | "b" => Ok(Self::B),
            "C" | "c" => Ok(Self::C),
            "D" | "d" => Ok(Self::D),
            "E" | "e" => Ok(Self::E),
            "F" | "f" => Ok(Self::F),
            other => Err(ValidationError::invalid_format(
                "pattern",
                format!("expected A-F, got '{}'", other),
            )),
        }
    }
}

/// A pattern together with the model's confidence in it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub pattern: Pattern,
    /// Always within (0, 1].
    pub confidence: f64,
}

impl Classification {
    pub fn new(pattern: Pattern, confidence: f64) -> Self {
        Self {
            pattern,
            confidence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_f_is_critical() {
        let critical: Vec<Pattern> = Pattern::ALL.iter().copied().filter(Pattern::is_critical).collect();
        assert_eq!(critical, vec![Pattern::F]);
    }

    #[test]
    fn parses_letters() {
        assert_eq!("D".parse::<Pattern>().unwrap(), Pattern::D);
        assert_eq!(" f ".parse::<Pattern>().unwrap(), Pattern::F);
        assert!("G".parse::<Pattern>().is_err());
    }

    #[test]
    fn serializes_as_letter() {
        assert_eq!(serde_json::to_string(&Pattern::B).unwrap(), "\"B\"");
        assert_eq!(Pattern::E.to_string(), "E");
    }

    #[test]
    fn names_are_human_readable() {
        assert_eq!(Pattern::F.name(), "Passive Over-Reliance");
        assert_eq!(Pattern::A.name(), "Strategic Decomposition");
    }
}
