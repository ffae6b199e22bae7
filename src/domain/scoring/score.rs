//! Dimension scores, the twelve-slot score vector, and its aggregates.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::dimension::{Dimension, DimensionGroup};
use crate::domain::foundation::ValidationError;

/// A single dimension score, always within 0..=3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub struct DimensionScore(u8);

impl DimensionScore {
    pub const MIN: Self = Self(0);
    pub const MAX: Self = Self(3);

    /// Creates a score, clamping to the valid range.
    pub fn new(value: u8) -> Self {
        Self(value.min(Self::MAX.0))
    }

    /// Clamps an arbitrary intermediate value into the valid range.
    pub fn clamped(value: i64) -> Self {
        Self(value.clamp(0, i64::from(Self::MAX.0)) as u8)
    }

    /// Creates a score, returning error if out of range.
    pub fn try_new(value: u8) -> Result<Self, ValidationError> {
        if value > Self::MAX.0 {
            return Err(ValidationError::out_of_range("dimension_score", 0, 3, value as i32));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl From<u8> for DimensionScore {
    fn from(value: u8) -> Self {
        Self::new(value)
    }
}

impl From<DimensionScore> for u8 {
    fn from(score: DimensionScore) -> Self {
        score.0
    }
}

impl fmt::Display for DimensionScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Scores for all twelve dimensions of one user or conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ScoreVector {
    pub p1: DimensionScore,
    pub p2: DimensionScore,
    pub p3: DimensionScore,
    pub p4: DimensionScore,
    pub m1: DimensionScore,
    pub m2: DimensionScore,
    pub m3: DimensionScore,
    pub e1: DimensionScore,
    pub e2: DimensionScore,
    pub e3: DimensionScore,
    pub r1: DimensionScore,
    pub r2: DimensionScore,
}

/// Derived totals of a [`ScoreVector`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreAggregate {
    pub total: u32,
    pub p_avg: f64,
    pub m_avg: f64,
    pub e_avg: f64,
    pub r_avg: f64,
}

impl ScoreVector {
    /// The all-zero vector produced for users with no human messages.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Builds a vector from values in canonical P/M/E/R order, clamping each.
    pub fn from_values(values: [u8; 12]) -> Self {
        let mut vector = Self::zero();
        for (dim, value) in Dimension::ALL.iter().zip(values) {
            vector.set(*dim, DimensionScore::new(value));
        }
        vector
    }

    /// Values in canonical P/M/E/R order; the feature-vector layout
    /// consumed by learned models.
    pub fn values(&self) -> [u8; 12] {
        let mut out = [0u8; 12];
        for dim in Dimension::ALL {
            out[dim.index()] = self.get(dim).value();
        }
        out
    }

    pub fn get(&self, dimension: Dimension) -> DimensionScore {
        match dimension {
            Dimension::P1 => self.p1,
            Dimension::P2 => self.p2,
            Dimension::P3 => self.p3,
            Dimension::P4 => self.p4,
            Dimension::M1 => self.m1,
            Dimension::M2 => self.m2,
            Dimension::M3 => self.m3,
            Dimension::E1 => self.e1,
            Dimension::E2 => self.e2,
            Dimension::E3 => self.e3,
            Dimension::R1 => self.r1,
            Dimension::R2 => self.r2,
        }
    }

    pub fn set(&mut self, dimension: Dimension, score: DimensionScore) {
        let slot = match dimension {
            Dimension::P1 => &mut self.p1,
            Dimension::P2 => &mut self.p2,
            Dimension::P3 => &mut self.p3,
            Dimension::P4 => &mut self.p4,
            Dimension::M1 => &mut self.m1,
            Dimension::M2 => &mut self.m2,
            Dimension::M3 => &mut self.m3,
            Dimension::E1 => &mut self.e1,
            Dimension::E2 => &mut self.e2,
            Dimension::E3 => &mut self.e3,
            Dimension::R1 => &mut self.r1,
            Dimension::R2 => &mut self.r2,
        };
        *slot = score;
    }

    /// Iterates `(dimension, score)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Dimension, DimensionScore)> + '_ {
        Dimension::ALL.iter().map(move |d| (*d, self.get(*d)))
    }

    /// Sum of all twelve scores, 0..=36.
    pub fn total(&self) -> u32 {
        self.iter().map(|(_, s)| u32::from(s.value())).sum()
    }

    /// Arithmetic mean of one group's scores.
    pub fn group_average(&self, group: DimensionGroup) -> f64 {
        let sum: u32 = group
            .dimensions()
            .iter()
            .map(|d| u32::from(self.get(*d).value()))
            .sum();
        f64::from(sum) / group.size() as f64
    }

    pub fn p_avg(&self) -> f64 {
        self.group_average(DimensionGroup::Planning)
    }

    pub fn m_avg(&self) -> f64 {
        self.group_average(DimensionGroup::Monitoring)
    }

    pub fn e_avg(&self) -> f64 {
        self.group_average(DimensionGroup::Evaluation)
    }

    pub fn r_avg(&self) -> f64 {
        self.group_average(DimensionGroup::Regulation)
    }

    /// Total and the four group averages in one value.
    pub fn aggregate(&self) -> ScoreAggregate {
        ScoreAggregate {
            total: self.total(),
            p_avg: self.p_avg(),
            m_avg: self.m_avg(),
            e_avg: self.e_avg(),
            r_avg: self.r_avg(),
        }
    }

    /// Per-dimension mean of several vectors, rounded half to even.
    ///
    /// An empty slice yields the zero vector.
    pub fn rounded_mean(vectors: &[ScoreVector]) -> ScoreVector {
        if vectors.is_empty() {
            return ScoreVector::zero();
        }
        let n = vectors.len() as f64;
        let mut mean = ScoreVector::zero();
        for dim in Dimension::ALL {
            let sum: f64 = vectors.iter().map(|v| f64::from(v.get(dim).value())).sum();
            let rounded = (sum / n).round_ties_even();
            mean.set(dim, DimensionScore::clamped(rounded as i64));
        }
        mean
    }
}
