//! The twelve metacognitive dimensions and their four groups.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Behaviour group a dimension belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DimensionGroup {
    Planning,
    Monitoring,
    Evaluation,
    Regulation,
}

impl DimensionGroup {
    pub const ALL: [DimensionGroup; 4] = [
        DimensionGroup::Planning,
        DimensionGroup::Monitoring,
        DimensionGroup::Evaluation,
        DimensionGroup::Regulation,
    ];

    /// Dimensions in this group, in canonical order.
    pub fn dimensions(&self) -> &'static [Dimension] {
        match self {
            Self::Planning => &Dimension::ALL[0..4],
            Self::Monitoring => &Dimension::ALL[4..7],
            Self::Evaluation => &Dimension::ALL[7..10],
            Self::Regulation => &Dimension::ALL[10..12],
        }
    }

    /// Number of dimensions in the group (4, 3, 3, 2). Never zero.
    pub fn size(&self) -> usize {
        self.dimensions().len()
    }
}

impl fmt::Display for DimensionGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Planning => write!(f, "Planning"),
            Self::Monitoring => write!(f, "Monitoring"),
            Self::Evaluation => write!(f, "Evaluation"),
            Self::Regulation => write!(f, "Regulation"),
        }
    }
}

/// One of the twelve scored dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Dimension {
    #[serde(rename = "P1", alias = "p1")]
    P1,
    #[serde(rename = "P2", alias = "p2")]
    P2,
    #[serde(rename = "P3", alias = "p3")]
    P3,
    #[serde(rename = "P4", alias = "p4")]
    P4,
    #[serde(rename = "M1", alias = "m1")]
    M1,
    #[serde(rename = "M2", alias = "m2")]
    M2,
    #[serde(rename = "M3", alias = "m3")]
    M3,
    #[serde(rename = "E1", alias = "e1")]
    E1,
    #[serde(rename = "E2", alias = "e2")]
    E2,
    #[serde(rename = "E3", alias = "e3")]
    E3,
    #[serde(rename = "R1", alias = "r1")]
    R1,
    #[serde(rename = "R2", alias = "r2")]
    R2,
}

impl Dimension {
    /// All dimensions, grouped P/M/E/R.
    pub const ALL: [Dimension; 12] = [
        Dimension::P1,
        Dimension::P2,
        Dimension::P3,
        Dimension::P4,
        Dimension::M1,
        Dimension::M2,
        Dimension::M3,
        Dimension::E1,
        Dimension::E2,
        Dimension::E3,
        Dimension::R1,
        Dimension::R2,
    ];

    /// Position in [`Dimension::ALL`].
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn group(&self) -> DimensionGroup {
        match self {
            Self::P1 | Self::P2 | Self::P3 | Self::P4 => DimensionGroup::Planning,
            Self::M1 | Self::M2 | Self::M3 => DimensionGroup::Monitoring,
            Self::E1 | Self::E2 | Self::E3 => DimensionGroup::Evaluation,
            Self::R1 | Self::R2 => DimensionGroup::Regulation,
        }
    }

    /// Upper-case code, e.g. `"P1"`.
    pub fn code(&self) -> &'static str {
        match self {
            Self::P1 => "P1",
            Self::P2 => "P2",
            Self::P3 => "P3",
            Self::P4 => "P4",
            Self::M1 => "M1",
            Self::M2 => "M2",
            Self::M3 => "M3",
            Self::E1 => "E1",
            Self::E2 => "E2",
            Self::E3 => "E3",
            Self::R1 => "R1",
            Self::R2 => "R2",
        }
    }

    /// Human-readable behaviour name.
    pub fn label(&self) -> &'static str {
        match self {
            Self::P1 => "Task Understanding",
            Self::P2 => "Goal Setting",
            Self::P3 => "Strategy Planning",
            Self::P4 => "Role Definition",
            Self::M1 => "Process Tracking",
            Self::M2 => "Quality Checking",
            Self::M3 => "Trust Calibration",
            Self::E1 => "Quality Evaluation",
            Self::E2 => "Risk Assessment",
            Self::E3 => "Capability Judgment",
            Self::R1 => "Strategy Adjustment",
            Self::R2 => "Tool Switching",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Dimension {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Dimension::ALL
            .iter()
            .copied()
            .find(|d| d.code().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ValidationError::invalid_format("dimension", format!("unknown dimension '{}'", s)))
    }
}
