//! Labels attached to rows inside transform outputs.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::field::Field;

/// Name of the label column appended by the comparison transforms.
pub const GROUP_COLUMN: &str = "group";

/// Which collection a row came from.
///
/// Records never carry this themselves; transforms attach it when they
/// combine the two collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupLabel {
    Case,
    Control,
}

impl GroupLabel {
    /// Case rows always precede control rows in combined outputs.
    pub const ORDERED: [GroupLabel; 2] = [GroupLabel::Case, GroupLabel::Control];

    pub fn as_str(self) -> &'static str {
        match self {
            GroupLabel::Case => "case",
            GroupLabel::Control => "control",
        }
    }

    /// Outcome term used for the cross-tabulation count columns.
    pub fn outcome(self) -> &'static str {
        match self {
            GroupLabel::Case => "Dead",
            GroupLabel::Control => "Alive",
        }
    }
}

impl fmt::Display for GroupLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pregnancy period of a repeated cigarette-count measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trimester {
    First,
    Second,
    Third,
}

impl Trimester {
    pub const ALL: [Trimester; 3] = [Trimester::First, Trimester::Second, Trimester::Third];

    pub fn as_str(self) -> &'static str {
        match self {
            Trimester::First => "first",
            Trimester::Second => "second",
            Trimester::Third => "third",
        }
    }

    /// Record field holding this trimester's count.
    pub fn field(self) -> Field {
        match self {
            Trimester::First => Field::CigarettesFirstTrimester,
            Trimester::Second => Field::CigarettesSecondTrimester,
            Trimester::Third => Field::CigarettesThirdTrimester,
        }
    }
}

impl fmt::Display for Trimester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
