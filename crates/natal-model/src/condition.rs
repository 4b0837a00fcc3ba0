//! Categorical birth-condition fields and their code translations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;
use crate::field::Field;

/// A categorical field available for cross-tabulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    DeliveryMethod,
    AssistedVent,
    AssistedAntibiotics,
}

impl Condition {
    pub const ALL: [Condition; 3] = [
        Condition::DeliveryMethod,
        Condition::AssistedVent,
        Condition::AssistedAntibiotics,
    ];

    pub fn field(self) -> Field {
        match self {
            Condition::DeliveryMethod => Field::DeliveryMethod,
            Condition::AssistedVent => Field::AssistedVentilation,
            Condition::AssistedAntibiotics => Field::AssistedAntibiotics,
        }
    }

    pub fn name(self) -> &'static str {
        self.field().name()
    }

    /// Display label used as the output column name.
    pub fn label(self) -> &'static str {
        match self {
            Condition::DeliveryMethod => "Delivery method",
            Condition::AssistedVent => "Assisted by ven",
            Condition::AssistedAntibiotics => "Assisted by antibiotics",
        }
    }

    /// Translates a raw code into its display term.
    ///
    /// Delivery method codes are numeric (`1`, `2`, `9`); the assistance
    /// flags are letters (`Y`, `N`, `U`). Returns `None` for codes outside
    /// the table.
    pub fn translate(self, raw: &str) -> Option<&'static str> {
        match self {
            Condition::DeliveryMethod => match raw.trim() {
                "1" => Some("Natural"),
                "2" => Some("Cesarean"),
                "9" => Some("Unknown"),
                _ => None,
            },
            Condition::AssistedVent | Condition::AssistedAntibiotics => match raw.trim() {
                "N" => Some("No"),
                "Y" => Some("Yes"),
                "U" => Some("Unknown"),
                _ => None,
            },
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Condition {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Condition::ALL
            .into_iter()
            .find(|condition| condition.name() == trimmed)
            .ok_or_else(|| ModelError::UnknownField {
                name: s.to_string(),
            })
    }
}
