//! Permitted features for the univariate and pairwise comparisons.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;
use crate::field::Field;

/// A record field that may be plotted as a distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    BirthMonth,
    BirthWeekday,
    BirthFacility,
    FatherAge,
    MotherAge,
    LiveBirthOrder,
    TotalBirthOrder,
    NumPrevCesar,
}

/// A `{label, value}` pair for selector widgets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureOption {
    pub label: &'static str,
    pub value: &'static str,
}

impl Feature {
    pub const ALL: [Feature; 8] = [
        Feature::BirthMonth,
        Feature::BirthWeekday,
        Feature::BirthFacility,
        Feature::FatherAge,
        Feature::MotherAge,
        Feature::LiveBirthOrder,
        Feature::TotalBirthOrder,
        Feature::NumPrevCesar,
    ];

    pub fn field(self) -> Field {
        match self {
            Feature::BirthMonth => Field::BirthMonth,
            Feature::BirthWeekday => Field::BirthWeekday,
            Feature::BirthFacility => Field::BirthFacility,
            Feature::FatherAge => Field::FatherAge,
            Feature::MotherAge => Field::MotherAge,
            Feature::LiveBirthOrder => Field::LiveBirthOrder,
            Feature::TotalBirthOrder => Field::TotalBirthOrder,
            Feature::NumPrevCesar => Field::PreviousCesareans,
        }
    }

    /// Column name of the underlying field.
    pub fn name(self) -> &'static str {
        self.field().name()
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Feature::BirthMonth => "Birth month",
            Feature::BirthWeekday => "Birth weekday",
            Feature::BirthFacility => "Birth facility",
            Feature::FatherAge => "Father age",
            Feature::MotherAge => "Mother age",
            Feature::LiveBirthOrder => "Live birth order",
            Feature::TotalBirthOrder => "Total birth order",
            Feature::NumPrevCesar => "Number of previous Cesarean",
        }
    }

    pub fn options() -> Vec<FeatureOption> {
        Feature::ALL
            .iter()
            .map(|feature| FeatureOption {
                label: feature.label(),
                value: feature.name(),
            })
            .collect()
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Feature {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Feature::ALL
            .into_iter()
            .find(|feature| feature.name() == trimmed)
            .ok_or_else(|| ModelError::UnknownFeature {
                name: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_permitted_features() {
        assert_eq!("father_age".parse::<Feature>(), Ok(Feature::FatherAge));
        assert_eq!(
            "num_prev_cesar".parse::<Feature>(),
            Ok(Feature::NumPrevCesar)
        );
    }

    #[test]
    fn rejects_fields_outside_enumeration() {
        // A real record field, but not a permitted feature.
        let err = "num_cig_3".parse::<Feature>().unwrap_err();
        assert_eq!(
            err,
            ModelError::UnknownFeature {
                name: "num_cig_3".to_string()
            }
        );
        assert!("Father age".parse::<Feature>().is_err());
    }

    #[test]
    fn options_follow_enumeration_order() {
        let options = Feature::options();
        assert_eq!(options.len(), 8);
        assert_eq!(options[0].value, "birth_month");
        assert_eq!(options[3].label, "Father age");
    }
}
