//! Record schema: the fields every collection carries after loading.
//!
//! Raw natality extracts use terse column names (`fagecomb`, `cig_1`, ...).
//! Raw-mode loading keeps only the whitelisted columns below and renames
//! them to the friendly names used everywhere else in the workspace.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Storage kind of a record field after schema harmonisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    /// Whole numbers and numeric codes, stored as `Int64`.
    Integer,
    /// Letter codes and identifiers, stored as `String`.
    Text,
}

/// One field of a vital record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Id,
    BirthMonth,
    BirthWeekday,
    BirthFacility,
    FatherAge,
    MotherAge,
    LiveBirthOrder,
    TotalBirthOrder,
    CigarettesFirstTrimester,
    CigarettesSecondTrimester,
    CigarettesThirdTrimester,
    PreviousCesareans,
    DeliveryMethod,
    BirthWeight,
    AssistedVentilation,
    AssistedAntibiotics,
    AgeAtObservation,
}

impl Field {
    /// All fields in source column order.
    pub const ALL: [Field; 17] = [
        Field::Id,
        Field::BirthMonth,
        Field::BirthWeekday,
        Field::BirthFacility,
        Field::FatherAge,
        Field::MotherAge,
        Field::LiveBirthOrder,
        Field::TotalBirthOrder,
        Field::CigarettesFirstTrimester,
        Field::CigarettesSecondTrimester,
        Field::CigarettesThirdTrimester,
        Field::PreviousCesareans,
        Field::DeliveryMethod,
        Field::BirthWeight,
        Field::AssistedVentilation,
        Field::AssistedAntibiotics,
        Field::AgeAtObservation,
    ];

    /// Column name in the record schema.
    pub fn name(self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::BirthMonth => "birth_month",
            Field::BirthWeekday => "birth_weekday",
            Field::BirthFacility => "birth_facility",
            Field::FatherAge => "father_age",
            Field::MotherAge => "mother_age",
            Field::LiveBirthOrder => "live_birth_order",
            Field::TotalBirthOrder => "total_birth_order",
            Field::CigarettesFirstTrimester => "num_cig_3",
            Field::CigarettesSecondTrimester => "num_cig_6",
            Field::CigarettesThirdTrimester => "num_cig_9",
            Field::PreviousCesareans => "num_prev_cesar",
            Field::DeliveryMethod => "delivery_method",
            Field::BirthWeight => "birth_weight",
            Field::AssistedVentilation => "assisted_vent",
            Field::AssistedAntibiotics => "assisted_antibiotics",
            // Not renamed by the raw mapping.
            Field::AgeAtObservation => "aged",
        }
    }

    /// Column name in the raw natality extract.
    pub fn raw_name(self) -> &'static str {
        match self {
            Field::Id => "idnumber",
            Field::BirthMonth => "dob_mm",
            Field::BirthWeekday => "dob_wk",
            Field::BirthFacility => "bfacil",
            Field::FatherAge => "fagecomb",
            Field::MotherAge => "mager41",
            Field::LiveBirthOrder => "lbo",
            Field::TotalBirthOrder => "tbo",
            Field::CigarettesFirstTrimester => "cig_1",
            Field::CigarettesSecondTrimester => "cig_2",
            Field::CigarettesThirdTrimester => "cig_3",
            Field::PreviousCesareans => "rf_ncesar",
            Field::DeliveryMethod => "dmeth_rec",
            Field::BirthWeight => "bwtr14",
            Field::AssistedVentilation => "ab_vent6",
            Field::AssistedAntibiotics => "ab_antibio",
            Field::AgeAtObservation => "aged",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Field::Id | Field::AssistedVentilation | Field::AssistedAntibiotics => FieldKind::Text,
            _ => FieldKind::Integer,
        }
    }

    /// Looks up a field by its record-schema column name.
    pub fn from_name(name: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|field| field.name() == name)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for field in Field::ALL {
            assert_eq!(Field::from_name(field.name()), Some(field));
        }
        assert_eq!(Field::from_name("fagecomb"), None);
    }

    #[test]
    fn only_age_at_observation_keeps_its_raw_name() {
        let unrenamed: Vec<Field> = Field::ALL
            .into_iter()
            .filter(|field| field.raw_name() == field.name())
            .collect();
        assert_eq!(unrenamed, vec![Field::AgeAtObservation]);
        assert_eq!(Field::FatherAge.raw_name(), "fagecomb");
        assert_eq!(Field::CigarettesFirstTrimester.raw_name(), "cig_1");
    }

    #[test]
    fn flag_fields_are_text() {
        assert_eq!(Field::AssistedVentilation.kind(), FieldKind::Text);
        assert_eq!(Field::Id.kind(), FieldKind::Text);
        assert_eq!(Field::DeliveryMethod.kind(), FieldKind::Integer);
    }
}
