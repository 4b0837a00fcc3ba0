//! Reserved values that mean "unknown" rather than a measurement.

/// Father ages at or above this value are data-entry placeholders.
pub const INVALID_FATHER_AGE: i64 = 80;

/// Cigarette counts at or above this value mean the count is unknown.
pub const UNKNOWN_CIGARETTE_COUNT: i64 = 100;

/// True when a father age is present and below [`INVALID_FATHER_AGE`].
pub fn is_valid_father_age(age: Option<i64>) -> bool {
    age.is_some_and(|age| age < INVALID_FATHER_AGE)
}

/// True when a cigarette count is present, non-negative and below
/// [`UNKNOWN_CIGARETTE_COUNT`].
pub fn is_known_cigarette_count(count: Option<i64>) -> bool {
    count.is_some_and(|count| (0..UNKNOWN_CIGARETTE_COUNT).contains(&count))
}
