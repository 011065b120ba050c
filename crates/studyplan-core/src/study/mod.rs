//! Study data model: subjects with exam dates, their topics, and the
//! catalog that owns them.
//!
//! All invariants (ratings in `1..=5`, positive hour estimates, unique
//! names) are enforced by constructors and setters, and again when records
//! are deserialized, so a value of these types is always valid.

pub mod catalog;
pub mod sample;
pub mod subject;
pub mod topic;

pub use catalog::Catalog;
pub use sample::add_sample_subjects;
pub use subject::Subject;
pub use topic::Topic;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;

/// Lowest accepted priority or difficulty.
pub const RATING_MIN: u8 = 1;
/// Highest accepted priority or difficulty.
pub const RATING_MAX: u8 = 5;

fn check_rating(field: &'static str, value: i64) -> Result<u8, ValidationError> {
    if (RATING_MIN as i64..=RATING_MAX as i64).contains(&value) {
        Ok(value as u8)
    } else {
        Err(ValidationError::OutOfRange {
            field,
            value,
            min: RATING_MIN,
            max: RATING_MAX,
        })
    }
}

macro_rules! rating {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "i64", into = "u8")]
        pub struct $name(u8);

        impl $name {
            pub fn new(value: i64) -> Result<Self, ValidationError> {
                check_rating($field, value).map(Self)
            }

            pub fn get(self) -> u8 {
                self.0
            }
        }

        impl TryFrom<i64> for $name {
            type Error = ValidationError;

            fn try_from(value: i64) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for u8 {
            fn from(value: $name) -> u8 {
                value.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

rating!(
    /// Topic priority, 5 = most urgent.
    Priority,
    "priority"
);

rating!(
    /// Subject difficulty, 5 = hardest.
    Difficulty,
    "difficulty"
);

/// Trim and reject empty names.
pub(crate) fn check_name(field: &'static str, name: String) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    if trimmed.len() == name.len() {
        Ok(name)
    } else {
        Ok(trimmed.to_string())
    }
}

/// Names are unique case-insensitively.
pub(crate) fn names_match(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

/// Hour estimates must be positive and finite.
pub(crate) fn check_hours(field: &str, hours: f64) -> Result<f64, ValidationError> {
    if !hours.is_finite() || hours <= 0.0 {
        return Err(ValidationError::invalid(
            field,
            format!("must be a positive number of hours, got {hours}"),
        ));
    }
    Ok(hours)
}
