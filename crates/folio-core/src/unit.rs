//! Fixed-point unit numbers.
//!
//! Catalog spreadsheets number units as decimals (`2`, `2.0`, `4.5`). Storing
//! them as integer tenths makes `Unit` usable as a hash/equality key: `4.5`
//! parsed from `"4.5"`, `"4.50"` or `4.5_f64` is the same value.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::CoreError;

/// Largest deviation from a whole number of tenths accepted when converting
/// from floating point (absorbs spreadsheet float noise such as `4.4999999`).
const TENTHS_TOLERANCE: f64 = 1e-6;

/// A unit number stored as integer tenths (`Unit::from_tenths(45)` is 4.5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Unit(u32);

impl Unit {
    #[must_use]
    pub const fn from_tenths(tenths: u32) -> Self {
        Self(tenths)
    }

    /// A whole unit number (`Unit::whole(2)` is 2.0).
    #[must_use]
    pub const fn whole(number: u32) -> Self {
        Self(number * 10)
    }

    #[must_use]
    pub const fn tenths(self) -> u32 {
        self.0
    }

    #[must_use]
    pub const fn integer_part(self) -> u32 {
        self.0 / 10
    }

    #[must_use]
    pub const fn is_whole(self) -> bool {
        self.0 % 10 == 0
    }

    #[must_use]
    pub fn as_f64(self) -> f64 {
        f64::from(self.0) / 10.0
    }

    /// Convert a float to whole tenths.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidUnit` for non-finite or negative values and
    /// for values with more than one significant fractional digit.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_f64(value: f64) -> Result<Self, CoreError> {
        let invalid = |reason: &str| CoreError::InvalidUnit {
            value: value.to_string(),
            reason: reason.to_string(),
        };

        if !value.is_finite() {
            return Err(invalid("not a finite number"));
        }
        if value < 0.0 {
            return Err(invalid("unit numbers cannot be negative"));
        }

        let scaled = value * 10.0;
        let rounded = scaled.round();
        if (scaled - rounded).abs() > TENTHS_TOLERANCE {
            return Err(invalid("more than one fractional digit"));
        }
        if rounded > f64::from(u32::MAX) {
            return Err(invalid("out of range"));
        }

        Ok(Self(rounded as u32))
    }

    /// Directory name used in output paths: `Unit04`, or `Unit04.5` for a
    /// fractional unit so that 4.0 and 4.5 never share a directory.
    #[must_use]
    pub fn dir_name(self) -> String {
        if self.is_whole() {
            format!("Unit{:02}", self.integer_part())
        } else {
            format!("Unit{:02}.{}", self.integer_part(), self.0 % 10)
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.0 / 10, self.0 % 10)
    }
}

impl FromStr for Unit {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let value: f64 = trimmed.parse().map_err(|_| CoreError::InvalidUnit {
            value: trimmed.to_string(),
            reason: "not a number".to_string(),
        })?;
        Self::from_f64(value).map_err(|error| match error {
            CoreError::InvalidUnit { reason, .. } => CoreError::InvalidUnit {
                value: trimmed.to_string(),
                reason,
            },
            other => other,
        })
    }
}

impl Serialize for Unit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

impl<'de> Deserialize<'de> for Unit {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct UnitVisitor;

        impl Visitor<'_> for UnitVisitor {
            type Value = Unit;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a non-negative unit number with at most one decimal")
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Unit, E> {
                Unit::from_f64(v).map_err(E::custom)
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Unit, E> {
                let number = u32::try_from(v).map_err(E::custom)?;
                number
                    .checked_mul(10)
                    .map(Unit)
                    .ok_or_else(|| E::custom("unit number out of range"))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Unit, E> {
                let v = u64::try_from(v).map_err(|_| E::custom("unit numbers cannot be negative"))?;
                self.visit_u64(v)
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Unit, E> {
                v.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_any(UnitVisitor)
    }
}
