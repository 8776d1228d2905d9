// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Day quantities with half-day resolution.
//!
//! Every chargeable amount in the ledger is a non-negative multiple of 0.5.
//! `Days` stores that amount as a count of half days so that ledger
//! arithmetic is exact and the non-negative invariant is carried by the type.

use crate::error::DomainError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A non-negative quantity of leave, in half-day units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Days {
    half_days: u32,
}

impl Days {
    /// Zero days.
    pub const ZERO: Self = Self { half_days: 0 };

    /// One half day.
    pub const HALF: Self = Self { half_days: 1 };

    /// Creates a quantity from a count of half days.
    #[must_use]
    pub const fn from_half_days(half_days: u32) -> Self {
        Self { half_days }
    }

    /// Creates a quantity of whole days, saturating at the representable maximum.
    #[must_use]
    pub const fn whole(days: u32) -> Self {
        Self {
            half_days: days.saturating_mul(2),
        }
    }

    /// Returns the number of half days.
    #[must_use]
    pub const fn half_days(&self) -> u32 {
        self.half_days
    }

    /// Returns `true` for a zero quantity.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.half_days == 0
    }

    /// Returns the quantity as a floating point day count.
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        f64::from(self.half_days) / 2.0
    }

    /// Adds two quantities, returning `None` on overflow.
    #[must_use]
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.half_days.checked_add(other.half_days) {
            Some(half_days) => Some(Self { half_days }),
            None => None,
        }
    }

    /// Subtracts `other`, returning `None` when the result would be negative.
    #[must_use]
    pub const fn checked_sub(self, other: Self) -> Option<Self> {
        match self.half_days.checked_sub(other.half_days) {
            Some(half_days) => Some(Self { half_days }),
            None => None,
        }
    }

    /// Subtracts `other`, clamping at zero.
    #[must_use]
    pub const fn saturating_sub(self, other: Self) -> Self {
        Self {
            half_days: self.half_days.saturating_sub(other.half_days),
        }
    }

    /// Converts a floating point day count.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDays` if the value is negative, not finite,
    /// not a multiple of 0.5, or too large to represent.
    pub fn try_from_f64(value: f64) -> Result<Self, DomainError> {
        let doubled: f64 = value * 2.0;
        if !doubled.is_finite()
            || doubled < 0.0
            || doubled.fract() != 0.0
            || doubled > f64::from(u32::MAX)
        {
            return Err(DomainError::InvalidDays {
                value: value.to_string(),
            });
        }

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let half_days: u32 = doubled as u32;
        Ok(Self { half_days })
    }
}

impl std::fmt::Display for Days {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let whole: u32 = self.half_days / 2;
        if self.half_days % 2 == 0 {
            write!(f, "{whole}")
        } else {
            write!(f, "{whole}.5")
        }
    }
}

impl std::str::FromStr for Days {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f64 = s.trim().parse().map_err(|_| DomainError::InvalidDays {
            value: s.to_string(),
        })?;
        Self::try_from_f64(value)
    }
}

impl Serialize for Days {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

impl<'de> Deserialize<'de> for Days {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value: f64 = f64::deserialize(deserializer)?;
        Self::try_from_f64(value).map_err(serde::de::Error::custom)
    }
}
