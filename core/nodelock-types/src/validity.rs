//! Validity durations for issued licenses.

use chrono::{DateTime, Duration, Months, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// The unit a validity amount is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidityUnit {
    Millis,
    Seconds,
    Minutes,
    Hours,
    Days,
    Weeks,
    /// Calendar months.
    Months,
    /// Calendar years (twelve calendar months).
    Years,
}

impl ValidityUnit {
    /// Returns the canonical lowercase name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Millis => "millis",
            Self::Seconds => "seconds",
            Self::Minutes => "minutes",
            Self::Hours => "hours",
            Self::Days => "days",
            Self::Weeks => "weeks",
            Self::Months => "months",
            Self::Years => "years",
        }
    }
}

impl fmt::Display for ValidityUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValidityUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ms" | "milli" | "millis" | "milliseconds" => Ok(Self::Millis),
            "s" | "sec" | "second" | "seconds" => Ok(Self::Seconds),
            "m" | "min" | "minute" | "minutes" => Ok(Self::Minutes),
            "h" | "hour" | "hours" => Ok(Self::Hours),
            "d" | "day" | "days" => Ok(Self::Days),
            "w" | "week" | "weeks" => Ok(Self::Weeks),
            "month" | "months" => Ok(Self::Months),
            "y" | "year" | "years" => Ok(Self::Years),
            other => Err(Error::InvalidValidity(format!("unknown unit {other:?}"))),
        }
    }
}

/// How long a license remains valid after issuance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Validity {
    /// Number of units; must be positive.
    pub amount: u32,
    pub unit: ValidityUnit,
}

impl Validity {
    #[must_use]
    pub const fn new(amount: u32, unit: ValidityUnit) -> Self {
        Self { amount, unit }
    }

    #[must_use]
    pub const fn days(amount: u32) -> Self {
        Self::new(amount, ValidityUnit::Days)
    }

    #[must_use]
    pub const fn years(amount: u32) -> Self {
        Self::new(amount, ValidityUnit::Years)
    }

    /// Adds this validity to `start`, returning `None` on overflow or when
    /// the amount is zero.
    #[must_use]
    pub fn add_to(&self, start: DateTime<Utc>) -> Option<DateTime<Utc>> {
        if self.amount == 0 {
            return None;
        }
        let amount = i64::from(self.amount);
        match self.unit {
            ValidityUnit::Millis => start.checked_add_signed(Duration::try_milliseconds(amount)?),
            ValidityUnit::Seconds => start.checked_add_signed(Duration::try_seconds(amount)?),
            ValidityUnit::Minutes => start.checked_add_signed(Duration::try_minutes(amount)?),
            ValidityUnit::Hours => start.checked_add_signed(Duration::try_hours(amount)?),
            ValidityUnit::Days => start.checked_add_signed(Duration::try_days(amount)?),
            ValidityUnit::Weeks => start.checked_add_signed(Duration::try_weeks(amount)?),
            ValidityUnit::Months => start.checked_add_months(Months::new(self.amount)),
            ValidityUnit::Years => {
                start.checked_add_months(Months::new(self.amount.checked_mul(12)?))
            }
        }
    }
}

impl fmt::Display for Validity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.unit)
    }
}
