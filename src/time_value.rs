//! Unit-aware time intervals written in compact form (`"15m"`, `"2h"`).

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    Milliseconds,
    Seconds,
    Minutes,
    Hours,
    Days,
    Weeks,
}

impl TimeUnit {
    /// `ms` must be tried before `s` and `m`.
    const ALL: [TimeUnit; 6] = [
        TimeUnit::Milliseconds,
        TimeUnit::Seconds,
        TimeUnit::Minutes,
        TimeUnit::Hours,
        TimeUnit::Days,
        TimeUnit::Weeks,
    ];

    pub fn suffix(self) -> &'static str {
        match self {
            TimeUnit::Milliseconds => "ms",
            TimeUnit::Seconds => "s",
            TimeUnit::Minutes => "m",
            TimeUnit::Hours => "h",
            TimeUnit::Days => "d",
            TimeUnit::Weeks => "w",
        }
    }

    fn millis(self) -> u64 {
        match self {
            TimeUnit::Milliseconds => 1,
            TimeUnit::Seconds => 1_000,
            TimeUnit::Minutes => 60_000,
            TimeUnit::Hours => 3_600_000,
            TimeUnit::Days => 86_400_000,
            TimeUnit::Weeks => 604_800_000,
        }
    }
}

/// A non-negative magnitude paired with a [`TimeUnit`].
///
/// Equality is structural: `60s` and `1m` are different values even though
/// they describe the same interval, so a value always renders back to the
/// form it was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeValue {
    value: u64,
    unit: TimeUnit,
}

impl TimeValue {
    pub const fn new(value: u64, unit: TimeUnit) -> Self {
        Self { value, unit }
    }

    pub const fn millis_value(value: u64) -> Self {
        Self::new(value, TimeUnit::Milliseconds)
    }

    pub const fn seconds(value: u64) -> Self {
        Self::new(value, TimeUnit::Seconds)
    }

    pub const fn minutes(value: u64) -> Self {
        Self::new(value, TimeUnit::Minutes)
    }

    pub const fn hours(value: u64) -> Self {
        Self::new(value, TimeUnit::Hours)
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn unit(&self) -> TimeUnit {
        self.unit
    }

    /// Total length in milliseconds, saturating on overflow.
    pub fn millis(&self) -> u64 {
        self.value.saturating_mul(self.unit.millis())
    }

    pub fn as_duration(&self) -> Duration {
        Duration::from_millis(self.millis())
    }

    pub fn parse(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let invalid = || Error::InvalidTimeValue(s.to_string());

        let (digits, unit) = TimeUnit::ALL
            .iter()
            .find_map(|unit| {
                trimmed
                    .strip_suffix(unit.suffix())
                    .map(|digits| (digits, *unit))
            })
            .ok_or_else(invalid)?;

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let value = digits.parse::<u64>().map_err(|_| invalid())?;
        Ok(Self::new(value, unit))
    }
}

impl fmt::Display for TimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit.suffix())
    }
}

impl FromStr for TimeValue {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for TimeValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        TimeValue::parse(&raw).map_err(serde::de::Error::custom)
    }
}
