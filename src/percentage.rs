//! Limit on how much of a document's text is indexed: either a share of the
//! text (`"10%"`) or an absolute character count (`"10000"`).

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

/// A share of the extracted text, always finite and within `[0, 100]`.
#[derive(Debug, Clone, Copy)]
pub struct Percent(f64);

impl Percent {
    pub fn new(value: f64) -> Result<Self> {
        if !value.is_finite() || !(0.0..=100.0).contains(&value) {
            return Err(Error::PercentageOutOfRange(value));
        }
        // -0.0 and 0.0 must compare and hash the same.
        Ok(Percent(value + 0.0))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

// Values are finite and never -0.0, so bitwise equality is total.
impl PartialEq for Percent {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for Percent {}

impl Hash for Percent {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Percentage {
    Percent(Percent),
    /// Absolute number of characters.
    Absolute(u64),
}

impl Percentage {
    pub fn percent(value: f64) -> Result<Self> {
        Percent::new(value).map(Percentage::Percent)
    }

    pub fn absolute(count: u64) -> Self {
        Percentage::Absolute(count)
    }

    pub fn parse(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let invalid = || Error::InvalidPercentage(s.to_string());

        match trimmed.strip_suffix('%') {
            Some(number) => {
                let number = number.trim();
                // Plain decimals only: no sign, exponent or `inf`.
                if !is_unsigned_number(number, true) {
                    return Err(invalid());
                }
                let value = number.parse::<f64>().map_err(|_| invalid())?;
                Self::percent(value)
            }
            None => {
                if !is_unsigned_number(trimmed, false) {
                    return Err(invalid());
                }
                trimmed.parse::<u64>().map(Self::absolute).map_err(|_| invalid())
            }
        }
    }

    pub fn is_percent(&self) -> bool {
        matches!(self, Percentage::Percent(_))
    }

    /// Number of characters to index out of a text of `total` characters.
    pub fn apply(&self, total: usize) -> usize {
        match *self {
            Percentage::Percent(p) => ((total as f64) * p.value() / 100.0).floor() as usize,
            Percentage::Absolute(n) => usize::try_from(n).unwrap_or(usize::MAX),
        }
    }
}

fn is_unsigned_number(s: &str, allow_fraction: bool) -> bool {
    !s.is_empty()
        && s.bytes()
            .all(|b| b.is_ascii_digit() || (allow_fraction && b == b'.'))
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Percentage::Percent(p) => write!(f, "{}%", p.value()),
            Percentage::Absolute(n) => write!(f, "{}", n),
        }
    }
}

impl FromStr for Percentage {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for Percentage {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Percentage::Percent(_) => serializer.collect_str(self),
            Percentage::Absolute(n) => serializer.serialize_u64(*n),
        }
    }
}

impl<'de> Deserialize<'de> for Percentage {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Count(u64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Count(n) => Ok(Percentage::absolute(n)),
            Raw::Text(s) => Percentage::parse(&s).map_err(serde::de::Error::custom),
        }
    }
}
