//! Fixed-point dish price
//!
//! Prices are held as integer cents and rendered with exactly two decimals.

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PriceError {
    #[error("Price cannot be empty")]
    Empty,
    #[error("Price must be a non-negative decimal number: {0}")]
    Malformed(String),
    #[error("Price allows at most two decimal places: {0}")]
    TooPrecise(String),
    #[error("Price is too large: {0}")]
    Overflow(String),
}

/// A non-negative amount with two fractional digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Price(i64);

impl Price {
    pub fn from_cents(cents: i64) -> Self {
        Price(cents)
    }

    pub fn cents(self) -> i64 {
        self.0
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(PriceError::Empty);
        }

        let (whole, frac) = match s.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (s, ""),
        };

        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if whole.is_empty() || !all_digits(whole) || !all_digits(frac) {
            return Err(PriceError::Malformed(s.to_string()));
        }
        if frac.len() > 2 {
            return Err(PriceError::TooPrecise(s.to_string()));
        }

        let overflow = || PriceError::Overflow(s.to_string());
        let whole: i64 = whole.parse().map_err(|_| overflow())?;
        // "1.5" means 50 cents, not 5
        let frac: i64 = format!("{:0<2}", frac).parse().map_err(|_| overflow())?;

        whole
            .checked_mul(100)
            .and_then(|cents| cents.checked_add(frac))
            .map(Price)
            .ok_or_else(overflow)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Price {
    /// Accepts `"12.50"` as well as the bare numbers `12.5` and `12`.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PriceVisitor;

        impl de::Visitor<'_> for PriceVisitor {
            type Value = Price;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a price such as \"12.50\"")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Price, E> {
                v.parse().map_err(E::custom)
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Price, E> {
                self.visit_str(&v.to_string())
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Price, E> {
                self.visit_str(&v.to_string())
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Price, E> {
                self.visit_str(&v.to_string())
            }
        }

        deserializer.deserialize_any(PriceVisitor)
    }
}
