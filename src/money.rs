//! Peso amounts held as integer centavos.
//!
//! Prices travel through storage and the API as display strings such as
//! `"₱89.00"`. Arithmetic stays in whole centavos so repeated additions never
//! drift.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use thiserror::Error;
use utoipa::ToSchema;

pub const CURRENCY_SYMBOL: &str = "₱";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, ToSchema)]
#[schema(value_type = String, example = "₱89.00")]
pub struct Money(i64);

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid amount: {0:?}")]
pub struct MoneyParseError(pub String);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_centavos(centavos: i64) -> Self {
        Self(centavos)
    }

    pub const fn from_pesos(pesos: i64) -> Self {
        Self(pesos * 100)
    }

    pub const fn centavos(self) -> i64 {
        self.0
    }

    /// Parses `"₱89.00"`, `"89"`, `"1,299.5"` and friends. More than two
    /// fractional digits is rejected rather than rounded.
    pub fn parse(input: &str) -> Result<Self, MoneyParseError> {
        let err = || MoneyParseError(input.to_string());

        let mut rest = input.trim();
        let negative = match rest.strip_prefix('-') {
            Some(stripped) => {
                rest = stripped;
                true
            }
            None => false,
        };
        rest = rest.strip_prefix(CURRENCY_SYMBOL).unwrap_or(rest).trim();

        let cleaned: String = rest.chars().filter(|c| *c != ',').collect();
        let (whole, frac) = match cleaned.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (cleaned.as_str(), ""),
        };

        if whole.is_empty() || !whole.chars().all(|c| c.is_ascii_digit()) {
            return Err(err());
        }
        if frac.len() > 2 || !frac.chars().all(|c| c.is_ascii_digit()) {
            return Err(err());
        }

        let whole: i64 = whole.parse().map_err(|_| err())?;
        let frac: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().map_err(|_| err())? * 10,
            _ => frac.parse().map_err(|_| err())?,
        };

        let centavos = whole
            .checked_mul(100)
            .and_then(|v| v.checked_add(frac))
            .ok_or_else(err)?;
        Ok(Self(if negative { -centavos } else { centavos }))
    }

    /// Saturates instead of overflowing; use [`Money::checked_times`] where an
    /// out-of-range amount must be rejected.
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(i64::from(quantity)))
    }

    pub fn checked_times(self, quantity: u32) -> Option<Self> {
        self.0.checked_mul(i64::from(quantity)).map(Self)
    }

    pub fn checked_add(self, rhs: Money) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{CURRENCY_SYMBOL}{}.{:02}", abs / 100, abs % 100)
    }
}

impl FromStr for Money {
    type Err = MoneyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        *self = *self + rhs;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0.saturating_sub(rhs.0))
    }
}

impl Mul<u32> for Money {
    type Output = Money;

    fn mul(self, rhs: u32) -> Money {
        self.times(rhs)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MoneyVisitor;

        impl de::Visitor<'_> for MoneyVisitor {
            type Value = Money;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an amount such as \"₱89.00\" or a number")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Money, E> {
                Money::parse(v).map_err(E::custom)
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
                v.checked_mul(100)
                    .map(Money)
                    .ok_or_else(|| E::custom("amount out of range"))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
                i64::try_from(v)
                    .ok()
                    .and_then(|v| v.checked_mul(100))
                    .map(Money)
                    .ok_or_else(|| E::custom("amount out of range"))
            }

            // Legacy payloads stored plain floats; round once, at the boundary.
            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
                if !v.is_finite() {
                    return Err(E::custom("amount must be finite"));
                }
                Ok(Money((v * 100.0).round() as i64))
            }
        }

        deserializer.deserialize_any(MoneyVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_symbol_and_plain_amounts() {
        assert_eq!(Money::parse("₱89.00"), Ok(Money::from_centavos(8900)));
        assert_eq!(Money::parse(" ₱5.5 "), Ok(Money::from_centavos(550)));
        assert_eq!(Money::parse("1,299"), Ok(Money::from_pesos(1299)));
        assert_eq!(Money::parse("-₱5.99"), Ok(Money::from_centavos(-599)));
    }

    #[test]
    fn rejects_garbage_and_excess_precision() {
        assert!(Money::parse("").is_err());
        assert!(Money::parse("₱").is_err());
        assert!(Money::parse("12.345").is_err());
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse(".50").is_err());
    }

    #[test]
    fn formats_with_two_decimals() {
        assert_eq!(Money::from_centavos(29700).to_string(), "₱297.00");
        assert_eq!(Money::from_centavos(599).to_string(), "₱5.99");
        assert_eq!(Money::from_centavos(-5).to_string(), "-₱0.05");
    }

    #[test]
    fn deserializes_strings_and_legacy_numbers() {
        let from_str: Money = serde_json::from_str("\"₱79.00\"").unwrap();
        let from_float: Money = serde_json::from_str("79.1").unwrap();
        let from_int: Money = serde_json::from_str("79").unwrap();
        assert_eq!(from_str, Money::from_pesos(79));
        assert_eq!(from_float, Money::from_centavos(7910));
        assert_eq!(from_int, Money::from_pesos(79));
        assert_eq!(serde_json::to_string(&from_str).unwrap(), "\"₱79.00\"");
    }

    #[test]
    fn huge_amounts_saturate_or_report_overflow() {
        let huge = Money::from_centavos(9_000_000_000_000_000_000);
        assert_eq!(huge.checked_times(1000), None);
        assert_eq!(huge.checked_add(huge), None);
        assert_eq!(huge.times(1000), Money::from_centavos(i64::MAX));
        assert_eq!(huge + huge, Money::from_centavos(i64::MAX));
        assert_eq!(
            Money::from_pesos(89).checked_times(2),
            Some(Money::from_pesos(178))
        );
    }
}
