//! Amount type for monetary values.
//!
//! `Amount` wraps `Decimal`. It is written to storage as a decimal string and read back leniently
//! so that a damaged or hand-edited entry degrades to zero instead of poisoning the whole
//! collection.

use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

/// Represents an amount of money.
///
/// # Examples
///
/// Parsing tolerates a trailing currency symbol:
/// ```
/// # use salon_desk::model::Amount;
/// # use std::str::FromStr;
/// let amount = Amount::from_str("15.5€").unwrap();
/// assert_eq!(amount.fixed(), "15.50");
/// ```
///
/// Lenient parsing never fails:
/// ```
/// # use salon_desk::model::Amount;
/// assert!(Amount::lenient("twelve").is_zero());
/// assert_eq!(Amount::lenient(" 20 ").fixed(), "20.00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(Decimal);

impl Amount {
    pub const ZERO: Amount = Amount(Decimal::ZERO);

    pub const fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Returns the underlying Decimal value.
    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        !self.is_zero() && self.0.is_sign_negative()
    }

    /// The magnitude of the amount.
    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Parses `s`, treating anything unparsable as zero.
    pub fn lenient(s: &str) -> Self {
        Amount::from_str(s).unwrap_or_default()
    }

    /// Parses `s` after removing `currency` from either end. Anything else around the number is an
    /// error.
    pub fn parse_with_currency(s: &str, currency: &str) -> Result<Self, AmountError> {
        let trimmed = s.trim();
        let currency = currency.trim();
        let without_symbol = if currency.is_empty() {
            trimmed
        } else {
            trimmed
                .strip_suffix(currency)
                .or_else(|| trimmed.strip_prefix(currency))
                .unwrap_or(trimmed)
        };
        Amount::from_str(without_symbol).map_err(|_| AmountError(s.to_string()))
    }

    /// Formats with exactly two decimal places, e.g. `84.50`.
    pub fn fixed(&self) -> String {
        format!("{:.2}", self.0.round_dp(2))
    }

    /// Formats with two decimal places followed by `currency`, e.g. `84.50€`.
    pub fn with_currency(&self, currency: &str) -> String {
        format!("{}{currency}", self.fixed())
    }
}

/// An error that can occur when parsing strings into `Amount` values.
pub struct AmountError(String);

impl Debug for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(&self.0, f)
    }
}

impl Display for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not a valid amount", self.0)
    }
}

impl std::error::Error for AmountError {}

/// Symbols tolerated before or after the number when parsing.
const CURRENCY_SYMBOLS: &[char] = &['€', '$', '£', '¥'];

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let without_symbol = s
            .trim()
            .trim_start_matches(CURRENCY_SYMBOLS)
            .trim_end_matches(CURRENCY_SYMBOLS)
            .trim();
        if without_symbol.is_empty() {
            return Err(AmountError(s.to_string()));
        }
        Decimal::from_str(without_symbol)
            .or_else(|_| Decimal::from_scientific(without_symbol))
            .map(Amount)
            .map_err(|_| AmountError(s.to_string()))
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0.normalize(), f)
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(LenientVisitor)
    }
}

/// Accepts numbers, numeric strings and null. Anything that does not hold a number is zero.
struct LenientVisitor;

impl<'de> Visitor<'de> for LenientVisitor {
    type Value = Amount;

    fn expecting(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("a number or a numeric string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Amount, E> {
        Ok(Amount(Decimal::from(v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Amount, E> {
        Ok(Amount(Decimal::from(v)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Amount, E> {
        // Go through the shortest text form so 15.5 stays 15.5 and not 15.4999...
        Ok(Amount::lenient(&v.to_string()))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Amount, E> {
        Ok(Amount::lenient(v))
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<Amount, E> {
        Ok(Amount::ZERO)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Amount, E> {
        Ok(Amount::ZERO)
    }

    fn visit_none<E: de::Error>(self) -> Result<Amount, E> {
        Ok(Amount::ZERO)
    }

    fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Amount, D::Error> {
        d.deserialize_any(LenientVisitor)
    }

    fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<Amount, A::Error> {
        while seq.next_element::<de::IgnoredAny>()?.is_some() {}
        Ok(Amount::ZERO)
    }

    fn visit_map<A: de::MapAccess<'de>>(self, mut map: A) -> Result<Amount, A::Error> {
        while map
            .next_entry::<de::IgnoredAny, de::IgnoredAny>()?
            .is_some()
        {}
        Ok(Amount::ZERO)
    }
}

impl JsonSchema for Amount {
    fn schema_name() -> std::borrow::Cow<'static, str> {
        "Amount".into()
    }

    fn json_schema(_: &mut schemars::SchemaGenerator) -> schemars::Schema {
        schemars::json_schema!({
            "description": "A decimal amount written as a string, e.g. \"15.50\". Numbers are also accepted.",
            "type": ["string", "number"]
        })
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Amount::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.value()
    }
}

// Saturates at the `Decimal` bounds instead of panicking, totals over stored data must not fail.
impl std::ops::Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Self) -> Self::Output {
        Amount(self.0.saturating_add(rhs.0))
    }
}

impl std::ops::Sub for Amount {
    type Output = Amount;

    fn sub(self, rhs: Self) -> Self::Output {
        Amount(self.0.saturating_sub(rhs.0))
    }
}

impl std::iter::Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, |a, b| a + b)
    }
}
