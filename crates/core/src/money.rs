use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum MoneyError {
    #[error("Invalid amount: '{0}'")]
    Invalid(String),
    #[error("Amount must not be negative: {0}")]
    Negative(Decimal),
}

/// A non-negative rupee amount, kept at two decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Money(Decimal);

impl Money {
    pub fn from_decimal(decimal: Decimal) -> Self {
        let mut value = decimal.round_dp(2);
        value.rescale(2);
        Money(value)
    }

    pub fn from_paise(paise: i64) -> Self {
        Money(Decimal::new(paise, 2))
    }

    pub fn zero() -> Self {
        Money(Decimal::new(0, 2))
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    pub fn as_decimal(self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Money {
    type Error = MoneyError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(MoneyError::Negative(value));
        }
        Ok(Money::from_decimal(value))
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.0
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "₹{:.2}", self.0)
    }
}

/// Parses user-entered amounts such as `450`, `1,299.50` or `₹ 75`.
impl FromStr for Money {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let clean: String = s
            .trim()
            .trim_start_matches('₹')
            .chars()
            .filter(|c| *c != ',' && !c.is_whitespace())
            .collect();
        let value = Decimal::from_str(&clean).map_err(|_| MoneyError::Invalid(s.to_string()))?;
        Money::try_from(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_rupee_sign_and_two_places() {
        assert_eq!(Money::from_paise(45000).to_string(), "₹450.00");
        assert_eq!(Money::zero().to_string(), "₹0.00");
    }

    #[test]
    fn from_decimal_rounds_to_paise() {
        let m = Money::from_decimal(Decimal::from_str("12.345").unwrap());
        assert_eq!(m, Money::from_paise(1234));
        assert_eq!(Money::from_decimal(Decimal::from(75)).as_decimal().to_string(), "75.00");
    }

    #[test]
    fn parse_accepts_separators_and_symbol() {
        assert_eq!("1,299.50".parse::<Money>().unwrap(), Money::from_paise(129950));
        assert_eq!("₹ 75".parse::<Money>().unwrap(), Money::from_paise(7500));
    }

    #[test]
    fn parse_rejects_garbage_and_negatives() {
        assert!(matches!("abc".parse::<Money>(), Err(MoneyError::Invalid(_))));
        assert!(matches!("-5".parse::<Money>(), Err(MoneyError::Negative(_))));
    }

    #[test]
    fn serializes_as_bare_decimal() {
        let json = serde_json::to_string(&Money::from_paise(45000)).unwrap();
        assert_eq!(json, "\"450.00\"");
    }

    #[test]
    fn deserialize_rounds_and_rejects_negatives() {
        let m: Money = serde_json::from_str("\"12.5\"").unwrap();
        assert_eq!(m, Money::from_paise(1250));
        assert!(serde_json::from_str::<Money>("\"-5\"").is_err());
    }
}
