use std::{fmt, str::FromStr};

use crate::{EngineError, ResultEngine};

fn overflow() -> EngineError {
    EngineError::InvalidAmount("amount outside the supported range".to_string())
}

/// Money amount represented as **integer minor units** (cents).
///
/// Every amount handled by the engine (expense amounts, budget caps, report
/// totals) goes through this type so sums are exact. Arithmetic is checked:
/// a result that does not fit in `i64` is an [`EngineError::InvalidAmount`].
///
/// # Examples
///
/// ```rust
/// use engine::Money;
///
/// let amount = Money::new(12_34);
/// assert_eq!(amount.minor(), 1234);
/// assert_eq!(amount.to_string(), "12.34");
/// ```
///
/// Parsing from user input (accepts `.` or `,` as decimal separator; rejects >
/// 2 decimals):
///
/// ```rust
/// use engine::Money;
///
/// assert_eq!("10".parse::<Money>().unwrap().minor(), 1000);
/// assert_eq!("10,5".parse::<Money>().unwrap().minor(), 1050);
/// assert!("12.345".parse::<Money>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Creates a new amount from minor units.
    #[must_use]
    pub const fn new(minor: i64) -> Self {
        Self(minor)
    }

    /// Returns the raw value in minor units.
    #[must_use]
    pub const fn minor(self) -> i64 {
        self.0
    }

    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Checked addition (returns `None` on overflow).
    #[must_use]
    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    /// Checked subtraction (returns `None` on overflow).
    #[must_use]
    pub fn checked_sub(self, rhs: Money) -> Option<Money> {
        self.0.checked_sub(rhs.0).map(Money)
    }

    pub fn try_add(self, rhs: Money) -> ResultEngine<Money> {
        self.checked_add(rhs).ok_or_else(overflow)
    }

    pub fn try_sub(self, rhs: Money) -> ResultEngine<Money> {
        self.checked_sub(rhs).ok_or_else(overflow)
    }

    /// Adds up `amounts`, failing instead of wrapping.
    pub fn try_sum<I: IntoIterator<Item = Money>>(amounts: I) -> ResultEngine<Money> {
        amounts
            .into_iter()
            .try_fold(Money::ZERO, |acc, amount| acc.try_add(amount))
    }

    /// Converts a decimal number of major units (`12.34`) as sent by JSON
    /// clients. At most two fractional digits are accepted.
    pub fn from_decimal(value: f64) -> ResultEngine<Money> {
        if !value.is_finite() {
            return Err(EngineError::InvalidAmount(format!("invalid amount {value}")));
        }
        let scaled = value * 100.0;
        let rounded = scaled.round();
        if (scaled - rounded).abs() > 1e-6 {
            return Err(EngineError::InvalidAmount(format!(
                "too many decimals in {value}"
            )));
        }
        // i64::MAX as f64 rounds up to 2^63, which is already out of range.
        if rounded >= i64::MAX as f64 || rounded < i64::MIN as f64 {
            return Err(overflow());
        }
        Ok(Money(rounded as i64))
    }

    /// The amount in major units, for JSON output.
    #[must_use]
    pub fn to_decimal(self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl FromStr for Money {
    type Err = EngineError;

    /// Parses a decimal string into minor units.
    ///
    /// Accepts `.` or `,` as decimal separator and an optional leading `+`/`-`.
    ///
    /// Validation rules:
    /// - max 2 fractional digits (rejects `12.345`)
    /// - rejects empty/invalid strings
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let empty = || EngineError::InvalidAmount("empty amount".to_string());
        let invalid = || EngineError::InvalidAmount(format!("invalid amount '{}'", s.trim()));

        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(empty());
        }

        let (negative, rest) = if let Some(stripped) = trimmed.strip_prefix('-') {
            (true, stripped)
        } else if let Some(stripped) = trimmed.strip_prefix('+') {
            (false, stripped)
        } else {
            (false, trimmed)
        };

        let rest = rest.trim().replace(',', ".");
        if rest.is_empty() {
            return Err(empty());
        }

        let mut parts = rest.split('.');
        let units_str = parts.next().ok_or_else(invalid)?;
        let fraction_str = parts.next();
        if parts.next().is_some() {
            return Err(invalid());
        }

        if units_str.is_empty() || !units_str.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        let units: i64 = units_str.parse().map_err(|_| overflow())?;

        let fraction: i64 = match fraction_str {
            None | Some("") => 0,
            Some(frac) => {
                if !frac.chars().all(|c| c.is_ascii_digit()) {
                    return Err(invalid());
                }
                match frac.len() {
                    1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
                    2 => frac.parse::<i64>().map_err(|_| invalid())?,
                    _ => return Err(EngineError::InvalidAmount("too many decimals".to_string())),
                }
            }
        };

        let total = units
            .checked_mul(100)
            .and_then(|v| v.checked_add(fraction))
            .ok_or_else(overflow)?;

        Ok(Money(if negative { -total } else { total }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_pads_minor_units() {
        assert_eq!(Money::new(0).to_string(), "0.00");
        assert_eq!(Money::new(7).to_string(), "0.07");
        assert_eq!(Money::new(1500).to_string(), "15.00");
        assert_eq!(Money::new(-1050).to_string(), "-10.50");
    }

    #[test]
    fn parse_accepts_dot_or_comma() {
        assert_eq!("20".parse::<Money>().unwrap().minor(), 2000);
        assert_eq!("20.5".parse::<Money>().unwrap().minor(), 2050);
        assert_eq!("20,05".parse::<Money>().unwrap().minor(), 2005);
        assert_eq!("-0.01".parse::<Money>().unwrap().minor(), -1);
        assert_eq!(" 3. ".parse::<Money>().unwrap().minor(), 300);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("".parse::<Money>().is_err());
        assert!("abc".parse::<Money>().is_err());
        assert!("1.2.3".parse::<Money>().is_err());
        assert!("12.345".parse::<Money>().is_err());
        assert!(".50".parse::<Money>().is_err());
    }

    #[test]
    fn sum_is_exact() {
        let amounts = [Money::new(10), Money::new(20), Money::new(70)];
        assert_eq!(Money::try_sum(amounts).unwrap(), Money::new(100));
    }

    #[test]
    fn overflow_is_an_error() {
        let max = Money::new(i64::MAX);
        assert!(max.checked_add(Money::new(1)).is_none());
        assert!(matches!(
            Money::try_sum([max, Money::new(1)]),
            Err(EngineError::InvalidAmount(_))
        ));
        assert!(matches!(
            Money::new(i64::MIN).try_sub(Money::new(1)),
            Err(EngineError::InvalidAmount(_))
        ));
        assert!("92233720368547758.08".parse::<Money>().is_err());
    }

    #[test]
    fn decimal_conversion() {
        assert_eq!(Money::from_decimal(12.34).unwrap(), Money::new(1234));
        assert_eq!(Money::from_decimal(0.29).unwrap(), Money::new(29));
        assert_eq!(Money::from_decimal(-5.0).unwrap(), Money::new(-500));
        assert_eq!(Money::new(3500).to_decimal(), 35.0);
        assert!(Money::from_decimal(12.345).is_err());
        assert!(Money::from_decimal(f64::NAN).is_err());
        assert!(Money::from_decimal(1e17).is_err());
    }
}
