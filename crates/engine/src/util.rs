//! Helpers for input parsing and write-time validation.
//!
//! Every write path goes through these so the stored rows keep the same
//! invariants no matter which caller produced them.

use chrono::NaiveDate;

use crate::{EngineError, Money, ResultEngine};

/// Parses an ISO `YYYY-MM-DD` date, labeling the error with `label`.
pub fn parse_date(value: &str, label: &str) -> ResultEngine<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        EngineError::InvalidDate(format!("{label} must be YYYY-MM-DD, got '{value}'"))
    })
}

/// Trims `value` and rejects it if nothing is left.
pub(crate) fn normalize_required_text(value: &str, label: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidInput(format!("{label} must not be empty")));
    }
    Ok(trimmed.to_string())
}

/// Trims `value`; blank strings collapse to `None`.
pub(crate) fn normalize_optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

pub(crate) fn validate_expense_amount(amount: Money) -> ResultEngine<()> {
    if amount.is_negative() {
        return Err(EngineError::InvalidAmount(format!(
            "expense amount must be >= 0, got {amount}"
        )));
    }
    Ok(())
}

/// A budget needs a positive cap and a window that does not end before it
/// starts.
pub(crate) fn validate_budget_fields(
    amount: Money,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> ResultEngine<()> {
    if amount.is_negative() || amount.is_zero() {
        return Err(EngineError::InvalidAmount(format!(
            "budget amount must be > 0, got {amount}"
        )));
    }
    if start_date > end_date {
        return Err(EngineError::InvalidDate(format!(
            "start date {start_date} is after end date {end_date}"
        )));
    }
    Ok(())
}

/// Display name used when a user registers without one: the local part of
/// the email address.
pub(crate) fn display_name_from_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, _)) if !local.is_empty() => local.to_string(),
        _ => email.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_accepts_iso_only() {
        assert_eq!(
            parse_date("2024-01-31", "startDate").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()
        );
        assert!(matches!(
            parse_date("31/01/2024", "startDate"),
            Err(EngineError::InvalidDate(_))
        ));
        assert!(parse_date("2024-02-30", "endDate").is_err());
    }

    #[test]
    fn budget_window_must_be_ordered() {
        let day = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
        assert!(validate_budget_fields(Money::new(100), day(1), day(1)).is_ok());
        assert!(validate_budget_fields(Money::new(100), day(2), day(1)).is_err());
        assert!(validate_budget_fields(Money::ZERO, day(1), day(2)).is_err());
    }

    #[test]
    fn display_name_falls_back_to_local_part() {
        assert_eq!(display_name_from_email("a@x.com"), "a");
        assert_eq!(display_name_from_email("@x.com"), "@x.com");
        assert_eq!(display_name_from_email("plain"), "plain");
    }

    #[test]
    fn optional_text_collapses_blank() {
        assert_eq!(normalize_optional_text(Some("  ")), None);
        assert_eq!(normalize_optional_text(Some(" food ")), Some("food".to_string()));
        assert_eq!(normalize_optional_text(None), None);
    }
}
