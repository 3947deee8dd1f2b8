//! Reductions over expense lists.
//!
//! Everything here is pure: the engine loads the rows, these functions fold
//! them into totals, per-category and per-month sums, and budget status.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::{Budget, EngineError, Expense, Money, ResultEngine};

/// Sum of every amount in `expenses`.
pub fn total(expenses: &[Expense]) -> ResultEngine<Money> {
    Money::try_sum(expenses.iter().map(|expense| expense.amount))
}

/// Sums amounts grouped by category label, ordered by label.
pub fn category_totals(expenses: &[Expense]) -> ResultEngine<BTreeMap<String, Money>> {
    let mut totals: BTreeMap<String, Money> = BTreeMap::new();
    for expense in expenses {
        let slot = totals.entry(expense.category.clone()).or_default();
        *slot = slot.try_add(expense.amount)?;
    }
    Ok(totals)
}

/// Keeps the expenses dated inside `[start, end]`.
pub fn within(expenses: &[Expense], start: NaiveDate, end: NaiveDate) -> Vec<Expense> {
    expenses
        .iter()
        .filter(|expense| start <= expense.date && expense.date <= end)
        .cloned()
        .collect()
}

/// First and last day of a calendar month.
pub fn month_bounds(year: i32, month: u32) -> ResultEngine<(NaiveDate, NaiveDate)> {
    if !(1..=12).contains(&month) {
        return Err(EngineError::InvalidDate(format!(
            "month must be between 1 and 12, got {month}"
        )));
    }
    let out_of_range = || EngineError::InvalidDate(format!("year {year} out of range"));

    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(out_of_range)?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(out_of_range)?;
    let last = next_first.pred_opt().ok_or_else(out_of_range)?;

    Ok((first, last))
}

/// January 1st and December 31st of `year`.
pub fn year_bounds(year: i32) -> ResultEngine<(NaiveDate, NaiveDate)> {
    let (first, _) = month_bounds(year, 1)?;
    let (_, last) = month_bounds(year, 12)?;
    Ok((first, last))
}

/// Totals for one calendar month.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MonthlyReport {
    pub total: Money,
    pub category_totals: BTreeMap<String, Money>,
    pub expense_count: usize,
}

impl MonthlyReport {
    /// Builds the report from a user's expenses; rows outside the month are
    /// ignored.
    pub fn from_expenses(expenses: &[Expense], year: i32, month: u32) -> ResultEngine<Self> {
        let (start, end) = month_bounds(year, month)?;
        let in_month = within(expenses, start, end);
        Ok(Self {
            total: total(&in_month)?,
            category_totals: category_totals(&in_month)?,
            expense_count: in_month.len(),
        })
    }
}

/// Totals for one calendar year, bucketed per month.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct YearlyReport {
    pub total: Money,
    /// Always holds the keys `1..=12`.
    pub monthly_totals: BTreeMap<u32, Money>,
    pub expense_count: usize,
}

impl YearlyReport {
    pub fn empty() -> Self {
        Self {
            total: Money::ZERO,
            monthly_totals: (1..=12).map(|month| (month, Money::ZERO)).collect(),
            expense_count: 0,
        }
    }

    pub fn from_expenses(expenses: &[Expense], year: i32) -> ResultEngine<Self> {
        let (start, end) = year_bounds(year)?;
        let mut report = Self::empty();
        for expense in within(expenses, start, end) {
            report.total = report.total.try_add(expense.amount)?;
            report.expense_count += 1;
            let month = report
                .monthly_totals
                .entry(expense.date.month())
                .or_default();
            *month = month.try_add(expense.amount)?;
        }
        Ok(report)
    }
}

/// A budget next to what was actually spent over its window.
#[derive(Clone, Debug, PartialEq)]
pub struct BudgetStatus {
    pub budget: Budget,
    pub spent: Money,
    pub remaining: Money,
    /// `spent / amount` rounded half-up to two decimals, then scaled to
    /// percent (`0.50` -> `50.0`).
    pub percentage: f64,
}

impl BudgetStatus {
    pub fn new(budget: Budget, spent: Money) -> ResultEngine<Self> {
        if budget.amount.is_zero() {
            return Err(EngineError::DivisionByZero(format!(
                "budget {} has a zero amount",
                budget.id
            )));
        }
        let hundredths = ratio_hundredths(spent.minor(), budget.amount.minor());
        Ok(Self {
            remaining: budget.amount.try_sub(spent)?,
            percentage: hundredths as f64,
            spent,
            budget,
        })
    }
}

/// `numerator / denominator` in hundredths, rounding half away from zero.
/// Kept in `i128`: `i64::MAX * 100` does not fit in `i64`.
fn ratio_hundredths(numerator: i64, denominator: i64) -> i128 {
    let num = i128::from(numerator) * 100;
    let den = i128::from(denominator);
    let quotient = num / den;
    let remainder = num % den;
    let rounded = if remainder.abs() * 2 >= den.abs() {
        quotient + num.signum() * den.signum()
    } else {
        quotient
    };
    rounded
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn expense(amount: i64, category: &str, on: NaiveDate) -> Expense {
        Expense {
            id: 0,
            title: format!("{category} spend"),
            amount: Money::new(amount),
            category: category.to_string(),
            date: on,
            user_id: 1,
        }
    }

    fn sample() -> Vec<Expense> {
        vec![
            expense(10_00, "food", date(2024, 1, 5)),
            expense(5_00, "food", date(2024, 2, 1)),
            expense(20_00, "rent", date(2024, 1, 10)),
        ]
    }

    fn budget(amount: i64) -> Budget {
        Budget {
            id: 7,
            user_id: 1,
            category: Some("food".to_string()),
            amount: Money::new(amount),
            period: "monthly".to_string(),
            start_date: date(2024, 1, 1),
            end_date: date(2024, 1, 31),
        }
    }

    #[test]
    fn category_totals_partition_the_total() {
        let expenses = sample();
        let totals = category_totals(&expenses).unwrap();

        assert_eq!(totals.get("food"), Some(&Money::new(15_00)));
        assert_eq!(totals.get("rent"), Some(&Money::new(20_00)));
        assert_eq!(
            Money::try_sum(totals.values().copied()).unwrap(),
            total(&expenses).unwrap()
        );
    }

    #[test]
    fn within_is_inclusive_on_both_ends() {
        let expenses = sample();
        let hits = within(&expenses, date(2024, 1, 5), date(2024, 1, 10));
        assert_eq!(hits.len(), 2);
        assert!(within(&expenses, date(2024, 1, 6), date(2024, 1, 9)).is_empty());
    }

    #[test]
    fn month_bounds_handle_short_and_leap_months() {
        assert_eq!(
            month_bounds(2024, 2).unwrap(),
            (date(2024, 2, 1), date(2024, 2, 29))
        );
        assert_eq!(
            month_bounds(2023, 12).unwrap(),
            (date(2023, 12, 1), date(2023, 12, 31))
        );
        assert!(matches!(
            month_bounds(2024, 13),
            Err(EngineError::InvalidDate(_))
        ));
        assert!(month_bounds(2024, 0).is_err());
    }

    #[test]
    fn monthly_report_for_january() {
        let report = MonthlyReport::from_expenses(&sample(), 2024, 1).unwrap();

        assert_eq!(report.total, Money::new(30_00));
        assert_eq!(report.expense_count, 2);
        assert_eq!(report.category_totals.get("food"), Some(&Money::new(10_00)));
        assert_eq!(report.category_totals.get("rent"), Some(&Money::new(20_00)));
    }

    #[test]
    fn yearly_report_buckets_every_month() {
        let mut expenses = sample();
        expenses.push(expense(99_00, "travel", date(2023, 12, 31)));

        let report = YearlyReport::from_expenses(&expenses, 2024).unwrap();

        assert_eq!(report.monthly_totals.len(), 12);
        assert_eq!(report.monthly_totals[&1], Money::new(30_00));
        assert_eq!(report.monthly_totals[&2], Money::new(5_00));
        assert_eq!(report.monthly_totals[&12], Money::ZERO);
        assert_eq!(report.expense_count, 3);
        assert_eq!(
            Money::try_sum(report.monthly_totals.values().copied()).unwrap(),
            report.total
        );
    }

    #[test]
    fn budget_status_half_spent() {
        let status = BudgetStatus::new(budget(20_00), Money::new(10_00)).unwrap();

        assert_eq!(status.remaining, Money::new(10_00));
        assert_eq!(status.percentage, 50.0);
    }

    #[test]
    fn budget_status_rounds_ratio_before_scaling() {
        // 1/3 -> 0.33 -> 33%
        let status = BudgetStatus::new(budget(3_00), Money::new(1_00)).unwrap();
        assert_eq!(status.percentage, 33.0);

        // 0.125 rounds half-up to 0.13
        let status = BudgetStatus::new(budget(8_00), Money::new(1_00)).unwrap();
        assert_eq!(status.percentage, 13.0);
    }

    #[test]
    fn budget_status_overspent_goes_negative() {
        let status = BudgetStatus::new(budget(10_00), Money::new(25_00)).unwrap();

        assert_eq!(status.remaining, Money::new(-15_00));
        assert_eq!(status.percentage, 250.0);
    }

    #[test]
    fn totals_past_i64_are_rejected() {
        let expenses = vec![
            expense(i64::MAX, "food", date(2024, 1, 5)),
            expense(1, "food", date(2024, 1, 6)),
        ];

        assert!(matches!(total(&expenses), Err(EngineError::InvalidAmount(_))));
        assert!(category_totals(&expenses).is_err());
        assert!(MonthlyReport::from_expenses(&expenses, 2024, 1).is_err());
        assert!(YearlyReport::from_expenses(&expenses, 2024).is_err());
    }

    #[test]
    fn budget_status_with_extreme_amounts() {
        let status = BudgetStatus::new(budget(1), Money::new(i64::MAX)).unwrap();
        assert_eq!(status.percentage, i64::MAX as f64 * 100.0);

        let err = BudgetStatus::new(budget(i64::MIN + 1), Money::new(2)).unwrap_err();
        assert!(matches!(err, EngineError::InvalidAmount(_)));
    }

    #[test]
    fn budget_status_rejects_zero_amount() {
        let err = BudgetStatus::new(budget(0), Money::new(1_00)).unwrap_err();
        assert!(matches!(err, EngineError::DivisionByZero(_)));
    }
}
