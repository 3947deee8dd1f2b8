use std::collections::BTreeMap;

use crate::{
    BudgetFilter, BudgetStatus, Money, MonthlyReport, ResultEngine, User, YearlyReport, reports,
};

use super::{Engine, budgets::budgets_of, users::find_user};

impl Engine {
    /// Sum of every expense of the user; zero for unknown emails.
    pub async fn total_expense(&self, email: &str) -> ResultEngine<Money> {
        reports::total(&self.expenses(email).await?)
    }

    /// Spend per category; empty for unknown emails.
    pub async fn category_summary(&self, email: &str) -> ResultEngine<BTreeMap<String, Money>> {
        reports::category_totals(&self.expenses(email).await?)
    }

    /// Totals for one calendar month. Unknown emails get a zeroed report; an
    /// invalid month is rejected either way.
    pub async fn monthly_report(
        &self,
        email: &str,
        year: i32,
        month: u32,
    ) -> ResultEngine<MonthlyReport> {
        let (start, end) = reports::month_bounds(year, month)?;
        let expenses = self.expenses_between(email, start, end).await?;
        MonthlyReport::from_expenses(&expenses, year, month)
    }

    /// Totals for one calendar year with a per-month breakdown.
    pub async fn yearly_report(&self, email: &str, year: i32) -> ResultEngine<YearlyReport> {
        let (start, end) = reports::year_bounds(year)?;
        let expenses = self.expenses_between(email, start, end).await?;
        YearlyReport::from_expenses(&expenses, year)
    }

    /// Spent, remaining and percentage for each budget of the user.
    ///
    /// Fails with `DivisionByZero` if a stored budget has a zero amount.
    pub async fn budget_status(&self, email: &str) -> ResultEngine<Vec<BudgetStatus>> {
        let Some(model) = find_user(&self.database, email).await? else {
            return Ok(Vec::new());
        };
        let user = User::from(model);

        let budgets = budgets_of(&self.database, user.id, &BudgetFilter::default()).await?;
        let mut statuses = Vec::with_capacity(budgets.len());
        for budget in budgets {
            let spent = self
                .spent(
                    &user,
                    budget.category.as_deref(),
                    budget.start_date,
                    budget.end_date,
                )
                .await?;
            statuses.push(BudgetStatus::new(budget, spent)?);
        }
        Ok(statuses)
    }
}

