use chrono::NaiveDate;
use sea_orm::{
    ActiveValue, ConnectionTrait, QueryFilter, QueryOrder, TransactionTrait, prelude::*,
};

use crate::{
    Budget, BudgetFilter, EngineError, Money, NewBudget, ResultEngine, budgets,
    util::{normalize_optional_text, normalize_required_text, validate_budget_fields},
};

use super::{Engine, users::find_user, with_tx};

impl Engine {
    /// Budgets of a user, optionally narrowed by category and/or period.
    /// Unknown emails yield an empty list.
    pub async fn budgets(&self, email: &str, filter: &BudgetFilter) -> ResultEngine<Vec<Budget>> {
        let Some(user) = find_user(&self.database, email).await? else {
            return Ok(Vec::new());
        };
        budgets_of(&self.database, user.id, filter).await
    }

    /// Budgets whose window contains `on`.
    pub async fn active_budgets(&self, email: &str, on: NaiveDate) -> ResultEngine<Vec<Budget>> {
        let Some(user) = find_user(&self.database, email).await? else {
            return Ok(Vec::new());
        };
        let budgets = budgets_of(&self.database, user.id, &BudgetFilter::default()).await?;
        Ok(budgets
            .into_iter()
            .filter(|budget| budget.covers(on))
            .collect())
    }

    /// Creates a budget. A blank category is stored as `None`, i.e. an
    /// overall budget.
    pub async fn create_budget(&self, email: &str, budget: NewBudget) -> ResultEngine<Budget> {
        validate_budget_fields(budget.amount, budget.start_date, budget.end_date)?;
        let budget = NewBudget {
            category: normalize_optional_text(budget.category.as_deref()),
            period: normalize_required_text(&budget.period, "period")?,
            ..budget
        };

        let user = self.require_user(email).await?;
        let model = budgets::ActiveModel::for_user(user.id, &budget)
            .insert(&self.database)
            .await?;

        tracing::debug!(budget_id = model.id, user_id = user.id, "created budget");
        Ok(model.into())
    }

    /// Replaces amount and window of an existing budget.
    pub async fn update_budget(
        &self,
        budget_id: i32,
        amount: Money,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> ResultEngine<Budget> {
        validate_budget_fields(amount, start_date, end_date)?;

        with_tx!(self, |db_tx| {
            let model = budgets::Entity::find_by_id(budget_id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound("budget".to_string()))?;

            let mut active: budgets::ActiveModel = model.into();
            active.amount_minor = ActiveValue::Set(amount.minor());
            active.start_date = ActiveValue::Set(start_date);
            active.end_date = ActiveValue::Set(end_date);

            let updated = active.update(&db_tx).await?;
            Ok::<_, EngineError>(Budget::from(updated))
        })
    }

    /// Removes a budget. Deleting an id that does not exist is a no-op.
    pub async fn delete_budget(&self, budget_id: i32) -> ResultEngine<()> {
        let result = budgets::Entity::delete_by_id(budget_id)
            .exec(&self.database)
            .await?;
        if result.rows_affected == 0 {
            tracing::debug!(budget_id, "budget already absent");
        }
        Ok(())
    }
}

pub(super) async fn budgets_of<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
    filter: &BudgetFilter,
) -> ResultEngine<Vec<Budget>> {
    let mut query = budgets::Entity::find().filter(budgets::Column::UserId.eq(user_id));
    if let Some(category) = normalize_optional_text(filter.category.as_deref()) {
        query = query.filter(budgets::Column::Category.eq(category));
    }
    if let Some(period) = normalize_optional_text(filter.period.as_deref()) {
        query = query.filter(budgets::Column::Period.eq(period));
    }

    Ok(query
        .order_by_asc(budgets::Column::Id)
        .all(db)
        .await?
        .into_iter()
        .map(Budget::from)
        .collect())
}
