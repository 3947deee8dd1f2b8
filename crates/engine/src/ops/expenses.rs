use chrono::NaiveDate;
use sea_orm::{
    ActiveValue, ConnectionTrait, QueryFilter, QueryOrder, TransactionTrait, prelude::*,
};

use crate::{
    EngineError, Expense, ExpenseChanges, Money, NewExpense, ResultEngine, User, expenses,
    util::{normalize_required_text, validate_expense_amount},
};

use super::{Engine, users::find_user, with_tx};

impl Engine {
    /// Records an expense for the user owning `email`.
    pub async fn add_expense(&self, email: &str, expense: NewExpense) -> ResultEngine<Expense> {
        let expense = NewExpense {
            title: normalize_required_text(&expense.title, "title")?,
            category: normalize_required_text(&expense.category, "category")?,
            ..expense
        };
        validate_expense_amount(expense.amount)?;

        let user = self.require_user(email).await?;
        let model = expenses::ActiveModel::for_user(user.id, &expense)
            .insert(&self.database)
            .await?;

        tracing::debug!(expense_id = model.id, user_id = user.id, "added expense");
        Ok(model.into())
    }

    /// All expenses of a user in insertion order. Unknown emails yield an
    /// empty list.
    pub async fn expenses(&self, email: &str) -> ResultEngine<Vec<Expense>> {
        let Some(user) = find_user(&self.database, email).await? else {
            return Ok(Vec::new());
        };
        expenses_of(&self.database, user.id, None, None).await
    }

    /// Expenses dated inside `[start, end]`. Unknown emails yield an empty
    /// list.
    pub async fn expenses_between(
        &self,
        email: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> ResultEngine<Vec<Expense>> {
        let Some(user) = find_user(&self.database, email).await? else {
            return Ok(Vec::new());
        };
        expenses_of(&self.database, user.id, None, Some((start, end))).await
    }

    /// Overwrites the fields present in `changes`.
    pub async fn update_expense(
        &self,
        expense_id: i32,
        changes: ExpenseChanges,
    ) -> ResultEngine<Expense> {
        if changes.is_empty() {
            return Err(EngineError::InvalidInput(
                "provide at least one of title, amount, category or date".to_string(),
            ));
        }
        let title = changes
            .title
            .as_deref()
            .map(|title| normalize_required_text(title, "title"))
            .transpose()?;
        let category = changes
            .category
            .as_deref()
            .map(|category| normalize_required_text(category, "category"))
            .transpose()?;
        if let Some(amount) = changes.amount {
            validate_expense_amount(amount)?;
        }

        with_tx!(self, |db_tx| {
            let model = expenses::Entity::find_by_id(expense_id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound("expense".to_string()))?;

            let mut active: expenses::ActiveModel = model.into();
            if let Some(title) = title {
                active.title = ActiveValue::Set(title);
            }
            if let Some(amount) = changes.amount {
                active.amount_minor = ActiveValue::Set(amount.minor());
            }
            if let Some(category) = category {
                active.category = ActiveValue::Set(category);
            }
            if let Some(date) = changes.date {
                active.date = ActiveValue::Set(date);
            }

            let updated = active.update(&db_tx).await?;
            Ok::<_, EngineError>(Expense::from(updated))
        })
    }

    pub async fn delete_expense(&self, expense_id: i32) -> ResultEngine<()> {
        let result = expenses::Entity::delete_by_id(expense_id)
            .exec(&self.database)
            .await?;
        if result.rows_affected == 0 {
            return Err(EngineError::KeyNotFound("expense".to_string()));
        }
        tracing::debug!(expense_id, "deleted expense");
        Ok(())
    }

    /// Total spent by `user` over `[start, end]`, optionally restricted to one
    /// category. `None` sums every category; no matching rows sum to zero. A
    /// sum past the `Money` range is an `InvalidAmount` error.
    pub async fn spent(
        &self,
        user: &User,
        category: Option<&str>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> ResultEngine<Money> {
        let rows = expenses_of(&self.database, user.id, category, Some((start, end))).await?;
        Money::try_sum(rows.iter().map(|expense| expense.amount))
    }
}

/// Loads a user's expenses, filtered by category and inclusive date window
/// when given.
async fn expenses_of<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
    category: Option<&str>,
    window: Option<(NaiveDate, NaiveDate)>,
) -> ResultEngine<Vec<Expense>> {
    let mut query = expenses::Entity::find().filter(expenses::Column::UserId.eq(user_id));
    if let Some(category) = category {
        query = query.filter(expenses::Column::Category.eq(category));
    }
    if let Some((start, end)) = window {
        query = query
            .filter(expenses::Column::Date.gte(start))
            .filter(expenses::Column::Date.lte(end));
    }

    Ok(query
        .order_by_asc(expenses::Column::Id)
        .all(db)
        .await?
        .into_iter()
        .map(Expense::from)
        .collect())
}
