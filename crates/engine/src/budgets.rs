//! Budgets: a spending cap for one category (or overall) over a date window.
//!
//! The link between a budget and the expenses it covers is computed at query
//! time; nothing is stored on either side.

use chrono::NaiveDate;
use sea_orm::{ActiveValue, entity::prelude::*};

use crate::Money;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Budget {
    pub id: i32,
    pub user_id: i32,
    /// `None` means the budget covers every category.
    pub category: Option<String>,
    pub amount: Money,
    /// Free-form label such as `monthly` or `yearly`. Only stored.
    pub period: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Budget {
    /// Returns `true` if `date` falls inside the budget window (both ends
    /// inclusive).
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

#[derive(Clone, Debug)]
pub struct NewBudget {
    pub category: Option<String>,
    pub amount: Money,
    pub period: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Filters for listing budgets. Unset fields do not filter.
#[derive(Clone, Debug, Default)]
pub struct BudgetFilter {
    pub category: Option<String>,
    pub period: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "budgets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub category: Option<String>,
    pub amount_minor: i64,
    pub period: String,
    pub start_date: Date,
    pub end_date: Date,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Budget {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            category: model.category,
            amount: Money::new(model.amount_minor),
            period: model.period,
            start_date: model.start_date,
            end_date: model.end_date,
        }
    }
}

impl ActiveModel {
    pub(crate) fn for_user(user_id: i32, budget: &NewBudget) -> Self {
        Self {
            id: ActiveValue::NotSet,
            user_id: ActiveValue::Set(user_id),
            category: ActiveValue::Set(budget.category.clone()),
            amount_minor: ActiveValue::Set(budget.amount.minor()),
            period: ActiveValue::Set(budget.period.clone()),
            start_date: ActiveValue::Set(budget.start_date),
            end_date: ActiveValue::Set(budget.end_date),
        }
    }
}
