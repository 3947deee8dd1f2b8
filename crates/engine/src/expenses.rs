//! The module contains the `Expense` type, a single recorded spend event.

use chrono::NaiveDate;
use sea_orm::{ActiveValue, entity::prelude::*};

use crate::Money;

/// A spend record owned by exactly one user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expense {
    pub id: i32,
    pub title: String,
    pub amount: Money,
    pub category: String,
    pub date: NaiveDate,
    pub user_id: i32,
}

/// Fields supplied when recording a new expense.
#[derive(Clone, Debug)]
pub struct NewExpense {
    pub title: String,
    pub amount: Money,
    pub category: String,
    pub date: NaiveDate,
}

/// Partial update of an expense. `None` leaves the stored value untouched.
#[derive(Clone, Debug, Default)]
pub struct ExpenseChanges {
    pub title: Option<String>,
    pub amount: Option<Money>,
    pub category: Option<String>,
    pub date: Option<NaiveDate>,
}

impl ExpenseChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.amount.is_none()
            && self.category.is_none()
            && self.date.is_none()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub amount_minor: i64,
    pub category: String,
    pub date: Date,
    pub user_id: i32,
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

impl From<Model> for Expense {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            amount: Money::new(model.amount_minor),
            category: model.category,
            date: model.date,
            user_id: model.user_id,
        }
    }
}

impl ActiveModel {
    pub(crate) fn for_user(user_id: i32, expense: &NewExpense) -> Self {
        Self {
            id: ActiveValue::NotSet,
            title: ActiveValue::Set(expense.title.clone()),
            amount_minor: ActiveValue::Set(expense.amount.minor()),
            category: ActiveValue::Set(expense.category.clone()),
            date: ActiveValue::Set(expense.date),
            user_id: ActiveValue::Set(user_id),
        }
    }
}
