//! Spend-tracking engine.
//!
//! The [`Engine`] owns the database connection and exposes the account
//! directory, the expense ledger, the budget registry and the reports derived
//! from them. It holds no other state: every call reads from and writes to
//! the database.

pub use budgets::{Budget, BudgetFilter, NewBudget};
pub use error::EngineError;
pub use expenses::{Expense, ExpenseChanges, NewExpense};
pub use money::Money;
pub use ops::{Engine, EngineBuilder};
pub use reports::{BudgetStatus, MonthlyReport, YearlyReport};
pub use users::User;
pub use util::parse_date;

mod budgets;
mod error;
mod expenses;
mod money;
mod ops;
mod password;
pub mod reports;
mod users;
mod util;

type ResultEngine<T> = Result<T, EngineError>;
