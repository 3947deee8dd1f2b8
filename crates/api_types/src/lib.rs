//! Request and response bodies of the HTTP API.
//!
//! Keys are camelCase on the wire. Money travels as a decimal number of
//! major units (`12.5` is twelve and a half); the server converts to exact
//! minor units and rejects more than two fractional digits.

use serde::{Deserialize, Serialize};

/// Generic `{message, success}` acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResponse {
    pub message: String,
    pub success: bool,
}

impl ActionResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: true,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: false,
        }
    }
}

/// `?email=` query used by most read endpoints.
#[derive(Debug, Serialize, Deserialize)]
pub struct EmailQuery {
    pub email: String,
}

pub mod auth {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Register {
        pub email: String,
        pub password: String,
        /// Display name; the email local part is used when missing.
        pub name: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Login {
        pub email: String,
        pub password: String,
    }
}

pub mod expense {
    use std::collections::BTreeMap;

    use chrono::NaiveDate;

    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ExpenseView {
        pub id: i32,
        pub title: String,
        pub amount: f64,
        pub category: String,
        pub date: NaiveDate,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ExpenseNew {
        pub title: String,
        pub amount: f64,
        pub category: String,
        pub date: NaiveDate,
    }

    /// Partial update: absent fields keep their stored value.
    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ExpenseUpdate {
        pub title: Option<String>,
        pub amount: Option<f64>,
        pub category: Option<String>,
        pub date: Option<NaiveDate>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseCreated {
        pub message: String,
        pub success: bool,
        pub expense: Option<ExpenseView>,
    }

    /// `?email=&startDate=&endDate=`; dates are parsed by the server so
    /// malformed input gets a descriptive error.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct DateRangeQuery {
        pub email: String,
        pub start_date: String,
        pub end_date: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct MonthlyReportQuery {
        pub email: String,
        pub year: i32,
        pub month: u32,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct YearlyReportQuery {
        pub email: String,
        pub year: i32,
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct MonthlyReport {
        pub total: f64,
        pub category_totals: BTreeMap<String, f64>,
        pub expense_count: usize,
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct YearlyReport {
        pub total: f64,
        /// Keyed by month number, `1..=12`.
        pub monthly_totals: BTreeMap<u32, f64>,
        pub expense_count: usize,
    }
}

pub mod budget {
    use chrono::NaiveDate;

    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct BudgetView {
        pub id: i32,
        /// `null` for an overall budget.
        pub category: Option<String>,
        pub amount: f64,
        pub period: String,
        pub start_date: NaiveDate,
        pub end_date: NaiveDate,
    }

    /// `GET /budgets` query.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetListQuery {
        pub email: String,
        pub category: Option<String>,
        pub period: Option<String>,
    }

    /// `GET /budgets/active` query.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ActiveBudgetQuery {
        pub email: String,
        pub date: String,
    }

    /// `POST /budgets` query parameters. `amount` is decimal text such as
    /// `20.50`.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct BudgetNew {
        pub email: String,
        pub category: Option<String>,
        pub amount: String,
        pub period: String,
        pub start_date: String,
        pub end_date: String,
    }

    /// `PUT /budgets/{id}` query parameters.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct BudgetUpdate {
        pub amount: String,
        pub start_date: String,
        pub end_date: String,
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct BudgetStatusView {
        pub budget: BudgetView,
        pub spent: f64,
        pub remaining: f64,
        pub percentage: f64,
    }
}
