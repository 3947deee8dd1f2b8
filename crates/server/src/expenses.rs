//! Expense ledger and report endpoints.

use std::collections::BTreeMap;

use api_types::{
    EmailQuery,
    expense::{
        DateRangeQuery, ExpenseCreated, ExpenseNew, ExpenseUpdate, ExpenseView, MonthlyReport,
        MonthlyReportQuery, YearlyReport, YearlyReportQuery,
    },
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use engine::{Expense, ExpenseChanges, Money, NewExpense};

use crate::{ServerError, failure, server::ServerState};

pub(crate) fn map_expense(expense: Expense) -> ExpenseView {
    ExpenseView {
        id: expense.id,
        title: expense.title,
        amount: expense.amount.to_decimal(),
        category: expense.category,
        date: expense.date,
    }
}

fn decimal_map<K: Ord>(totals: BTreeMap<K, Money>) -> BTreeMap<K, f64> {
    totals
        .into_iter()
        .map(|(key, amount)| (key, amount.to_decimal()))
        .collect()
}

pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<EmailQuery>,
) -> Result<Json<Vec<ExpenseView>>, ServerError> {
    let expenses = state.engine.expenses(&query.email).await?;
    Ok(Json(expenses.into_iter().map(map_expense).collect()))
}

/// Adds an expense. Failures still answer with an `ExpenseCreated` body so
/// clients can show the message.
pub async fn add(
    State(state): State<ServerState>,
    Query(query): Query<EmailQuery>,
    Json(payload): Json<ExpenseNew>,
) -> (StatusCode, Json<ExpenseCreated>) {
    let added = match Money::from_decimal(payload.amount) {
        Ok(amount) => {
            let expense = NewExpense {
                title: payload.title,
                amount,
                category: payload.category,
                date: payload.date,
            };
            state.engine.add_expense(&query.email, expense).await
        }
        Err(err) => Err(err),
    };

    match added {
        Ok(expense) => (
            StatusCode::CREATED,
            Json(ExpenseCreated {
                message: "Expense added successfully".to_string(),
                success: true,
                expense: Some(map_expense(expense)),
            }),
        ),
        Err(err) => {
            let (status, message) = failure(err);
            (
                status,
                Json(ExpenseCreated {
                    message,
                    success: false,
                    expense: None,
                }),
            )
        }
    }
}

pub async fn update(
    State(state): State<ServerState>,
    Path(expense_id): Path<i32>,
    Json(payload): Json<ExpenseUpdate>,
) -> Result<String, ServerError> {
    let changes = ExpenseChanges {
        title: payload.title,
        amount: payload.amount.map(Money::from_decimal).transpose()?,
        category: payload.category,
        date: payload.date,
    };
    state.engine.update_expense(expense_id, changes).await?;
    Ok("Expense updated successfully".to_string())
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(expense_id): Path<i32>,
) -> Result<String, ServerError> {
    state.engine.delete_expense(expense_id).await?;
    Ok("Expense deleted successfully".to_string())
}

pub async fn total(
    State(state): State<ServerState>,
    Query(query): Query<EmailQuery>,
) -> Result<Json<f64>, ServerError> {
    let total = state.engine.total_expense(&query.email).await?;
    Ok(Json(total.to_decimal()))
}

pub async fn summary(
    State(state): State<ServerState>,
    Query(query): Query<EmailQuery>,
) -> Result<Json<BTreeMap<String, f64>>, ServerError> {
    let summary = state.engine.category_summary(&query.email).await?;
    Ok(Json(decimal_map(summary)))
}

pub async fn filter(
    State(state): State<ServerState>,
    Query(query): Query<DateRangeQuery>,
) -> Result<Json<Vec<ExpenseView>>, ServerError> {
    let start = engine::parse_date(&query.start_date, "startDate")?;
    let end = engine::parse_date(&query.end_date, "endDate")?;
    let expenses = state
        .engine
        .expenses_between(&query.email, start, end)
        .await?;
    Ok(Json(expenses.into_iter().map(map_expense).collect()))
}

pub async fn monthly_report(
    State(state): State<ServerState>,
    Query(query): Query<MonthlyReportQuery>,
) -> Result<Json<MonthlyReport>, ServerError> {
    let report = state
        .engine
        .monthly_report(&query.email, query.year, query.month)
        .await?;
    Ok(Json(MonthlyReport {
        total: report.total.to_decimal(),
        category_totals: decimal_map(report.category_totals),
        expense_count: report.expense_count,
    }))
}

pub async fn yearly_report(
    State(state): State<ServerState>,
    Query(query): Query<YearlyReportQuery>,
) -> Result<Json<YearlyReport>, ServerError> {
    let report = state.engine.yearly_report(&query.email, query.year).await?;
    Ok(Json(YearlyReport {
        total: report.total.to_decimal(),
        monthly_totals: decimal_map(report.monthly_totals),
        expense_count: report.expense_count,
    }))
}
