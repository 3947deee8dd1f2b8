//! Budget registry and budget status endpoints.
//!
//! Writes take their fields as query parameters; amounts arrive as decimal
//! text and dates as `YYYY-MM-DD`.

use api_types::{
    EmailQuery,
    budget::{
        ActiveBudgetQuery, BudgetListQuery, BudgetNew, BudgetStatusView, BudgetUpdate, BudgetView,
    },
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use engine::{Budget, BudgetFilter, BudgetStatus, Money, NewBudget};

use crate::{ServerError, server::ServerState};

fn map_budget(budget: Budget) -> BudgetView {
    BudgetView {
        id: budget.id,
        category: budget.category,
        amount: budget.amount.to_decimal(),
        period: budget.period,
        start_date: budget.start_date,
        end_date: budget.end_date,
    }
}

fn map_status(status: BudgetStatus) -> BudgetStatusView {
    BudgetStatusView {
        spent: status.spent.to_decimal(),
        remaining: status.remaining.to_decimal(),
        percentage: status.percentage,
        budget: map_budget(status.budget),
    }
}

pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<BudgetListQuery>,
) -> Result<Json<Vec<BudgetView>>, ServerError> {
    let filter = BudgetFilter {
        category: query.category,
        period: query.period,
    };
    let budgets = state.engine.budgets(&query.email, &filter).await?;
    Ok(Json(budgets.into_iter().map(map_budget).collect()))
}

pub async fn active(
    State(state): State<ServerState>,
    Query(query): Query<ActiveBudgetQuery>,
) -> Result<Json<Vec<BudgetView>>, ServerError> {
    let on = engine::parse_date(&query.date, "date")?;
    let budgets = state.engine.active_budgets(&query.email, on).await?;
    Ok(Json(budgets.into_iter().map(map_budget).collect()))
}

pub async fn create(
    State(state): State<ServerState>,
    Query(query): Query<BudgetNew>,
) -> Result<(StatusCode, Json<BudgetView>), ServerError> {
    let budget = NewBudget {
        category: query.category,
        amount: query.amount.parse::<Money>()?,
        period: query.period,
        start_date: engine::parse_date(&query.start_date, "startDate")?,
        end_date: engine::parse_date(&query.end_date, "endDate")?,
    };
    let budget = state.engine.create_budget(&query.email, budget).await?;
    Ok((StatusCode::CREATED, Json(map_budget(budget))))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(budget_id): Path<i32>,
    Query(query): Query<BudgetUpdate>,
) -> Result<Json<BudgetView>, ServerError> {
    let amount = query.amount.parse::<Money>()?;
    let start = engine::parse_date(&query.start_date, "startDate")?;
    let end = engine::parse_date(&query.end_date, "endDate")?;
    let budget = state
        .engine
        .update_budget(budget_id, amount, start, end)
        .await?;
    Ok(Json(map_budget(budget)))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(budget_id): Path<i32>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_budget(budget_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn status(
    State(state): State<ServerState>,
    Query(query): Query<EmailQuery>,
) -> Result<Json<Vec<BudgetStatusView>>, ServerError> {
    let statuses = state.engine.budget_status(&query.email).await?;
    Ok(Json(statuses.into_iter().map(map_status).collect()))
}
