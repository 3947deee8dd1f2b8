use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

use serde::Serialize;
pub use server::{ServerState, app, run_with_listener};

mod auth;
mod budgets;
mod expenses;
mod server;

pub mod types {
    pub use api_types::{ActionResponse, EmailQuery};

    pub mod auth {
        pub use api_types::auth::{Login, Register};
    }

    pub mod expense {
        pub use api_types::expense::{
            DateRangeQuery, ExpenseCreated, ExpenseNew, ExpenseUpdate, ExpenseView,
            MonthlyReport, MonthlyReportQuery, YearlyReport, YearlyReportQuery,
        };
    }

    pub mod budget {
        pub use api_types::budget::{
            ActiveBudgetQuery, BudgetListQuery, BudgetNew, BudgetStatusView, BudgetUpdate,
            BudgetView,
        };
    }
}

/// Engine error on its way out of a handler.
pub struct ServerError(EngineError);

#[derive(Serialize)]
struct Error {
    error: String,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::ExistingKey(_) => StatusCode::CONFLICT,
        EngineError::InvalidCredential => StatusCode::UNAUTHORIZED,
        EngineError::DivisionByZero(_) => StatusCode::UNPROCESSABLE_ENTITY,
        err if err.is_validation() => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        EngineError::Password(detail) => {
            tracing::error!("password backend error: {detail}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

/// Status code and user-facing message for an engine error. Internal
/// failures are logged here and masked.
pub(crate) fn failure(err: EngineError) -> (StatusCode, String) {
    (status_for_engine_error(&err), message_for_engine_error(err))
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = failure(self.0);
        (status, Json(Error { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self(value)
    }
}
