use axum::{
    Router,
    routing::{get, post, put},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use std::sync::Arc;

use crate::{auth, budgets, expenses};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

fn api_routes() -> Router<ServerState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/expenses", get(expenses::list).post(expenses::add))
        .route("/expenses/total", get(expenses::total))
        .route("/expenses/summary", get(expenses::summary))
        .route("/expenses/filter", get(expenses::filter))
        .route("/expenses/monthly-report", get(expenses::monthly_report))
        .route("/expenses/yearly-report", get(expenses::yearly_report))
        .route(
            "/expenses/{id}",
            put(expenses::update).delete(expenses::delete),
        )
        .route("/budgets", get(budgets::list).post(budgets::create))
        .route("/budgets/status", get(budgets::status))
        .route("/budgets/active", get(budgets::active))
        .route("/budgets/{id}", put(budgets::update).delete(budgets::delete))
}

fn router(state: ServerState) -> Router {
    Router::new()
        .nest("/api", api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Builds the full application router around `engine`.
pub fn app(engine: Engine) -> Router {
    router(ServerState {
        engine: Arc::new(engine),
    })
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app(engine)).await
}
