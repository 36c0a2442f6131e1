//! Readiness endpoint

use axum::{Router, extract::State, response::IntoResponse, routing::get};
use axum_helpers::run_health_checks;
use database::postgres::check_health;
use sea_orm::DatabaseConnection;

async fn ready(State(db): State<DatabaseConnection>) -> impl IntoResponse {
    run_health_checks(vec![(
        "database",
        Box::pin(async move { check_health(&db).await.map_err(|e| e.to_string()) }),
    )])
    .await
}

/// `GET /ready`: 200 when the database answers, 503 otherwise.
pub fn router(db: DatabaseConnection) -> Router {
    Router::new().route("/ready", get(ready)).with_state(db)
}
