//! Readiness endpoint

use axum::{
    Router,
    extract::State,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{HealthCheckFuture, run_health_checks};

use crate::state::AppState;

/// Create a readiness router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(readiness_check))
        .with_state(state)
}

/// Readiness check - pings MongoDB and opens a test SMTP connection
async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    let mongo: HealthCheckFuture<'_> = Box::pin(async {
        let status = database::mongodb::check_health_detailed(&state.mongo_client).await;
        match status.message {
            None => Ok(()),
            Some(message) => Err(message),
        }
    });

    let smtp: HealthCheckFuture<'_> =
        Box::pin(async { state.notifier.health_check().await.map_err(|e| e.to_string()) });

    run_health_checks(vec![("mongodb", mongo), ("smtp", smtp)]).await
}
