use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapter::handler::AppState;

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

pub async fn readyz(State(state): State<AppState>) -> impl IntoResponse {
    if let Some(ref pool) = state.db_pool {
        match sqlx::query("SELECT 1").execute(pool.as_ref()).await {
            Ok(_) => (StatusCode::OK, "ready"),
            Err(_) => (StatusCode::SERVICE_UNAVAILABLE, "database not ready"),
        }
    } else {
        (StatusCode::OK, "ready")
    }
}
