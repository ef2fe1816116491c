use std::time::Instant;

use axum::{
    body::Body,
    extract::{Request, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use secrecy::ExposeSecret;
use tracing::{error, info};

use super::AppState;
use crate::adapter::middleware::auth::extract_bearer_token;
use crate::usecase::SweepSummary;

fn summary_json(summary: &SweepSummary) -> serde_json::Value {
    serde_json::json!({
        "stores": summary.stores,
        "dispatched": summary.dispatched,
        "failed": summary.failed,
    })
}

/// GET /api/v1/cron/notifications
///
/// Entry point for the external scheduler. Authenticated with the cron
/// secret rather than the API token, so the scheduler needs no other
/// privileges. Runs both daily sweeps and reports per-sweep counters.
pub async fn run_notifications(State(state): State<AppState>, req: Request<Body>) -> impl IntoResponse {
    let authorized = extract_bearer_token(&req)
        .is_some_and(|token| token == *state.cron_secret.expose_secret());
    if !authorized {
        return (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({
                "error": {
                    "code": "BLINK_AUTH_CRON_INVALID",
                    "message": "cron secret is missing or invalid"
                }
            })),
        )
            .into_response();
    }

    // Stores operate on the JST calendar date.
    let today = (chrono::Utc::now() + chrono::Duration::hours(9)).date_naive();
    let started = Instant::now();

    let reminders = match state.reminder_sweep.execute(today).await {
        Ok(summary) => summary,
        Err(e) => {
            error!(error = %e, "reservation reminder sweep failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "ok": false, "error": e.to_string() })),
            )
                .into_response();
        }
    };

    let vaccines = match state.vaccine_sweep.execute(today).await {
        Ok(summary) => summary,
        Err(e) => {
            error!(error = %e, "vaccine alert sweep failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "ok": false, "error": e.to_string() })),
            )
                .into_response();
        }
    };

    let duration_ms = started.elapsed().as_millis() as u64;
    info!(
        %today,
        duration_ms,
        reminder_dispatched = reminders.dispatched,
        vaccine_dispatched = vaccines.dispatched,
        "cron notification run finished"
    );

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "ok": true,
            "duration_ms": duration_ms,
            "reminders": summary_json(&reminders),
            "vaccines": summary_json(&vaccines),
        })),
    )
        .into_response()
}
