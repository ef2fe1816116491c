use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use super::{AppState, ErrorResponse};
use crate::usecase::update_notification_settings::{
    UpdateNotificationSettingsError, UpdateNotificationSettingsInput,
};

/// GET /api/v1/stores/{store_id}/notifications/settings
pub async fn get_settings(
    State(state): State<AppState>,
    Path(store_id): Path<Uuid>,
) -> impl IntoResponse {
    match state.get_settings_uc.execute(&store_id).await {
        Ok(settings) => (StatusCode::OK, Json(settings)).into_response(),
        Err(e) => {
            let err = ErrorResponse::new("BLINK_NOTIF_SETTINGS_READ_FAILED", &e.to_string());
            (StatusCode::INTERNAL_SERVER_ERROR, Json(err)).into_response()
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateSettingsRequest {
    pub reminder_before_visit: bool,
    pub reminder_before_visit_days: i32,
    pub journal_notification: bool,
    pub vaccine_alert: bool,
    pub vaccine_alert_days: i32,
    pub line_notification_enabled: bool,
    pub email_notification_enabled: bool,
}

/// PUT /api/v1/stores/{store_id}/notifications/settings
pub async fn update_settings(
    State(state): State<AppState>,
    Path(store_id): Path<Uuid>,
    Json(req): Json<UpdateSettingsRequest>,
) -> impl IntoResponse {
    let input = UpdateNotificationSettingsInput {
        store_id,
        reminder_before_visit: req.reminder_before_visit,
        reminder_before_visit_days: req.reminder_before_visit_days,
        journal_notification: req.journal_notification,
        vaccine_alert: req.vaccine_alert,
        vaccine_alert_days: req.vaccine_alert_days,
        line_notification_enabled: req.line_notification_enabled,
        email_notification_enabled: req.email_notification_enabled,
    };

    match state.update_settings_uc.execute(&input).await {
        Ok(settings) => (StatusCode::OK, Json(settings)).into_response(),
        Err(UpdateNotificationSettingsError::InvalidLeadDays(days)) => {
            let err = ErrorResponse::new(
                "BLINK_NOTIF_INVALID_LEAD_DAYS",
                &format!("lead days must not be negative, got {}", days),
            );
            (StatusCode::BAD_REQUEST, Json(err)).into_response()
        }
        Err(e) => {
            let err = ErrorResponse::new("BLINK_NOTIF_SETTINGS_UPDATE_FAILED", &e.to_string());
            (StatusCode::INTERNAL_SERVER_ERROR, Json(err)).into_response()
        }
    }
}
