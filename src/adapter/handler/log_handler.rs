use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use super::{AppState, ErrorResponse};
use crate::domain::entity::notification_category::NotificationCategory;
use crate::domain::entity::notification_log::DeliveryStatus;
use crate::domain::repository::notification_log_repository::NotificationLogFilter;
use crate::usecase::list_notification_logs::ListNotificationLogsInput;

#[derive(Debug, Deserialize)]
pub struct ListLogsParams {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub notification_type: Option<String>,
    pub status: Option<String>,
}

/// GET /api/v1/stores/{store_id}/notifications/logs
pub async fn list_logs(
    State(state): State<AppState>,
    Path(store_id): Path<Uuid>,
    Query(params): Query<ListLogsParams>,
) -> impl IntoResponse {
    let notification_type = match params.notification_type.as_deref() {
        Some(raw) => match NotificationCategory::parse(raw) {
            Some(category) => Some(category),
            None => {
                let err = ErrorResponse::new(
                    "BLINK_NOTIF_INVALID_FILTER",
                    &format!("unknown notification_type: {}", raw),
                );
                return (StatusCode::BAD_REQUEST, Json(err)).into_response();
            }
        },
        None => None,
    };

    let status = match params.status.as_deref() {
        Some(raw) => match DeliveryStatus::parse(raw) {
            Some(status) => Some(status),
            None => {
                let err = ErrorResponse::new(
                    "BLINK_NOTIF_INVALID_FILTER",
                    &format!("unknown status: {}", raw),
                );
                return (StatusCode::BAD_REQUEST, Json(err)).into_response();
            }
        },
        None => None,
    };

    let input = ListNotificationLogsInput {
        store_id,
        page: params.page,
        per_page: params.per_page,
        filter: NotificationLogFilter {
            notification_type,
            status,
        },
    };

    match state.list_logs_uc.execute(&input).await {
        Ok(output) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "logs": output.logs,
                "total": output.total,
                "page": output.page,
                "per_page": output.per_page,
            })),
        )
            .into_response(),
        Err(e) => {
            let err = ErrorResponse::new("BLINK_NOTIF_LIST_FAILED", &e.to_string());
            (StatusCode::INTERNAL_SERVER_ERROR, Json(err)).into_response()
        }
    }
}
