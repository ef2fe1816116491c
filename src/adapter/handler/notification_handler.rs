use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use super::{AppState, ErrorResponse};
use crate::domain::entity::notification_category::NotificationCategory;
use crate::usecase::dispatch_notification::{DispatchOutcome, DispatchRequest};

#[derive(Debug, Deserialize)]
pub struct SendNotificationRequest {
    pub owner_id: Uuid,
    pub category: String,
    pub title: String,
    pub message: String,
    pub email_html: Option<String>,
}

/// POST /api/v1/stores/{store_id}/notifications
///
/// Ad hoc dispatch through the shared pipeline: the store's settings gate
/// and channel fallback apply exactly as they do for the sweeps.
pub async fn send_notification(
    State(state): State<AppState>,
    Path(store_id): Path<Uuid>,
    Json(req): Json<SendNotificationRequest>,
) -> impl IntoResponse {
    let category = match NotificationCategory::parse(&req.category) {
        Some(category) => category,
        None => {
            let err = ErrorResponse::new(
                "BLINK_NOTIF_INVALID_CATEGORY",
                &format!("unknown category: {}", req.category),
            );
            return (StatusCode::BAD_REQUEST, Json(err)).into_response();
        }
    };

    let request = DispatchRequest {
        store_id,
        owner_id: req.owner_id,
        category,
        title: req.title,
        message: req.message,
        line_message: None,
        email_html: req.email_html,
    };

    match state.dispatch_uc.execute(&request).await {
        Ok(DispatchOutcome::Delivered(channel)) => (
            StatusCode::CREATED,
            Json(serde_json::json!({
                "outcome": "delivered",
                "sent_via": channel.as_str(),
            })),
        )
            .into_response(),
        Ok(DispatchOutcome::Recorded) => (
            StatusCode::CREATED,
            Json(serde_json::json!({ "outcome": "recorded" })),
        )
            .into_response(),
        Ok(DispatchOutcome::Skipped) => (
            StatusCode::OK,
            Json(serde_json::json!({ "outcome": "skipped" })),
        )
            .into_response(),
        Err(e) => {
            let err = ErrorResponse::new("BLINK_NOTIF_SEND_FAILED", &e.to_string());
            (StatusCode::INTERNAL_SERVER_ERROR, Json(err)).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;
    use uuid::Uuid;

    use crate::adapter::handler::router;
    use crate::adapter::handler::testing::test_state;

    #[tokio::test]
    async fn unknown_category_is_a_bad_request() {
        let app = router(test_state());
        let store_id = Uuid::new_v4();

        let payload = serde_json::json!({
            "owner_id": Uuid::new_v4(),
            "category": "marketing_blast",
            "title": "t",
            "message": "m",
        });

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(format!("/api/v1/stores/{}/notifications", store_id))
                    .header("content-type", "application/json")
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
