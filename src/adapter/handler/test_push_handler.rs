use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use super::{AppState, ErrorResponse};
use crate::usecase::send_test_push::{SendTestPushError, SendTestPushInput};

#[derive(Debug, Default, Deserialize)]
pub struct TestPushRequest {
    pub owner_id: Option<Uuid>,
}

/// POST /api/v1/stores/{store_id}/notifications/test-line
pub async fn send_test_push(
    State(state): State<AppState>,
    Path(store_id): Path<Uuid>,
    Json(req): Json<TestPushRequest>,
) -> impl IntoResponse {
    let input = SendTestPushInput {
        store_id,
        owner_id: req.owner_id,
    };

    match state.send_test_push_uc.execute(&input).await {
        Ok(output) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "ok": true,
                "owner_id": output.owner_id.to_string(),
            })),
        )
            .into_response(),
        Err(e) => {
            let msg = e.to_string();
            match e {
                SendTestPushError::NoLinkedOwner(_) => {
                    let err = ErrorResponse::new("BLINK_NOTIF_NO_LINKED_OWNER", &msg);
                    (StatusCode::NOT_FOUND, Json(err)).into_response()
                }
                SendTestPushError::OwnerNotLinked(_) => {
                    let err = ErrorResponse::new("BLINK_NOTIF_OWNER_NOT_LINKED", &msg);
                    (StatusCode::BAD_REQUEST, Json(err)).into_response()
                }
                SendTestPushError::CredentialsMissing(_) => {
                    let err = ErrorResponse::new("BLINK_NOTIF_CREDENTIALS_MISSING", &msg);
                    (StatusCode::BAD_REQUEST, Json(err)).into_response()
                }
                SendTestPushError::PushFailed(_) => {
                    let err = ErrorResponse::new("BLINK_NOTIF_PUSH_FAILED", &msg);
                    (StatusCode::BAD_GATEWAY, Json(err)).into_response()
                }
                SendTestPushError::Internal(_) => {
                    let err = ErrorResponse::new("BLINK_NOTIF_TEST_PUSH_FAILED", &msg);
                    (StatusCode::INTERNAL_SERVER_ERROR, Json(err)).into_response()
                }
            }
        }
    }
}
