use axum::{
    body::Body,
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use secrecy::{ExposeSecret, SecretString};

/// ApiAuthState は REST API の認証ミドルウェアが使用する共有状態。
#[derive(Clone)]
pub struct ApiAuthState {
    pub api_token: SecretString,
}

/// api_auth_middleware は Bearer トークンを静的 API トークンと照合する。
pub async fn api_auth_middleware(
    State(state): State<ApiAuthState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let token = match extract_bearer_token(&req) {
        Some(t) => t,
        None => {
            return (
                StatusCode::UNAUTHORIZED,
                Json(serde_json::json!({
                    "error": {
                        "code": "BLINK_AUTH_MISSING_TOKEN",
                        "message": "Authorization header with Bearer token is required"
                    }
                })),
            )
                .into_response();
        }
    };

    if token == *state.api_token.expose_secret() {
        next.run(req).await
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({
                "error": {
                    "code": "BLINK_AUTH_TOKEN_INVALID",
                    "message": "Token validation failed"
                }
            })),
        )
            .into_response()
    }
}

pub fn extract_bearer_token(req: &Request<Body>) -> Option<String> {
    let auth_header = req.headers().get(axum::http::header::AUTHORIZATION)?;
    let auth_str = auth_header.to_str().ok()?;
    let token = auth_str.strip_prefix("Bearer ")?;
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}
