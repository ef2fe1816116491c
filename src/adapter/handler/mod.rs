pub mod cron_handler;
pub mod health;
pub mod log_handler;
pub mod notification_handler;
pub mod settings_handler;
pub mod test_push_handler;

use std::sync::Arc;

use axum::routing::{get, post, put};
use axum::Router;
use secrecy::SecretString;
use serde::Serialize;
use sqlx::PgPool;
use tower_http::trace::TraceLayer;

use crate::adapter::middleware::auth::{api_auth_middleware, ApiAuthState};
use crate::usecase::{
    DispatchNotificationUseCase, GetNotificationSettingsUseCase, ListNotificationLogsUseCase,
    ReservationReminderSweep, SendTestPushUseCase, UpdateNotificationSettingsUseCase,
    VaccineAlertSweep,
};

/// Shared application state for REST handlers.
#[derive(Clone)]
pub struct AppState {
    pub get_settings_uc: Arc<GetNotificationSettingsUseCase>,
    pub update_settings_uc: Arc<UpdateNotificationSettingsUseCase>,
    pub list_logs_uc: Arc<ListNotificationLogsUseCase>,
    pub send_test_push_uc: Arc<SendTestPushUseCase>,
    pub dispatch_uc: Arc<DispatchNotificationUseCase>,
    pub reminder_sweep: Arc<ReservationReminderSweep>,
    pub vaccine_sweep: Arc<VaccineAlertSweep>,
    pub cron_secret: SecretString,
    pub db_pool: Option<Arc<PgPool>>,
    pub auth_state: Option<ApiAuthState>,
}

impl AppState {
    pub fn with_auth(mut self, auth_state: ApiAuthState) -> Self {
        self.auth_state = Some(auth_state);
        self
    }
}

/// Build the REST API router.
///
/// The cron route sits outside the API token middleware: the scheduler
/// authenticates with its own secret, checked inside the handler.
pub fn router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/healthz", get(health::healthz))
        .route("/readyz", get(health::readyz))
        .route(
            "/api/v1/cron/notifications",
            get(cron_handler::run_notifications),
        );

    let api_routes = Router::new()
        .route(
            "/api/v1/stores/{store_id}/notifications/settings",
            get(settings_handler::get_settings),
        )
        .route(
            "/api/v1/stores/{store_id}/notifications/settings",
            put(settings_handler::update_settings),
        )
        .route(
            "/api/v1/stores/{store_id}/notifications/logs",
            get(log_handler::list_logs),
        )
        .route(
            "/api/v1/stores/{store_id}/notifications/test-line",
            post(test_push_handler::send_test_push),
        )
        .route(
            "/api/v1/stores/{store_id}/notifications",
            post(notification_handler::send_notification),
        );

    let api_routes = if let Some(ref auth_state) = state.auth_state {
        api_routes.layer(axum::middleware::from_fn_with_state(
            auth_state.clone(),
            api_auth_middleware,
        ))
    } else {
        api_routes
    };

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: &str, message: &str) -> Self {
        Self {
            error: ErrorBody {
                code: code.to_string(),
                message: message.to_string(),
            },
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    use crate::domain::repository::dog_repository::MockDogRepository;
    use crate::domain::repository::notification_log_repository::MockNotificationLogRepository;
    use crate::domain::repository::notification_settings_repository::MockNotificationSettingsRepository;
    use crate::domain::repository::owner_contact_repository::MockOwnerContactRepository;
    use crate::domain::repository::reservation_repository::MockReservationRepository;
    use crate::domain::repository::NotificationSettingsRepository;
    use crate::domain::service::channel_sender::{MockEmailSender, MockLineSender};
    use crate::usecase::dispatch_notification::RetryPolicy;

    /// State wired from expectation-free mocks. Tests that need behavior
    /// swap in their own mocks via `state_with_settings_repo`.
    pub(crate) fn test_state() -> AppState {
        state_with_settings_repo(Arc::new(MockNotificationSettingsRepository::new()))
    }

    pub(crate) fn state_with_settings_repo(
        settings_repo: Arc<dyn NotificationSettingsRepository>,
    ) -> AppState {
        let contact_repo = Arc::new(MockOwnerContactRepository::new());
        let log_repo = Arc::new(MockNotificationLogRepository::new());
        let line = Arc::new(MockLineSender::new());
        let email = Arc::new(MockEmailSender::new());

        let dispatch_uc = Arc::new(DispatchNotificationUseCase::new(
            settings_repo.clone(),
            contact_repo.clone(),
            log_repo.clone(),
            line.clone(),
            email,
            RetryPolicy::single_attempt(),
        ));

        AppState {
            get_settings_uc: Arc::new(GetNotificationSettingsUseCase::new(settings_repo.clone())),
            update_settings_uc: Arc::new(UpdateNotificationSettingsUseCase::new(
                settings_repo.clone(),
            )),
            list_logs_uc: Arc::new(ListNotificationLogsUseCase::new(log_repo)),
            send_test_push_uc: Arc::new(SendTestPushUseCase::new(contact_repo.clone(), line)),
            reminder_sweep: Arc::new(ReservationReminderSweep::new(
                settings_repo.clone(),
                Arc::new(MockReservationRepository::new()),
                contact_repo.clone(),
                dispatch_uc.clone(),
                "https://liff.line.me/TEST".to_string(),
            )),
            vaccine_sweep: Arc::new(VaccineAlertSweep::new(
                settings_repo,
                Arc::new(MockDogRepository::new()),
                contact_repo,
                dispatch_uc.clone(),
            )),
            dispatch_uc,
            cron_secret: SecretString::new("cron-test-secret".to_string()),
            db_pool: None,
            auth_state: None,
        }
    }
}
