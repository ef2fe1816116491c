use std::net::SocketAddr;
use std::sync::Arc;

use secrecy::ExposeSecret;
use tracing::info;
use tracing_subscriber::EnvFilter;

use blink_notification_server::adapter::handler::{router, AppState};
use blink_notification_server::adapter::middleware::auth::ApiAuthState;
use blink_notification_server::adapter::repository::{
    DogPostgresRepository, LineCredentialsPostgresRepository, NotificationLogPostgresRepository,
    OwnerContactPostgresRepository, ReservationPostgresRepository, SettingsPostgresRepository,
};
use blink_notification_server::domain::repository::{
    DogRepository, LineCredentialsRepository, NotificationLogRepository,
    NotificationSettingsRepository, OwnerContactRepository, ReservationRepository,
};
use blink_notification_server::domain::service::{EmailSender, LineSender};
use blink_notification_server::infrastructure::config::Config;
use blink_notification_server::infrastructure::database;
use blink_notification_server::infrastructure::delivery::{LineApiClient, SmtpEmailSender};
use blink_notification_server::infrastructure::encryption::CredentialCipher;
use blink_notification_server::usecase::{
    DispatchNotificationUseCase, GetNotificationSettingsUseCase, ListNotificationLogsUseCase,
    ReservationReminderSweep, SendTestPushUseCase, UpdateNotificationSettingsUseCase,
    VaccineAlertSweep,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .json()
        .init();

    let config_path =
        std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config/config.yaml".to_string());
    let cfg = Config::load(&config_path)?;

    info!(
        app_name = %cfg.app.name,
        version = %cfg.app.version,
        environment = %cfg.app.environment,
        "starting notification server"
    );

    let pool = Arc::new(database::connect(&cfg.database).await?);
    let cipher = Arc::new(CredentialCipher::new(cfg.encryption.load_key()?));

    let settings_repo: Arc<dyn NotificationSettingsRepository> =
        Arc::new(SettingsPostgresRepository::new(pool.clone()));
    let log_repo: Arc<dyn NotificationLogRepository> =
        Arc::new(NotificationLogPostgresRepository::new(pool.clone()));
    let contact_repo: Arc<dyn OwnerContactRepository> =
        Arc::new(OwnerContactPostgresRepository::new(pool.clone()));
    let reservation_repo: Arc<dyn ReservationRepository> =
        Arc::new(ReservationPostgresRepository::new(pool.clone()));
    let dog_repo: Arc<dyn DogRepository> = Arc::new(DogPostgresRepository::new(pool.clone()));
    let credentials_repo: Arc<dyn LineCredentialsRepository> =
        Arc::new(LineCredentialsPostgresRepository::new(pool.clone()));

    let line: Arc<dyn LineSender> = Arc::new(LineApiClient::new(
        credentials_repo,
        cipher,
        cfg.line.endpoint.clone(),
    ));
    let email: Arc<dyn EmailSender> = Arc::new(SmtpEmailSender::new(
        &cfg.email.smtp_host,
        cfg.email.smtp_port,
        &cfg.email.username,
        cfg.email.password.expose_secret(),
        &cfg.email.from_address,
    )?);

    let dispatch_uc = Arc::new(DispatchNotificationUseCase::new(
        settings_repo.clone(),
        contact_repo.clone(),
        log_repo.clone(),
        line.clone(),
        email,
        cfg.notification.retry_policy(),
    ));

    let state = AppState {
        get_settings_uc: Arc::new(GetNotificationSettingsUseCase::new(settings_repo.clone())),
        update_settings_uc: Arc::new(UpdateNotificationSettingsUseCase::new(
            settings_repo.clone(),
        )),
        list_logs_uc: Arc::new(ListNotificationLogsUseCase::new(log_repo)),
        send_test_push_uc: Arc::new(SendTestPushUseCase::new(contact_repo.clone(), line)),
        reminder_sweep: Arc::new(ReservationReminderSweep::new(
            settings_repo.clone(),
            reservation_repo,
            contact_repo.clone(),
            dispatch_uc.clone(),
            cfg.line.liff_url.clone(),
        )),
        vaccine_sweep: Arc::new(VaccineAlertSweep::new(
            settings_repo,
            dog_repo,
            contact_repo,
            dispatch_uc.clone(),
        )),
        dispatch_uc,
        cron_secret: cfg.auth.cron_secret.clone(),
        db_pool: Some(pool),
        auth_state: None,
    }
    .with_auth(ApiAuthState {
        api_token: cfg.auth.api_token.clone(),
    });

    let app = router(state);

    let addr: SocketAddr = format!("{}:{}", cfg.server.host, cfg.server.port).parse()?;
    info!("REST server starting on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
