pub mod dog_repository;
pub mod line_credentials_repository;
pub mod notification_log_repository;
pub mod notification_settings_repository;
pub mod owner_contact_repository;
pub mod reservation_repository;

pub use dog_repository::DogRepository;
pub use line_credentials_repository::LineCredentialsRepository;
pub use notification_log_repository::NotificationLogRepository;
pub use notification_settings_repository::NotificationSettingsRepository;
pub use owner_contact_repository::OwnerContactRepository;
pub use reservation_repository::ReservationRepository;
