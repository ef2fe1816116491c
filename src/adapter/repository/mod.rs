pub mod dog_postgres;
pub mod line_credentials_postgres;
pub mod notification_log_postgres;
pub mod owner_contact_postgres;
pub mod reservation_postgres;
pub mod settings_postgres;

pub use dog_postgres::DogPostgresRepository;
pub use line_credentials_postgres::LineCredentialsPostgresRepository;
pub use notification_log_postgres::NotificationLogPostgresRepository;
pub use owner_contact_postgres::OwnerContactPostgresRepository;
pub use reservation_postgres::ReservationPostgresRepository;
pub use settings_postgres::SettingsPostgresRepository;
