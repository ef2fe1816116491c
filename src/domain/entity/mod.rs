pub mod dog;
pub mod notification_category;
pub mod notification_log;
pub mod notification_settings;
pub mod owner_contact;
pub mod reservation;
