pub mod email_client;
pub mod line_client;

pub use email_client::SmtpEmailSender;
pub use line_client::LineApiClient;
