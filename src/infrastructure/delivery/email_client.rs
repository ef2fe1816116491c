use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::MultiPart;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::domain::service::{DeliveryError, EmailSender};

/// Transactional email sender with a fixed from-address. Accepts plain
/// text plus an optional HTML alternative.
pub struct SmtpEmailSender {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
}

impl SmtpEmailSender {
    pub fn new(
        smtp_host: &str,
        smtp_port: u16,
        username: &str,
        password: &str,
        from_address: &str,
    ) -> Result<Self, DeliveryError> {
        let creds = Credentials::new(username.to_string(), password.to_string());

        let mailer: AsyncSmtpTransport<Tokio1Executor> =
            AsyncSmtpTransport::<Tokio1Executor>::relay(smtp_host)
                .map_err(|e: lettre::transport::smtp::Error| {
                    DeliveryError::ConnectionFailed(e.to_string())
                })?
                .port(smtp_port)
                .credentials(creds)
                .build();

        Ok(Self {
            mailer,
            from_address: from_address.to_string(),
        })
    }
}

#[async_trait]
impl EmailSender for SmtpEmailSender {
    async fn send<'a>(
        &self,
        to: &str,
        subject: &str,
        text: &str,
        html: Option<&'a str>,
    ) -> Result<(), DeliveryError> {
        let builder = Message::builder()
            .from(
                self.from_address
                    .parse()
                    .map_err(|e: lettre::address::AddressError| {
                        DeliveryError::Other(format!("invalid from address: {}", e))
                    })?,
            )
            .to(to.parse().map_err(|e: lettre::address::AddressError| {
                DeliveryError::Other(format!("invalid recipient address: {}", e))
            })?)
            .subject(subject);

        let email = match html {
            Some(html) => builder
                .multipart(MultiPart::alternative_plain_html(
                    text.to_string(),
                    html.to_string(),
                ))
                .map_err(|e| DeliveryError::Other(format!("failed to build email: {}", e)))?,
            None => builder
                .header(ContentType::TEXT_PLAIN)
                .body(text.to_string())
                .map_err(|e| DeliveryError::Other(format!("failed to build email: {}", e)))?,
        };

        self.mailer
            .send(email)
            .await
            .map_err(|e: lettre::transport::smtp::Error| {
                DeliveryError::ConnectionFailed(e.to_string())
            })?;

        Ok(())
    }
}
