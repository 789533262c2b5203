//! Email delivery over authenticated SMTP with STARTTLS.

use crate::config::mail::MailConfig;
use crate::config::toml_config::SmtpSettings;
use crate::core::Dispatcher;
use crate::utils::error::{DigestError, Result};
use lettre::message::{header::ContentType, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

pub struct SmtpDispatcher {
    mail: MailConfig,
    smtp: SmtpSettings,
    sender_name: String,
}

impl SmtpDispatcher {
    pub fn new(mail: MailConfig, smtp: SmtpSettings, sender_name: String) -> Self {
        Self {
            mail,
            smtp,
            sender_name,
        }
    }

    /// 組出 multipart/alternative 郵件：純文字備援 + HTML
    pub fn build_message(&self, subject: &str, html_body: &str, text_body: &str) -> Result<Message> {
        let from = Mailbox::new(
            Some(self.sender_name.clone()),
            self.mail
                .username
                .parse()
                .map_err(|e: lettre::address::AddressError| DigestError::InvalidConfigValueError {
                    field: "GMAIL_USER".to_string(),
                    value: self.mail.username.clone(),
                    reason: e.to_string(),
                })?,
        );

        let to: Mailbox = self.mail.recipient.parse().map_err(
            |e: lettre::address::AddressError| DigestError::InvalidConfigValueError {
                field: "RECIPIENT_EMAIL".to_string(),
                value: self.mail.recipient.clone(),
                reason: e.to_string(),
            },
        )?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(text_body.to_string()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(html_body.to_string()),
                    ),
            )
            .map_err(|e| DigestError::DeliveryError {
                message: format!("Failed to build email message: {}", e),
            })
    }
}

impl Dispatcher for SmtpDispatcher {
    async fn dispatch(&self, subject: &str, html_body: &str, text_body: &str) -> Result<()> {
        let email = self.build_message(subject, html_body, text_body)?;

        let creds = Credentials::new(self.mail.username.clone(), self.mail.app_password.clone());

        tracing::info!("📨 Connecting to {}:{}", self.smtp.host, self.smtp.port);
        let mailer: AsyncSmtpTransport<Tokio1Executor> =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.smtp.host)
                .map_err(|e| DigestError::DeliveryError {
                    message: format!("Failed to create SMTP transport: {}", e),
                })?
                .port(self.smtp.port)
                .credentials(creds)
                .build();

        mailer
            .send(email)
            .await
            .map_err(|e| DigestError::DeliveryError {
                message: e.to_string(),
            })?;

        tracing::info!("🎉 Email sent to {}", self.mail.recipient);
        Ok(())
    }
}

/// `--no-send` 使用：只記錄日誌，不連線
#[derive(Debug, Clone, Default)]
pub struct LogOnlyDispatcher;

impl Dispatcher for LogOnlyDispatcher {
    async fn dispatch(&self, subject: &str, _html_body: &str, _text_body: &str) -> Result<()> {
        tracing::info!("✉️ Email sending disabled, skipping '{}'", subject);
        Ok(())
    }

    fn delivers(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dispatcher(username: &str, recipient: &str) -> SmtpDispatcher {
        SmtpDispatcher::new(
            MailConfig {
                username: username.to_string(),
                app_password: "app-password".to_string(),
                recipient: recipient.to_string(),
            },
            SmtpSettings::default(),
            "Daily Job Digest".to_string(),
        )
    }

    #[test]
    fn test_build_multipart_message() {
        let message = dispatcher("sender@gmail.com", "me@example.com")
            .build_message("Daily Job Digest - 14 Mar 2025", "<p>hi</p>", "hi")
            .unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();

        assert!(raw.contains("Subject: Daily Job Digest - 14 Mar 2025"));
        assert!(raw.contains("To: me@example.com"));
        assert!(raw.contains("multipart/alternative"));
        assert!(raw.contains("text/html"));
        assert!(raw.contains("text/plain"));
    }

    #[test]
    fn test_invalid_recipient_is_config_error() {
        let err = dispatcher("sender@gmail.com", "not-an-address")
            .build_message("s", "<p>hi</p>", "hi")
            .unwrap_err();

        assert!(matches!(
            err,
            DigestError::InvalidConfigValueError { ref field, .. } if field == "RECIPIENT_EMAIL"
        ));
    }

    #[tokio::test]
    async fn test_log_only_dispatcher() {
        let dispatcher = LogOnlyDispatcher;
        assert!(!dispatcher.delivers());
        assert!(dispatcher.dispatch("s", "<p></p>", "").await.is_ok());
    }
}
