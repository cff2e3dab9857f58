//! Confirmation email delivery, over a transactional HTTP provider or SMTP.

use lettre::{
    Message, SmtpTransport, Transport, message::MultiPart,
    transport::smtp::authentication::Credentials,
};

use crate::{ConfirmationEmail, DeliveryError, EmailConfig, EmailTransportKind, Service};

#[derive(Clone)]
enum Mailer {
    Http {
        client: reqwest::Client,
        api_url: String,
        api_key: String,
    },
    Smtp(SmtpTransport),
}

/// Email service for sending confirmations
#[derive(Clone)]
pub struct EmailService {
    mailer: Mailer,
}

impl EmailService {
    /// Create a new email service from configuration
    pub fn new(config: &EmailConfig, client: reqwest::Client) -> Result<Self, DeliveryError> {
        let mailer = match config.transport {
            EmailTransportKind::Http => {
                tracing::info!(api_url = %config.api_url, "Email service using HTTP provider");

                Mailer::Http {
                    client,
                    api_url: config.api_url.to_owned(),
                    api_key: config.api_key.to_owned(),
                }
            }
            EmailTransportKind::Smtp
                if config.smtp_username.is_empty() || config.smtp_password.is_empty() =>
            {
                tracing::info!(
                    smtp_host = %config.smtp_host,
                    smtp_port = config.smtp_port,
                    "SMTP credentials not configured, using unauthenticated connection (e.g., MailDev)"
                );

                Mailer::Smtp(
                    SmtpTransport::builder_dangerous(&config.smtp_host)
                        .port(config.smtp_port)
                        .build(),
                )
            }
            EmailTransportKind::Smtp => {
                tracing::info!(
                    smtp_host = %config.smtp_host,
                    smtp_port = config.smtp_port,
                    "Email service using authenticated SMTP relay"
                );

                let creds =
                    Credentials::new(config.smtp_username.clone(), config.smtp_password.clone());

                Mailer::Smtp(
                    SmtpTransport::relay(&config.smtp_host)?
                        .port(config.smtp_port)
                        .credentials(creds)
                        .build(),
                )
            }
        };

        Ok(Self { mailer })
    }

    #[tracing::instrument(name = "email_send", skip_all, fields(to = %email.to, subject = %email.subject))]
    pub async fn send(&self, email: &ConfirmationEmail) -> Result<(), DeliveryError> {
        tracing::info!("Sending confirmation email");

        match &self.mailer {
            Mailer::Http {
                client,
                api_url,
                api_key,
            } => {
                let response = client
                    .post(api_url)
                    .bearer_auth(api_key)
                    .json(email)
                    .send()
                    .await
                    .map_err(|e| DeliveryError::network(Service::Email, e))?;

                let status = response.status();
                if !status.is_success() {
                    tracing::warn!(status = status.as_u16(), "Email provider rejected message");
                    return Err(DeliveryError::Status {
                        service: Service::Email,
                        status: status.as_u16(),
                    });
                }

                Ok(())
            }
            Mailer::Smtp(transport) => {
                let message = Message::builder()
                    .from(email.from.parse()?)
                    .to(email.to.parse()?)
                    .subject(email.subject.to_owned())
                    .multipart(MultiPart::alternative_plain_html(
                        email.text.to_owned(),
                        email.html.to_owned(),
                    ))?;

                let transport = transport.clone();
                tokio::task::spawn_blocking(move || transport.send(&message)).await??;

                Ok(())
            }
        }
    }
}
