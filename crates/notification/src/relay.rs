use std::time::Duration;

use relaydesk_shared::{KindProfile, Submission};
use time::OffsetDateTime;

use crate::{
    ConfirmationEmail, DeliveryError, EmailConfig, EmailService, FailurePolicy, WebhookClient,
    WebhookConfig, WebhookPayload,
};

/// Delivers a validated submission: team notification first, then the
/// confirmation email. Nothing is retried.
#[derive(Clone)]
pub struct Relay {
    webhook: WebhookClient,
    webhook_config: WebhookConfig,
    email: EmailService,
    email_config: EmailConfig,
}

impl Relay {
    pub fn new(
        webhook_config: WebhookConfig,
        email_config: EmailConfig,
        timeout: Duration,
    ) -> Result<Self, DeliveryError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("relaydesk/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(DeliveryError::Client)?;

        tracing::info!(
            failure_policy = %webhook_config.failure_policy,
            "Webhook failure policy configured"
        );

        Ok(Self {
            webhook: WebhookClient::new(client.clone(), &webhook_config.url),
            email: EmailService::new(&email_config, client)?,
            webhook_config,
            email_config,
        })
    }

    #[tracing::instrument(skip_all, fields(kind = %profile.kind))]
    pub async fn dispatch(
        &self,
        profile: &KindProfile,
        submission: &Submission,
    ) -> Result<(), DeliveryError> {
        let payload = WebhookPayload::new(
            &self.webhook_config,
            profile,
            submission,
            OffsetDateTime::now_utc(),
        );

        match self.webhook.send(&payload).await {
            Ok(()) => tracing::info!("Notification sent"),
            Err(err) if self.webhook_config.failure_policy == FailurePolicy::Ignore => {
                tracing::warn!(
                    error = %err,
                    "Notification failed, sending confirmation email anyway"
                );
            }
            Err(err) => return Err(err),
        }

        let email = ConfirmationEmail::render(&self.email_config, profile, submission)?;
        self.email.send(&email).await?;

        tracing::info!("Confirmation email sent");

        Ok(())
    }
}
