//! Team chat notification for new submissions.

use relaydesk_shared::{KindProfile, Submission};
use serde::Serialize;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::{DeliveryError, Service, WebhookConfig};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WebhookPayload {
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub embeds: Vec<Embed>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Embed {
    pub title: String,
    pub color: u32,
    pub fields: Vec<EmbedField>,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

impl WebhookPayload {
    pub fn new(
        config: &WebhookConfig,
        profile: &KindProfile,
        submission: &Submission,
        generated_at: OffsetDateTime,
    ) -> Self {
        let fields = profile
            .kind
            .displayed_fields()
            .iter()
            .map(|field| EmbedField {
                name: field.label().to_owned(),
                value: submission.display(*field).to_owned(),
                inline: true,
            })
            .collect();

        let timestamp = generated_at
            .format(&Rfc3339)
            .unwrap_or_else(|_| generated_at.unix_timestamp().to_string());

        Self {
            username: config.username.to_owned(),
            avatar_url: Some(config.avatar_url.to_owned()).filter(|url| !url.is_empty()),
            embeds: vec![Embed {
                title: profile.title.to_owned(),
                color: profile.color,
                fields,
                timestamp,
            }],
        }
    }
}

/// Posts notifications to the configured webhook URL.
#[derive(Debug, Clone)]
pub struct WebhookClient {
    client: reqwest::Client,
    url: String,
}

impl WebhookClient {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    #[tracing::instrument(name = "webhook_send", skip_all)]
    pub async fn send(&self, payload: &WebhookPayload) -> Result<(), DeliveryError> {
        let response = self
            .client
            .post(&self.url)
            .json(payload)
            .send()
            .await
            .map_err(|e| DeliveryError::network(Service::Webhook, e))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Webhook rejected notification");
            return Err(DeliveryError::Status {
                service: Service::Webhook,
                status: status.as_u16(),
            });
        }

        tracing::debug!(status = status.as_u16(), "Webhook accepted notification");

        Ok(())
    }
}
