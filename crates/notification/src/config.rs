use serde::Deserialize;
use strum::{AsRefStr, Display, EnumString};

/// What to do when the chat webhook does not accept a notification.
#[derive(EnumString, Display, AsRefStr, Deserialize, Default, Clone, Copy, Debug, PartialEq, Eq)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Fail the request before any confirmation email is sent.
    #[default]
    Abort,
    /// Log the failure and still send the confirmation email.
    Ignore,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WebhookConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_username")]
    pub username: String,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub failure_policy: FailurePolicy,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            username: default_username(),
            avatar_url: String::new(),
            failure_policy: FailurePolicy::default(),
        }
    }
}

fn default_username() -> String {
    "Support Desk".to_owned()
}

#[derive(EnumString, Display, AsRefStr, Deserialize, Default, Clone, Copy, Debug, PartialEq, Eq)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EmailTransportKind {
    /// Transactional email provider reached over HTTPS with a bearer key.
    #[default]
    Http,
    Smtp,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EmailConfig {
    #[serde(default)]
    pub transport: EmailTransportKind,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_from_address")]
    pub from_address: String,
    #[serde(default = "default_site_url")]
    pub site_url: String,
    #[serde(default = "default_support_url")]
    pub support_url: String,
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    #[serde(default)]
    pub smtp_username: String,
    #[serde(default)]
    pub smtp_password: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            transport: EmailTransportKind::default(),
            api_url: default_api_url(),
            api_key: String::new(),
            from_address: default_from_address(),
            site_url: default_site_url(),
            support_url: default_support_url(),
            smtp_host: default_smtp_host(),
            smtp_port: default_smtp_port(),
            smtp_username: String::new(),
            smtp_password: String::new(),
        }
    }
}

fn default_api_url() -> String {
    "https://api.resend.com/emails".to_owned()
}

fn default_from_address() -> String {
    "Support Desk <support@relaydesk.localhost>".to_owned()
}

fn default_site_url() -> String {
    "http://localhost:3000".to_owned()
}

fn default_support_url() -> String {
    "mailto:support@relaydesk.localhost".to_owned()
}

fn default_smtp_host() -> String {
    "localhost".to_owned()
}

fn default_smtp_port() -> u16 {
    587
}
