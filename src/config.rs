use std::{collections::HashSet, env, time::Duration};

use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use relaydesk_notification::{EmailConfig, EmailTransportKind, WebhookConfig};
use relaydesk_shared::{KindProfile, SubmissionKind};
use serde::Deserialize;
use strum::VariantArray;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub webhook: WebhookConfig,
    #[serde(default)]
    pub email: EmailConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub submission: SubmissionConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_owned()
}

fn default_port() -> u16 {
    3000
}

#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    /// Upper bound for each outbound webhook or email call.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct SubmissionConfig {
    #[serde(default)]
    pub ticket: KindOverrides,
    #[serde(default)]
    pub order: KindOverrides,
}

/// Optional replacements for the built-in [`KindProfile`] of one kind.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct KindOverrides {
    pub path: Option<String>,
    pub title: Option<String>,
    pub color: Option<u32>,
    pub subject: Option<String>,
}

impl KindOverrides {
    fn apply(&self, mut profile: KindProfile) -> KindProfile {
        if let Some(path) = &self.path {
            profile.path = path.to_owned();
        }
        if let Some(title) = &self.title {
            profile.title = title.to_owned();
        }
        if let Some(color) = self.color {
            profile.color = color;
        }
        if let Some(subject) = &self.subject {
            profile.subject = subject.to_owned();
        }
        profile
    }
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::default(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_owned()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Legacy variables (WEBHOOK_URL, EMAIL_API_KEY)
    /// 2. Environment variables (RELAYDESK__WEBHOOK__URL, etc.)
    /// 3. Config file specified by path
    /// 4. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder()
            .set_default("server.host", default_host())?
            .set_default("server.port", default_port())?
            .set_default("http.timeout_secs", default_timeout_secs())?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_owned());

        // The file is optional, environment alone is enough to run.
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("RELAYDESK")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        if let Ok(webhook_url) = env::var("WEBHOOK_URL") {
            builder = builder.set_override("webhook.url", webhook_url)?;
        }
        if let Ok(api_key) = env::var("EMAIL_API_KEY") {
            builder = builder.set_override("email.api_key", api_key)?;
        }

        builder.build()?.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.webhook.url.trim().is_empty() {
            return Err("Webhook URL must be configured (WEBHOOK_URL)".to_owned());
        }
        match self.email.transport {
            EmailTransportKind::Http if self.email.api_key.trim().is_empty() => {
                return Err("Email API key must be configured (EMAIL_API_KEY)".to_owned());
            }
            EmailTransportKind::Smtp if self.email.smtp_host.trim().is_empty() => {
                return Err("SMTP host must be configured for the smtp transport".to_owned());
            }
            _ => {}
        }
        if self.server.port == 0 {
            return Err("Server port must be greater than 0".to_owned());
        }

        let mut paths = HashSet::new();
        for profile in self.profiles() {
            if !profile.path.starts_with('/') {
                return Err(format!(
                    "Submission path for {} must start with '/': {}",
                    profile.kind, profile.path
                ));
            }
            if !paths.insert(profile.path.to_owned()) {
                return Err(format!("Submission path {} is used twice", profile.path));
            }
        }

        Ok(())
    }

    /// Built-in profile of every kind with the configured overrides applied.
    pub fn profiles(&self) -> Vec<KindProfile> {
        SubmissionKind::VARIANTS
            .iter()
            .map(|&kind| {
                let overrides = match kind {
                    SubmissionKind::Ticket => &self.submission.ticket,
                    SubmissionKind::Order => &self.submission.order,
                };
                overrides.apply(KindProfile::from(kind))
            })
            .collect()
    }
}
