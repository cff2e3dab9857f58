use strum::Display;

/// Downstream collaborator a delivery error originates from.
#[derive(Display, Debug, Clone, Copy, PartialEq, Eq)]
#[strum(serialize_all = "lowercase")]
pub enum Service {
    Webhook,
    Email,
}

#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("{service} request failed: {source}")]
    Network {
        service: Service,
        #[source]
        source: reqwest::Error,
    },

    #[error("{service} responded with status {status}")]
    Status { service: Service, status: u16 },

    #[error("failed to render confirmation email: {0}")]
    Render(#[from] askama::Error),

    #[error("invalid email address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("failed to build email message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("SMTP delivery failed: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    #[error("email task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl DeliveryError {
    /// The request URL is dropped from `source`: webhook URLs carry a token
    /// and the message may reach the client.
    pub fn network(service: Service, source: reqwest::Error) -> Self {
        Self::Network {
            service,
            source: source.without_url(),
        }
    }

    pub fn service(&self) -> Option<Service> {
        match self {
            Self::Network { service, .. } | Self::Status { service, .. } => Some(*service),
            Self::Render(_) | Self::Address(_) | Self::Message(_) | Self::Smtp(_) | Self::Join(_) => {
                Some(Service::Email)
            }
            Self::Client(_) => None,
        }
    }
}
