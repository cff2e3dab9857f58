use std::collections::BTreeMap;

use async_trait::async_trait;
use relaydesk_shared::Reply;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("submission rejected with status {status}")]
    Rejected { status: u16, error: Option<String> },
}

impl TransportError {
    /// Text shown to the user under the form.
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(_) => {
                "Network error. Please check your connection and try again.".to_owned()
            }
            Self::Rejected {
                error: Some(error), ..
            } => format!("Submission failed: {error}"),
            Self::Rejected { status, .. } => {
                format!("Submission failed (HTTP {status}). Please try again.")
            }
        }
    }
}

/// Carries the collected form values to the submission endpoint.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post(&self, values: &BTreeMap<String, String>) -> Result<Reply, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for &T {
    async fn post(&self, values: &BTreeMap<String, String>) -> Result<Reply, TransportError> {
        (**self).post(values).await
    }
}

#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(&self, values: &BTreeMap<String, String>) -> Result<Reply, TransportError> {
        let response = self.client.post(&self.endpoint).json(values).send().await?;
        let status = response.status();
        let reply = response.json::<Reply>().await.ok();

        match reply {
            Some(reply) if status.is_success() && reply.ok => Ok(reply),
            // A success status without a JSON body still counts as accepted.
            None if status.is_success() => Ok(Reply {
                ok: true,
                ..Default::default()
            }),
            reply => Err(TransportError::Rejected {
                status: status.as_u16(),
                error: reply.and_then(|r| r.error),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use wiremock::{Mock, MockServer, ResponseTemplate, matchers};

    use super::*;

    #[tokio::test]
    async fn test_rejection_carries_server_error_text() {
        let mock_server = MockServer::start().await;

        Mock::given(matchers::method("POST"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(Reply::failure("Invalid email address")),
            )
            .mount(&mock_server)
            .await;

        let transport = HttpTransport::new(reqwest::Client::new(), mock_server.uri());
        let err = transport.post(&BTreeMap::new()).await.unwrap_err();

        assert_eq!(err.user_message(), "Submission failed: Invalid email address");
    }

    #[tokio::test]
    async fn test_rejection_without_json_body() {
        let mock_server = MockServer::start().await;

        Mock::given(matchers::method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&mock_server)
            .await;

        let transport = HttpTransport::new(reqwest::Client::new(), mock_server.uri());
        let err = transport.post(&BTreeMap::new()).await.unwrap_err();

        assert_eq!(
            err.user_message(),
            "Submission failed (HTTP 502). Please try again."
        );
    }

    #[tokio::test]
    async fn test_success_status_with_failed_reply_is_rejected() {
        let mock_server = MockServer::start().await;

        Mock::given(matchers::method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(Reply::failure("Quota exceeded")),
            )
            .mount(&mock_server)
            .await;

        let transport = HttpTransport::new(reqwest::Client::new(), mock_server.uri());
        let err = transport.post(&BTreeMap::new()).await.unwrap_err();

        assert!(matches!(err, TransportError::Rejected { status: 200, .. }));
        assert_eq!(err.user_message(), "Submission failed: Quota exceeded");
    }

    #[tokio::test]
    async fn test_values_are_posted_as_flat_json() {
        let mock_server = MockServer::start().await;

        Mock::given(matchers::method("POST"))
            .and(matchers::body_json(serde_json::json!({
                "fullName": "Jane Doe",
                "email": "jane@example.com",
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(Reply::success("Ticket created & email sent")),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let transport = HttpTransport::new(reqwest::Client::new(), mock_server.uri());
        let values = BTreeMap::from([
            ("fullName".to_owned(), "Jane Doe".to_owned()),
            ("email".to_owned(), "jane@example.com".to_owned()),
        ]);

        let reply = transport.post(&values).await.unwrap();
        assert_eq!(reply.message.as_deref(), Some("Ticket created & email sent"));
    }
}
