#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, Response},
};
use http_body_util::BodyExt;
use relaydesk::{AppState, Config};
use relaydesk_notification::{EmailConfig, FailurePolicy, WebhookConfig};
use serde_json::Value;
use tower::ServiceExt;
use wiremock::{Mock, MockServer, ResponseTemplate, matchers};

pub const WEBHOOK_PATH: &str = "/webhook";
pub const EMAIL_PATH: &str = "/emails";
pub const API_KEY: &str = "re_test_key";

/// Config whose webhook and email provider both live on `mock_server`.
pub fn test_config(mock_server: &MockServer) -> Config {
    Config {
        webhook: WebhookConfig {
            url: format!("{}{WEBHOOK_PATH}", mock_server.uri()),
            avatar_url: "https://cdn.example.com/bot.png".to_owned(),
            ..Default::default()
        },
        email: EmailConfig {
            api_url: format!("{}{EMAIL_PATH}", mock_server.uri()),
            api_key: API_KEY.to_owned(),
            from_address: "Support Desk <support@example.com>".to_owned(),
            site_url: "https://shop.example.com".to_owned(),
            support_url: "https://shop.example.com/support".to_owned(),
            ..Default::default()
        },
        ..Default::default()
    }
}

pub fn create_test_app(config: Config) -> Router {
    relaydesk::router(AppState::new(config).unwrap())
}

pub fn ignoring_webhook_failures(mut config: Config) -> Config {
    config.webhook.failure_policy = FailurePolicy::Ignore;
    config
}

pub async fn mount_webhook(mock_server: &MockServer, status: u16, expected_calls: u64) {
    Mock::given(matchers::method("POST"))
        .and(matchers::path(WEBHOOK_PATH))
        .respond_with(ResponseTemplate::new(status))
        .expect(expected_calls)
        .mount(mock_server)
        .await;
}

pub async fn mount_email(mock_server: &MockServer, status: u16, expected_calls: u64) {
    Mock::given(matchers::method("POST"))
        .and(matchers::path(EMAIL_PATH))
        .and(matchers::bearer_token(API_KEY))
        .respond_with(ResponseTemplate::new(status).set_body_json(serde_json::json!({"id": "em_1"})))
        .expect(expected_calls)
        .mount(mock_server)
        .await;
}

pub async fn post_json(app: Router, path: &str, body: Value) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    app.oneshot(request).await.unwrap()
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}

/// Bodies of the requests `mock_server` received on `path`, in arrival order.
pub async fn received_json(mock_server: &MockServer, path: &str) -> Vec<Value> {
    mock_server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|request| request.url.path() == path)
        .map(|request| request.body_json::<Value>().unwrap())
        .collect()
}

pub fn jane_doe_order() -> Value {
    serde_json::json!({
        "fullName": "Jane Doe",
        "email": "jane@example.com",
        "mobile": "+1 555 0100",
        "product": "Premium Plan",
        "paymentMethod": "Credit Card",
    })
}
