use std::sync::Arc;

use axum::{
    Router,
    routing::{any, get},
};
use relaydesk_notification::Relay;
use tower_http::trace::TraceLayer;

use crate::config::Config;

mod health;
mod submission;

pub use submission::SubmissionState;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub relay: Relay,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let relay = Relay::new(
            config.webhook.clone(),
            config.email.clone(),
            config.http.timeout(),
        )?;

        Ok(Self {
            config: Arc::new(config),
            relay,
        })
    }
}

/// One route per submission kind, all served by the same handler.
pub fn router(app_state: AppState) -> Router {
    let mut router = Router::new().route("/health", get(health::health));

    for profile in app_state.config.profiles() {
        tracing::debug!(kind = %profile.kind, path = %profile.path, "Mounting submission endpoint");

        let path = profile.path.to_owned();
        let state = SubmissionState {
            app: app_state.clone(),
            profile: Arc::new(profile),
        };
        router = router.route(&path, any(submission::handle).with_state(state));
    }

    router
        .layer(axum::middleware::from_fn(
            crate::middleware::cors_middleware,
        ))
        .layer(TraceLayer::new_for_http())
}
