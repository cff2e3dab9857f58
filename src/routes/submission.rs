use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};
use relaydesk_shared::{KindProfile, Reply, Submission};

use crate::{error::AppError, routes::AppState};

#[derive(Clone)]
pub struct SubmissionState {
    pub app: AppState,
    pub profile: Arc<KindProfile>,
}

/// OPTIONS answers the preflight, POST relays the submission, anything else
/// is refused.
#[tracing::instrument(skip_all, fields(kind = %state.profile.kind, %method))]
pub async fn handle(
    State(state): State<SubmissionState>,
    method: Method,
    body: Bytes,
) -> Result<Response, AppError> {
    match method {
        Method::OPTIONS => Ok(StatusCode::NO_CONTENT.into_response()),
        Method::POST => submit(&state, &body).await.map(IntoResponse::into_response),
        _ => Err(AppError::MethodNotAllowed),
    }
}

async fn submit(state: &SubmissionState, body: &[u8]) -> Result<Json<Reply>, AppError> {
    let kind = state.profile.kind;

    // A body that is not a JSON object counts as an empty submission.
    let submission = Submission::from_json(body);
    submission.validate(kind.required_fields())?;

    state.app.relay.dispatch(&state.profile, &submission).await?;

    tracing::info!("Submission relayed");

    Ok(Json(Reply::success(kind.success_message())))
}
