use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use relaydesk_notification::DeliveryError;
use relaydesk_shared::Reply;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Method Not Allowed")]
    MethodNotAllowed,

    #[error(transparent)]
    Validation(#[from] relaydesk_shared::Error),

    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::MethodNotAllowed => {
                (StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed").into_response()
            }
            AppError::Validation(e) => {
                tracing::info!(reason = %e, "Submission rejected");
                (StatusCode::BAD_REQUEST, Json(Reply::failure(e.to_string()))).into_response()
            }
            AppError::Delivery(e) => {
                tracing::error!(service = ?e.service(), "Delivery failed: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(Reply::failure(e.to_string())),
                )
                    .into_response()
            }
        }
    }
}
