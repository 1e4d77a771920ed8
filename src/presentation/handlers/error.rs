use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use crate::application::services::ChatServiceError;

#[derive(Debug, thiserror::Error)]
pub enum ChatPageError {
    #[error(transparent)]
    Service(#[from] ChatServiceError),
    #[error("template rendering failed: {0}")]
    Render(#[from] askama::Error),
}

impl IntoResponse for ChatPageError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ChatPageError::Service(ChatServiceError::Completion(e)) => {
                tracing::error!(error = %e, "Completion API call failed");
                (
                    StatusCode::BAD_GATEWAY,
                    "The assistant is unavailable right now. Please try again.",
                )
            }
            ChatPageError::Service(ChatServiceError::Store(e)) => {
                tracing::error!(error = %e, "Session store failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Your conversation could not be loaded.",
                )
            }
            ChatPageError::Render(e) => {
                tracing::error!(error = %e, "Chat page rendering failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "The page could not be rendered.")
            }
        };

        let body = format!(
            "<!DOCTYPE html><html><body><h1>{}</h1><p>{}</p><p><a href=\"/\">Back to chat</a></p></body></html>",
            status, message
        );
        (status, Html(body)).into_response()
    }
}
