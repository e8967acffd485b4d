use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

use crate::model::GenerateError;
use crate::web::models::ErrorBody;

/// Everything that can go wrong while serving a chat request.
///
/// The HTTP mapping lives here and nowhere else: handlers return
/// `Result<_, ChatError>` and let actix render the response.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("Message must not be empty.")]
    EmptyMessage,

    #[error("Délai dépassé lors de l'appel au modèle.")]
    Timeout,

    /// The inner string is the transport-level cause, kept for logging;
    /// the client only ever sees the fixed detail message.
    #[error("Erreur lors de l'appel à l'API Hugging Face.")]
    Upstream(String),
}

impl From<GenerateError> for ChatError {
    fn from(err: GenerateError) -> Self {
        match err {
            GenerateError::Timeout => ChatError::Timeout,
            GenerateError::Upstream(cause) => ChatError::Upstream(cause),
        }
    }
}

impl ResponseError for ChatError {
    fn status_code(&self) -> StatusCode {
        match self {
            ChatError::EmptyMessage => StatusCode::BAD_REQUEST,
            ChatError::Timeout => StatusCode::GATEWAY_TIMEOUT,
            ChatError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            detail: self.to_string(),
        })
    }
}
