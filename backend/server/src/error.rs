use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use menu::DataError;
use thiserror::Error;
use tracing::error;

pub const SERVER_ERROR: &str = "Something went wrong on the server, please try again later.";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("Unknown category {0:?}")]
    UnknownCategory(String),

    #[error("Misconfigured environment: {0}")]
    Config(String),

    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::MalformedPayload { .. } | AppError::UnknownCategory { .. } => {
                StatusCode::BAD_REQUEST
            }
            AppError::Config { .. } | AppError::Data { .. } | AppError::Io { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        if status.is_server_error() {
            error!("{self}");
        }

        let body = match self {
            AppError::MalformedPayload(_) => self.to_string(),
            _ => SERVER_ERROR.to_string(),
        };

        (status, body).into_response()
    }
}
