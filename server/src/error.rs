use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use menu::{error::PersistenceError, session::SessionError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("dish {0} not found")]
    DishNotFound(u32),

    #[error("not logged in")]
    NotLoggedIn,

    #[error("{0}")]
    InvalidRegistration(String),

    #[error("Internal error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::DishNotFound { .. } => StatusCode::NOT_FOUND,
            AppError::NotLoggedIn => StatusCode::UNAUTHORIZED,
            AppError::InvalidRegistration { .. } => StatusCode::BAD_REQUEST,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, self.to_string()).into_response()
    }
}

impl From<SessionError> for AppError {
    fn from(e: SessionError) -> Self {
        match e {
            SessionError::Persistence(source) => AppError::Internal(Box::new(source)),
            invalid => AppError::InvalidRegistration(invalid.to_string()),
        }
    }
}

impl From<PersistenceError> for AppError {
    fn from(e: PersistenceError) -> Self {
        AppError::Internal(Box::new(e))
    }
}
