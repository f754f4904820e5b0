use crate::utils::error::{ErrorCategory, StarsError};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Stars(#[from] StarsError),
}

/// 錯誤回應只帶原因字串
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Stars(e) => match e.category() {
                ErrorCategory::NotFound => StatusCode::NOT_FOUND,
                ErrorCategory::InvalidInput => StatusCode::BAD_REQUEST,
                ErrorCategory::Conflict => StatusCode::CONFLICT,
                ErrorCategory::Counter => StatusCode::BAD_GATEWAY,
                ErrorCategory::Timeout => StatusCode::GATEWAY_TIMEOUT,
                ErrorCategory::Store
                | ErrorCategory::Configuration
                | ErrorCategory::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("❌ Request failed ({}): {}", status, self);
        } else {
            tracing::debug!("Request rejected ({}): {}", status, self);
        }

        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
