use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::contract::error::UsersInfoError;

pub fn status_for(e: &UsersInfoError) -> StatusCode {
    match e {
        UsersInfoError::Validation { .. } => StatusCode::BAD_REQUEST,
        UsersInfoError::NotFound { .. } => StatusCode::NOT_FOUND,
        UsersInfoError::Store { .. } | UsersInfoError::Canceled { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Plain-text error response carrying the error message.
pub fn error_response(e: &UsersInfoError) -> Response {
    (status_for(e), e.to_string()).into_response()
}
