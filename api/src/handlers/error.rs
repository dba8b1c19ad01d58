//! Conversion of domain failures into HTTP responses.
//!
//! Every error body leaving the service has the `ErrorResponse` shape. Token
//! and authentication failures share one uniform 401 body so callers cannot
//! tell which check failed; unexpected failures are logged in full and
//! answered with a generic 500.

use actix_web::{error::JsonPayloadError, http::StatusCode, HttpRequest, HttpResponse};
use validator::ValidationErrors;

use auth_core::errors::{AuthError, DomainError};
use auth_shared::error_codes;

use crate::dto::{ErrorResponse, ErrorResponseExt};

/// Message returned when a username is already registered
pub const ALREADY_EXIST_MESSAGE: &str = "Already Exist";

/// Message returned for every authentication failure
pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized";

const INTERNAL_ERROR_MESSAGE: &str = "An internal error occurred";

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    match &error {
        DomainError::Auth(AuthError::UserAlreadyExists) => {
            tracing::debug!("Signup rejected: username already exists");
            ErrorResponse::new(error_codes::ALREADY_EXISTS, ALREADY_EXIST_MESSAGE)
                .to_response(StatusCode::BAD_REQUEST)
        }
        e if e.is_unauthenticated() => {
            tracing::debug!(error = %e, "Request not authenticated");
            unauthorized_response()
        }
        DomainError::Validation { message } => {
            ErrorResponse::new(error_codes::VALIDATION_ERROR, message.clone())
                .to_response(StatusCode::BAD_REQUEST)
        }
        DomainError::ValidationErr(validation) => {
            ErrorResponse::new(error_codes::VALIDATION_ERROR, "Invalid request")
                .add_detail(validation.field(), vec![validation.to_string()])
                .to_response(StatusCode::BAD_REQUEST)
        }
        _ => {
            tracing::error!(error = ?error, "Unhandled domain error");
            ErrorResponse::new(error_codes::INTERNAL_ERROR, INTERNAL_ERROR_MESSAGE)
                .to_response(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Uniform 401 body
pub fn unauthorized_response() -> HttpResponse {
    ErrorResponse::new(error_codes::UNAUTHORIZED, UNAUTHORIZED_MESSAGE)
        .to_response(StatusCode::UNAUTHORIZED)
}

/// 400 with the failing fields and their rule codes
pub fn validation_error_response(errors: &ValidationErrors) -> HttpResponse {
    let mut response = ErrorResponse::new(error_codes::VALIDATION_ERROR, "Invalid request");

    for (field, field_errors) in errors.field_errors() {
        let codes: Vec<String> = field_errors.iter().map(|e| e.code.to_string()).collect();
        response = response.add_detail(field.to_string(), codes);
    }

    response.to_response(StatusCode::BAD_REQUEST)
}

/// Normalize JSON body extraction failures into the error shape
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(error = %err, "Rejected request body");

    let response = ErrorResponse::new(error_codes::BAD_REQUEST, "Malformed request body")
        .to_response(StatusCode::BAD_REQUEST);
    actix_web::error::InternalError::from_response(err, response).into()
}

/// Default 404 handler
pub async fn not_found() -> HttpResponse {
    ErrorResponse::new(error_codes::NOT_FOUND, "The requested resource was not found")
        .to_response(StatusCode::NOT_FOUND)
}
