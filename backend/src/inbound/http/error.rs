//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while allowing Actix
//! handlers to turn domain failures into consistent responses. This is a
//! page-oriented application, so the two auth failure modes redirect the
//! browser instead of answering with a bare status: missing authentication
//! sends the caller to the login form and a role failure sends them to the
//! dedicated access-denied page.

use actix_web::{http::header, http::StatusCode, HttpResponse, ResponseError};
use tracing::error;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Location the anonymous caller is redirected to.
pub const LOGIN_PAGE: &str = "/login_page";
/// Location the unprivileged caller is redirected to.
pub const ACCESS_DENIED_PAGE: &str = "/403";

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        // Auth failures redirect; see error_response.
        ErrorCode::Unauthorized | ErrorCode::Forbidden => StatusCode::SEE_OTHER,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redact_if_internal(error: &Error) -> Error {
    if matches!(error.code(), ErrorCode::InternalError) {
        let mut redacted = Error::internal("Internal server error");
        if let Some(id) = error.trace_id() {
            redacted = redacted.with_trace_id(id.to_owned());
        }
        redacted
    } else {
        error.clone()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let redirect = match self.code() {
            ErrorCode::Unauthorized => Some(LOGIN_PAGE),
            ErrorCode::Forbidden => Some(ACCESS_DENIED_PAGE),
            _ => None,
        };

        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }

        match redirect {
            Some(location) => builder
                .insert_header((header::LOCATION, location))
                .finish(),
            None => builder.json(redact_if_internal(self)),
        }
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        // Do not leak implementation details to clients.
        error!(error = %err, "actix error promoted to domain error");
        Error::internal("Internal server error")
    }
}
