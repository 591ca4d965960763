//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while allowing Actix
//! handlers to turn domain failures into consistent responses. Missing
//! authentication becomes a `302` to the login page carrying the requested
//! path; everything else is a JSON error body.

use actix_web::http::header;
use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::error;
use url::form_urlencoded;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Path of the login page.
pub const LOGIN_PATH: &str = "/auth/login/";

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::FOUND,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Login page URL that returns the client to `next` afterwards.
///
/// Slashes stay readable; every other reserved character is escaped.
///
/// # Examples
/// ```
/// use noticeboard::inbound::http::error::login_redirect_target;
///
/// assert_eq!(login_redirect_target("/add/"), "/auth/login/?next=/add/");
/// assert_eq!(
///     login_redirect_target("/?cursor=a b"),
///     "/auth/login/?next=/%3Fcursor%3Da+b"
/// );
/// ```
pub fn login_redirect_target(next: &str) -> String {
    let encoded: String = form_urlencoded::byte_serialize(next.as_bytes()).collect();
    format!("{LOGIN_PATH}?next={}", encoded.replace("%2F", "/"))
}

fn redact_if_internal(error: &Error) -> Error {
    if matches!(
        error.code(),
        ErrorCode::InternalError | ErrorCode::ServiceUnavailable
    ) {
        let message = if error.code() == ErrorCode::InternalError {
            "Internal server error"
        } else {
            "Service unavailable"
        };
        let mut redacted = Error::new(error.code(), message);
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
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }

        if self.code() == ErrorCode::Unauthorized {
            let target = login_redirect_target(self.next_path().unwrap_or("/"));
            return builder.insert_header((header::LOCATION, target)).finish();
        }

        if matches!(
            self.code(),
            ErrorCode::InternalError | ErrorCode::ServiceUnavailable
        ) {
            error!(code = ?self.code(), message = %self.message(), "request failed");
        }
        builder.json(redact_if_internal(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        // Do not leak implementation details to clients.
        error!(error = %err, "actix error promoted to domain error");
        Error::internal("Internal server error")
    }
}

#[cfg(test)]
mod tests;
