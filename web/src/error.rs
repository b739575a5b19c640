use std::error::Error as StdError;

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use domain::error::{DomainErrorKind, Error as DomainError, ExternalErrorKind, InternalErrorKind};
use log::*;

use crate::response::ErrorResponse;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    Domain(DomainError),
    Web(WebErrorKind),
}

/// Errors raised by the web layer itself, before the domain is involved.
#[derive(Debug)]
pub enum WebErrorKind {
    Input(String),
}

impl StdError for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> core::result::Result<(), std::fmt::Error> {
        match self {
            Error::Domain(err) => write!(fmt, "{err}"),
            Error::Web(WebErrorKind::Input(message)) => write!(fmt, "{message}"),
        }
    }
}

impl Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::Web(WebErrorKind::Input(_)) => StatusCode::BAD_REQUEST,
            Error::Domain(err) => match &err.error_kind {
                DomainErrorKind::Internal(internal_error_kind) => match internal_error_kind {
                    InternalErrorKind::Validation(_) => StatusCode::BAD_REQUEST,
                    InternalErrorKind::Config | InternalErrorKind::Other(_) => {
                        StatusCode::INTERNAL_SERVER_ERROR
                    }
                },
                DomainErrorKind::External(external_error_kind) => match external_error_kind {
                    ExternalErrorKind::AuthorizationDenied => StatusCode::FORBIDDEN,
                    ExternalErrorKind::ServiceUnavailable | ExternalErrorKind::Unauthenticated => {
                        StatusCode::UNAUTHORIZED
                    }
                    ExternalErrorKind::Network | ExternalErrorKind::Service(_) => {
                        StatusCode::INTERNAL_SERVER_ERROR
                    }
                },
            },
        }
    }
}

// List of possible StatusCode variants https://docs.rs/http/latest/http/status/struct.StatusCode.html
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let detail = self.to_string();

        if status.is_server_error() {
            error!("Request failed ({status}): {detail}");
        } else {
            warn!("Request rejected ({status}): {detail}");
        }

        (status, Json(ErrorResponse { detail })).into_response()
    }
}

impl From<DomainError> for Error {
    fn from(err: DomainError) -> Self {
        Error::Domain(err)
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::Web(WebErrorKind::Input(rejection.body_text()))
    }
}
