use std::result;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use common::http::ErrorRecord;
use common::http::ErrorsResponse;
use metadata::error::MetadataError;
use serde_json::json;
use thiserror::Error;

pub type Result<T> = result::Result<T, PlatformError>;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("invalid refresh token")]
    InvalidRefreshToken,
    #[error("invalid client credentials")]
    InvalidClient,
    #[error("unsupported grant type: {0:?}")]
    UnsupportedGrantType(String),
    #[error("can't make access token")]
    CantMakeAccessToken,
    #[error("can't make refresh token")]
    CantMakeRefreshToken,
    #[error("can't parse bearer header")]
    CantParseBearerHeader,
    #[error("can't parse access token")]
    CantParseAccessToken,
}

#[derive(Error, Debug)]
pub enum PlatformError {
    #[error("invalid payload")]
    Validation(Vec<ErrorRecord>),
    #[error("bad request: {0:?}")]
    BadRequest(String),
    #[error("unauthorized: {0:?}")]
    Unauthorized(String),
    #[error("not found: {0:?}")]
    NotFound(String),
    #[error("internal: {0:?}")]
    Internal(String),
    #[error("serde: {0:?}")]
    Serde(#[from] serde_json::Error),
    #[error("password hash")]
    PasswordHash(#[from] password_hash::Error),
    #[error("jsonwebtoken: {0:?}")]
    JSONWebToken(#[from] jsonwebtoken::errors::Error),
    #[error("metadata: {0:?}")]
    Metadata(#[from] MetadataError),
    #[error("auth: {0:?}")]
    Auth(#[from] AuthError),
    #[error("other: {0:?}")]
    Other(#[from] anyhow::Error),
}

fn oauth_error(status: StatusCode, code: &'static str) -> Response {
    (status, Json(json!({ "error": code }))).into_response()
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            AuthError::InvalidCredentials | AuthError::InvalidRefreshToken => {
                oauth_error(StatusCode::BAD_REQUEST, "invalid_grant")
            }
            AuthError::InvalidClient => oauth_error(StatusCode::UNAUTHORIZED, "invalid_client"),
            AuthError::UnsupportedGrantType(_) => {
                oauth_error(StatusCode::BAD_REQUEST, "unsupported_grant_type")
            }
            AuthError::CantParseBearerHeader | AuthError::CantParseAccessToken => {
                StatusCode::UNAUTHORIZED.into_response()
            }
            err => {
                tracing::error!("token issuance error: {err:?}");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

impl IntoResponse for PlatformError {
    fn into_response(self) -> Response {
        match self {
            PlatformError::Validation(errors) => ErrorsResponse::new(errors).into_response(),
            PlatformError::BadRequest(msg) => {
                ErrorsResponse::new(vec![ErrorRecord::object("request", "badRequest", msg)])
                    .into_response()
            }
            PlatformError::Unauthorized(_) => StatusCode::UNAUTHORIZED.into_response(),
            PlatformError::NotFound(_) | PlatformError::Metadata(MetadataError::NotFound(_)) => {
                StatusCode::NOT_FOUND.into_response()
            }
            PlatformError::Metadata(MetadataError::AlreadyExists(_)) => {
                StatusCode::CONFLICT.into_response()
            }
            PlatformError::Auth(err) => err.into_response(),
            err => {
                tracing::error!("internal error: {err:?}");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}
