use std::sync::Arc;

use axum::async_trait;
use axum::extract::Extension;
use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::Authorization;
use axum_extra::TypedHeader;
use common::rbac::Role;

use crate::auth;
use crate::auth::token::parse_access_token;
use crate::error::AuthError;
use crate::PlatformError;

/// Per-request caller identity. Anonymous requests get the default context;
/// a present-but-invalid bearer token is rejected outright.
#[derive(Default, Clone, Debug)]
pub struct Context {
    pub account_id: Option<u64>,
    pub roles: Vec<Role>,
}

#[async_trait]
impl<S> FromRequestParts<S> for Context
where S: Send + Sync
{
    type Rejection = PlatformError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> core::result::Result<Self, Self::Rejection> {
        if !parts.headers.contains_key(header::AUTHORIZATION) {
            return Ok(Context::default());
        }

        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_err| AuthError::CantParseBearerHeader)?;

        let Extension(auth_cfg) = Extension::<auth::Config>::from_request_parts(parts, state)
            .await
            .map_err(|err| PlatformError::Internal(err.to_string()))?;

        let claims = parse_access_token(bearer.token(), &auth_cfg.access_token_key)
            .map_err(|_err| AuthError::CantParseAccessToken)?;

        let Extension(accounts) =
            Extension::<Arc<metadata::accounts::Accounts>>::from_request_parts(parts, state)
                .await
                .map_err(|err| PlatformError::Internal(err.to_string()))?;

        let acc = accounts
            .get_by_id(claims.account_id)
            .map_err(|_err| PlatformError::Unauthorized("unknown account".to_string()))?;

        Ok(Context {
            account_id: Some(acc.id),
            roles: acc.roles,
        })
    }
}
