use std::sync::Arc;

use axum::extract::Extension;
use axum::routing::post;
use axum::Form;
use axum::Router;
use axum_extra::headers::authorization::Basic;
use axum_extra::headers::Authorization;
use axum_extra::TypedHeader;
use common::http::Json;
use serde::Deserialize;
use serde::Serialize;

use crate::auth::Auth;
use crate::auth::Config;
use crate::auth::TokensResponse;
use crate::error::AuthError;
use crate::Result;

pub const GRANT_TYPE_PASSWORD: &str = "password";
pub const GRANT_TYPE_REFRESH_TOKEN: &str = "refresh_token";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct TokenRequest {
    pub grant_type: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub refresh_token: Option<String>,
}

async fn issue_token(
    basic: Option<TypedHeader<Authorization<Basic>>>,
    Extension(provider): Extension<Arc<Auth>>,
    Extension(cfg): Extension<Config>,
    Form(request): Form<TokenRequest>,
) -> Result<Json<TokensResponse>> {
    let Some(TypedHeader(Authorization(client))) = basic else {
        return Err(AuthError::InvalidClient.into());
    };
    if client.username() != cfg.client_id || client.password() != cfg.client_secret {
        return Err(AuthError::InvalidClient.into());
    }

    let tokens = match request.grant_type.as_str() {
        GRANT_TYPE_PASSWORD => {
            let username = request.username.ok_or(AuthError::InvalidCredentials)?;
            let password = request.password.ok_or(AuthError::InvalidCredentials)?;
            provider.password_grant(&username, &password).await?
        }
        GRANT_TYPE_REFRESH_TOKEN => {
            let refresh_token = request.refresh_token.ok_or(AuthError::InvalidRefreshToken)?;
            provider.refresh_grant(&refresh_token).await?
        }
        other => return Err(AuthError::UnsupportedGrantType(other.to_string()).into()),
    };

    Ok(Json(tokens))
}

pub fn attach_routes(router: Router) -> Router {
    router.route("/oauth/token", post(issue_token))
}
