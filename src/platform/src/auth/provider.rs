use std::sync::Arc;

use metadata::accounts::Accounts;
use password_hash::PasswordHash;

use super::password::verify_password;
use super::token::make_access_token;
use super::token::make_refresh_token;
use super::token::parse_refresh_token;
use super::Config;
use super::TokensResponse;
use crate::error::AuthError;
use crate::Result;

pub struct Auth {
    accounts: Arc<Accounts>,
    cfg: Config,
}

impl Auth {
    pub fn new(accounts: Arc<Accounts>, cfg: Config) -> Self {
        Self { accounts, cfg }
    }

    fn make_tokens(&self, account_id: u64) -> Result<TokensResponse> {
        Ok(TokensResponse {
            access_token: make_access_token(
                account_id,
                self.cfg.access_token_duration,
                self.cfg.access_token_key.as_str(),
            )
            .map_err(|_err| AuthError::CantMakeAccessToken)?,
            token_type: "bearer".to_string(),
            expires_in: self.cfg.access_token_duration.num_seconds(),
            refresh_token: make_refresh_token(
                account_id,
                self.cfg.refresh_token_duration,
                self.cfg.refresh_token_key.as_str(),
            )
            .map_err(|_err| AuthError::CantMakeRefreshToken)?,
        })
    }

    /// Password grant. An unknown email (a distinct not-found at the account
    /// store) and a wrong password both collapse into the same invalid-grant
    /// error before leaving this boundary.
    pub async fn password_grant(&self, username: &str, password: &str) -> Result<TokensResponse> {
        let account = self
            .accounts
            .get_by_email(username)
            .map_err(|_err| AuthError::InvalidCredentials)?;

        verify_password(
            password,
            PasswordHash::new(account.password_hash.as_str())?,
        )
        .map_err(|_err| AuthError::InvalidCredentials)?;

        self.make_tokens(account.id)
    }

    pub async fn refresh_grant(&self, refresh_token: &str) -> Result<TokensResponse> {
        let claims = parse_refresh_token(refresh_token, self.cfg.refresh_token_key.as_str())
            .map_err(|_err| AuthError::InvalidRefreshToken)?;

        self.make_tokens(claims.account_id)
    }
}
