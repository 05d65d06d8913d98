pub mod password;
pub mod provider;
pub mod token;

use chrono::Duration;
use serde::Deserialize;
use serde::Serialize;

pub use provider::Auth;

#[derive(Clone)]
pub struct Config {
    pub access_token_duration: Duration,
    pub access_token_key: String,
    pub refresh_token_duration: Duration,
    pub refresh_token_key: String,
    pub client_id: String,
    pub client_secret: String,
}

impl From<&common::config::Config> for Config {
    fn from(cfg: &common::config::Config) -> Self {
        Config {
            access_token_duration: cfg.auth.access_token_duration,
            access_token_key: cfg.auth.access_token_key.clone(),
            refresh_token_duration: cfg.auth.refresh_token_duration,
            refresh_token_key: cfg.auth.refresh_token_key.clone(),
            client_id: cfg.client.id.clone(),
            client_secret: cfg.client.secret.clone(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct TokensResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub refresh_token: String,
}
