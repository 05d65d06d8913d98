use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::Duration;
use tracing::level_filters::LevelFilter;

#[derive(Debug, Clone)]
pub struct Server {
    pub host: SocketAddr,
}

#[derive(Debug, Clone)]
pub struct Data {
    pub path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct Auth {
    pub access_token_duration: Duration,
    pub refresh_token_duration: Duration,
    pub access_token_key: String,
    pub refresh_token_key: String,
}

/// OAuth2 client credentials checked by the token endpoint.
#[derive(Debug, Clone)]
pub struct Client {
    pub id: String,
    pub secret: String,
}

/// Accounts provisioned at startup when absent.
#[derive(Debug, Clone)]
pub struct Seed {
    pub admin_email: String,
    pub admin_password: String,
    pub user_email: String,
    pub user_password: String,
}

#[derive(Debug, Clone)]
pub struct Log {
    pub level: LevelFilter,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: Server,
    pub data: Data,
    pub auth: Auth,
    pub client: Client,
    pub seed: Seed,
    pub log: Log,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: Server {
                host: SocketAddr::from_str("0.0.0.0:8080").unwrap(),
            },
            data: Data {
                path: Default::default(),
            },
            auth: Auth {
                access_token_duration: Duration::zero(),
                refresh_token_duration: Duration::zero(),
                access_token_key: String::new(),
                refresh_token_key: String::new(),
            },
            client: Client {
                id: String::new(),
                secret: String::new(),
            },
            seed: Seed {
                admin_email: String::new(),
                admin_password: String::new(),
                user_email: String::new(),
                user_password: String::new(),
            },
            log: Log {
                level: LevelFilter::INFO,
            },
        }
    }
}
