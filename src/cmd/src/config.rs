use std::net::SocketAddr;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing::Level;

#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct Server {
    pub host: SocketAddr,
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct Data {
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct Auth {
    pub access_token_duration: String,
    pub refresh_token_duration: String,
    pub access_token_key: String,
    pub refresh_token_key: String,
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct Client {
    pub id: String,
    pub secret: String,
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct Seed {
    pub admin_email: String,
    pub admin_password: String,
    pub user_email: String,
    pub user_password: String,
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct Log {
    pub level: LogLevel,
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct Config {
    pub server: Server,
    pub data: Data,
    pub auth: Auth,
    pub client: Client,
    pub seed: Seed,
    pub log: Log,
}

pub fn load(path: Option<&Path>) -> crate::error::Result<Config> {
    let mut builder = config::Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(config::File::from(path));
    }
    builder = builder.add_source(config::Environment::with_prefix("EVENTUM").separator("__"));

    Ok(builder.build()?.try_deserialize()?)
}

fn parse_duration(s: &str) -> crate::error::Result<chrono::Duration> {
    Ok(chrono::Duration::from_std(parse_duration::parse(s)?)?)
}

impl TryInto<common::config::Config> for Config {
    type Error = crate::error::Error;

    fn try_into(self) -> Result<common::config::Config, Self::Error> {
        Ok(common::config::Config {
            server: common::config::Server {
                host: self.server.host,
            },
            data: common::config::Data {
                path: self.data.path,
            },
            auth: common::config::Auth {
                access_token_duration: parse_duration(self.auth.access_token_duration.as_str())?,
                refresh_token_duration: parse_duration(self.auth.refresh_token_duration.as_str())?,
                access_token_key: self.auth.access_token_key,
                refresh_token_key: self.auth.refresh_token_key,
            },
            client: common::config::Client {
                id: self.client.id,
                secret: self.client.secret,
            },
            seed: common::config::Seed {
                admin_email: self.seed.admin_email,
                admin_password: self.seed.admin_password,
                user_email: self.seed.user_email,
                user_password: self.seed.user_password,
            },
            log: common::config::Log {
                level: self.log.level.into(),
            },
        })
    }
}

#[derive(Deserialize, Copy, Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    #[serde(rename = "trace")]
    Trace,
    #[serde(rename = "debug")]
    Debug,
    #[serde(rename = "info")]
    Info,
    #[serde(rename = "warn")]
    Warn,
    #[serde(rename = "error")]
    Error,
}

impl From<LogLevel> for LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
        .into()
    }
}
