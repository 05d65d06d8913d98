use std::result;

use thiserror::Error;

pub type Result<T> = result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("config: {0:?}")]
    Config(#[from] config::ConfigError),
    #[error("duration: {0:?}")]
    DurationParse(#[from] parse_duration::parse::Error),
    #[error("duration out of range: {0:?}")]
    DurationRange(#[from] chrono::OutOfRangeError),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("metadata: {0:?}")]
    Metadata(#[from] metadata::error::MetadataError),
    #[error("platform: {0:?}")]
    Platform(#[from] platform::PlatformError),
    #[error("{0:?}")]
    Other(#[from] anyhow::Error),
}
