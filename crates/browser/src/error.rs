use context_records::RecordError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BrowserError>;

#[derive(Error, Debug)]
pub enum BrowserError {
    #[error("Record error: {0}")]
    Records(#[from] RecordError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),
}
