// Error types for configuration loading

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// A file could not be found, read or recognised
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    /// A document was not valid JSON, TOML or env syntax
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// A setting was present but unusable
    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// A parsed document did not have the shape of a `ValidationConfig`
    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    #[error("Environment variable error: {0}")]
    EnvError(#[from] std::env::VarError),
}

impl ConfigError {
    pub(crate) fn invalid(key: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;
