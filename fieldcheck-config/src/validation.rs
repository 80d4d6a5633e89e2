// Configuration validation

use crate::{ConfigError, Result};

/// Trait for validating configuration
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Shape checks shared by configuration types
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate that a value is not empty or whitespace
    pub fn not_empty(value: &str, key: &str) -> Result<()> {
        if value.trim().is_empty() {
            return Err(ConfigError::invalid(key, "cannot be empty"));
        }
        Ok(())
    }
}
