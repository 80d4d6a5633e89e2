// Environment variable loading

use crate::{ConfigError, DEFAULT_ENV_PREFIX, Result};
use std::collections::HashMap;
use std::env;
use std::path::Path;

/// Environment variable loader
///
/// Keys are looked up as `<PREFIX>_<KEY>` and reported back lowercased with
/// the prefix stripped, so `FIELDCHECK_DATE_FORMAT` becomes `date_format`.
#[derive(Debug, Clone)]
pub struct EnvLoader {
    prefix: Option<String>,
}

impl EnvLoader {
    /// Create a new environment loader
    pub fn new(prefix: Option<String>) -> Self {
        Self { prefix }
    }

    /// Loader scoped to the `FIELDCHECK_` prefix
    pub fn fieldcheck() -> Self {
        Self::new(Some(DEFAULT_ENV_PREFIX.to_string()))
    }

    /// Load all matching environment variables
    pub fn load(&self) -> Result<HashMap<String, String>> {
        let mut vars = HashMap::new();

        for (key, value) in env::vars() {
            if let Some(name) = self.strip(&key) {
                vars.insert(name, value);
            }
        }

        Ok(vars)
    }

    /// Load a specific environment variable
    pub fn load_var(&self, key: &str) -> Result<String> {
        env::var(self.full_key(key)).map_err(ConfigError::EnvError)
    }

    /// Load with default value
    pub fn load_var_or(&self, key: &str, default: &str) -> String {
        self.load_var(key).unwrap_or_else(|_| default.to_string())
    }

    /// Load a `.env` file into the process environment.
    ///
    /// With no path the nearest `.env` is used and a missing file is not an
    /// error. An explicit path must exist.
    pub fn load_dotenv(&self, path: Option<&Path>) -> Result<()> {
        match path {
            Some(path) => {
                dotenvy::from_path(path).map_err(|e| ConfigError::LoadError(e.to_string()))?;
            }
            None => {
                dotenvy::dotenv().ok();
            }
        }
        Ok(())
    }

    fn full_key(&self, key: &str) -> String {
        match self.prefix {
            Some(ref prefix) => format!("{}_{}", prefix, key.to_uppercase()),
            None => key.to_uppercase(),
        }
    }

    fn strip(&self, key: &str) -> Option<String> {
        match self.prefix {
            Some(ref prefix) => key
                .strip_prefix(prefix.as_str())
                .and_then(|rest| rest.strip_prefix('_'))
                .filter(|rest| !rest.is_empty())
                .map(str::to_lowercase),
            None => Some(key.to_lowercase()),
        }
    }
}

impl Default for EnvLoader {
    fn default() -> Self {
        Self::fieldcheck()
    }
}
