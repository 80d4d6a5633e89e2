//! Configuration for fieldcheck validation engines
//!
//! A [`ValidationConfig`] carries everything an engine can be seeded with
//! outside of code: engine settings, message template overrides and rule
//! definitions. It can be assembled from environment variables, `.env`
//! files, JSON or TOML.
//!
//! ```
//! use fieldcheck_config::{FileFormat, ConfigLoader, UnknownRulePolicy, ValidationConfig};
//!
//! let toml = r#"
//!     unknown_rule = "pass"
//!
//!     [messages]
//!     required = "Please fill in {name}."
//!
//!     [[rules]]
//!     field = "zip"
//!     label = "Zip Code"
//!     rules = "required|zipcode"
//! "#;
//!
//! let value = ConfigLoader::new(FileFormat::Toml).parse(toml).unwrap();
//! let config = ValidationConfig::from_value(value).unwrap();
//!
//! assert_eq!(config.unknown_rule, UnknownRulePolicy::Pass);
//! assert_eq!(config.rules[0].field, "zip");
//! ```

pub mod env;
pub mod error;
pub mod loader;
pub mod validation;

pub use env::EnvLoader;
pub use error::{ConfigError, Result};
pub use loader::{ConfigLoader, FileFormat};
pub use validation::{ConfigValidator, Validate};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

/// Prefix for environment variables read by [`ValidationConfig::from_env`].
pub const DEFAULT_ENV_PREFIX: &str = "FIELDCHECK";

/// Date format used by the `date` rule when none is given in the rule spec.
pub const DEFAULT_DATE_FORMAT: &str = "MM/DD/YYYY";

/// What an engine does with a rule name that has no registered validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownRulePolicy {
    /// Abort validation with an error before any rule runs
    #[default]
    Fail,
    /// Skip the rule as if it passed
    Pass,
}

impl UnknownRulePolicy {
    pub const NAMES: [&'static str; 2] = ["fail", "pass"];

    pub fn as_str(&self) -> &'static str {
        match self {
            UnknownRulePolicy::Fail => "fail",
            UnknownRulePolicy::Pass => "pass",
        }
    }
}

impl FromStr for UnknownRulePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "fail" => Ok(UnknownRulePolicy::Fail),
            "pass" => Ok(UnknownRulePolicy::Pass),
            other => Err(ConfigError::invalid(
                "unknown_rule",
                format!("'{}' must be one of: {}", other, Self::NAMES.join(", ")),
            )),
        }
    }
}

/// One `{field, label, rules}` definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleEntry {
    pub field: String,
    pub label: String,
    pub rules: String,
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Handling of rule names without a validator
    pub unknown_rule: UnknownRulePolicy,
    /// Default format for the `date` rule
    pub date_format: String,
    /// Message template overrides keyed by rule name
    pub messages: IndexMap<String, String>,
    /// Rule definitions, applied in order
    pub rules: Vec<RuleEntry>,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            unknown_rule: UnknownRulePolicy::default(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            messages: IndexMap::new(),
            rules: Vec::new(),
        }
    }
}

impl ValidationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Settings from `FIELDCHECK_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_env_with(&EnvLoader::fieldcheck())
    }

    /// Settings from the variables visible to `loader`.
    pub fn from_env_with(loader: &EnvLoader) -> Result<Self> {
        let vars = loader.load()?;
        let mut config = Self::new();
        config.apply_settings(&vars)?;
        Ok(config)
    }

    /// Load a JSON, TOML or env file, picking the format from the path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let loader = ConfigLoader::auto(path)?;
        let value = loader.load_file(path)?;

        if loader.format() == FileFormat::Env {
            let vars = flatten_env(&value);
            let mut config = Self::new();
            config.apply_settings(&vars)?;
            return Ok(config);
        }

        Self::from_value(value)
    }

    /// Deserialize and validate an already parsed document.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let config: Self = serde_json::from_value(value)
            .map_err(|e| ConfigError::DeserializationError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Append a rule definition.
    pub fn add_rule(
        &mut self,
        field: impl Into<String>,
        label: impl Into<String>,
        rules: impl Into<String>,
    ) -> &mut Self {
        self.rules.push(RuleEntry {
            field: field.into(),
            label: label.into(),
            rules: rules.into(),
        });
        self
    }

    /// Set a message override, replacing any earlier one for `rule`.
    pub fn add_message(&mut self, rule: impl Into<String>, template: impl Into<String>) -> &mut Self {
        self.messages.insert(rule.into(), template.into());
        self
    }

    /// Layer `other` on top of this configuration.
    ///
    /// Settings that differ from their defaults in `other` win, messages
    /// from `other` replace ours, and its rules are appended after ours.
    pub fn merge(&mut self, other: ValidationConfig) {
        if other.unknown_rule != UnknownRulePolicy::default() {
            self.unknown_rule = other.unknown_rule;
        }
        if other.date_format != DEFAULT_DATE_FORMAT {
            self.date_format = other.date_format;
        }
        self.messages.extend(other.messages);
        self.rules.extend(other.rules);
    }

    fn apply_settings(&mut self, vars: &HashMap<String, String>) -> Result<()> {
        if let Some(policy) = vars.get("unknown_rule") {
            self.unknown_rule = policy.parse()?;
        }
        if let Some(format) = vars.get("date_format") {
            ConfigValidator::not_empty(format, "date_format")?;
            self.date_format = format.trim().to_string();
        }
        Ok(())
    }
}

impl Validate for ValidationConfig {
    fn validate(&self) -> Result<()> {
        ConfigValidator::not_empty(&self.date_format, "date_format")?;

        for (rule, template) in &self.messages {
            ConfigValidator::not_empty(rule, "messages")?;
            ConfigValidator::not_empty(template, &format!("messages.{}", rule))?;
        }

        for (index, entry) in self.rules.iter().enumerate() {
            ConfigValidator::not_empty(&entry.field, &format!("rules[{}].field", index))?;
            ConfigValidator::not_empty(&entry.label, &format!("rules[{}].label", index))?;
            ConfigValidator::not_empty(&entry.rules, &format!("rules[{}].rules", index))?;
        }

        Ok(())
    }
}

/// Normalize `KEY=value` pairs to lowercase setting names without the prefix.
fn flatten_env(value: &serde_json::Value) -> HashMap<String, String> {
    let prefix = format!("{}_", DEFAULT_ENV_PREFIX.to_lowercase());
    let mut vars = HashMap::new();

    if let serde_json::Value::Object(map) = value {
        for (key, value) in map {
            let key = key.to_lowercase();
            let key = key.strip_prefix(&prefix).unwrap_or(&key).to_string();
            if let Some(value) = value.as_str() {
                vars.insert(key, value.to_string());
            }
        }
    }

    vars
}
