// Engine errors and the per-field error store

use fieldcheck_config::ConfigError;
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Errors raised by registration, parsing and validation calls.
///
/// A value failing a rule is not an error: it is recorded in the
/// [`ErrorStore`] and reported through the engine's summary accessors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// A registration call was missing its field, label or rules
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A rule spec string did not follow the grammar
    #[error("Invalid rule spec '{spec}': {reason}")]
    Parse { spec: String, reason: String },

    /// A field references a rule with no registered validator
    #[error("Unknown rule '{rule}' on field '{field}'")]
    UnknownRule { field: String, rule: String },

    /// A validator could not interpret the parameters it was given
    #[error("Invalid parameter for rule '{rule}': {reason}")]
    InvalidParameter { rule: String, reason: String },

    /// Engine configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl ValidationError {
    pub(crate) fn parse(spec: &str, reason: impl Into<String>) -> Self {
        ValidationError::Parse {
            spec: spec.to_string(),
            reason: reason.into(),
        }
    }

    /// Shorthand for validators rejecting their parameters
    pub fn invalid_parameter(rule: &str, reason: impl Into<String>) -> Self {
        ValidationError::InvalidParameter {
            rule: rule.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ValidationError>;

/// Failure messages recorded for one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldErrors {
    /// Field id
    pub field: String,

    /// Messages in rule order
    pub messages: Vec<String>,
}

/// Failure messages keyed by field id, in first-failure order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorStore {
    errors: IndexMap<String, Vec<String>>,
}

impl ErrorStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if there are any errors
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Total number of messages across all fields
    pub fn len(&self) -> usize {
        self.errors.values().map(Vec::len).sum()
    }

    /// Record a message for a field
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    /// Messages for a specific field
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.errors.get(field).map(Vec::as_slice)
    }

    pub fn clear(&mut self) {
        self.errors.clear();
    }

    /// All messages, field by field
    pub fn summary(&self) -> Vec<String> {
        self.errors.values().flatten().cloned().collect()
    }

    /// Ids of fields with at least one message
    pub fn fields(&self) -> Vec<String> {
        self.errors.keys().cloned().collect()
    }

    /// One record per failing field
    pub fn detail(&self) -> Vec<FieldErrors> {
        self.errors
            .iter()
            .map(|(field, messages)| FieldErrors {
                field: field.clone(),
                messages: messages.clone(),
            })
            .collect()
    }

    /// Join the summary with open/close wrappers around the list and each item.
    ///
    /// Returns `None` when there is nothing to report.
    pub fn format(&self, outer: (&str, &str), inner: (&str, &str)) -> Option<String> {
        if self.is_empty() {
            return None;
        }

        let mut lines = Vec::with_capacity(self.len() * 3 + 2);
        lines.push(outer.0.to_string());
        for message in self.errors.values().flatten() {
            lines.push(inner.0.to_string());
            lines.push(message.clone());
            lines.push(inner.1.to_string());
        }
        lines.push(outer.1.to_string());

        Some(lines.join("\n"))
    }

    /// Convert to JSON representation
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({ "errors": self.detail() })
    }
}

impl fmt::Display for ErrorStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (field, messages) in &self.errors {
            for message in messages {
                writeln!(f, "{}: {}", field, message)?;
            }
        }
        Ok(())
    }
}
