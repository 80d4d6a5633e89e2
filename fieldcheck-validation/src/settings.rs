// Engine settings

use crate::Result;
use crate::predicates::Validators;
use fieldcheck_config::{DEFAULT_DATE_FORMAT, UnknownRulePolicy, ValidationConfig};

/// Behaviour knobs an engine is built with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSettings {
    /// Handling of rule names without a validator
    pub unknown_rule: UnknownRulePolicy,
    /// Format the built-in `date` rule uses when its spec names none
    pub date_format: String,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            unknown_rule: UnknownRulePolicy::default(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

impl EngineSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_unknown_rule(mut self, policy: UnknownRulePolicy) -> Self {
        self.unknown_rule = policy;
        self
    }

    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }

    /// Built-in validators honouring these settings
    pub(crate) fn builtin_validators(&self) -> Result<Validators> {
        Validators::builtin_with_date_format(&self.date_format)
    }
}

impl From<&ValidationConfig> for EngineSettings {
    fn from(config: &ValidationConfig) -> Self {
        Self {
            unknown_rule: config.unknown_rule,
            date_format: config.date_format.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = EngineSettings::new();
        assert_eq!(settings.unknown_rule, UnknownRulePolicy::Fail);
        assert_eq!(settings.date_format, "MM/DD/YYYY");
        assert!(settings.builtin_validators().is_ok());
    }

    #[test]
    fn test_from_config() {
        let mut config = ValidationConfig::new();
        config.unknown_rule = UnknownRulePolicy::Pass;
        config.date_format = "YYYY-MM-DD".to_string();

        let settings = EngineSettings::from(&config);
        assert_eq!(settings.unknown_rule, UnknownRulePolicy::Pass);
        assert_eq!(settings.date_format, "YYYY-MM-DD");
    }

    #[test]
    fn test_unknown_date_format_is_rejected() {
        let settings = EngineSettings::new().with_date_format("tomorrow");
        assert!(settings.builtin_validators().is_err());
    }
}
