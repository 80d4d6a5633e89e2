// Validation engine

use crate::errors::{ErrorStore, FieldErrors};
use crate::messages::MessageTable;
use crate::predicates::Validators;
use crate::registry::{FieldRegistry, FieldSpec};
use crate::rules::{RuleMap, parse_rules};
use crate::ruleset::RuleSet;
use crate::settings::EngineSettings;
use crate::{Result, ValidationError};
use fieldcheck_config::{UnknownRulePolicy, Validate, ValidationConfig};
use serde_json::{Map, Value};
use tracing::{debug, trace, warn};

/// List wrapper used by [`Engine::error_summary_html`]
pub const HTML_OUTER_WRAPPER: (&str, &str) =
    ("<div class=\"alert alert-danger\"><ul>", "</ul></div>");

/// Item wrapper used by [`Engine::error_summary_html`]
pub const HTML_INNER_WRAPPER: (&str, &str) = ("<li>", "</li>");

/// Declarative field validation engine.
///
/// Fields are registered with a label and a rule spec, then whole records
/// are checked against every rule of every field. Failures are collected
/// as messages rather than returned as errors; `Err` is reserved for
/// misuse such as malformed rule specs or rules with no validator.
///
/// ```
/// use fieldcheck_validation::Engine;
/// use serde_json::json;
///
/// let mut engine = Engine::new();
/// engine.add_rule("firstname", "First Name", "required|alpha|minlength[2]").unwrap();
/// engine.add_rule("lastname", "Last Name", "required").unwrap();
///
/// let valid = engine.validate([("firstname", json!("1"))]).unwrap();
///
/// assert!(!valid);
/// assert_eq!(engine.error_fields(), vec!["firstname", "lastname"]);
/// assert_eq!(engine.error_summary().len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct Engine {
    validators: Validators,
    registry: FieldRegistry,
    errors: ErrorStore,
    messages: MessageTable,
    data: Map<String, Value>,
    settings: EngineSettings,
}

impl Engine {
    /// Engine with the built-in validators and default settings
    pub fn new() -> Self {
        Self::with_validators(Validators::builtin())
    }

    /// Engine bound to a custom validator table
    pub fn with_validators(validators: Validators) -> Self {
        Self {
            validators,
            registry: FieldRegistry::new(),
            errors: ErrorStore::new(),
            messages: MessageTable::new(),
            data: Map::new(),
            settings: EngineSettings::default(),
        }
    }

    /// Engine with the built-in validators configured by `settings`
    pub fn with_settings(settings: EngineSettings) -> Result<Self> {
        let mut engine = Self::with_validators(settings.builtin_validators()?);
        engine.settings = settings;
        Ok(engine)
    }

    /// Build an engine from a loaded configuration.
    ///
    /// Settings are applied first, then message overrides, then the rule
    /// definitions as one rule set.
    pub fn from_config(config: &ValidationConfig) -> Result<Self> {
        config.validate()?;

        let mut engine = Self::with_settings(EngineSettings::from(config))?;
        for (rule, template) in &config.messages {
            engine.add_custom_message(rule, template);
        }
        engine.add_rule_set(config)?;

        debug!(
            fields = engine.registry.len(),
            messages = config.messages.len(),
            "Engine configured"
        );
        Ok(engine)
    }

    /// Change how rules without a validator are handled
    pub fn set_unknown_rule_policy(&mut self, policy: UnknownRulePolicy) {
        self.settings.unknown_rule = policy;
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn validators(&self) -> &Validators {
        &self.validators
    }

    /// Register further validators on this engine
    pub fn validators_mut(&mut self) -> &mut Validators {
        &mut self.validators
    }

    // Registration

    /// Parse a rule spec without registering it
    pub fn parse_rule(&self, spec: &str) -> Result<RuleMap> {
        parse_rules(spec)
    }

    /// Register `rules` for `field` under a human readable `label`.
    ///
    /// Registering a field again keeps the first label and appends to its
    /// rules. Nothing is registered when an argument is empty or the rule spec
    /// does not parse.
    pub fn add_rule(&mut self, field: &str, label: &str, rules: &str) -> Result<()> {
        self.registry.add(field, label, rules)?;
        debug!(field = %field, rules = %rules, "Registered rules");
        Ok(())
    }

    /// Register every definition of `set`, or none of them.
    pub fn add_rule_set<S>(&mut self, set: &S) -> Result<()>
    where
        S: RuleSet + ?Sized,
    {
        let refs = set.rules();
        let mut prepared = Vec::with_capacity(refs.len());
        for rule in &refs {
            let parsed = FieldRegistry::prepare(rule.field, rule.label, rule.rules)?;
            prepared.push((rule.field, rule.label, parsed));
        }

        for (field, label, parsed) in prepared {
            self.registry.insert(field, label, parsed);
        }

        debug!(definitions = refs.len(), "Added rule set");
        Ok(())
    }

    /// Ids of fields carrying the `required` rule, in registration order
    pub fn required_fields(&self) -> Vec<String> {
        self.registry.required_fields()
    }

    /// Registered fields in registration order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldSpec)> {
        self.registry.iter()
    }

    pub fn field(&self, id: &str) -> Option<&FieldSpec> {
        self.registry.get(id)
    }

    pub fn label(&self, id: &str) -> Option<&str> {
        self.registry.get(id).map(FieldSpec::label)
    }

    // Validation

    /// Validate a record given as `(key, value)` pairs.
    ///
    /// Values are anything convertible into a JSON [`Value`], so plain string
    /// form maps work as well as JSON records.
    ///
    /// Fields missing from the record are checked as `null`. Returns
    /// `Ok(true)` when no failures are on record after the pass; failures
    /// from earlier passes count until [`reset`](Self::reset) or
    /// [`clear_errors`](Self::clear_errors).
    pub fn validate<I, K, V>(&mut self, data: I) -> Result<bool>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.validate_with_default(data, Value::Null)
    }

    /// Like [`validate`](Self::validate), checking missing fields as `default`
    pub fn validate_with_default<I, K, V>(&mut self, data: I, default: Value) -> Result<bool>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let mut snapshot = Map::new();
        for (key, value) in data {
            snapshot.insert(key.into(), value.into());
        }
        self.run(snapshot, &default)
    }

    /// Validate a JSON object
    pub fn validate_json(&mut self, data: &Value) -> Result<bool> {
        let Value::Object(map) = data else {
            return Err(ValidationError::InvalidArgument(format!(
                "validation input must be a JSON object, got {}",
                json_kind(data)
            )));
        };
        self.run(map.clone(), &Value::Null)
    }

    fn run(&mut self, snapshot: Map<String, Value>, default: &Value) -> Result<bool> {
        self.check_rules()?;

        let mut failures = Vec::new();
        for (field, spec) in self.registry.iter() {
            let value = snapshot.get(field).unwrap_or(default);

            for (rule, params) in spec.rules() {
                let Some(predicate) = self.validators.get(rule) else {
                    continue;
                };
                if !predicate(value, params.as_slice())? {
                    trace!(field = %field, rule = %rule, "Rule failed");
                    let message = self.messages.format(spec.label(), rule, params);
                    failures.push((field.to_string(), message));
                }
            }
        }

        for (field, message) in failures {
            self.errors.add(field, message);
        }
        self.data = snapshot;

        debug!(
            fields = self.registry.len(),
            errors = self.errors.len(),
            "Validated record"
        );
        Ok(self.errors.is_empty())
    }

    /// Every registered rule must have a validator before anything runs
    fn check_rules(&self) -> Result<()> {
        for (field, spec) in self.registry.iter() {
            for rule in spec.rules().keys() {
                if self.validators.contains(rule) {
                    continue;
                }
                match self.settings.unknown_rule {
                    UnknownRulePolicy::Fail => {
                        return Err(ValidationError::UnknownRule {
                            field: field.to_string(),
                            rule: rule.clone(),
                        });
                    }
                    UnknownRulePolicy::Pass => {
                        warn!(field = %field, rule = %rule, "No validator for rule, skipping");
                    }
                }
            }
        }
        Ok(())
    }

    /// Value of a registered field in the last validated record
    pub fn get_data(&self, field: &str) -> Option<&Value> {
        if !self.registry.contains(field) {
            return None;
        }
        self.data.get(field)
    }

    /// The last validated record
    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    // Error reporting

    /// All failure messages, field by field in first-failure order
    pub fn error_summary(&self) -> Vec<String> {
        self.errors.summary()
    }

    /// The summary with each message and the whole list wrapped, one part
    /// per line; `None` when there are no failures.
    pub fn error_summary_formatted(
        &self,
        outer: (&str, &str),
        inner: (&str, &str),
    ) -> Option<String> {
        self.errors.format(outer, inner)
    }

    /// The summary as an HTML alert list
    pub fn error_summary_html(&self) -> Option<String> {
        self.error_summary_formatted(HTML_OUTER_WRAPPER, HTML_INNER_WRAPPER)
    }

    pub fn error_detail(&self) -> Vec<FieldErrors> {
        self.errors.detail()
    }

    /// Ids of fields with at least one failure
    pub fn error_fields(&self) -> Vec<String> {
        self.errors.fields()
    }

    pub fn errors(&self) -> &ErrorStore {
        &self.errors
    }

    // Messages

    /// Override the message template for `rule`
    pub fn add_custom_message(&mut self, rule: &str, template: &str) {
        self.messages.set(rule, template);
    }

    /// Render the message a failure of `rule` on a field labelled `label` produces
    pub fn get_message(&self, label: &str, rule: &str, params: &[String]) -> String {
        self.messages.format(label, rule, params)
    }

    pub fn messages(&self) -> &MessageTable {
        &self.messages
    }

    // State

    /// Forget registrations, failures and the last record. Messages,
    /// validators and settings are kept.
    pub fn reset(&mut self) {
        self.registry.clear();
        self.errors.clear();
        self.data.clear();
        debug!("Engine reset");
    }

    /// Forget recorded failures only
    pub fn clear_errors(&mut self) {
        self.errors.clear();
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
