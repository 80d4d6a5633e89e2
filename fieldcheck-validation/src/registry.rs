// Field registrations

use crate::rules::{RuleMap, parse_rules};
use crate::{Result, ValidationError};
use indexmap::IndexMap;

/// Rule name that marks a field as required
pub const REQUIRED_RULE: &str = "required";

/// Label and rules registered for one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    label: String,
    rules: RuleMap,
}

impl FieldSpec {
    /// Human readable name used in messages
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Rules in evaluation order
    pub fn rules(&self) -> &RuleMap {
        &self.rules
    }

    /// Parameters registered for `rule`
    pub fn params(&self, rule: &str) -> Option<&[String]> {
        self.rules.get(rule).map(Vec::as_slice)
    }

    pub fn has_rule(&self, rule: &str) -> bool {
        self.rules.contains_key(rule)
    }

    pub fn is_required(&self) -> bool {
        self.has_rule(REQUIRED_RULE)
    }
}

/// Registered fields in registration order.
///
/// Registering a field again keeps its first label and merges the new
/// rules into the existing ones: new rule names are appended, and the
/// parameters of a repeated rule name are appended to that rule's list.
#[derive(Debug, Clone, Default)]
pub struct FieldRegistry {
    fields: IndexMap<String, FieldSpec>,
}

impl FieldRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `rules` for `field`. The registry is unchanged on error.
    pub fn add(&mut self, field: &str, label: &str, rules: &str) -> Result<()> {
        let parsed = Self::prepare(field, label, rules)?;
        self.insert(field, label, parsed);
        Ok(())
    }

    /// Check the arguments of a registration and parse its rules.
    pub(crate) fn prepare(field: &str, label: &str, rules: &str) -> Result<RuleMap> {
        if field.trim().is_empty() || label.trim().is_empty() || rules.trim().is_empty() {
            return Err(ValidationError::InvalidArgument(
                "field, label, and rules are required".to_string(),
            ));
        }
        parse_rules(rules)
    }

    pub(crate) fn insert(&mut self, field: &str, label: &str, parsed: RuleMap) {
        let spec = self
            .fields
            .entry(field.to_string())
            .or_insert_with(|| FieldSpec {
                label: label.to_string(),
                rules: RuleMap::new(),
            });

        for (rule, params) in parsed {
            spec.rules.entry(rule).or_default().extend(params);
        }
    }

    pub fn get(&self, field: &str) -> Option<&FieldSpec> {
        self.fields.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldSpec)> {
        self.fields.iter().map(|(id, spec)| (id.as_str(), spec))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Ids of fields carrying the `required` rule
    pub fn required_fields(&self) -> Vec<String> {
        self.fields
            .iter()
            .filter(|(_, spec)| spec.is_required())
            .map(|(id, _)| id.clone())
            .collect()
    }

    pub fn clear(&mut self) {
        self.fields.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_rule_registers_field() {
        let mut registry = FieldRegistry::new();
        registry
            .add("firstname", "First Name", "required|minlength[8]")
            .unwrap();

        let spec = registry.get("firstname").unwrap();
        assert_eq!(spec.label(), "First Name");
        assert_eq!(spec.params("minlength"), Some(&["8".to_string()][..]));
        assert!(spec.is_required());
    }

    #[test]
    fn test_empty_arguments_are_rejected() {
        let mut registry = FieldRegistry::new();

        for (field, label, rules) in [
            ("", "First Name", "required"),
            ("firstname", "", "required"),
            ("firstname", "First Name", ""),
            ("firstname", "  ", "required"),
        ] {
            let result = registry.add(field, label, rules);
            assert!(matches!(result, Err(ValidationError::InvalidArgument(_))));
        }
        assert!(registry.is_empty());
    }

    #[test]
    fn test_parse_error_leaves_registry_unchanged() {
        let mut registry = FieldRegistry::new();
        registry.add("zip", "Zip", "required").unwrap();

        let result = registry.add("zip", "Zip", "zipcode|exactlength[5");
        assert!(matches!(result, Err(ValidationError::Parse { .. })));

        let spec = registry.get("zip").unwrap();
        assert_eq!(spec.rules().len(), 1);
        assert!(!spec.has_rule("zipcode"));
    }

    #[test]
    fn test_reregistration_keeps_first_label_and_appends() {
        let mut registry = FieldRegistry::new();
        registry.add("code", "Code", "required|contains[A]").unwrap();
        registry.add("code", "Other Label", "contains[B]|alpha").unwrap();

        let spec = registry.get("code").unwrap();
        assert_eq!(spec.label(), "Code");

        let names: Vec<_> = spec.rules().keys().map(String::as_str).collect();
        assert_eq!(names, vec!["required", "contains", "alpha"]);
        assert_eq!(spec.params("contains").unwrap(), ["A", "B"]);
    }

    #[test]
    fn test_reregistering_without_params_keeps_existing_params() {
        let mut registry = FieldRegistry::new();
        registry.add("name", "Name", "minlength[2]").unwrap();
        registry.add("name", "Name", "minlength").unwrap();

        assert_eq!(registry.get("name").unwrap().params("minlength").unwrap(), ["2"]);
    }

    #[test]
    fn test_required_fields_in_registration_order() {
        let mut registry = FieldRegistry::new();
        registry.add("lastname", "Last Name", "required").unwrap();
        registry.add("middlename", "Middle Name", "exactlength[1]").unwrap();
        registry.add("firstname", "First Name", "alpha|required").unwrap();

        assert_eq!(registry.required_fields(), vec!["lastname", "firstname"]);
    }

    #[test]
    fn test_clear() {
        let mut registry = FieldRegistry::new();
        registry.add("zip", "Zip", "zipcode").unwrap();
        registry.clear();
        assert!(registry.is_empty());
        assert!(!registry.contains("zip"));
    }
}
