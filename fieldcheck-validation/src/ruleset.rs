// Reusable rule sets

use fieldcheck_config::{RuleEntry, ValidationConfig};

/// Borrowed view of one `{field, label, rules}` definition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleRef<'a> {
    pub field: &'a str,
    pub label: &'a str,
    pub rules: &'a str,
}

impl<'a> From<&'a RuleEntry> for RuleRef<'a> {
    fn from(entry: &'a RuleEntry) -> Self {
        Self {
            field: &entry.field,
            label: &entry.label,
            rules: &entry.rules,
        }
    }
}

/// Anything that can hand an engine an ordered list of rule definitions
pub trait RuleSet {
    /// Definitions in the order they should be registered
    fn rules(&self) -> Vec<RuleRef<'_>>;
}

/// A rule set built in code, independent of any engine.
///
/// ```
/// use fieldcheck_validation::{Engine, RuleSetDefinition};
///
/// let mut person = RuleSetDefinition::new();
/// person
///     .add_rule("firstname", "First Name", "required|minlength[2]")
///     .add_rule("lastname", "Last Name", "required");
///
/// let mut engine = Engine::new();
/// engine.add_rule_set(&person).unwrap();
/// assert_eq!(engine.required_fields(), vec!["firstname", "lastname"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSetDefinition {
    entries: Vec<RuleEntry>,
}

impl RuleSetDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a definition
    pub fn add_rule(
        &mut self,
        field: impl Into<String>,
        label: impl Into<String>,
        rules: impl Into<String>,
    ) -> &mut Self {
        self.entries.push(RuleEntry {
            field: field.into(),
            label: label.into(),
            rules: rules.into(),
        });
        self
    }

    /// Builder form of [`add_rule`](Self::add_rule)
    pub fn with_rule(
        mut self,
        field: impl Into<String>,
        label: impl Into<String>,
        rules: impl Into<String>,
    ) -> Self {
        self.add_rule(field, label, rules);
        self
    }

    pub fn entries(&self) -> &[RuleEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Vec<RuleEntry>> for RuleSetDefinition {
    fn from(entries: Vec<RuleEntry>) -> Self {
        Self { entries }
    }
}

impl RuleSet for RuleSetDefinition {
    fn rules(&self) -> Vec<RuleRef<'_>> {
        self.entries.iter().map(RuleRef::from).collect()
    }
}

impl RuleSet for [RuleEntry] {
    fn rules(&self) -> Vec<RuleRef<'_>> {
        self.iter().map(RuleRef::from).collect()
    }
}

impl RuleSet for Vec<RuleEntry> {
    fn rules(&self) -> Vec<RuleRef<'_>> {
        self.as_slice().rules()
    }
}

impl RuleSet for ValidationConfig {
    fn rules(&self) -> Vec<RuleRef<'_>> {
        self.rules.rules()
    }
}

impl<'s> RuleSet for [(&'s str, &'s str, &'s str)] {
    fn rules(&self) -> Vec<RuleRef<'_>> {
        self.iter()
            .map(|&(field, label, rules)| RuleRef { field, label, rules })
            .collect()
    }
}
