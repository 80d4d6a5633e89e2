// Message templates

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;

/// Placeholder replaced with the field label
pub const NAME_PLACEHOLDER: &str = "{name}";

/// Template used for rules without a message of their own
pub const FALLBACK_MESSAGE: &str = "{name} is invalid.";

/// Messages every engine starts with
pub const DEFAULT_MESSAGES: &[(&str, &str)] = &[
    ("required", "{name} is a required field."),
    ("date", "{name} must be a valid date."),
    ("minlength", "{name} must be at least %s characters long."),
    ("maxlength", "{name} cannot be longer than %d characters."),
    ("exactlength", "{name} must be exactly %d characters."),
    ("greaterthan", "{name} must be greater than %d."),
    ("lessthan", "{name} must be less than %d."),
    ("alpha", "{name} must only contain the letters A-Z."),
    (
        "alphanumeric",
        "{name} must only contain the letters A-Z and numbers 0-9.",
    ),
    ("integer", "{name} must be a whole number with no decimals"),
    ("float", "{name} must be a number."),
    ("numeric", "{name} must be numeric."),
    ("email", "{name} must be a valid email address."),
    ("url", "{name} must be a valid url."),
    ("phone", "{name} must be a valid phone number."),
    ("zipcode", "{name} must be a valid zip code."),
    ("startswith", "{name} must start with %s."),
    ("endswith", "{name} must end with %s."),
    ("contains", "{name} must contain %s."),
    ("regex", "{name} is not in the correct format."),
];

static LEADING_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?(\d+(\.\d*)?|\.\d+)([eE][+-]?\d+)?").unwrap());

/// Rule name to message template, owned per engine.
///
/// Templates may contain `{name}` for the field label and printf-style
/// placeholders filled from the rule parameters in order: `%s` inserts the
/// parameter as is, `%d` its integer part, `%f` the number with six
/// decimals, and `%%` a literal percent sign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageTable {
    templates: IndexMap<String, String>,
}

impl MessageTable {
    /// Table seeded with [`DEFAULT_MESSAGES`]
    pub fn new() -> Self {
        let templates = DEFAULT_MESSAGES
            .iter()
            .map(|(rule, template)| (rule.to_string(), template.to_string()))
            .collect();
        Self { templates }
    }

    /// Table with no templates; every rule uses the fallback
    pub fn empty() -> Self {
        Self {
            templates: IndexMap::new(),
        }
    }

    /// Override the template for `rule`
    pub fn set(&mut self, rule: impl Into<String>, template: impl Into<String>) {
        self.templates.insert(rule.into(), template.into());
    }

    pub fn get(&self, rule: &str) -> Option<&str> {
        self.templates.get(rule).map(String::as_str)
    }

    /// Template for `rule`, or the fallback
    pub fn template(&self, rule: &str) -> &str {
        self.get(rule).unwrap_or(FALLBACK_MESSAGE)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.templates
            .iter()
            .map(|(rule, template)| (rule.as_str(), template.as_str()))
    }

    /// Render the message for a failed rule.
    ///
    /// ```
    /// use fieldcheck_validation::MessageTable;
    ///
    /// let messages = MessageTable::new();
    /// assert_eq!(
    ///     messages.format("Foo", "minlength", &["8".to_string()]),
    ///     "Foo must be at least 8 characters long."
    /// );
    /// assert_eq!(messages.format("Foo", "doesnotexist", &[]), "Foo is invalid.");
    /// ```
    pub fn format(&self, label: &str, rule: &str, params: &[String]) -> String {
        let labelled = self
            .template(rule)
            .replace(NAME_PLACEHOLDER, &label.replace('%', "%%"));
        interpolate(&labelled, params)
    }
}

impl Default for MessageTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Fill printf-style placeholders from `params` in order.
///
/// A placeholder with no parameter left stays in the output as written and
/// surplus parameters are ignored.
pub fn interpolate(template: &str, params: &[String]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut params = params.iter();
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        match chars.peek().copied() {
            Some('%') => {
                chars.next();
                out.push('%');
            }
            Some(conv @ ('s' | 'd' | 'f')) => {
                chars.next();
                match params.next() {
                    Some(param) => out.push_str(&convert(conv, param)),
                    None => {
                        out.push('%');
                        out.push(conv);
                    }
                }
            }
            _ => out.push('%'),
        }
    }

    out
}

fn convert(conv: char, param: &str) -> String {
    match conv {
        'd' => format!("{}", leading_number(param).trunc() as i64),
        'f' => format!("{:.6}", leading_number(param)),
        _ => param.to_string(),
    }
}

/// Numeric prefix of `s`, or zero when it does not start with a number
fn leading_number(s: &str) -> f64 {
    LEADING_NUMBER
        .find(s.trim_start())
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0.0)
}
