// Validator lookup table

use crate::validators::{
    Contains, DateFormat, EndsWith, ExactLength, GreaterThan, IsAlpha, IsAlphanumeric, IsDate,
    IsEmail, IsFloat, IsInteger, IsNumeric, IsPhone, IsUrl, IsZipcode, LessThan, Matches,
    MaxLength, MinLength, NotEmpty, StartsWith, parse_number,
};
use crate::{Result, ValidationError};
use indexmap::IndexMap;
use serde_json::Value;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// A named check run against one field value and the rule's parameters
pub type Predicate = Arc<dyn Fn(&Value, &[String]) -> Result<bool> + Send + Sync>;

/// Whether `value` counts as absent.
///
/// `null`, blank strings, `false` and empty arrays or objects are empty.
/// Numbers never are, zero included.
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => !NotEmpty::is_valid(s),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Number(_) => false,
    }
}

/// Text a string-based check sees for `value`
pub fn value_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s),
        Value::Null => Cow::Borrowed(""),
        other => Cow::Owned(other.to_string()),
    }
}

/// Name to predicate table bound to an engine.
///
/// ```
/// use fieldcheck_validation::Validators;
/// use serde_json::json;
///
/// let mut validators = Validators::builtin();
/// validators.register("even", |value, _params| {
///     value.as_i64().is_some_and(|n| n % 2 == 0)
/// });
///
/// let even = validators.get("even").unwrap();
/// assert!(even(&json!(4), &[]).unwrap());
/// assert!(!even(&json!(3), &[]).unwrap());
/// ```
#[derive(Clone)]
pub struct Validators {
    table: IndexMap<String, Predicate>,
}

impl Validators {
    /// Table with no validators at all
    pub fn empty() -> Self {
        Self {
            table: IndexMap::new(),
        }
    }

    /// Table with every built-in validator; `date` defaults to `MM/DD/YYYY`
    pub fn builtin() -> Self {
        Self::with_date_format(DateFormat::MonthDayYear)
    }

    /// Built-ins with `date` defaulting to the named format
    pub fn builtin_with_date_format(format: &str) -> Result<Self> {
        let format = format
            .parse::<DateFormat>()
            .map_err(|reason| ValidationError::invalid_parameter("date", reason))?;
        Ok(Self::with_date_format(format))
    }

    fn with_date_format(default_format: DateFormat) -> Self {
        let mut validators = Self::empty();

        validators
            .register("required", |value, _| !is_empty_value(value))
            .register_fallible("date", move |value, params| {
                skip_empty(value, |text| {
                    let format = match params.first() {
                        Some(name) => name
                            .parse::<DateFormat>()
                            .map_err(|reason| ValidationError::invalid_parameter("date", reason))?,
                        None => default_format,
                    };
                    Ok(IsDate(format).is_valid(text))
                })
            })
            .register_fallible("minlength", |value, params| {
                skip_empty(value, |text| {
                    Ok(MinLength(length_param("minlength", params)?).is_valid(text))
                })
            })
            .register_fallible("maxlength", |value, params| {
                skip_empty(value, |text| {
                    Ok(MaxLength(length_param("maxlength", params)?).is_valid(text))
                })
            })
            .register_fallible("exactlength", |value, params| {
                skip_empty(value, |text| {
                    Ok(ExactLength(length_param("exactlength", params)?).is_valid(text))
                })
            })
            .register_fallible("greaterthan", |value, params| {
                skip_empty(value, |text| {
                    let bound = number_param("greaterthan", params)?;
                    Ok(parse_number(text.trim()).is_some_and(|n| GreaterThan(bound).is_valid(n)))
                })
            })
            .register_fallible("lessthan", |value, params| {
                skip_empty(value, |text| {
                    let bound = number_param("lessthan", params)?;
                    Ok(parse_number(text.trim()).is_some_and(|n| LessThan(bound).is_valid(n)))
                })
            })
            .register("alpha", |value, _| text_check(value, IsAlpha::is_valid))
            .register("alphanumeric", |value, _| {
                text_check(value, IsAlphanumeric::is_valid)
            })
            .register("integer", |value, _| match value {
                Value::Number(n) => n.is_i64() || n.is_u64(),
                other => text_check(other, IsInteger::is_valid),
            })
            .register("float", |value, _| match value {
                Value::Number(_) => true,
                other => text_check(other, IsFloat::is_valid),
            })
            .register("numeric", |value, _| match value {
                Value::Number(_) => true,
                other => text_check(other, IsNumeric::is_valid),
            })
            .register("email", |value, _| text_check(value, IsEmail::is_valid))
            .register("url", |value, _| text_check(value, IsUrl::is_valid))
            .register("phone", |value, _| text_check(value, IsPhone::is_valid))
            .register("zipcode", |value, _| text_check(value, IsZipcode::is_valid))
            .register_fallible("startswith", |value, params| {
                skip_empty(value, |text| {
                    Ok(StartsWith(text_param("startswith", params)?).is_valid(text))
                })
            })
            .register_fallible("endswith", |value, params| {
                skip_empty(value, |text| {
                    Ok(EndsWith(text_param("endswith", params)?).is_valid(text))
                })
            })
            .register_fallible("contains", |value, params| {
                skip_empty(value, |text| {
                    Ok(Contains(text_param("contains", params)?).is_valid(text))
                })
            })
            .register_fallible("regex", |value, params| {
                skip_empty(value, |text| {
                    let pattern = text_param("regex", params)?;
                    let matcher = Matches::from_delimited(pattern)
                        .map_err(|reason| ValidationError::invalid_parameter("regex", reason))?;
                    Ok(matcher.is_valid(text))
                })
            });

        validators
    }

    /// Register an infallible predicate, replacing any existing one
    pub fn register<F>(&mut self, name: impl Into<String>, predicate: F) -> &mut Self
    where
        F: Fn(&Value, &[String]) -> bool + Send + Sync + 'static,
    {
        self.table.insert(
            name.into(),
            Arc::new(move |value: &Value, params: &[String]| Ok(predicate(value, params))),
        );
        self
    }

    /// Register a predicate that can reject its parameters
    pub fn register_fallible<F>(&mut self, name: impl Into<String>, predicate: F) -> &mut Self
    where
        F: Fn(&Value, &[String]) -> Result<bool> + Send + Sync + 'static,
    {
        self.table.insert(name.into(), Arc::new(predicate));
        self
    }

    /// Builder form of [`register`](Self::register)
    pub fn with<F>(mut self, name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Value, &[String]) -> bool + Send + Sync + 'static,
    {
        self.register(name, predicate);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Predicate> {
        self.table.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.table.contains_key(name)
    }

    /// Registered names in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.table.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl Default for Validators {
    fn default() -> Self {
        Self::builtin()
    }
}

impl fmt::Debug for Validators {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validators")
            .field("names", &self.table.keys().collect::<Vec<_>>())
            .finish()
    }
}

// Parameter helpers

/// Empty values pass; anything else is checked as text
fn skip_empty<F>(value: &Value, check: F) -> Result<bool>
where
    F: FnOnce(&str) -> Result<bool>,
{
    if is_empty_value(value) {
        return Ok(true);
    }
    check(value_text(value).as_ref())
}

fn text_check(value: &Value, check: fn(&str) -> bool) -> bool {
    is_empty_value(value) || check(value_text(value).as_ref())
}

fn text_param<'a>(rule: &str, params: &'a [String]) -> Result<&'a str> {
    params
        .first()
        .map(String::as_str)
        .ok_or_else(|| ValidationError::invalid_parameter(rule, "expected one parameter"))
}

fn length_param(rule: &str, params: &[String]) -> Result<usize> {
    let raw = text_param(rule, params)?;
    raw.trim().parse().map_err(|_| {
        ValidationError::invalid_parameter(rule, format!("'{}' is not a length", raw))
    })
}

fn number_param(rule: &str, params: &[String]) -> Result<f64> {
    let raw = text_param(rule, params)?;
    parse_number(raw.trim()).ok_or_else(|| {
        ValidationError::invalid_parameter(rule, format!("'{}' is not a number", raw))
    })
}
