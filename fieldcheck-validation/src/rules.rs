// Rule spec grammar

use crate::{Result, ValidationError};
use indexmap::IndexMap;

/// Parsed rules: rule name to parameters, in first-appearance order
pub type RuleMap = IndexMap<String, Vec<String>>;

/// Parse a rule spec such as `required|minlength[8]|between[8,10]`.
///
/// Rules are separated by `|`. A rule is a bare name or a name followed by
/// one bracketed, comma-separated parameter list which must end the rule.
/// Brackets inside the list must be balanced. Parameters are kept verbatim;
/// commas cannot be escaped. A name that appears twice has the later
/// parameters appended to the earlier entry.
///
/// ```
/// use fieldcheck_validation::parse_rules;
///
/// let rules = parse_rules("required|email|minlength[8]|between[8,10]").unwrap();
///
/// assert_eq!(rules.len(), 4);
/// assert!(rules["required"].is_empty());
/// assert_eq!(rules["minlength"], vec!["8"]);
/// assert_eq!(rules["between"], vec!["8", "10"]);
/// ```
pub fn parse_rules(spec: &str) -> Result<RuleMap> {
    if spec.trim().is_empty() {
        return Err(ValidationError::parse(spec, "no rules given"));
    }

    let mut rules = RuleMap::new();
    for token in spec.split('|') {
        let (name, params) = parse_token(spec, token.trim())?;
        rules.entry(name.to_string()).or_default().extend(params);
    }

    Ok(rules)
}

fn parse_token<'a>(spec: &str, token: &'a str) -> Result<(&'a str, Vec<String>)> {
    if token.is_empty() {
        return Err(ValidationError::parse(spec, "empty rule between '|' separators"));
    }

    let Some(open) = token.find('[') else {
        if token.contains(']') {
            return Err(ValidationError::parse(
                spec,
                format!("'{}' has ']' without a matching '['", token),
            ));
        }
        return Ok((token, Vec::new()));
    };

    let name = token[..open].trim();
    if name.is_empty() {
        return Err(ValidationError::parse(
            spec,
            format!("'{}' has parameters but no rule name", token),
        ));
    }
    if name.contains(']') {
        return Err(ValidationError::parse(
            spec,
            format!("'{}' has ']' without a matching '['", token),
        ));
    }

    let rest = &token[open + 1..];
    let Some(inner) = rest.strip_suffix(']') else {
        let reason = if rest.contains(']') {
            format!("'{}' has characters after the closing ']'", token)
        } else {
            format!("'{}' has an unterminated '['", token)
        };
        return Err(ValidationError::parse(spec, reason));
    };

    if !balanced(inner) {
        return Err(ValidationError::parse(
            spec,
            format!("'{}' has unbalanced brackets in its parameters", token),
        ));
    }

    let params = if inner.is_empty() {
        Vec::new()
    } else {
        inner.split(',').map(str::to_string).collect()
    };

    Ok((name, params))
}

/// Brackets inside a parameter list must pair up, so `regex[/[A-Z]+/]` is
/// one parameter while `minlength[8][9]` is rejected.
fn balanced(inner: &str) -> bool {
    let mut depth = 0usize;
    for c in inner.chars() {
        match c {
            '[' => depth += 1,
            ']' => match depth.checked_sub(1) {
                Some(d) => depth = d,
                None => return false,
            },
            _ => {}
        }
    }
    depth == 0
}
