// Built-in validators

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

// Common regex patterns
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$").unwrap()
});

static URL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.-]*://[^\s/$.?#].[^\s]*$").unwrap());

static ALPHA_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z]+$").unwrap());

static ALPHANUMERIC_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z0-9]+$").unwrap());

static INTEGER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[+-]?(0|[1-9][0-9]*)$").unwrap());

static FLOAT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?([0-9]+(\.[0-9]*)?|\.[0-9]+)([eE][+-]?[0-9]+)?$").unwrap()
});

static PHONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\(?([0-9]{3})\)?[- ]?([0-9]{3})[- ]?([0-9]{4})$").unwrap());

static ZIPCODE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{5}(-\d{4})?$").unwrap());

static DATE_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"[-./ ]").unwrap());

// String validators

/// Validates that a string holds something other than whitespace
pub struct NotEmpty;

impl NotEmpty {
    pub fn is_valid(value: &str) -> bool {
        !value.trim().is_empty()
    }
}

/// Length of `value` in characters, ignoring surrounding whitespace
fn trimmed_len(value: &str) -> usize {
    value.trim().chars().count()
}

/// Validates minimum string length
pub struct MinLength(pub usize);

impl MinLength {
    pub fn is_valid(&self, value: &str) -> bool {
        trimmed_len(value) >= self.0
    }
}

/// Validates maximum string length
pub struct MaxLength(pub usize);

impl MaxLength {
    pub fn is_valid(&self, value: &str) -> bool {
        trimmed_len(value) <= self.0
    }
}

/// Validates exact string length
pub struct ExactLength(pub usize);

impl ExactLength {
    pub fn is_valid(&self, value: &str) -> bool {
        trimmed_len(value) == self.0
    }
}

/// Validates alphabetic characters only
pub struct IsAlpha;

impl IsAlpha {
    pub fn is_valid(value: &str) -> bool {
        ALPHA_REGEX.is_match(value)
    }
}

/// Validates alphanumeric characters only
pub struct IsAlphanumeric;

impl IsAlphanumeric {
    pub fn is_valid(value: &str) -> bool {
        ALPHANUMERIC_REGEX.is_match(value)
    }
}

/// Validates email format
pub struct IsEmail;

impl IsEmail {
    pub fn is_valid(value: &str) -> bool {
        EMAIL_REGEX.is_match(value)
    }
}

/// Validates URL format
pub struct IsUrl;

impl IsUrl {
    pub fn is_valid(value: &str) -> bool {
        URL_REGEX.is_match(value)
    }
}

/// Validates a ten digit US phone number
pub struct IsPhone;

impl IsPhone {
    pub fn is_valid(value: &str) -> bool {
        PHONE_REGEX.is_match(value)
    }
}

/// Validates a five or nine digit US zip code
pub struct IsZipcode;

impl IsZipcode {
    pub fn is_valid(value: &str) -> bool {
        ZIPCODE_REGEX.is_match(value)
    }
}

/// Validates a literal prefix
pub struct StartsWith<'a>(pub &'a str);

impl StartsWith<'_> {
    pub fn is_valid(&self, value: &str) -> bool {
        value.starts_with(self.0)
    }
}

/// Validates a literal suffix
pub struct EndsWith<'a>(pub &'a str);

impl EndsWith<'_> {
    pub fn is_valid(&self, value: &str) -> bool {
        value.ends_with(self.0)
    }
}

/// Validates a literal substring
pub struct Contains<'a>(pub &'a str);

impl Contains<'_> {
    pub fn is_valid(&self, value: &str) -> bool {
        value.contains(self.0)
    }
}

// Number validators

/// Validates an optionally signed whole number that fits in an `i64`
pub struct IsInteger;

impl IsInteger {
    pub fn is_valid(value: &str) -> bool {
        let value = value.trim();
        INTEGER_REGEX.is_match(value) && value.parse::<i64>().is_ok()
    }
}

/// Validates a decimal number with optional fraction and exponent
pub struct IsFloat;

impl IsFloat {
    pub fn is_valid(value: &str) -> bool {
        parse_number(value.trim()).is_some()
    }
}

/// Any numeric string, surrounding whitespace allowed
pub struct IsNumeric;

impl IsNumeric {
    pub fn is_valid(value: &str) -> bool {
        IsFloat::is_valid(value)
    }
}

/// Parse a decimal number written without surrounding whitespace
pub fn parse_number(value: &str) -> Option<f64> {
    if !FLOAT_REGEX.is_match(value) {
        return None;
    }
    value.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Validates a number strictly above a bound
pub struct GreaterThan(pub f64);

impl GreaterThan {
    pub fn is_valid(&self, value: f64) -> bool {
        value > self.0
    }
}

/// Validates a number strictly below a bound
pub struct LessThan(pub f64);

impl LessThan {
    pub fn is_valid(&self, value: f64) -> bool {
        value < self.0
    }
}

// Date validators

/// Order of the year, month and day parts in a date string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    /// `YYYY/MM/DD` or `YYYY-MM-DD`
    YearMonthDay,
    /// `YYYY/DD/MM` or `YYYY-DD-MM`
    YearDayMonth,
    /// `DD-MM-YYYY` or `DD/MM/YYYY`
    DayMonthYear,
    /// `MM-DD-YYYY` or `MM/DD/YYYY`
    MonthDayYear,
    /// `YYYYMMDD`
    CompactYearMonthDay,
    /// `YYYYDDMM`
    CompactYearDayMonth,
}

impl DateFormat {
    /// Format names accepted by [`FromStr`]
    pub const NAMES: &'static [&'static str] = &[
        "YYYY/MM/DD",
        "YYYY-MM-DD",
        "YYYY/DD/MM",
        "YYYY-DD-MM",
        "DD-MM-YYYY",
        "DD/MM/YYYY",
        "MM-DD-YYYY",
        "MM/DD/YYYY",
        "YYYYMMDD",
        "YYYYDDMM",
    ];

    /// Split `value` into `(year, month, day)` according to this format.
    ///
    /// Separated formats accept `-`, `.`, `/` or a space between parts.
    /// Compact formats take exactly eight digits.
    pub fn split(self, value: &str) -> Option<(i32, u32, u32)> {
        let (year, first, second) = match self {
            DateFormat::CompactYearMonthDay | DateFormat::CompactYearDayMonth => {
                if value.len() != 8 || !value.bytes().all(|b| b.is_ascii_digit()) {
                    return None;
                }
                (&value[0..4], &value[4..6], &value[6..8])
            }
            _ => {
                let parts: Vec<&str> = DATE_SEPARATOR.split(value).collect();
                let [a, b, c] = parts[..] else {
                    return None;
                };
                match self {
                    DateFormat::YearMonthDay | DateFormat::YearDayMonth => (a, b, c),
                    _ => (c, a, b),
                }
            }
        };

        let year = digits(year)?;
        let first = digits(first)?;
        let second = digits(second)?;

        match self {
            DateFormat::YearMonthDay
            | DateFormat::CompactYearMonthDay
            | DateFormat::MonthDayYear => Some((year as i32, first, second)),
            DateFormat::YearDayMonth
            | DateFormat::CompactYearDayMonth
            | DateFormat::DayMonthYear => Some((year as i32, second, first)),
        }
    }
}

fn digits(part: &str) -> Option<u32> {
    if part.is_empty() || part.len() > 9 || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

impl FromStr for DateFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "YYYY/MM/DD" | "YYYY-MM-DD" => Ok(DateFormat::YearMonthDay),
            "YYYY/DD/MM" | "YYYY-DD-MM" => Ok(DateFormat::YearDayMonth),
            "DD-MM-YYYY" | "DD/MM/YYYY" => Ok(DateFormat::DayMonthYear),
            "MM-DD-YYYY" | "MM/DD/YYYY" => Ok(DateFormat::MonthDayYear),
            "YYYYMMDD" => Ok(DateFormat::CompactYearMonthDay),
            "YYYYDDMM" => Ok(DateFormat::CompactYearDayMonth),
            other => Err(format!(
                "unknown date format '{}', expected one of: {}",
                other,
                DateFormat::NAMES.join(", ")
            )),
        }
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DateFormat::YearMonthDay => "YYYY-MM-DD",
            DateFormat::YearDayMonth => "YYYY-DD-MM",
            DateFormat::DayMonthYear => "DD/MM/YYYY",
            DateFormat::MonthDayYear => "MM/DD/YYYY",
            DateFormat::CompactYearMonthDay => "YYYYMMDD",
            DateFormat::CompactYearDayMonth => "YYYYDDMM",
        };
        f.write_str(name)
    }
}

/// Years accepted by [`IsDate`]
pub const DATE_YEARS: RangeInclusive<i32> = 1..=32767;

/// Validates a real calendar date, leap years included
pub struct IsDate(pub DateFormat);

impl IsDate {
    pub fn is_valid(&self, value: &str) -> bool {
        self.0
            .split(value.trim())
            .filter(|(year, _, _)| DATE_YEARS.contains(year))
            .and_then(|(year, month, day)| NaiveDate::from_ymd_opt(year, month, day))
            .is_some()
    }
}

// Pattern validators

/// Custom regex validator
pub struct Matches(pub Regex);

impl Matches {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self(Regex::new(pattern)?))
    }

    /// Build from a pattern that may be wrapped in delimiters with trailing
    /// flags, such as `/^[a-z]+$/i`. The flags `i`, `m`, `s` and `x` are
    /// honoured and `u` is accepted as a no-op.
    pub fn from_delimited(pattern: &str) -> Result<Self, String> {
        let Some((body, flags)) = split_delimited(pattern) else {
            return Self::new(pattern).map_err(|e| e.to_string());
        };

        let mut builder = RegexBuilder::new(body);
        for flag in flags.chars() {
            match flag {
                'i' => builder.case_insensitive(true),
                'm' => builder.multi_line(true),
                's' => builder.dot_matches_new_line(true),
                'x' => builder.ignore_whitespace(true),
                'u' => &mut builder,
                other => return Err(format!("unsupported regex flag '{}'", other)),
            };
        }

        builder.build().map(Self).map_err(|e| e.to_string())
    }

    pub fn is_valid(&self, value: &str) -> bool {
        self.0.is_match(value)
    }
}

/// Body and flags of `/body/flags`, or `None` when `pattern` is not delimited
fn split_delimited(pattern: &str) -> Option<(&str, &str)> {
    let open = pattern.chars().next()?;
    if open.is_alphanumeric() || open.is_whitespace() || open == '\\' {
        return None;
    }
    let close = match open {
        '(' => ')',
        '[' => ']',
        '{' => '}',
        '<' => '>',
        other => other,
    };

    let start = open.len_utf8();
    let end = pattern[start..].rfind(close)? + start;
    let flags = &pattern[end + close.len_utf8()..];
    if !flags.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    Some((&pattern[start..end], flags))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_empty() {
        assert!(NotEmpty::is_valid("123"));
        assert!(!NotEmpty::is_valid(""));
        assert!(!NotEmpty::is_valid("   "));
    }

    #[test]
    fn test_date_fails_on_impossible_days() {
        let mdy = IsDate(DateFormat::MonthDayYear);
        assert!(!mdy.is_valid("02/29/2014"));
        assert!(!mdy.is_valid("04/31/2014"));
        assert!(!mdy.is_valid("06/31/2014"));
        assert!(!mdy.is_valid("09/31/2014"));
        assert!(!mdy.is_valid("11/31/2014"));
        assert!(!IsDate(DateFormat::YearMonthDay).is_valid("2014-02-29"));
    }

    #[test]
    fn test_date_passes_on_real_days() {
        let mdy = IsDate(DateFormat::MonthDayYear);
        assert!(mdy.is_valid("02/29/2012"));
        for day in ["01", "03", "05", "07", "08", "10", "12"] {
            assert!(mdy.is_valid(&format!("{}/31/2014", day)));
        }
        assert!(IsDate(DateFormat::YearMonthDay).is_valid("2012-02-29"));
    }

    #[test]
    fn test_date_year_range() {
        let mdy = IsDate(DateFormat::MonthDayYear);
        assert!(!mdy.is_valid("01/01/0000"));
        assert!(!mdy.is_valid("02/29/0000"));
        assert!(!mdy.is_valid("01/01/99999"));
        assert!(!mdy.is_valid("01/01/32768"));
        assert!(mdy.is_valid("01/01/0001"));
        assert!(mdy.is_valid("12/31/32767"));
        assert!(!IsDate(DateFormat::CompactYearMonthDay).is_valid("00000101"));
    }

    #[test]
    fn test_date_part_orders() {
        assert!(IsDate(DateFormat::YearDayMonth).is_valid("2014/31/12"));
        assert!(IsDate(DateFormat::DayMonthYear).is_valid("31.12.2014"));
        assert!(IsDate(DateFormat::CompactYearMonthDay).is_valid("20141231"));
        assert!(IsDate(DateFormat::CompactYearDayMonth).is_valid("20143112"));
        assert!(!IsDate(DateFormat::CompactYearMonthDay).is_valid("2014-1231"));
        assert!(!IsDate(DateFormat::MonthDayYear).is_valid("12/31"));
        assert!(!IsDate(DateFormat::MonthDayYear).is_valid("aa/bb/cccc"));
    }

    #[test]
    fn test_date_format_names() {
        for name in DateFormat::NAMES {
            assert!(name.parse::<DateFormat>().is_ok(), "{}", name);
        }
        assert_eq!("mm/dd/yyyy".parse::<DateFormat>(), Ok(DateFormat::MonthDayYear));
        assert!("DD.MM.YY".parse::<DateFormat>().is_err());
    }

    #[test]
    fn test_lengths_count_trimmed_characters() {
        assert!(!MinLength(6).is_valid("12345"));
        assert!(MinLength(5).is_valid("12345"));
        assert!(MinLength(5).is_valid("123456"));
        assert!(!MaxLength(4).is_valid("12345"));
        assert!(MaxLength(5).is_valid(" 12345 "));
        assert!(!ExactLength(5).is_valid("1234"));
        assert!(!ExactLength(5).is_valid("123456"));
        assert!(ExactLength(5).is_valid("12345"));
        assert!(ExactLength(3).is_valid("äöü"));
    }

    #[test]
    fn test_comparisons() {
        assert!(!GreaterThan(200.0).is_valid(100.0));
        assert!(!GreaterThan(100.0).is_valid(100.0));
        assert!(GreaterThan(99.0).is_valid(100.0));
        assert!(!LessThan(100.0).is_valid(200.0));
        assert!(!LessThan(100.0).is_valid(100.0));
        assert!(LessThan(100.0).is_valid(99.0));
    }

    #[test]
    fn test_alpha_and_alphanumeric() {
        assert!(!IsAlpha::is_valid("A1"));
        assert!(IsAlpha::is_valid("ABC"));
        assert!(!IsAlphanumeric::is_valid("A>"));
        assert!(IsAlphanumeric::is_valid("A1"));
    }

    #[test]
    fn test_integer() {
        assert!(!IsInteger::is_valid("ABC"));
        assert!(!IsInteger::is_valid("!@#"));
        assert!(!IsInteger::is_valid("123.45"));
        assert!(!IsInteger::is_valid("99999999999999999999"));
        assert!(IsInteger::is_valid("123"));
        assert!(IsInteger::is_valid("-123"));
    }

    #[test]
    fn test_float_and_numeric() {
        assert!(!IsFloat::is_valid("$123.01"));
        assert!(!IsFloat::is_valid("ABC"));
        assert!(IsFloat::is_valid("123"));
        assert!(IsFloat::is_valid("123.01"));
        assert!(IsFloat::is_valid("1e3"));
        assert!(IsFloat::is_valid(" 123"));
        assert!(IsFloat::is_valid("-1.5\n"));
        assert!(!IsFloat::is_valid(" "));
        assert!(IsNumeric::is_valid(" 123.04 "));
        assert!(!IsNumeric::is_valid("ABC1"));
    }

    #[test]
    fn test_email() {
        assert!(!IsEmail::is_valid("foo"));
        assert!(!IsEmail::is_valid("foo.com"));
        assert!(IsEmail::is_valid("me@example.com"));
        assert!(IsEmail::is_valid("firstname.lastname@example.com"));
    }

    #[test]
    fn test_url() {
        assert!(!IsUrl::is_valid("//localhost.com"));
        assert!(!IsUrl::is_valid("www.localhost"));
        assert!(IsUrl::is_valid("http://localhost.com"));
        assert!(IsUrl::is_valid("http://localhost.com/"));
        assert!(IsUrl::is_valid("https://localhost.com/123"));
        assert!(IsUrl::is_valid("ftp://files.example.com"));
    }

    #[test]
    fn test_phone_and_zipcode() {
        assert!(!IsPhone::is_valid("123456789"));
        assert!(IsPhone::is_valid("1234567890"));
        assert!(IsPhone::is_valid("(123) 456-7890"));
        assert!(!IsZipcode::is_valid("7220"));
        assert!(!IsZipcode::is_valid("722011"));
        assert!(IsZipcode::is_valid("72201"));
        assert!(IsZipcode::is_valid("72201-1111"));
    }

    #[test]
    fn test_affixes() {
        assert!(!StartsWith("BCD").is_valid("ABC"));
        assert!(StartsWith("ABC").is_valid("ABCDEFG"));
        assert!(!EndsWith("CD").is_valid("ABC"));
        assert!(EndsWith("EFG").is_valid("ABCDEFG"));
        assert!(!Contains("EFG").is_valid("ABCD"));
        assert!(Contains("DEF").is_valid("ABCDEFG"));
        assert!(Contains("a.c").is_valid("xa.cx"));
        assert!(!Contains("a.c").is_valid("abc"));
    }

    #[test]
    fn test_regex_with_delimiters() {
        assert!(!Matches::from_delimited("/[A-Z]+/").unwrap().is_valid("12345"));
        assert!(!Matches::from_delimited(r"/[\d]+/").unwrap().is_valid("ABC"));
        assert!(Matches::from_delimited(r"/[\d]+/").unwrap().is_valid("12345"));
        assert!(Matches::from_delimited("/[a-zA-Z]+/").unwrap().is_valid("abcdDEFG"));
        assert!(Matches::from_delimited("#^abc$#i").unwrap().is_valid("ABC"));
        assert!(Matches::from_delimited("{^a.b$}s").unwrap().is_valid("a\nb"));
    }

    #[test]
    fn test_regex_without_delimiters() {
        assert!(Matches::from_delimited("^[0-9]{3}$").unwrap().is_valid("123"));
    }

    #[test]
    fn test_regex_errors() {
        assert!(Matches::from_delimited("/[a-z/").is_err());
        assert!(Matches::from_delimited("/abc/q").is_err());
    }
}
