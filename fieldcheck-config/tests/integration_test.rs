//! Integration tests for fieldcheck-config

use fieldcheck_config::*;
use std::env;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Write `content` to `name` inside a fresh temp dir. The dir is removed
/// when the returned guard drops.
fn temp_file(name: &str, content: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    (dir, path)
}

#[test]
fn test_from_env_with_prefix() {
    let loader = EnvLoader::new(Some("FCTEST_ENV".to_string()));

    unsafe {
        env::set_var("FCTEST_ENV_UNKNOWN_RULE", "pass");
        env::set_var("FCTEST_ENV_DATE_FORMAT", "YYYY-MM-DD");
    }

    let config = ValidationConfig::from_env_with(&loader).unwrap();
    assert_eq!(config.unknown_rule, UnknownRulePolicy::Pass);
    assert_eq!(config.date_format, "YYYY-MM-DD");

    unsafe {
        env::remove_var("FCTEST_ENV_UNKNOWN_RULE");
        env::remove_var("FCTEST_ENV_DATE_FORMAT");
    }
}

#[test]
fn test_from_env_rejects_bad_policy() {
    let loader = EnvLoader::new(Some("FCTEST_BAD".to_string()));

    unsafe {
        env::set_var("FCTEST_BAD_UNKNOWN_RULE", "sometimes");
    }

    let result = ValidationConfig::from_env_with(&loader);
    assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));

    unsafe {
        env::remove_var("FCTEST_BAD_UNKNOWN_RULE");
    }
}

#[test]
fn test_env_loader_load_var() {
    let loader = EnvLoader::new(Some("FCTEST_VAR".to_string()));

    unsafe {
        env::set_var("FCTEST_VAR_DATE_FORMAT", "DD/MM/YYYY");
    }

    assert_eq!(loader.load_var("date_format").unwrap(), "DD/MM/YYYY");
    assert!(loader.load_var("missing").is_err());

    let all = loader.load().unwrap();
    assert_eq!(all.get("date_format"), Some(&"DD/MM/YYYY".to_string()));

    unsafe {
        env::remove_var("FCTEST_VAR_DATE_FORMAT");
    }
}

#[test]
fn test_load_dotenv_file() {
    let (_dir, path) = temp_file("dotenv.env", "FCTEST_DOTENV_UNKNOWN_RULE=pass\n");
    let loader = EnvLoader::new(Some("FCTEST_DOTENV".to_string()));

    loader.load_dotenv(Some(&path)).unwrap();
    let config = ValidationConfig::from_env_with(&loader).unwrap();
    assert_eq!(config.unknown_rule, UnknownRulePolicy::Pass);

    unsafe {
        env::remove_var("FCTEST_DOTENV_UNKNOWN_RULE");
    }
}

#[test]
fn test_from_toml_file() {
    let (_dir, path) = temp_file(
        "rules.toml",
        r#"
date_format = "YYYY-MM-DD"

[messages]
zipcode = "{name} needs five digits."

[[rules]]
field = "zip"
label = "Zip Code"
rules = "required|zipcode"

[[rules]]
field = "dob"
label = "Date of Birth"
rules = "date"
"#,
    );

    let config = ValidationConfig::from_file(&path).unwrap();
    assert_eq!(config.date_format, "YYYY-MM-DD");
    assert_eq!(config.messages["zipcode"], "{name} needs five digits.");
    assert_eq!(config.rules.len(), 2);
    assert_eq!(
        config.rules[0],
        RuleEntry {
            field: "zip".to_string(),
            label: "Zip Code".to_string(),
            rules: "required|zipcode".to_string(),
        }
    );
}

#[test]
fn test_from_json_file() {
    let (_dir, path) = temp_file(
        "rules.json",
        r#"{"unknown_rule": "pass", "rules": [{"field": "email", "label": "Email", "rules": "required|email"}]}"#,
    );

    let config = ValidationConfig::from_file(&path).unwrap();
    assert_eq!(config.unknown_rule, UnknownRulePolicy::Pass);
    assert_eq!(config.rules[0].rules, "required|email");
}

#[test]
fn test_from_env_file() {
    let (_dir, path) = temp_file(
        "settings.env",
        "FIELDCHECK_UNKNOWN_RULE=pass\nFIELDCHECK_DATE_FORMAT=YYYYMMDD\n",
    );

    let config = ValidationConfig::from_file(&path).unwrap();
    assert_eq!(config.unknown_rule, UnknownRulePolicy::Pass);
    assert_eq!(config.date_format, "YYYYMMDD");
}

#[test]
fn test_config_files_are_removed_with_their_dir() {
    let (dir, path) = temp_file("rules.json", r#"{"date_format": "DD/MM/YYYY"}"#);
    let root = dir.path().to_path_buf();

    let config = ValidationConfig::from_file(&path).unwrap();
    assert_eq!(config.date_format, "DD/MM/YYYY");

    drop(dir);
    assert!(!path.exists());
    assert!(!root.exists());
}

#[test]
fn test_missing_file_is_load_error() {
    let result = ValidationConfig::from_file("/nonexistent/fieldcheck/rules.toml");
    assert!(matches!(result, Err(ConfigError::LoadError(_))));
}

#[test]
fn test_config_error_display() {
    let err = ConfigError::ParseError("bad toml".to_string());
    assert_eq!(err.to_string(), "Failed to parse configuration: bad toml");
}
