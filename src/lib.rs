// fieldcheck - declarative field validation for Rust
//
// Register fields with a label and a pipe-delimited rule spec, validate
// whole records against them, and report failures as templated messages.

// Re-export the validation engine
pub use fieldcheck_validation::*;

// Re-export input record types
pub use serde_json::{Map, Value, json};

// Re-export optional crates
#[cfg(feature = "config")]
pub use fieldcheck_config;

/// Prelude for common imports.
///
/// ```
/// use fieldcheck::prelude::*;
///
/// let mut engine = Engine::new();
/// engine.add_rule("email", "Email", "required|email").unwrap();
///
/// assert!(engine.validate([("email", json!("me@example.com"))]).unwrap());
/// ```
pub mod prelude {
    pub use fieldcheck_validation::{
        Engine, EngineSettings, FieldErrors, RuleSet, RuleSetDefinition, UnknownRulePolicy,
        ValidationConfig, ValidationError, Validators,
    };
    pub use serde_json::{Value, json};

    #[cfg(feature = "config")]
    pub use fieldcheck_config::{ConfigError, ConfigLoader, EnvLoader, FileFormat};
}
