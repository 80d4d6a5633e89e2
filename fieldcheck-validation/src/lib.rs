//! Declarative field validation for fieldcheck
//!
//! Fields are registered with a human readable label and a rule spec such
//! as `required|minlength[2]`. Records are then validated against every
//! rule of every field, and failures are reported as formatted messages.
//!
//! # Examples
//!
//! ## Basic Validation
//!
//! ```
//! use fieldcheck_validation::Engine;
//! use serde_json::json;
//!
//! let mut engine = Engine::new();
//! engine.add_rule("zip", "Zip Code", "required|zipcode").unwrap();
//!
//! assert!(!engine.validate_json(&json!({ "zip": "7220A" })).unwrap());
//! assert_eq!(engine.error_summary(), vec!["Zip Code must be a valid zip code."]);
//! ```
//!
//! ## Rule Sets
//!
//! ```
//! use fieldcheck_validation::{Engine, RuleSetDefinition};
//! use serde_json::json;
//!
//! let person = RuleSetDefinition::new()
//!     .with_rule("firstname", "First Name", "required|minlength[2]")
//!     .with_rule("lastname", "Last Name", "required")
//!     .with_rule("dob", "Date of Birth", "required|date");
//!
//! let mut engine = Engine::new();
//! engine.add_rule_set(&person).unwrap();
//!
//! let valid = engine
//!     .validate([
//!         ("firstname", json!("Josh")),
//!         ("lastname", json!("Moody")),
//!         ("dob", json!("02/29/2014")),
//!     ])
//!     .unwrap();
//!
//! assert!(!valid);
//! assert_eq!(engine.error_fields(), vec!["dob"]);
//! ```
//!
//! ## Custom Validators and Messages
//!
//! ```
//! use fieldcheck_validation::{Engine, Validators};
//! use serde_json::json;
//!
//! let validators = Validators::builtin().with("even", |value, _params| {
//!     value.as_i64().is_some_and(|n| n % 2 == 0)
//! });
//!
//! let mut engine = Engine::with_validators(validators);
//! engine.add_custom_message("even", "{name} must be an even number.");
//! engine.add_rule("seats", "Seats", "required|even").unwrap();
//!
//! assert!(!engine.validate([("seats", json!(3))]).unwrap());
//! assert_eq!(engine.error_summary(), vec!["Seats must be an even number."]);
//! ```

mod engine;
mod errors;
mod messages;
mod predicates;
mod registry;
mod rules;
mod ruleset;
mod settings;
mod validators;

pub use engine::*;
pub use errors::*;
pub use messages::*;
pub use predicates::*;
pub use registry::*;
pub use rules::*;
pub use ruleset::*;
pub use settings::*;
pub use validators::*;

pub use fieldcheck_config::{RuleEntry, UnknownRulePolicy, ValidationConfig};
