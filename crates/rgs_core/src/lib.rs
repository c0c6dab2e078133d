//! # rgs_core - RGS Event Stream Validator
//!
//! Checks recorded game-round event logs against the protocol contract that
//! replay viewers, auditors, and payout reconciliation rely on.
//!
//! ## Pipeline
//! - [`source`] decodes JSON / JSON Lines input into normalized [`Round`]s
//! - [`validate`] checks each round independently and emits issues
//! - [`report`] merges per-round issues into a pass/fail [`ValidationReport`]
//!
//! The validator never repairs input. It classifies a stream as valid or
//! invalid and explains why with stable issue codes.

pub mod config;
pub mod error;
pub mod models;
pub mod report;
pub mod source;
pub mod validate;

pub use config::ValidatorConfig;
pub use error::{ConfigError, SourceError};
pub use models::{Event, EventKind, IssueCode, Round, RoundId, Severity, ValidationIssue};
pub use report::{render_json, render_text, validate_rounds, Status, ValidationReport};
pub use source::{load_rounds, parse_rounds};
pub use validate::{validate_round, RoundIssues, RoundValidator};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
