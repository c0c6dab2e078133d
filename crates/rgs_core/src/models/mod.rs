//! Data model shared by the round source, the validator, and the report.

pub mod event;
pub mod issue;
pub mod kind;
pub mod numeric;
pub mod round;

pub use event::{field, lookup, Event, FieldAlias};
pub use issue::{IssueCode, Severity, ValidationIssue};
pub use kind::{normalize_type, EventKind};
pub use numeric::{to_integer, to_number};
pub use round::{Round, RoundId};
