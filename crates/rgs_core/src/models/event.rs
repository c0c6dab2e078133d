//! Events are kept as the raw field map they were decoded from. Logical
//! fields are read through alias lists so rule code never spells out
//! `camelCase`/`snake_case` alternations.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::kind::{normalize_type, EventKind};
use super::numeric::{to_integer, to_number};

/// Accepted keys for one logical field, in lookup priority order.
pub type FieldAlias = &'static [&'static str];

pub mod field {
    use super::FieldAlias;

    pub const TYPE: FieldAlias = &["type"];
    pub const INDEX: FieldAlias = &["index"];
    pub const ROUND_INDEX: FieldAlias = &["roundIndex", "round_index"];
    pub const TOTAL_WIN: FieldAlias = &["totalWin", "total_win"];
    pub const PAYOUT: FieldAlias = &["payout"];
    pub const WINS: FieldAlias = &["wins"];
    /// Per-entry amount inside `wins[]`
    pub const WIN_ENTRY: FieldAlias = &["win", "payout"];
    pub const BASE_PAYOUT: FieldAlias = &["basePayout", "base_payout"];
    pub const APPLIED_MULTIPLIER: FieldAlias = &["appliedMultiplier", "applied_multiplier"];
    pub const AMOUNT: FieldAlias = &["amount"];
    pub const ROUND_RESULT_TOTAL: FieldAlias = &["totalPayout", "total_win", "total"];
    pub const REVEAL_TYPE: FieldAlias = &["revealType", "reveal_type"];
    pub const GAME_TYPE: FieldAlias = &["gameType", "game_type"];
    pub const PAYOUT_MULTIPLIER: FieldAlias = &["payoutMultiplier", "payout_multiplier"];
}

/// First alias whose value is present and not null.
///
/// A present value that later fails coercion does not fall through to the
/// next alias.
pub fn lookup<'a>(fields: &'a Map<String, Value>, alias: FieldAlias) -> Option<&'a Value> {
    alias
        .iter()
        .filter_map(|key| fields.get(*key))
        .find(|value| !value.is_null())
}

/// One recorded protocol event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Event {
    fields: Map<String, Value>,
}

impl Event {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn get(&self, alias: FieldAlias) -> Option<&Value> {
        lookup(&self.fields, alias)
    }

    /// True when any alias key exists, even with a null value.
    pub fn has_key(&self, alias: FieldAlias) -> bool {
        alias.iter().any(|key| self.fields.contains_key(*key))
    }

    pub fn integer(&self, alias: FieldAlias) -> Option<i128> {
        to_integer(self.get(alias))
    }

    pub fn number(&self, alias: FieldAlias) -> Option<f64> {
        to_number(self.get(alias))
    }

    /// Raw `type` value as written, for messages.
    pub fn raw_type(&self) -> Option<&Value> {
        self.get(field::TYPE)
    }

    pub fn canonical_type(&self) -> String {
        normalize_type(self.raw_type())
    }

    pub fn kind(&self) -> EventKind {
        EventKind::from_canonical(&self.canonical_type())
    }

    /// Canonical form of a secondary label field such as `revealType`.
    pub fn canonical(&self, alias: FieldAlias) -> String {
        normalize_type(self.get(alias))
    }
}

impl From<Value> for Event {
    /// Non-object values become events without fields (and thus without a type).
    fn from(value: Value) -> Self {
        match value {
            Value::Object(fields) => Self { fields },
            _ => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn event(value: Value) -> Event {
        Event::from(value)
    }

    #[test]
    fn test_alias_priority() {
        let e = event(json!({"type": "winInfo", "totalWin": 10, "total_win": 20}));
        assert_eq!(e.integer(field::TOTAL_WIN), Some(10));

        let e = event(json!({"type": "winInfo", "total_win": 20}));
        assert_eq!(e.integer(field::TOTAL_WIN), Some(20));
    }

    #[test]
    fn test_null_falls_through_but_garbage_does_not() {
        let e = event(json!({"totalWin": null, "total_win": 7}));
        assert_eq!(e.integer(field::TOTAL_WIN), Some(7));

        let e = event(json!({"totalWin": "n/a", "total_win": 7}));
        assert_eq!(e.integer(field::TOTAL_WIN), None);
    }

    #[test]
    fn test_has_key_sees_null() {
        let e = event(json!({"type": "reveal", "index": null}));
        assert!(e.has_key(field::INDEX));
        assert_eq!(e.integer(field::INDEX), None);
    }

    #[test]
    fn test_kind_and_canonical_labels() {
        let e = event(json!({"type": "Reveal", "reveal_type": "FreeSpin"}));
        assert_eq!(e.kind(), EventKind::Reveal);
        assert_eq!(e.canonical(field::REVEAL_TYPE), "freespin");
    }

    #[test]
    fn test_non_object_event_has_no_type() {
        let e = event(json!(12));
        assert!(e.fields().is_empty());
        assert_eq!(e.canonical_type(), "");
        assert_eq!(e.kind(), EventKind::Unknown);
    }
}
