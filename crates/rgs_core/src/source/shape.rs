//! Container shape detection.
//!
//! Input arrives in several container layouts. Each layout is a named case
//! of [`DocumentShape`] (whole document) or [`RoundShape`] (one round inside a
//! document), and every case converts into the same [`Round`] value.

use serde_json::{Map, Value};

use crate::models::{field, lookup, Event, Round, RoundId};

/// Object carrying a string `type`: a bare event.
pub fn is_typed_event(value: &Value) -> bool {
    value
        .as_object()
        .and_then(|obj| obj.get("type"))
        .is_some_and(Value::is_string)
}

fn events_of(values: &[Value]) -> Vec<Event> {
    values.iter().cloned().map(Event::from).collect()
}

fn array_field<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a Vec<Value>> {
    obj.get(key).and_then(Value::as_array)
}

/// Layout of a single round-shaped value.
#[derive(Debug, Clone, PartialEq)]
pub enum RoundShape<'a> {
    /// `[event, ...]`
    EventList(&'a [Value]),
    /// `{id?, events: [...]}`
    EventsField { outer: &'a Map<String, Value>, events: &'a [Value] },
    /// `{id?, round: {id?, events: [...]}}`
    NestedRound {
        outer: &'a Map<String, Value>,
        inner: &'a Map<String, Value>,
        events: &'a [Value],
    },
    /// `{type: "...", ...}`
    SingleEvent(&'a Value),
    Unrecognized,
}

impl<'a> RoundShape<'a> {
    pub fn classify(value: &'a Value) -> Self {
        let obj = match value {
            Value::Array(items) => return RoundShape::EventList(items),
            Value::Object(obj) => obj,
            _ => return RoundShape::Unrecognized,
        };

        if let Some(events) = array_field(obj, "events") {
            return RoundShape::EventsField { outer: obj, events };
        }

        if let Some(inner) = obj.get("round").and_then(Value::as_object) {
            if let Some(events) = array_field(inner, "events") {
                return RoundShape::NestedRound { outer: obj, inner, events };
            }
        }

        if is_typed_event(value) {
            return RoundShape::SingleEvent(value);
        }

        RoundShape::Unrecognized
    }

    /// Build the round, using `fallback` where the shape carries no id.
    pub fn into_round(self, fallback: usize) -> Option<Round> {
        match self {
            RoundShape::EventList(items) => Some(Round::new(RoundId::index(fallback), events_of(items))),
            RoundShape::EventsField { outer, events } => Some(
                Round::new(RoundId::or_index(outer.get("id"), fallback), events_of(events))
                    .with_payout_multiplier(lookup(outer, field::PAYOUT_MULTIPLIER).cloned()),
            ),
            RoundShape::NestedRound { outer, inner, events } => {
                let id = match inner.get("id") {
                    Some(v) if !v.is_null() => RoundId(v.clone()),
                    _ => RoundId::or_index(outer.get("id"), fallback),
                };
                let multiplier = lookup(inner, field::PAYOUT_MULTIPLIER)
                    .or_else(|| lookup(outer, field::PAYOUT_MULTIPLIER))
                    .cloned();
                Some(Round::new(id, events_of(events)).with_payout_multiplier(multiplier))
            }
            RoundShape::SingleEvent(value) => {
                Some(Round::new(RoundId::index(fallback), vec![Event::from(value.clone())]))
            }
            RoundShape::Unrecognized => None,
        }
    }
}

/// Normalize one round-shaped value; unrecognized shapes yield `None`.
pub fn normalize_round(value: &Value, fallback: usize) -> Option<Round> {
    RoundShape::classify(value).into_round(fallback)
}

/// Layout of a whole decoded document (or of all JSON Lines records together).
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentShape {
    /// Every record is a typed event: one round, id 0
    EventStream(Vec<Value>),
    /// Each record is a round shape indexed by position
    RoundList(Vec<Value>),
    /// `{id?, events: [...]}`
    SingleRound(Map<String, Value>),
    /// `{rounds: [...]}` or `{data: [...]}`
    RoundCollection(Vec<Value>),
    Empty,
}

impl DocumentShape {
    /// Classify a sequence of records (array elements or JSON Lines).
    pub fn classify_records(records: Vec<Value>) -> Self {
        if records.is_empty() {
            DocumentShape::Empty
        } else if records.iter().all(is_typed_event) {
            DocumentShape::EventStream(records)
        } else {
            DocumentShape::RoundList(records)
        }
    }

    pub fn classify(document: Value) -> Self {
        match document {
            Value::Array(records) => Self::classify_records(records),
            Value::Object(mut obj) => {
                if obj.get("events").is_some_and(Value::is_array) {
                    return DocumentShape::SingleRound(obj);
                }
                for key in ["rounds", "data"] {
                    if let Some(Value::Array(items)) = obj.remove(key) {
                        return DocumentShape::RoundCollection(items);
                    }
                }
                DocumentShape::Empty
            }
            _ => DocumentShape::Empty,
        }
    }

    pub fn into_rounds(self) -> Vec<Round> {
        match self {
            DocumentShape::EventStream(records) => {
                vec![Round::new(RoundId::index(0), records.into_iter().map(Event::from).collect())]
            }
            DocumentShape::SingleRound(obj) => {
                let shape = RoundShape::EventsField {
                    outer: &obj,
                    events: array_field(&obj, "events").map(Vec::as_slice).unwrap_or_default(),
                };
                shape.into_round(0).into_iter().collect()
            }
            DocumentShape::RoundList(items) | DocumentShape::RoundCollection(items) => {
                let rounds: Vec<Round> = items
                    .iter()
                    .enumerate()
                    .filter_map(|(i, item)| normalize_round(item, i))
                    .collect();
                if rounds.len() < items.len() {
                    tracing::warn!(
                        discarded = items.len() - rounds.len(),
                        "skipping records with no recognizable round shape"
                    );
                }
                rounds
            }
            DocumentShape::Empty => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rounds(document: Value) -> Vec<Round> {
        DocumentShape::classify(document).into_rounds()
    }

    #[test]
    fn test_bare_event_array_is_one_round() {
        let out = rounds(json!([{"type": "reveal"}, {"type": "finalWin", "amount": 0}]));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, RoundId::index(0));
        assert_eq!(out[0].events.len(), 2);
    }

    #[test]
    fn test_array_of_round_shapes() {
        let out = rounds(json!([
            [{"type": "reveal"}],
            {"id": "r-1", "events": [{"type": "reveal"}]},
            {"round": {"id": "inner", "events": []}},
            {"type": "reveal"},
            42
        ]));
        let ids: Vec<RoundId> = out.iter().map(|r| r.id.clone()).collect();
        assert_eq!(
            ids,
            vec![
                RoundId::index(0),
                RoundId(json!("r-1")),
                RoundId(json!("inner")),
                RoundId::index(3),
            ]
        );
        assert_eq!(out[3].events.len(), 1);
    }

    #[test]
    fn test_nested_round_id_priority() {
        let out = normalize_round(&json!({"id": 7, "round": {"events": []}}), 2).unwrap();
        assert_eq!(out.id, RoundId(json!(7)));

        let out = normalize_round(&json!({"round": {"id": null, "events": []}}), 2).unwrap();
        assert_eq!(out.id, RoundId::index(2));
    }

    #[test]
    fn test_events_field_null_id_uses_fallback() {
        let out = normalize_round(&json!({"id": null, "events": []}), 5).unwrap();
        assert_eq!(out.id, RoundId::index(5));
    }

    #[test]
    fn test_object_document_with_events() {
        let out = rounds(json!({"id": "abc", "payoutMultiplier": 50, "events": [{"type": "reveal"}]}));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, RoundId(json!("abc")));
        assert_eq!(out[0].payout_multiplier_integer(), Some(50));

        let out = rounds(json!({"events": []}));
        assert_eq!(out[0].id, RoundId::index(0));
        assert!(out[0].events.is_empty());
    }

    #[test]
    fn test_rounds_and_data_collections() {
        let out = rounds(json!({"rounds": [{"events": [{"type": "reveal"}]}, {"nope": 1}]}));
        assert_eq!(out.len(), 1);

        let out = rounds(json!({"data": [[{"type": "reveal"}], [{"type": "reveal"}]]}));
        assert_eq!(out.len(), 2);
        assert_eq!(out[1].id, RoundId::index(1));
    }

    #[test]
    fn test_nested_round_payout_multiplier() {
        let out = normalize_round(
            &json!({"payoutMultiplier": 10, "round": {"payout_multiplier": "20", "events": []}}),
            0,
        )
        .unwrap();
        assert_eq!(out.payout_multiplier_integer(), Some(20));
    }

    #[test]
    fn test_unrecognized_documents() {
        assert!(rounds(json!([])).is_empty());
        assert!(rounds(json!({"foo": []})).is_empty());
        assert!(rounds(json!("text")).is_empty());
        assert!(rounds(Value::Null).is_empty());
        assert_eq!(RoundShape::classify(&json!({"type": 3})), RoundShape::Unrecognized);
    }

    #[test]
    fn test_non_string_type_breaks_event_stream() {
        let shape = DocumentShape::classify(json!([{"type": "reveal"}, {"type": 1}]));
        assert!(matches!(shape, DocumentShape::RoundList(_)));
    }
}
