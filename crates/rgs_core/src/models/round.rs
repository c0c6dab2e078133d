use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use super::event::Event;
use super::numeric::to_integer;

/// Opaque round identifier as found in the input (string, number, or null).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoundId(pub Value);

impl RoundId {
    pub fn null() -> Self {
        RoundId(Value::Null)
    }

    pub fn index(i: usize) -> Self {
        RoundId(Value::from(i))
    }

    /// Explicit id when present and not null, otherwise the positional fallback.
    pub fn or_index(id: Option<&Value>, fallback: usize) -> Self {
        match id {
            Some(v) if !v.is_null() => RoundId(v.clone()),
            _ => RoundId::index(fallback),
        }
    }
}

impl fmt::Display for RoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::Null => write!(f, "?"),
            Value::String(s) => write!(f, "{}", s),
            other => write!(f, "{}", other),
        }
    }
}

/// One complete play of the game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Round {
    pub id: RoundId,
    pub events: Vec<Event>,
    /// Top-level multiplier declared by the round container, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payout_multiplier: Option<Value>,
}

impl Round {
    pub fn new(id: RoundId, events: Vec<Event>) -> Self {
        Self { id, events, payout_multiplier: None }
    }

    pub fn with_payout_multiplier(mut self, value: Option<Value>) -> Self {
        self.payout_multiplier = value.filter(|v| !v.is_null());
        self
    }

    pub fn payout_multiplier_integer(&self) -> Option<i128> {
        to_integer(self.payout_multiplier.as_ref())
    }
}
