//! Canonical event-type keys and the closed event vocabulary.

use serde_json::Value;

/// Canonicalize a free-form type label.
///
/// Absent/null becomes `""`; the text is trimmed, lower-cased, and stripped of
/// everything outside `a-z0-9`. An empty result means "missing type".
pub fn normalize_type(value: Option<&Value>) -> String {
    let raw = match value {
        None | Some(Value::Null) => return String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    };

    raw.trim()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

/// Event kinds the protocol knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    SpinStart,
    Reveal,
    WinInfo,
    SetWin,
    SetTotalWin,
    FinalWin,
    MultiplierUpdate,
    UpdateGlobalMult,
    BonusTrigger,
    FreeSpinTrigger,
    FreeSpinRetrigger,
    EnterBonus,
    UpdateFreeSpin,
    FreeSpinEnd,
    StickyZones,
    NewStickySymbols,
    BonusPick,
    /// Legacy terminal event
    RoundResult,
    Unknown,
}

impl EventKind {
    /// Map a canonical key (see [`normalize_type`]) onto the vocabulary.
    pub fn from_canonical(key: &str) -> Self {
        match key {
            "spinstart" => EventKind::SpinStart,
            "reveal" => EventKind::Reveal,
            "wininfo" => EventKind::WinInfo,
            "setwin" => EventKind::SetWin,
            "settotalwin" => EventKind::SetTotalWin,
            "finalwin" => EventKind::FinalWin,
            "multiplierupdate" => EventKind::MultiplierUpdate,
            "updateglobalmult" => EventKind::UpdateGlobalMult,
            "bonustrigger" => EventKind::BonusTrigger,
            "freespintrigger" => EventKind::FreeSpinTrigger,
            "freespinretrigger" => EventKind::FreeSpinRetrigger,
            "enterbonus" => EventKind::EnterBonus,
            "updatefreespin" => EventKind::UpdateFreeSpin,
            "freespinend" => EventKind::FreeSpinEnd,
            "stickyzones" => EventKind::StickyZones,
            "newstickysymbols" => EventKind::NewStickySymbols,
            "bonuspick" => EventKind::BonusPick,
            "roundresult" => EventKind::RoundResult,
            _ => EventKind::Unknown,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, EventKind::Unknown)
    }

    /// Kinds that take part in progressive `roundIndex` numbering.
    pub fn is_round_indexed(&self) -> bool {
        matches!(
            self,
            EventKind::Reveal
                | EventKind::WinInfo
                | EventKind::MultiplierUpdate
                | EventKind::UpdateGlobalMult
        )
    }

    /// Terminal kinds: canonical `finalWin` and legacy `roundResult`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, EventKind::FinalWin | EventKind::RoundResult)
    }

    pub fn is_free_spin_trigger(&self) -> bool {
        matches!(self, EventKind::FreeSpinTrigger | EventKind::FreeSpinRetrigger)
    }
}
