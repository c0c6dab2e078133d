//! Extraction phase: one pass over a round's events collecting canonical
//! kinds and the positions every rule needs. Rules never rescan events for
//! positional facts.

use serde_json::Value;

use crate::models::{field, lookup, to_integer, Event, EventKind};

/// Positional facts about one round.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoundSummary {
    /// Canonical type key per event (empty = missing type)
    pub canonical: Vec<String>,
    pub kinds: Vec<EventKind>,
    /// Any event carries an `index` key
    pub has_index_field: bool,
    pub reveal_count: usize,
    pub first_spin_start: Option<usize>,
    pub final_wins: Vec<usize>,
    pub round_results: Vec<usize>,
    pub set_total_wins: Vec<usize>,
    pub set_wins: Vec<usize>,
    pub free_spin_triggers: Vec<usize>,
    pub first_bonus_pick: Option<usize>,
    pub has_enter_bonus: bool,
    pub has_update_free_spin: bool,
    pub has_free_spin_end: bool,
    /// Reveal flagged as a free-spin step via `revealType`/`gameType`
    pub has_free_spin_reveal: bool,
}

impl RoundSummary {
    pub fn extract(events: &[Event]) -> Self {
        let mut summary = RoundSummary {
            canonical: Vec::with_capacity(events.len()),
            kinds: Vec::with_capacity(events.len()),
            ..Default::default()
        };

        for (index, event) in events.iter().enumerate() {
            let key = event.canonical_type();
            let kind = EventKind::from_canonical(&key);

            summary.has_index_field |= event.has_key(field::INDEX);

            match kind {
                EventKind::Reveal => {
                    summary.reveal_count += 1;
                    summary.has_free_spin_reveal |= is_free_spin_reveal(event);
                }
                EventKind::SpinStart => {
                    summary.first_spin_start.get_or_insert(index);
                }
                EventKind::FinalWin => summary.final_wins.push(index),
                EventKind::RoundResult => summary.round_results.push(index),
                EventKind::SetTotalWin => summary.set_total_wins.push(index),
                EventKind::SetWin => summary.set_wins.push(index),
                EventKind::FreeSpinTrigger | EventKind::FreeSpinRetrigger => {
                    summary.free_spin_triggers.push(index)
                }
                EventKind::BonusPick => {
                    summary.first_bonus_pick.get_or_insert(index);
                }
                EventKind::EnterBonus => summary.has_enter_bonus = true,
                EventKind::UpdateFreeSpin => summary.has_update_free_spin = true,
                EventKind::FreeSpinEnd => summary.has_free_spin_end = true,
                _ => {}
            }

            summary.canonical.push(key);
            summary.kinds.push(kind);
        }

        summary
    }

    /// Round has entered (or claims to have entered) a free-spin sequence.
    pub fn free_spin_context(&self) -> bool {
        self.has_update_free_spin || self.has_free_spin_end || self.has_free_spin_reveal
    }

    /// Last-positioned `finalWin`/`roundResult`, if any.
    pub fn terminal_index(&self) -> Option<usize> {
        let last_final = self.final_wins.last().copied();
        let last_result = self.round_results.last().copied();
        last_final.max(last_result)
    }

    pub fn has_mixed_terminals(&self) -> bool {
        !self.final_wins.is_empty() && !self.round_results.is_empty()
    }
}

fn is_free_spin_reveal(event: &Event) -> bool {
    event.canonical(field::REVEAL_TYPE) == "freespin" || event.canonical(field::GAME_TYPE) == "freegame"
}

/// The event that closes the round and declares its total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Terminal {
    pub index: usize,
    pub kind: EventKind,
    /// Declared total; `None` when absent or non-integral
    pub amount: Option<i128>,
}

impl Terminal {
    pub fn locate(summary: &RoundSummary, events: &[Event]) -> Option<Self> {
        let index = summary.terminal_index()?;
        let kind = summary.kinds[index];
        Some(Terminal { index, kind, amount: terminal_amount(&events[index], kind) })
    }

    /// Canonical stream: terminated by `finalWin` rather than legacy `roundResult`.
    pub fn is_canonical(&self) -> bool {
        self.kind == EventKind::FinalWin
    }
}

fn terminal_amount(event: &Event, kind: EventKind) -> Option<i128> {
    match kind {
        EventKind::FinalWin => event.integer(field::AMOUNT),
        EventKind::RoundResult => event.integer(field::ROUND_RESULT_TOTAL),
        _ => None,
    }
}

/// Totals a `winInfo` event can declare.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WinInfoReading {
    pub total_win: Option<i128>,
    pub payout: Option<i128>,
    /// Sum over `wins[]`, present only when `wins` is an array
    pub wins_sum: Option<i128>,
}

impl WinInfoReading {
    pub fn read(event: &Event) -> Self {
        let wins_sum = event.get(field::WINS).and_then(Value::as_array).map(|wins| {
            wins.iter()
                .map(|entry| {
                    entry
                        .as_object()
                        .and_then(|obj| to_integer(lookup(obj, field::WIN_ENTRY)))
                        .unwrap_or(0)
                })
                .fold(0i128, i128::saturating_add)
        });

        WinInfoReading {
            total_win: event.integer(field::TOTAL_WIN),
            payout: event.integer(field::PAYOUT),
            wins_sum,
        }
    }

    /// `totalWin`, else `payout`, else the `wins[]` sum.
    pub fn total(&self) -> Option<i128> {
        self.total_win.or(self.payout).or(self.wins_sum)
    }

    /// Explicit `totalWin` disagrees with the itemized wins.
    pub fn is_mismatched(&self) -> bool {
        matches!((self.total_win, self.wins_sum), (Some(total), Some(sum)) if total != sum)
    }
}
