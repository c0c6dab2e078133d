//! Rule phase. Each `check_*` evaluates one protocol invariant against the
//! extracted [`RoundSummary`] and appends to [`RoundIssues`].

use crate::config::ValidatorConfig;
use crate::models::{field, Event, EventKind, IssueCode, Round, RoundId, ValidationIssue};

use super::summary::{RoundSummary, Terminal, WinInfoReading};

/// Issues produced for one round, split by severity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoundIssues {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

#[cfg(test)]
impl RoundIssues {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    pub fn has_error(&self, code: IssueCode) -> bool {
        self.errors.iter().any(|issue| issue.code == code)
    }

    pub fn has_warning(&self, code: IssueCode) -> bool {
        self.warnings.iter().any(|issue| issue.code == code)
    }

    pub fn error_codes(&self) -> Vec<IssueCode> {
        self.errors.iter().map(|issue| issue.code).collect()
    }

    pub fn warning_codes(&self) -> Vec<IssueCode> {
        self.warnings.iter().map(|issue| issue.code).collect()
    }
}

/// Per-round evaluation state. Lives for exactly one `validate` call.
pub(crate) struct RoundCheck<'a> {
    round_id: &'a RoundId,
    events: &'a [Event],
    summary: RoundSummary,
    config: &'a ValidatorConfig,
    issues: RoundIssues,
    win_info_sum: i128,
}

impl<'a> RoundCheck<'a> {
    pub(crate) fn new(round: &'a Round, config: &'a ValidatorConfig) -> Self {
        Self {
            round_id: &round.id,
            events: &round.events,
            summary: RoundSummary::extract(&round.events),
            config,
            issues: RoundIssues::default(),
            win_info_sum: 0,
        }
    }

    pub(crate) fn finish(self) -> RoundIssues {
        self.issues
    }

    fn error(&mut self, event_index: Option<usize>, code: IssueCode, message: impl Into<String>) {
        self.issues
            .errors
            .push(ValidationIssue::error(self.round_id.clone(), event_index, code, message));
    }

    fn warning(&mut self, event_index: Option<usize>, code: IssueCode, message: impl Into<String>) {
        self.issues
            .warnings
            .push(ValidationIssue::warning(self.round_id.clone(), event_index, code, message));
    }

    /// Returns false when the round has nothing to check.
    pub(crate) fn check_not_empty(&mut self) -> bool {
        if self.events.is_empty() {
            self.error(None, IssueCode::EmptyRound, "Round has no events.");
            return false;
        }
        true
    }

    /// Once any event carries `index`, all must, numbered 0,1,2,...
    pub(crate) fn check_index_contiguity(&mut self) {
        if !self.summary.has_index_field {
            return;
        }
        let events = self.events;
        for (position, event) in events.iter().enumerate() {
            let declared = event.integer(field::INDEX);
            if declared != Some(position as i128) {
                self.error(
                    Some(position),
                    IssueCode::NonContiguousIndex,
                    "event.index must be contiguous and start from 0.",
                );
            }
        }
    }

    /// Type vocabulary, round-index monotonicity, and win-info totals.
    pub(crate) fn check_events(&mut self) {
        let events = self.events;
        let mut last_round_index: Option<i128> = None;

        for (position, event) in events.iter().enumerate() {
            let kind = self.summary.kinds[position];

            if self.summary.canonical[position].is_empty() {
                self.error(Some(position), IssueCode::InvalidEvent, "Event type is missing.");
                continue;
            }

            if !kind.is_known() {
                let label = raw_type_label(event);
                self.warning(
                    Some(position),
                    IssueCode::UnknownEventType,
                    format!("Unknown event type '{}'.", label),
                );
            }

            if kind.is_round_indexed() {
                if let Some(round_index) = event.integer(field::ROUND_INDEX) {
                    if last_round_index.is_some_and(|last| round_index < last) {
                        self.error(
                            Some(position),
                            IssueCode::NonMonotonicRoundIndex,
                            "roundIndex must be non-decreasing.",
                        );
                    }
                    last_round_index = last_round_index.max(Some(round_index));
                }
            }

            if kind == EventKind::WinInfo {
                self.check_win_info(position);
            }
        }
    }

    fn check_win_info(&mut self, position: usize) {
        let events = self.events;
        let event = &events[position];
        let reading = WinInfoReading::read(event);

        match reading.total() {
            None => self.error(
                Some(position),
                IssueCode::MissingWinFields,
                "winInfo must contain totalWin/payout/wins[].",
            ),
            Some(total) if total < 0 => {
                self.error(Some(position), IssueCode::NegativeWinTotal, "winInfo total must be >= 0.")
            }
            Some(total) => self.win_info_sum = self.win_info_sum.saturating_add(total),
        }

        if reading.is_mismatched() {
            self.warning(
                Some(position),
                IssueCode::WininfoTotalMismatch,
                "winInfo.totalWin does not match sum(wins[].win).",
            );
        }

        let payout = event.number(field::PAYOUT);
        let base_payout = event.number(field::BASE_PAYOUT);
        let multiplier = event.number(field::APPLIED_MULTIPLIER);
        if let (Some(payout), Some(base), Some(multiplier)) = (payout, base_payout, multiplier) {
            // multiplier is in percent: 100 == x1.0
            let expected = base * multiplier / 100.0;
            if (expected - payout).abs() > self.config.payout_tolerance {
                self.error(
                    Some(position),
                    IssueCode::InconsistentPayout,
                    format!("winInfo payout mismatch. expected={}, got={}", expected, payout),
                );
            }
        }
    }

    pub(crate) fn check_reveal_present(&mut self) {
        if self.summary.reveal_count == 0 {
            self.error(
                None,
                IssueCode::MissingReveal,
                "Round must include at least one 'reveal' event.",
            );
        }
    }

    pub(crate) fn check_spin_start_first(&mut self) {
        if let Some(position) = self.summary.first_spin_start.filter(|&p| p > 0) {
            self.error(
                Some(position),
                IssueCode::SpinStartNotFirst,
                "If present, 'spinStart' must be the first event.",
            );
        }
    }

    /// Terminal event discipline. `None` means the round has no terminal and
    /// the remaining checks cannot run.
    pub(crate) fn check_terminal(&mut self) -> Option<Terminal> {
        if self.summary.final_wins.len() > 1 {
            self.error(None, IssueCode::MultipleFinalWin, "Round contains multiple 'finalWin' events.");
        }
        if self.summary.round_results.len() > 1 {
            self.error(
                None,
                IssueCode::MultipleRoundResult,
                "Round contains multiple 'roundResult' events.",
            );
        }

        let Some(terminal) = Terminal::locate(&self.summary, self.events) else {
            self.error(
                None,
                IssueCode::MissingTerminalEvent,
                "Round must contain terminal 'finalWin' (canonical) or 'roundResult' (legacy).",
            );
            return None;
        };

        if terminal.index + 1 < self.events.len() {
            self.error(
                Some(terminal.index + 1),
                IssueCode::EventAfterTerminal,
                "No events may appear after the terminal event.",
            );
        }

        if self.summary.has_mixed_terminals() {
            self.warning(
                None,
                IssueCode::MixedTerminalTypes,
                "Both finalWin and roundResult are present; prefer finalWin-only canonical stream.",
            );
        }

        if terminal.amount.map_or(true, |amount| amount < 0) {
            let label = raw_type_label(&self.events[terminal.index]);
            self.error(
                Some(terminal.index),
                IssueCode::MissingTerminalTotal,
                format!("{} has no valid total amount.", label),
            );
        }

        Some(terminal)
    }

    /// The last `setTotalWin` precedes the terminal and matches its amount.
    pub(crate) fn check_set_total_win(&mut self, terminal: &Terminal) {
        let Some(&last) = self.summary.set_total_wins.last() else {
            self.error(
                None,
                IssueCode::MissingSetTotalWin,
                "Round must include at least one 'setTotalWin' event.",
            );
            return;
        };

        if last > terminal.index {
            self.error(
                Some(last),
                IssueCode::SetTotalAfterTerminal,
                "setTotalWin must occur before terminal event.",
            );
        }

        let amount = self.events[last].integer(field::AMOUNT);
        match amount {
            Some(amount) if amount >= 0 => {
                if terminal.amount.is_some_and(|total| total != amount) {
                    self.error(
                        Some(last),
                        IssueCode::SetTotalTerminalMismatch,
                        "Final setTotalWin.amount must equal terminal total amount.",
                    );
                }
            }
            _ => self.error(
                Some(last),
                IssueCode::InvalidSetTotalAmount,
                "setTotalWin.amount must be integer >= 0.",
            ),
        }
    }

    /// Canonical streams only: per-step `setWin` events precede `finalWin`.
    pub(crate) fn check_set_wins(&mut self, terminal: &Terminal) {
        if !terminal.is_canonical() {
            return;
        }

        let late: Vec<usize> =
            self.summary.set_wins.iter().copied().filter(|&p| p > terminal.index).collect();
        for position in late {
            self.error(Some(position), IssueCode::SetWinAfterFinal, "setWin must occur before finalWin.");
        }

        if terminal.amount.is_some_and(|amount| amount > 0) && self.summary.set_wins.is_empty() {
            self.warning(
                None,
                IssueCode::MissingSetWinPositivePayout,
                "Positive terminal payout without any setWin events.",
            );
        }
    }

    pub(crate) fn check_payout_multiplier(&mut self, round: &Round, terminal: &Terminal) {
        let (Some(multiplier), Some(total)) = (round.payout_multiplier_integer(), terminal.amount) else {
            return;
        };
        if multiplier != total {
            self.error(
                None,
                IssueCode::PayoutMultiplierMismatch,
                "Top-level payoutMultiplier does not match terminal total amount.",
            );
        }
    }

    /// Itemized wins reconcile with the declared total: through the bonus
    /// pick when one exists, through the win-info sum otherwise.
    pub(crate) fn check_win_reconciliation(&mut self, terminal: &Terminal) {
        if let Some(position) = self.summary.first_bonus_pick {
            let payout = self.events[position].integer(field::PAYOUT);
            match payout {
                Some(payout) if payout >= 0 => {
                    if terminal.amount.is_some_and(|total| total != payout) {
                        self.error(
                            None,
                            IssueCode::BonuspickTerminalMismatch,
                            "bonusPick.payout must equal terminal total amount.",
                        );
                    }
                }
                _ => self.error(
                    None,
                    IssueCode::InvalidBonuspickPayout,
                    "bonusPick.payout must be integer >= 0.",
                ),
            }
            return;
        }

        if terminal.amount.is_some_and(|total| total != self.win_info_sum) {
            self.error(
                None,
                IssueCode::SumWininfoTerminalMismatch,
                "sum(winInfo totals) must equal terminal total amount.",
            );
        }
    }

    /// Free-spin sub-protocol. Advisory only.
    pub(crate) fn check_free_spins(&mut self) {
        let triggered = !self.summary.free_spin_triggers.is_empty();
        let context = self.summary.free_spin_context();

        if triggered && !self.summary.has_enter_bonus {
            self.warning(
                None,
                IssueCode::MissingEnterBonus,
                "freeSpinTrigger present without enterBonus event.",
            );
        }

        if triggered && context && !self.summary.has_free_spin_reveal {
            self.warning(
                None,
                IssueCode::MissingFreespinReveal,
                "freeSpinTrigger present without free-spin reveal events.",
            );
        }

        if self.summary.has_update_free_spin && !triggered {
            self.warning(
                None,
                IssueCode::UpdateFreespinWithoutTrigger,
                "updateFreeSpin present without freeSpinTrigger/freeSpinRetrigger.",
            );
        }

        if triggered && context && !self.summary.has_free_spin_end {
            self.warning(
                None,
                IssueCode::MissingFreespinEnd,
                "freeSpinTrigger present without freeSpinEnd.",
            );
        }
    }
}

/// `type` as written in the input, for messages.
fn raw_type_label(event: &Event) -> String {
    match event.raw_type() {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => "undefined".to_string(),
    }
}
