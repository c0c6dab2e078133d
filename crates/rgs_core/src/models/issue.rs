//! Issues reported by the validator.

use serde::Serialize;
use std::fmt;

use super::round::RoundId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Protocol violation; fails the report
    Error,
    /// Suspicious but tolerated
    Warning,
}

/// Stable machine-readable issue codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    NoRounds,
    EmptyRound,
    NonContiguousIndex,
    InvalidEvent,
    UnknownEventType,
    NonMonotonicRoundIndex,
    MissingWinFields,
    NegativeWinTotal,
    WininfoTotalMismatch,
    InconsistentPayout,
    MissingReveal,
    SpinStartNotFirst,
    MultipleFinalWin,
    MultipleRoundResult,
    MissingTerminalEvent,
    EventAfterTerminal,
    MixedTerminalTypes,
    MissingTerminalTotal,
    MissingSetTotalWin,
    SetTotalAfterTerminal,
    InvalidSetTotalAmount,
    SetTotalTerminalMismatch,
    SetWinAfterFinal,
    MissingSetWinPositivePayout,
    PayoutMultiplierMismatch,
    InvalidBonuspickPayout,
    BonuspickTerminalMismatch,
    SumWininfoTerminalMismatch,
    MissingEnterBonus,
    MissingFreespinReveal,
    UpdateFreespinWithoutTrigger,
    MissingFreespinEnd,
}

impl IssueCode {
    pub const ALL: [IssueCode; 32] = [
        IssueCode::NoRounds,
        IssueCode::EmptyRound,
        IssueCode::NonContiguousIndex,
        IssueCode::InvalidEvent,
        IssueCode::UnknownEventType,
        IssueCode::NonMonotonicRoundIndex,
        IssueCode::MissingWinFields,
        IssueCode::NegativeWinTotal,
        IssueCode::WininfoTotalMismatch,
        IssueCode::InconsistentPayout,
        IssueCode::MissingReveal,
        IssueCode::SpinStartNotFirst,
        IssueCode::MultipleFinalWin,
        IssueCode::MultipleRoundResult,
        IssueCode::MissingTerminalEvent,
        IssueCode::EventAfterTerminal,
        IssueCode::MixedTerminalTypes,
        IssueCode::MissingTerminalTotal,
        IssueCode::MissingSetTotalWin,
        IssueCode::SetTotalAfterTerminal,
        IssueCode::InvalidSetTotalAmount,
        IssueCode::SetTotalTerminalMismatch,
        IssueCode::SetWinAfterFinal,
        IssueCode::MissingSetWinPositivePayout,
        IssueCode::PayoutMultiplierMismatch,
        IssueCode::InvalidBonuspickPayout,
        IssueCode::BonuspickTerminalMismatch,
        IssueCode::SumWininfoTerminalMismatch,
        IssueCode::MissingEnterBonus,
        IssueCode::MissingFreespinReveal,
        IssueCode::UpdateFreespinWithoutTrigger,
        IssueCode::MissingFreespinEnd,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IssueCode::NoRounds => "no_rounds",
            IssueCode::EmptyRound => "empty_round",
            IssueCode::NonContiguousIndex => "non_contiguous_index",
            IssueCode::InvalidEvent => "invalid_event",
            IssueCode::UnknownEventType => "unknown_event_type",
            IssueCode::NonMonotonicRoundIndex => "non_monotonic_round_index",
            IssueCode::MissingWinFields => "missing_win_fields",
            IssueCode::NegativeWinTotal => "negative_win_total",
            IssueCode::WininfoTotalMismatch => "wininfo_total_mismatch",
            IssueCode::InconsistentPayout => "inconsistent_payout",
            IssueCode::MissingReveal => "missing_reveal",
            IssueCode::SpinStartNotFirst => "spin_start_not_first",
            IssueCode::MultipleFinalWin => "multiple_final_win",
            IssueCode::MultipleRoundResult => "multiple_round_result",
            IssueCode::MissingTerminalEvent => "missing_terminal_event",
            IssueCode::EventAfterTerminal => "event_after_terminal",
            IssueCode::MixedTerminalTypes => "mixed_terminal_types",
            IssueCode::MissingTerminalTotal => "missing_terminal_total",
            IssueCode::MissingSetTotalWin => "missing_set_total_win",
            IssueCode::SetTotalAfterTerminal => "set_total_after_terminal",
            IssueCode::InvalidSetTotalAmount => "invalid_set_total_amount",
            IssueCode::SetTotalTerminalMismatch => "set_total_terminal_mismatch",
            IssueCode::SetWinAfterFinal => "set_win_after_final",
            IssueCode::MissingSetWinPositivePayout => "missing_set_win_positive_payout",
            IssueCode::PayoutMultiplierMismatch => "payout_multiplier_mismatch",
            IssueCode::InvalidBonuspickPayout => "invalid_bonuspick_payout",
            IssueCode::BonuspickTerminalMismatch => "bonuspick_terminal_mismatch",
            IssueCode::SumWininfoTerminalMismatch => "sum_wininfo_terminal_mismatch",
            IssueCode::MissingEnterBonus => "missing_enter_bonus",
            IssueCode::MissingFreespinReveal => "missing_freespin_reveal",
            IssueCode::UpdateFreespinWithoutTrigger => "update_freespin_without_trigger",
            IssueCode::MissingFreespinEnd => "missing_freespin_end",
        }
    }
}

impl fmt::Display for IssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One reported error or warning.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
    pub round_id: RoundId,
    /// `None` applies to the whole round
    pub event_index: Option<usize>,
    pub code: IssueCode,
    /// Implied by which report list holds the issue
    #[serde(skip)]
    pub severity: Severity,
    pub message: String,
}

impl ValidationIssue {
    pub fn error(
        round_id: RoundId,
        event_index: Option<usize>,
        code: IssueCode,
        message: impl Into<String>,
    ) -> Self {
        Self { round_id, event_index, code, severity: Severity::Error, message: message.into() }
    }

    pub fn warning(
        round_id: RoundId,
        event_index: Option<usize>,
        code: IssueCode,
        message: impl Into<String>,
    ) -> Self {
        Self { round_id, event_index, code, severity: Severity::Warning, message: message.into() }
    }
}
