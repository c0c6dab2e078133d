//! # Round Validator
//!
//! Checks one round's event stream against the RGS protocol contract:
//! structure (index numbering, start/terminal ordering), presence rules
//! (reveal, running total), and financial reconciliation (win-info totals,
//! bonus picks, top-level multiplier). Free-spin sequencing is advisory.
//!
//! Validation runs in two phases: [`RoundSummary::extract`] collects
//! canonical kinds and positions once, then each rule in [`rules`] is
//! evaluated against that summary. Only an empty round or a round without a
//! terminal event stops early.

pub mod rules;
pub mod summary;

pub use rules::RoundIssues;
pub use summary::{RoundSummary, Terminal, WinInfoReading};

use crate::config::ValidatorConfig;
use crate::models::Round;
use rules::RoundCheck;

/// Validates rounds independently; holds configuration only.
#[derive(Debug, Clone, Default)]
pub struct RoundValidator {
    config: ValidatorConfig,
}

impl RoundValidator {
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    pub fn validate(&self, round: &Round) -> RoundIssues {
        let issues = self.run_checks(round);
        tracing::debug!(
            round = %round.id,
            events = round.events.len(),
            errors = issues.errors.len(),
            warnings = issues.warnings.len(),
            "validated round"
        );
        issues
    }

    fn run_checks(&self, round: &Round) -> RoundIssues {
        let mut check = RoundCheck::new(round, &self.config);

        if !check.check_not_empty() {
            return check.finish();
        }

        check.check_index_contiguity();
        check.check_events();
        check.check_reveal_present();
        check.check_spin_start_first();

        let Some(terminal) = check.check_terminal() else {
            return check.finish();
        };

        check.check_set_total_win(&terminal);
        check.check_set_wins(&terminal);
        check.check_payout_multiplier(round, &terminal);
        check.check_win_reconciliation(&terminal);
        check.check_free_spins();

        check.finish()
    }
}

/// Validate one round with the default configuration.
pub fn validate_round(round: &Round) -> RoundIssues {
    RoundValidator::default().validate(round)
}
