//! Report aggregation and rendering.

use rayon::prelude::*;
use serde::Serialize;
use std::fmt::Write as _;

use crate::config::ValidatorConfig;
use crate::models::{IssueCode, Round, RoundId, ValidationIssue};
use crate::validate::{RoundIssues, RoundValidator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Pass,
    Fail,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pass => "pass",
            Status::Fail => "fail",
        }
    }
}

/// Outcome of validating every round of one input.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub status: Status,
    pub rounds_checked: usize,
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Warnings alone never fail a report.
    pub fn from_issues(
        rounds_checked: usize,
        errors: Vec<ValidationIssue>,
        warnings: Vec<ValidationIssue>,
    ) -> Self {
        let status = if errors.is_empty() { Status::Pass } else { Status::Fail };
        Self { status, rounds_checked, errors, warnings }
    }

    pub fn passed(&self) -> bool {
        self.status == Status::Pass
    }
}

/// Validate every round and merge the results in round order.
pub fn validate_rounds(rounds: &[Round], config: &ValidatorConfig) -> ValidationReport {
    if rounds.is_empty() {
        let issue = ValidationIssue::error(
            RoundId::null(),
            None,
            IssueCode::NoRounds,
            "No rounds could be parsed from input.",
        );
        tracing::info!("no rounds to validate");
        return ValidationReport::from_issues(0, vec![issue], Vec::new());
    }

    let validator = RoundValidator::new(config.clone());

    // Indexed collect keeps input order, so both paths merge identically
    let per_round: Vec<RoundIssues> = if config.parallel {
        rounds.par_iter().map(|round| validator.validate(round)).collect()
    } else {
        rounds.iter().map(|round| validator.validate(round)).collect()
    };

    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    for issues in per_round {
        errors.extend(issues.errors);
        warnings.extend(issues.warnings);
    }

    let report = ValidationReport::from_issues(rounds.len(), errors, warnings);
    tracing::info!(
        status = report.status.as_str(),
        rounds = report.rounds_checked,
        errors = report.errors.len(),
        warnings = report.warnings.len(),
        "validation finished"
    );
    report
}

/// Pretty-printed JSON form of the report.
pub fn render_json(report: &ValidationReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

/// Human-readable summary followed by one line per issue.
pub fn render_text(report: &ValidationReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "status: {}", report.status.as_str());
    let _ = writeln!(out, "roundsChecked: {}", report.rounds_checked);
    let _ = writeln!(out, "errors: {}", report.errors.len());
    let _ = write!(out, "warnings: {}", report.warnings.len());

    write_details(&mut out, "Error details:", &report.errors);
    write_details(&mut out, "Warning details:", &report.warnings);
    out
}

fn write_details(out: &mut String, heading: &str, issues: &[ValidationIssue]) {
    if issues.is_empty() {
        return;
    }
    let _ = write!(out, "\n\n{}", heading);
    for issue in issues {
        let event = issue.event_index.map_or_else(|| "-".to_string(), |i| i.to_string());
        let _ = write!(
            out,
            "\n- [{}] round={} event={}: {}",
            issue.code, issue.round_id, event, issue.message
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Event;
    use serde_json::{json, Value};

    fn round(id: Value, events: Value) -> Round {
        let events = events.as_array().unwrap().iter().cloned().map(Event::from).collect();
        Round::new(RoundId(id), events)
    }

    fn sample_rounds() -> Vec<Round> {
        vec![
            round(
                json!("ok"),
                json!([
                    {"type": "reveal"},
                    {"type": "winInfo", "totalWin": 100},
                    {"type": "setTotalWin", "amount": 100},
                    {"type": "finalWin", "amount": 100}
                ]),
            ),
            round(json!(1), json!([])),
            round(
                json!(2),
                json!([
                    {"type": "reveal"},
                    {"type": "finalWin", "amount": 100},
                    {"type": "setTotalWin", "amount": 100}
                ]),
            ),
        ]
    }

    #[test]
    fn test_no_rounds() {
        let report = validate_rounds(&[], &ValidatorConfig::default());
        assert_eq!(report.status, Status::Fail);
        assert_eq!(report.rounds_checked, 0);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].code, IssueCode::NoRounds);
        assert_eq!(report.errors[0].round_id, RoundId::null());
    }

    #[test]
    fn test_warnings_do_not_fail() {
        let rounds = sample_rounds();
        let report = validate_rounds(&rounds[..1], &ValidatorConfig::default());
        assert!(report.passed());
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn test_issues_merge_in_round_order() {
        let report = validate_rounds(&sample_rounds(), &ValidatorConfig::default());
        assert_eq!(report.status, Status::Fail);
        assert_eq!(report.rounds_checked, 3);
        assert_eq!(report.errors[0].code, IssueCode::EmptyRound);
        assert_eq!(report.errors[0].round_id, RoundId(json!(1)));
        assert!(report.errors[1..].iter().all(|i| i.round_id == RoundId(json!(2))));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let mut rounds = Vec::new();
        for _ in 0..50 {
            rounds.extend(sample_rounds());
        }
        let parallel = validate_rounds(&rounds, &ValidatorConfig { parallel: true, ..Default::default() });
        let sequential =
            validate_rounds(&rounds, &ValidatorConfig { parallel: false, ..Default::default() });
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_render_text() {
        let report = validate_rounds(&sample_rounds()[..2], &ValidatorConfig::default());
        let text = render_text(&report);
        let expected = "status: fail\n\
roundsChecked: 2\n\
errors: 1\n\
warnings: 1\n\
\n\
Error details:\n\
- [empty_round] round=1 event=-: Round has no events.\n\
\n\
Warning details:\n\
- [missing_set_win_positive_payout] round=ok event=-: Positive terminal payout without any setWin events.";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_render_text_pass_has_no_details() {
        let report = ValidationReport::from_issues(1, Vec::new(), Vec::new());
        assert_eq!(render_text(&report), "status: pass\nroundsChecked: 1\nerrors: 0\nwarnings: 0");
    }

    #[test]
    fn test_render_text_null_round_id() {
        let report = validate_rounds(&[], &ValidatorConfig::default());
        assert!(render_text(&report)
            .ends_with("- [no_rounds] round=? event=-: No rounds could be parsed from input."));
    }

    #[test]
    fn test_json_wire_shape() {
        let report = validate_rounds(&sample_rounds()[1..2], &ValidatorConfig::default());
        insta::assert_snapshot!(render_json(&report).unwrap(), @r###"
        {
          "status": "fail",
          "roundsChecked": 1,
          "errors": [
            {
              "roundId": 1,
              "eventIndex": null,
              "code": "empty_round",
              "message": "Round has no events."
            }
          ],
          "warnings": []
        }
        "###);
    }

    #[test]
    fn test_render_json_round_trips_as_value() {
        let report = validate_rounds(&sample_rounds(), &ValidatorConfig::default());
        let parsed: Value = serde_json::from_str(&render_json(&report).unwrap()).unwrap();
        assert_eq!(parsed["status"], "fail");
        assert_eq!(parsed["roundsChecked"], 3);
        assert_eq!(parsed["errors"][0]["code"], "empty_round");
        assert_eq!(parsed["errors"][0]["eventIndex"], Value::Null);
    }
}
