//! Text decoding: whole-document JSON and JSON Lines.

use serde_json::Value;
use std::path::Path;

use super::shape::DocumentShape;
use crate::error::{Result, SourceError};
use crate::models::Round;

/// How an input file is decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// One record per line; forced by the `.jsonl` extension
    JsonLines,
    /// Whole-document JSON, falling back to JSON Lines when it does not parse
    Auto,
}

impl InputFormat {
    pub fn from_path(path: &Path) -> Self {
        let is_jsonl = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("jsonl"));
        if is_jsonl {
            InputFormat::JsonLines
        } else {
            InputFormat::Auto
        }
    }
}

/// Decode a single JSON document into rounds.
pub fn parse_json_document(text: &str) -> std::result::Result<Vec<Round>, serde_json::Error> {
    let document: Value = serde_json::from_str(text)?;
    Ok(DocumentShape::classify(document).into_rounds())
}

/// Decode newline-delimited JSON records into rounds.
///
/// Blank lines are skipped; a line that does not parse fails the whole input.
pub fn parse_json_lines(text: &str) -> Result<Vec<Round>> {
    let records = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .enumerate()
        .map(|(idx, line)| {
            serde_json::from_str::<Value>(line)
                .map_err(|source| SourceError::JsonLine { line: idx + 1, source })
        })
        .collect::<Result<Vec<Value>>>()?;

    Ok(DocumentShape::classify_records(records).into_rounds())
}

/// Decode `text` according to the format implied by `path`.
///
/// A leading UTF-8 byte order mark is ignored.
pub fn parse_rounds(path: &Path, text: &str) -> Result<Vec<Round>> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    match InputFormat::from_path(path) {
        InputFormat::JsonLines => parse_json_lines(text),
        InputFormat::Auto => match parse_json_document(text) {
            Ok(rounds) => Ok(rounds),
            Err(err) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %err,
                    "input is not a single JSON document, retrying as JSON Lines"
                );
                parse_json_lines(text)
            }
        },
    }
}
