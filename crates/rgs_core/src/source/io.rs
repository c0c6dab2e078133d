use std::fs;
use std::path::Path;

use super::parse::parse_rounds;
use crate::error::{Result, SourceError};
use crate::models::Round;

/// Read and decode an event log from disk.
pub fn load_rounds<P: AsRef<Path>>(path: P) -> Result<Vec<Round>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(SourceError::NotFound { path: path.to_path_buf() });
    }

    let text = fs::read_to_string(path)
        .map_err(|source| SourceError::Io { path: path.to_path_buf(), source })?;

    let rounds = parse_rounds(path, &text)?;
    tracing::debug!(path = %path.display(), rounds = rounds.len(), "decoded input");
    Ok(rounds)
}
