//! Persisted best-score ledger.
//!
//! The store is a plain text file of newline-delimited `name score` pairs,
//! one line per player, rewritten in full on every update. A missing or
//! unreadable store reads as empty. Names carry no whitespace; lines that
//! do not parse are skipped.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Score store failure. Always recoverable: callers fall back to
/// [`ScoreReport::unavailable`] instead of ending the session.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("failed to write score store {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// What the ledger reports after recording a round
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreReport {
    /// The player's best score across all recorded rounds
    pub personal_best: u32,
    /// Name holding the highest score in the store
    pub top_scorer: String,
    /// The highest score in the store
    pub top_score: u32,
}

impl ScoreReport {
    /// The zeroed defaults shown when the store cannot be updated
    pub fn unavailable() -> Self {
        Self {
            personal_best: 0,
            top_scorer: "N/A".to_string(),
            top_score: 0,
        }
    }
}

/// Handle on the persisted score store
pub struct ScoreLedger {
    path: PathBuf,
}

impl ScoreLedger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record a finished round and report the player's best plus the global
    /// best across every entry, including the one just written.
    ///
    /// The stored value for a name only ever goes up; recording a score
    /// below the player's best leaves the store unchanged in meaning.
    pub fn record_and_query(&self, name: &str, score: u32) -> Result<ScoreReport, LedgerError> {
        let mut best_scores = self.load();

        let entry = best_scores.entry(name.to_string()).or_insert(0);
        *entry = (*entry).max(score);

        self.store(&best_scores)?;

        let personal_best = best_scores[name];
        let mut top_scorer = "N/A".to_string();
        let mut top_score = 0;
        for (entry_name, &entry_score) in &best_scores {
            if entry_score > top_score {
                top_scorer = entry_name.clone();
                top_score = entry_score;
            }
        }

        Ok(ScoreReport {
            personal_best,
            top_scorer,
            top_score,
        })
    }

    /// Read the store; a missing or unreadable file is an empty ledger.
    /// Duplicate names keep the maximum.
    fn load(&self) -> BTreeMap<String, u32> {
        let mut best_scores = BTreeMap::new();

        let Ok(contents) = std::fs::read_to_string(&self.path) else {
            return best_scores;
        };

        for line in contents.lines() {
            let mut fields = line.split_whitespace();
            let (Some(name), Some(score)) = (fields.next(), fields.next()) else {
                continue;
            };
            let Ok(score) = score.parse::<u32>() else {
                continue;
            };
            let entry = best_scores.entry(name.to_string()).or_insert(0);
            *entry = (*entry).max(score);
        }

        best_scores
    }

    /// Rewrite the entire store
    fn store(&self, best_scores: &BTreeMap<String, u32>) -> Result<(), LedgerError> {
        let mut out = String::new();
        for (name, score) in best_scores {
            out.push_str(name);
            out.push(' ');
            out.push_str(&score.to_string());
            out.push('\n');
        }

        let mut file = std::fs::File::create(&self.path).map_err(|source| LedgerError::Write {
            path: self.path.clone(),
            source,
        })?;
        file.write_all(out.as_bytes())
            .map_err(|source| LedgerError::Write {
                path: self.path.clone(),
                source,
            })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn ledger_in(dir: &TempDir) -> ScoreLedger {
        ScoreLedger::new(dir.path().join("scores.txt"))
    }

    #[test]
    fn test_first_record_on_empty_store() {
        let dir = TempDir::new().unwrap();
        let ledger = ledger_in(&dir);

        let report = ledger.record_and_query("Ava", 120).unwrap();

        assert_eq!(report.personal_best, 120);
        assert_eq!(report.top_scorer, "Ava");
        assert_eq!(report.top_score, 120);
    }

    #[test]
    fn test_lower_score_preserves_best() {
        let dir = TempDir::new().unwrap();
        let ledger = ledger_in(&dir);

        ledger.record_and_query("Ava", 120).unwrap();
        let report = ledger.record_and_query("Ava", 80).unwrap();

        assert_eq!(report.personal_best, 120);
        assert_eq!(report.top_score, 120);
    }

    #[test]
    fn test_top_scorer_across_players() {
        let dir = TempDir::new().unwrap();
        let ledger = ledger_in(&dir);

        ledger.record_and_query("Ava", 120).unwrap();
        let report = ledger.record_and_query("Ben", 200).unwrap();

        assert_eq!(report.personal_best, 200);
        assert_eq!(report.top_scorer, "Ben");
        assert_eq!(report.top_score, 200);

        let report = ledger.record_and_query("Ava", 50).unwrap();
        assert_eq!(report.personal_best, 120);
        assert_eq!(report.top_scorer, "Ben");
        assert_eq!(report.top_score, 200);
    }

    #[test]
    fn test_store_is_fully_rewritten() {
        let dir = TempDir::new().unwrap();
        let ledger = ledger_in(&dir);

        ledger.record_and_query("Ava", 120).unwrap();
        ledger.record_and_query("Ben", 200).unwrap();

        let contents = std::fs::read_to_string(ledger.path()).unwrap();
        let mut lines: Vec<&str> = contents.lines().collect();
        lines.sort_unstable();
        assert_eq!(lines, vec!["Ava 120", "Ben 200"]);
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scores.txt");
        std::fs::write(&path, "Ava 120\ngarbage\nBen not-a-number\n").unwrap();
        let ledger = ScoreLedger::new(&path);

        let report = ledger.record_and_query("Cal", 10).unwrap();

        assert_eq!(report.top_scorer, "Ava");
        assert_eq!(report.top_score, 120);
    }

    #[test]
    fn test_duplicate_names_keep_max() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scores.txt");
        std::fs::write(&path, "Ava 120\nAva 90\n").unwrap();
        let ledger = ScoreLedger::new(&path);

        let report = ledger.record_and_query("Ava", 100).unwrap();

        assert_eq!(report.personal_best, 120);
    }

    #[test]
    fn test_write_failure_is_recoverable() {
        let dir = TempDir::new().unwrap();
        // The store path is a directory, so the rewrite must fail
        let ledger = ScoreLedger::new(dir.path());

        let result = ledger.record_and_query("Ava", 120);

        assert!(result.is_err());
        let report = result.unwrap_or_else(|_| ScoreReport::unavailable());
        assert_eq!(report.personal_best, 0);
        assert_eq!(report.top_scorer, "N/A");
        assert_eq!(report.top_score, 0);
    }
}
