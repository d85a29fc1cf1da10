//! Persisted best-score records across rounds.

pub mod ledger;

pub use ledger::{LedgerError, ScoreLedger, ScoreReport};
