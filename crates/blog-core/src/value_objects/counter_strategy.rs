//! Counter maintenance strategy

use std::fmt;

use serde::{Deserialize, Serialize};

/// How like/dislike counters are kept in step with reaction records.
///
/// One strategy applies to every subject kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CounterStrategy {
    /// Re-count reaction records and overwrite both counters
    #[default]
    Recompute,
    /// Apply the signed delta of the state transition
    Incremental,
}

impl fmt::Display for CounterStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Recompute => f.write_str("recompute"),
            Self::Incremental => f.write_str("incremental"),
        }
    }
}

impl std::str::FromStr for CounterStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "recompute" => Ok(Self::Recompute),
            "incremental" | "delta" => Ok(Self::Incremental),
            other => Err(format!("unknown counter strategy: {other}")),
        }
    }
}
