//! Error types for the flat-file boundary and reference-table validation
//!
//! The valuation and roll-forward arithmetic never fails: missing lookups and
//! inconsistent probabilities are handled per projection year. Errors only arise
//! when reading inputs or building reference tables.

use std::path::PathBuf;

/// Reference table failed validation
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TableError {
    #[error("discount curve has no rates")]
    EmptyDiscountCurve,

    #[error("discount curve duration {0} is below 1")]
    InvalidDuration(u32),

    #[error("discount curve lists duration {0} more than once")]
    DuplicateDuration(u32),

    #[error("mortality table has no rows")]
    EmptyMortalityTable,

    #[error("mortality table lists age {0} more than once")]
    DuplicateAge(u32),

    #[error("survivor count increases from age {age} to age {next_age}")]
    SurvivorsIncreasing { age: u32, next_age: u32 },

    #[error("{field} at age {age} is {value}, outside [0, 1]")]
    ProbabilityOutOfRange {
        field: &'static str,
        age: u32,
        value: f64,
    },

    #[error("decrement band {min_age}-{max_age} is empty or overlaps a previous band")]
    InvalidBand { min_age: u32, max_age: u32 },
}

/// Failure while loading CSV inputs
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("malformed record: {0}")]
    Record(#[from] csv::Error),

    #[error("employee id {0} appears more than once")]
    DuplicateEmployee(u32),

    #[error("unknown gender code {0:?}")]
    UnknownGender(String),

    #[error("invalid reference table: {0}")]
    Table(#[from] TableError),
}

impl LoadError {
    pub(crate) fn open(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        LoadError::Open {
            path: path.into(),
            source,
        }
    }
}
