// src/engine/types.rs
use std::fmt;

/// One directory entry as the search page exposes it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    pub first_name: String,
    pub class_year: Option<u16>,
}

impl Record {
    pub fn new(first_name: impl Into<String>, class_year: Option<u16>) -> Self {
        Record { first_name: first_name.into(), class_year }
    }
}

/// Outcome of one last-name-prefix query.
///
/// `Overflow` means the directory showed its "30 of more than 30" line:
/// the true count exceeds the enumeration cap, and whatever rows came
/// back must not be trusted as data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResultPage {
    Empty,
    Exact(Vec<Record>),
    Overflow,
}

/// A branch the engine could not fully resolve. Counts from an anomalous
/// branch are missing from the tally; the run is reported as incomplete
/// rather than silently short.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Anomaly {
    /// Still overflowing at the recursion depth cap. Only happens when
    /// more records than the cap share one full surname prefix.
    StillOverflowing { prefix: String },
    /// Query failed after the retry budget was spent.
    BranchFailed { prefix: String, cause: String },
}

impl fmt::Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Anomaly::StillOverflowing { prefix } => {
                write!(f, "prefix {prefix:?} still overflows at the depth cap")
            }
            Anomaly::BranchFailed { prefix, cause } => {
                write!(f, "prefix {prefix:?} abandoned after retries: {cause}")
            }
        }
    }
}

/// What one traversal did, beyond the records it folded.
#[derive(Clone, Debug, Default)]
pub struct SearchReport {
    /// Every query attempt issued, retries included.
    pub queries: usize,
    pub anomalies: Vec<Anomaly>,
}

impl SearchReport {
    /// True when every branch resolved; the tally covers the population.
    pub fn complete(&self) -> bool {
        self.anomalies.is_empty()
    }

    pub fn absorb(&mut self, other: SearchReport) {
        self.queries += other.queries;
        self.anomalies.extend(other.anomalies);
    }
}
