use std::error::Error;
use std::fmt;

/// Errors reported by the checked counting entry points.
///
/// Only absent input is detected at runtime. A comparison that is not a total order is a caller
/// precondition and yields an unspecified count, never an error.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CountError {
    /// No sequence was supplied.
    InvalidInput,
}

impl fmt::Display for CountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CountError::InvalidInput => write!(f, "invalid input: no sequence to count"),
        }
    }
}

impl Error for CountError {}
