use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

/// An inclusive range of release years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct YearRange {
    start: i32,
    end: i32,
}

impl YearRange {
    /// # Errors
    /// Returns [`Error::InvalidRange`] when `start > end`.
    pub fn new(start: i32, end: i32) -> Result<Self> {
        if start > end {
            return Err(Error::InvalidRange(format!(
                "start year {start} is after end year {end}"
            )));
        }
        Ok(Self { start, end })
    }

    #[must_use]
    pub const fn start(&self) -> i32 {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> i32 {
        self.end
    }

    #[must_use]
    pub const fn contains(&self, year: i32) -> bool {
        year >= self.start && year <= self.end
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}
