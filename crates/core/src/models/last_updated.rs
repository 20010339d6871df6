use std::fmt;

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// When fees were last accrued, equivalent to the previous launch time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LastUpdated(NaiveDateTime);

impl LastUpdated {
    pub fn new(date_time: NaiveDateTime) -> Self {
        Self(truncate_to_minute(date_time))
    }

    pub fn date_time(&self) -> NaiveDateTime {
        self.0
    }
}

impl From<NaiveDateTime> for LastUpdated {
    fn from(date_time: NaiveDateTime) -> Self {
        Self::new(date_time)
    }
}

impl fmt::Display for LastUpdated {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%dT%H:%M"))
    }
}

/// Drops seconds and below; billing works at minute resolution.
pub fn truncate_to_minute(date_time: NaiveDateTime) -> NaiveDateTime {
    date_time
        .with_second(0)
        .and_then(|dt| dt.with_nanosecond(0))
        .unwrap_or(date_time)
}
