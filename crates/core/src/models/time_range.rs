use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::errors::{TutorError, TutorResult};

pub const MESSAGE_CONSTRAINTS: &str = "Lesson time range should be of the format HHmm-HHmm \
    and adhere to the following constraints:\n\
    1. End time cannot be earlier than start time.\n\
    2. Lesson should be conducted between 8am and 10pm, inclusive";

const TIME_FORMAT: &str = "%H%M";

/// Earliest time a lesson may start.
pub fn day_start() -> NaiveTime {
    NaiveTime::MIN + chrono::Duration::hours(8)
}

/// Latest time a lesson may end.
pub fn day_end() -> NaiveTime {
    NaiveTime::MIN + chrono::Duration::hours(22)
}

/// Wall-clock span of a lesson within a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeRange {
    start: NaiveTime,
    end: NaiveTime,
}

impl TimeRange {
    pub fn new(start: NaiveTime, end: NaiveTime) -> TutorResult<Self> {
        if end < start || start < day_start() || end > day_end() {
            return Err(TutorError::validation(MESSAGE_CONSTRAINTS));
        }
        // Sub-minute precision is dropped so durations are whole minutes.
        let start = truncate_to_minute(start);
        let end = truncate_to_minute(end);
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn end(&self) -> NaiveTime {
        self.end
    }

    pub fn duration_minutes(&self) -> u64 {
        (self.end - self.start).num_minutes().max(0) as u64
    }

    /// Two ranges clash when either one starts inside the other's closed interval,
    /// so ranges that merely touch at an endpoint still clash.
    pub fn is_clashing(&self, other: &TimeRange) -> bool {
        let starts_within = |range: &TimeRange, time: NaiveTime| range.start <= time && time <= range.end;
        starts_within(other, self.start) || starts_within(self, other.start)
    }
}

fn truncate_to_minute(time: NaiveTime) -> NaiveTime {
    time.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(time)
}

fn parse_time(value: &str) -> TutorResult<NaiveTime> {
    if value.len() != 4 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TutorError::validation(MESSAGE_CONSTRAINTS));
    }
    NaiveTime::parse_from_str(value, TIME_FORMAT)
        .map_err(|_| TutorError::validation(MESSAGE_CONSTRAINTS))
}

impl FromStr for TimeRange {
    type Err = TutorError;

    fn from_str(value: &str) -> TutorResult<Self> {
        let (start, end) = value
            .trim()
            .split_once('-')
            .ok_or_else(|| TutorError::validation(MESSAGE_CONSTRAINTS))?;
        TimeRange::new(parse_time(start)?, parse_time(end)?)
    }
}

impl TryFrom<String> for TimeRange {
    type Error = TutorError;

    fn try_from(value: String) -> TutorResult<Self> {
        value.parse()
    }
}

impl From<TimeRange> for String {
    fn from(range: TimeRange) -> Self {
        range.to_string()
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            self.start.format(TIME_FORMAT),
            self.end.format(TIME_FORMAT)
        )
    }
}
