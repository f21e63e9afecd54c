//! Calendar boundaries in a player's local timezone.

use chrono::{
    DateTime, Datelike, Days, Duration, FixedOffset, NaiveDate, NaiveTime, Offset, Utc, Weekday,
};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Largest offset in use anywhere (UTC+14:00).
const MAX_OFFSET_MINUTES: i32 = 14 * 60;

/// A player's timezone as a fixed offset from UTC, in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UtcOffset(i32);

impl UtcOffset {
    pub const UTC: UtcOffset = UtcOffset(0);

    /// Create an offset, rejecting anything beyond +-14 hours.
    pub fn from_minutes(minutes: i32) -> Result<Self, DomainError> {
        if minutes.abs() > MAX_OFFSET_MINUTES {
            return Err(DomainError::validation(format!(
                "UTC offset {minutes} minutes is out of range"
            )));
        }
        Ok(Self(minutes))
    }

    pub fn minutes(&self) -> i32 {
        self.0
    }

    pub fn to_fixed(self) -> FixedOffset {
        FixedOffset::east_opt(self.0 * 60).unwrap_or_else(|| Utc.fix())
    }
}

fn local_midnight_to_utc(date: NaiveDate, offset: UtcOffset) -> DateTime<Utc> {
    let local_midnight = date.and_time(NaiveTime::MIN).and_utc();
    local_midnight - Duration::minutes(i64::from(offset.minutes()))
}

fn local_date(now: DateTime<Utc>, offset: UtcOffset) -> NaiveDate {
    now.with_timezone(&offset.to_fixed()).date_naive()
}

/// Midnight `days_ahead` days after the player's current local date.
///
/// `days_ahead = 1` is the next midnight; `0` is the midnight that started
/// today (already in the past).
pub fn timezone_midnight(now: DateTime<Utc>, offset: UtcOffset, days_ahead: u32) -> DateTime<Utc> {
    let date = local_date(now, offset)
        .checked_add_days(Days::new(u64::from(days_ahead)))
        .unwrap_or(NaiveDate::MAX);
    local_midnight_to_utc(date, offset)
}

/// Local midnight at the start of the next `weekday`, strictly after today.
///
/// Called on a Monday with `Weekday::Mon` this returns the following Monday.
pub fn next_weekday(now: DateTime<Utc>, offset: UtcOffset, weekday: Weekday) -> DateTime<Utc> {
    let today = local_date(now, offset);
    let current = today.weekday().num_days_from_monday();
    let target = weekday.num_days_from_monday();
    let mut days = (7 + target - current) % 7;
    if days == 0 {
        days = 7;
    }
    timezone_midnight(now, offset, days)
}
