// ============================================================================
// D-Day Countdown
// ============================================================================

use crate::error::{CalcError, CalcResult};
use chrono::{DateTime, Local, LocalResult, NaiveDateTime, TimeZone};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

const SECONDS_PER_DAY: i64 = 86_400;

/// Target moment as a wall-clock time in the caller's time zone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DdayInput {
    pub target: NaiveDateTime,
}

impl DdayInput {
    pub fn new(target: NaiveDateTime) -> Self {
        Self { target }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DdayResult {
    /// Calendar days from today to the target date (negative once past)
    pub dday: i64,
    /// Whole days of the remaining (or elapsed) time
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    /// Target instant lies before now
    pub is_past: bool,
}

impl DdayResult {
    /// `D-3` before the day, `D-Day` on it, `D+2` after it
    pub fn label(&self) -> String {
        match self.dday {
            0 => "D-Day".to_string(),
            d if d > 0 => format!("D-{d}"),
            d => format!("D+{}", -d),
        }
    }
}

impl fmt::Display for DdayResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}d {:02}:{:02}:{:02})",
            self.label(),
            self.days,
            self.hours,
            self.minutes,
            self.seconds
        )
    }
}

/// Countdown from `now` to `target`.
///
/// `dday` compares calendar dates in the target's time zone. The
/// days/hours/minutes/seconds split the absolute time between the two
/// instants, rounded to the nearest second so a countdown started exactly
/// one day out reads `1d 00:00:00` rather than `0d 23:59:59`.
pub fn dday_between<Tz: TimeZone>(target: &DateTime<Tz>, now: &DateTime<Tz>) -> DdayResult {
    let zone = target.timezone();
    let today = now.with_timezone(&zone).date_naive();
    let dday = (target.date_naive() - today).num_days();

    let delta = target.clone().signed_duration_since(now.clone());
    let is_past = delta.num_milliseconds() < 0;
    let abs_millis = delta.num_milliseconds().unsigned_abs();
    let total_seconds = ((abs_millis + 500) / 1000) as i64;

    DdayResult {
        dday,
        days: total_seconds / SECONDS_PER_DAY,
        hours: (total_seconds % SECONDS_PER_DAY) / 3600,
        minutes: (total_seconds % 3600) / 60,
        seconds: total_seconds % 60,
        is_past,
    }
}

/// Resolve the wall-clock target in `now`'s zone and count down to it.
///
/// # Errors
/// `InvalidInput` when the target wall-clock time does not exist in that
/// zone (skipped by a daylight-saving jump).
pub fn calculate_dday<Tz: TimeZone>(input: &DdayInput, now: &DateTime<Tz>) -> CalcResult<DdayResult> {
    let zone = now.timezone();
    let target = match zone.from_local_datetime(&input.target) {
        LocalResult::Single(t) => t,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => {
            return Err(CalcError::invalid_input(
                "target_date",
                "time does not exist in the local time zone",
            ))
        }
    };
    Ok(dday_between(&target, now))
}

/// Countdown against the system clock in the local time zone.
pub fn dday_from_now(input: &DdayInput) -> CalcResult<DdayResult> {
    calculate_dday(input, &Local::now())
}
