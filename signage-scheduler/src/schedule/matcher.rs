/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Time window matching for a single rule.
//!
//! A rule is active at `now` when the weekday is in its day set and
//! `start <= minute-of-day < end`.  Windows are same-day only: a rule whose
//! end is at or before its start (an "overnight" window such as 22:00–02:00)
//! is never active.  Rolling such windows over midnight is a known
//! limitation, not something this module works around.

use chrono::{Datelike, Timelike};

use crate::model::ScheduleRule;

/// Minute of the day, `0..1440`.
pub fn minute_of_day<T: Timelike>(now: &T) -> u32 {
    now.hour() * 60 + now.minute()
}

/// Weekday number, `0` = Sunday .. `6` = Saturday.
pub fn day_of_week<T: Datelike>(now: &T) -> u32 {
    now.weekday().num_days_from_sunday()
}

/// Returns `true` if `rule` is active at `now`.
///
/// `now` must already be in the screens' local time; seconds are ignored.
pub fn is_active<T: Datelike + Timelike>(rule: &ScheduleRule, now: &T) -> bool {
    if !rule.days.contains(day_of_week(now)) {
        return false;
    }
    let minutes = minute_of_day(now);
    rule.start.minutes() <= minutes && minutes < rule.end.minutes()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
