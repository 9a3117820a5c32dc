/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Picks the single winning rule for a screen at one instant.
//!
//! Three steps, each a pure filter over borrowed rules:
//!
//! 1. **Target** – keep rules aimed at the screen's id or at its group.
//! 2. **Activity** – keep rules whose time window contains `now`.
//! 3. **Selection** – highest `priority` wins; equal priorities go to the
//!    lexicographically smallest rule id.
//!
//! The tie-break depends only on rule contents, never on the order the store
//! returned them in, so the same rule set always yields the same winner.

use std::cmp::Ordering;

use chrono::{Datelike, Timelike};
use tracing::debug;

use super::matcher::is_active;
use crate::model::{ScheduleRule, Screen};

/// Total order used for selection: greater means "wins".
fn precedence(a: &ScheduleRule, b: &ScheduleRule) -> Ordering {
    a.priority
        .cmp(&b.priority)
        // Smaller id wins, so reverse the id comparison.
        .then_with(|| b.id.cmp(&a.id))
}

/// Returns the rule that decides `screen`'s content at `now`, if any.
pub fn resolve_active_rule<'a, T: Datelike + Timelike>(
    screen: &Screen,
    rules: &'a [ScheduleRule],
    now: &T,
) -> Option<&'a ScheduleRule> {
    rules
        .iter()
        .filter(|rule| rule.targets(screen))
        .filter(|rule| {
            let active = is_active(rule, now);
            debug!(
                screen_id = %screen.id,
                rule_id   = %rule.id,
                priority  = rule.priority,
                active,
                "rule evaluated"
            );
            active
        })
        .max_by(|a, b| precedence(a, b))
}

/// Returns the winning rule's playlist id, or `None` if no rule targeting
/// `screen` is active at `now`.
pub fn resolve_active_playlist<'a, T: Datelike + Timelike>(
    screen: &Screen,
    rules: &'a [ScheduleRule],
    now: &T,
) -> Option<&'a str> {
    resolve_active_rule(screen, rules, now).map(|rule| rule.playlist_id.as_str())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
