/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Typed records for the schedule-resolution pipeline.
//!
//! ```text
//! store Record ──(decode)──►  Screen / ScheduleRule / Playlist  ──(schedule)──►  Assignment ──► device
//!   untyped bag                 validated, immutable during resolution            wire-ready, camelCase
//! ```
//!
//! Nothing in here parses JSON or touches the store.  Raw attribute bags are
//! turned into these types once, in [`crate::store::decode`], so the resolution
//! core only ever sees validated data.

use std::fmt;

use serde::{Deserialize, Serialize};

// ── Weekdays ──────────────────────────────────────────────────────────────────

/// Set of weekdays a rule applies to, `0` = Sunday .. `6` = Saturday.
///
/// Stored as a bitmask: bit N set means weekday N is included.  Bits 7 and
/// above are never set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct DaySet(u8);

impl DaySet {
    /// Weekday numbers are `0..=6`.
    pub const MAX_DAY: u32 = 6;

    pub const fn empty() -> Self {
        DaySet(0)
    }

    /// Build from weekday numbers.  Returns `None` if any value is outside
    /// `0..=6`.
    pub fn from_days<I: IntoIterator<Item = u32>>(days: I) -> Option<Self> {
        let mut mask = 0u8;
        for day in days {
            if day > Self::MAX_DAY {
                return None;
            }
            mask |= 1 << day;
        }
        Some(DaySet(mask))
    }

    /// Returns `true` if weekday `day` is in the set.
    pub fn contains(&self, day: u32) -> bool {
        day <= Self::MAX_DAY && (self.0 >> day) & 1 == 1
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Weekday numbers in ascending order.
    pub fn days(&self) -> Vec<u8> {
        (0..=Self::MAX_DAY as u8)
            .filter(|d| self.contains(u32::from(*d)))
            .collect()
    }
}

// ── Time of day ───────────────────────────────────────────────────────────────

/// A wall-clock time with minute precision, stored as minutes since midnight.
///
/// `24:00` is allowed as an end-of-day bound (1440 minutes) so a window can
/// cover the last minute of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    pub const END_OF_DAY: TimeOfDay = TimeOfDay(24 * 60);

    /// Build from hours and minutes.  Returns `None` for out-of-range values.
    pub fn from_hm(hour: u16, minute: u16) -> Option<Self> {
        match (hour, minute) {
            (24, 0) => Some(Self::END_OF_DAY),
            (0..=23, 0..=59) => Some(TimeOfDay(hour * 60 + minute)),
            _ => None,
        }
    }

    /// Parse `H:MM` or `HH:MM` (24-hour clock).
    pub fn parse(s: &str) -> Option<Self> {
        let (h, m) = s.trim().split_once(':')?;
        if h.is_empty() || h.len() > 2 || m.len() != 2 {
            return None;
        }
        if !h.bytes().chain(m.bytes()).all(|b| b.is_ascii_digit()) {
            return None;
        }
        let hour = h.parse::<u16>().ok()?;
        let minute = m.parse::<u16>().ok()?;
        Self::from_hm(hour, minute)
    }

    /// Minutes since midnight.
    pub fn minutes(&self) -> u32 {
        u32::from(self.0)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

// ── Screen ────────────────────────────────────────────────────────────────────

/// A registered display device, as far as resolution is concerned.
///
/// Pairing and auth metadata stay in the store; they play no part in choosing
/// content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Screen {
    pub id: String,
    pub name: Option<String>,

    /// Account that paired this screen.  `None` while unpaired.
    pub owner_id: Option<String>,

    /// Group membership.  A screen belongs to at most one group.
    pub group_id: Option<String>,

    /// Denormalised group name shown on the device.
    pub group_name: Option<String>,

    /// Fallback playlist used when no rule is active.
    pub default_playlist_id: Option<String>,
}

impl Screen {
    /// Ungrouped screens always use their default playlist; schedules are
    /// never consulted for them.
    pub fn uses_schedules(&self) -> bool {
        self.group_id.is_some()
    }
}

// ── Schedule rule ─────────────────────────────────────────────────────────────

/// A time-windowed binding of a playlist to a screen or a screen group.
///
/// The window is start-inclusive, end-exclusive and same-day only: a rule
/// with `end <= start` is never active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleRule {
    pub id: String,
    pub name: Option<String>,
    pub owner_id: Option<String>,

    /// Target screen.  Usually exclusive with `group_id`.
    pub screen_id: Option<String>,

    /// Target group.
    pub group_id: Option<String>,

    pub playlist_id: String,
    pub days: DaySet,
    pub start: TimeOfDay,
    pub end: TimeOfDay,

    /// Higher wins.  Absent in the store means `0`.
    pub priority: i64,
}

impl ScheduleRule {
    /// Returns `true` if this rule targets `screen` directly or through its
    /// group.
    pub fn targets(&self, screen: &Screen) -> bool {
        if self.screen_id.as_deref() == Some(screen.id.as_str()) {
            return true;
        }
        match (&self.group_id, &screen.group_id) {
            (Some(rule_group), Some(screen_group)) => rule_group == screen_group,
            _ => false,
        }
    }
}

// ── Playlist ──────────────────────────────────────────────────────────────────

/// Kind of media an item references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    #[default]
    Image,
    Video,
}

impl MediaType {
    /// Parse the store's `mediaType` attribute.  Anything that is not
    /// `"video"` is shown as an image.
    pub fn from_store_str(s: &str) -> Self {
        if s.eq_ignore_ascii_case("video") {
            MediaType::Video
        } else {
            MediaType::Image
        }
    }
}

/// One entry of a playlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItem {
    pub id: String,
    pub media_id: String,
    pub media_url: String,
    pub media_type: MediaType,

    /// Display time in seconds, always positive.
    pub duration: u32,

    pub sort_order: i64,
}

impl PlaylistItem {
    /// How long the device should show this item before advancing.
    ///
    /// Videos return `None`: they play for their intrinsic length.
    pub fn timed_duration_secs(&self) -> Option<u32> {
        match self.media_type {
            MediaType::Image => Some(self.duration),
            MediaType::Video => None,
        }
    }
}

/// An ordered list of media items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub items: Vec<PlaylistItem>,
}

// ── Assignment ────────────────────────────────────────────────────────────────

/// Where an assignment's playlist id came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignmentSource {
    /// A schedule rule won resolution.
    Schedule { rule_id: String },
    /// No rule was active (or the screen is ungrouped); the default was used.
    Default,
    /// Neither a rule nor a default playlist applies.
    Unassigned,
}

/// The resolved content for one screen at one instant.
///
/// Serialises as `{ "activePlaylistId": ..., "playlist": {...} | null }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    /// Effective playlist id: the winning rule's, else the screen default.
    pub active_playlist_id: Option<String>,

    /// Playlist contents, or `None` when nothing is assigned or the playlist
    /// could not be loaded.  Callers treat `None` as "no content".
    pub playlist: Option<Playlist>,

    #[serde(skip)]
    pub source: AssignmentSource,
}

impl Assignment {
    /// The empty state: no playlist at all.
    pub fn unassigned() -> Self {
        Self {
            active_playlist_id: None,
            playlist: None,
            source: AssignmentSource::Unassigned,
        }
    }

    /// Returns `true` if the device has something to play.
    pub fn has_content(&self) -> bool {
        self.playlist
            .as_ref()
            .map(|p| !p.items.is_empty())
            .unwrap_or(false)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
