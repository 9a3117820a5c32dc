/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Screen playback assignment: resolver output + fallback + playlist contents.
//!
//! [`get_assignment`] never fails.  Whatever goes wrong while loading the
//! playlist (store error, missing playlist) degrades to an assignment with
//! `playlist: None`, which the device treats as "no content assigned".

use async_trait::async_trait;
use chrono::NaiveDateTime;
use tracing::{debug, info, warn};

use super::resolver::resolve_active_rule;
use crate::model::{Assignment, AssignmentSource, Playlist, PlaylistItem, ScheduleRule, Screen};
use crate::store::StoreError;

/// Read access to playlists and their items.
#[async_trait]
pub trait PlaylistLookup: Send + Sync {
    /// The playlist header (`items` may be empty; it is replaced).
    async fn find_playlist(&self, playlist_id: &str) -> Result<Option<Playlist>, StoreError>;

    /// Items belonging to `playlist_id`, in storage order.
    async fn find_items(&self, playlist_id: &str) -> Result<Vec<PlaylistItem>, StoreError>;
}

/// Chooses the effective playlist id and where it came from.
///
/// Ungrouped screens skip rule evaluation entirely and always use their
/// default playlist.
pub fn select_playlist_id(
    screen: &Screen,
    rules: &[ScheduleRule],
    now: &NaiveDateTime,
) -> (Option<String>, AssignmentSource) {
    let fallback = || match &screen.default_playlist_id {
        Some(id) => (Some(id.clone()), AssignmentSource::Default),
        None => (None, AssignmentSource::Unassigned),
    };

    if !screen.uses_schedules() {
        debug!(screen_id = %screen.id, "ungrouped screen, schedules not consulted");
        return fallback();
    }

    match resolve_active_rule(screen, rules, now) {
        Some(rule) => (
            Some(rule.playlist_id.clone()),
            AssignmentSource::Schedule {
                rule_id: rule.id.clone(),
            },
        ),
        None => fallback(),
    }
}

/// Items ordered by `sort_order` ascending; equal sort orders keep their
/// storage order.
pub fn order_items(mut items: Vec<PlaylistItem>) -> Vec<PlaylistItem> {
    // `sort_by_key` is stable.
    items.sort_by_key(|item| item.sort_order);
    items
}

/// Loads `playlist_id` with ordered items, or `None` on any failure.
async fn load_playlist<L: PlaylistLookup + ?Sized>(lookup: &L, playlist_id: &str) -> Option<Playlist> {
    let header = match lookup.find_playlist(playlist_id).await {
        Ok(Some(p)) => p,
        Ok(None) => {
            warn!(playlist_id, "assigned playlist not found, serving no playlist");
            return None;
        }
        Err(e) => {
            warn!(playlist_id, error = %e, "playlist lookup failed, serving no playlist");
            return None;
        }
    };

    let items = match lookup.find_items(playlist_id).await {
        Ok(items) => items,
        Err(e) => {
            warn!(playlist_id, error = %e, "playlist item lookup failed, serving no playlist");
            return None;
        }
    };

    Some(Playlist {
        items: order_items(items),
        ..header
    })
}

/// Resolves the content `screen` should display at `now`.
///
/// * effective id = winning rule's playlist, else `screen.default_playlist_id`;
/// * the playlist and its ordered items are fetched through `lookup`;
/// * lookup failures yield `playlist: None`, never an error.
pub async fn get_assignment<L: PlaylistLookup + ?Sized>(
    screen: &Screen,
    rules: &[ScheduleRule],
    lookup: &L,
    now: NaiveDateTime,
) -> Assignment {
    let (active_playlist_id, source) = select_playlist_id(screen, rules, &now);

    let playlist = match &active_playlist_id {
        Some(id) => load_playlist(lookup, id).await,
        None => None,
    };

    info!(
        screen_id   = %screen.id,
        playlist_id = ?active_playlist_id,
        source      = ?source,
        items       = playlist.as_ref().map(|p| p.items.len()).unwrap_or(0),
        "assignment resolved"
    );

    Assignment {
        active_playlist_id,
        playlist,
        source,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
