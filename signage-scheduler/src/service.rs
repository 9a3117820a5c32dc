/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Playback service: turns one device poll into one [`Assignment`].
//!
//! The service is explicitly constructed with its collaborators (store,
//! clock, config) and holds no per-request state, so one instance behind an
//! `Arc` serves every screen concurrently.  Each poll re-reads the screen and
//! its rules; nothing is cached between polls.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::clock::Clock;
use crate::config::SignageConfig;
use crate::model::{Assignment, Playlist, PlaylistItem, ScheduleRule, Screen};
use crate::schedule::{get_assignment, PlaylistLookup, ResolutionError};
use crate::store::decode::{decode_item, decode_playlist, decode_rules, decode_screen};
use crate::store::{Collection, Filter, RecordStore, StoreError};

// ── StoreLookup ───────────────────────────────────────────────────────────────

/// [`PlaylistLookup`] reading straight from a [`RecordStore`].
pub struct StoreLookup {
    store: Arc<dyn RecordStore>,
    default_item_duration_secs: u32,
}

impl StoreLookup {
    pub fn new(store: Arc<dyn RecordStore>, default_item_duration_secs: u32) -> Self {
        Self {
            store,
            default_item_duration_secs,
        }
    }
}

#[async_trait]
impl PlaylistLookup for StoreLookup {
    async fn find_playlist(&self, playlist_id: &str) -> Result<Option<Playlist>, StoreError> {
        let Some(record) = self.store.get(Collection::Playlists, playlist_id).await? else {
            return Ok(None);
        };
        match decode_playlist(&record) {
            Ok(playlist) => Ok(Some(playlist)),
            Err(e) => {
                warn!(playlist_id, error = %e, "invalid playlist record");
                Ok(None)
            }
        }
    }

    async fn find_items(&self, playlist_id: &str) -> Result<Vec<PlaylistItem>, StoreError> {
        let records = self
            .store
            .query(
                Collection::PlaylistItems,
                &Filter::eq("playlistId", playlist_id),
            )
            .await?;
        Ok(records
            .iter()
            .filter_map(|r| match decode_item(r, self.default_item_duration_secs) {
                Ok(item) => Some(item),
                Err(e) => {
                    warn!(playlist_id, error = %e, "skipping invalid playlist item");
                    None
                }
            })
            .collect())
    }
}

// ── PlaybackService ───────────────────────────────────────────────────────────

/// Resolves the current assignment of a screen on each poll.
pub struct PlaybackService {
    store: Arc<dyn RecordStore>,
    clock: Arc<dyn Clock>,
    lookup: StoreLookup,
}

impl PlaybackService {
    pub fn new(store: Arc<dyn RecordStore>, clock: Arc<dyn Clock>, config: &SignageConfig) -> Self {
        let lookup = StoreLookup::new(Arc::clone(&store), config.default_item_duration_secs);
        Self {
            store,
            clock,
            lookup,
        }
    }

    /// Loads and decodes the screen record for `screen_id`.
    pub async fn load_screen(&self, screen_id: &str) -> Result<Screen, ResolutionError> {
        let record = self
            .store
            .get(Collection::Screens, screen_id)
            .await?
            .ok_or_else(|| ResolutionError::ScreenNotFound {
                screen_id: screen_id.to_string(),
            })?;

        decode_screen(&record).map_err(|e| {
            warn!(screen_id, error = %e, "invalid screen record");
            ResolutionError::ScreenNotFound {
                screen_id: screen_id.to_string(),
            }
        })
    }

    /// Candidate rules for `screen`: those aimed at its id or at its group.
    ///
    /// Ungrouped screens never reach this; see [`Self::poll`].
    pub async fn load_rules(&self, screen: &Screen) -> Result<Vec<ScheduleRule>, StoreError> {
        let mut targets = vec![Filter::eq("screenId", screen.id.as_str())];
        if let Some(group) = &screen.group_id {
            targets.push(Filter::eq("groupId", group.as_str()));
        }

        let records = self
            .store
            .query(Collection::Schedules, &Filter::Or(targets))
            .await?;
        let rules = decode_rules(&records);
        debug!(
            screen_id = %screen.id,
            fetched = records.len(),
            valid = rules.len(),
            "schedule rules loaded"
        );
        Ok(rules)
    }

    /// Resolve what `screen_id` should display now.
    ///
    /// # Errors
    /// * [`ResolutionError::Unavailable`] – the screen or rule read failed.
    /// * [`ResolutionError::ScreenNotFound`] – unknown or invalid screen.
    ///
    /// Playlist read failures are not errors; they yield `playlist: None`.
    pub async fn poll(&self, screen_id: &str) -> Result<Assignment, ResolutionError> {
        let screen = self.load_screen(screen_id).await?;

        // Ungrouped screens always use their default playlist: skip the rule
        // read entirely.
        let rules = if screen.uses_schedules() {
            self.load_rules(&screen).await?
        } else {
            Vec::new()
        };

        let now = self.clock.now();
        let assignment = get_assignment(&screen, &rules, &self.lookup, now).await;

        info!(
            screen_id,
            at = %now,
            playlist_id = ?assignment.active_playlist_id,
            has_content = assignment.has_content(),
            "poll served"
        );
        Ok(assignment)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
