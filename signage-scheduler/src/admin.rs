/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Administrative writes: schedules, screens, groups and playlists.
//!
//! These operations keep the stored records in the shape the playback path
//! expects:
//!
//! | Record | Invariant maintained here |
//! |---|---|
//! | schedule | targets a screen or a group, parseable times, `days` stored as a JSON string |
//! | screen | `groupName` mirrors the name of the group in `groupId` |
//! | group | deleting it ungroups its member screens first |
//! | playlist item | `sortOrder` appended after existing items, media url/type copied from the media record |
//!
//! The owner id is request-scoped and passed per call.

use std::sync::Arc;

use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::SignageConfig;
use crate::model::{DaySet, PlaylistItem, ScheduleRule, TimeOfDay};
use crate::schedule::RecordError;
use crate::store::decode::{decode_item, decode_rule, decode_rules};
use crate::store::{Collection, Filter, Record, RecordStore, StoreError};

// ── Errors ────────────────────────────────────────────────────────────────────

/// Failure of an administrative operation.
#[derive(Debug, Error)]
pub enum AdminError {
    #[error("{collection} record '{id}' not found")]
    NotFound { collection: Collection, id: String },

    #[error(transparent)]
    InvalidRule(#[from] RecordError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type AdminResult<T> = Result<T, AdminError>;

// ── Input types ───────────────────────────────────────────────────────────────

/// Fields of a schedule rule as submitted by an administrator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewRule {
    pub name: Option<String>,
    pub playlist_id: String,
    pub screen_id: Option<String>,
    pub group_id: Option<String>,
    /// Weekdays, `0` = Sunday .. `6` = Saturday.
    pub days: Vec<u8>,
    pub start_time: String,
    pub end_time: String,
    /// Absent means `0`.
    pub priority: Option<i64>,
}

fn record<const N: usize>(fields: [(&str, Value); N]) -> Record {
    fields
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn opt_json(value: &Option<String>) -> Value {
    value.as_deref().map_or(Value::Null, Value::from)
}

impl NewRule {
    /// Builds the stored attribute bag, rejecting rules the playback path
    /// would have to skip.
    fn to_record(&self, id: &str) -> Result<Record, RecordError> {
        if self.playlist_id.is_empty() {
            return Err(RecordError::MissingField {
                collection: "schedules",
                field: "playlistId",
            });
        }
        if self.screen_id.is_none() && self.group_id.is_none() {
            return Err(RecordError::NoTarget {
                rule: id.to_string(),
            });
        }
        for (field, raw) in [("startTime", &self.start_time), ("endTime", &self.end_time)] {
            if TimeOfDay::parse(raw).is_none() {
                return Err(RecordError::MalformedTime {
                    rule: id.to_string(),
                    field,
                    raw: raw.clone(),
                });
            }
        }

        let malformed_days = || RecordError::MalformedDays {
            rule: id.to_string(),
            raw: format!("{:?}", self.days),
        };
        let days = DaySet::from_days(self.days.iter().copied().map(u32::from))
            .ok_or_else(malformed_days)?;
        let days = serde_json::to_string(&days.days()).map_err(|_| malformed_days())?;

        Ok(record([
            ("id", json!(id)),
            ("name", opt_json(&self.name)),
            ("playlistId", json!(self.playlist_id)),
            ("screenId", opt_json(&self.screen_id)),
            ("groupId", opt_json(&self.group_id)),
            ("days", json!(days)),
            ("startTime", json!(self.start_time)),
            ("endTime", json!(self.end_time)),
            ("priority", json!(self.priority.unwrap_or(0))),
        ]))
    }
}

// ── Admin ─────────────────────────────────────────────────────────────────────

/// Administrative operations over a shared record store.
pub struct Admin {
    store: Arc<dyn RecordStore>,
    default_item_duration_secs: u32,
}

impl Admin {
    pub fn new(store: Arc<dyn RecordStore>, config: &SignageConfig) -> Self {
        Self {
            store,
            default_item_duration_secs: config.default_item_duration_secs,
        }
    }

    async fn require(&self, collection: Collection, id: &str) -> AdminResult<Record> {
        self.store
            .get(collection, id)
            .await?
            .ok_or_else(|| AdminError::NotFound {
                collection,
                id: id.to_string(),
            })
    }

    async fn remove(&self, collection: Collection, id: &str) -> AdminResult<()> {
        match self.store.delete(collection, &Filter::id(id)).await? {
            0 => Err(AdminError::NotFound {
                collection,
                id: id.to_string(),
            }),
            _ => Ok(()),
        }
    }

    // ── Schedules ─────────────────────────────────────────────────────────────

    pub async fn create_rule(&self, owner_id: &str, rule: NewRule) -> AdminResult<ScheduleRule> {
        let id = new_id();
        let mut attrs = rule.to_record(&id)?;
        attrs.insert("userId".into(), json!(owner_id));

        let decoded = decode_rule(&attrs)?;
        self.store.put(Collection::Schedules, &id, attrs).await?;
        info!(rule_id = %id, owner_id, playlist_id = %decoded.playlist_id, "schedule rule created");
        Ok(decoded)
    }

    /// Replaces every editable field of rule `id`.  The owner is kept.
    pub async fn update_rule(&self, id: &str, rule: NewRule) -> AdminResult<ScheduleRule> {
        let mut stored = self.require(Collection::Schedules, id).await?;
        let attrs = rule.to_record(id)?;
        stored.extend(attrs.clone());

        let decoded = decode_rule(&stored)?;
        self.store.put(Collection::Schedules, id, attrs).await?;
        info!(rule_id = id, "schedule rule updated");
        Ok(decoded)
    }

    pub async fn delete_rule(&self, id: &str) -> AdminResult<()> {
        self.remove(Collection::Schedules, id).await?;
        info!(rule_id = id, "schedule rule deleted");
        Ok(())
    }

    pub async fn list_rules(&self, owner_id: &str) -> AdminResult<Vec<ScheduleRule>> {
        let records = self
            .store
            .query(Collection::Schedules, &Filter::eq("userId", owner_id))
            .await?;
        Ok(decode_rules(&records))
    }

    // ── Screens ───────────────────────────────────────────────────────────────

    pub async fn set_default_playlist(
        &self,
        screen_id: &str,
        playlist_id: Option<&str>,
    ) -> AdminResult<()> {
        self.require(Collection::Screens, screen_id).await?;
        if let Some(playlist_id) = playlist_id {
            self.require(Collection::Playlists, playlist_id).await?;
        }
        self.store
            .put(
                Collection::Screens,
                screen_id,
                record([("defaultPlaylistId", playlist_id.map_or(Value::Null, Value::from))]),
            )
            .await?;
        info!(screen_id, playlist_id, "default playlist set");
        Ok(())
    }

    /// Moves `screen_id` into `group_id`, or out of any group with `None`.
    pub async fn set_screen_group(&self, screen_id: &str, group_id: Option<&str>) -> AdminResult<()> {
        self.require(Collection::Screens, screen_id).await?;

        let attrs = match group_id {
            Some(group_id) => {
                let group = self.require(Collection::Groups, group_id).await?;
                record([
                    ("groupId", json!(group_id)),
                    ("groupName", group.get("name").cloned().unwrap_or(Value::Null)),
                ])
            }
            None => record([("groupId", Value::Null), ("groupName", Value::Null)]),
        };

        self.store.put(Collection::Screens, screen_id, attrs).await?;
        info!(screen_id, group_id, "screen group set");
        Ok(())
    }

    /// Deletes a screen record.  Rules aimed at its id stay stored and no
    /// longer match anything.
    pub async fn delete_screen(&self, screen_id: &str) -> AdminResult<()> {
        self.remove(Collection::Screens, screen_id).await?;
        info!(screen_id, "screen deleted");
        Ok(())
    }

    // ── Groups ────────────────────────────────────────────────────────────────

    pub async fn create_group(
        &self,
        owner_id: &str,
        name: &str,
        description: Option<&str>,
    ) -> AdminResult<String> {
        let id = new_id();
        self.store
            .put(
                Collection::Groups,
                &id,
                record([
                    ("name", json!(name)),
                    ("description", description.map_or(Value::Null, Value::from)),
                    ("userId", json!(owner_id)),
                ]),
            )
            .await?;
        info!(group_id = %id, owner_id, name, "group created");
        Ok(id)
    }

    async fn member_screens(&self, group_id: &str) -> AdminResult<Vec<String>> {
        let screens = self
            .store
            .query(Collection::Screens, &Filter::eq("groupId", group_id))
            .await?;
        Ok(screens
            .iter()
            .filter_map(|s| s.get("id").and_then(Value::as_str).map(str::to_string))
            .collect())
    }

    /// Renames a group and every member screen's `groupName`.
    ///
    /// A `description` of `None` leaves the stored one untouched.
    pub async fn rename_group(
        &self,
        id: &str,
        name: &str,
        description: Option<&str>,
    ) -> AdminResult<()> {
        self.require(Collection::Groups, id).await?;
        let mut attrs = record([("name", json!(name))]);
        if let Some(description) = description {
            attrs.insert("description".into(), json!(description));
        }
        self.store.put(Collection::Groups, id, attrs).await?;

        let members = self.member_screens(id).await?;
        for screen_id in &members {
            self.store
                .put(
                    Collection::Screens,
                    screen_id,
                    record([("groupName", json!(name))]),
                )
                .await?;
        }
        info!(group_id = id, name, members = members.len(), "group renamed");
        Ok(())
    }

    /// Deletes a group after ungrouping its member screens.
    ///
    /// Schedule rules aimed at the group are left in place; with no member
    /// screens they never apply.
    pub async fn delete_group(&self, id: &str) -> AdminResult<()> {
        self.require(Collection::Groups, id).await?;

        let members = self.member_screens(id).await?;
        for screen_id in &members {
            debug!(screen_id = %screen_id, group_id = id, "ungrouping screen");
            self.store
                .put(
                    Collection::Screens,
                    screen_id,
                    record([("groupId", Value::Null), ("groupName", Value::Null)]),
                )
                .await?;
        }

        self.remove(Collection::Groups, id).await?;
        info!(group_id = id, ungrouped = members.len(), "group deleted");
        Ok(())
    }

    // ── Playlists ─────────────────────────────────────────────────────────────

    pub async fn create_playlist(&self, owner_id: &str, name: &str) -> AdminResult<String> {
        let id = new_id();
        self.store
            .put(
                Collection::Playlists,
                &id,
                record([("name", json!(name)), ("userId", json!(owner_id))]),
            )
            .await?;
        info!(playlist_id = %id, owner_id, name, "playlist created");
        Ok(id)
    }

    /// Appends `media_id` to the end of `playlist_id`.
    ///
    /// `duration` of `None` or `0` uses the configured default.
    pub async fn add_item(
        &self,
        playlist_id: &str,
        media_id: &str,
        duration: Option<u32>,
    ) -> AdminResult<PlaylistItem> {
        self.require(Collection::Playlists, playlist_id).await?;
        let media = self.require(Collection::Media, media_id).await?;

        let existing = self
            .store
            .query(
                Collection::PlaylistItems,
                &Filter::eq("playlistId", playlist_id),
            )
            .await?
            .len();

        let id = new_id();
        let duration = duration
            .filter(|d| *d > 0)
            .unwrap_or(self.default_item_duration_secs);
        let attrs = record([
            ("id", json!(id)),
            ("playlistId", json!(playlist_id)),
            ("mediaId", json!(media_id)),
            ("mediaUrl", media.get("url").cloned().unwrap_or(Value::Null)),
            ("mediaType", media.get("type").cloned().unwrap_or(Value::Null)),
            ("duration", json!(duration)),
            ("sortOrder", json!(existing + 1)),
        ]);

        let item = decode_item(&attrs, self.default_item_duration_secs)?;
        self.store.put(Collection::PlaylistItems, &id, attrs).await?;
        info!(playlist_id, item_id = %id, media_id, sort_order = item.sort_order, "playlist item added");
        Ok(item)
    }

    /// Removes one item from `playlist_id`.
    ///
    /// Remaining items keep their `sortOrder`, so a later [`Self::add_item`]
    /// may repeat an existing value; playback keeps such ties in store order.
    pub async fn remove_item(&self, playlist_id: &str, item_id: &str) -> AdminResult<()> {
        let filter = Filter::And(vec![Filter::id(item_id), Filter::eq("playlistId", playlist_id)]);
        match self.store.delete(Collection::PlaylistItems, &filter).await? {
            0 => Err(AdminError::NotFound {
                collection: Collection::PlaylistItems,
                id: item_id.to_string(),
            }),
            _ => {
                info!(playlist_id, item_id, "playlist item removed");
                Ok(())
            }
        }
    }

    /// Deletes a playlist and its items, items first.
    pub async fn delete_playlist(&self, id: &str) -> AdminResult<()> {
        self.require(Collection::Playlists, id).await?;
        let items = self
            .store
            .delete(Collection::PlaylistItems, &Filter::eq("playlistId", id))
            .await?;
        self.remove(Collection::Playlists, id).await?;
        info!(playlist_id = id, items, "playlist deleted");
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::assignment::order_items;
    use crate::schedule::PlaylistLookup;
    use crate::service::StoreLookup;
    use crate::store::MemoryStore;

    fn admin() -> (Admin, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (Admin::new(store.clone(), &SignageConfig::default()), store)
    }

    fn weekday_rule(playlist: &str, group: &str) -> NewRule {
        NewRule {
            name: Some("Office hours".into()),
            playlist_id: playlist.into(),
            group_id: Some(group.into()),
            days: vec![5, 1, 2, 3, 4],
            start_time: "09:00".into(),
            end_time: "17:00".into(),
            ..Default::default()
        }
    }

    async fn seed_screen(store: &MemoryStore, id: &str) {
        store
            .put(Collection::Screens, id, record([("userId", json!("u1"))]))
            .await
            .unwrap();
    }

    // ── Schedules ─────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn create_rule_stores_days_as_json_string() {
        let (admin, store) = admin();
        let rule = admin
            .create_rule("u1", weekday_rule("P1", "G1"))
            .await
            .unwrap();

        assert_eq!(rule.priority, 0);
        assert_eq!(rule.owner_id.as_deref(), Some("u1"));
        assert_eq!(rule.days.days(), vec![1, 2, 3, 4, 5]);

        let stored = store
            .get(Collection::Schedules, &rule.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored["days"], json!("[1,2,3,4,5]"));
        assert_eq!(stored["userId"], json!("u1"));
    }

    #[tokio::test]
    async fn create_rule_generates_unique_ids() {
        let (admin, _) = admin();
        let a = admin.create_rule("u1", weekday_rule("P1", "G1")).await.unwrap();
        let b = admin.create_rule("u1", weekday_rule("P1", "G1")).await.unwrap();
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn rule_without_target_is_rejected() {
        let (admin, store) = admin();
        let mut rule = weekday_rule("P1", "G1");
        rule.group_id = None;
        let err = admin.create_rule("u1", rule).await.unwrap_err();
        assert!(matches!(
            err,
            AdminError::InvalidRule(RecordError::NoTarget { .. })
        ));
        assert_eq!(store.len(Collection::Schedules).await, 0);
    }

    #[tokio::test]
    async fn rule_with_bad_time_is_rejected() {
        let (admin, _) = admin();
        let mut rule = weekday_rule("P1", "G1");
        rule.end_time = "25:00".into();
        assert!(matches!(
            admin.create_rule("u1", rule).await,
            Err(AdminError::InvalidRule(RecordError::MalformedTime { field: "endTime", .. }))
        ));
    }

    #[tokio::test]
    async fn rule_with_bad_day_is_rejected() {
        let (admin, _) = admin();
        let mut rule = weekday_rule("P1", "G1");
        rule.days = vec![1, 7];
        assert!(matches!(
            admin.create_rule("u1", rule).await,
            Err(AdminError::InvalidRule(RecordError::MalformedDays { .. }))
        ));
    }

    #[tokio::test]
    async fn update_rule_keeps_owner_and_replaces_fields() {
        let (admin, _) = admin();
        let created = admin.create_rule("u1", weekday_rule("P1", "G1")).await.unwrap();

        let mut changed = weekday_rule("P2", "G1");
        changed.priority = Some(7);
        changed.days = vec![0];
        let updated = admin.update_rule(&created.id, changed).await.unwrap();

        assert_eq!(updated.owner_id.as_deref(), Some("u1"));
        assert_eq!(updated.playlist_id, "P2");
        assert_eq!(updated.priority, 7);
        assert_eq!(updated.days.days(), vec![0]);
    }

    #[tokio::test]
    async fn update_unknown_rule_is_not_found() {
        let (admin, _) = admin();
        assert!(matches!(
            admin.update_rule("nope", weekday_rule("P1", "G1")).await,
            Err(AdminError::NotFound { collection: Collection::Schedules, .. })
        ));
    }

    #[tokio::test]
    async fn list_and_delete_rules_by_owner() {
        let (admin, _) = admin();
        let mine = admin.create_rule("u1", weekday_rule("P1", "G1")).await.unwrap();
        admin.create_rule("u2", weekday_rule("P1", "G1")).await.unwrap();

        let listed = admin.list_rules("u1").await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, mine.id);

        admin.delete_rule(&mine.id).await.unwrap();
        assert!(admin.list_rules("u1").await.unwrap().is_empty());
        assert!(matches!(
            admin.delete_rule(&mine.id).await,
            Err(AdminError::NotFound { .. })
        ));
    }

    // ── Screens and groups ────────────────────────────────────────────────────

    #[tokio::test]
    async fn screen_group_membership_keeps_group_name() {
        let (admin, store) = admin();
        seed_screen(&store, "S1").await;
        let group = admin.create_group("u1", "Lobby", None).await.unwrap();

        admin.set_screen_group("S1", Some(&group)).await.unwrap();
        let screen = store.get(Collection::Screens, "S1").await.unwrap().unwrap();
        assert_eq!(screen["groupId"], json!(group));
        assert_eq!(screen["groupName"], json!("Lobby"));
        assert_eq!(screen["userId"], json!("u1"), "other attributes survive");

        admin.set_screen_group("S1", None).await.unwrap();
        let screen = store.get(Collection::Screens, "S1").await.unwrap().unwrap();
        assert_eq!(screen["groupId"], Value::Null);
        assert_eq!(screen["groupName"], Value::Null);
    }

    #[tokio::test]
    async fn joining_unknown_group_is_not_found() {
        let (admin, store) = admin();
        seed_screen(&store, "S1").await;
        assert!(matches!(
            admin.set_screen_group("S1", Some("G-missing")).await,
            Err(AdminError::NotFound { collection: Collection::Groups, .. })
        ));
    }

    #[tokio::test]
    async fn rename_group_propagates_to_members() {
        let (admin, store) = admin();
        seed_screen(&store, "S1").await;
        seed_screen(&store, "S2").await;
        let group = admin.create_group("u1", "Lobby", None).await.unwrap();
        admin.set_screen_group("S1", Some(&group)).await.unwrap();

        admin.rename_group(&group, "Foyer", None).await.unwrap();

        let s1 = store.get(Collection::Screens, "S1").await.unwrap().unwrap();
        let s2 = store.get(Collection::Screens, "S2").await.unwrap().unwrap();
        assert_eq!(s1["groupName"], json!("Foyer"));
        assert!(s2.get("groupName").is_none());
    }

    #[tokio::test]
    async fn group_description_stored_and_updated() {
        let (admin, store) = admin();
        let group = admin
            .create_group("u1", "Lobby", Some("Ground floor"))
            .await
            .unwrap();
        let stored = store.get(Collection::Groups, &group).await.unwrap().unwrap();
        assert_eq!(stored["description"], json!("Ground floor"));

        admin.rename_group(&group, "Foyer", None).await.unwrap();
        let stored = store.get(Collection::Groups, &group).await.unwrap().unwrap();
        assert_eq!(stored["description"], json!("Ground floor"));

        admin
            .rename_group(&group, "Foyer", Some("Main entrance"))
            .await
            .unwrap();
        let stored = store.get(Collection::Groups, &group).await.unwrap().unwrap();
        assert_eq!(stored["name"], json!("Foyer"));
        assert_eq!(stored["description"], json!("Main entrance"));
    }

    #[tokio::test]
    async fn delete_screen_removes_only_that_screen() {
        let (admin, store) = admin();
        seed_screen(&store, "S1").await;
        seed_screen(&store, "S2").await;

        admin.delete_screen("S1").await.unwrap();

        assert!(store.get(Collection::Screens, "S1").await.unwrap().is_none());
        assert!(store.get(Collection::Screens, "S2").await.unwrap().is_some());
        assert!(matches!(
            admin.delete_screen("S1").await,
            Err(AdminError::NotFound { collection: Collection::Screens, .. })
        ));
    }

    #[tokio::test]
    async fn delete_group_ungroups_members() {
        let (admin, store) = admin();
        seed_screen(&store, "S1").await;
        let group = admin.create_group("u1", "Lobby", None).await.unwrap();
        admin.set_screen_group("S1", Some(&group)).await.unwrap();

        admin.delete_group(&group).await.unwrap();

        let s1 = store.get(Collection::Screens, "S1").await.unwrap().unwrap();
        assert_eq!(s1["groupId"], Value::Null);
        assert_eq!(store.len(Collection::Groups).await, 0);
    }

    #[tokio::test]
    async fn default_playlist_must_exist() {
        let (admin, store) = admin();
        seed_screen(&store, "S1").await;
        assert!(matches!(
            admin.set_default_playlist("S1", Some("P-missing")).await,
            Err(AdminError::NotFound { collection: Collection::Playlists, .. })
        ));

        let playlist = admin.create_playlist("u1", "Default").await.unwrap();
        admin.set_default_playlist("S1", Some(&playlist)).await.unwrap();
        let s1 = store.get(Collection::Screens, "S1").await.unwrap().unwrap();
        assert_eq!(s1["defaultPlaylistId"], json!(playlist));
    }

    // ── Playlists ─────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn add_item_copies_media_and_appends() {
        let (admin, store) = admin();
        store
            .put(
                Collection::Media,
                "m1",
                record([("url", json!("https://cdn/a.mp4")), ("type", json!("video"))]),
            )
            .await
            .unwrap();
        store
            .put(Collection::Media, "m2", record([("url", json!("https://cdn/b.png"))]))
            .await
            .unwrap();
        let playlist = admin.create_playlist("u1", "Lobby loop").await.unwrap();

        let first = admin.add_item(&playlist, "m1", Some(30)).await.unwrap();
        let second = admin.add_item(&playlist, "m2", None).await.unwrap();

        assert_eq!(first.sort_order, 1);
        assert_eq!(first.media_url, "https://cdn/a.mp4");
        assert_eq!(first.media_type, crate::model::MediaType::Video);
        assert_eq!(first.duration, 30);

        assert_eq!(second.sort_order, 2);
        assert_eq!(second.media_type, crate::model::MediaType::Image);
        assert_eq!(second.duration, 10);
    }

    #[tokio::test]
    async fn add_unknown_media_is_not_found() {
        let (admin, _) = admin();
        let playlist = admin.create_playlist("u1", "Loop").await.unwrap();
        assert!(matches!(
            admin.add_item(&playlist, "m-missing", None).await,
            Err(AdminError::NotFound { collection: Collection::Media, .. })
        ));
    }

    #[tokio::test]
    async fn remove_then_append_repeats_sort_order_in_store_order() {
        let (admin, store) = admin();
        store
            .put(Collection::Media, "m1", record([("url", json!("u"))]))
            .await
            .unwrap();
        let playlist = admin.create_playlist("u1", "Loop").await.unwrap();
        let first = admin.add_item(&playlist, "m1", None).await.unwrap();
        let second = admin.add_item(&playlist, "m1", None).await.unwrap();
        let third = admin.add_item(&playlist, "m1", None).await.unwrap();

        admin.remove_item(&playlist, &first.id).await.unwrap();
        let fourth = admin.add_item(&playlist, "m1", None).await.unwrap();

        // Two items left, so the new one gets 3 like `third`.
        assert_eq!(third.sort_order, 3);
        assert_eq!(fourth.sort_order, 3);

        let lookup = StoreLookup::new(store.clone(), 10);
        let items = order_items(lookup.find_items(&playlist).await.unwrap());
        let ids: Vec<_> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec![second.id.as_str(), third.id.as_str(), fourth.id.as_str()]);
    }

    #[tokio::test]
    async fn remove_item_checks_playlist() {
        let (admin, store) = admin();
        store
            .put(Collection::Media, "m1", record([("url", json!("u"))]))
            .await
            .unwrap();
        let a = admin.create_playlist("u1", "A").await.unwrap();
        let b = admin.create_playlist("u1", "B").await.unwrap();
        let item = admin.add_item(&a, "m1", None).await.unwrap();

        assert!(matches!(
            admin.remove_item(&b, &item.id).await,
            Err(AdminError::NotFound { collection: Collection::PlaylistItems, .. })
        ));
        assert_eq!(store.len(Collection::PlaylistItems).await, 1);

        admin.remove_item(&a, &item.id).await.unwrap();
        assert_eq!(store.len(Collection::PlaylistItems).await, 0);
    }

    #[tokio::test]
    async fn delete_playlist_removes_items() {
        let (admin, store) = admin();
        store
            .put(Collection::Media, "m1", record([("url", json!("u"))]))
            .await
            .unwrap();
        let keep = admin.create_playlist("u1", "Keep").await.unwrap();
        let drop = admin.create_playlist("u1", "Drop").await.unwrap();
        admin.add_item(&keep, "m1", None).await.unwrap();
        admin.add_item(&drop, "m1", None).await.unwrap();
        admin.add_item(&drop, "m1", None).await.unwrap();

        admin.delete_playlist(&drop).await.unwrap();

        assert_eq!(store.len(Collection::Playlists).await, 1);
        assert_eq!(store.len(Collection::PlaylistItems).await, 1);
        assert!(matches!(
            admin.delete_playlist(&drop).await,
            Err(AdminError::NotFound { .. })
        ));
    }
}
