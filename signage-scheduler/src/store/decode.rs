/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Store-boundary validation: untyped [`Record`]s → typed [`crate::model`].
//!
//! This is the only place that looks inside attribute bags.  Attribute names
//! are the store's camelCase keys (`screenId`, `startTime`, `sortOrder`, ...).
//!
//! | Problem | Outcome |
//! |---|---|
//! | rule `days` unparseable | rule kept with an empty day set (never active), `warn!` |
//! | rule `days` entry outside `0..=6` or not an integer | entry ignored |
//! | rule `startTime`/`endTime` malformed | rule rejected, [`decode_rules`] skips it with `warn!` |
//! | rule with neither `screenId` nor `groupId` | rule rejected |
//! | rule `priority` absent / `null` | `0` |
//! | item `duration` absent or `<= 0` | configured default |

use serde_json::Value;
use tracing::{debug, warn};

use super::Record;
use crate::model::{DaySet, MediaType, Playlist, PlaylistItem, ScheduleRule, Screen, TimeOfDay};
use crate::schedule::RecordError;

// ── Attribute helpers ─────────────────────────────────────────────────────────

/// Non-empty string attribute.
fn opt_str(record: &Record, field: &str) -> Option<String> {
    match record.get(field) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

fn req_str(
    record: &Record,
    collection: &'static str,
    field: &'static str,
) -> Result<String, RecordError> {
    opt_str(record, field).ok_or(RecordError::MissingField { collection, field })
}

/// Integer attribute; whole-valued floats are accepted, fractions truncated.
fn opt_int(record: &Record, field: &str) -> Option<i64> {
    let value = record.get(field)?;
    value.as_i64().or_else(|| value.as_f64().map(|f| f as i64))
}

fn parse_time(rule: &str, record: &Record, field: &'static str) -> Result<TimeOfDay, RecordError> {
    let raw = record
        .get(field)
        .and_then(Value::as_str)
        .ok_or(RecordError::MissingField {
            collection: "schedules",
            field,
        })?;
    TimeOfDay::parse(raw).ok_or_else(|| RecordError::MalformedTime {
        rule: rule.to_string(),
        field,
        raw: raw.to_string(),
    })
}

// ── Days ──────────────────────────────────────────────────────────────────────

/// Decode a rule's `days` attribute.
///
/// Accepts the store's JSON-encoded string form (`"[1,2,3]"`) as well as a
/// native array.  An absent, `null` or empty-string value is an empty set.
pub fn decode_days(rule: &str, value: Option<&Value>) -> Result<DaySet, RecordError> {
    let malformed = |raw: String| RecordError::MalformedDays {
        rule: rule.to_string(),
        raw,
    };

    let parsed;
    let entries: &[Value] = match value {
        None | Some(Value::Null) => return Ok(DaySet::empty()),
        Some(Value::String(s)) if s.trim().is_empty() => return Ok(DaySet::empty()),
        Some(Value::String(s)) => {
            parsed = serde_json::from_str::<Value>(s).map_err(|_| malformed(s.clone()))?;
            match &parsed {
                Value::Array(a) => a.as_slice(),
                _ => return Err(malformed(s.clone())),
            }
        }
        Some(Value::Array(a)) => a.as_slice(),
        Some(other) => return Err(malformed(other.to_string())),
    };

    let days = entries.iter().filter_map(|v| {
        let day = v.as_u64().filter(|d| *d <= u64::from(DaySet::MAX_DAY));
        if day.is_none() {
            debug!(rule, entry = %v, "ignoring day entry outside 0..=6");
        }
        day.map(|d| d as u32)
    });

    // Entries were range-checked above, so this cannot fail.
    Ok(DaySet::from_days(days).unwrap_or_default())
}

// ── Records ───────────────────────────────────────────────────────────────────

pub fn decode_screen(record: &Record) -> Result<Screen, RecordError> {
    Ok(Screen {
        id: req_str(record, "screens", "id")?,
        name: opt_str(record, "name"),
        owner_id: opt_str(record, "userId"),
        group_id: opt_str(record, "groupId"),
        group_name: opt_str(record, "groupName"),
        default_playlist_id: opt_str(record, "defaultPlaylistId"),
    })
}

/// Decode one schedule record.
///
/// Unparseable `days` do not reject the rule: it is kept with an empty day
/// set so it can never become active.
pub fn decode_rule(record: &Record) -> Result<ScheduleRule, RecordError> {
    let id = req_str(record, "schedules", "id")?;
    let playlist_id = req_str(record, "schedules", "playlistId")?;
    let screen_id = opt_str(record, "screenId");
    let group_id = opt_str(record, "groupId");
    if screen_id.is_none() && group_id.is_none() {
        return Err(RecordError::NoTarget { rule: id });
    }

    let start = parse_time(&id, record, "startTime")?;
    let end = parse_time(&id, record, "endTime")?;

    let days = decode_days(&id, record.get("days")).unwrap_or_else(|e| {
        warn!(rule_id = %id, error = %e, "malformed days, rule will never be active");
        DaySet::empty()
    });

    if end <= start {
        debug!(rule_id = %id, %start, %end, "window does not roll over midnight, rule never active");
    }

    Ok(ScheduleRule {
        name: opt_str(record, "name"),
        owner_id: opt_str(record, "userId"),
        screen_id,
        group_id,
        playlist_id,
        days,
        start,
        end,
        priority: opt_int(record, "priority").unwrap_or(0),
        id,
    })
}

/// Decode every schedule record, skipping (and logging) the invalid ones.
///
/// A skipped rule behaves exactly like an inactive one: resolution simply
/// continues with the rest.
pub fn decode_rules(records: &[Record]) -> Vec<ScheduleRule> {
    records
        .iter()
        .filter_map(|record| match decode_rule(record) {
            Ok(rule) => Some(rule),
            Err(e) => {
                warn!(error = %e, "skipping invalid schedule rule");
                None
            }
        })
        .collect()
}

/// Decode a playlist header.  `items` is left empty.
pub fn decode_playlist(record: &Record) -> Result<Playlist, RecordError> {
    Ok(Playlist {
        id: req_str(record, "playlists", "id")?,
        name: opt_str(record, "name").unwrap_or_default(),
        items: Vec::new(),
    })
}

/// Decode one playlist item.  A missing or non-positive `duration` becomes
/// `default_duration_secs`.
pub fn decode_item(record: &Record, default_duration_secs: u32) -> Result<PlaylistItem, RecordError> {
    let duration = match opt_int(record, "duration") {
        Some(d) if d > 0 => u32::try_from(d).unwrap_or(u32::MAX),
        _ => default_duration_secs,
    };

    Ok(PlaylistItem {
        id: req_str(record, "playlistItems", "id")?,
        media_id: opt_str(record, "mediaId").unwrap_or_default(),
        media_url: opt_str(record, "mediaUrl").unwrap_or_default(),
        media_type: opt_str(record, "mediaType")
            .map(|t| MediaType::from_store_str(&t))
            .unwrap_or_default(),
        duration,
        sort_order: opt_int(record, "sortOrder").unwrap_or(0),
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    fn rule_record(days: Value) -> Record {
        record(json!({
            "id": "R1",
            "screenId": "S1",
            "playlistId": "P-work",
            "days": days,
            "startTime": "09:00",
            "endTime": "17:00",
            "priority": 2
        }))
    }

    // ── Days ──────────────────────────────────────────────────────────────────

    #[test]
    fn days_decoded_from_json_string() {
        let rule = decode_rule(&rule_record(json!("[1,2,3,4,5]"))).unwrap();
        assert_eq!(rule.days.days(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn days_decoded_from_native_array() {
        let rule = decode_rule(&rule_record(json!([0, 6]))).unwrap();
        assert_eq!(rule.days.days(), vec![0, 6]);
    }

    #[test]
    fn unparseable_days_make_rule_never_active() {
        for bad in [json!("mon,tue"), json!("{\"a\":1}"), json!(42), json!({ "x": 1 })] {
            let rule = decode_rule(&rule_record(bad.clone())).unwrap();
            assert!(rule.days.is_empty(), "{bad} should decode to no days");
        }
    }

    #[test]
    fn malformed_days_reported_by_decode_days() {
        let err = decode_days("R1", Some(&json!("not json"))).unwrap_err();
        assert!(matches!(err, RecordError::MalformedDays { .. }));
    }

    #[test]
    fn absent_days_are_empty_not_malformed() {
        assert_eq!(decode_days("R1", None), Ok(DaySet::empty()));
        assert_eq!(decode_days("R1", Some(&Value::Null)), Ok(DaySet::empty()));
        assert_eq!(decode_days("R1", Some(&json!(""))), Ok(DaySet::empty()));
    }

    #[test]
    fn out_of_range_day_entries_are_ignored() {
        let days = decode_days("R1", Some(&json!("[1, 7, -1, \"2\", 3]"))).unwrap();
        assert_eq!(days.days(), vec![1, 3]);
    }

    // ── Rules ─────────────────────────────────────────────────────────────────

    #[test]
    fn rule_fields_decoded() {
        let rule = decode_rule(&rule_record(json!("[1]"))).unwrap();
        assert_eq!(rule.id, "R1");
        assert_eq!(rule.screen_id.as_deref(), Some("S1"));
        assert_eq!(rule.group_id, None);
        assert_eq!(rule.playlist_id, "P-work");
        assert_eq!(rule.start.minutes(), 540);
        assert_eq!(rule.end.minutes(), 1020);
        assert_eq!(rule.priority, 2);
    }

    #[test]
    fn missing_or_null_priority_defaults_to_zero() {
        let mut r = rule_record(json!("[1]"));
        r.remove("priority");
        assert_eq!(decode_rule(&r).unwrap().priority, 0);
        r.insert("priority".into(), Value::Null);
        assert_eq!(decode_rule(&r).unwrap().priority, 0);
    }

    #[test]
    fn malformed_time_rejects_rule() {
        let mut r = rule_record(json!("[1]"));
        r.insert("endTime".into(), json!("5pm"));
        let err = decode_rule(&r).unwrap_err();
        assert_eq!(
            err,
            RecordError::MalformedTime {
                rule: "R1".into(),
                field: "endTime",
                raw: "5pm".into()
            }
        );
    }

    #[test]
    fn rule_without_target_is_rejected() {
        let mut r = rule_record(json!("[1]"));
        r.remove("screenId");
        assert!(matches!(decode_rule(&r), Err(RecordError::NoTarget { .. })));
    }

    #[test]
    fn rule_without_playlist_is_rejected() {
        let mut r = rule_record(json!("[1]"));
        r.insert("playlistId".into(), json!(""));
        assert!(matches!(
            decode_rule(&r),
            Err(RecordError::MissingField {
                field: "playlistId",
                ..
            })
        ));
    }

    #[test]
    fn decode_rules_skips_invalid_and_keeps_order() {
        let mut broken = rule_record(json!("[1]"));
        broken.insert("id".into(), json!("R-bad"));
        broken.insert("startTime".into(), json!("nine"));
        let mut second = rule_record(json!("[2]"));
        second.insert("id".into(), json!("R2"));

        let rules = decode_rules(&[rule_record(json!("[1]")), broken, second]);
        let ids: Vec<_> = rules.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["R1", "R2"]);
    }

    // ── Screens / playlists ───────────────────────────────────────────────────

    #[test]
    fn screen_decoded_with_null_group() {
        let screen = decode_screen(&record(json!({
            "id": "S1",
            "userId": "u1",
            "groupId": null,
            "defaultPlaylistId": "P-default",
            "pairingCode": "ABC123"
        })))
        .unwrap();
        assert_eq!(screen.id, "S1");
        assert_eq!(screen.owner_id.as_deref(), Some("u1"));
        assert_eq!(screen.group_id, None);
        assert!(!screen.uses_schedules());
        assert_eq!(screen.default_playlist_id.as_deref(), Some("P-default"));
    }

    #[test]
    fn screen_without_id_is_rejected() {
        assert!(decode_screen(&record(json!({ "name": "x" }))).is_err());
    }

    #[test]
    fn item_defaults_applied() {
        let item = decode_item(
            &record(json!({ "id": "i1", "mediaId": "m1", "mediaType": "video", "duration": 0 })),
            10,
        )
        .unwrap();
        assert_eq!(item.duration, 10);
        assert_eq!(item.sort_order, 0);
        assert_eq!(item.media_type, MediaType::Video);
        assert_eq!(item.media_url, "");
    }

    #[test]
    fn item_duration_kept_when_positive() {
        let item = decode_item(
            &record(json!({ "id": "i1", "duration": 25, "sortOrder": 3 })),
            10,
        )
        .unwrap();
        assert_eq!(item.duration, 25);
        assert_eq!(item.sort_order, 3);
        assert_eq!(item.media_type, MediaType::Image);
    }

    #[test]
    fn playlist_header_decoded() {
        let p = decode_playlist(&record(json!({ "id": "P1", "name": "Lobby" }))).unwrap();
        assert_eq!(p.id, "P1");
        assert_eq!(p.name, "Lobby");
        assert!(p.items.is_empty());
    }
}
