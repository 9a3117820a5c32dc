//! Schedule resolution: which playlist should a screen show right now?
//!
//! ```text
//! Screen + [ScheduleRule] + now
//!        │
//!        ▼
//!   resolver ── target filter ──► matcher::is_active ──► priority / id selection
//!        │
//!        ▼
//!   assignment ── winner or default ──► PlaylistLookup ──► Assignment
//! ```
//!
//! # Design decisions
//!
//! | Topic | Choice |
//! |---|---|
//! | Purity | matcher and resolver are pure functions over borrowed, already-validated rules |
//! | Equal priorities | smallest rule id wins, independent of store return order |
//! | Ungrouped screens | always use the default playlist; rules are never read |
//! | Overnight windows | unsupported: `end <= start` means never active |
//! | Broken playlists | degrade to `playlist: None`, never an error |
//! | State | none; every poll resolves from a fresh read |
//!
//! # Example
//! ```rust
//! use chrono::NaiveDate;
//! use signage_scheduler::model::{DaySet, ScheduleRule, Screen, TimeOfDay};
//! use signage_scheduler::schedule::resolve_active_playlist;
//!
//! let screen = Screen { id: "S2".into(), group_id: Some("G1".into()), ..Default::default() };
//! let rule = ScheduleRule {
//!     id: "R3".into(),
//!     name: None,
//!     owner_id: None,
//!     screen_id: None,
//!     group_id: Some("G1".into()),
//!     playlist_id: "P-overlap".into(),
//!     days: DaySet::from_days([1]).unwrap(),
//!     start: TimeOfDay::parse("10:00").unwrap(),
//!     end: TimeOfDay::parse("14:00").unwrap(),
//!     priority: 5,
//! };
//! // 2026-10-19 is a Monday.
//! let now = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap().and_hms_opt(11, 0, 0).unwrap();
//! assert_eq!(resolve_active_playlist(&screen, &[rule], &now), Some("P-overlap"));
//! ```

pub mod assignment;
pub mod error;
pub mod matcher;
pub mod resolver;

pub use assignment::{get_assignment, PlaylistLookup};
pub use error::{RecordError, ResolutionError};
pub use matcher::is_active;
pub use resolver::{resolve_active_playlist, resolve_active_rule};
