/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Structured error types for schedule resolution.
//!
//! Two enums model the two failure layers:
//!
//! * [`RecordError`] — a single store record failed validation at the store
//!   boundary.  Resolution never returns it: a malformed rule is logged and
//!   treated as inactive, and resolution continues with the remaining rules.
//! * [`ResolutionError`] — a poll could not be resolved at all because the
//!   store reads it depends on failed.  The transport decides whether to serve
//!   a last-known assignment instead.
//!
//! Missing or broken playlists are **not** errors: they degrade to an
//! assignment with no playlist.

use thiserror::Error;

use crate::store::StoreError;

// ── Record validation ─────────────────────────────────────────────────────────

/// Why a store record could not be turned into a typed model.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RecordError {
    /// A required attribute is absent, `null`, empty or of the wrong type.
    #[error("record in '{collection}' has no usable '{field}' attribute")]
    MissingField {
        collection: &'static str,
        field: &'static str,
    },

    /// The rule's `days` attribute is not a list of weekday numbers.
    #[error("rule '{rule}' has unparseable days: {raw}")]
    MalformedDays { rule: String, raw: String },

    /// `startTime` / `endTime` is not `HH:MM`.
    #[error("rule '{rule}' has malformed {field}: '{raw}'")]
    MalformedTime {
        rule: String,
        field: &'static str,
        raw: String,
    },

    /// The rule names neither a screen nor a group.
    #[error("rule '{rule}' targets neither a screen nor a group")]
    NoTarget { rule: String },
}

// ── Resolution failures ───────────────────────────────────────────────────────

/// Top-level error returned by
/// [`PlaybackService::poll()`](crate::service::PlaybackService::poll).
///
/// | Variant | Suggested transport reaction |
/// |---|---|
/// | `Unavailable` | serve the last-known assignment, retry on next poll |
/// | `ScreenNotFound` | tell the device to re-register |
#[derive(Debug, Error)]
pub enum ResolutionError {
    /// Reading the screen or its schedule rules failed.
    #[error("resolution unavailable: {0}")]
    Unavailable(#[from] StoreError),

    /// No screen record exists for the polled id.
    #[error("screen '{screen_id}' not found")]
    ScreenNotFound { screen_id: String },
}
