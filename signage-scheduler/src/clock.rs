/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Injectable "now" provider.
//!
//! The resolution core never reads the wall clock itself.  Callers hand it a
//! local [`NaiveDateTime`] obtained from a [`Clock`], which keeps every
//! resolution deterministic under test.

use chrono::{Local, NaiveDateTime};

/// Source of the current local time.
pub trait Clock: Send + Sync {
    /// Current instant, already expressed in the screens' local time.
    fn now(&self) -> NaiveDateTime;
}

/// Wall-clock local time of the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    at: NaiveDateTime,
}

impl FixedClock {
    pub fn new(at: NaiveDateTime) -> Self {
        Self { at }
    }

    /// Parse `YYYY-MM-DDTHH:MM` (the CLI `--at` format).
    pub fn parse(s: &str) -> Result<Self, chrono::ParseError> {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M").map(Self::new)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.at
    }
}
