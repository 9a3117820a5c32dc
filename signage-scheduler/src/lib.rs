/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Signage scheduler – decides which playlist each screen shows right now.
//!
//! Module layout:
//!
//! ```text
//! lib.rs
//! ├── clock         – injectable "now" provider
//! ├── config/       – YAML service configuration
//! ├── model         – typed screens, rules, playlists, assignments
//! ├── store/        – record-store collaborator + boundary decoding
//! ├── schedule/     – matcher, resolver, playback assignment
//! ├── service       – one device poll → one fresh assignment
//! └── admin         – administrative record mutations
//! ```

pub mod admin;
pub mod clock;
pub mod config;
pub mod model;
pub mod schedule;
pub mod service;
pub mod store;
