/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

use thiserror::Error;

use super::Collection;

/// Failure reported by a [`RecordStore`](super::RecordStore) implementation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The backend could not be reached or refused the request.
    #[error("record store unavailable: {reason}")]
    Unavailable { reason: String },

    /// A write carried an attribute bag the store cannot keep.
    #[error("invalid record for '{collection}': {reason}")]
    InvalidRecord {
        collection: Collection,
        reason: String,
    },
}
