// SPDX-FileCopyrightText: 2026 Mingle Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Capped ignore registries.
//!
//! Two instances exist per engine: one for item ids, one for author ids.
//! Membership is a durable "never re-engage" ledger that outlives sessions;
//! the cap bounds memory and storage by evicting the oldest entries first.

use std::collections::{HashSet, VecDeque};

use mingle_core::MingleError;
use tracing::debug;

/// Insertion-ordered set of identifiers with FIFO eviction at a cap.
#[derive(Debug)]
pub struct IgnoreRegistry {
    cap: usize,
    order: VecDeque<String>,
    members: HashSet<String>,
}

impl IgnoreRegistry {
    /// Create an empty registry holding at most `cap` entries.
    pub fn new(cap: usize) -> Self {
        Self {
            cap,
            order: VecDeque::new(),
            members: HashSet::new(),
        }
    }

    /// Rebuild a registry from a persisted JSON snapshot.
    ///
    /// When the configured cap shrank since the snapshot was taken, the
    /// oldest entries are evicted until the registry fits.
    pub fn restore_json(cap: usize, json: &str) -> Result<Self, MingleError> {
        let entries: Vec<String> = serde_json::from_str(json)
            .map_err(|e| MingleError::Internal(format!("invalid registry snapshot: {e}")))?;
        let mut registry = Self::new(cap);
        for entry in entries {
            registry.insert(entry);
        }
        debug!(len = registry.len(), "ignore registry restored");
        Ok(registry)
    }

    /// Serialize membership in insertion order for persistence.
    pub fn snapshot_json(&self) -> String {
        let entries: Vec<&String> = self.order.iter().collect();
        serde_json::to_string(&entries).unwrap_or_else(|_| "[]".to_string())
    }

    /// Whether `id` is in the registry. Empty ids are never members.
    pub fn contains(&self, id: &str) -> bool {
        !id.is_empty() && self.members.contains(id)
    }

    /// Insert `id`, evicting the oldest entry if the cap is exceeded.
    ///
    /// Empty ids and duplicates are ignored. Returns true when the
    /// membership actually changed (the caller persists only then).
    pub fn insert(&mut self, id: String) -> bool {
        if id.is_empty() || self.members.contains(&id) {
            return false;
        }
        self.order.push_back(id.clone());
        self.members.insert(id);
        while self.order.len() > self.cap {
            if let Some(evicted) = self.order.pop_front() {
                self.members.remove(&evicted);
            }
        }
        true
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
