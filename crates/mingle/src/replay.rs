// SPDX-FileCopyrightText: 2026 Mingle Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Replay discovery adapter.
//!
//! Reads scripted discovery batches from a JSONL fixture file so whole
//! sessions can run offline. Each line holds one batch for one view:
//!
//! ```text
//! {"view": "feed", "items": [{"id": "a", "kind": "text_only", "text": "..."}]}
//! {"view": "search:gardening", "items": [...]}
//! ```
//!
//! Batches are consumed in file order per view; once a view's script is
//! exhausted, `discover` returns empty batches for it.

use std::collections::{HashMap, VecDeque};
use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::debug;

use mingle_core::{
    AdapterType, CandidateItem, DiscoveryAdapter, HealthStatus, MingleError, PlatformAdapter,
    SurfaceView,
};

#[derive(Debug, Deserialize)]
struct FixtureLine {
    view: String,
    items: Vec<CandidateItem>,
}

/// Parse the fixture `view` field: `feed` or `search:<query>`.
fn parse_view(raw: &str) -> Result<SurfaceView, MingleError> {
    if raw == "feed" {
        return Ok(SurfaceView::Feed);
    }
    if let Some(query) = raw.strip_prefix("search:") {
        if query.is_empty() {
            return Err(MingleError::Config("fixture view has empty query".into()));
        }
        return Ok(SurfaceView::Search {
            query: query.to_string(),
        });
    }
    Err(MingleError::Config(format!("unknown fixture view: {raw}")))
}

/// File-backed discovery surface for offline runs.
#[derive(Debug)]
pub struct ReplayDiscovery {
    batches: Mutex<HashMap<String, VecDeque<Vec<CandidateItem>>>>,
    current_view: Mutex<SurfaceView>,
}

impl ReplayDiscovery {
    /// Load all batches from a JSONL fixture file. Blank lines and `#`
    /// comment lines are skipped.
    pub fn from_file(path: &Path) -> Result<Self, MingleError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            MingleError::Config(format!("cannot read fixture {}: {e}", path.display()))
        })?;
        Self::from_str(&content)
    }

    /// Parse fixture content directly. Used by tests.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, MingleError> {
        let mut batches: HashMap<String, VecDeque<Vec<CandidateItem>>> = HashMap::new();
        for (index, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let parsed: FixtureLine = serde_json::from_str(line).map_err(|e| {
                MingleError::Config(format!("fixture line {}: {e}", index + 1))
            })?;
            let view = parse_view(&parsed.view)?;
            batches
                .entry(view.to_string())
                .or_default()
                .push_back(parsed.items);
        }
        debug!(views = batches.len(), "replay fixture loaded");
        Ok(Self {
            batches: Mutex::new(batches),
            current_view: Mutex::new(SurfaceView::Feed),
        })
    }
}

#[async_trait]
impl PlatformAdapter for ReplayDiscovery {
    fn name(&self) -> &str {
        "replay"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Discovery
    }

    async fn health_check(&self) -> Result<HealthStatus, MingleError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), MingleError> {
        Ok(())
    }
}

#[async_trait]
impl DiscoveryAdapter for ReplayDiscovery {
    async fn discover(&self) -> Result<Vec<CandidateItem>, MingleError> {
        let view = self.current_view.lock().await.to_string();
        let batch = self
            .batches
            .lock()
            .await
            .get_mut(&view)
            .and_then(VecDeque::pop_front)
            .unwrap_or_default();
        debug!(view = %view, items = batch.len(), "replay batch");
        Ok(batch)
    }

    async fn request_more(&self) -> Result<(), MingleError> {
        // Nothing to load; the script is fixed.
        Ok(())
    }

    async fn view(&self) -> Result<SurfaceView, MingleError> {
        Ok(self.current_view.lock().await.clone())
    }

    async fn navigate(&self, view: &SurfaceView) -> Result<(), MingleError> {
        debug!(to = %view, "replay navigation");
        *self.current_view.lock().await = view.clone();
        Ok(())
    }
}
