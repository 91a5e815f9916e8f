// SPDX-FileCopyrightText: 2026 Mingle Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock discovery adapter for deterministic testing.
//!
//! `MockDiscovery` implements `DiscoveryAdapter` with per-view scripted
//! batches and a captured navigation log for assertion in tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use mingle_core::{
    AdapterType, CandidateItem, DiscoveryAdapter, HealthStatus, MingleError, PlatformAdapter,
    SurfaceView,
};

/// A mock discovery surface.
///
/// Batches are scripted per view (keyed by the view's `Display` form);
/// each `discover()` call pops the next batch for the current view, or
/// returns an empty batch once the script is exhausted. `request_more()`
/// only counts calls; append further batches to simulate late-loading
/// content.
pub struct MockDiscovery {
    batches: Arc<Mutex<HashMap<String, VecDeque<Vec<CandidateItem>>>>>,
    current_view: Arc<Mutex<SurfaceView>>,
    navigations: Arc<Mutex<Vec<SurfaceView>>>,
    request_more_calls: Arc<Mutex<u64>>,
    fail_next_discovers: Arc<Mutex<u32>>,
}

impl MockDiscovery {
    /// Create a mock pointed at the feed with no scripted batches.
    pub fn new() -> Self {
        Self {
            batches: Arc::new(Mutex::new(HashMap::new())),
            current_view: Arc::new(Mutex::new(SurfaceView::Feed)),
            navigations: Arc::new(Mutex::new(Vec::new())),
            request_more_calls: Arc::new(Mutex::new(0)),
            fail_next_discovers: Arc::new(Mutex::new(0)),
        }
    }

    /// Queue one batch for `view`.
    pub async fn push_batch(&self, view: &SurfaceView, batch: Vec<CandidateItem>) {
        self.batches
            .lock()
            .await
            .entry(view.to_string())
            .or_default()
            .push_back(batch);
    }

    /// Make the next `count` `discover()` calls fail with a discovery error.
    pub async fn fail_next_discovers(&self, count: u32) {
        *self.fail_next_discovers.lock().await = count;
    }

    /// Views navigated to, in order.
    pub async fn navigations(&self) -> Vec<SurfaceView> {
        self.navigations.lock().await.clone()
    }

    /// Number of `request_more()` calls observed.
    pub async fn request_more_count(&self) -> u64 {
        *self.request_more_calls.lock().await
    }

    /// Point the mock at a view without going through `navigate()`.
    pub async fn set_view(&self, view: SurfaceView) {
        *self.current_view.lock().await = view;
    }
}

impl Default for MockDiscovery {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlatformAdapter for MockDiscovery {
    fn name(&self) -> &str {
        "mock-discovery"
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
impl DiscoveryAdapter for MockDiscovery {
    async fn discover(&self) -> Result<Vec<CandidateItem>, MingleError> {
        {
            let mut failures = self.fail_next_discovers.lock().await;
            if *failures > 0 {
                *failures -= 1;
                return Err(MingleError::Discovery {
                    message: "scripted discovery failure".into(),
                    source: None,
                });
            }
        }
        let view = self.current_view.lock().await.to_string();
        let batch = self
            .batches
            .lock()
            .await
            .get_mut(&view)
            .and_then(VecDeque::pop_front)
            .unwrap_or_default();
        Ok(batch)
    }

    async fn request_more(&self) -> Result<(), MingleError> {
        *self.request_more_calls.lock().await += 1;
        Ok(())
    }

    async fn view(&self) -> Result<SurfaceView, MingleError> {
        Ok(self.current_view.lock().await.clone())
    }

    async fn navigate(&self, view: &SurfaceView) -> Result<(), MingleError> {
        self.navigations.lock().await.push(view.clone());
        *self.current_view.lock().await = view.clone();
        Ok(())
    }
}
