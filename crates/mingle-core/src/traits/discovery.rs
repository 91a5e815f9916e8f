// SPDX-FileCopyrightText: 2026 Mingle Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Discovery adapter trait for surfaces that yield candidate items.

use async_trait::async_trait;

use crate::error::MingleError;
use crate::traits::adapter::PlatformAdapter;
use crate::types::{CandidateItem, SurfaceView};

/// Adapter for the content-discovery collaborator.
///
/// Discovery adapters turn a live remote view into a list of candidate items.
/// Both `discover` and `request_more` may be slow; the scheduler awaits them
/// before the next pipeline stage. Navigating to a different view may tear
/// down and restart the whole process on some surfaces, which is why the
/// scheduler persists its state before calling [`navigate`](DiscoveryAdapter::navigate).
#[async_trait]
pub trait DiscoveryAdapter: PlatformAdapter {
    /// Returns the currently visible candidate items, possibly empty.
    async fn discover(&self) -> Result<Vec<CandidateItem>, MingleError>;

    /// Signals the remote surface to surface additional items (e.g. scroll).
    async fn request_more(&self) -> Result<(), MingleError>;

    /// Returns the view the surface is currently pointed at.
    async fn view(&self) -> Result<SurfaceView, MingleError>;

    /// Navigates the surface to a different view.
    async fn navigate(&self, view: &SurfaceView) -> Result<(), MingleError>;
}
