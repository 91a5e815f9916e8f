// SPDX-FileCopyrightText: 2026 Mingle Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Comment composer trait for producing comment text.

use async_trait::async_trait;

use crate::error::MingleError;
use crate::traits::adapter::PlatformAdapter;

/// Adapter for the text-generation collaborator.
///
/// The scheduler treats composition as a black box: it passes the item's
/// body text in and gets comment text out. Implementations are expected to
/// fall back to a static template pool on any generator failure.
#[async_trait]
pub trait CommentComposer: PlatformAdapter {
    /// Composes comment text for an item with the given body text.
    async fn compose(&self, item_text: &str) -> Result<String, MingleError>;
}
