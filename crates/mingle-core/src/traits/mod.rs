// SPDX-FileCopyrightText: 2026 Mingle Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator trait definitions.
//!
//! The engine consumes every external collaborator through one of these
//! traits, all of which extend the base [`PlatformAdapter`].

pub mod adapter;
pub mod composer;
pub mod discovery;
pub mod executor;
pub mod store;

pub use adapter::PlatformAdapter;
pub use composer::CommentComposer;
pub use discovery::DiscoveryAdapter;
pub use executor::ActionExecutor;
pub use store::StateStore;
