// SPDX-FileCopyrightText: 2026 Mingle Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test doubles and fixtures shared across Mingle crates.
//!
//! Mock collaborators implement the real adapter traits with scripted
//! behavior and captured calls so scheduler tests stay deterministic and
//! offline.

pub mod fixtures;
pub mod memory_store;
pub mod mock_discovery;
pub mod mock_executor;

pub use memory_store::MemoryStateStore;
pub use mock_discovery::MockDiscovery;
pub use mock_executor::{ExecOutcome, ExecutedAction, MockExecutor};
