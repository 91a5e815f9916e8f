// SPDX-FileCopyrightText: 2026 Mingle Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The Mingle session scheduler.
//!
//! Orchestrates bounded, human-paced engagement sessions: a filter
//! pipeline over discovered candidate items, a sliding-window rate limiter
//! for budgeted actions, durable ignore registries, and a keyword campaign
//! cursor that survives process restarts. All remote concerns live behind
//! the collaborator traits in `mingle-core`.

pub mod clock;
pub mod control;
pub mod cursor;
pub mod decision;
pub mod filters;
pub mod keys;
pub mod limiter;
pub mod registry;
pub mod session;

pub use clock::{Clock, ManualClock, SystemClock};
pub use control::{SessionCommand, SessionEvent, SessionHandle};
pub use cursor::KeywordCursor;
pub use filters::{FilterPipeline, SkipCause, Verdict};
pub use limiter::SlidingWindowLimiter;
pub use registry::IgnoreRegistry;
pub use session::{Collaborators, SessionRunner};
