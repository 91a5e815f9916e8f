// SPDX-FileCopyrightText: 2026 Mingle Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed query modules over the [`Database`](crate::database::Database) handle.

pub mod state;
