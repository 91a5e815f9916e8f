// SPDX-FileCopyrightText: 2026 Mingle Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `mingle run` command implementation.
//!
//! Wires the collaborators around the session scheduler: a replay
//! discovery surface fed from a fixture file, the dry-run logging
//! executor, the configured comment composer, and the SQLite state store.
//! Supports graceful shutdown via signal handlers.

use std::path::Path;
use std::sync::Arc;

use tracing::{error, info};

use mingle_config::model::MingleConfig;
use mingle_core::{MingleError, PlatformAdapter, StateStore, StopReason};
use mingle_engine::{Collaborators, SessionRunner};
use mingle_storage::SqliteStateStore;

use crate::logexec::LoggingExecutor;
use crate::replay::ReplayDiscovery;
use crate::shutdown;

/// Runs the `mingle run` command to completion.
pub async fn run_session(
    config: MingleConfig,
    fixtures: &Path,
    refusal_odds: Option<f64>,
) -> Result<(), MingleError> {
    init_tracing(&config.engine.log_level);

    info!(engine = config.engine.name.as_str(), "starting mingle run");

    let store = Arc::new(SqliteStateStore::new(config.storage.clone()));
    store.initialize().await?;

    let discovery = Arc::new(ReplayDiscovery::from_file(fixtures)?);
    let executor = Arc::new(match refusal_odds {
        Some(odds) => LoggingExecutor::with_refusal_odds(odds)?,
        None => LoggingExecutor::new(),
    });

    let composer = if config.actions.comment {
        let composer = mingle_composer::from_config(&config.composer)?;
        Some(Arc::new(composer) as Arc<dyn mingle_core::CommentComposer>)
    } else {
        None
    };

    let collab = Collaborators {
        discovery,
        executor,
        composer,
        store: store.clone(),
    };

    let (runner, commands, handle) = SessionRunner::with_system_clock(config, collab)?;

    // Install signal handler and translate cancellation into a stop command.
    let cancel = shutdown::install_signal_handler();
    {
        let handle = handle.clone();
        let cancel = cancel.clone();
        tokio::spawn(async move {
            cancel.cancelled().await;
            if let Err(e) = handle.stop().await {
                error!(error = %e, "failed to deliver stop command");
            }
        });
    }

    let join = runner.spawn(commands);
    let reason = join
        .await
        .map_err(|e| MingleError::Internal(format!("session task panicked: {e}")))?;

    store.shutdown().await?;

    match reason {
        StopReason::Error => Err(MingleError::Internal(
            "session ended with an error, see the log".into(),
        )),
        reason => {
            info!(reason = %reason, "mingle run complete");
            Ok(())
        }
    }
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("mingle={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
