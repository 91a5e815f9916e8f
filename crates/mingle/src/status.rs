// SPDX-FileCopyrightText: 2026 Mingle Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Read-only status view over the persisted session state.
//!
//! Opens the configured state store, summarizes the durable documents
//! (counters, campaign cursor, ignore registries, comment window), and
//! prints either a plain report or JSON. Never mutates anything.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use mingle_config::model::MingleConfig;
use mingle_core::{KeywordCursorSnapshot, MingleError, StateStore};
use mingle_engine::{keys, KeywordCursor};
use mingle_storage::SqliteStateStore;

#[derive(Debug, Serialize)]
struct StatusReport {
    database_path: String,
    persisted_keys: usize,
    total_items_processed: u64,
    reactions: u64,
    comments: u64,
    comments_in_window: usize,
    hourly_comment_budget: u32,
    content_ignore_size: usize,
    author_ignore_size: usize,
    campaign: Option<KeywordCursorSnapshot>,
}

/// Build and print the status report for the configured store.
pub async fn run(config: &MingleConfig, json: bool) -> Result<(), MingleError> {
    let store = SqliteStateStore::new(config.storage.clone());
    store.initialize().await?;
    let report = collect(&store, config).await;
    store.close().await?;
    let report = report?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report)
                .map_err(|e| MingleError::Internal(format!("status serialization: {e}")))?
        );
    } else {
        print_plain(&report);
    }
    Ok(())
}

async fn collect(
    store: &SqliteStateStore,
    config: &MingleConfig,
) -> Result<StatusReport, MingleError> {
    let counters: serde_json::Value = match store.get(keys::SESSION_COUNTERS).await? {
        Some(json) => serde_json::from_str(&json)
            .map_err(|e| MingleError::Internal(format!("invalid counters snapshot: {e}")))?,
        None => serde_json::Value::Null,
    };
    let count = |path: &[&str]| -> u64 {
        let mut value = &counters;
        for key in path {
            value = &value[*key];
        }
        value.as_u64().unwrap_or(0)
    };

    let comments_in_window = match store.get(keys::LIMITER_COMMENT).await? {
        Some(json) => {
            let timestamps: Vec<DateTime<Utc>> = serde_json::from_str(&json)
                .map_err(|e| MingleError::Internal(format!("invalid limiter snapshot: {e}")))?;
            let horizon = Utc::now() - Duration::hours(1);
            timestamps.iter().filter(|t| **t > horizon).count()
        }
        None => 0,
    };

    let registry_size = |json: Option<String>| -> Result<usize, MingleError> {
        match json {
            Some(json) => {
                let ids: Vec<String> = serde_json::from_str(&json).map_err(|e| {
                    MingleError::Internal(format!("invalid registry snapshot: {e}"))
                })?;
                Ok(ids.len())
            }
            None => Ok(0),
        }
    };
    let content_ignore_size = registry_size(store.get(keys::IGNORE_CONTENT).await?)?;
    let author_ignore_size = registry_size(store.get(keys::IGNORE_AUTHORS).await?)?;

    let campaign = match store.get(keys::CAMPAIGN_CURSOR).await? {
        Some(json) => Some(KeywordCursor::restore_json(&json)?.status_snapshot()),
        None => None,
    };

    Ok(StatusReport {
        database_path: config.storage.database_path.clone(),
        persisted_keys: store.list_keys().await?.len(),
        total_items_processed: count(&["total_items_processed"]),
        reactions: count(&["action_counts", "react"]),
        comments: count(&["action_counts", "comment"]),
        comments_in_window,
        hourly_comment_budget: config.session.hourly_comment_budget,
        content_ignore_size,
        author_ignore_size,
        campaign,
    })
}

fn print_plain(report: &StatusReport) {
    println!("Mingle status");
    println!(
        "  database:          {} ({} keys)",
        report.database_path, report.persisted_keys
    );
    println!("  items processed:   {}", report.total_items_processed);
    println!("  reactions:         {}", report.reactions);
    println!("  comments:          {}", report.comments);
    println!(
        "  comment window:    {}/{} used in the trailing hour",
        report.comments_in_window, report.hourly_comment_budget
    );
    println!(
        "  ignore registries: {} items, {} authors",
        report.content_ignore_size, report.author_ignore_size
    );
    match &report.campaign {
        Some(cursor) if cursor.active => {
            println!(
                "  campaign:          interrupted at keyword {}/{} ({})",
                cursor.current_index + 1,
                cursor.keywords.len(),
                cursor.current_keyword
            );
        }
        Some(_) => println!("  campaign:          inactive cursor present"),
        None => println!("  campaign:          none"),
    }
}
