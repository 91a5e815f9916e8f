// SPDX-FileCopyrightText: 2026 Mingle Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end scheduler scenarios against mock collaborators.

use std::sync::Arc;

use chrono::{TimeZone, Utc};

use mingle_composer::TemplatePool;
use mingle_config::model::MingleConfig;
use mingle_core::{ActionKind, EngagementStats, StateStore, StopReason, SurfaceView};
use mingle_engine::{keys, Clock, Collaborators, ManualClock, SessionHandle, SessionRunner};
use mingle_test_utils::fixtures::{comment_config, config, item};
use mingle_test_utils::{ExecOutcome, MemoryStateStore, MockDiscovery, MockExecutor};

fn collaborators(
    discovery: &Arc<MockDiscovery>,
    executor: &Arc<MockExecutor>,
    store: &MemoryStateStore,
    with_composer: bool,
) -> Collaborators {
    Collaborators {
        discovery: Arc::clone(discovery) as _,
        executor: Arc::clone(executor) as _,
        composer: if with_composer {
            Some(Arc::new(TemplatePool::new(vec!["Great post!".into()]).unwrap()) as _)
        } else {
            None
        },
        store: Arc::new(store.clone()),
    }
}

async fn run_session(
    config: MingleConfig,
    collab: Collaborators,
    clock: Arc<ManualClock>,
) -> StopReason {
    let (handle, commands) = SessionHandle::channel();
    let runner = SessionRunner::new(config, collab, clock, handle).unwrap();
    runner.run(commands).await
}

fn manual_clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(Utc.timestamp_opt(1_700_000_000, 0).unwrap()))
}

#[tokio::test]
async fn comment_budget_blocks_third_item_until_window_advances() {
    let discovery = Arc::new(MockDiscovery::new());
    let executor = Arc::new(MockExecutor::new());
    let store = MemoryStateStore::new();
    let clock = manual_clock();
    let start = clock.now();

    discovery
        .push_batch(&SurfaceView::Feed, vec![item("i1"), item("i2"), item("i3")])
        .await;

    let mut cfg = comment_config();
    cfg.actions.react = false;
    cfg.session.hourly_comment_budget = 2;

    let reason = run_session(cfg, collaborators(&discovery, &executor, &store, true), clock.clone()).await;

    // Session drains, then aborts on consecutive empty passes.
    assert_eq!(reason, StopReason::CapReached);

    let calls = executor.calls().await;
    assert_eq!(calls.len(), 3);
    assert!(calls.iter().all(|c| c.kind == ActionKind::Comment));
    assert!(calls.iter().all(|c| c.comment.as_deref() == Some("Great post!")));

    // The third comment had to wait for the first slot to age out.
    assert!(
        clock.now() - start >= chrono::Duration::hours(1),
        "limiter should have forced a one-hour blocked-wait"
    );

    let counters = store.snapshot().await;
    let persisted = counters.get(keys::SESSION_COUNTERS).unwrap();
    assert!(persisted.contains("\"comment\":3"), "got: {persisted}");
}

#[tokio::test]
async fn abort_after_exactly_n_consecutive_rejections() {
    let discovery = Arc::new(MockDiscovery::new());
    let executor = Arc::new(MockExecutor::new());
    let store = MemoryStateStore::new();

    // Items that fail the engagement filter.
    let rejected = |id: &str| {
        let mut it = item(id);
        it.engagement = EngagementStats {
            like_count: 0,
            comment_count: 0,
        };
        it
    };
    discovery
        .push_batch(
            &SurfaceView::Feed,
            vec![rejected("r1"), rejected("r2"), rejected("r3"), item("ok")],
        )
        .await;

    let mut cfg = config();
    cfg.session.consecutive_filtered_abort = 3;
    cfg.filters.engagement_enabled = true;
    cfg.filters.engagement_min = 5;
    cfg.filters.engagement_max = 100;

    let reason = run_session(cfg, collaborators(&discovery, &executor, &store, false), manual_clock()).await;

    assert_eq!(reason, StopReason::CapReached);
    // The accepted item after the threshold is never reached.
    assert_eq!(executor.call_count().await, 0);
}

#[tokio::test]
async fn accepted_item_resets_the_filtered_streak() {
    let discovery = Arc::new(MockDiscovery::new());
    let executor = Arc::new(MockExecutor::new());
    let store = MemoryStateStore::new();

    let rejected = |id: &str| {
        let mut it = item(id);
        it.engagement = EngagementStats {
            like_count: 0,
            comment_count: 0,
        };
        it
    };
    // Two rejections, an accept, two more rejections: threshold 3 is
    // never reached consecutively.
    discovery
        .push_batch(
            &SurfaceView::Feed,
            vec![
                rejected("r1"),
                rejected("r2"),
                item("ok"),
                rejected("r3"),
                rejected("r4"),
            ],
        )
        .await;

    let mut cfg = config();
    cfg.session.consecutive_filtered_abort = 3;
    cfg.filters.engagement_enabled = true;
    cfg.filters.engagement_min = 5;
    cfg.filters.engagement_max = 100;

    let reason = run_session(cfg, collaborators(&discovery, &executor, &store, false), manual_clock()).await;

    // Ends by empty-discovery exhaustion, not the filtered threshold.
    assert_eq!(reason, StopReason::CapReached);
    assert_eq!(executor.call_count().await, 1);
    assert_eq!(executor.calls().await[0].item_id, "ok");
}

#[tokio::test]
async fn acted_items_never_pass_again_across_restart() {
    let store = MemoryStateStore::new();

    {
        let discovery = Arc::new(MockDiscovery::new());
        let executor = Arc::new(MockExecutor::new());
        discovery.push_batch(&SurfaceView::Feed, vec![item("seen")]).await;
        let reason = run_session(
            config(),
            collaborators(&discovery, &executor, &store, false),
            manual_clock(),
        )
        .await;
        assert_eq!(reason, StopReason::CapReached);
        assert_eq!(executor.call_count().await, 1);
    }

    // Same item rediscovered by a fresh session over the same store.
    let discovery = Arc::new(MockDiscovery::new());
    let executor = Arc::new(MockExecutor::new());
    discovery.push_batch(&SurfaceView::Feed, vec![item("seen")]).await;
    let reason = run_session(
        config(),
        collaborators(&discovery, &executor, &store, false),
        manual_clock(),
    )
    .await;

    assert_eq!(reason, StopReason::CapReached);
    assert_eq!(executor.call_count().await, 0, "dedup must hold across restarts");
}

#[tokio::test]
async fn executor_refusal_records_nothing() {
    let discovery = Arc::new(MockDiscovery::new());
    let executor = Arc::new(MockExecutor::new());
    let store = MemoryStateStore::new();

    discovery.push_batch(&SurfaceView::Feed, vec![item("declined")]).await;
    executor.script(vec![ExecOutcome::Refused]).await;

    let reason = run_session(
        config(),
        collaborators(&discovery, &executor, &store, false),
        manual_clock(),
    )
    .await;

    assert_eq!(reason, StopReason::CapReached);
    assert_eq!(executor.call_count().await, 1);

    let persisted = store.snapshot().await;
    // No successful action: no ignore-state, no counter movement. The
    // refused item must not consume the campaign-wide or per-keyword caps.
    assert!(!persisted.contains_key(keys::IGNORE_CONTENT));
    let counters = persisted.get(keys::SESSION_COUNTERS).unwrap();
    assert!(counters.contains("\"react\":0"), "got: {counters}");
    assert!(
        counters.contains("\"total_items_processed\":0"),
        "got: {counters}"
    );
    assert!(
        counters.contains("\"per_keyword_processed\":0"),
        "got: {counters}"
    );
}

#[tokio::test]
async fn executor_errors_are_retried_then_skipped() {
    let discovery = Arc::new(MockDiscovery::new());
    let executor = Arc::new(MockExecutor::new());
    let store = MemoryStateStore::new();

    discovery.push_batch(&SurfaceView::Feed, vec![item("flaky")]).await;
    executor
        .script(vec![
            ExecOutcome::Error("boom".into()),
            ExecOutcome::Error("boom".into()),
            ExecOutcome::Error("boom".into()),
        ])
        .await;

    let reason = run_session(
        config(),
        collaborators(&discovery, &executor, &store, false),
        manual_clock(),
    )
    .await;

    assert_eq!(reason, StopReason::CapReached);
    // Three attempts, then the action is skipped, never fatal.
    assert_eq!(executor.call_count().await, 3);
    assert!(!store.snapshot().await.contains_key(keys::IGNORE_CONTENT));
}

#[tokio::test]
async fn empty_discovery_aborts_after_threshold() {
    let discovery = Arc::new(MockDiscovery::new());
    let executor = Arc::new(MockExecutor::new());
    let store = MemoryStateStore::new();

    let mut cfg = config();
    cfg.session.consecutive_empty_abort = 3;

    let reason = run_session(
        cfg,
        collaborators(&discovery, &executor, &store, false),
        manual_clock(),
    )
    .await;

    assert_eq!(reason, StopReason::CapReached);
    assert_eq!(executor.call_count().await, 0);
    // Discovery was asked to surface more before aborting.
    assert!(discovery.request_more_count().await >= 1);
}

#[tokio::test]
async fn keyword_campaign_walks_keywords_and_completes() {
    let discovery = Arc::new(MockDiscovery::new());
    let executor = Arc::new(MockExecutor::new());
    let store = MemoryStateStore::new();

    let search_a = SurfaceView::Search { query: "a".into() };
    let search_b = SurfaceView::Search { query: "b".into() };
    discovery.push_batch(&search_a, vec![item("item-a")]).await;
    discovery.push_batch(&search_b, vec![item("item-b")]).await;

    let mut cfg = config();
    cfg.campaign.keywords = vec!["a".into(), "b".into()];
    cfg.campaign.per_keyword_cap = 1;
    cfg.session.total_item_cap = 5;

    let reason = run_session(
        cfg,
        collaborators(&discovery, &executor, &store, false),
        manual_clock(),
    )
    .await;

    assert_eq!(reason, StopReason::Completed);
    let calls = executor.calls().await;
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].item_id, "item-a");
    assert_eq!(calls[1].item_id, "item-b");

    let navigations = discovery.navigations().await;
    assert_eq!(navigations, vec![search_a, search_b]);

    // Normal completion clears the persisted cursor.
    assert!(!store.snapshot().await.contains_key(keys::CAMPAIGN_CURSOR));
}

#[tokio::test]
async fn interrupted_campaign_resumes_at_saved_index_with_totals_preserved() {
    let discovery = Arc::new(MockDiscovery::new());
    let executor = Arc::new(MockExecutor::new());
    let store = MemoryStateStore::new();

    // State left behind by an interrupted campaign: cursor at "b",
    // item from "a" already in the registry, five items of history.
    store
        .set(
            keys::CAMPAIGN_CURSOR,
            r#"{"keywords":["a","b"],"current_index":1,"active":true}"#,
        )
        .await
        .unwrap();
    store.set(keys::IGNORE_CONTENT, r#"["item-a"]"#).await.unwrap();
    store
        .set(
            keys::SESSION_COUNTERS,
            r#"{"total_items_processed":5,"action_counts":{"react":5,"comment":0},"per_keyword_processed":0}"#,
        )
        .await
        .unwrap();

    let search_b = SurfaceView::Search { query: "b".into() };
    // The resumed view surfaces the already-acted item next to a new one.
    discovery
        .push_batch(&search_b, vec![item("item-a"), item("item-b")])
        .await;

    let mut cfg = config();
    cfg.campaign.keywords = vec!["a".into(), "b".into()];
    cfg.campaign.per_keyword_cap = 1;
    cfg.session.total_item_cap = 20;

    let reason = run_session(
        cfg,
        collaborators(&discovery, &executor, &store, false),
        manual_clock(),
    )
    .await;

    assert_eq!(reason, StopReason::Completed);

    // "a" was not re-run: the only navigation is to the resumed view,
    // and its registered item never reached the executor again.
    assert_eq!(discovery.navigations().await, vec![search_b]);
    let calls = executor.calls().await;
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].item_id, "item-b");

    // Cumulative totals carried over: 5 prior + 1 new.
    let counters = store.snapshot().await;
    let persisted = counters.get(keys::SESSION_COUNTERS).unwrap();
    assert!(
        persisted.contains("\"total_items_processed\":6"),
        "got: {persisted}"
    );
}

#[tokio::test]
async fn resume_at_finished_keyword_advances_before_acting() {
    let discovery = Arc::new(MockDiscovery::new());
    let executor = Arc::new(MockExecutor::new());
    let store = MemoryStateStore::new();

    // A crash between the counters write and the cursor advance leaves
    // the cursor at "a" with its cap already consumed.
    store
        .set(
            keys::CAMPAIGN_CURSOR,
            r#"{"keywords":["a","b"],"current_index":0,"active":true}"#,
        )
        .await
        .unwrap();
    store
        .set(
            keys::SESSION_COUNTERS,
            r#"{"total_items_processed":1,"action_counts":{"react":1,"comment":0},"per_keyword_processed":1}"#,
        )
        .await
        .unwrap();

    let search_a = SurfaceView::Search { query: "a".into() };
    let search_b = SurfaceView::Search { query: "b".into() };
    // "a" still has a fresh item visible; it must never reach the executor.
    discovery.push_batch(&search_a, vec![item("extra-a")]).await;
    discovery.push_batch(&search_b, vec![item("item-b")]).await;

    let mut cfg = config();
    cfg.campaign.keywords = vec!["a".into(), "b".into()];
    cfg.campaign.per_keyword_cap = 1;
    cfg.session.total_item_cap = 20;

    let reason = run_session(
        cfg,
        collaborators(&discovery, &executor, &store, false),
        manual_clock(),
    )
    .await;

    // The resumed session walks straight past the finished keyword
    // instead of stalling or over-acting on it.
    assert_eq!(reason, StopReason::Completed);
    let calls = executor.calls().await;
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].item_id, "item-b");
    assert_eq!(discovery.navigations().await, vec![search_a, search_b]);
}

#[tokio::test]
async fn restored_limiter_window_still_blocks() {
    let discovery = Arc::new(MockDiscovery::new());
    let executor = Arc::new(MockExecutor::new());
    let store = MemoryStateStore::new();
    let clock = manual_clock();
    let start = clock.now();

    // Two comments recorded shortly before the restart saturate a
    // budget of two.
    let recent: Vec<String> = [50, 55]
        .iter()
        .map(|m| (start - chrono::Duration::minutes(60 - m)).to_rfc3339())
        .collect();
    store
        .set(keys::LIMITER_COMMENT, &serde_json::to_string(&recent).unwrap())
        .await
        .unwrap();

    discovery.push_batch(&SurfaceView::Feed, vec![item("queued")]).await;

    let mut cfg = comment_config();
    cfg.actions.react = false;
    cfg.session.hourly_comment_budget = 2;

    let reason = run_session(cfg, collaborators(&discovery, &executor, &store, true), clock.clone()).await;

    assert_eq!(reason, StopReason::CapReached);
    assert_eq!(executor.call_count().await, 1);
    // The restored window forced a wait until the oldest entry aged out.
    assert!(clock.now() - start >= chrono::Duration::minutes(10));
}

#[tokio::test]
async fn queued_stop_wins_before_any_work() {
    let discovery = Arc::new(MockDiscovery::new());
    let executor = Arc::new(MockExecutor::new());
    let store = MemoryStateStore::new();
    discovery.push_batch(&SurfaceView::Feed, vec![item("never")]).await;

    let (handle, commands) = SessionHandle::channel();
    let runner = SessionRunner::new(
        config(),
        collaborators(&discovery, &executor, &store, false),
        manual_clock(),
        handle.clone(),
    )
    .unwrap();

    handle.stop().await.unwrap();
    let reason = runner.run(commands).await;

    assert_eq!(reason, StopReason::Stopped);
    assert_eq!(executor.call_count().await, 0);
}

#[tokio::test]
async fn paused_session_replies_to_status_and_stops() {
    let discovery = Arc::new(MockDiscovery::new());
    let executor = Arc::new(MockExecutor::new());
    let store = MemoryStateStore::new();

    // Keep the session alive until the control task stops it.
    let mut cfg = config();
    cfg.session.consecutive_empty_abort = 1_000_000;

    let (handle, commands) = SessionHandle::channel();
    let runner = SessionRunner::new(
        cfg,
        collaborators(&discovery, &executor, &store, false),
        manual_clock(),
        handle.clone(),
    )
    .unwrap();

    let control = tokio::spawn({
        let handle = handle.clone();
        async move {
            handle.pause().await.unwrap();
            let snapshot = handle.status().await.unwrap();
            handle.stop().await.unwrap();
            snapshot
        }
    });

    let reason = runner.run(commands).await;
    let snapshot = control.await.unwrap();

    assert_eq!(reason, StopReason::Stopped);
    assert_eq!(snapshot.items_processed, 0);
}

#[tokio::test]
async fn invalid_config_is_rejected_synchronously() {
    let discovery = Arc::new(MockDiscovery::new());
    let executor = Arc::new(MockExecutor::new());
    let store = MemoryStateStore::new();

    let mut cfg = config();
    cfg.actions.react = false;
    cfg.actions.comment = false;

    let (handle, _commands) = SessionHandle::channel();
    let result = SessionRunner::new(
        cfg,
        collaborators(&discovery, &executor, &store, false),
        manual_clock(),
        handle,
    );
    assert!(result.is_err(), "no enabled action must fail validation");
}

#[tokio::test]
async fn legacy_flag_allows_actionless_config() {
    let discovery = Arc::new(MockDiscovery::new());
    let executor = Arc::new(MockExecutor::new());
    let store = MemoryStateStore::new();
    discovery.push_batch(&SurfaceView::Feed, vec![item("fallback")]).await;

    let mut cfg = config();
    cfg.actions.react = false;
    cfg.actions.comment = false;
    cfg.actions.legacy_default_action = true;

    let reason = run_session(
        cfg,
        collaborators(&discovery, &executor, &store, false),
        manual_clock(),
    )
    .await;

    assert_eq!(reason, StopReason::CapReached);
    // The implicit fallback performed a react.
    let calls = executor.calls().await;
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].kind, ActionKind::React);
}
