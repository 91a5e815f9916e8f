// SPDX-FileCopyrightText: 2026 Mingle Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session state machine and main scheduling loop.
//!
//! One logical worker per session: items are processed strictly
//! sequentially, with explicit suspension points between items, while
//! waiting for discovery, and while blocked on the rate limiter. `stop`
//! takes effect at the next suspension boundary or at the top of the loop;
//! it never preempts an action already in flight with the executor.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use mingle_config::model::MingleConfig;
use mingle_config::validation::validate_config;
use mingle_core::{
    ActionCounts, ActionExecutor, ActionKind, CandidateItem, CommentComposer, DiscoveryAdapter,
    HealthStatus, MingleError, PlatformAdapter, SessionPhase, SessionSnapshot, StateStore,
    StopReason, SurfaceView,
};
use mingle_detect::HeuristicDetector;

use crate::clock::{Clock, SystemClock};
use crate::control::{SessionCommand, SessionEvent, SessionHandle};
use crate::cursor::KeywordCursor;
use crate::decision::decide;
use crate::filters::{FilterPipeline, Verdict};
use crate::keys;
use crate::limiter::SlidingWindowLimiter;
use crate::registry::IgnoreRegistry;

/// Collaborator retry policy: attempts and initial backoff, doubling.
const RETRY_ATTEMPTS: u32 = 3;
const RETRY_BACKOFF: Duration = Duration::from_millis(500);

/// Counters persisted under [`keys::SESSION_COUNTERS`].
///
/// Cumulative totals survive a restart; within-session progress does not.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct PersistedCounters {
    total_items_processed: u64,
    action_counts: ActionCounts,
    /// Items processed for the keyword the cursor currently points at.
    per_keyword_processed: u64,
}

/// Outcome of one cancellable suspension.
#[derive(Debug, PartialEq, Eq)]
enum Suspend {
    Completed,
    Stopped,
}

/// The collaborators a session drives.
pub struct Collaborators {
    pub discovery: Arc<dyn DiscoveryAdapter>,
    pub executor: Arc<dyn ActionExecutor>,
    pub composer: Option<Arc<dyn CommentComposer>>,
    pub store: Arc<dyn StateStore>,
}

/// The session scheduler.
///
/// Owns all mutable session state; the control surface interacts only
/// through [`SessionHandle`]. Construction validates the configuration
/// synchronously; everything after `run` starts is downgraded to
/// skip/retry/log per the error-handling policy.
pub struct SessionRunner {
    config: MingleConfig,
    collab: Collaborators,
    clock: Arc<dyn Clock>,
    pipeline: FilterPipeline,

    session_id: String,
    phase: SessionPhase,
    started_at: DateTime<Utc>,
    items_processed: u64,
    counters: PersistedCounters,
    consecutive_filtered: u32,
    consecutive_empty: u32,

    limiter: SlidingWindowLimiter,
    content_ignore: IgnoreRegistry,
    author_ignore: IgnoreRegistry,
    cursor: Option<KeywordCursor>,

    handle: SessionHandle,
}

impl SessionRunner {
    /// Validate the configuration and build a runner.
    ///
    /// Validation failures are the only errors surfaced synchronously to
    /// the control surface.
    pub fn new(
        config: MingleConfig,
        collab: Collaborators,
        clock: Arc<dyn Clock>,
        handle: SessionHandle,
    ) -> Result<Self, MingleError> {
        if let Err(errors) = validate_config(&config) {
            let rendered = errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(MingleError::Config(rendered));
        }

        let pipeline = FilterPipeline::new(
            config.filters.clone(),
            Box::new(HeuristicDetector::new()),
        );
        let limiter = SlidingWindowLimiter::new(config.session.hourly_comment_budget);
        let ignore_cap = config.filters.ignore_cap;
        let now = clock.now();

        Ok(Self {
            config,
            collab,
            clock,
            pipeline,
            session_id: uuid::Uuid::new_v4().to_string(),
            phase: SessionPhase::Stopped,
            started_at: now,
            items_processed: 0,
            counters: PersistedCounters::default(),
            consecutive_filtered: 0,
            consecutive_empty: 0,
            limiter,
            content_ignore: IgnoreRegistry::new(ignore_cap),
            author_ignore: IgnoreRegistry::new(ignore_cap),
            cursor: None,
            handle,
        })
    }

    /// Convenience constructor: wall clock, fresh handle pair.
    pub fn with_system_clock(
        config: MingleConfig,
        collab: Collaborators,
    ) -> Result<(Self, mpsc::Receiver<SessionCommand>, SessionHandle), MingleError> {
        let (handle, commands) = SessionHandle::channel();
        let runner = Self::new(config, collab, Arc::new(SystemClock), handle.clone())?;
        Ok((runner, commands, handle))
    }

    /// Spawn the session loop onto the runtime.
    pub fn spawn(
        self,
        commands: mpsc::Receiver<SessionCommand>,
    ) -> JoinHandle<StopReason> {
        tokio::spawn(self.run(commands))
    }

    /// Run the session to completion, returning why it stopped.
    pub async fn run(mut self, mut commands: mpsc::Receiver<SessionCommand>) -> StopReason {
        info!(session = %self.session_id, "session starting");
        self.set_phase(SessionPhase::Running);
        self.started_at = self.clock.now();

        if let Err(e) = self.health_sweep().await {
            error!(error = %e, "health sweep failed");
            return self.finish(StopReason::Error).await;
        }

        if let Err(e) = self.load_persisted_state().await {
            error!(error = %e, "failed to load persisted state");
            return self.finish(StopReason::Error).await;
        }

        if let Err(e) = self.align_view().await {
            error!(error = %e, "failed to reach the expected view");
            return self.finish(StopReason::Error).await;
        }

        if self.cursor.is_some() {
            self.handle.emit(SessionEvent::CampaignStarted);
        }

        let reason = self.main_loop(&mut commands).await;
        self.finish(reason).await
    }

    // ----- lifecycle ------------------------------------------------------

    async fn health_sweep(&self) -> Result<(), MingleError> {
        let mut adapters: Vec<&dyn PlatformAdapter> = vec![
            self.collab.discovery.as_ref(),
            self.collab.executor.as_ref(),
            self.collab.store.as_ref(),
        ];
        if let Some(composer) = &self.collab.composer {
            adapters.push(composer.as_ref());
        }
        for adapter in adapters {
            match adapter.health_check().await? {
                HealthStatus::Healthy => {
                    debug!(adapter = adapter.name(), "health check passed");
                }
                HealthStatus::Degraded(reason) => {
                    warn!(adapter = adapter.name(), reason, "adapter degraded, continuing");
                }
                HealthStatus::Unhealthy(reason) => {
                    return Err(MingleError::HealthCheckFailed {
                        name: adapter.name().to_string(),
                        reason,
                    });
                }
            }
        }
        Ok(())
    }

    /// Load registries, limiter window, cursor, and counters.
    ///
    /// Progress within the session always resets to zero; cumulative
    /// totals are preserved only when an active persisted cursor shows an
    /// interrupted campaign being resumed. Both halves are deliberate.
    async fn load_persisted_state(&mut self) -> Result<(), MingleError> {
        let now = self.clock.now();
        let store = &self.collab.store;

        if let Some(json) = store.get(keys::IGNORE_CONTENT).await? {
            self.content_ignore =
                IgnoreRegistry::restore_json(self.config.filters.ignore_cap, &json)?;
        }
        if let Some(json) = store.get(keys::IGNORE_AUTHORS).await? {
            self.author_ignore =
                IgnoreRegistry::restore_json(self.config.filters.ignore_cap, &json)?;
        }
        if let Some(json) = store.get(keys::LIMITER_COMMENT).await? {
            self.limiter = SlidingWindowLimiter::restore_json(
                self.config.session.hourly_comment_budget,
                &json,
                now,
            )?;
        }

        let persisted_cursor = match store.get(keys::CAMPAIGN_CURSOR).await? {
            Some(json) => Some(KeywordCursor::restore_json(&json)?),
            None => None,
        };

        let campaign_configured = !self.config.campaign.keywords.is_empty();
        let resuming = persisted_cursor.as_ref().is_some_and(KeywordCursor::is_active);

        self.cursor = match (campaign_configured, persisted_cursor) {
            (true, Some(cursor)) if cursor.is_active() => {
                info!(
                    index = cursor.current_index(),
                    keyword = cursor.current_keyword().unwrap_or_default(),
                    "resuming interrupted keyword campaign"
                );
                Some(cursor)
            }
            (true, _) => {
                let cursor = KeywordCursor::new(
                    self.config.campaign.keywords.clone(),
                    self.config.campaign.randomize,
                )?;
                self.persist(keys::CAMPAIGN_CURSOR, &cursor.snapshot_json()).await;
                Some(cursor)
            }
            (false, Some(_)) => {
                // Stale cursor from an earlier campaign config.
                let _ = store.remove(keys::CAMPAIGN_CURSOR).await;
                None
            }
            (false, None) => None,
        };

        if resuming && self.cursor.is_some() {
            if let Some(json) = store.get(keys::SESSION_COUNTERS).await? {
                self.counters = serde_json::from_str(&json).map_err(|e| {
                    MingleError::Internal(format!("invalid counters snapshot: {e}"))
                })?;
                debug!(
                    totals = self.counters.total_items_processed,
                    "cumulative totals preserved for resumed campaign"
                );
            }
        } else {
            self.counters = PersistedCounters::default();
            self.persist_counters().await;
        }

        self.items_processed = 0;
        Ok(())
    }

    /// Point discovery at the view the cursor expects, if it is not
    /// already there.
    async fn align_view(&mut self) -> Result<(), MingleError> {
        let expected = match &self.cursor {
            Some(cursor) => match cursor.current_keyword() {
                Some(keyword) => SurfaceView::Search {
                    query: keyword.to_string(),
                },
                None => SurfaceView::Feed,
            },
            None => SurfaceView::Feed,
        };
        let current = self.collab.discovery.view().await?;
        if current != expected {
            info!(from = %current, to = %expected, "navigating to expected view");
            self.collab.discovery.navigate(&expected).await?;
        }
        Ok(())
    }

    async fn finish(&mut self, reason: StopReason) -> StopReason {
        self.persist_counters().await;
        if reason != StopReason::Error
            && let Err(e) = self.collab.store.remove(keys::CAMPAIGN_CURSOR).await
        {
            warn!(error = %e, "failed to clear persisted cursor");
        }
        self.cursor = None;
        // In-memory window only; the persisted copy stays authoritative
        // for the next session's restore.
        self.limiter.clear();
        self.set_phase(SessionPhase::Stopped);
        self.handle.emit(SessionEvent::CampaignEnded(reason));
        info!(session = %self.session_id, reason = %reason, "session ended");
        reason
    }

    fn set_phase(&mut self, phase: SessionPhase) {
        if self.phase != phase {
            info!(from = %self.phase, to = %phase, "phase change");
            self.phase = phase;
            self.handle.emit(SessionEvent::PhaseChanged(phase));
        }
    }

    // ----- main loop ------------------------------------------------------

    async fn main_loop(&mut self, commands: &mut mpsc::Receiver<SessionCommand>) -> StopReason {
        loop {
            if self.drain_commands(commands) == Suspend::Stopped {
                return StopReason::Stopped;
            }
            if self.phase == SessionPhase::Paused {
                match self.wait_while_paused(commands).await {
                    Suspend::Completed => {}
                    Suspend::Stopped => return StopReason::Stopped,
                }
                continue;
            }

            // A restored cursor can already sit at a finished keyword if
            // the previous process died between persisting counters and
            // advancing. Check before discovery so the stale view is never
            // acted on.
            if let Some(reason) = self.advance_keyword_if_capped(commands).await {
                return reason;
            }

            let batch = match self.discover_with_retry(commands).await {
                Ok(batch) => batch,
                Err(Suspend::Stopped) => return StopReason::Stopped,
                Err(Suspend::Completed) => {
                    // Discovery kept failing; treated like an empty pass.
                    if let Some(reason) = self.note_exhausted_pass(commands).await {
                        return reason;
                    }
                    continue;
                }
            };

            if batch.is_empty() {
                if let Some(reason) = self.note_exhausted_pass(commands).await {
                    return reason;
                }
                continue;
            }

            let mut any_fresh = false;
            for item in &batch {
                if self.drain_commands(commands) == Suspend::Stopped {
                    return StopReason::Stopped;
                }
                if self.phase == SessionPhase::Paused {
                    match self.wait_while_paused(commands).await {
                        Suspend::Completed => {}
                        Suspend::Stopped => return StopReason::Stopped,
                    }
                }

                let verdict =
                    self.pipeline
                        .evaluate(item, &self.content_ignore, &self.author_ignore);
                match verdict {
                    Verdict::Skip(cause) => {
                        debug!(item = %item.id, ?cause, "item skipped");
                    }
                    Verdict::Reject(stage) => {
                        any_fresh = true;
                        self.consecutive_filtered += 1;
                        debug!(
                            item = %item.id,
                            stage,
                            streak = self.consecutive_filtered,
                            "item filtered"
                        );
                        if self.consecutive_filtered
                            >= self.config.session.consecutive_filtered_abort
                        {
                            info!("consecutive-filtered threshold reached");
                            return StopReason::CapReached;
                        }
                    }
                    Verdict::Accept => {
                        any_fresh = true;
                        self.consecutive_filtered = 0;
                        match self.engage(item, commands).await {
                            Some(Suspend::Stopped) => return StopReason::Stopped,
                            Some(Suspend::Completed) | None => {}
                        }
                        if self.counters.total_items_processed
                            >= self.config.session.total_item_cap
                        {
                            info!("total item cap reached");
                            return StopReason::CapReached;
                        }
                        if let Some(reason) = self.advance_keyword_if_capped(commands).await {
                            return reason;
                        }
                        match self.inter_item_delay(commands).await {
                            Suspend::Completed => {}
                            Suspend::Stopped => return StopReason::Stopped,
                        }
                    }
                }
            }

            if any_fresh {
                self.consecutive_empty = 0;
            } else if let Some(reason) = self.note_exhausted_pass(commands).await {
                return reason;
            }
        }
    }

    /// Record a pass that surfaced nothing new, ask discovery for more,
    /// and abort once the threshold saturates with every visible item
    /// already known.
    async fn note_exhausted_pass(
        &mut self,
        commands: &mut mpsc::Receiver<SessionCommand>,
    ) -> Option<StopReason> {
        self.consecutive_empty += 1;
        debug!(streak = self.consecutive_empty, "discovery pass surfaced nothing new");
        if self.consecutive_empty >= self.config.session.consecutive_empty_abort {
            info!("consecutive-empty-discovery threshold reached");
            return Some(StopReason::CapReached);
        }
        if let Err(e) = self.collab.discovery.request_more().await {
            warn!(error = %e, "request_more failed");
        }
        match self.suspend(RETRY_BACKOFF, commands).await {
            Suspend::Completed => None,
            Suspend::Stopped => Some(StopReason::Stopped),
        }
    }

    /// Discover with bounded retry and doubling backoff.
    ///
    /// `Err(Stopped)` means stop was observed during a backoff suspension;
    /// `Err(Completed)` means every attempt failed.
    async fn discover_with_retry(
        &mut self,
        commands: &mut mpsc::Receiver<SessionCommand>,
    ) -> Result<Vec<CandidateItem>, Suspend> {
        let mut backoff = RETRY_BACKOFF;
        for attempt in 1..=RETRY_ATTEMPTS {
            match self.collab.discovery.discover().await {
                Ok(batch) => return Ok(batch),
                Err(e) => {
                    warn!(error = %e, attempt, "discovery failed");
                    if attempt < RETRY_ATTEMPTS {
                        if self.suspend(backoff, commands).await == Suspend::Stopped {
                            return Err(Suspend::Stopped);
                        }
                        backoff *= 2;
                    }
                }
            }
        }
        Err(Suspend::Completed)
    }

    /// Run the decided actions for one accepted item and record outcomes.
    ///
    /// Returns `Some(Stopped)` when stop was observed while blocked on the
    /// rate limiter.
    async fn engage(
        &mut self,
        item: &CandidateItem,
        commands: &mut mpsc::Receiver<SessionCommand>,
    ) -> Option<Suspend> {
        let kinds = decide(&self.config.actions);
        let mut acted = false;

        for kind in kinds {
            if kind == ActionKind::Comment {
                match self.block_until_slot(commands).await {
                    Suspend::Completed => {}
                    Suspend::Stopped => return Some(Suspend::Stopped),
                }
            }

            let comment = if kind == ActionKind::Comment {
                match self.compose_comment(item).await {
                    Some(text) => Some(text),
                    None => continue,
                }
            } else {
                None
            };

            if self.execute_with_retry(item, kind, comment.as_deref()).await {
                acted = true;
                self.counters.action_counts.record(kind);
                if kind == ActionKind::Comment {
                    let now = self.clock.now();
                    self.limiter.record_at(now);
                    self.persist(keys::LIMITER_COMMENT, &self.limiter.snapshot_json())
                        .await;
                }
                debug!(item = %item.id, kind = %kind, "action executed");
            }
        }

        // A refused or failed item is skipped outright: no ignore-state,
        // no counter movement, no cap consumption.
        if acted {
            if self.content_ignore.insert(item.id.clone()) {
                self.persist(keys::IGNORE_CONTENT, &self.content_ignore.snapshot_json())
                    .await;
            }
            if self.author_ignore.insert(item.author_id.clone()) {
                self.persist(keys::IGNORE_AUTHORS, &self.author_ignore.snapshot_json())
                    .await;
            }
            self.items_processed += 1;
            self.counters.total_items_processed += 1;
            self.counters.per_keyword_processed += 1;
            self.persist_counters().await;
            self.handle.emit(SessionEvent::StatsUpdated(self.snapshot()));
        }
        None
    }

    /// Blocked-waiting: suspend until the comment limiter opens a slot.
    async fn block_until_slot(
        &mut self,
        commands: &mut mpsc::Receiver<SessionCommand>,
    ) -> Suspend {
        loop {
            let now = self.clock.now();
            if self.limiter.can_act_at(now) {
                return Suspend::Completed;
            }
            let wait = self.limiter.time_until_slot_at(now);
            info!(wait_secs = wait.as_secs(), "comment budget exhausted, waiting for slot");
            if self.suspend(wait, commands).await == Suspend::Stopped {
                return Suspend::Stopped;
            }
        }
    }

    async fn compose_comment(&self, item: &CandidateItem) -> Option<String> {
        let composer = match &self.collab.composer {
            Some(composer) => composer,
            None => {
                warn!("comment action decided but no composer wired, skipping");
                return None;
            }
        };
        match composer.compose(&item.text).await {
            Ok(text) => Some(text),
            Err(e) => {
                error!(error = %e, item = %item.id, "comment composition failed");
                None
            }
        }
    }

    /// Execute with bounded retry. Non-success means skip: no recording,
    /// no ignore-state.
    async fn execute_with_retry(
        &self,
        item: &CandidateItem,
        kind: ActionKind,
        comment: Option<&str>,
    ) -> bool {
        let mut backoff = RETRY_BACKOFF;
        for attempt in 1..=RETRY_ATTEMPTS {
            match self.collab.executor.execute(item, kind, comment).await {
                Ok(true) => return true,
                Ok(false) => {
                    debug!(item = %item.id, kind = %kind, "executor declined action");
                    return false;
                }
                Err(e) => {
                    warn!(error = %e, attempt, item = %item.id, "executor failed");
                    if attempt < RETRY_ATTEMPTS {
                        self.clock.sleep(backoff).await;
                        backoff *= 2;
                    }
                }
            }
        }
        false
    }

    /// Advance the cursor when the per-keyword cap is reached.
    ///
    /// State is persisted before navigation because navigating can tear
    /// down and restart the whole process.
    async fn advance_keyword_if_capped(
        &mut self,
        commands: &mut mpsc::Receiver<SessionCommand>,
    ) -> Option<StopReason> {
        let cap = self.config.campaign.per_keyword_cap;
        if self.cursor.is_none() || self.counters.per_keyword_processed < cap {
            return None;
        }

        let cyclic = self.config.campaign.cyclic;
        self.counters.per_keyword_processed = 0;

        let next = self
            .cursor
            .as_mut()
            .and_then(|cursor| cursor.advance().map(str::to_string));
        let snapshot = self
            .cursor
            .as_ref()
            .map(KeywordCursor::snapshot_json)
            .unwrap_or_default();
        match next {
            Some(keyword) => {
                self.persist(keys::CAMPAIGN_CURSOR, &snapshot).await;
                self.persist_counters().await;
                info!(keyword = %keyword, "advancing to next keyword");
                if let Err(e) = self
                    .collab
                    .discovery
                    .navigate(&SurfaceView::Search { query: keyword })
                    .await
                {
                    error!(error = %e, "navigation failed");
                    return Some(StopReason::Error);
                }
                self.consecutive_empty = 0;
                // A fresh view needs a beat before items are visible.
                match self.suspend(RETRY_BACKOFF, commands).await {
                    Suspend::Completed => None,
                    Suspend::Stopped => Some(StopReason::Stopped),
                }
            }
            None => {
                if cyclic
                    && self.counters.total_items_processed < self.config.session.total_item_cap
                {
                    let first = {
                        let cursor = self.cursor.as_mut()?;
                        cursor.restart();
                        cursor.current_keyword().unwrap_or_default().to_string()
                    };
                    let snapshot = self
                        .cursor
                        .as_ref()
                        .map(KeywordCursor::snapshot_json)
                        .unwrap_or_default();
                    self.persist(keys::CAMPAIGN_CURSOR, &snapshot).await;
                    self.persist_counters().await;
                    info!("cyclic campaign restarting at first keyword");
                    if let Err(e) = self
                        .collab
                        .discovery
                        .navigate(&SurfaceView::Search { query: first })
                        .await
                    {
                        error!(error = %e, "navigation failed");
                        return Some(StopReason::Error);
                    }
                    self.consecutive_empty = 0;
                    None
                } else {
                    info!("keyword campaign completed");
                    Some(StopReason::Completed)
                }
            }
        }
    }

    /// Randomized human-plausible pause between two items.
    async fn inter_item_delay(
        &mut self,
        commands: &mut mpsc::Receiver<SessionCommand>,
    ) -> Suspend {
        let min = self.config.session.min_delay_secs;
        let max = self.config.session.max_delay_secs;
        let secs = if max > min {
            rand::thread_rng().gen_range(min..=max)
        } else {
            min
        };
        if secs == 0 {
            return Suspend::Completed;
        }
        self.suspend(Duration::from_secs(secs), commands).await
    }

    // ----- suspension and commands ---------------------------------------

    /// Cancellable suspension. Pause does not interrupt the suspension,
    /// it only keeps the loop from starting new work afterwards; stop
    /// cancels it immediately.
    async fn suspend(
        &mut self,
        duration: Duration,
        commands: &mut mpsc::Receiver<SessionCommand>,
    ) -> Suspend {
        let clock = Arc::clone(&self.clock);
        let mut sleep = clock.sleep(duration);
        loop {
            tokio::select! {
                _ = &mut sleep => return Suspend::Completed,
                command = commands.recv() => match command {
                    Some(command) => {
                        if self.handle_command(command) == Suspend::Stopped {
                            return Suspend::Stopped;
                        }
                    }
                    // Control surface hung up; treat as stop.
                    None => return Suspend::Stopped,
                },
            }
        }
    }

    /// Handle every command already queued, without blocking.
    fn drain_commands(&mut self, commands: &mut mpsc::Receiver<SessionCommand>) -> Suspend {
        loop {
            match commands.try_recv() {
                Ok(command) => {
                    if self.handle_command(command) == Suspend::Stopped {
                        return Suspend::Stopped;
                    }
                }
                Err(mpsc::error::TryRecvError::Empty) => return Suspend::Completed,
                Err(mpsc::error::TryRecvError::Disconnected) => return Suspend::Stopped,
            }
        }
    }

    /// Block until resumed or stopped.
    async fn wait_while_paused(
        &mut self,
        commands: &mut mpsc::Receiver<SessionCommand>,
    ) -> Suspend {
        while self.phase == SessionPhase::Paused {
            match commands.recv().await {
                Some(command) => {
                    if self.handle_command(command) == Suspend::Stopped {
                        return Suspend::Stopped;
                    }
                }
                None => return Suspend::Stopped,
            }
        }
        Suspend::Completed
    }

    fn handle_command(&mut self, command: SessionCommand) -> Suspend {
        match command {
            SessionCommand::Pause => {
                self.set_phase(SessionPhase::Paused);
                Suspend::Completed
            }
            SessionCommand::Resume => {
                self.set_phase(SessionPhase::Running);
                Suspend::Completed
            }
            SessionCommand::Stop => Suspend::Stopped,
            SessionCommand::Status { reply } => {
                let _ = reply.send(self.snapshot());
                Suspend::Completed
            }
        }
    }

    // ----- persistence and status ----------------------------------------

    /// Persist one key, downgrading failure to a log line: in-memory state
    /// stays authoritative for the rest of the live process.
    async fn persist(&self, key: &str, value: &str) {
        if let Err(e) = self.collab.store.set(key, value).await {
            error!(error = %e, key, "persistence failed, continuing with in-memory state");
        }
    }

    async fn persist_counters(&self) {
        let json = serde_json::to_string(&self.counters)
            .unwrap_or_else(|_| "{}".to_string());
        self.persist(keys::SESSION_COUNTERS, &json).await;
    }

    /// Serialized view of the current state.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            session_id: self.session_id.clone(),
            phase: self.phase,
            items_processed: self.items_processed,
            total_items_processed: self.counters.total_items_processed,
            action_counts: self.counters.action_counts,
            consecutive_filtered: self.consecutive_filtered,
            consecutive_empty_discovery: self.consecutive_empty,
            cursor: self.cursor.as_ref().map(KeywordCursor::status_snapshot),
            started_at: self.started_at,
        }
    }
}
