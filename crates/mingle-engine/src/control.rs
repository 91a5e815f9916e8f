// SPDX-FileCopyrightText: 2026 Mingle Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Control-surface message contract.
//!
//! The control surface never touches scheduler state directly: commands
//! travel over an mpsc channel, events come back over a broadcast channel,
//! and status is a request/response pair carrying a serialized snapshot.

use mingle_core::{MingleError, SessionPhase, SessionSnapshot, StopReason};
use tokio::sync::{broadcast, mpsc, oneshot};

/// Capacity of the command and event channels.
const CHANNEL_CAPACITY: usize = 64;

/// Commands accepted by a running session.
#[derive(Debug)]
pub enum SessionCommand {
    /// Stop pulling new items; the loop stays alive and responsive.
    Pause,
    /// Resume a paused session.
    Resume,
    /// Terminate the session at the next suspension boundary.
    Stop,
    /// Request a state snapshot.
    Status {
        reply: oneshot::Sender<SessionSnapshot>,
    },
}

/// Events emitted by the scheduler.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// The session phase changed.
    PhaseChanged(SessionPhase),
    /// Counters changed; carries the full snapshot.
    StatsUpdated(SessionSnapshot),
    /// A keyword campaign began.
    CampaignStarted,
    /// The session ended, with the reason.
    CampaignEnded(StopReason),
}

/// Control-surface side of a session's channels.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    commands: mpsc::Sender<SessionCommand>,
    events: broadcast::Sender<SessionEvent>,
}

impl SessionHandle {
    /// Create a handle pair: the handle for the control surface and the
    /// receiver end the scheduler loop consumes.
    pub fn channel() -> (Self, mpsc::Receiver<SessionCommand>) {
        let (commands, command_rx) = mpsc::channel(CHANNEL_CAPACITY);
        let (events, _) = broadcast::channel(CHANNEL_CAPACITY);
        (Self { commands, events }, command_rx)
    }

    /// Subscribe to scheduler events.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Emit an event. Lagging or absent subscribers are not an error.
    pub fn emit(&self, event: SessionEvent) {
        let _ = self.events.send(event);
    }

    pub async fn pause(&self) -> Result<(), MingleError> {
        self.send(SessionCommand::Pause).await
    }

    pub async fn resume(&self) -> Result<(), MingleError> {
        self.send(SessionCommand::Resume).await
    }

    pub async fn stop(&self) -> Result<(), MingleError> {
        self.send(SessionCommand::Stop).await
    }

    /// Request a snapshot from the running session.
    pub async fn status(&self) -> Result<SessionSnapshot, MingleError> {
        let (reply, response) = oneshot::channel();
        self.send(SessionCommand::Status { reply }).await?;
        response
            .await
            .map_err(|_| MingleError::Internal("session ended before replying".into()))
    }

    async fn send(&self, command: SessionCommand) -> Result<(), MingleError> {
        self.commands
            .send(command)
            .await
            .map_err(|_| MingleError::Internal("session is not running".into()))
    }
}
