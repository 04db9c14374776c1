//! Session link objects.
//!
//! Each session owns two outbound command sinks: the upstream link
//! toward the client device (target protocol) and the downstream link
//! toward the backend server (origin protocol). Both are ordered
//! asynchronous channels; the upstream link additionally offers an
//! immediate variant that bypasses batching for latency-sensitive
//! commands.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc;

use causeway_protocol::{OriginCommand, TargetCommand};

/// One item on the upstream channel. `Immediate` entries bypass any
/// batching the transport applies to `Queued` entries; ordering within
/// the channel is preserved either way.
#[derive(Debug, Clone, PartialEq)]
pub enum Outbound {
    Queued(TargetCommand),
    Immediate(TargetCommand),
}

impl Outbound {
    pub fn command(&self) -> &TargetCommand {
        match self {
            Self::Queued(command) | Self::Immediate(command) => command,
        }
    }
}

/// Upstream sink toward the connected client device.
#[derive(Clone)]
pub struct TargetLink {
    tx: mpsc::UnboundedSender<Outbound>,
    /// Set once the transport handshake has completed; player-list
    /// refreshes are suppressed until then.
    initialized: Arc<AtomicBool>,
}

impl TargetLink {
    /// Create a link and the receiver half consumed by the transport.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Outbound>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                tx,
                initialized: Arc::new(AtomicBool::new(false)),
            },
            rx,
        )
    }

    /// Enqueue a command for batched delivery.
    pub fn send(&self, command: TargetCommand) {
        if self.tx.send(Outbound::Queued(command)).is_err() {
            tracing::warn!("Upstream link closed, dropping command");
        }
    }

    /// Enqueue a command flagged to bypass batching.
    pub fn send_immediately(&self, command: TargetCommand) {
        if self.tx.send(Outbound::Immediate(command)).is_err() {
            tracing::warn!("Upstream link closed, dropping immediate command");
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    pub fn mark_initialized(&self) {
        self.initialized.store(true, Ordering::Release);
    }
}

/// Downstream sink toward the backend game server.
#[derive(Clone)]
pub struct OriginLink {
    tx: mpsc::UnboundedSender<OriginCommand>,
}

impl OriginLink {
    /// Create a link and the receiver half consumed by the transport.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<OriginCommand>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Enqueue a command toward the backend server.
    pub fn send(&self, command: OriginCommand) {
        if self.tx.send(command).is_err() {
            tracing::warn!("Downstream link closed, dropping command");
        }
    }
}
