//! Debounced writes of committed editor state.

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{info, warn};

use tracefinity_core::Result;

use crate::scheduler::Debouncer;

/// Outcome of the most recent write, for a save indicator.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SaveStatus {
    #[default]
    Idle,
    Saving,
    Saved,
    Failed(String),
}

impl fmt::Display for SaveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveStatus::Idle => write!(f, "idle"),
            SaveStatus::Saving => write!(f, "saving"),
            SaveStatus::Saved => write!(f, "saved"),
            SaveStatus::Failed(message) => write!(f, "failed: {}", message),
        }
    }
}

/// Coalesces bursts of edits into one write per quiet period.
///
/// Each scheduled write carries the full state to persist, so a newer write
/// simply replaces a pending older one. Failures are reported through the
/// status channel; the caller's in-memory state is never touched.
pub struct SaveCoalescer {
    debouncer: Debouncer,
    status: Arc<watch::Sender<SaveStatus>>,
}

impl SaveCoalescer {
    pub fn new(delay: Duration) -> Self {
        let (tx, _rx) = watch::channel(SaveStatus::Idle);
        Self {
            debouncer: Debouncer::new("save", delay),
            status: Arc::new(tx),
        }
    }

    /// Schedule `write`, replacing any write still waiting for its delay.
    pub fn schedule<F>(&self, label: impl Into<String>, write: F)
    where
        F: Future<Output = Result<()>> + Send + 'static,
    {
        let status = Arc::clone(&self.status);
        let label = label.into();
        self.debouncer.schedule(async move {
            status.send_replace(SaveStatus::Saving);
            match write.await {
                Ok(()) => {
                    info!("Saved {}", label);
                    status.send_replace(SaveStatus::Saved);
                }
                Err(e) => {
                    warn!("Failed to save {}: {}", label, e);
                    status.send_replace(SaveStatus::Failed(e.to_string()));
                }
            }
        });
    }

    /// Write a pending save immediately. Used on teardown.
    pub async fn flush(&self) -> bool {
        self.debouncer.flush().await
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn status(&self) -> SaveStatus {
        self.status.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SaveStatus> {
        self.status.subscribe()
    }
}

impl fmt::Debug for SaveCoalescer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SaveCoalescer")
            .field("pending", &self.is_pending())
            .field("status", &self.status())
            .finish()
    }
}
