//! Trailing-edge debounce of async work.
//!
//! A [`Debouncer`] holds at most one pending task. Scheduling replaces the
//! pending task and restarts the delay; once the delay elapses the task runs
//! to completion on the runtime and can no longer be replaced, only superseded
//! by the next one. [`Debouncer::flush`] waits for a task that has already
//! started before running the pending one.

use parking_lot::Mutex;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Boxed unit of deferred work.
pub type Task = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

#[derive(Default)]
struct Slot {
    generation: u64,
    task: Option<Task>,
    timer: Option<JoinHandle<()>>,
    running: Option<JoinHandle<()>>,
}

impl Slot {
    /// Invalidate the pending task and stop its timer.
    fn take(&mut self) -> Option<Task> {
        self.generation += 1;
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
        self.task.take()
    }
}

/// Debounced scheduler for one kind of work.
pub struct Debouncer {
    name: &'static str,
    delay: Duration,
    slot: Arc<Mutex<Slot>>,
}

impl Debouncer {
    pub fn new(name: &'static str, delay: Duration) -> Self {
        Self {
            name,
            delay,
            slot: Arc::new(Mutex::new(Slot::default())),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Run `task` once `delay` has passed without another call to `schedule`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let mut slot = self.slot.lock();
        if slot.take().is_some() {
            debug!("{}: pending task replaced", self.name);
        }
        let generation = slot.generation;
        slot.task = Some(Box::pin(task));

        let shared = Arc::clone(&self.slot);
        let delay = self.delay;
        let name = self.name;
        slot.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let task = {
                let mut slot = shared.lock();
                if slot.generation != generation {
                    return;
                }
                slot.running = slot.timer.take();
                slot.task.take()
            };
            if let Some(task) = task {
                debug!("{}: running debounced task", name);
                task.await;
            }
        }));
    }

    /// Run the pending task now, if any. Returns whether one ran.
    ///
    /// A task whose delay already elapsed is awaited first, so writes land in order.
    pub async fn flush(&self) -> bool {
        let (task, running) = {
            let mut slot = self.slot.lock();
            (slot.take(), slot.running.take())
        };
        if let Some(running) = running {
            if !running.is_finished() {
                debug!("{}: waiting for running task", self.name);
            }
            if let Err(e) = running.await {
                warn!("{}: running task did not complete: {}", self.name, e);
            }
        }
        match task {
            Some(task) => {
                debug!("{}: flushing pending task", self.name);
                task.await;
                true
            }
            None => false,
        }
    }

    /// Drop the pending task without running it. Returns whether one was pending.
    pub fn cancel(&self) -> bool {
        self.slot.lock().take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.slot.lock().task.is_some()
    }

    /// Whether a task whose delay elapsed is still executing.
    pub fn is_running(&self) -> bool {
        self.slot
            .lock()
            .running
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        if let Some(timer) = self.slot.lock().timer.take() {
            timer.abort();
        }
    }
}

impl std::fmt::Debug for Debouncer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Debouncer")
            .field("name", &self.name)
            .field("delay", &self.delay)
            .field("pending", &self.is_pending())
            .finish()
    }
}
