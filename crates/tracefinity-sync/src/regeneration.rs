//! Debounced, cancellable regeneration of printable assets.
//!
//! Every committed change requests a regeneration. Requests are debounced;
//! when one fires it is skipped if the bin has no tools or if its fingerprint
//! matches the last generated state. Otherwise any in-flight generation is
//! cancelled and a new one started. Only the newest request may publish to the
//! output channel, so a slow stale response can never replace a newer result.

use std::collections::hash_map::DefaultHasher;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use tracefinity_core::model::{BinConfig, GenerateResponse, PlacedTool, TextLabel};
use tracefinity_core::store::RegenerationService;
use tracefinity_core::{CancellationToken, RegenerationError};
use tracefinity_designer::SmoothingTable;

use crate::scheduler::Debouncer;

/// Hash of everything that affects the generated solid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint(u64);

#[derive(Serialize)]
struct FingerprintInput<'a> {
    placed_tools: &'a [PlacedTool],
    config: &'a BinConfig,
    text_labels: &'a [TextLabel],
    smoothing: BTreeMap<&'a str, Option<f64>>,
}

impl Fingerprint {
    /// Fingerprint a bin. Only the smoothing state of tools that are placed counts.
    pub fn compute(
        config: &BinConfig,
        placed_tools: &[PlacedTool],
        text_labels: &[TextLabel],
        smoothing: &SmoothingTable,
    ) -> serde_json::Result<Self> {
        let input = FingerprintInput {
            placed_tools,
            config,
            text_labels,
            smoothing: placed_tools
                .iter()
                .map(|t| (t.tool_id.as_str(), smoothing.render_level(&t.tool_id)))
                .collect(),
        };
        let bytes = serde_json::to_vec(&input)?;
        let mut hasher = DefaultHasher::new();
        bytes.hash(&mut hasher);
        Ok(Fingerprint(hasher.finish()))
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// What the preview currently shows.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RegenerationOutput {
    #[default]
    Idle,
    Generating,
    Ready(GenerateResponse),
    Failed(String),
}

impl RegenerationOutput {
    pub fn is_generating(&self) -> bool {
        matches!(self, RegenerationOutput::Generating)
    }
}

/// Why a fired request did or did not reach the service.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    SkippedEmpty,
    SkippedUnchanged,
    Published,
    Failed,
    Discarded,
}

struct Inner {
    bin_id: String,
    service: Arc<dyn RegenerationService>,
    last: Mutex<Option<Fingerprint>>,
    in_flight: Mutex<Option<(u64, CancellationToken)>>,
    next_request: AtomicU64,
    output: watch::Sender<RegenerationOutput>,
}

impl Inner {
    async fn run(&self, fingerprint: Fingerprint, tool_count: usize) -> RunOutcome {
        if tool_count == 0 {
            debug!("Regeneration skipped: bin {} has no tools", self.bin_id);
            return RunOutcome::SkippedEmpty;
        }
        {
            let mut last = self.last.lock();
            if *last == Some(fingerprint) {
                debug!("Regeneration skipped: {} unchanged", fingerprint);
                return RunOutcome::SkippedUnchanged;
            }
            *last = Some(fingerprint);
        }

        let request = self.next_request.fetch_add(1, Ordering::SeqCst) + 1;
        let token = CancellationToken::new();
        if let Some((previous, old)) = self.in_flight.lock().replace((request, token.clone())) {
            debug!("Cancelling regeneration request {}", previous);
            old.cancel();
        }
        self.output.send_replace(RegenerationOutput::Generating);

        let result = tokio::select! {
            result = self.service.generate_stl(&self.bin_id, token.clone()) => result,
            _ = token.cancelled() => Err(RegenerationError::Cancelled),
        };

        {
            let mut in_flight = self.in_flight.lock();
            let is_current = matches!(in_flight.as_ref(), Some((current, _)) if *current == request);
            if !is_current {
                debug!("Discarding stale regeneration request {}", request);
                return RunOutcome::Discarded;
            }
            *in_flight = None;
        }

        match result {
            Ok(response) => {
                info!(
                    "Regenerated bin {} ({} part(s))",
                    self.bin_id,
                    response.split_count.unwrap_or(1)
                );
                self.output.send_replace(RegenerationOutput::Ready(response));
                RunOutcome::Published
            }
            Err(e) if e.is_cancelled() => RunOutcome::Discarded,
            Err(e) => {
                warn!("Regeneration of bin {} failed: {}", self.bin_id, e);
                // allow the next request for the same state to retry
                {
                    let mut last = self.last.lock();
                    if *last == Some(fingerprint) {
                        *last = None;
                    }
                }
                self.output.send_replace(RegenerationOutput::Failed(e.to_string()));
                RunOutcome::Failed
            }
        }
    }
}

/// Coalescing front end to a [`RegenerationService`] for one bin.
pub struct RegenerationPipeline {
    inner: Arc<Inner>,
    debouncer: Debouncer,
}

impl RegenerationPipeline {
    pub fn new(bin_id: impl Into<String>, service: Arc<dyn RegenerationService>, delay: Duration) -> Self {
        let (tx, _rx) = watch::channel(RegenerationOutput::Idle);
        Self {
            inner: Arc::new(Inner {
                bin_id: bin_id.into(),
                service,
                last: Mutex::new(None),
                in_flight: Mutex::new(None),
                next_request: AtomicU64::new(0),
                output: tx,
            }),
            debouncer: Debouncer::new("regenerate", delay),
        }
    }

    /// Request regeneration of the state described by `fingerprint` after the quiet period.
    pub fn request(&self, fingerprint: Fingerprint, tool_count: usize) {
        let inner = Arc::clone(&self.inner);
        self.debouncer.schedule(async move {
            inner.run(fingerprint, tool_count).await;
        });
    }

    /// Drop any pending request and run this one now.
    pub async fn run_now(&self, fingerprint: Fingerprint, tool_count: usize) -> RunOutcome {
        self.debouncer.cancel();
        self.inner.run(fingerprint, tool_count).await
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn is_generating(&self) -> bool {
        self.inner.in_flight.lock().is_some()
    }

    pub fn last_fingerprint(&self) -> Option<Fingerprint> {
        *self.inner.last.lock()
    }

    pub fn output(&self) -> RegenerationOutput {
        self.inner.output.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<RegenerationOutput> {
        self.inner.output.subscribe()
    }

    /// Drop pending work and cancel the in-flight request.
    pub fn shutdown(&self) {
        self.debouncer.cancel();
        if let Some((request, token)) = self.inner.in_flight.lock().take() {
            debug!("Cancelling regeneration request {} on shutdown", request);
            token.cancel();
        }
    }
}

impl fmt::Debug for RegenerationPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegenerationPipeline")
            .field("bin_id", &self.inner.bin_id)
            .field("pending", &self.is_pending())
            .field("generating", &self.is_generating())
            .finish()
    }
}
