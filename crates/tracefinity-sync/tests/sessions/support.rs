use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use tracefinity_core::model::{BinConfig, BinData, GenerateResponse, Point, Tool, ToolPatch};
use tracefinity_core::store::{RegenerationService, ToolStore};
use tracefinity_core::{CancellationToken, MemoryStore, RegenerationError};

/// Regeneration service that answers after a fixed delay.
pub struct FakeService {
    pub delay: Duration,
    pub fail: bool,
    calls: AtomicUsize,
}

impl FakeService {
    pub fn new(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            delay,
            fail: false,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            delay,
            fail: true,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RegenerationService for FakeService {
    async fn generate_stl(
        &self,
        bin_id: &str,
        _cancel: CancellationToken,
    ) -> Result<GenerateResponse, RegenerationError> {
        // Deliberately ignores the token: the pipeline must still drop stale answers.
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(self.delay).await;
        if self.fail {
            return Err(RegenerationError::Failed {
                message: "mesh boolean failed".into(),
            });
        }
        Ok(GenerateResponse {
            stl_url: format!("/files/{}/{}.stl", bin_id, call),
            ..GenerateResponse::default()
        })
    }
}

/// Tool store whose writes take `delay` to land.
pub struct SlowToolStore {
    pub inner: Arc<MemoryStore>,
    pub delay: Duration,
}

#[async_trait]
impl ToolStore for SlowToolStore {
    async fn get_tool(&self, id: &str) -> tracefinity_core::Result<Tool> {
        self.inner.get_tool(id).await
    }

    async fn list_tools(&self) -> tracefinity_core::Result<Vec<Tool>> {
        self.inner.list_tools().await
    }

    async fn update_tool(&self, id: &str, patch: ToolPatch) -> tracefinity_core::Result<Tool> {
        tokio::time::sleep(self.delay).await;
        self.inner.update_tool(id, patch).await
    }

    async fn delete_tool(&self, id: &str) -> tracefinity_core::Result<()> {
        self.inner.delete_tool(id).await
    }
}

pub fn rect_tool(id: &str, w: f64, h: f64) -> Tool {
    Tool::new(
        id,
        format!("Tool {}", id),
        vec![
            Point::new(0.0, 0.0),
            Point::new(w, 0.0),
            Point::new(w, h),
            Point::new(0.0, h),
        ],
    )
}

/// Store holding one 2x2 bin "b1" and two library tools.
pub fn seeded_store() -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::new());
    store.insert_tool(rect_tool("t1", 20.0, 10.0));
    store.insert_tool(rect_tool("t2", 80.0, 30.0));
    store.insert_bin(BinData::new("b1", Some("Drawer".into()), BinConfig::default()));
    store
}

pub async fn settle(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}
