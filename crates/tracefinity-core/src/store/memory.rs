//! In-process store used by tests and the CLI.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::debug;
use uuid::Uuid;

use super::{BinStore, ToolStore};
use crate::error::{Result, StoreError};
use crate::model::{BinConfig, BinData, BinPatch, NewBin, PlacedTool, Tool, ToolPatch};

/// Tool library and bin store backed by hash maps.
#[derive(Default)]
pub struct MemoryStore {
    tools: RwLock<HashMap<String, Tool>>,
    bins: RwLock<HashMap<String, BinData>>,
    bin_writes: AtomicUsize,
    tool_writes: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_tool(&self, tool: Tool) {
        self.tools.write().insert(tool.id.clone(), tool);
    }

    pub fn insert_bin(&self, bin: BinData) {
        self.bins.write().insert(bin.id.clone(), bin);
    }

    /// Snapshot of a stored bin without going through the async interface.
    pub fn bin(&self, id: &str) -> Option<BinData> {
        self.bins.read().get(id).cloned()
    }

    pub fn tool(&self, id: &str) -> Option<Tool> {
        self.tools.read().get(id).cloned()
    }

    /// Number of `update_bin` calls served so far.
    pub fn bin_write_count(&self) -> usize {
        self.bin_writes.load(Ordering::SeqCst)
    }

    /// Number of `update_tool` calls served so far.
    pub fn tool_write_count(&self) -> usize {
        self.tool_writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ToolStore for MemoryStore {
    async fn get_tool(&self, id: &str) -> Result<Tool> {
        self.tool(id)
            .ok_or_else(|| StoreError::tool_not_found(id).into())
    }

    async fn list_tools(&self) -> Result<Vec<Tool>> {
        let mut tools: Vec<Tool> = self.tools.read().values().cloned().collect();
        tools.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(tools)
    }

    async fn update_tool(&self, id: &str, patch: ToolPatch) -> Result<Tool> {
        let mut tools = self.tools.write();
        let tool = tools
            .get_mut(id)
            .ok_or_else(|| StoreError::tool_not_found(id))?;
        tool.apply_patch(&patch);
        self.tool_writes.fetch_add(1, Ordering::SeqCst);
        debug!("Updated tool {}", id);
        Ok(tool.clone())
    }

    async fn delete_tool(&self, id: &str) -> Result<()> {
        self.tools
            .write()
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::tool_not_found(id).into())
    }
}

#[async_trait]
impl BinStore for MemoryStore {
    async fn get_bin(&self, id: &str) -> Result<BinData> {
        self.bin(id)
            .ok_or_else(|| StoreError::bin_not_found(id).into())
    }

    async fn update_bin(&self, id: &str, patch: BinPatch) -> Result<BinData> {
        let mut bins = self.bins.write();
        let bin = bins.get_mut(id).ok_or_else(|| StoreError::bin_not_found(id))?;
        bin.apply_patch(&patch);
        self.bin_writes.fetch_add(1, Ordering::SeqCst);
        debug!("Updated bin {}", id);
        Ok(bin.clone())
    }

    async fn create_bin(&self, request: NewBin) -> Result<BinData> {
        let config = request.bin_config.unwrap_or_else(BinConfig::default);
        let mut bin = BinData::new(Uuid::new_v4().to_string(), Some(request.name), config);
        if let Some(tool_ids) = request.tool_ids {
            let tools = self.tools.read();
            for tool_id in tool_ids {
                let tool = tools
                    .get(&tool_id)
                    .ok_or_else(|| StoreError::tool_not_found(&tool_id))?;
                bin.placed_tools
                    .push(PlacedTool::from_tool(tool, Uuid::new_v4().to_string()));
            }
        }
        self.insert_bin(bin.clone());
        Ok(bin)
    }

    async fn delete_bin(&self, id: &str) -> Result<()> {
        self.bins
            .write()
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::bin_not_found(id).into())
    }
}
