//! Editing sessions: an editor bound to its stores and background pipelines.
//!
//! The owner drives the editor directly and calls `sync()` after each batch
//! of input. A session notices committed changes by comparing the editor's
//! revision (and, for bins, the configuration and name) with what it last
//! handed to the save coalescer.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use tracefinity_core::constants::{
    DEFAULT_HISTORY_DEPTH, REGENERATE_DEBOUNCE_MS, SAVE_DEBOUNCE_MS, SMOOTH_LEVEL_DEBOUNCE_MS,
};
use tracefinity_core::model::{BinConfig, BinData, BinPatch, Tool, ToolPatch};
use tracefinity_core::store::{BinStore, RegenerationService, ToolStore};
use tracefinity_core::{ModelError, Result};
use tracefinity_designer::{
    render_bin_svg, BinEditor, BinSnapshot, History, Placement, SmoothingTable, Snapper,
    ToolEditor,
};

use crate::persistence::{SaveCoalescer, SaveStatus};
use crate::regeneration::{Fingerprint, RegenerationOutput, RegenerationPipeline};
use crate::scheduler::Debouncer;

/// Timing and editor options for a session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionOptions {
    pub save_delay: Duration,
    pub regenerate_delay: Duration,
    pub smooth_level_delay: Duration,
    pub snapper: Snapper,
    pub history_depth: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            save_delay: Duration::from_millis(SAVE_DEBOUNCE_MS),
            regenerate_delay: Duration::from_millis(REGENERATE_DEBOUNCE_MS),
            smooth_level_delay: Duration::from_millis(SMOOTH_LEVEL_DEBOUNCE_MS),
            snapper: Snapper::default(),
            history_depth: DEFAULT_HISTORY_DEPTH,
        }
    }
}

/// A bin layout being edited.
pub struct BinSession {
    bin_id: String,
    name: Option<String>,
    bin_store: Arc<dyn BinStore>,
    tool_store: Arc<dyn ToolStore>,
    editor: BinEditor,
    library: Vec<Tool>,
    smoothing: SmoothingTable,
    saver: SaveCoalescer,
    regeneration: RegenerationPipeline,
    level_writers: HashMap<String, Debouncer>,
    smooth_level_delay: Duration,
    synced_revision: u64,
    synced_config: BinConfig,
    synced_name: Option<String>,
}

impl BinSession {
    /// Fetch the bin and the tool library, then request the first regeneration.
    pub async fn load(
        bin_store: Arc<dyn BinStore>,
        tool_store: Arc<dyn ToolStore>,
        service: Arc<dyn RegenerationService>,
        bin_id: &str,
        options: SessionOptions,
    ) -> Result<Self> {
        let bin = bin_store.get_bin(bin_id).await?;
        let library = tool_store.list_tools().await?;
        let smoothing = SmoothingTable::from_tools(&library);

        let editor = BinEditor::with_options(
            bin.bin_config.clone(),
            BinSnapshot {
                placed_tools: bin.placed_tools,
                text_labels: bin.text_labels,
            },
            options.snapper,
            History::new(options.history_depth),
        );

        info!(
            "Loaded bin {} ({} tool(s), {} label(s))",
            bin.id,
            editor.placed_tools().len(),
            editor.text_labels().len()
        );

        let session = Self {
            regeneration: RegenerationPipeline::new(
                bin.id.clone(),
                service,
                options.regenerate_delay,
            ),
            saver: SaveCoalescer::new(options.save_delay),
            synced_revision: editor.revision(),
            synced_config: bin.bin_config,
            synced_name: bin.name.clone(),
            bin_id: bin.id,
            name: bin.name,
            bin_store,
            tool_store,
            editor,
            library,
            smoothing,
            level_writers: HashMap::new(),
            smooth_level_delay: options.smooth_level_delay,
        };
        session.request_regeneration()?;
        Ok(session)
    }

    pub fn bin_id(&self) -> &str {
        &self.bin_id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn editor(&self) -> &BinEditor {
        &self.editor
    }

    /// Mutable editor access for input dispatch. Call [`BinSession::sync`] afterwards.
    pub fn editor_mut(&mut self) -> &mut BinEditor {
        &mut self.editor
    }

    pub fn library(&self) -> &[Tool] {
        &self.library
    }

    pub fn smoothing(&self) -> &SmoothingTable {
        &self.smoothing
    }

    /// Schedule a save and a regeneration if anything was committed since the last sync.
    pub fn sync(&mut self) -> Result<bool> {
        let dirty = self.editor.revision() != self.synced_revision
            || self.editor.config() != &self.synced_config
            || self.name != self.synced_name;
        if !dirty {
            return Ok(false);
        }

        self.synced_revision = self.editor.revision();
        self.synced_config = self.editor.config().clone();
        self.synced_name = self.name.clone();

        let patch = BinPatch {
            name: self.name.clone(),
            bin_config: Some(self.editor.config().clone()),
            placed_tools: Some(self.editor.committed().placed_tools.clone()),
            text_labels: Some(self.editor.committed().text_labels.clone()),
        };
        let store = Arc::clone(&self.bin_store);
        let bin_id = self.bin_id.clone();
        debug!("Scheduling save of bin {} at revision {}", bin_id, self.synced_revision);
        self.saver.schedule(format!("bin {}", bin_id), async move {
            store.update_bin(&bin_id, patch).await.map(|_| ())
        });

        self.request_regeneration()?;
        Ok(true)
    }

    /// Fingerprint of the committed state as the regeneration service would see it.
    pub fn fingerprint(&self) -> Result<Fingerprint> {
        let committed = self.editor.committed();
        Ok(Fingerprint::compute(
            self.editor.config(),
            &committed.placed_tools,
            &committed.text_labels,
            &self.smoothing,
        )?)
    }

    fn request_regeneration(&self) -> Result<()> {
        let fingerprint = self.fingerprint()?;
        self.regeneration
            .request(fingerprint, self.editor.committed().placed_tools.len());
        Ok(())
    }

    /// Place a copy of a library tool, growing the grid if needed.
    pub fn insert_tool(&mut self, tool_id: &str) -> Result<Placement> {
        let tool = self
            .library
            .iter()
            .find(|t| t.id == tool_id)
            .cloned()
            .ok_or_else(|| ModelError::UnknownId {
                kind: "tool",
                id: tool_id.to_string(),
            })?;
        tool.outline.validate()?;
        let placement = self.editor.insert_tool(&tool);
        if placement.grew(&self.synced_config) {
            info!(
                "Bin {} grew to {}x{} for {}",
                self.bin_id, placement.grid_x, placement.grid_y, tool.name
            );
        }
        self.sync()?;
        Ok(placement)
    }

    pub fn set_config(&mut self, config: BinConfig) -> Result<bool> {
        self.editor.set_config(config);
        self.sync()
    }

    pub fn rename(&mut self, name: impl Into<String>) -> Result<bool> {
        self.name = Some(name.into());
        self.sync()
    }

    /// Flip a library tool's smoothing flag and write it through immediately.
    pub async fn toggle_smoothed(&mut self, tool_id: &str) -> Result<bool> {
        let smoothed = !self.smoothing.is_smoothed(tool_id);
        let patch = ToolPatch {
            smoothed: Some(smoothed),
            ..ToolPatch::default()
        };
        let updated = self.tool_store.update_tool(tool_id, patch).await?;
        self.smoothing.set_smoothed(tool_id, smoothed);
        self.replace_library_tool(updated);
        debug!("Tool {} smoothed = {}", tool_id, smoothed);
        self.request_regeneration()?;
        Ok(smoothed)
    }

    /// Change a library tool's smoothing level locally; the store write is debounced.
    pub fn set_smooth_level(&mut self, tool_id: &str, level: f64) -> Result<()> {
        self.smoothing.set_level(tool_id, level);
        let level = self.smoothing.level(tool_id);

        let store = Arc::clone(&self.tool_store);
        let id = tool_id.to_string();
        let delay = self.smooth_level_delay;
        self.level_writers
            .entry(id.clone())
            .or_insert_with(|| Debouncer::new("smooth-level", delay))
            .schedule(async move {
                let patch = ToolPatch {
                    smooth_level: Some(level),
                    ..ToolPatch::default()
                };
                match store.update_tool(&id, patch).await {
                    Ok(_) => debug!("Wrote smooth level {} for tool {}", level, id),
                    Err(e) => warn!("Failed to write smooth level for tool {}: {}", id, e),
                }
            });

        if self.smoothing.is_smoothed(tool_id) {
            self.request_regeneration()?;
        }
        Ok(())
    }

    fn replace_library_tool(&mut self, tool: Tool) {
        match self.library.iter_mut().find(|t| t.id == tool.id) {
            Some(existing) => *existing = tool,
            None => self.library.push(tool),
        }
    }

    /// Re-read the tool library and re-sync placements with it.
    pub async fn refresh_library(&mut self) -> Result<bool> {
        let library = self.tool_store.list_tools().await?;
        self.smoothing = SmoothingTable::from_tools(&library);
        self.library = library;
        let changed = self.editor.sync_with_library(&self.library);
        if changed {
            info!("Bin {} re-synced with the tool library", self.bin_id);
        }
        // smoothing may differ even when no placement moved
        if !self.sync()? {
            self.request_regeneration()?;
        }
        Ok(changed)
    }

    /// The committed layout as a stored bin.
    pub fn to_bin_data(&self) -> BinData {
        let mut bin = BinData::new(self.bin_id.clone(), self.name.clone(), self.editor.config().clone());
        bin.placed_tools = self.editor.committed().placed_tools.clone();
        bin.text_labels = self.editor.committed().text_labels.clone();
        bin.created_at = None;
        bin
    }

    pub fn render_svg(&self) -> String {
        render_bin_svg(&self.to_bin_data(), &self.smoothing)
    }

    pub fn save_status(&self) -> SaveStatus {
        self.saver.status()
    }

    pub fn saver(&self) -> &SaveCoalescer {
        &self.saver
    }

    pub fn regeneration(&self) -> &RegenerationPipeline {
        &self.regeneration
    }

    pub fn regeneration_output(&self) -> RegenerationOutput {
        self.regeneration.output()
    }

    /// Flush pending writes and stop regeneration.
    pub async fn close(mut self) -> Result<SaveStatus> {
        self.sync()?;
        self.saver.flush().await;
        for writer in self.level_writers.values() {
            writer.flush().await;
        }
        self.regeneration.shutdown();
        info!("Closed bin {}", self.bin_id);
        Ok(self.saver.status())
    }
}

impl std::fmt::Debug for BinSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BinSession")
            .field("bin_id", &self.bin_id)
            .field("revision", &self.editor.revision())
            .field("saver", &self.saver)
            .field("regeneration", &self.regeneration)
            .finish()
    }
}

/// A library tool's outline being edited.
pub struct ToolSession {
    tool_id: String,
    name: String,
    store: Arc<dyn ToolStore>,
    editor: ToolEditor,
    saver: SaveCoalescer,
    synced_revision: u64,
    synced_name: String,
}

impl ToolSession {
    pub async fn load(store: Arc<dyn ToolStore>, tool_id: &str, options: SessionOptions) -> Result<Self> {
        let tool = store.get_tool(tool_id).await?;
        let editor = ToolEditor::with_options(
            tool.outline,
            options.snapper,
            History::new(options.history_depth),
        );
        info!("Loaded tool {} ({} points)", tool.id, editor.outline().points.len());
        Ok(Self {
            synced_revision: editor.revision(),
            synced_name: tool.name.clone(),
            tool_id: tool.id,
            name: tool.name,
            store,
            editor,
            saver: SaveCoalescer::new(options.save_delay),
        })
    }

    pub fn tool_id(&self) -> &str {
        &self.tool_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn editor(&self) -> &ToolEditor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut ToolEditor {
        &mut self.editor
    }

    pub fn rename(&mut self, name: impl Into<String>) -> bool {
        self.name = name.into();
        self.sync()
    }

    /// Schedule a save if the outline or name changed since the last sync.
    pub fn sync(&mut self) -> bool {
        if self.editor.revision() == self.synced_revision && self.name == self.synced_name {
            return false;
        }
        self.synced_revision = self.editor.revision();
        self.synced_name = self.name.clone();

        let outline = self.editor.committed();
        let patch = ToolPatch {
            name: Some(self.name.clone()),
            points: Some(outline.points.clone()),
            interior_rings: Some(outline.interior_rings.clone()),
            cutouts: Some(outline.cutouts.clone()),
            ..ToolPatch::default()
        };
        let store = Arc::clone(&self.store);
        let tool_id = self.tool_id.clone();
        self.saver.schedule(format!("tool {}", tool_id), async move {
            store.update_tool(&tool_id, patch).await.map(|_| ())
        });
        true
    }

    pub fn save_status(&self) -> SaveStatus {
        self.saver.status()
    }

    pub async fn close(mut self) -> SaveStatus {
        self.sync();
        self.saver.flush().await;
        info!("Closed tool {}", self.tool_id);
        self.saver.status()
    }
}

impl std::fmt::Debug for ToolSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolSession")
            .field("tool_id", &self.tool_id)
            .field("revision", &self.editor.revision())
            .field("saver", &self.saver)
            .finish()
    }
}
