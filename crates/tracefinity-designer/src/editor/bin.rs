//! Bin layout editor.
//!
//! Arranges placed tools and text labels on the bin floor. Pointer input is
//! delivered together with the element it hit ([`BinTarget`]); drags edit a
//! preview copy and only pointer-up replaces the committed collections and
//! records a history snapshot. Every commit bumps [`BinEditor::revision`] so
//! an owner can persist and regenerate.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use tracefinity_core::model::{
    normalize_rotation, BinConfig, LabelPatch, PlacedTool, Point, TextLabel, Tool,
};

use super::canvas::CanvasState;
use crate::drag::{moved_anchor, moved_outline, rotated_outline, rotated_value, DragOperation};
use crate::geometry::inside_cutout_area;
use crate::history::{History, HistoryCommand};
use crate::input::{Key, Modifiers, PointerButton};
use crate::layout::{self, Placement};
use crate::library_sync::sync_placed_tools;
use crate::selection::Selection;
use crate::snap::Snapper;
use crate::viewport::{bin_view_box, Viewport};

/// Everything undo/redo restores in the bin editor.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BinSnapshot {
    pub placed_tools: Vec<PlacedTool>,
    pub text_labels: Vec<TextLabel>,
}

impl BinSnapshot {
    pub fn is_empty(&self) -> bool {
        self.placed_tools.is_empty() && self.text_labels.is_empty()
    }
}

/// Active bin editor tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BinMode {
    #[default]
    Select,
    Text,
}

/// Element under the pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BinTarget {
    Background,
    Tool(String),
    ToolRotateHandle(String),
    Label(String),
    LabelRotateHandle(String),
}

/// A label being typed in text mode, not yet part of the bin.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingLabel {
    pub position: Point,
    pub text: String,
}

/// Inline edit of an existing label's text.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelEdit {
    pub label_id: String,
    pub text: String,
}

/// Interaction state machine for the bin layout.
#[derive(Debug, Clone)]
pub struct BinEditor {
    config: BinConfig,
    committed: BinSnapshot,
    preview: Option<BinSnapshot>,
    mode: BinMode,
    selection: Option<Selection>,
    drag: Option<DragOperation>,
    canvas: CanvasState,
    history: History<BinSnapshot>,
    pending_label: Option<PendingLabel>,
    editing_label: Option<LabelEdit>,
    revision: u64,
}

impl BinEditor {
    pub fn new(config: BinConfig, contents: BinSnapshot) -> Self {
        Self::with_options(config, contents, Snapper::default(), History::default())
    }

    pub fn with_options(
        config: BinConfig,
        contents: BinSnapshot,
        snapper: Snapper,
        mut history: History<BinSnapshot>,
    ) -> Self {
        history.clear();
        if !contents.is_empty() {
            history.seed_if_empty(&contents);
        }
        Self {
            canvas: CanvasState::new(Viewport::for_bin(&config), snapper),
            config,
            committed: contents,
            preview: None,
            mode: BinMode::Select,
            selection: None,
            drag: None,
            history,
            pending_label: None,
            editing_label: None,
            revision: 0,
        }
    }

    /// Replace the contents without recording an edit. History restarts.
    pub fn load(&mut self, contents: BinSnapshot) {
        self.history.clear();
        if !contents.is_empty() {
            self.history.seed_if_empty(&contents);
        }
        self.committed = contents;
        self.preview = None;
        self.drag = None;
        self.selection = None;
        self.pending_label = None;
        self.editing_label = None;
    }

    pub fn config(&self) -> &BinConfig {
        &self.config
    }

    /// Change the bin configuration. Not part of the undo history.
    pub fn set_config(&mut self, config: BinConfig) {
        self.canvas.viewport.set_base_view_box(bin_view_box(&config));
        self.config = config;
    }

    /// Placed tools as currently displayed, including an in-progress drag.
    pub fn placed_tools(&self) -> &[PlacedTool] {
        &self.current().placed_tools
    }

    /// Text labels as currently displayed, including an in-progress drag.
    pub fn text_labels(&self) -> &[TextLabel] {
        &self.current().text_labels
    }

    /// The authoritative collections, ignoring any in-progress drag.
    pub fn committed(&self) -> &BinSnapshot {
        &self.committed
    }

    fn current(&self) -> &BinSnapshot {
        self.preview.as_ref().unwrap_or(&self.committed)
    }

    /// Incremented on every committed change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn mode(&self) -> BinMode {
        self.mode
    }

    /// Switch tools. Ignored while a drag is in progress; the selection is kept.
    pub fn set_mode(&mut self, mode: BinMode) -> bool {
        if self.drag.is_some() {
            debug!("Ignoring mode switch to {:?} during drag", mode);
            return false;
        }
        self.mode = mode;
        true
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn select(&mut self, selection: Option<Selection>) {
        self.selection = selection;
    }

    pub fn selected_tool(&self) -> Option<&PlacedTool> {
        match &self.selection {
            Some(Selection::Tool(id)) => self.placed_tools().iter().find(|t| &t.id == id),
            _ => None,
        }
    }

    pub fn selected_label(&self) -> Option<&TextLabel> {
        match &self.selection {
            Some(Selection::Label(id)) => self.text_labels().iter().find(|l| &l.id == id),
            _ => None,
        }
    }

    pub fn drag(&self) -> Option<&DragOperation> {
        self.drag.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.canvas.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.canvas.viewport
    }

    pub fn snapper(&self) -> &Snapper {
        &self.canvas.snapper
    }

    pub fn set_snap_enabled(&mut self, enabled: bool) {
        self.canvas.snapper.enabled = enabled;
    }

    pub fn pending_label(&self) -> Option<&PendingLabel> {
        self.pending_label.as_ref()
    }

    pub fn editing_label(&self) -> Option<&LabelEdit> {
        self.editing_label.as_ref()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    fn commit(&mut self, next: BinSnapshot) {
        if !self.committed.is_empty() {
            self.history.seed_if_empty(&self.committed);
        }
        self.history.record(&next);
        self.committed = next;
        self.preview = None;
        self.revision += 1;
        self.prune_selection();
    }

    fn prune_selection(&mut self) {
        let keep = match &self.selection {
            Some(Selection::Tool(id)) => self.committed.placed_tools.iter().any(|t| &t.id == id),
            Some(Selection::Label(id)) => self.committed.text_labels.iter().any(|l| &l.id == id),
            Some(_) => false,
            None => true,
        };
        if !keep {
            self.selection = None;
        }
        if let Some(edit) = &self.editing_label {
            if !self.committed.text_labels.iter().any(|l| l.id == edit.label_id) {
                self.editing_label = None;
            }
        }
    }

    fn preview_mut(&mut self) -> &mut BinSnapshot {
        self.preview.get_or_insert_with(|| self.committed.clone())
    }

    /// Pointer pressed on `target`. Returns whether a drag started.
    pub fn pointer_down(&mut self, target: &BinTarget, client: Point, button: PointerButton) -> bool {
        self.canvas.begin_gesture();
        if self.drag.is_some() {
            return false;
        }
        if self.canvas.is_pan_trigger(button) {
            self.drag = Some(self.canvas.start_pan(client));
            return true;
        }
        if button != PointerButton::Primary {
            return false;
        }

        let pos = self.canvas.to_model(client);
        let drag = match target {
            BinTarget::Background => None,
            BinTarget::Tool(id) => {
                if self.mode == BinMode::Text {
                    return false;
                }
                let Some(tool) = self.committed.placed_tools.iter().find(|t| &t.id == id) else {
                    return false;
                };
                self.selection = Some(Selection::Tool(id.clone()));
                Some(DragOperation::MoveTool {
                    tool_id: id.clone(),
                    start: pos,
                    original: tool.outline.clone(),
                })
            }
            BinTarget::ToolRotateHandle(id) => {
                let Some(tool) = self.committed.placed_tools.iter().find(|t| &t.id == id) else {
                    return false;
                };
                let Some(pivot) = tool.centroid() else {
                    return false;
                };
                Some(DragOperation::RotateTool {
                    tool_id: id.clone(),
                    pivot,
                    start_angle: DragOperation::start_angle(&pivot, &pos),
                    original: tool.outline.clone(),
                    original_rotation: tool.rotation,
                })
            }
            BinTarget::Label(id) => {
                let Some(label) = self.committed.text_labels.iter().find(|l| &l.id == id) else {
                    return false;
                };
                self.selection = Some(Selection::Label(id.clone()));
                Some(DragOperation::MoveLabel {
                    label_id: id.clone(),
                    start: pos,
                    original: label.anchor(),
                })
            }
            BinTarget::LabelRotateHandle(id) => {
                let Some(label) = self.committed.text_labels.iter().find(|l| &l.id == id) else {
                    return false;
                };
                let pivot = label.anchor();
                Some(DragOperation::RotateLabel {
                    label_id: id.clone(),
                    pivot,
                    start_angle: DragOperation::start_angle(&pivot, &pos),
                    original_rotation: label.rotation,
                })
            }
        };

        if let Some(drag) = &drag {
            debug!("Bin drag started: {}", drag.kind());
        }
        self.drag = drag;
        self.drag.is_some()
    }

    /// Pointer moved. Updates the preview from the drag's originals.
    pub fn pointer_move(&mut self, client: Point) {
        let Some(drag) = self.drag.take() else {
            return;
        };
        self.apply_drag(&drag, client);
        self.drag = Some(drag);
    }

    fn apply_drag(&mut self, drag: &DragOperation, client: Point) {
        let pos = self.canvas.to_model(client);
        let snapper = self.canvas.snapper;
        match drag {
            DragOperation::Pan { .. } => self.canvas.apply_pan(drag, client),
            DragOperation::MoveTool {
                tool_id,
                start,
                original,
            } => {
                let outline = moved_outline(original, *start, pos, &snapper);
                if let Some(tool) = self.preview_mut().placed_tools.iter_mut().find(|t| &t.id == tool_id) {
                    tool.outline = outline;
                }
            }
            DragOperation::RotateTool {
                tool_id,
                pivot,
                start_angle,
                original,
                original_rotation,
            } => {
                let (outline, delta) = rotated_outline(original, pivot, *start_angle, &pos, false);
                if let Some(tool) = self.preview_mut().placed_tools.iter_mut().find(|t| &t.id == tool_id) {
                    tool.outline = outline;
                    tool.rotation = normalize_rotation(original_rotation + delta);
                }
            }
            DragOperation::MoveLabel {
                label_id,
                start,
                original,
            } => {
                let anchor = moved_anchor(*original, *start, pos, &snapper);
                let blocked = inside_cutout_area(
                    &anchor,
                    self.committed.placed_tools.iter().map(|t| &t.outline),
                );
                if blocked {
                    return;
                }
                if let Some(label) = self.preview_mut().text_labels.iter_mut().find(|l| &l.id == label_id) {
                    label.x = anchor.x;
                    label.y = anchor.y;
                }
            }
            DragOperation::RotateLabel {
                label_id,
                pivot,
                start_angle,
                original_rotation,
            } => {
                let rotation = rotated_value(*original_rotation, pivot, *start_angle, &pos);
                if let Some(label) = self.preview_mut().text_labels.iter_mut().find(|l| &l.id == label_id) {
                    label.rotation = rotation;
                }
            }
            _ => {}
        }
    }

    /// Pointer released. Returns whether a change was committed.
    pub fn pointer_up(&mut self) -> bool {
        let Some(drag) = self.drag.take() else {
            return false;
        };
        match self.preview.take() {
            Some(preview) if !drag.is_pan() && preview != self.committed => {
                debug!("Bin drag committed: {}", drag.kind());
                self.commit(preview);
                true
            }
            _ => false,
        }
    }

    /// Click (press and release without a drag in between) on `target`.
    pub fn click(&mut self, target: &BinTarget, client: Point) {
        if self.canvas.take_swallowed_click() {
            return;
        }
        match target {
            BinTarget::Background => self.background_click(client),
            // tools are transparent to clicks while placing text
            BinTarget::Tool(_) if self.mode == BinMode::Text => self.background_click(client),
            _ => {}
        }
    }

    fn background_click(&mut self, client: Point) {
        match self.mode {
            BinMode::Select => self.selection = None,
            BinMode::Text => {
                if self.pending_label.is_some() {
                    self.commit_pending_label();
                    return;
                }
                let pos = self.canvas.to_model(client);
                let snapped = self.canvas.snapper.snap_point(pos);
                let on_floor = self.config.contains(&pos);
                // both the click and where it snaps to must be clear of pockets
                let in_cutout = [pos, snapped].iter().any(|p| {
                    inside_cutout_area(p, self.committed.placed_tools.iter().map(|t| &t.outline))
                });
                if on_floor && !in_cutout {
                    self.pending_label = Some(PendingLabel {
                        position: snapped,
                        text: String::new(),
                    });
                } else {
                    debug!("Label placement refused at {}", pos);
                }
            }
        }
    }

    /// Double click on `target`. Labels enter inline editing.
    pub fn double_click(&mut self, target: &BinTarget) {
        if let BinTarget::Label(id) = target {
            let Some(label) = self.committed.text_labels.iter().find(|l| &l.id == id) else {
                return;
            };
            self.editing_label = Some(LabelEdit {
                label_id: id.clone(),
                text: label.text.clone(),
            });
            self.selection = Some(Selection::Label(id.clone()));
        }
    }

    pub fn set_pending_text(&mut self, text: impl Into<String>) {
        if let Some(pending) = &mut self.pending_label {
            pending.text = text.into();
        }
    }

    /// Commit the pending label. Blank text discards it.
    pub fn commit_pending_label(&mut self) -> bool {
        let Some(pending) = self.pending_label.take() else {
            return false;
        };
        let text = pending.text.trim();
        if text.is_empty() {
            return false;
        }
        let label = TextLabel::new(text, pending.position);
        let id = label.id.clone();
        let mut next = self.committed.clone();
        next.text_labels.push(label);
        self.commit(next);
        self.selection = Some(Selection::Label(id));
        true
    }

    pub fn cancel_pending_label(&mut self) {
        self.pending_label = None;
    }

    pub fn set_editing_text(&mut self, text: impl Into<String>) {
        if let Some(edit) = &mut self.editing_label {
            edit.text = text.into();
        }
    }

    /// Commit the inline edit. Blank text deletes the label.
    pub fn commit_label_edit(&mut self) -> bool {
        let Some(edit) = self.editing_label.take() else {
            return false;
        };
        let text = edit.text.trim();
        let mut next = self.committed.clone();
        let Some(pos) = next.text_labels.iter().position(|l| l.id == edit.label_id) else {
            return false;
        };
        if text.is_empty() {
            next.text_labels.remove(pos);
            self.selection = None;
        } else if next.text_labels[pos].text != text {
            next.text_labels[pos].text = text.to_string();
        } else {
            return false;
        }
        self.commit(next);
        true
    }

    pub fn cancel_label_edit(&mut self) {
        self.editing_label = None;
    }

    /// Keyboard input. Returns whether the key was consumed.
    pub fn key_down(&mut self, key: &Key, modifiers: Modifiers) -> bool {
        if self.pending_label.is_some() {
            return match key {
                Key::Enter => {
                    self.commit_pending_label();
                    true
                }
                Key::Escape => {
                    self.cancel_pending_label();
                    true
                }
                _ => false,
            };
        }
        if self.editing_label.is_some() {
            return match key {
                Key::Enter => {
                    self.commit_label_edit();
                    true
                }
                Key::Escape => {
                    self.cancel_label_edit();
                    true
                }
                _ => false,
            };
        }
        if let Some(command) = HistoryCommand::from_shortcut(key, modifiers) {
            match command {
                HistoryCommand::Undo => self.undo(),
                HistoryCommand::Redo => self.redo(),
            };
            return true;
        }
        match key {
            Key::Space => {
                self.canvas.set_space_held(true);
                true
            }
            Key::Delete | Key::Backspace => self.delete_selected(),
            _ => false,
        }
    }

    pub fn key_up(&mut self, key: &Key) {
        if *key == Key::Space {
            self.canvas.set_space_held(false);
        }
    }

    /// Text input lost focus: pending labels and inline edits commit.
    pub fn blur(&mut self) {
        if self.pending_label.is_some() {
            self.commit_pending_label();
        }
        if self.editing_label.is_some() {
            self.commit_label_edit();
        }
    }

    /// Wheel zoom around the cursor.
    pub fn wheel(&mut self, client: Point, delta_y: f64) -> bool {
        self.canvas.viewport.zoom_at(client, delta_y)
    }

    /// Remove the selected tool or label.
    pub fn delete_selected(&mut self) -> bool {
        if self.drag.is_some() {
            return false;
        }
        let mut next = self.committed.clone();
        match &self.selection {
            Some(Selection::Tool(id)) => next.placed_tools.retain(|t| &t.id != id),
            Some(Selection::Label(id)) => next.text_labels.retain(|l| &l.id != id),
            _ => return false,
        }
        if next == self.committed {
            return false;
        }
        self.commit(next);
        self.selection = None;
        true
    }

    /// Update properties of the selected label.
    pub fn update_selected_label(&mut self, patch: &LabelPatch) -> bool {
        let Some(Selection::Label(id)) = &self.selection else {
            return false;
        };
        let mut next = self.committed.clone();
        let Some(label) = next.text_labels.iter_mut().find(|l| &l.id == id) else {
            return false;
        };
        label.apply_patch(patch);
        if next == self.committed {
            return false;
        }
        self.commit(next);
        true
    }

    /// Add a copy of a library tool, growing the grid if it does not fit.
    ///
    /// Returns the placement so the caller can persist a grown configuration.
    pub fn insert_tool(&mut self, tool: &Tool) -> Placement {
        let placed = PlacedTool::from_tool(tool, Uuid::new_v4().to_string());
        self.insert_placed_tool(placed)
    }

    pub fn insert_placed_tool(&mut self, placed: PlacedTool) -> Placement {
        let placement = layout::place_tool(&self.config, placed);
        if placement.grew(&self.config) {
            let config = BinConfig {
                grid_x: placement.grid_x,
                grid_y: placement.grid_y,
                ..self.config.clone()
            };
            self.set_config(config);
        }
        let mut next = self.committed.clone();
        next.placed_tools.push(placement.tool.clone());
        self.commit(next);
        placement
    }

    /// Centre the combined bounds of all tools in the bin.
    pub fn recenter(&mut self) -> bool {
        if self.drag.is_some() {
            return false;
        }
        let mut next = self.committed.clone();
        if !layout::recenter(&self.config, &mut next.placed_tools) {
            return false;
        }
        self.commit(next);
        true
    }

    /// Regenerate placements from their (possibly edited) library tools.
    pub fn sync_with_library(&mut self, library: &[Tool]) -> bool {
        let mut next = self.committed.clone();
        if !sync_placed_tools(&mut next.placed_tools, library) {
            return false;
        }
        self.commit(next);
        true
    }

    pub fn undo(&mut self) -> bool {
        if self.drag.is_some() {
            warn!("Undo refused during drag");
            return false;
        }
        match self.history.undo() {
            Some(snapshot) => {
                self.commit(snapshot);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        if self.drag.is_some() {
            warn!("Redo refused during drag");
            return false;
        }
        match self.history.redo() {
            Some(snapshot) => {
                self.commit(snapshot);
                true
            }
            None => false,
        }
    }
}
