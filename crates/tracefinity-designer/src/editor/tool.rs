//! Tool outline editor.
//!
//! Edits one library tool's outline: vertices of the outer ring, cutouts and
//! whole-outline rotation. Interior rings travel with every whole-outline
//! transform but are not edited vertex by vertex.

use tracing::debug;

use tracefinity_core::model::{Bounds, Cutout, CutoutPreset, CutoutShape, Outline, Point};

use super::canvas::CanvasState;
use crate::drag::{moved_anchor, resize_cutout, rotated_outline, rotated_value, DragOperation};
use crate::history::{History, HistoryCommand};
use crate::input::{Key, Modifiers, PointerButton};
use crate::selection::Selection;
use crate::snap::Snapper;
use crate::viewport::{outline_view_box, Viewport};

/// Active tool editor tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolMode {
    #[default]
    Select,
    AddVertex,
    DeleteVertex,
    FingerHole,
    Circle,
    Square,
    Rectangle,
}

impl ToolMode {
    /// Cutout placed by a click in this mode, if it is a placement mode.
    pub fn cutout_preset(self) -> Option<CutoutPreset> {
        match self {
            ToolMode::FingerHole => Some(CutoutPreset::FINGER_HOLE),
            ToolMode::Circle => Some(CutoutPreset::CIRCLE),
            ToolMode::Square => Some(CutoutPreset::SQUARE),
            ToolMode::Rectangle => Some(CutoutPreset::RECTANGLE),
            ToolMode::Select | ToolMode::AddVertex | ToolMode::DeleteVertex => None,
        }
    }
}

/// Element under the pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolTarget {
    Background,
    Vertex(usize),
    /// Edge from vertex `i` to vertex `i + 1` (wrapping).
    Edge(usize),
    Cutout(String),
    CutoutResizeHandle(String),
    CutoutRotateHandle(String),
    OutlineRotateHandle,
}

/// Bounds the editor view is fitted to: the outer ring plus each cutout's
/// reach around its centre.
pub fn editor_bounds(outline: &Outline) -> Option<Bounds> {
    let mut bounds = outline.bounds();
    for c in &outline.cutouts {
        let reach = match c.shape {
            CutoutShape::Rectangle => c.effective_width().max(c.effective_height()) / 2.0,
            _ => c.radius,
        };
        let cb = Bounds {
            min_x: c.x - reach,
            min_y: c.y - reach,
            max_x: c.x + reach,
            max_y: c.y + reach,
        };
        bounds = Some(match bounds {
            Some(b) => b.union(&cb),
            None => cb,
        });
    }
    bounds
}

/// Interaction state machine for a single tool outline.
#[derive(Debug, Clone)]
pub struct ToolEditor {
    committed: Outline,
    preview: Option<Outline>,
    mode: ToolMode,
    selection: Option<Selection>,
    drag: Option<DragOperation>,
    canvas: CanvasState,
    history: History<Outline>,
    revision: u64,
}

impl ToolEditor {
    pub fn new(outline: Outline) -> Self {
        Self::with_options(outline, Snapper::default(), History::default())
    }

    pub fn with_options(outline: Outline, snapper: Snapper, mut history: History<Outline>) -> Self {
        history.clear();
        if !outline.is_empty() {
            history.seed_if_empty(&outline);
        }
        Self {
            canvas: CanvasState::new(Viewport::for_outline(editor_bounds(&outline)), snapper),
            committed: outline,
            preview: None,
            mode: ToolMode::Select,
            selection: None,
            drag: None,
            history,
            revision: 0,
        }
    }

    /// Replace the outline without recording an edit. History restarts.
    pub fn load(&mut self, outline: Outline) {
        self.history.clear();
        if !outline.is_empty() {
            self.history.seed_if_empty(&outline);
        }
        self.committed = outline;
        self.preview = None;
        self.drag = None;
        self.selection = None;
        self.refit_view();
    }

    /// Outline as currently displayed, including an in-progress drag.
    pub fn outline(&self) -> &Outline {
        self.preview.as_ref().unwrap_or(&self.committed)
    }

    pub fn committed(&self) -> &Outline {
        &self.committed
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn mode(&self) -> ToolMode {
        self.mode
    }

    /// Switch tools. Ignored while a drag is in progress.
    pub fn set_mode(&mut self, mode: ToolMode) -> bool {
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

    pub fn selected_cutout(&self) -> Option<&Cutout> {
        match &self.selection {
            Some(Selection::Cutout(id)) => self.outline().cutouts.iter().find(|c| &c.id == id),
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

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    fn refit_view(&mut self) {
        self.canvas
            .viewport
            .set_base_view_box(outline_view_box(editor_bounds(&self.committed)));
    }

    fn commit(&mut self, next: Outline) {
        if !self.committed.is_empty() {
            self.history.seed_if_empty(&self.committed);
        }
        self.history.record(&next);
        self.committed = next;
        self.preview = None;
        self.revision += 1;
        self.refit_view();

        let keep = match &self.selection {
            Some(Selection::Vertex(i)) => *i < self.committed.points.len(),
            Some(Selection::Cutout(id)) => self.committed.cutouts.iter().any(|c| &c.id == id),
            Some(_) => false,
            None => true,
        };
        if !keep {
            self.selection = None;
        }
    }

    fn preview_mut(&mut self) -> &mut Outline {
        self.preview.get_or_insert_with(|| self.committed.clone())
    }

    fn place_cutout(&mut self, preset: CutoutPreset, at: Point) -> String {
        let cutout = preset.instantiate(at);
        let id = cutout.id.clone();
        let mut next = self.committed.clone();
        next.cutouts.push(cutout);
        self.commit(next);
        debug!("Placed {} cutout {}", preset.shape, id);
        id
    }

    /// Remove vertex `index` unless the ring would drop below three points.
    pub fn delete_vertex(&mut self, index: usize) -> bool {
        if self.committed.points.len() <= 3 || index >= self.committed.points.len() {
            return false;
        }
        let mut next = self.committed.clone();
        next.points.remove(index);
        self.selection = None;
        self.commit(next);
        true
    }

    /// Insert `at` after vertex `edge`, splitting that edge.
    pub fn insert_vertex(&mut self, edge: usize, at: Point) -> bool {
        if edge >= self.committed.points.len() {
            return false;
        }
        let mut next = self.committed.clone();
        next.points.insert(edge + 1, at);
        if let Some(Selection::Vertex(i)) = &mut self.selection {
            if *i > edge {
                *i += 1;
            }
        }
        self.commit(next);
        true
    }

    /// Pointer pressed on `target`. Returns whether a drag started.
    pub fn pointer_down(&mut self, target: &ToolTarget, client: Point, button: PointerButton) -> bool {
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
            ToolTarget::Background | ToolTarget::Edge(_) => None,
            ToolTarget::Vertex(index) => {
                if *index >= self.committed.points.len() {
                    return false;
                }
                if self.mode == ToolMode::DeleteVertex {
                    self.delete_vertex(*index);
                    return false;
                }
                self.selection = Some(Selection::Vertex(*index));
                Some(DragOperation::MoveVertex { index: *index })
            }
            ToolTarget::Cutout(id) => {
                if let Some(preset) = self.mode.cutout_preset() {
                    self.place_cutout(preset, pos);
                    return false;
                }
                let Some(cutout) = self.committed.cutouts.iter().find(|c| &c.id == id) else {
                    return false;
                };
                self.selection = Some(Selection::Cutout(id.clone()));
                Some(DragOperation::MoveCutout {
                    cutout_id: id.clone(),
                    start: pos,
                    original: cutout.center(),
                })
            }
            ToolTarget::CutoutResizeHandle(id) => {
                let Some(cutout) = self.committed.cutouts.iter().find(|c| &c.id == id) else {
                    return false;
                };
                Some(DragOperation::ResizeCutout {
                    cutout_id: id.clone(),
                    center: cutout.center(),
                    original_radius: cutout.radius,
                    original_width: cutout.width,
                    original_height: cutout.height,
                })
            }
            ToolTarget::CutoutRotateHandle(id) => {
                let Some(cutout) = self.committed.cutouts.iter().find(|c| &c.id == id) else {
                    return false;
                };
                let pivot = cutout.center();
                Some(DragOperation::RotateCutout {
                    cutout_id: id.clone(),
                    pivot,
                    start_angle: DragOperation::start_angle(&pivot, &pos),
                    original_rotation: cutout.rotation,
                })
            }
            ToolTarget::OutlineRotateHandle => {
                let Some(pivot) = self.committed.centroid() else {
                    return false;
                };
                Some(DragOperation::RotateOutline {
                    pivot,
                    start_angle: DragOperation::start_angle(&pivot, &pos),
                    original: self.committed.clone(),
                })
            }
        };

        if let Some(drag) = &drag {
            debug!("Outline drag started: {}", drag.kind());
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
            DragOperation::MoveVertex { index } => {
                let snapped = snapper.snap_point(pos);
                if let Some(p) = self.preview_mut().points.get_mut(*index) {
                    *p = snapped;
                }
            }
            DragOperation::MoveCutout {
                cutout_id,
                start,
                original,
            } => {
                let center = moved_anchor(*original, *start, pos, &snapper);
                if let Some(c) = self.preview_mut().cutouts.iter_mut().find(|c| &c.id == cutout_id) {
                    c.set_center(center);
                }
            }
            DragOperation::ResizeCutout {
                cutout_id,
                center,
                original_radius,
                original_width,
                original_height,
            } => {
                if let Some(c) = self.preview_mut().cutouts.iter_mut().find(|c| &c.id == cutout_id) {
                    resize_cutout(c, center, *original_radius, *original_width, *original_height, &pos);
                }
            }
            DragOperation::RotateCutout {
                cutout_id,
                pivot,
                start_angle,
                original_rotation,
            } => {
                let rotation = rotated_value(*original_rotation, pivot, *start_angle, &pos);
                if let Some(c) = self.preview_mut().cutouts.iter_mut().find(|c| &c.id == cutout_id) {
                    c.rotation = rotation;
                }
            }
            DragOperation::RotateOutline {
                pivot,
                start_angle,
                original,
            } => {
                let (outline, _) = rotated_outline(original, pivot, *start_angle, &pos, true);
                self.preview = Some(outline);
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
                debug!("Outline drag committed: {}", drag.kind());
                self.commit(preview);
                true
            }
            _ => false,
        }
    }

    /// Click on `target`.
    pub fn click(&mut self, target: &ToolTarget, client: Point) {
        if self.canvas.take_swallowed_click() {
            return;
        }
        let pos = self.canvas.to_model(client);
        match target {
            ToolTarget::Edge(edge) if self.mode == ToolMode::AddVertex => {
                self.insert_vertex(*edge, pos);
            }
            ToolTarget::Background => match self.mode.cutout_preset() {
                Some(preset) => {
                    let at = self.canvas.snapper.snap_point(pos);
                    self.place_cutout(preset, at);
                }
                None => self.selection = None,
            },
            _ => {}
        }
    }

    /// Double click on the background resets zoom and pan.
    pub fn double_click(&mut self, target: &ToolTarget) {
        if *target == ToolTarget::Background {
            self.canvas.viewport.reset();
        }
    }

    /// Keyboard input. Returns whether the key was consumed.
    pub fn key_down(&mut self, key: &Key, modifiers: Modifiers) -> bool {
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

    pub fn wheel(&mut self, client: Point, delta_y: f64) -> bool {
        self.canvas.viewport.zoom_at(client, delta_y)
    }

    /// Rotate the outline and its cutouts about the centroid.
    pub fn rotate_all(&mut self, degrees: f64) -> bool {
        if self.drag.is_some() {
            return false;
        }
        let Some(pivot) = self.committed.centroid() else {
            return false;
        };
        let next = self.committed.rotated_about(&pivot, degrees, true);
        self.commit(next);
        true
    }

    /// Remove the selected cutout, or the selected vertex when the ring can spare it.
    pub fn delete_selected(&mut self) -> bool {
        if self.drag.is_some() {
            return false;
        }
        match self.selection.clone() {
            Some(Selection::Cutout(id)) => {
                let mut next = self.committed.clone();
                next.cutouts.retain(|c| c.id != id);
                if next.cutouts.len() == self.committed.cutouts.len() {
                    return false;
                }
                self.selection = None;
                self.commit(next);
                true
            }
            Some(Selection::Vertex(index)) => self.delete_vertex(index),
            _ => false,
        }
    }

    pub fn undo(&mut self) -> bool {
        if self.drag.is_some() {
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
