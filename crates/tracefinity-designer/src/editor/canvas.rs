//! View state shared by both editors: viewport, snapping, pan gestures and
//! click suppression after a pan.

use tracefinity_core::model::Point;

use crate::drag::{panned, DragOperation};
use crate::input::PointerButton;
use crate::snap::Snapper;
use crate::viewport::Viewport;

#[derive(Debug, Clone)]
pub struct CanvasState {
    pub viewport: Viewport,
    pub snapper: Snapper,
    space_held: bool,
    swallow_click: bool,
}

impl CanvasState {
    pub fn new(viewport: Viewport, snapper: Snapper) -> Self {
        Self {
            viewport,
            snapper,
            space_held: false,
            swallow_click: false,
        }
    }

    pub fn set_space_held(&mut self, held: bool) {
        self.space_held = held;
    }

    pub fn space_held(&self) -> bool {
        self.space_held
    }

    /// Middle button, or primary button with space held.
    pub fn is_pan_trigger(&self, button: PointerButton) -> bool {
        button == PointerButton::Middle || (button == PointerButton::Primary && self.space_held)
    }

    /// A new gesture begins; a stale suppression from an earlier pan no longer applies.
    pub fn begin_gesture(&mut self) {
        self.swallow_click = false;
    }

    pub fn start_pan(&self, client: Point) -> DragOperation {
        DragOperation::Pan {
            start_client: client,
            original_pan: self.viewport.pan(),
            units_per_pixel: self.viewport.units_per_pixel(),
        }
    }

    /// Apply a pan drag and arm suppression of the click that ends it.
    pub fn apply_pan(&mut self, drag: &DragOperation, client: Point) {
        if let DragOperation::Pan {
            start_client,
            original_pan,
            units_per_pixel,
        } = drag
        {
            self.viewport
                .set_pan(panned(*original_pan, *start_client, *units_per_pixel, client));
            self.swallow_click = true;
        }
    }

    /// Consume the suppression flag. `true` means the click must be ignored.
    pub fn take_swallowed_click(&mut self) -> bool {
        std::mem::take(&mut self.swallow_click)
    }

    pub fn to_model(&self, client: Point) -> Point {
        self.viewport.client_to_model(client)
    }
}
