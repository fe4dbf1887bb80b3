//! Viewport and coordinate transformation for the editor canvases.
//!
//! Converts between device coordinates (pointer positions inside the rendered
//! element) and model millimetres. The logical viewport is expressed in
//! display units (`mm * display_scale`) and is fitted into the rendered rect;
//! zoom shrinks it around its centre and pan shifts it.

use std::fmt;

use tracefinity_core::constants::{
    BIN_DISPLAY_SCALE, BIN_VIEW_EXTRA_HEIGHT, BIN_VIEW_EXTRA_WIDTH, BIN_VIEW_PADDING, MAX_ZOOM,
    MIN_ZOOM, TOOL_DISPLAY_SCALE, TOOL_VIEW_PADDING_MM, ZOOM_STEP,
};
use tracefinity_core::model::{BinConfig, Bounds, Point};

/// A rectangle in display units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

impl fmt::Display for ViewBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.x, self.y, self.width, self.height)
    }
}

/// The rendered element's rectangle in device pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClientRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ClientRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// Represents the viewport transformation state (zoom and pan).
#[derive(Debug, Clone)]
pub struct Viewport {
    base: ViewBox,
    display_scale: f64,
    rect: ClientRect,
    zoom: f64,
    /// Pan offset in display units.
    pan: Point,
}

impl Viewport {
    /// Creates a viewport whose rendered rect initially matches the view box one to one.
    pub fn new(base: ViewBox, display_scale: f64) -> Self {
        Self {
            base,
            display_scale,
            rect: ClientRect::new(0.0, 0.0, base.width, base.height),
            zoom: 1.0,
            pan: Point::ORIGIN,
        }
    }

    /// Bin editor viewport: the bin floor plus a fixed handle margin.
    pub fn for_bin(config: &BinConfig) -> Self {
        Self::new(bin_view_box(config), BIN_DISPLAY_SCALE)
    }

    /// Tool editor viewport fitted to an outline's bounds.
    pub fn for_outline(bounds: Option<Bounds>) -> Self {
        Self::new(outline_view_box(bounds), TOOL_DISPLAY_SCALE)
    }

    pub fn display_scale(&self) -> f64 {
        self.display_scale
    }

    /// Gets the unzoomed view box.
    pub fn base_view_box(&self) -> ViewBox {
        self.base
    }

    /// Replaces the unzoomed view box, keeping zoom and pan.
    pub fn set_base_view_box(&mut self, base: ViewBox) {
        self.base = base;
    }

    pub fn client_rect(&self) -> ClientRect {
        self.rect
    }

    /// Sets the rendered rect (typically called when the element resizes).
    pub fn set_client_rect(&mut self, rect: ClientRect) {
        self.rect = rect;
    }

    /// Gets the current zoom level (1.0 = 100%).
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Sets the zoom level, clamped to the supported range.
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Gets the pan offset in display units.
    pub fn pan(&self) -> Point {
        self.pan
    }

    pub fn set_pan(&mut self, pan: Point) {
        self.pan = pan;
    }

    /// Resets zoom to 1.0 and pan to the origin.
    pub fn reset(&mut self) {
        self.zoom = 1.0;
        self.pan = Point::ORIGIN;
    }

    /// The view box currently shown: scaled by `1/zoom` around the base centre, then panned.
    pub fn view_box(&self) -> ViewBox {
        let width = self.base.width / self.zoom;
        let height = self.base.height / self.zoom;
        ViewBox {
            x: self.base.x + (self.base.width - width) / 2.0 + self.pan.x,
            y: self.base.y + (self.base.height - height) / 2.0 + self.pan.y,
            width,
            height,
        }
    }

    /// Logical units per device pixel for the current view box.
    ///
    /// A degenerate rect is treated as one pixel wide.
    pub fn units_per_pixel(&self) -> f64 {
        let vb = self.view_box();
        let w = if self.rect.width > 0.0 { self.rect.width } else { 1.0 };
        let h = if self.rect.height > 0.0 { self.rect.height } else { 1.0 };
        (vb.width / w).max(vb.height / h)
    }

    fn fit_offsets(&self, vb: &ViewBox, scale: f64) -> (f64, f64) {
        (
            (self.rect.width * scale - vb.width) / 2.0,
            (self.rect.height * scale - vb.height) / 2.0,
        )
    }

    /// Converts a device position to model millimetres.
    pub fn client_to_model(&self, client: Point) -> Point {
        let vb = self.view_box();
        let scale = self.units_per_pixel();
        let (ox, oy) = self.fit_offsets(&vb, scale);
        Point::new(
            ((client.x - self.rect.left) * scale - ox + vb.x) / self.display_scale,
            ((client.y - self.rect.top) * scale - oy + vb.y) / self.display_scale,
        )
    }

    /// Converts model millimetres to a device position.
    pub fn model_to_client(&self, model: Point) -> Point {
        let vb = self.view_box();
        let scale = self.units_per_pixel();
        let (ox, oy) = self.fit_offsets(&vb, scale);
        Point::new(
            self.rect.left + (model.x * self.display_scale - vb.x + ox) / scale,
            self.rect.top + (model.y * self.display_scale - vb.y + oy) / scale,
        )
    }

    /// Wheel zoom around the cursor. Negative `delta_y` zooms in.
    ///
    /// Returns `false` when the zoom is already at the limit in that direction.
    pub fn zoom_at(&mut self, client: Point, delta_y: f64) -> bool {
        let target = if delta_y < 0.0 {
            self.zoom * ZOOM_STEP
        } else {
            self.zoom / ZOOM_STEP
        };
        self.zoom_to_point(client, target)
    }

    /// Sets the zoom while keeping the model point under `client` fixed.
    pub fn zoom_to_point(&mut self, client: Point, zoom: f64) -> bool {
        let zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        if zoom == self.zoom {
            return false;
        }
        let before = self.client_to_model(client);
        self.zoom = zoom;
        let after = self.client_to_model(client);
        self.pan = self.pan + (before - after) * self.display_scale;
        true
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::for_bin(&BinConfig::default())
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Viewport(zoom: {:.2}x, pan: {}, view: {})",
            self.zoom,
            self.pan,
            self.view_box()
        )
    }
}

/// Bin editor view box: the floor rectangle with a left/top margin and room
/// for handles on the right and bottom.
pub fn bin_view_box(config: &BinConfig) -> ViewBox {
    ViewBox::new(
        -BIN_VIEW_PADDING,
        -BIN_VIEW_PADDING,
        config.width_mm() * BIN_DISPLAY_SCALE + BIN_VIEW_EXTRA_WIDTH,
        config.height_mm() * BIN_DISPLAY_SCALE + BIN_VIEW_EXTRA_HEIGHT,
    )
}

/// Tool editor view box: outline bounds padded on every side. Without bounds
/// a 100 mm square around the origin is shown.
pub fn outline_view_box(bounds: Option<Bounds>) -> ViewBox {
    let b = bounds.unwrap_or(Bounds {
        min_x: -50.0,
        min_y: -50.0,
        max_x: 50.0,
        max_y: 50.0,
    });
    let s = TOOL_DISPLAY_SCALE;
    let pad = TOOL_VIEW_PADDING_MM;
    ViewBox::new(
        (b.min_x - pad) * s,
        (b.min_y - pad) * s,
        (b.width() + pad * 2.0) * s,
        (b.height() + pad * 2.0) * s,
    )
}
