//! SVG rendering of a bin layout.
//! Produces a standalone document in display units:
//! - Bin floor with grid lines and wall inset
//! - Tool pockets with even-odd fill so islands stay solid
//! - Cutouts and text labels

use std::fmt::Write;

use tracefinity_core::constants::{BIN_DISPLAY_SCALE, GRID_UNIT_MM, WALL_INSET_SLACK_MM};
use tracefinity_core::model::{BinConfig, BinData, Cutout, CutoutShape, PlacedTool, TextLabel};

use crate::geometry::outline_path;
use crate::smoothing::SmoothingTable;
use crate::viewport::bin_view_box;

const BIN_FILL: &str = "rgb(30, 41, 59)";
const GRID_STROKE: &str = "rgb(71, 85, 105)";
const WALL_STROKE: &str = "rgb(100, 116, 139)";
const TOOL_FILL: &str = "rgb(15, 23, 42)";
const TOOL_STROKE: &str = "rgb(148, 163, 184)";
const CUTOUT_FILL: &str = "rgb(2, 6, 23)";
const LABEL_FILL: &str = "rgb(226, 232, 240)";

/// Render a whole bin as an SVG document.
pub fn render_bin_svg(bin: &BinData, smoothing: &SmoothingTable) -> String {
    let config = &bin.bin_config;
    let vb = bin_view_box(config);
    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{}" width="{}" height="{}">"#,
        vb, vb.width, vb.height
    );
    svg.push_str(&render_floor(config));
    for tool in &bin.placed_tools {
        svg.push_str(&render_tool(tool, smoothing));
    }
    for label in &bin.text_labels {
        svg.push_str(&render_label(label));
    }
    svg.push_str("</svg>\n");
    svg
}

/// Bin rectangle, interior grid lines and the wall inset.
pub fn render_floor(config: &BinConfig) -> String {
    let s = BIN_DISPLAY_SCALE;
    let w = config.width_mm() * s;
    let h = config.height_mm() * s;
    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"  <rect x="0" y="0" width="{}" height="{}" rx="8" fill="{}"/>"#,
        w, h, BIN_FILL
    );

    let mut grid = String::new();
    for i in 1..config.grid_x {
        let x = i as f64 * GRID_UNIT_MM * s;
        let _ = write!(grid, "M {} 0 L {} {} ", x, x, h);
    }
    for j in 1..config.grid_y {
        let y = j as f64 * GRID_UNIT_MM * s;
        let _ = write!(grid, "M 0 {} L {} {} ", y, w, y);
    }
    if !grid.is_empty() {
        let _ = writeln!(
            out,
            r#"  <path d="{}" stroke="{}" stroke-width="1" stroke-dasharray="4,4" fill="none"/>"#,
            grid.trim_end(),
            GRID_STROKE
        );
    }

    let inset = (config.wall_thickness + WALL_INSET_SLACK_MM) * s;
    if w > 2.0 * inset && h > 2.0 * inset {
        let _ = writeln!(
            out,
            r#"  <rect x="{}" y="{}" width="{}" height="{}" rx="4" fill="none" stroke="{}" stroke-width="1"/>"#,
            inset,
            inset,
            w - 2.0 * inset,
            h - 2.0 * inset,
            WALL_STROKE
        );
    }
    out
}

/// A placed tool's pocket plus its cutouts.
pub fn render_tool(tool: &PlacedTool, smoothing: &SmoothingTable) -> String {
    let d = outline_path(&tool.outline, smoothing.render_level(&tool.tool_id), BIN_DISPLAY_SCALE);
    let mut out = String::new();
    if !d.is_empty() {
        let _ = writeln!(
            out,
            r#"  <path id="{}" d="{}" fill="{}" fill-rule="evenodd" stroke="{}" stroke-width="1"/>"#,
            escape(&tool.id),
            d,
            TOOL_FILL,
            TOOL_STROKE
        );
    }
    for cutout in &tool.outline.cutouts {
        out.push_str(&render_cutout(cutout));
    }
    out
}

pub fn render_cutout(cutout: &Cutout) -> String {
    let s = BIN_DISPLAY_SCALE;
    let cx = cutout.x * s;
    let cy = cutout.y * s;
    match cutout.shape {
        CutoutShape::Circle => format!(
            "  <circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{}\"/>\n",
            cx,
            cy,
            cutout.radius * s,
            CUTOUT_FILL
        ),
        CutoutShape::Square | CutoutShape::Rectangle => {
            let w = cutout.effective_width() * s;
            let h = cutout.effective_height() * s;
            let mut rect = format!(
                "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\"",
                cx - w / 2.0,
                cy - h / 2.0,
                w,
                h,
                CUTOUT_FILL
            );
            if cutout.rotation != 0.0 {
                let _ = write!(rect, " transform=\"rotate({} {} {})\"", cutout.rotation, cx, cy);
            }
            rect.push_str("/>\n");
            rect
        }
    }
}

pub fn render_label(label: &TextLabel) -> String {
    let s = BIN_DISPLAY_SCALE;
    let x = label.x * s;
    let y = label.y * s;
    let mut text = format!(
        "  <text x=\"{}\" y=\"{}\" font-size=\"{}\" text-anchor=\"middle\" dominant-baseline=\"central\" fill=\"{}\"",
        x,
        y,
        label.font_size * s,
        LABEL_FILL
    );
    if label.rotation != 0.0 {
        let _ = write!(text, " transform=\"rotate({} {} {})\"", label.rotation, x, y);
    }
    let _ = writeln!(text, ">{}</text>", escape(&label.text));
    text
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
