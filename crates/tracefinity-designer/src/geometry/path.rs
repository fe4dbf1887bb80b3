//! Path construction for outlines with islands.
//!
//! Outlines are emitted as one path per ring and rely on the even-odd fill
//! rule to punch islands out of the outer ring.

use lyon::math::point;
use lyon::path::{Event, Path};
use std::fmt::Write;

use tracefinity_core::model::{Point, Ring};

/// Build a lyon path for an outer ring followed by its islands.
///
/// Every coordinate is multiplied by `scale`. Empty rings are skipped.
pub fn build_lyon_path(outer: &[Point], interiors: &[Ring], scale: f64) -> Path {
    let mut builder = Path::builder();
    for ring in std::iter::once(outer).chain(interiors.iter().map(|r| r.as_slice())) {
        let mut iter = ring.iter();
        let Some(first) = iter.next() else {
            continue;
        };
        builder.begin(point((first.x * scale) as f32, (first.y * scale) as f32));
        for p in iter {
            builder.line_to(point((p.x * scale) as f32, (p.y * scale) as f32));
        }
        builder.close();
    }
    builder.build()
}

/// SVG `d` attribute for a lyon path.
pub fn svg_path_data(path: &Path) -> String {
    let mut d = String::new();
    for event in path.iter() {
        if !d.is_empty() {
            d.push(' ');
        }
        let _ = match event {
            Event::Begin { at } => write!(d, "M {} {}", at.x, at.y),
            Event::Line { to, .. } => write!(d, "L {} {}", to.x, to.y),
            Event::Quadratic { ctrl, to, .. } => {
                write!(d, "Q {} {} {} {}", ctrl.x, ctrl.y, to.x, to.y)
            }
            Event::Cubic {
                ctrl1, ctrl2, to, ..
            } => write!(
                d,
                "C {} {} {} {} {} {}",
                ctrl1.x, ctrl1.y, ctrl2.x, ctrl2.y, to.x, to.y
            ),
            Event::End { close: true, .. } => write!(d, "Z"),
            Event::End { close: false, .. } => {
                d.pop();
                Ok(())
            }
        };
    }
    d
}

/// Build an SVG path `d` string for an outer ring followed by its islands.
pub fn build_path(outer: &[Point], interiors: &[Ring], scale: f64) -> String {
    svg_path_data(&build_lyon_path(outer, interiors, scale))
}
