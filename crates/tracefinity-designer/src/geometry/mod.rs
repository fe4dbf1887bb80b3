//! Pure geometry on rings of model-space points.

pub mod hit;
pub mod path;
pub mod simplify;
pub mod smooth;

pub use hit::{in_filled_area, inside_cutout_area, point_in_ring};
pub use path::{build_lyon_path, build_path, svg_path_data};
pub use simplify::{simplify, simplify_polyline};
pub use smooth::{outline_path, smooth, smooth_default, smooth_ring, smoothing_epsilon};
