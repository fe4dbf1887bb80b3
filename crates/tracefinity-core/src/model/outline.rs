//! Outline geometry shared by library tools and placed tools.

use serde::{Deserialize, Serialize};

use super::cutout::Cutout;
use super::point::{Bounds, Point, Ring};
use crate::error::ModelError;

/// Fold an accumulated rotation back into `(-360, 360)`.
///
/// The sign is kept, so `-90` and `270` stay distinct.
pub fn normalize_rotation(degrees: f64) -> f64 {
    degrees % 360.0
}

/// Outer ring, islands and cutouts of a silhouette.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Outline {
    pub points: Ring,
    #[serde(default)]
    pub interior_rings: Vec<Ring>,
    #[serde(default, rename = "finger_holes")]
    pub cutouts: Vec<Cutout>,
}

impl Outline {
    pub fn new(points: Ring) -> Self {
        Self {
            points,
            interior_rings: Vec::new(),
            cutouts: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Reject outlines whose outer ring cannot bound an area.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.points.len() < 3 {
            return Err(ModelError::DegenerateRing {
                points: self.points.len(),
            });
        }
        Ok(())
    }

    /// Arithmetic mean of the outer ring's points.
    pub fn centroid(&self) -> Option<Point> {
        if self.points.is_empty() {
            return None;
        }
        let n = self.points.len() as f64;
        let sum = self
            .points
            .iter()
            .fold(Point::ORIGIN, |acc, p| acc + *p);
        Some(sum * (1.0 / n))
    }

    /// Bounds of the outer ring.
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::of_points(&self.points)
    }

    /// Bounds of the outer ring and every cutout's extent.
    pub fn bounds_with_cutouts(&self) -> Option<Bounds> {
        let mut bounds = self.bounds();
        for c in &self.cutouts {
            let cb = c.bounds();
            bounds = Some(match bounds {
                Some(b) => b.union(&cb),
                None => cb,
            });
        }
        bounds
    }

    /// Translate every point, island and cutout centre.
    pub fn translate(&mut self, delta: Point) {
        for p in &mut self.points {
            *p = *p + delta;
        }
        for ring in &mut self.interior_rings {
            for p in ring {
                *p = *p + delta;
            }
        }
        for c in &mut self.cutouts {
            c.set_center(c.center() + delta);
        }
    }

    /// Copy translated by `delta`.
    pub fn translated(&self, delta: Point) -> Outline {
        let mut out = self.clone();
        out.translate(delta);
        out
    }

    /// Copy rotated about `pivot`.
    ///
    /// Cutout centres always follow the rotation. Their own `rotation` is
    /// advanced by the same angle only when `spin_cutouts` is set.
    pub fn rotated_about(&self, pivot: &Point, degrees: f64, spin_cutouts: bool) -> Outline {
        Outline {
            points: self
                .points
                .iter()
                .map(|p| p.rotated_about(pivot, degrees))
                .collect(),
            interior_rings: self
                .interior_rings
                .iter()
                .map(|ring| ring.iter().map(|p| p.rotated_about(pivot, degrees)).collect())
                .collect(),
            cutouts: self
                .cutouts
                .iter()
                .map(|c| {
                    let mut c = c.clone();
                    c.set_center(c.center().rotated_about(pivot, degrees));
                    if spin_cutouts {
                        c.rotation = normalize_rotation(c.rotation + degrees);
                    }
                    c
                })
                .collect(),
        }
    }
}
