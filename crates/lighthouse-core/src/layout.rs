//! Photodiode geometry and per-frame sensor-plane measurements.
//!
//! Both types store four 2D points and serialise as the flat
//! `[x0, y0, x1, y1, x2, y2, x3, y3]` array the firmware streams.

use crate::{Pt2, Real};
use serde::{Deserialize, Serialize};

/// Number of photodiodes on a tracked object.
pub const NUM_DIODES: usize = 4;

fn points_from_flat(v: [Real; 2 * NUM_DIODES]) -> [Pt2; NUM_DIODES] {
    std::array::from_fn(|i| Pt2::new(v[2 * i], v[2 * i + 1]))
}

fn points_to_flat(points: &[Pt2; NUM_DIODES]) -> [Real; 2 * NUM_DIODES] {
    std::array::from_fn(|k| {
        let p = &points[k / 2];
        if k % 2 == 0 {
            p.x
        } else {
            p.y
        }
    })
}

/// Positions of the four photodiodes relative to the object center (mm).
///
/// The layout is fixed per physical object and shared by both estimators.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[Real; 8]", into = "[Real; 8]")]
pub struct PhotodiodeLayout {
    points: [Pt2; NUM_DIODES],
}

impl PhotodiodeLayout {
    /// Build a layout from four object-plane points.
    pub fn new(points: [Pt2; NUM_DIODES]) -> Self {
        Self { points }
    }

    /// Build a layout from `[x0, y0, ..., x3, y3]`.
    pub fn from_flat(v: [Real; 2 * NUM_DIODES]) -> Self {
        Self::new(points_from_flat(v))
    }

    /// Stock VRduino board: diodes on a 84 × 50 mm rectangle.
    pub fn vrduino() -> Self {
        Self::from_flat([-42.0, 25.0, 42.0, 25.0, 42.0, -25.0, -42.0, -25.0])
    }

    pub fn points(&self) -> &[Pt2; NUM_DIODES] {
        &self.points
    }

    pub fn to_flat(&self) -> [Real; 2 * NUM_DIODES] {
        points_to_flat(&self.points)
    }
}

impl Default for PhotodiodeLayout {
    fn default() -> Self {
        Self::vrduino()
    }
}

impl From<[Real; 8]> for PhotodiodeLayout {
    fn from(v: [Real; 8]) -> Self {
        Self::from_flat(v)
    }
}

impl From<PhotodiodeLayout> for [Real; 8] {
    fn from(layout: PhotodiodeLayout) -> Self {
        layout.to_flat()
    }
}

/// Measured projections of the four photodiodes on the sensor plane.
///
/// Units match the sensor plane at unit distance from the lighthouse, i.e.
/// tangents of the sweep angles. Point `i` corresponds to
/// `PhotodiodeLayout::points()[i]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[Real; 8]", into = "[Real; 8]")]
pub struct Projection {
    points: [Pt2; NUM_DIODES],
}

impl Projection {
    pub fn new(points: [Pt2; NUM_DIODES]) -> Self {
        Self { points }
    }

    /// Build a projection from `[x0, y0, ..., x3, y3]`.
    pub fn from_flat(v: [Real; 2 * NUM_DIODES]) -> Self {
        Self::new(points_from_flat(v))
    }

    pub fn points(&self) -> &[Pt2; NUM_DIODES] {
        &self.points
    }

    pub fn to_flat(&self) -> [Real; 2 * NUM_DIODES] {
        points_to_flat(&self.points)
    }
}

impl From<[Real; 8]> for Projection {
    fn from(v: [Real; 8]) -> Self {
        Self::from_flat(v)
    }
}

impl From<Projection> for [Real; 8] {
    fn from(p: Projection) -> Self {
        p.to_flat()
    }
}
