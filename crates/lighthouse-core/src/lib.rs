//! Core math and geometry primitives for lighthouse pose estimation.
//!
//! This crate provides the foundational building blocks used by the other
//! crates in the workspace:
//!
//! - scalar and matrix type aliases (`Real`, `Vec3`, `Pt2`, ...),
//! - a small fixed-size linear algebra kernel (product, transpose,
//!   Gauss-Jordan inversion) over `nalgebra` static matrices,
//! - the photodiode layout of a tracked object and per-frame projections,
//! - the 6-DoF pose parameterisation shared by both estimators,
//! - deterministic synthetic projections for tests and benchmarks.
//!
//! Projection model (conceptually):
//! `sensor = (X / -Z, Y / -Z)` with `(X, Y, Z) = R * (ox, oy, 0) + t`,
//! i.e. the lighthouse looks down its own `-Z` axis and the sensor plane sits
//! at unit distance.

/// Linear algebra kernel.
pub mod linalg;
/// Scalar and matrix type aliases.
pub mod math;
/// Photodiode layout and measured projections.
pub mod layout;
/// 6-DoF pose parameterisation.
pub mod pose;
/// Deterministic synthetic data helpers (tests/examples/benchmarks).
pub mod synthetic;

pub use layout::*;
pub use linalg::{invert, multiply, solve, transpose, LinalgError};
pub use math::*;
pub use pose::*;
