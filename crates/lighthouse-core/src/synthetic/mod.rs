//! Deterministic synthetic data helpers.
//!
//! Used by unit and integration tests across the workspace. Nothing here is
//! needed on the estimation path.

pub mod noise;
pub mod projection;

pub use noise::UniformSensorNoise;
pub use projection::{project, project_noisy, sweep_poses};
