//! Iterative 6-DoF pose refinement for lighthouse tracking.
//!
//! The pose `x = [thetaX, thetaY, thetaZ, tX, tY, tZ]` is mapped to a
//! homography by `g(x)` and the homography to the four diode projections by
//! `f(h)`. Both mappings have closed-form Jacobians which are chained as
//! `J = Jf · Jg` inside a fixed-iteration Levenberg-Marquardt loop.

pub mod lm;
pub mod model;

#[cfg(any(test, feature = "jacobian-check"))]
pub mod jacobian_check;

pub use lm::{LevenbergMarquardtPose, LmOptions, LmReport};
