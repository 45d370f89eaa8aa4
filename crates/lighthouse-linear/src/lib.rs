//! Closed-form position estimation from four photodiode projections.
//!
//! The estimator solves the 8×8 DLT system for the plane-to-sensor
//! homography, reads the object position from its columns, smooths the depth
//! across frames and reports the reprojection residual.

mod homography;
mod homography_pose;

pub use homography::*;
pub use homography_pose::*;
