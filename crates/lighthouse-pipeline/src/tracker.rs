use crate::{SeedStrategy, TrackerConfig};
use lighthouse_core::{PhotodiodeLayout, Pose6, Projection};
use lighthouse_linear::{HomographyEstimate, HomographyPose};
use lighthouse_optim::{LevenbergMarquardtPose, LmReport};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Everything the tracker produced for one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameReport {
    pub index: usize,
    /// `None` when the DLT system was singular.
    pub homography: Option<HomographyEstimate>,
    /// `None` when no seed was available for refinement.
    pub lm: Option<LmReport>,
    /// Best pose known after this frame.
    pub pose: Option<Pose6>,
    /// `true` if `pose` was refined on this frame, `false` if it is stale.
    pub fresh: bool,
}

/// Stateful per-object tracker.
#[derive(Debug, Clone)]
pub struct Tracker {
    homography: HomographyPose,
    lm: LevenbergMarquardtPose,
    seed: SeedStrategy,
    last_good: Option<Pose6>,
    frames: usize,
}

impl Tracker {
    pub fn new(layout: PhotodiodeLayout, config: &TrackerConfig) -> Self {
        Self {
            homography: HomographyPose::with_options(layout, config.homography),
            lm: LevenbergMarquardtPose::with_options(layout, config.lm),
            seed: config.seed,
            last_good: None,
            frames: 0,
        }
    }

    pub fn last_good(&self) -> Option<&Pose6> {
        self.last_good.as_ref()
    }

    pub fn frames_processed(&self) -> usize {
        self.frames
    }

    pub fn reset(&mut self) {
        self.homography.reset();
        self.last_good = None;
        self.frames = 0;
    }

    /// Process one frame of projections.
    pub fn track(&mut self, projection: &Projection) -> FrameReport {
        let index = self.frames;
        self.frames += 1;

        let homography = match self.homography.compute_position(projection) {
            Ok(estimate) => Some(estimate),
            Err(err) => {
                warn!("frame {index}: no homography estimate ({err})");
                None
            }
        };

        let homography_seed = homography.as_ref().map(HomographyEstimate::pose_seed);
        let seed = match self.seed {
            SeedStrategy::Homography => homography_seed,
            SeedStrategy::PreviousFrame => self.last_good.or(homography_seed),
        };

        let lm = seed.map(|s| self.lm.compute_pose(projection, &s));
        let fresh = match &lm {
            Some(report) if report.success && report.final_residual().is_finite() => {
                debug!(
                    "frame {index}: refined, residual {:.3e} -> {:.3e}",
                    report.initial_residual(),
                    report.final_residual()
                );
                self.last_good = Some(report.pose);
                true
            }
            Some(_) => {
                warn!("frame {index}: refinement failed, keeping last good pose");
                false
            }
            None => false,
        };

        FrameReport {
            index,
            homography,
            lm,
            pose: self.last_good,
            fresh,
        }
    }
}
