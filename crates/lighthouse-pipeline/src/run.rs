use crate::{FrameReport, ReportLine, Tracker, TrackerConfig};
use lighthouse_core::{PhotodiodeLayout, Projection};
use log::info;
use serde::{Deserialize, Serialize};

/// A recorded sequence of frames for one tracked object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingInput {
    /// Defaults to the VRduino layout when omitted.
    #[serde(default)]
    pub layout: PhotodiodeLayout,
    pub frames: Vec<Projection>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingReport {
    pub layout: PhotodiodeLayout,
    pub config: TrackerConfig,
    pub frames: Vec<FrameReport>,
    /// Frames on which the refined pose was updated.
    pub fresh_frames: usize,
}

impl TrackingReport {
    /// One `QHM`/`QLM` line per frame that produced any estimate.
    pub fn lines(&self) -> Vec<ReportLine> {
        self.frames.iter().filter_map(ReportLine::from_frame).collect()
    }
}

/// Track every frame of `input` in order with a fresh [`Tracker`].
pub fn run_tracking(input: &TrackingInput, config: &TrackerConfig) -> TrackingReport {
    let mut tracker = Tracker::new(input.layout, config);
    let frames: Vec<FrameReport> = input.frames.iter().map(|p| tracker.track(p)).collect();
    let fresh_frames = frames.iter().filter(|f| f.fresh).count();

    info!(
        "tracked {} frames, {} refined, seed {:?}",
        frames.len(),
        fresh_frames,
        config.seed
    );

    TrackingReport {
        layout: input.layout,
        config: *config,
        frames,
        fresh_frames,
    }
}
