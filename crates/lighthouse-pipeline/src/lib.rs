//! Frame-by-frame tracking on top of the two pose estimators.
//!
//! - [`Tracker`] runs the homography estimator on every frame, seeds the
//!   Levenberg-Marquardt refinement from it (or from the previous frame) and
//!   keeps the last known-good pose for frames where refinement fails.
//! - [`TrackerConfig`] gathers the options of both estimators and is loaded
//!   from JSON.
//! - [`ReportLine`] is the text form of a tracked pose streamed to the host.
//! - [`run_tracking`] processes a whole recorded sequence.

mod config;
mod report;
mod run;
mod tracker;

pub use config::{SeedStrategy, TrackerConfig};
pub use report::{ReportLine, ReportParseError};
pub use run::{run_tracking, TrackingInput, TrackingReport};
pub use tracker::{FrameReport, Tracker};

pub use lighthouse_linear::HomographyOptions;
pub use lighthouse_optim::LmOptions;
