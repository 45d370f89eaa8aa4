use anyhow::{Context, Result};
use lighthouse_linear::HomographyOptions;
use lighthouse_optim::LmOptions;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// Where the Levenberg-Marquardt refinement starts each frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedStrategy {
    /// Pose read back from the current frame's homography.
    #[default]
    Homography,
    /// Last known-good refined pose; the homography seed is used until one
    /// exists.
    PreviousFrame,
}

/// Options of the full tracking pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub homography: HomographyOptions,
    pub lm: LmOptions,
    pub seed: SeedStrategy,
}

impl TrackerConfig {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("reading tracker config {}", path.display()))?;
        let config = serde_json::from_str(&data)
            .with_context(|| format!("parsing tracker config {}", path.display()))?;
        Ok(config)
    }
}
