//! Text lines the tracker streams to the host renderer.
//!
//! ```text
//! QHM qw qx qy qz x y z              homography orientation + position
//! QLM qw qx qy qz hx hy hz x y z     refined orientation, homography
//!                                    position, refined translation
//! ```
//!
//! Fields are separated by single spaces; numbers use Rust's shortest
//! round-trip float formatting.

use crate::FrameReport;
use lighthouse_core::{Real, Vec3};
use nalgebra::{Quaternion, UnitQuaternion};
use std::{fmt, num::ParseFloatError, str::FromStr};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReportLine {
    /// `QHM`: closed-form estimate only.
    Homography {
        orientation: UnitQuaternion<Real>,
        position: Vec3,
    },
    /// `QLM`: refined pose alongside the homography position.
    Lm {
        orientation: UnitQuaternion<Real>,
        homography_position: Vec3,
        translation: Vec3,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportParseError {
    #[error("empty report line")]
    Empty,
    #[error("unknown report tag {0:?}")]
    UnknownTag(String),
    #[error("{tag} line needs {expected} values, got {found}")]
    FieldCount {
        tag: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("field {index}: {source}")]
    InvalidNumber {
        index: usize,
        #[source]
        source: ParseFloatError,
    },
}

const HOMOGRAPHY_TAG: &str = "QHM";
const LM_TAG: &str = "QLM";

impl ReportLine {
    /// Line for a tracked frame: `QLM` once a refined pose exists, `QHM` while
    /// only the homography estimate is available.
    pub fn from_frame(frame: &FrameReport) -> Option<Self> {
        match (&frame.pose, &frame.homography) {
            (Some(pose), homography) => Some(Self::Lm {
                orientation: pose.quaternion(),
                homography_position: homography
                    .as_ref()
                    .map_or(pose.translation, |h| h.position),
                translation: pose.translation,
            }),
            (None, Some(h)) => Some(Self::Homography {
                orientation: h.pose_seed().quaternion(),
                position: h.position,
            }),
            (None, None) => None,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Self::Homography { .. } => HOMOGRAPHY_TAG,
            Self::Lm { .. } => LM_TAG,
        }
    }

    pub fn orientation(&self) -> &UnitQuaternion<Real> {
        match self {
            Self::Homography { orientation, .. } | Self::Lm { orientation, .. } => orientation,
        }
    }
}

fn write_vec3(f: &mut fmt::Formatter<'_>, v: &Vec3) -> fmt::Result {
    write!(f, " {} {} {}", v.x, v.y, v.z)
}

impl fmt::Display for ReportLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let q = self.orientation().quaternion();
        write!(f, "{} {} {} {} {}", self.tag(), q.w, q.i, q.j, q.k)?;
        match self {
            Self::Homography { position, .. } => write_vec3(f, position),
            Self::Lm {
                homography_position,
                translation,
                ..
            } => {
                write_vec3(f, homography_position)?;
                write_vec3(f, translation)
            }
        }
    }
}

impl FromStr for ReportLine {
    type Err = ReportParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut fields = s.split_whitespace();
        let tag = fields.next().ok_or(ReportParseError::Empty)?;
        let (tag, expected) = match tag {
            HOMOGRAPHY_TAG => (HOMOGRAPHY_TAG, 7),
            LM_TAG => (LM_TAG, 10),
            other => return Err(ReportParseError::UnknownTag(other.to_string())),
        };

        let values = fields
            .enumerate()
            .map(|(i, v)| {
                v.parse::<Real>().map_err(|source| ReportParseError::InvalidNumber {
                    index: i + 1,
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        if values.len() != expected {
            return Err(ReportParseError::FieldCount {
                tag,
                expected,
                found: values.len(),
            });
        }

        let orientation = UnitQuaternion::from_quaternion(Quaternion::new(
            values[0], values[1], values[2], values[3],
        ));
        let first = Vec3::new(values[4], values[5], values[6]);
        Ok(if tag == HOMOGRAPHY_TAG {
            Self::Homography {
                orientation,
                position: first,
            }
        } else {
            Self::Lm {
                orientation,
                homography_position: first,
                translation: Vec3::new(values[7], values[8], values[9]),
            }
        })
    }
}
