//! Synthetic photodiode projections from known poses.

use super::noise::UniformSensorNoise;
use crate::{PhotodiodeLayout, Pose6, Projection, Pt2, Real, Vec3};

/// Project the layout through `pose` onto the unit-distance sensor plane.
///
/// Each diode `(ox, oy)` is placed at `(ox, oy, 0)` in the object frame,
/// moved into the lighthouse frame, and divided by its depth `-Z`.
pub fn project(layout: &PhotodiodeLayout, pose: &Pose6) -> Projection {
    let object = *layout.points();
    Projection::new(object.map(|o| {
        let p = pose.transform(&Vec3::new(o.x, o.y, 0.0));
        Pt2::new(p.x / -p.z, p.y / -p.z)
    }))
}

/// [`project`] followed by deterministic per-diode noise.
pub fn project_noisy(
    layout: &PhotodiodeLayout,
    pose: &Pose6,
    noise: &UniformSensorNoise,
    frame_idx: usize,
) -> Projection {
    let clean = project(layout, pose);
    Projection::new(std::array::from_fn(|i| {
        clean.points()[i] + noise.sample(frame_idx, i)
    }))
}

/// `n` poses sliding along X with a slow yaw, at constant depth `z`.
///
/// Translation X runs over `[-x_span, x_span]`, yaw (thetaY) over
/// `[-max_yaw, max_yaw]`.
pub fn sweep_poses(n: usize, x_span: Real, max_yaw: Real, z: Real) -> Vec<Pose6> {
    (0..n)
        .map(|i| {
            let t = if n > 1 {
                2.0 * i as Real / (n - 1) as Real - 1.0
            } else {
                0.0
            };
            Pose6::new(
                Vec3::new(0.05 * t, max_yaw * t, 0.02),
                Vec3::new(x_span * t, 15.0, z),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fronto_parallel_projection_scales_by_depth() {
        let layout = PhotodiodeLayout::vrduino();
        let pose = Pose6::from_position(Vec3::new(0.0, 0.0, -500.0));
        let proj = project(&layout, &pose);
        let p0 = proj.points()[0];
        assert!((p0.x - (-42.0 / 500.0)).abs() < 1e-15);
        assert!((p0.y - (25.0 / 500.0)).abs() < 1e-15);
    }

    #[test]
    fn noisy_projection_stays_within_bound() {
        let layout = PhotodiodeLayout::vrduino();
        let pose = Pose6::from_array([0.1, 0.2, 0.0, 10.0, 5.0, -400.0]);
        let noise = UniformSensorNoise {
            seed: 7,
            max_abs: 1e-4,
        };
        let clean = project(&layout, &pose);
        let noisy = project_noisy(&layout, &pose, &noise, 3);
        for (a, b) in clean.points().iter().zip(noisy.points()) {
            assert!((a - b).amax() <= 1e-4);
        }
        assert_ne!(clean, noisy);
    }

    #[test]
    fn sweep_covers_span() {
        let poses = sweep_poses(5, 100.0, 0.3, -600.0);
        assert_eq!(poses.len(), 5);
        assert_eq!(poses[0].translation.x, -100.0);
        assert_eq!(poses[4].translation.x, 100.0);
        assert!(poses.iter().all(|p| p.translation.z == -600.0));
    }
}
