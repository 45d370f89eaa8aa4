//! Refinement seeded from the closed-form homography estimate.

use lighthouse_core::synthetic::{project, project_noisy, UniformSensorNoise};
use lighthouse_core::{PhotodiodeLayout, Pose6};
use lighthouse_linear::HomographyPose;
use lighthouse_optim::{LevenbergMarquardtPose, LmOptions};

#[test]
fn lm_improves_on_noisy_homography_seed() {
    let layout = PhotodiodeLayout::vrduino();
    let gt = Pose6::from_array([0.2, -0.35, 0.1, -35.0, 20.0, -420.0]);
    let noise = UniformSensorNoise {
        seed: 2024,
        max_abs: 2e-4,
    };
    let proj = project_noisy(&layout, &gt, &noise, 0);

    let mut homography = HomographyPose::new(layout);
    let seed = homography.compute_position(&proj).unwrap().pose_seed();

    let report = LevenbergMarquardtPose::new(layout).compute_pose(&proj, &seed);
    assert!(report.success);
    assert!(report.final_residual() <= report.initial_residual());
    assert!((report.pose.angles - gt.angles).amax() < 0.05, "{:?}", report.pose);
    assert!((report.pose.translation - gt.translation).amax() < 10.0);
}

#[test]
fn exact_seed_is_a_fixed_point() {
    let layout = PhotodiodeLayout::vrduino();
    let gt = Pose6::from_array([-0.1, 0.3, 0.25, 10.0, -5.0, -600.0]);
    let proj = project(&layout, &gt);

    let mut homography = HomographyPose::new(layout);
    let estimate = homography.compute_position(&proj).unwrap();
    let seed = estimate.pose_seed();
    assert!((seed.angles - gt.angles).amax() < 1e-9);
    assert!((seed.translation - gt.translation).amax() < 1e-6);

    let lm = LevenbergMarquardtPose::with_options(
        layout,
        LmOptions {
            max_iters: 3,
            ..LmOptions::default()
        },
    );
    let report = lm.compute_pose(&proj, &seed);
    assert!(report.success);
    assert_eq!(report.residuals.len(), 4);
    assert!(report.final_residual() < 1e-24);
    assert!((report.pose.angles - gt.angles).amax() < 1e-9);
}
