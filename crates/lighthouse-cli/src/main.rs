use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use lighthouse_core::PhotodiodeLayout;
use lighthouse_optim::jacobian_check::{check_jacobians, JacobianCheck};
use lighthouse_pipeline::{run_tracking, TrackerConfig, TrackingInput, TrackingReport};
use log::info;
use rand::{rngs::StdRng, SeedableRng};
use std::{fs, path::Path};

/// Lighthouse photodiode pose tracking.
#[derive(Debug, Parser)]
#[command(author, version, about = "Track a photodiode board from recorded lighthouse sweeps")]
struct Args {
    /// Path to JSON file containing TrackingInput.
    #[arg(long)]
    input: Option<String>,

    /// Optional path to JSON TrackerConfig. Defaults are used if omitted.
    #[arg(long)]
    config: Option<String>,

    /// Output format of the tracking result.
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Validate the analytic Jacobians at a random pose drawn from this seed.
    #[arg(long, value_name = "SEED")]
    check_jacobians: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Pretty-printed TrackingReport.
    Json,
    /// One QHM/QLM report line per frame.
    Lines,
}

fn load_json_file<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let data =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let value =
        serde_json::from_str(&data).with_context(|| format!("parsing {}", path.display()))?;
    Ok(value)
}

fn format_report(report: &TrackingReport, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(report)?,
        OutputFormat::Lines => report
            .lines()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n"),
    })
}

fn run_tracking_from_files(
    input_path: &str,
    config_path: Option<&str>,
    format: OutputFormat,
) -> Result<String> {
    let input: TrackingInput = load_json_file(Path::new(input_path))?;

    let config = if let Some(cfg_path) = config_path {
        TrackerConfig::from_json_file(Path::new(cfg_path))?
    } else {
        TrackerConfig::default()
    };

    let report = run_tracking(&input, &config);
    format_report(&report, format)
}

fn run_jacobian_check(layout: &PhotodiodeLayout, seed: u64) -> JacobianCheck {
    let mut rng = StdRng::seed_from_u64(seed);
    let check = check_jacobians(layout, &mut rng);
    info!("jacobian check with seed {seed} done");
    check
}

fn main() {
    env_logger::init();
    if let Err(err) = try_main() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn try_main() -> Result<()> {
    let args = Args::parse();
    if args.input.is_none() && args.check_jacobians.is_none() {
        bail!("nothing to do: pass --input and/or --check-jacobians");
    }

    if let Some(seed) = args.check_jacobians {
        let layout = match &args.input {
            Some(path) => load_json_file::<TrackingInput>(Path::new(path))?.layout,
            None => PhotodiodeLayout::default(),
        };
        let check = run_jacobian_check(&layout, seed);
        println!(
            "error Jg: {:.9e}, error Jf: {:.9e}",
            check.error_g, check.error_f
        );
    }

    if let Some(input) = &args.input {
        let out = run_tracking_from_files(input, args.config.as_deref(), args.format)?;
        println!("{out}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lighthouse_core::synthetic::{project, sweep_poses};
    use lighthouse_pipeline::{ReportLine, SeedStrategy};
    use tempfile::NamedTempFile;

    fn write_json<T: serde::Serialize>(value: &T, path: &Path) {
        serde_json::to_writer_pretty(fs::File::create(path).unwrap(), value).unwrap();
    }

    fn synthetic_input() -> TrackingInput {
        let layout = PhotodiodeLayout::vrduino();
        let frames = sweep_poses(4, 40.0, 0.2, -480.0)
            .iter()
            .map(|p| project(&layout, p))
            .collect();
        TrackingInput { layout, frames }
    }

    #[test]
    fn helper_smoke_test() {
        let input_file = NamedTempFile::new().unwrap();
        let config_file = NamedTempFile::new().unwrap();
        write_json(&synthetic_input(), input_file.path());
        write_json(
            &TrackerConfig {
                seed: SeedStrategy::PreviousFrame,
                ..TrackerConfig::default()
            },
            config_file.path(),
        );

        let json = run_tracking_from_files(
            input_file.path().to_str().unwrap(),
            Some(config_file.path().to_str().unwrap()),
            OutputFormat::Json,
        )
        .expect("cli helper should succeed");

        let report: TrackingReport = serde_json::from_str(&json).unwrap();
        assert_eq!(report.frames.len(), 4);
        assert_eq!(report.fresh_frames, 4);
        assert_eq!(report.config.seed, SeedStrategy::PreviousFrame);
    }

    #[test]
    fn lines_output_has_one_line_per_frame() {
        let input_file = NamedTempFile::new().unwrap();
        write_json(&synthetic_input(), input_file.path());

        let out = run_tracking_from_files(
            input_file.path().to_str().unwrap(),
            None,
            OutputFormat::Lines,
        )
        .unwrap();
        let lines: Vec<ReportLine> = out.lines().map(|l| l.parse().unwrap()).collect();
        assert_eq!(lines.len(), 4);
        assert!(lines.iter().all(|l| l.tag() == "QLM"));
    }

    #[test]
    fn missing_input_is_an_error() {
        let err = run_tracking_from_files("/nonexistent/frames.json", None, OutputFormat::Json)
            .unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/frames.json"));
    }

    #[test]
    fn jacobian_check_is_reproducible() {
        let layout = PhotodiodeLayout::vrduino();
        let a = run_jacobian_check(&layout, 5);
        let b = run_jacobian_check(&layout, 5);
        assert_eq!(a, b);
        assert!(a.error_g < 5e-2);
        assert!(a.error_f < 1e-4);
    }

    #[test]
    fn args_parse() {
        let args = Args::try_parse_from([
            "lighthouse",
            "--input",
            "frames.json",
            "--format",
            "lines",
            "--check-jacobians",
            "3",
        ])
        .unwrap();
        assert_eq!(args.format, OutputFormat::Lines);
        assert_eq!(args.check_jacobians, Some(3));
        assert!(args.config.is_none());
    }
}
