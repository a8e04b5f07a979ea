use anyhow::Context;
use clap::Parser;
use cube_core::camera::{CameraSource, FrameSource};
use cube_core::event::{key_help, KeyMode};
use cube_core::preview::{marker, Preview};
use cube_core::scan::check_centers;
use cube_core::scanner::{ScanController, SCAN_INSTRUCTIONS};
use cube_core::solver::CommandSolver;
use cube_core::{logging, Config, Face, Flow};
use cube_detection::{CalibrationProfile, Classifier};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "cube-scan", about = "Scan a cube face by face and hand it to a solver")]
struct Args {
    /// Path to the TOML configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Calibration profile, overrides `calibration.profile_path`
    #[arg(long)]
    profile: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = Config::load_or_default(args.config.as_deref());
    logging::init(&config.system.log_level);
    tracing::info!("Cube scanner waking up...");

    let profile_path = args
        .profile
        .unwrap_or_else(|| config.calibration.profile_path.clone());
    let profile = CalibrationProfile::load(&profile_path).context("cannot start scanning")?;

    let solver = CommandSolver::new(config.solver.command.clone(), config.solver.args.clone());
    let mut controller =
        ScanController::new(Classifier::new(profile), config.scan.sticker_centers, solver);

    let mut camera = CameraSource::open(&config.camera)?;
    let mut frame = camera.next_frame().context("camera read failed")?;
    check_centers(controller.sticker_centers(), frame.width, frame.height).with_context(|| {
        format!(
            "scan.sticker_centers do not fit the {}x{} camera frame, \
             adjust them or camera.width/camera.height",
            frame.width, frame.height
        )
    })?;
    let mut preview = Preview::open(
        "Cube Scanner",
        frame.width as usize,
        frame.height as usize,
        KeyMode::Scan,
    )?;
    let markers: Vec<_> = controller
        .sticker_centers()
        .iter()
        .map(|&center| marker(center, config.scan.marker_radius))
        .collect();

    for line in SCAN_INSTRUCTIONS {
        println!("{line}");
    }
    println!("{}", key_help(KeyMode::Scan).join(" | "));
    tracing::info!("Show {}", Face::Up);

    while preview.is_open() {
        controller.preview(&frame)?;
        preview.show(&frame, &markers)?;

        for event in preview.events() {
            if controller.handle(event, &frame)? == Flow::Exit {
                return Ok(());
            }
        }

        frame = camera.next_frame().context("camera read failed")?;
    }

    Ok(())
}
