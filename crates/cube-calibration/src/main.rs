use anyhow::Context;
use clap::Parser;
use cube_core::calibrate::CalibrationController;
use cube_core::camera::{CameraSource, FrameSource};
use cube_core::event::{key_help, KeyMode};
use cube_core::preview::Preview;
use cube_core::{logging, Config, Flow};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "cube-calibrate",
    about = "Sample each cube color in the box and save the HSV ranges"
)]
struct Args {
    /// Path to the TOML configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where to write the profile, overrides `calibration.profile_path`
    #[arg(long)]
    profile: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = Config::load_or_default(args.config.as_deref());
    logging::init(&config.system.log_level);

    let profile_path = args
        .profile
        .unwrap_or_else(|| config.calibration.profile_path.clone());
    let mut controller = CalibrationController::new(config.calibration.sample_box, profile_path);

    let mut camera = CameraSource::open(&config.camera)?;
    camera.set_mirror(config.calibration.mirror);
    let mut frame = camera.next_frame().context("camera read failed")?;
    frame.region(controller.sample_box()).with_context(|| {
        format!(
            "calibration.sample_box does not fit the {}x{} camera frame, \
             adjust it or camera.width/camera.height",
            frame.width, frame.height
        )
    })?;
    let mut preview = Preview::open(
        "Calibration - press 's' to save",
        frame.width as usize,
        frame.height as usize,
        KeyMode::Calibrate,
    )?;

    println!("--- Color Calibration ---");
    println!("Point a color at the green box and press its key:");
    for line in key_help(KeyMode::Calibrate) {
        println!("  {line}");
    }

    let outline = [controller.sample_box()];
    while preview.is_open() {
        preview.show(&frame, &outline)?;

        for event in preview.events() {
            if controller.handle(event, &frame)? == Flow::Exit {
                return Ok(());
            }
        }

        frame = camera.next_frame().context("camera read failed")?;
    }

    tracing::info!(
        colors = controller.profile().len(),
        "Window closed without saving"
    );
    Ok(())
}
