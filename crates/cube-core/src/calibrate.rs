use crate::event::{Flow, OperatorEvent};
use crate::frame::{Frame, FrameError, Rect};
use cube_detection::sampler::capture_sample;
use cube_detection::{CalibrationProfile, ProfileError};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CalibrationError {
    #[error("sampling box is unusable: {0}")]
    Frame(#[from] FrameError),

    #[error(transparent)]
    Profile(#[from] ProfileError),
}

/// Builds a calibration profile from samples taken in a fixed box.
pub struct CalibrationController {
    profile: CalibrationProfile,
    sample_box: Rect,
    profile_path: PathBuf,
    saved: bool,
}

impl CalibrationController {
    pub fn new(sample_box: Rect, profile_path: PathBuf) -> Self {
        Self {
            profile: CalibrationProfile::new(),
            sample_box,
            profile_path,
            saved: false,
        }
    }

    pub fn profile(&self) -> &CalibrationProfile {
        &self.profile
    }

    pub fn sample_box(&self) -> Rect {
        self.sample_box
    }

    pub fn saved(&self) -> bool {
        self.saved
    }

    pub fn handle(
        &mut self,
        event: OperatorEvent,
        frame: &Frame,
    ) -> Result<Flow, CalibrationError> {
        match event {
            OperatorEvent::CaptureSample(color) => {
                let hsv = frame.to_hsv();
                let region = hsv.region(self.sample_box)?;
                capture_sample(&mut self.profile, color, region);
            }
            OperatorEvent::SaveAndExit => {
                self.profile.save(&self.profile_path)?;
                self.saved = true;
                tracing::info!(
                    path = %self.profile_path.display(),
                    "Saved {} colors",
                    self.profile.len()
                );
                return Ok(Flow::Exit);
            }
            OperatorEvent::Quit => {
                tracing::info!("Quit without saving");
                return Ok(Flow::Exit);
            }
            OperatorEvent::TriggerScan | OperatorEvent::Reset => {}
        }
        Ok(Flow::Continue)
    }
}
