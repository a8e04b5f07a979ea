use crate::config::CameraConfig;
use crate::frame::{Frame, FrameConfig, FrameError, PixelFormat};
use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{
    CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType, Resolution,
};
use nokhwa::{Camera, NokhwaError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("cannot open camera {device_id}: {source}")]
    Open { device_id: u32, source: NokhwaError },

    #[error("cannot read frame: {0}")]
    Read(#[source] NokhwaError),

    #[error("camera returned an unusable frame: {0}")]
    Frame(#[from] FrameError),
}

/// Anything that hands out frames one at a time.
pub trait FrameSource {
    fn next_frame(&mut self) -> Result<Frame, CaptureError>;
}

pub struct CameraSource {
    camera: Camera,
    mirror: bool,
}

impl CameraSource {
    pub fn open(cfg: &CameraConfig) -> Result<Self, CaptureError> {
        let index = CameraIndex::Index(cfg.device_id);
        let format = CameraFormat::new(
            Resolution::new(cfg.width, cfg.height),
            FrameFormat::MJPEG,
            cfg.fps,
        );
        let requested = RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(format));

        let open_err = |source: NokhwaError| CaptureError::Open {
            device_id: cfg.device_id,
            source,
        };
        let mut camera = Camera::new(index, requested).map_err(open_err)?;
        camera.open_stream().map_err(open_err)?;
        tracing::info!(
            device_id = cfg.device_id,
            resolution = ?camera.resolution(),
            "Camera stream open"
        );

        Ok(Self {
            camera,
            mirror: cfg.mirror,
        })
    }

    pub fn set_mirror(&mut self, mirror: bool) {
        self.mirror = mirror;
    }
}

impl FrameSource for CameraSource {
    fn next_frame(&mut self) -> Result<Frame, CaptureError> {
        let buffer = self.camera.frame().map_err(CaptureError::Read)?;
        let decoded = buffer
            .decode_image::<RgbFormat>()
            .map_err(CaptureError::Read)?;

        let width = decoded.width();
        let height = decoded.height();
        let frame = Frame::new(FrameConfig {
            data: decoded.into_raw(),
            width,
            height,
            format: PixelFormat::RGB8,
        })?;

        Ok(if self.mirror { frame.mirrored() } else { frame })
    }
}

impl Drop for CameraSource {
    fn drop(&mut self) {
        if let Err(e) = self.camera.stop_stream() {
            tracing::warn!(error = %e, "Failed to stop camera stream");
        }
    }
}
