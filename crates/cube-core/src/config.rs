use crate::frame::Rect;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

// 3x3 grid around the middle of a 640x480 frame, 70px apart.
#[rustfmt::skip]
const DEFAULT_STICKER_CENTERS: [[u32; 2]; 9] = [
    [250, 190], [320, 190], [390, 190],
    [250, 260], [320, 260], [390, 260],
    [250, 330], [320, 330], [390, 330],
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub system: SystemConfig,
    pub camera: CameraConfig,
    pub calibration: CalibrationConfig,
    pub scan: ScanConfig,
    pub solver: SolverConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SystemConfig {
    pub log_level: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CameraConfig {
    pub device_id: u32,
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    /// Flip frames left to right while scanning.
    pub mirror: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CalibrationConfig {
    pub profile_path: PathBuf,
    pub sample_box: Rect,
    /// The calibration preview is mirrored unless turned off.
    pub mirror: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Row-major `[x, y]` sticker centers in source pixels.
    pub sticker_centers: [[u32; 2]; 9],
    /// Half-width of the preview box drawn around each center.
    pub marker_radius: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SolverConfig {
    pub command: String,
    pub args: Vec<String>,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            device_id: 0,
            width: 640,
            height: 480,
            fps: 30,
            mirror: false,
        }
    }
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        // 50px box centered in a 640x480 frame.
        Self {
            profile_path: PathBuf::from("colors.json"),
            sample_box: Rect {
                x: 295,
                y: 215,
                width: 50,
                height: 50,
            },
            mirror: true,
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            sticker_centers: DEFAULT_STICKER_CENTERS,
            marker_radius: 10,
        }
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            command: "kociemba".to_string(),
            args: Vec::new(),
        }
    }
}

impl Config {
    // Load config from file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    // Load config from `path`, or the default location, falling back to the
    // in-memory defaults when the file can't be used.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_PATH));
        match Config::from_file(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                // Logging is configured from this file, so it isn't up yet.
                eprintln!("Could not load configuration: {}", e);
                eprintln!("Using default configuration");
                Config::default()
            }
        }
    }
}
