pub mod classify;
pub mod color;
pub mod profile;
pub mod sampler;

pub use classify::Classifier;
pub use color::{rgb_to_hsv, ColorRange, CubeColor, HUE_MAX};
pub use profile::{CalibrationProfile, ProfileError};
