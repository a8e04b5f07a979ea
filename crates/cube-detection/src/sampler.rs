//! Derives a calibrated [`ColorRange`] from a patch of HSV pixels.
//!
//! The hue window is centered on the patch's median hue, which ignores
//! specular highlights and shadowed edges inside the sampling box. Saturation
//! and value get wide fixed windows. White is matched on low saturation and
//! high brightness instead of hue, and red snaps to a band at whichever end of
//! the hue circle its median falls on.

use crate::color::{ColorRange, CubeColor, HUE_MAX};
use crate::profile::CalibrationProfile;
use ndarray::{ArrayView3, Axis};

const HUE_MARGIN: f32 = 10.0;
const SAT_MIN: u8 = 60;
const VAL_MIN: u8 = 60;

const WHITE_SAT_MAX: u8 = 80;
const WHITE_VAL_MIN: u8 = 150;

/// Red's low band is `0..=RED_WRAP_BAND`; the high band starts at
/// `HUE_MAX + 1 - RED_WRAP_BAND`.
pub const RED_WRAP_BAND: u8 = 10;

// Median of the hue channel of an `(height, width, 3)` HSV patch.
// Even counts average the two middle values.
pub fn median_hue(region: ArrayView3<u8>) -> Option<f32> {
    let mut hues: Vec<u8> = region.index_axis(Axis(2), 0).iter().copied().collect();
    if hues.is_empty() {
        return None;
    }
    hues.sort_unstable();

    let mid = hues.len() / 2;
    let median = if hues.len() % 2 == 0 {
        (hues[mid - 1] as f32 + hues[mid] as f32) / 2.0
    } else {
        hues[mid] as f32
    };
    Some(median)
}

/// Window for `color` given the median hue of its sample.
pub fn range_for(color: CubeColor, median_hue: f32) -> ColorRange {
    let hue_max = HUE_MAX as f32;
    let clamp_hue = |h: f32| h.clamp(0.0, hue_max) as u8;

    let mut lower = [clamp_hue(median_hue - HUE_MARGIN), SAT_MIN, VAL_MIN];
    let mut upper = [clamp_hue(median_hue + HUE_MARGIN), 255, 255];

    match color {
        CubeColor::White => {
            lower = [0, 0, WHITE_VAL_MIN];
            upper = [HUE_MAX, WHITE_SAT_MAX, 255];
        }
        CubeColor::Red => {
            let band = RED_WRAP_BAND as f32;
            if median_hue <= band {
                lower[0] = 0;
                upper[0] = RED_WRAP_BAND;
            } else if median_hue >= hue_max + 1.0 - band {
                lower[0] = HUE_MAX + 1 - RED_WRAP_BAND;
                upper[0] = HUE_MAX;
            }
        }
        _ => {}
    }

    ColorRange { lower, upper }
}

/// Calibrates `color` from an HSV patch and stores the result in `profile`.
///
/// An empty patch leaves the profile untouched.
pub fn capture_sample(
    profile: &mut CalibrationProfile,
    color: CubeColor,
    region: ArrayView3<u8>,
) -> Option<ColorRange> {
    let Some(median) = median_hue(region) else {
        tracing::warn!(%color, "Empty sampling region, nothing captured");
        return None;
    };
    let range = range_for(color, median);
    profile.insert(color, range);
    tracing::info!(
        %color,
        median_hue = median,
        lower = ?range.lower,
        upper = ?range.upper,
        "Captured color sample"
    );
    Some(range)
}
