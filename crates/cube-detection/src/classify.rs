use crate::color::CubeColor;
use crate::profile::CalibrationProfile;
use crate::sampler::RED_WRAP_BAND;

/// Saturated colors in the order they are tried. The first window that
/// contains a sample wins, so overlapping calibrations resolve here.
pub const SATURATED_PRECEDENCE: [CubeColor; 5] = [
    CubeColor::Green,
    CubeColor::Red,
    CubeColor::Blue,
    CubeColor::Orange,
    CubeColor::Yellow,
];

/// Resolves HSV samples to cube colors against a calibration profile.
///
/// `None` means the sample matched nothing. Colors missing from the profile
/// are skipped.
#[derive(Clone, Debug)]
pub struct Classifier {
    profile: CalibrationProfile,
}

impl Classifier {
    pub fn new(profile: CalibrationProfile) -> Self {
        Self { profile }
    }

    pub fn classify(&self, h: u8, s: u8, v: u8) -> Option<CubeColor> {
        let saturated = SATURATED_PRECEDENCE.into_iter().find(|&color| {
            self.profile
                .get(color)
                .is_some_and(|range| range.in_range(h, s, v))
        });
        if saturated.is_some() {
            return saturated;
        }

        // Red calibrated near 179 still has to catch hues just past 0.
        if h <= RED_WRAP_BAND {
            if let Some(red) = self.profile.get(CubeColor::Red) {
                if red.sv_in_range(s, v) {
                    return Some(CubeColor::Red);
                }
            }
        }

        // White last, its hue window is the whole circle.
        match self.profile.get(CubeColor::White) {
            Some(white) if white.sv_in_range(s, v) => Some(CubeColor::White),
            _ => None,
        }
    }

    pub fn classify_hsv(&self, hsv: [u8; 3]) -> Option<CubeColor> {
        self.classify(hsv[0], hsv[1], hsv[2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::ColorRange;

    fn range(lower: [u8; 3], upper: [u8; 3]) -> ColorRange {
        ColorRange { lower, upper }
    }

    fn full_profile() -> CalibrationProfile {
        let mut p = CalibrationProfile::new();
        p.insert(CubeColor::White, range([0, 0, 150], [179, 80, 255]));
        p.insert(CubeColor::Green, range([50, 60, 60], [70, 255, 255]));
        p.insert(CubeColor::Red, range([170, 60, 60], [179, 255, 255]));
        p.insert(CubeColor::Blue, range([100, 60, 60], [120, 255, 255]));
        p.insert(CubeColor::Orange, range([5, 60, 60], [20, 255, 255]));
        p.insert(CubeColor::Yellow, range([22, 60, 60], [40, 255, 255]));
        p
    }

    #[test]
    fn samples_inside_windows_resolve() {
        let c = Classifier::new(full_profile());
        assert_eq!(c.classify(60, 200, 200), Some(CubeColor::Green));
        assert_eq!(c.classify(110, 200, 200), Some(CubeColor::Blue));
        assert_eq!(c.classify(30, 200, 200), Some(CubeColor::Yellow));
        assert_eq!(c.classify(15, 200, 200), Some(CubeColor::Orange));
        assert_eq!(c.classify(175, 200, 200), Some(CubeColor::Red));
        assert_eq!(c.classify(90, 20, 220), Some(CubeColor::White));
    }

    #[test]
    fn window_edges_are_inclusive() {
        let c = Classifier::new(full_profile());
        assert_eq!(c.classify(50, 60, 60), Some(CubeColor::Green));
        assert_eq!(c.classify(70, 255, 255), Some(CubeColor::Green));
        assert_eq!(c.classify(90, 80, 150), Some(CubeColor::White));
    }

    #[test]
    fn red_wraps_around_hue_zero() {
        let c = Classifier::new(full_profile());
        assert_eq!(c.classify(178, 200, 200), Some(CubeColor::Red));
        assert_eq!(c.classify(3, 200, 200), Some(CubeColor::Red));
        assert_eq!(c.classify(0, 60, 60), Some(CubeColor::Red));
    }

    #[test]
    fn wrap_band_needs_red_saturation() {
        let c = Classifier::new(full_profile());
        // Too dull for red, bright and pale enough for white.
        assert_eq!(c.classify(3, 40, 200), Some(CubeColor::White));
        // Dull and dark: nothing.
        assert_eq!(c.classify(3, 40, 40), None);
    }

    #[test]
    fn saturated_color_beats_white() {
        let mut p = full_profile();
        // White calibrated generously enough to overlap green.
        p.insert(CubeColor::White, range([0, 0, 100], [179, 120, 255]));
        let c = Classifier::new(p);
        assert_eq!(c.classify(60, 100, 200), Some(CubeColor::Green));
        assert_eq!(c.classify(90, 100, 200), Some(CubeColor::White));
    }

    #[test]
    fn overlapping_saturated_windows_follow_definition_order() {
        let mut p = CalibrationProfile::new();
        p.insert(CubeColor::Yellow, range([10, 60, 60], [30, 255, 255]));
        p.insert(CubeColor::Orange, range([10, 60, 60], [30, 255, 255]));
        p.insert(CubeColor::Red, range([15, 60, 60], [25, 255, 255]));
        let c = Classifier::new(p);
        assert_eq!(c.classify(20, 200, 200), Some(CubeColor::Red));
        assert_eq!(c.classify(12, 200, 200), Some(CubeColor::Orange));
    }

    #[test]
    fn missing_entries_are_skipped() {
        let mut p = CalibrationProfile::new();
        p.insert(CubeColor::Blue, range([100, 60, 60], [120, 255, 255]));
        let c = Classifier::new(p);
        assert_eq!(c.classify(110, 200, 200), Some(CubeColor::Blue));
        assert_eq!(c.classify(3, 200, 200), None);
        assert_eq!(c.classify(0, 0, 255), None);

        let empty = Classifier::new(CalibrationProfile::new());
        assert_eq!(empty.classify_hsv([60, 200, 200]), None);
    }

    #[test]
    fn unmatched_sample_is_unknown() {
        let c = Classifier::new(full_profile());
        assert_eq!(c.classify(85, 200, 200), None);
        assert_eq!(c.classify(60, 30, 30), None);
    }
}
