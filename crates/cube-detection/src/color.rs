use serde::{Deserialize, Serialize};

/// Largest hue step. Hue is stored OpenCV style, 0..=179 (degrees / 2).
pub const HUE_MAX: u8 = 179;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
// One of the six sticker colors of a standard cube.
pub enum CubeColor {
    White,
    Green,
    Red,
    Blue,
    Orange,
    Yellow,
}

impl CubeColor {
    /// Definition order. Also the classifier's tie-break order.
    pub const ALL: [CubeColor; 6] = [
        CubeColor::White,
        CubeColor::Green,
        CubeColor::Red,
        CubeColor::Blue,
        CubeColor::Orange,
        CubeColor::Yellow,
    ];

    /// Face letter this color maps to in solver notation.
    pub const fn face_letter(self) -> char {
        match self {
            CubeColor::White => 'U',
            CubeColor::Red => 'R',
            CubeColor::Green => 'F',
            CubeColor::Yellow => 'D',
            CubeColor::Orange => 'L',
            CubeColor::Blue => 'B',
        }
    }

    // Single-letter key used for calibration bindings.
    pub const fn key(self) -> char {
        match self {
            CubeColor::White => 'w',
            CubeColor::Green => 'g',
            CubeColor::Red => 'r',
            CubeColor::Blue => 'b',
            CubeColor::Orange => 'o',
            CubeColor::Yellow => 'y',
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            CubeColor::White => "White",
            CubeColor::Green => "Green",
            CubeColor::Red => "Red",
            CubeColor::Blue => "Blue",
            CubeColor::Orange => "Orange",
            CubeColor::Yellow => "Yellow",
        }
    }
}

impl std::fmt::Display for CubeColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
// Inclusive HSV window, `[h, s, v]` on each side.
pub struct ColorRange {
    pub lower: [u8; 3],
    pub upper: [u8; 3],
}

impl ColorRange {
    pub fn in_range(&self, h: u8, s: u8, v: u8) -> bool {
        h >= self.lower[0] && h <= self.upper[0] && self.sv_in_range(s, v)
    }

    // Saturation and value only; hue is ignored.
    pub fn sv_in_range(&self, s: u8, v: u8) -> bool {
        s >= self.lower[1] && s <= self.upper[1] && v >= self.lower[2] && v <= self.upper[2]
    }
}

// Converts an RGB triple to 8-bit HSV with hue halved into 0..=179.
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> (u8, u8, u8) {
    let r = r as f32 / 255.0;
    let g = g as f32 / 255.0;
    let b = b as f32 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let h = if delta == 0.0 {
        0.0
    } else if max == r {
        60.0 * (((g - b) / delta) % 6.0)
    } else if max == g {
        60.0 * (((b - r) / delta) + 2.0)
    } else {
        60.0 * (((r - g) / delta) + 4.0)
    };

    let h = if h < 0.0 { h + 360.0 } else { h };
    // 359.x degrees rounds to 180, which is hue 0 again.
    let h_byte = ((h / 2.0).round() as u16 % (HUE_MAX as u16 + 1)) as u8;

    let s = if max == 0.0 { 0.0 } else { delta / max };
    let s_byte = (s * 255.0).round() as u8;
    let v_byte = (max * 255.0).round() as u8;

    (h_byte, s_byte, v_byte)
}
