use cube_detection::rgb_to_hsv;
use ndarray::{s, ArrayView3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Debug)]
// Represents an image frame with raw pixel data and dimensions.
pub struct Frame {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
}

#[derive(Clone, Copy, Debug, PartialEq)]
// Describes how pixels are laid out and how many bytes each uses.
pub enum PixelFormat {
    RGB8, // 3 bytes per pixel (R, G, B)
    HSV,  // 3 bytes per pixel (H 0..=179, S, V)
}

impl PixelFormat {
    // Returns how many bytes each pixel uses for this format.
    pub const fn bytes_per_pixel(&self) -> u32 {
        match self {
            PixelFormat::RGB8 | PixelFormat::HSV => 3,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum FrameError {
    #[error("Buffer size doesn't match: expected {expected}, got {actual}")]
    InvalidDimensions { expected: usize, actual: usize },

    #[error("Provided dimensions are zero")]
    ZeroDimensions,

    #[error("Point ({x}, {y}) is outside the {width}x{height} frame")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
}

/// Axis-aligned pixel rectangle, top-left anchored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

pub struct FrameConfig {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
}

impl Frame {
    // Validates buffer size against dimensions and constructs a frame.
    pub fn new(config: FrameConfig) -> Result<Self, FrameError> {
        if config.width == 0 || config.height == 0 {
            return Err(FrameError::ZeroDimensions);
        }

        let expected = config.width as usize
            * config.height as usize
            * config.format.bytes_per_pixel() as usize;
        if config.data.len() != expected {
            return Err(FrameError::InvalidDimensions {
                expected,
                actual: config.data.len(),
            });
        }

        Ok(Self {
            data: config.data,
            width: config.width,
            height: config.height,
            format: config.format,
        })
    }

    // Returns the pixel bytes at (x, y) if inside bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let bytes_per_pixel = self.format.bytes_per_pixel() as usize;
        let index = ((y * self.width + x) as usize) * bytes_per_pixel;
        self.data.get(index..index + bytes_per_pixel)
    }

    // HSV triple at (x, y). Converts on the fly for non-HSV frames.
    pub fn hsv_at(&self, x: u32, y: u32) -> Result<[u8; 3], FrameError> {
        let pixel = self.get_pixel(x, y).ok_or(FrameError::OutOfBounds {
            x,
            y,
            width: self.width,
            height: self.height,
        })?;
        if self.format == PixelFormat::HSV {
            return Ok([pixel[0], pixel[1], pixel[2]]);
        }
        let (h, s, v) = rgb_to_hsv(pixel[0], pixel[1], pixel[2]);
        Ok([h, s, v])
    }

    // (height, width, channels) view over the raw bytes.
    pub fn view(&self) -> Result<ArrayView3<'_, u8>, FrameError> {
        let shape = (
            self.height as usize,
            self.width as usize,
            self.format.bytes_per_pixel() as usize,
        );
        ArrayView3::from_shape(shape, &self.data).map_err(|_| FrameError::InvalidDimensions {
            expected: shape.0 * shape.1 * shape.2,
            actual: self.data.len(),
        })
    }

    // Sub-view of `rect`, rejected if any part lies outside the frame.
    pub fn region(&self, rect: Rect) -> Result<ArrayView3<'_, u8>, FrameError> {
        let x_end = rect.x.saturating_add(rect.width);
        let y_end = rect.y.saturating_add(rect.height);
        if x_end > self.width || y_end > self.height {
            return Err(FrameError::OutOfBounds {
                x: x_end.saturating_sub(1),
                y: y_end.saturating_sub(1),
                width: self.width,
                height: self.height,
            });
        }
        let (x0, y0) = (rect.x as usize, rect.y as usize);
        Ok(self
            .view()?
            .slice_move(s![y0..y_end as usize, x0..x_end as usize, ..]))
    }

    // Flips the frame left to right, like a mirror.
    pub fn mirrored(&self) -> Frame {
        let bytes_per_pixel = self.format.bytes_per_pixel() as usize;
        let row_len = self.width as usize * bytes_per_pixel;
        let mut new_data = Vec::with_capacity(self.data.len());

        for row in self.data.chunks_exact(row_len) {
            for pixel in row.chunks_exact(bytes_per_pixel).rev() {
                new_data.extend_from_slice(pixel);
            }
        }

        Frame {
            data: new_data,
            width: self.width,
            height: self.height,
            format: self.format,
        }
    }

    // Converts to 32-bit 0RGB buffer for the preview window. HSV frames
    // show their V channel.
    pub fn frame_to_u32(&self) -> Vec<u32> {
        let pack = |r: u8, g: u8, b: u8| ((r as u32) << 16) | ((g as u32) << 8) | (b as u32);
        let format_size = self.format.bytes_per_pixel() as usize;
        self.data
            .chunks_exact(format_size)
            .map(|p| match self.format {
                PixelFormat::HSV => pack(p[2], p[2], p[2]),
                PixelFormat::RGB8 => pack(p[0], p[1], p[2]),
            })
            .collect()
    }

    // Converts the frame into HSV pixel format.
    pub fn to_hsv(&self) -> Frame {
        if self.format == PixelFormat::HSV {
            return self.clone();
        }

        let capacity = (self.height * self.width * 3) as usize;
        let mut new_data = Vec::with_capacity(capacity);
        let format_size = self.format.bytes_per_pixel() as usize;
        for pixel in self.data.chunks_exact(format_size) {
            let (h, s, v) = rgb_to_hsv(pixel[0], pixel[1], pixel[2]);
            new_data.extend([h, s, v]);
        }

        Frame {
            data: new_data,
            width: self.width,
            height: self.height,
            format: PixelFormat::HSV,
        }
    }
}
