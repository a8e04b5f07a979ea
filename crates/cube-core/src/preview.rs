use crate::event::{event_for_key, KeyMode, OperatorEvent};
use crate::frame::{Frame, Rect};
use minifb::{KeyRepeat, Window, WindowOptions};

const OUTLINE: u32 = 0x0000ff00;

/// Live camera window with the sampling regions outlined. Also the source of
/// operator key presses.
pub struct Preview {
    window: Window,
    mode: KeyMode,
}

impl Preview {
    pub fn open(
        title: &str,
        width: usize,
        height: usize,
        mode: KeyMode,
    ) -> Result<Self, minifb::Error> {
        let mut window = Window::new(title, width, height, WindowOptions::default())?;
        window.set_target_fps(60);
        Ok(Self { window, mode })
    }

    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    pub fn show(&mut self, frame: &Frame, outlines: &[Rect]) -> Result<(), minifb::Error> {
        let mut buf = frame.frame_to_u32();
        for rect in outlines {
            draw_outline(&mut buf, frame.width, frame.height, *rect);
        }
        self.window
            .update_with_buffer(&buf, frame.width as usize, frame.height as usize)
    }

    // Keys pressed since the last update, as operator events.
    pub fn events(&self) -> Vec<OperatorEvent> {
        self.window
            .get_keys_pressed(KeyRepeat::No)
            .into_iter()
            .filter_map(|key| event_for_key(self.mode, key))
            .collect()
    }
}

/// Square of half-width `radius` around `center`, clipped at zero.
pub fn marker(center: [u32; 2], radius: u32) -> Rect {
    let [x, y] = center;
    Rect {
        x: x.saturating_sub(radius),
        y: y.saturating_sub(radius),
        width: radius * 2,
        height: radius * 2,
    }
}

// Paints a 2px border; pixels past the frame edge are skipped.
fn draw_outline(buf: &mut [u32], width: u32, height: u32, rect: Rect) {
    let x_end = (rect.x + rect.width).min(width);
    let y_end = (rect.y + rect.height).min(height);
    for y in rect.y..y_end {
        for x in rect.x..x_end {
            let edge = x < rect.x + 2 || y < rect.y + 2 || x + 2 >= x_end || y + 2 >= y_end;
            if edge {
                buf[(y * width + x) as usize] = OUTLINE;
            }
        }
    }
}
