use cube_detection::CubeColor;
use minifb::Key;

/// Operator commands, independent of how they were entered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperatorEvent {
    CaptureSample(CubeColor),
    SaveAndExit,
    Quit,
    TriggerScan,
    Reset,
}

/// Whether the control loop keeps going after an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Which key table applies. `r` captures red while calibrating but resets
/// while scanning.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyMode {
    Calibrate,
    Scan,
}

pub fn event_for_key(mode: KeyMode, key: Key) -> Option<OperatorEvent> {
    if key == Key::Escape || key == Key::Q {
        return Some(OperatorEvent::Quit);
    }
    match mode {
        KeyMode::Calibrate => match key {
            Key::S => Some(OperatorEvent::SaveAndExit),
            Key::W => Some(OperatorEvent::CaptureSample(CubeColor::White)),
            Key::G => Some(OperatorEvent::CaptureSample(CubeColor::Green)),
            Key::R => Some(OperatorEvent::CaptureSample(CubeColor::Red)),
            Key::B => Some(OperatorEvent::CaptureSample(CubeColor::Blue)),
            Key::O => Some(OperatorEvent::CaptureSample(CubeColor::Orange)),
            Key::Y => Some(OperatorEvent::CaptureSample(CubeColor::Yellow)),
            _ => None,
        },
        KeyMode::Scan => match key {
            Key::Space => Some(OperatorEvent::TriggerScan),
            Key::R => Some(OperatorEvent::Reset),
            _ => None,
        },
    }
}

/// Help lines for the key table, in display order.
pub fn key_help(mode: KeyMode) -> Vec<String> {
    match mode {
        KeyMode::Calibrate => {
            let mut lines: Vec<String> = CubeColor::ALL
                .iter()
                .map(|c| format!("'{}' = {}", c.key(), c))
                .collect();
            lines.push("'s' = save and exit".to_string());
            lines.push("'q' = exit without saving".to_string());
            lines
        }
        KeyMode::Scan => vec![
            "'Space' = scan".to_string(),
            "'r' = reset".to_string(),
            "'q' = quit".to_string(),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn r_depends_on_mode() {
        assert_eq!(
            event_for_key(KeyMode::Calibrate, Key::R),
            Some(OperatorEvent::CaptureSample(CubeColor::Red))
        );
        assert_eq!(
            event_for_key(KeyMode::Scan, Key::R),
            Some(OperatorEvent::Reset)
        );
    }

    #[test]
    fn calibration_keys_cover_every_color() {
        for color in CubeColor::ALL {
            let hits = [Key::W, Key::G, Key::R, Key::B, Key::O, Key::Y]
                .into_iter()
                .filter(|&k| {
                    let event = event_for_key(KeyMode::Calibrate, k);
                    event == Some(OperatorEvent::CaptureSample(color))
                })
                .count();
            assert_eq!(hits, 1, "{color}");
        }
    }

    #[test]
    fn quit_and_scan_bindings() {
        assert_eq!(event_for_key(KeyMode::Scan, Key::Q), Some(OperatorEvent::Quit));
        assert_eq!(
            event_for_key(KeyMode::Calibrate, Key::Escape),
            Some(OperatorEvent::Quit)
        );
        assert_eq!(
            event_for_key(KeyMode::Scan, Key::Space),
            Some(OperatorEvent::TriggerScan)
        );
        assert_eq!(event_for_key(KeyMode::Scan, Key::S), None);
        assert_eq!(event_for_key(KeyMode::Calibrate, Key::Space), None);
        assert_eq!(key_help(KeyMode::Calibrate).len(), 8);
    }
}
