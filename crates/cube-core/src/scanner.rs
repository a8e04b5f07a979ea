use crate::event::{Flow, OperatorEvent};
use crate::face::Face;
use crate::frame::Frame;
use crate::scan::{preview, sample_stickers, ScanError, ScanOutcome, ScanSession};
use crate::solver::{CubeSolver, Solution, SolveError};
use cube_detection::Classifier;

pub const SCAN_INSTRUCTIONS: &[&str] = &[
    "Follow the highlighted face. Use the roll-and-rotate method:",
    "1. Start: White-UP, Green-FRONT.",
    "2. Scan U: tilt cube forward.",
    "3. Scan R: return to start, rotate cube 90 deg CW, tilt forward.",
    "4. Scan F: return to start, tilt forward.",
    "5. Scan D: return to start, tilt cube backward.",
    "6. Scan L: return to start, rotate cube 90 deg CCW, tilt forward.",
    "7. Scan B: return to start, rotate cube 180 deg, tilt forward.",
];

/// What the solver said about the last completed scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveStatus {
    Solved(Solution),
    Rejected { state: String, reason: String },
}

/// Owns the scan session and routes operator events into it.
pub struct ScanController<S> {
    classifier: Classifier,
    sticker_centers: [[u32; 2]; 9],
    session: ScanSession,
    solver: S,
    status: Option<SolveStatus>,
}

impl<S: CubeSolver> ScanController<S> {
    pub fn new(classifier: Classifier, sticker_centers: [[u32; 2]; 9], solver: S) -> Self {
        Self {
            classifier,
            sticker_centers,
            session: ScanSession::new(),
            solver,
            status: None,
        }
    }

    pub fn session(&self) -> &ScanSession {
        &self.session
    }

    pub fn status(&self) -> Option<&SolveStatus> {
        self.status.as_ref()
    }

    pub fn sticker_centers(&self) -> &[[u32; 2]; 9] {
        &self.sticker_centers
    }

    /// Applies one operator event against the current frame.
    ///
    /// Rejected scans and solver rejections are reported and leave the loop
    /// running; only frame sampling failures come back as errors.
    pub fn handle(&mut self, event: OperatorEvent, frame: &Frame) -> Result<Flow, ScanError> {
        match event {
            OperatorEvent::Quit | OperatorEvent::SaveAndExit => return Ok(Flow::Exit),
            OperatorEvent::Reset => self.reset(),
            OperatorEvent::TriggerScan => self.trigger_scan(frame)?,
            OperatorEvent::CaptureSample(color) => {
                tracing::debug!(%color, "Capture ignored while scanning");
            }
        }
        Ok(Flow::Continue)
    }

    pub fn reset(&mut self) {
        self.session.reset();
        self.status = None;
        tracing::info!("Resetting... show {}", Face::Up);
    }

    // Classifies the current frame without touching the session.
    pub fn preview(&self, frame: &Frame) -> Result<(), ScanError> {
        if self.session.is_complete() {
            return Ok(());
        }
        let samples = sample_stickers(frame, &self.sticker_centers)?;
        tracing::debug!(colors = ?preview(&self.classifier, &samples), "Live preview");
        Ok(())
    }

    fn trigger_scan(&mut self, frame: &Frame) -> Result<(), ScanError> {
        if self.session.is_complete() {
            tracing::info!("All faces scanned, press 'r' to scan again");
            return Ok(());
        }
        let samples = sample_stickers(frame, &self.sticker_centers)?;
        match self.session.scan(&self.classifier, &samples) {
            Ok(ScanOutcome::Accepted { face, block, next }) => {
                tracing::info!("Scanned {face}: {block}. Show {next}");
            }
            Ok(ScanOutcome::Complete { state, .. }) => {
                tracing::info!(%state, "All 6 faces scanned, solving");
                self.solve(&state);
            }
            Err(ScanError::UnresolvedColor { face, positions }) => {
                tracing::warn!(
                    ?positions,
                    "Unknown color detected, check lighting/calibration and scan {face} again"
                );
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }

    fn solve(&mut self, state: &str) {
        let status = match self.solver.solve(state) {
            Ok(solution) => {
                tracing::info!(%solution, moves = solution.moves.len(), "Solution found");
                SolveStatus::Solved(solution)
            }
            Err(SolveError::InvalidCubeState { state, reason }) => {
                tracing::warn!(
                    %state,
                    %reason,
                    "Solver rejected the cube state, press 'r' and scan again"
                );
                SolveStatus::Rejected { state, reason }
            }
            Err(e) => {
                tracing::error!(error = %e, "Solver unavailable, press 'r' to scan again");
                SolveStatus::Rejected {
                    state: state.to_string(),
                    reason: e.to_string(),
                }
            }
        };
        self.status = Some(status);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{FrameConfig, PixelFormat};
    use cube_detection::{CalibrationProfile, ColorRange, CubeColor};

    struct RecordingSolver {
        seen: Vec<String>,
        reply: Result<&'static str, &'static str>,
    }

    impl CubeSolver for RecordingSolver {
        fn solve(&mut self, state: &str) -> Result<Solution, SolveError> {
            self.seen.push(state.to_string());
            match self.reply {
                Ok(moves) => Ok(Solution::parse(moves)),
                Err(reason) => Err(SolveError::InvalidCubeState {
                    state: state.to_string(),
                    reason: reason.to_string(),
                }),
            }
        }
    }

    fn classifier() -> Classifier {
        let mut p = CalibrationProfile::new();
        for (color, h) in [
            (CubeColor::Green, 60),
            (CubeColor::Red, 175),
            (CubeColor::Blue, 110),
            (CubeColor::Orange, 15),
            (CubeColor::Yellow, 30),
        ] {
            p.insert(
                color,
                ColorRange {
                    lower: [h - 4, 60, 60],
                    upper: [h + 4, 255, 255],
                },
            );
        }
        p.insert(
            CubeColor::White,
            ColorRange {
                lower: [0, 0, 150],
                upper: [179, 80, 255],
            },
        );
        Classifier::new(p)
    }

    // 3x3 HSV frame, one pixel per sticker.
    fn face_frame(hsv: [u8; 3]) -> Frame {
        Frame::new(FrameConfig {
            data: hsv.repeat(9),
            width: 3,
            height: 3,
            format: PixelFormat::HSV,
        })
        .unwrap()
    }

    #[rustfmt::skip]
    const CENTERS: [[u32; 2]; 9] = [
        [0, 0], [1, 0], [2, 0],
        [0, 1], [1, 1], [2, 1],
        [0, 2], [1, 2], [2, 2],
    ];

    fn faces() -> [Frame; 6] {
        [
            face_frame([0, 10, 240]),
            face_frame([175, 200, 200]),
            face_frame([60, 200, 200]),
            face_frame([30, 200, 200]),
            face_frame([15, 200, 200]),
            face_frame([110, 200, 200]),
        ]
    }

    fn controller(reply: Result<&'static str, &'static str>) -> ScanController<RecordingSolver> {
        ScanController::new(
            classifier(),
            CENTERS,
            RecordingSolver {
                seen: Vec::new(),
                reply,
            },
        )
    }

    #[test]
    fn six_scans_hand_the_state_to_the_solver() {
        let mut ctl = controller(Ok("R U R' U'"));
        for frame in &faces() {
            let flow = ctl.handle(OperatorEvent::TriggerScan, frame).unwrap();
            assert_eq!(flow, Flow::Continue);
        }
        assert_eq!(
            ctl.solver.seen,
            vec!["UUUUUUUUURRRRRRRRRFFFFFFFFFDDDDDDDDDLLLLLLLLLBBBBBBBBB"]
        );
        assert_eq!(
            ctl.status(),
            Some(&SolveStatus::Solved(Solution::parse("R U R' U'")))
        );

        // Further scans are ignored until reset.
        ctl.handle(OperatorEvent::TriggerScan, &faces()[0]).unwrap();
        assert_eq!(ctl.solver.seen.len(), 1);
    }

    #[test]
    fn solver_rejection_is_kept_until_reset() {
        let undefined = "Error: some edges are undefined";
        let mut ctl = controller(Err(undefined));
        for frame in &faces() {
            ctl.handle(OperatorEvent::TriggerScan, frame).unwrap();
        }
        assert!(matches!(
            ctl.status(),
            Some(SolveStatus::Rejected { reason, .. }) if reason == undefined
        ));
        assert!(ctl.session().is_complete());

        ctl.handle(OperatorEvent::Reset, &faces()[0]).unwrap();
        assert_eq!(ctl.status(), None);
        assert_eq!(ctl.session().active_index(), 0);
    }

    #[test]
    fn unknown_sticker_keeps_the_face() {
        let mut ctl = controller(Ok(""));
        let muddy = face_frame([90, 20, 20]);
        assert_eq!(
            ctl.handle(OperatorEvent::TriggerScan, &muddy).unwrap(),
            Flow::Continue
        );
        assert_eq!(ctl.session().active_face(), Some(Face::Up));
        assert!(ctl.session().accumulated().is_empty());
    }

    #[test]
    fn quit_exits_and_capture_is_ignored() {
        let mut ctl = controller(Ok(""));
        let frame = faces()[0].clone();
        assert_eq!(
            ctl.handle(OperatorEvent::CaptureSample(CubeColor::Red), &frame)
                .unwrap(),
            Flow::Continue
        );
        assert_eq!(ctl.handle(OperatorEvent::Quit, &frame).unwrap(), Flow::Exit);
        assert_eq!(ctl.session().active_index(), 0);
    }

    #[test]
    fn centers_outside_the_frame_are_an_error() {
        let mut ctl = controller(Ok(""));
        let tiny = Frame::new(FrameConfig {
            data: vec![0, 0, 255],
            width: 1,
            height: 1,
            format: PixelFormat::HSV,
        })
        .unwrap();
        assert!(matches!(
            ctl.handle(OperatorEvent::TriggerScan, &tiny),
            Err(ScanError::Frame(_))
        ));
        assert!(ctl.preview(&tiny).is_err());
    }
}
