//! Face-by-face scanning session.
//!
//! A [`ScanSession`] walks the six faces in solver order. Each scan classifies
//! nine sticker samples, forces the center to the face being scanned and is
//! either accepted whole or rejected without touching the session.

use crate::assemble::{assemble, AssembleError, CENTER_INDEX, STICKERS_PER_FACE};
use crate::face::Face;
use crate::frame::{Frame, FrameError};
use cube_detection::{Classifier, CubeColor};
use thiserror::Error;

/// Display placeholder for stickers not yet scanned.
pub const UNSCANNED: char = '?';

/// Nine HSV triples in row-major sticker order.
pub type StickerSample = [[u8; 3]; STICKERS_PER_FACE];

#[derive(Debug, Error, PartialEq)]
pub enum ScanError {
    #[error("unresolved color at stickers {positions:?} while scanning {face}")]
    UnresolvedColor { face: Face, positions: Vec<usize> },

    #[error("all faces already scanned, reset to scan again")]
    AlreadyComplete,

    #[error(transparent)]
    Frame(#[from] FrameError),

    #[error(transparent)]
    Assemble(#[from] AssembleError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScanOutcome {
    /// Face accepted, `next` is the face to show now.
    Accepted { face: Face, block: String, next: Face },
    /// Last face accepted; `state` is the full 54-character string.
    Complete { face: Face, block: String, state: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScanSession {
    blocks: Vec<String>,
    display: [[char; STICKERS_PER_FACE]; 6],
}

impl Default for ScanSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanSession {
    pub fn new() -> Self {
        Self {
            blocks: Vec::with_capacity(Face::ORDER.len()),
            display: [[UNSCANNED; STICKERS_PER_FACE]; 6],
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Index into [`Face::ORDER`]; 6 once every face is in.
    pub fn active_index(&self) -> usize {
        self.blocks.len()
    }

    pub fn active_face(&self) -> Option<Face> {
        Face::ORDER.get(self.active_index()).copied()
    }

    pub fn is_complete(&self) -> bool {
        self.active_face().is_none()
    }

    /// Accepted blocks joined so far, 0..=54 characters.
    pub fn accumulated(&self) -> String {
        self.blocks.concat()
    }

    pub fn display_grid(&self, face: Face) -> &[char; STICKERS_PER_FACE] {
        &self.display[face.index()]
    }

    pub fn scan(
        &mut self,
        classifier: &Classifier,
        samples: &StickerSample,
    ) -> Result<ScanOutcome, ScanError> {
        let face = self.active_face().ok_or(ScanError::AlreadyComplete)?;
        let letters = resolve_face(face, classifier, samples);

        let unknown: Vec<usize> = letters
            .iter()
            .enumerate()
            .filter_map(|(i, letter)| letter.is_none().then_some(i))
            .collect();
        if !unknown.is_empty() {
            tracing::warn!(%face, positions = ?unknown, "Scan rejected, unknown color");
            return Err(ScanError::UnresolvedColor {
                face,
                positions: unknown,
            });
        }

        let grid: [char; STICKERS_PER_FACE] = letters.map(|l| l.unwrap_or(UNSCANNED));
        let block: String = grid.iter().collect();

        match Face::ORDER.get(self.active_index() + 1).copied() {
            Some(next) => {
                self.accept(face, grid, block.clone());
                Ok(ScanOutcome::Accepted { face, block, next })
            }
            None => {
                // Assemble before mutating so a bad last face leaves the session alone.
                let mut candidate = self.blocks.clone();
                candidate.push(block.clone());
                let state = assemble(&candidate)?;
                self.accept(face, grid, block.clone());
                Ok(ScanOutcome::Complete { face, block, state })
            }
        }
    }

    fn accept(&mut self, face: Face, grid: [char; STICKERS_PER_FACE], block: String) {
        tracing::info!(%face, %block, "Face scanned");
        self.display[face.index()] = grid;
        self.blocks.push(block);
    }
}

/// Face letters for one scan, center forced to `face`. `None` marks a sticker
/// the classifier could not place.
pub fn resolve_face(
    face: Face,
    classifier: &Classifier,
    samples: &StickerSample,
) -> [Option<char>; STICKERS_PER_FACE] {
    let mut letters = [None; STICKERS_PER_FACE];
    for (i, hsv) in samples.iter().enumerate() {
        if i == CENTER_INDEX {
            letters[i] = Some(face.letter());
            continue;
        }
        letters[i] = classifier.classify_hsv(*hsv).map(CubeColor::face_letter);
    }
    letters
}

/// Raw classifier output for the nine stickers, for live preview.
pub fn preview(
    classifier: &Classifier,
    samples: &StickerSample,
) -> [Option<CubeColor>; STICKERS_PER_FACE] {
    (*samples).map(|hsv| classifier.classify_hsv(hsv))
}

/// Reads HSV at each sticker center.
pub fn sample_stickers(
    frame: &Frame,
    centers: &[[u32; 2]; STICKERS_PER_FACE],
) -> Result<StickerSample, FrameError> {
    let mut samples = [[0u8; 3]; STICKERS_PER_FACE];
    for (sample, [x, y]) in samples.iter_mut().zip(centers) {
        *sample = frame.hsv_at(*x, *y)?;
    }
    Ok(samples)
}

/// First sticker center that falls outside a `width` x `height` frame, if any.
pub fn check_centers(
    centers: &[[u32; 2]; STICKERS_PER_FACE],
    width: u32,
    height: u32,
) -> Result<(), FrameError> {
    match centers.iter().find(|[x, y]| *x >= width || *y >= height) {
        Some(&[x, y]) => Err(FrameError::OutOfBounds {
            x,
            y,
            width,
            height,
        }),
        None => Ok(()),
    }
}
