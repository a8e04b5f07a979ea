use crate::face::Face;
use thiserror::Error;

pub const STICKERS_PER_FACE: usize = 9;
pub const CENTER_INDEX: usize = 4;
pub const STATE_LEN: usize = STICKERS_PER_FACE * Face::ORDER.len();

#[derive(Debug, Error, PartialEq)]
pub enum AssembleError {
    #[error("expected 6 face blocks, got {0}")]
    BlockCount(usize),

    #[error("{face} block has {len} stickers, expected 9")]
    BlockLength { face: Face, len: usize },

    #[error("{face} block has center '{found}', expected '{}'", .face.letter())]
    CenterMismatch { face: Face, found: char },
}

/// Joins six row-major face blocks, in U R F D L B order, into the
/// 54-character solver string.
pub fn assemble<S: AsRef<str>>(blocks: &[S]) -> Result<String, AssembleError> {
    if blocks.len() != Face::ORDER.len() {
        return Err(AssembleError::BlockCount(blocks.len()));
    }

    let mut state = String::with_capacity(STATE_LEN);
    for (face, block) in Face::ORDER.into_iter().zip(blocks) {
        let block = block.as_ref();
        let stickers: Vec<char> = block.chars().collect();
        if stickers.len() != STICKERS_PER_FACE {
            return Err(AssembleError::BlockLength {
                face,
                len: stickers.len(),
            });
        }
        if stickers[CENTER_INDEX] != face.letter() {
            return Err(AssembleError::CenterMismatch {
                face,
                found: stickers[CENTER_INDEX],
            });
        }
        state.push_str(block);
    }
    Ok(state)
}
