//! Input source and state bitmasks

use bitflags::bitflags;

bitflags! {
    /// What kind of device an input comes from
    ///
    /// Masks combine: a right hand pointer is
    /// `HAND | HAND_RIGHT | CAN_PRESS`. Filters match on any shared bit.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct InputSource: u32 {
        const HAND = 1 << 0;
        const HAND_LEFT = 1 << 1;
        const HAND_RIGHT = 1 << 2;
        const GAZE = 1 << 4;
        const GAZE_HEAD = 1 << 5;
        const GAZE_EYES = 1 << 6;
        const GAZE_CURSOR = 1 << 7;
        /// Source can issue press/activate actions
        const CAN_PRESS = 1 << 8;
        const ANY = u32::MAX;
    }
}

bitflags! {
    /// Tracking and activation state, with one-frame transition edges
    ///
    /// The `JUST_*` / `UN*` bits are set only on the frame the underlying
    /// boolean flips; the level bits (`TRACKED`, `PINCH`, `GRIP`) persist.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct InputState: u32 {
        const TRACKED = 1 << 0;
        const JUST_TRACKED = 1 << 1;
        const UNTRACKED = 1 << 2;
        const PINCH = 1 << 3;
        const JUST_PINCH = 1 << 4;
        const UNPINCH = 1 << 5;
        const GRIP = 1 << 6;
        const JUST_GRIP = 1 << 7;
        const UNGRIP = 1 << 8;
        const ANY = u32::MAX;
    }
}

/// Which hand
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Handed {
    Left = 0,
    Right = 1,
}

impl Handed {
    /// The source bit for this hand
    pub fn source_bit(self) -> InputSource {
        match self {
            Handed::Left => InputSource::HAND_LEFT,
            Handed::Right => InputSource::HAND_RIGHT,
        }
    }
}
