//! Articulated hand state

use spatialkit_math::Pose;

use crate::source::{Handed, InputState};

/// Fingers, indexed thumb to pinky; joints indexed root to tip
pub const FINGERS: usize = 5;
/// Joints per finger
pub const JOINTS: usize = 5;

/// A raw per-frame hand sample from the hardware backend
///
/// Booleans here are level state, not edges; the tracker derives the
/// `JUST_*` transitions by diffing against the previous frame.
#[derive(Clone, Copy, Debug)]
pub struct HandSample {
    pub root: Pose,
    pub wrist: Pose,
    pub fingers: [[Pose; JOINTS]; FINGERS],
    pub tracked: bool,
    pub pinched: bool,
    pub gripped: bool,
}

impl HandSample {
    /// An untracked sample; poses are identity
    pub fn untracked() -> Self {
        Self {
            root: Pose::IDENTITY,
            wrist: Pose::IDENTITY,
            fingers: [[Pose::IDENTITY; JOINTS]; FINGERS],
            tracked: false,
            pinched: false,
            gripped: false,
        }
    }
}

/// The tracked state of one hand
///
/// Pose data persists through tracking loss: when a hand goes untracked
/// its last known poses stay in place until new samples arrive.
#[derive(Clone, Copy, Debug)]
pub struct Hand {
    /// Palm-centered root pose; pointer rays originate here
    pub root: Pose,
    pub wrist: Pose,
    /// Joint poses, `fingers[finger][joint]` from root to tip
    pub fingers: [[Pose; JOINTS]; FINGERS],
    pub handedness: Handed,
    /// Current state mask including this frame's transition edges
    pub state: InputState,
}

impl Hand {
    pub(crate) fn new(handedness: Handed) -> Self {
        Self {
            root: Pose::IDENTITY,
            wrist: Pose::IDENTITY,
            fingers: [[Pose::IDENTITY; JOINTS]; FINGERS],
            handedness,
            state: InputState::empty(),
        }
    }

    /// Whether the hand is currently tracked
    pub fn is_tracked(&self) -> bool {
        self.state.contains(InputState::TRACKED)
    }

    /// Whether thumb and index are pinched together
    pub fn is_pinched(&self) -> bool {
        self.state.contains(InputState::PINCH)
    }

    /// Whether the hand is making a fist
    pub fn is_gripped(&self) -> bool {
        self.state.contains(InputState::GRIP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_hand_is_untracked() {
        let hand = Hand::new(Handed::Left);
        assert!(!hand.is_tracked());
        assert!(!hand.is_pinched());
        assert_eq!(hand.root, Pose::IDENTITY);
    }
}
