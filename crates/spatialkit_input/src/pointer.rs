//! The unified pointer abstraction
//!
//! Every trackable input resolves to a pointer: a ray into the world plus
//! source/state masks. UI code can interact with "whatever points" without
//! caring whether it is a hand or a gaze.

use spatialkit_math::{Quat, Ray, Vec3};

use crate::source::{InputSource, InputState};

bitflags::bitflags! {
    /// Pointer availability
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct PointerState: u32 {
        /// The pointer's device is currently tracked
        const AVAILABLE = 1 << 0;
    }
}

/// A ray-shaped input with activation state
#[derive(Clone, Copy, Debug)]
pub struct Pointer {
    /// What device this pointer comes from
    pub source: InputSource,
    /// Whether the pointer is usable this frame
    pub state: PointerState,
    /// Tracking and press state of the underlying device
    pub input_state: InputState,
    /// Where the pointer points, in world space
    pub ray: Ray,
    /// Full orientation of the pointing device
    pub orientation: Quat,
}

impl Pointer {
    pub(crate) fn inactive(source: InputSource) -> Self {
        Self {
            source,
            state: PointerState::empty(),
            input_state: InputState::empty(),
            ray: Ray::new(Vec3::ZERO, spatialkit_math::FORWARD),
            orientation: Quat::IDENTITY,
        }
    }

    /// Whether the pointer can be used this frame
    pub fn is_available(&self) -> bool {
        self.state.contains(PointerState::AVAILABLE)
    }
}
