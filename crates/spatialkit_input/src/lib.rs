//! Input tracking for spatial interaction
//!
//! Hardware backends feed raw per-frame samples into [`Input::update_hand`];
//! this crate turns them into edge-aware state masks (`JUST_PINCH` is true
//! for exactly one frame), a unified pointer list, and subscription-based
//! events.

mod events;
mod hand;
mod pointer;
mod source;
mod tracker;

pub use events::{EventDispatcher, InputEventHandler};
pub use hand::{Hand, HandSample, FINGERS, JOINTS};
pub use pointer::{Pointer, PointerState};
pub use source::{Handed, InputSource, InputState};
pub use tracker::Input;
