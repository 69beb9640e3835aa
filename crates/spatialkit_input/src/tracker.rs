//! The input tracker: raw samples in, edge-aware state and events out

use spatialkit_math::{Pose, Ray};

use crate::events::{EventDispatcher, InputEventHandler};
use crate::hand::{Hand, HandSample};
use crate::pointer::{Pointer, PointerState};
use crate::source::{Handed, InputSource, InputState};

/// Per-frame input state for both hands and the head
///
/// A hardware backend calls [`update_hand`](Input::update_hand) and
/// [`update_head`](Input::update_head) once per frame; everything else
/// reads the derived state. Transition bits (`JUST_PINCH` and friends) are
/// valid until the next update of the same hand.
pub struct Input {
    hands: [Hand; 2],
    /// Left hand, right hand, head gaze
    pointers: [Pointer; 3],
    head: Pose,
    dispatcher: EventDispatcher,
}

impl Default for Input {
    fn default() -> Self {
        Self::new()
    }
}

impl Input {
    pub fn new() -> Self {
        Self {
            hands: [Hand::new(Handed::Left), Hand::new(Handed::Right)],
            pointers: [
                Pointer::inactive(hand_source(Handed::Left)),
                Pointer::inactive(hand_source(Handed::Right)),
                Pointer::inactive(InputSource::GAZE | InputSource::GAZE_HEAD),
            ],
            head: Pose::IDENTITY,
            dispatcher: EventDispatcher::new(),
        }
    }

    /// Ingest one frame of raw hand data
    ///
    /// Derives transition bits by diffing against the previous frame's
    /// level state, rebuilds the hand's pointer, and fires one event per
    /// transition in a fixed order: tracking, then pinch, then grip.
    ///
    /// Poses are only overwritten while `sample.tracked` is set, so a hand
    /// that loses tracking keeps its last known pose.
    pub fn update_hand(&mut self, handed: Handed, sample: &HandSample) {
        let index = handed as usize;
        let prev = self.hands[index].state;

        let state = next_state(prev, sample);
        let hand = &mut self.hands[index];
        hand.state = state;
        if sample.tracked {
            hand.root = sample.root;
            hand.wrist = sample.wrist;
            hand.fingers = sample.fingers;
        }

        let root = hand.root;
        let source = hand_source(handed);
        let pointer = Pointer {
            source,
            state: if sample.tracked {
                PointerState::AVAILABLE
            } else {
                PointerState::empty()
            },
            input_state: state,
            ray: Ray::new(root.position, root.forward()),
            orientation: root.orientation,
        };
        self.pointers[index] = pointer;

        if state.intersects(InputState::JUST_TRACKED | InputState::UNTRACKED) {
            log::debug!("{:?} hand tracking changed: {:?}", handed, state);
        }

        const TRANSITIONS: [InputState; 6] = [
            InputState::JUST_TRACKED,
            InputState::UNTRACKED,
            InputState::JUST_PINCH,
            InputState::UNPINCH,
            InputState::JUST_GRIP,
            InputState::UNGRIP,
        ];
        for bit in TRANSITIONS {
            if state.contains(bit) {
                self.dispatcher.fire(source, bit, &pointer);
            }
        }
    }

    /// Set this frame's head pose, activating the head-gaze pointer
    pub fn update_head(&mut self, pose: Pose) {
        self.head = pose;
        self.pointers[2] = Pointer {
            source: InputSource::GAZE | InputSource::GAZE_HEAD,
            state: PointerState::AVAILABLE,
            input_state: InputState::TRACKED,
            ray: Ray::new(pose.position, pose.forward()),
            orientation: pose.orientation,
        };
    }

    /// Current state of one hand
    pub fn hand(&self, handed: Handed) -> &Hand {
        &self.hands[handed as usize]
    }

    /// Current head pose
    pub fn head(&self) -> Pose {
        self.head
    }

    /// Number of available pointers matching the source filter
    pub fn pointer_count(&self, filter: InputSource) -> usize {
        self.pointers
            .iter()
            .filter(|p| p.is_available() && p.source.intersects(filter))
            .count()
    }

    /// The `index`-th available pointer matching the source filter
    pub fn pointer(&self, index: usize, filter: InputSource) -> Option<&Pointer> {
        self.pointers
            .iter()
            .filter(|p| p.is_available() && p.source.intersects(filter))
            .nth(index)
    }

    /// Register an event handler; see [`EventDispatcher::subscribe`]
    pub fn subscribe(
        &mut self,
        source_mask: InputSource,
        event_mask: InputState,
        handler: InputEventHandler,
    ) {
        self.dispatcher.subscribe(source_mask, event_mask, handler);
    }

    /// Remove an event handler; see [`EventDispatcher::unsubscribe`]
    pub fn unsubscribe(
        &mut self,
        source_mask: InputSource,
        event_mask: InputState,
        handler: InputEventHandler,
    ) {
        self.dispatcher.unsubscribe(source_mask, event_mask, handler);
    }

    /// Manually fire an event through the dispatcher
    pub fn fire_event(&self, source: InputSource, event: InputState, pointer: &Pointer) {
        self.dispatcher.fire(source, event, pointer);
    }
}

fn hand_source(handed: Handed) -> InputSource {
    InputSource::HAND | handed.source_bit() | InputSource::CAN_PRESS
}

/// Level bits from the sample plus transition bits from the diff
fn next_state(prev: InputState, sample: &HandSample) -> InputState {
    let mut state = InputState::empty();

    state.set(InputState::TRACKED, sample.tracked);
    state.set(InputState::PINCH, sample.pinched);
    state.set(InputState::GRIP, sample.gripped);

    let was = |bit| prev.contains(bit);
    state.set(InputState::JUST_TRACKED, sample.tracked && !was(InputState::TRACKED));
    state.set(InputState::UNTRACKED, !sample.tracked && was(InputState::TRACKED));
    state.set(InputState::JUST_PINCH, sample.pinched && !was(InputState::PINCH));
    state.set(InputState::UNPINCH, !sample.pinched && was(InputState::PINCH));
    state.set(InputState::JUST_GRIP, sample.gripped && !was(InputState::GRIP));
    state.set(InputState::UNGRIP, !sample.gripped && was(InputState::GRIP));

    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use spatialkit_math::{Quat, Vec3};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    fn tracked_sample() -> HandSample {
        HandSample {
            tracked: true,
            ..HandSample::untracked()
        }
    }

    fn pinched_sample() -> HandSample {
        HandSample {
            tracked: true,
            pinched: true,
            ..HandSample::untracked()
        }
    }

    #[test]
    fn test_just_pinch_lasts_one_frame() {
        let mut input = Input::new();

        // Frame 1: tracked, not pinched
        input.update_hand(Handed::Right, &tracked_sample());
        let state = input.hand(Handed::Right).state;
        assert!(state.contains(InputState::JUST_TRACKED));
        assert!(!state.contains(InputState::PINCH));

        // Frame 2: pinch starts
        input.update_hand(Handed::Right, &pinched_sample());
        let state = input.hand(Handed::Right).state;
        assert!(state.contains(InputState::PINCH));
        assert!(state.contains(InputState::JUST_PINCH));
        assert!(!state.contains(InputState::JUST_TRACKED));

        // Frame 3: pinch ends
        input.update_hand(Handed::Right, &tracked_sample());
        let state = input.hand(Handed::Right).state;
        assert!(!state.contains(InputState::PINCH));
        assert!(!state.contains(InputState::JUST_PINCH));
        assert!(state.contains(InputState::UNPINCH));

        // Frame 4: steady state, no edges left
        input.update_hand(Handed::Right, &tracked_sample());
        let state = input.hand(Handed::Right).state;
        assert!(!state.contains(InputState::UNPINCH));
        assert_eq!(state, InputState::TRACKED);
    }

    #[test]
    fn test_untracked_hand_keeps_last_pose() {
        let mut input = Input::new();
        let mut sample = tracked_sample();
        sample.root = Pose::new(Vec3::new(0.0, 1.0, -0.5), Quat::IDENTITY);

        input.update_hand(Handed::Left, &sample);
        assert_eq!(input.hand(Handed::Left).root, sample.root);

        input.update_hand(Handed::Left, &HandSample::untracked());
        let hand = input.hand(Handed::Left);
        assert!(!hand.is_tracked());
        // Pose survives tracking loss
        assert_eq!(hand.root, sample.root);
    }

    #[test]
    fn test_pointer_follows_hand_root() {
        let mut input = Input::new();
        let mut sample = tracked_sample();
        sample.root = Pose::new(Vec3::new(0.0, 1.0, 0.0), Quat::IDENTITY);
        input.update_hand(Handed::Right, &sample);

        let pointer = input.pointer(0, InputSource::HAND_RIGHT).unwrap();
        assert_eq!(pointer.ray.pos, Vec3::new(0.0, 1.0, 0.0));
        assert!((pointer.ray.dir - Vec3::NEG_Z).length() < 1e-6);
    }

    #[test]
    fn test_pointer_count_filters() {
        let mut input = Input::new();
        assert_eq!(input.pointer_count(InputSource::ANY), 0);

        input.update_hand(Handed::Left, &tracked_sample());
        input.update_hand(Handed::Right, &tracked_sample());
        assert_eq!(input.pointer_count(InputSource::ANY), 2);
        assert_eq!(input.pointer_count(InputSource::HAND_LEFT), 1);
        assert_eq!(input.pointer_count(InputSource::GAZE), 0);

        input.update_hand(Handed::Left, &HandSample::untracked());
        assert_eq!(input.pointer_count(InputSource::ANY), 1);
        assert!(input.pointer(0, InputSource::HAND_LEFT).is_none());
    }

    #[test]
    fn test_right_pinch_subscription_fires_once() {
        static RIGHT_PINCHES: AtomicUsize = AtomicUsize::new(0);
        static LEFT_PINCHES: AtomicUsize = AtomicUsize::new(0);
        static RIGHT_GRIPS: AtomicUsize = AtomicUsize::new(0);

        fn on_right_pinch(_s: InputSource, _e: InputState, _p: &Pointer) {
            RIGHT_PINCHES.fetch_add(1, Ordering::SeqCst);
        }
        fn on_left_pinch(_s: InputSource, _e: InputState, _p: &Pointer) {
            LEFT_PINCHES.fetch_add(1, Ordering::SeqCst);
        }
        fn on_right_grip(_s: InputSource, _e: InputState, _p: &Pointer) {
            RIGHT_GRIPS.fetch_add(1, Ordering::SeqCst);
        }

        let mut input = Input::new();
        input.subscribe(InputSource::HAND_RIGHT, InputState::JUST_PINCH, on_right_pinch);
        input.subscribe(InputSource::HAND_LEFT, InputState::JUST_PINCH, on_left_pinch);
        input.subscribe(InputSource::HAND_RIGHT, InputState::JUST_GRIP, on_right_grip);

        input.update_hand(Handed::Right, &tracked_sample());
        input.update_hand(Handed::Right, &pinched_sample());
        input.update_hand(Handed::Right, &tracked_sample());

        assert_eq!(RIGHT_PINCHES.load(Ordering::SeqCst), 1);
        assert_eq!(LEFT_PINCHES.load(Ordering::SeqCst), 0);
        assert_eq!(RIGHT_GRIPS.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_event_order_tracking_before_pinch() {
        static ORDER: Mutex<Vec<InputState>> = Mutex::new(Vec::new());

        fn record(_s: InputSource, event: InputState, _p: &Pointer) {
            ORDER.lock().unwrap().push(event);
        }

        let mut input = Input::new();
        input.subscribe(InputSource::HAND_RIGHT, InputState::ANY, record);

        // Tracking and pinch both start on the same frame
        input.update_hand(Handed::Right, &pinched_sample());

        let order = ORDER.lock().unwrap();
        assert_eq!(
            order.as_slice(),
            &[InputState::JUST_TRACKED, InputState::JUST_PINCH]
        );
    }

    #[test]
    fn test_unsubscribe_stops_events() {
        static COUNT: AtomicUsize = AtomicUsize::new(0);

        fn on_event(_s: InputSource, _e: InputState, _p: &Pointer) {
            COUNT.fetch_add(1, Ordering::SeqCst);
        }

        let mut input = Input::new();
        input.subscribe(InputSource::ANY, InputState::JUST_PINCH, on_event);

        input.update_hand(Handed::Right, &pinched_sample());
        assert_eq!(COUNT.load(Ordering::SeqCst), 1);

        input.unsubscribe(InputSource::ANY, InputState::JUST_PINCH, on_event);
        input.update_hand(Handed::Right, &tracked_sample());
        input.update_hand(Handed::Right, &pinched_sample());
        assert_eq!(COUNT.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_head_pose_drives_gaze_pointer() {
        let mut input = Input::new();
        assert_eq!(input.pointer_count(InputSource::GAZE), 0);

        let pose = Pose::new(Vec3::new(0.0, 1.7, 0.0), Quat::IDENTITY);
        input.update_head(pose);
        assert_eq!(input.head(), pose);

        let gaze = input.pointer(0, InputSource::GAZE_HEAD).unwrap();
        assert_eq!(gaze.ray.pos, pose.position);
        assert!((gaze.ray.dir - Vec3::NEG_Z).length() < 1e-6);
        // Hands stay separate from gaze
        assert_eq!(input.pointer_count(InputSource::HAND), 0);
    }
}
