//! Input event subscriptions
//!
//! Handlers are plain function pointers so unsubscribe can match them by
//! equality, the same way a C callback registry would. Dispatch walks
//! subscriptions in registration order.

use crate::pointer::Pointer;
use crate::source::{InputSource, InputState};

/// An input event callback
///
/// Receives the source of the event, the single event bit that fired, and
/// the pointer it fired for.
pub type InputEventHandler = fn(InputSource, InputState, &Pointer);

struct Subscription {
    source_mask: InputSource,
    event_mask: InputState,
    handler: InputEventHandler,
}

/// Registry of input event subscriptions
#[derive(Default)]
pub struct EventDispatcher {
    subs: Vec<Subscription>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for events matching both masks
    ///
    /// A handler may be registered more than once; it will fire once per
    /// registration.
    pub fn subscribe(
        &mut self,
        source_mask: InputSource,
        event_mask: InputState,
        handler: InputEventHandler,
    ) {
        self.subs.push(Subscription {
            source_mask,
            event_mask,
            handler,
        });
    }

    /// Remove the first subscription matching source mask, event mask, and
    /// handler exactly; no-op when nothing matches
    pub fn unsubscribe(
        &mut self,
        source_mask: InputSource,
        event_mask: InputState,
        handler: InputEventHandler,
    ) {
        if let Some(index) = self.subs.iter().position(|s| {
            s.source_mask == source_mask && s.event_mask == event_mask && s.handler == handler
        }) {
            self.subs.remove(index);
        }
    }

    /// Fire one event to every matching subscription, in registration order
    ///
    /// A subscription matches when its source mask shares a bit with
    /// `source` and its event mask shares a bit with `event`.
    pub fn fire(&self, source: InputSource, event: InputState, pointer: &Pointer) {
        for sub in &self.subs {
            if sub.source_mask.intersects(source) && sub.event_mask.intersects(event) {
                (sub.handler)(source, event, pointer);
            }
        }
    }

    /// Number of live subscriptions
    pub fn len(&self) -> usize {
        self.subs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subs.is_empty()
    }
}
