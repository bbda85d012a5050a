//! Event dispatch system
//!
//! Pointer and lifecycle events shared by every carousel instance.
//! Events carry a `target` id so one dispatcher can route input for
//! several carousels mounted on the same page.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Event type identifier
pub type EventType = u32;

/// Common event types
pub mod event_types {
    use super::EventType;

    pub const POINTER_DOWN: EventType = 1;
    pub const POINTER_UP: EventType = 2;
    pub const POINTER_MOVE: EventType = 3;
    pub const POINTER_ENTER: EventType = 4;
    pub const POINTER_LEAVE: EventType = 5;
    /// Drag threshold crossed (pointer down + travel)
    pub const DRAG_START: EventType = 6;
    /// Drag ended (pointer up after a drag)
    pub const DRAG_END: EventType = 7;
    /// An item's detail view was requested
    pub const DETAIL_OPEN: EventType = 10;
    /// The detail view was dismissed
    pub const DETAIL_CLOSE: EventType = 11;

    // Element lifecycle events
    pub const MOUNT: EventType = 60;
    pub const UNMOUNT: EventType = 61;
}

/// A UI event with associated data
#[derive(Clone, Debug)]
pub struct Event {
    pub event_type: EventType,
    /// Carousel instance id
    pub target: u64,
    pub data: EventData,
    pub timestamp: u64,
    pub propagation_stopped: bool,
}

/// Event-specific data
#[derive(Clone, Debug)]
pub enum EventData {
    Pointer(PointerEvent),
    None,
}

/// Pointer position and button state at the time of the event
#[derive(Clone, Copy, Debug, Default)]
pub struct PointerEvent {
    pub x: f32,
    pub y: f32,
    pub button: u8,
}

impl Event {
    /// Build a pointer event aimed at one carousel
    pub fn pointer(event_type: EventType, target: u64, x: f32, y: f32) -> Self {
        Self {
            event_type,
            target,
            data: EventData::Pointer(PointerEvent { x, y, button: 0 }),
            timestamp: 0,
            propagation_stopped: false,
        }
    }

    /// Pointer payload, if this event carries one
    pub fn pointer_data(&self) -> Option<PointerEvent> {
        match self.data {
            EventData::Pointer(p) => Some(p),
            EventData::None => None,
        }
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }
}

/// Event handler function type
pub type EventHandler = Box<dyn Fn(&Event) + Send + Sync>;

/// Dispatches events to registered handlers
pub struct EventDispatcher {
    handlers: FxHashMap<(u64, EventType), SmallVec<[EventHandler; 2]>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self {
            handlers: FxHashMap::default(),
        }
    }

    /// Register an event handler for a carousel and event type
    pub fn register<F>(&mut self, target: u64, event_type: EventType, handler: F)
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        self.handlers
            .entry((target, event_type))
            .or_default()
            .push(Box::new(handler));
    }

    /// Dispatch an event to all registered handlers
    pub fn dispatch(&self, event: &mut Event) {
        if let Some(handlers) = self.handlers.get(&(event.target, event.event_type)) {
            tracing::trace!(
                "dispatch type={} target={} handlers={}",
                event.event_type,
                event.target,
                handlers.len()
            );
            for handler in handlers {
                if event.propagation_stopped {
                    break;
                }
                handler(event);
            }
        }
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
