//! Interaction state transitions
//!
//! Carousel gestures are modeled as a flat state machine: a state enum
//! plus a `(state, event) -> Option<state>` transition map. The
//! `StateTransitions` trait lets each widget define its own enum while
//! sharing the event vocabulary from [`crate::events`].

use std::hash::Hash;

/// Trait for state types that handle event-driven transitions
///
/// # Example
///
/// ```ignore
/// impl StateTransitions for MyState {
///     fn on_event(&self, event: u32) -> Option<Self> {
///         use ribbon_core::events::event_types::*;
///         match (self, event) {
///             (MyState::Idle, POINTER_ENTER) => Some(MyState::Hovering),
///             (MyState::Hovering, POINTER_LEAVE) => Some(MyState::Idle),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait StateTransitions:
    Clone + Copy + PartialEq + Eq + Hash + Send + Sync + std::fmt::Debug + 'static
{
    /// Handle an event and return the new state, or None if no transition
    fn on_event(&self, event: u32) -> Option<Self>;
}

/// Pointer interaction state of a carousel
///
/// Exactly one state is active at a time. `Hovering`, `Dragging`, and
/// `DetailOpen` each suppress automatic motion; auto-scroll resumes
/// only from `Idle` (and only after any trailing grace period).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    Hovering,
    Dragging,
    DetailOpen,
}

impl InteractionState {
    /// Whether this state suppresses automatic motion
    pub fn suppresses_motion(&self) -> bool {
        !matches!(self, InteractionState::Idle)
    }
}

impl StateTransitions for InteractionState {
    fn on_event(&self, event: u32) -> Option<Self> {
        use crate::events::event_types::*;
        match (self, event) {
            (InteractionState::Idle, POINTER_ENTER) => Some(InteractionState::Hovering),
            (InteractionState::Hovering, POINTER_LEAVE) => Some(InteractionState::Idle),
            (InteractionState::Idle, DRAG_START) => Some(InteractionState::Dragging),
            (InteractionState::Hovering, DRAG_START) => Some(InteractionState::Dragging),
            (InteractionState::Dragging, DRAG_END) => Some(InteractionState::Hovering),
            // Pointer left the container while the button was still down
            (InteractionState::Dragging, POINTER_LEAVE) => Some(InteractionState::Idle),
            (InteractionState::Idle, DETAIL_OPEN) => Some(InteractionState::DetailOpen),
            (InteractionState::Hovering, DETAIL_OPEN) => Some(InteractionState::DetailOpen),
            // DETAIL_CLOSE restores the pre-detail state, which the map
            // cannot carry; the gesture arbiter owns that restore
            _ => None,
        }
    }
}

/// Which driver currently owns the carousel offset
///
/// A tagged state instead of parallel booleans: the animation driver
/// writes only in `Animating`, the drag handler only in `Dragging`,
/// and nobody writes in `Paused`. Invalid writer combinations are
/// unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DriveState {
    /// Automatic motion is running a lap
    Animating,
    /// The user's pointer owns the offset
    Dragging {
        /// Offset captured at drag start
        start_offset: f32,
        /// Pointer x at drag start
        pointer_origin: f32,
    },
    /// Nobody writes; offset holds its last value
    Paused,
}

impl DriveState {
    /// True while a lap animation owns the offset
    pub fn is_animating(&self) -> bool {
        matches!(self, DriveState::Animating)
    }

    /// True while a drag gesture owns the offset
    pub fn is_dragging(&self) -> bool {
        matches!(self, DriveState::Dragging { .. })
    }
}
