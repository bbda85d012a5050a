//! Gesture arbiter
//!
//! Classifies each pointer interaction as hover, drag, or click, and
//! decides whether a completed interaction may activate an item. The
//! classifier is cumulative-travel based: a press that moves past the
//! drag threshold (in either direction, summed) is a drag, and its
//! release never counts as a click. A trailing grace window backstops
//! the release, so a tap landing immediately after a drag is swallowed
//! too.

use ribbon_core::events::{event_types, Event};
use ribbon_core::{InteractionState, StateTransitions};

/// What the carousel should do in response to one pointer event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureOutcome {
    /// Nothing actionable
    None,
    /// Pointer entered the container; pause auto-motion
    HoverStart,
    /// Pointer left the container; auto-motion may resume
    HoverEnd,
    /// Travel crossed the drag threshold; hand the offset to the drag
    DragStart { pointer_x: f32 },
    /// Drag in progress
    DragMove { pointer_x: f32 },
    /// Drag released; arm the grace period
    DragEnd,
    /// A genuine click (press and release without a drag)
    Click { x: f32, y: f32 },
}

/// Per-carousel gesture state machine
pub struct GestureArbiter {
    state: InteractionState,
    /// State to restore when the detail view closes
    state_before_detail: InteractionState,
    /// Pointer button is down
    pressed: bool,
    /// Pointer x at the last move while pressed
    last_x: f32,
    /// Cumulative travel since press (direction-agnostic)
    travel: f32,
    /// Travel past this distance classifies the gesture as a drag
    drag_threshold: f32,
    /// Remaining click-suppression time after a drag release
    click_block_ms: f32,
    /// Length of the click-suppression window
    grace_period_ms: f32,
}

impl GestureArbiter {
    pub fn new(drag_threshold: f32, grace_period_ms: f32) -> Self {
        Self {
            state: InteractionState::Idle,
            state_before_detail: InteractionState::Idle,
            pressed: false,
            last_x: 0.0,
            travel: 0.0,
            drag_threshold,
            click_block_ms: 0.0,
            grace_period_ms,
        }
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    /// Cumulative pointer travel for the current press, in pixels
    pub fn travel(&self) -> f32 {
        self.travel
    }

    /// True while a just-released drag still suppresses clicks
    pub fn click_blocked(&self) -> bool {
        self.click_block_ms > 0.0
    }

    /// Advance the click-suppression timer
    pub fn tick(&mut self, dt_ms: f32) {
        if self.click_block_ms > 0.0 {
            self.click_block_ms = (self.click_block_ms - dt_ms).max(0.0);
        }
    }

    /// Classify one pointer event
    pub fn handle_event(&mut self, event: &Event) -> GestureOutcome {
        let pointer = event.pointer_data().unwrap_or_default();
        match event.event_type {
            event_types::POINTER_ENTER => {
                if let Some(next) = self.state.on_event(event_types::POINTER_ENTER) {
                    self.state = next;
                    GestureOutcome::HoverStart
                } else {
                    GestureOutcome::None
                }
            }
            event_types::POINTER_LEAVE => self.on_pointer_leave(),
            event_types::POINTER_DOWN => {
                self.pressed = true;
                self.last_x = pointer.x;
                self.travel = 0.0;
                GestureOutcome::None
            }
            event_types::POINTER_MOVE => self.on_pointer_move(pointer.x),
            event_types::POINTER_UP => self.on_pointer_up(pointer.x, pointer.y),
            event_types::DETAIL_OPEN => {
                self.open_detail();
                GestureOutcome::None
            }
            event_types::DETAIL_CLOSE => {
                self.close_detail();
                GestureOutcome::None
            }
            _ => GestureOutcome::None,
        }
    }

    fn on_pointer_move(&mut self, x: f32) -> GestureOutcome {
        if !self.pressed {
            return GestureOutcome::None;
        }
        self.travel += (x - self.last_x).abs();
        self.last_x = x;

        if self.state == InteractionState::Dragging {
            return GestureOutcome::DragMove { pointer_x: x };
        }
        if self.travel > self.drag_threshold {
            if let Some(next) = self.state.on_event(event_types::DRAG_START) {
                tracing::trace!("drag start after {:.1}px travel", self.travel);
                self.state = next;
                return GestureOutcome::DragStart { pointer_x: x };
            }
        }
        GestureOutcome::None
    }

    fn on_pointer_up(&mut self, x: f32, y: f32) -> GestureOutcome {
        let was_pressed = std::mem::take(&mut self.pressed);

        if self.state == InteractionState::Dragging {
            if let Some(next) = self.state.on_event(event_types::DRAG_END) {
                self.state = next;
            }
            self.click_block_ms = self.grace_period_ms;
            return GestureOutcome::DragEnd;
        }

        if was_pressed && !self.click_blocked() {
            return GestureOutcome::Click { x, y };
        }
        GestureOutcome::None
    }

    fn on_pointer_leave(&mut self) -> GestureOutcome {
        self.pressed = false;
        let was_dragging = self.state == InteractionState::Dragging;
        if let Some(next) = self.state.on_event(event_types::POINTER_LEAVE) {
            self.state = next;
        }
        if was_dragging {
            // Drag abandoned off the edge of the container
            self.click_block_ms = self.grace_period_ms;
            GestureOutcome::DragEnd
        } else if self.state == InteractionState::Idle {
            GestureOutcome::HoverEnd
        } else {
            GestureOutcome::None
        }
    }

    /// An item was selected; remember where to return on dismissal
    pub fn open_detail(&mut self) {
        if self.state != InteractionState::DetailOpen {
            self.state_before_detail = self.state;
            self.state = InteractionState::DetailOpen;
        }
    }

    /// Detail view dismissed; restore the pre-detail state
    pub fn close_detail(&mut self) {
        if self.state == InteractionState::DetailOpen {
            self.state = self.state_before_detail;
        }
    }
}
