//! Ribbon Core Runtime
//!
//! Foundational primitives for the ribbon carousel toolkit:
//!
//! - **Event Dispatch**: pointer events routed by target id
//! - **Interaction States**: event-driven state transitions for gestures
//! - **Lifecycle Tokens**: teardown guards so no callback outlives its owner

pub mod error;
pub mod events;
pub mod lifecycle;
pub mod state;

pub use error::CarouselError;
pub use events::{Event, EventDispatcher, EventType, PointerEvent};
pub use lifecycle::{MountGuard, MountToken};
pub use state::{DriveState, InteractionState, StateTransitions};
