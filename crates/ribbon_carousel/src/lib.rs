//! Ribbon Carousel
//!
//! A seamless looping, draggable carousel controller: a horizontally
//! auto-scrolling card strip with infinite wrap-around and user drag
//! override.
//!
//! Three cooperating pieces:
//!
//! - **Track**: the finite item list, rendered as three back-to-back
//!   copies so there is always a full copy-width of content on either
//!   side of the viewport
//! - **Physics**: owns the scalar offset, keeps it normalized into the
//!   `[-2W, 0]` window, and drives either a linear lap animation or
//!   the user's drag
//! - **Gesture arbiter**: classifies pointer interactions as
//!   hover/drag/click and keeps a post-drag release from misfiring as
//!   an item selection
//!
//! The controller is framework-independent: it consumes
//! [`ribbon_core::Event`]s, is ticked once per frame, and exposes a
//! render snapshot for whatever draws the strip.

pub mod carousel;
pub mod gesture;
pub mod physics;
pub mod track;

pub use carousel::{Carousel, CarouselConfig, CarouselRenderInfo};
pub use gesture::{GestureArbiter, GestureOutcome};
pub use physics::{normalize_offset, CarouselPhysics};
pub use track::{RenderEntry, Track, TRACK_COPIES};
