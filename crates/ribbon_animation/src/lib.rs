//! Ribbon Animation System
//!
//! Fixed-duration value animations and frame scheduling for carousel
//! motion.
//!
//! # Features
//!
//! - **Easing**: progress-mapping functions (carousel laps pin Linear)
//! - **Lap Animations**: constant-velocity traversals with exact endpoints
//! - **Scheduler**: ticks all live animations once per frame

pub mod easing;
pub mod lap;
pub mod scheduler;

pub use easing::Easing;
pub use lap::LapAnimation;
pub use scheduler::{LapId, LapScheduler};
