//! Lap animations
//!
//! A lap is a single fixed-duration traversal from one value to
//! another. Unlike springs there is no physics: the value is a direct
//! function of elapsed time, so the endpoint is reached exactly and a
//! stopped lap holds whatever value it last produced.

use crate::easing::Easing;

/// A fixed-duration animation from `from` to `to`
#[derive(Clone, Debug)]
pub struct LapAnimation {
    from: f32,
    to: f32,
    duration_ms: f32,
    easing: Easing,
    current_time: f32,
    playing: bool,
}

impl LapAnimation {
    /// Create a lap and start it immediately
    ///
    /// A non-positive duration completes on the first tick.
    pub fn new(from: f32, to: f32, duration_ms: f32, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration_ms: duration_ms.max(0.0),
            easing,
            current_time: 0.0,
            playing: true,
        }
    }

    /// The value the lap started from
    pub fn from(&self) -> f32 {
        self.from
    }

    /// The value the lap ends at
    pub fn to(&self) -> f32 {
        self.to
    }

    /// Current progress (0.0 to 1.0)
    pub fn progress(&self) -> f32 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        (self.current_time / self.duration_ms).clamp(0.0, 1.0)
    }

    /// Current interpolated value
    ///
    /// Returns `to` exactly once the lap has finished; intermediate
    /// values come from the easing curve.
    pub fn value(&self) -> f32 {
        if self.is_finished() {
            return self.to;
        }
        let eased = self.easing.apply(self.progress());
        self.from + (self.to - self.from) * eased
    }

    /// Advance by delta time in milliseconds
    pub fn tick(&mut self, dt_ms: f32) {
        if !self.playing {
            return;
        }
        self.current_time += dt_ms;
        if self.current_time >= self.duration_ms {
            self.current_time = self.duration_ms;
            self.playing = false;
        }
    }

    /// Stop in place; `value()` keeps returning the frozen position
    pub fn stop(&mut self) {
        self.playing = false;
    }

    /// Whether the lap has run to completion (not merely stopped)
    pub fn is_finished(&self) -> bool {
        self.current_time >= self.duration_ms
    }

    /// Whether the lap is still advancing
    pub fn is_playing(&self) -> bool {
        self.playing
    }
}
