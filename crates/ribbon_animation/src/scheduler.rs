//! Animation scheduler
//!
//! Owns all live lap animations and advances them once per frame.
//! Callers keep a [`LapId`] and read the interpolated value back after
//! each tick; removing a lap cancels it.

use crate::lap::LapAnimation;
use slotmap::{new_key_type, SlotMap};
use std::time::Instant;

new_key_type! {
    pub struct LapId;
}

/// Ticks all registered lap animations
pub struct LapScheduler {
    laps: SlotMap<LapId, LapAnimation>,
    last_frame: Instant,
}

impl LapScheduler {
    pub fn new() -> Self {
        Self {
            laps: SlotMap::with_key(),
            last_frame: Instant::now(),
        }
    }

    pub fn add_lap(&mut self, lap: LapAnimation) -> LapId {
        self.laps.insert(lap)
    }

    pub fn get_lap(&self, id: LapId) -> Option<&LapAnimation> {
        self.laps.get(id)
    }

    pub fn get_lap_mut(&mut self, id: LapId) -> Option<&mut LapAnimation> {
        self.laps.get_mut(id)
    }

    /// Cancel a lap; the caller keeps whatever value it last read
    pub fn remove_lap(&mut self, id: LapId) -> Option<LapAnimation> {
        self.laps.remove(id)
    }

    /// Tick all animations using wall-clock elapsed time
    pub fn tick(&mut self) {
        let now = Instant::now();
        let dt_ms = (now - self.last_frame).as_secs_f32() * 1000.0;
        self.last_frame = now;
        self.tick_by(dt_ms);
    }

    /// Tick all animations by an explicit delta (milliseconds)
    ///
    /// Used by hosts that drive frames themselves, and by tests.
    pub fn tick_by(&mut self, dt_ms: f32) {
        for (_, lap) in self.laps.iter_mut() {
            lap.tick(dt_ms);
        }
    }

    /// Check if any animations are still advancing
    pub fn has_active_animations(&self) -> bool {
        self.laps.iter().any(|(_, lap)| lap.is_playing())
    }

    /// Number of registered laps (finished ones included until removed)
    pub fn lap_count(&self) -> usize {
        self.laps.len()
    }
}

impl Default for LapScheduler {
    fn default() -> Self {
        Self::new()
    }
}
