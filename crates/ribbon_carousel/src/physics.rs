//! Carousel position controller
//!
//! Owns the single scalar offset applied to the 3-copy render strip
//! and keeps it inside the canonical `[-2W, 0]` window, where W is the
//! pixel span of one track copy. The offset has exactly one writer at
//! any instant, selected by [`DriveState`]: the lap animation while
//! `Animating`, the drag handler while `Dragging`, nobody while
//! `Paused`. Hand-offs reuse the last written value, so control moves
//! between drivers without a visible jump.

use std::sync::{Arc, Mutex, Weak};

use ribbon_animation::{Easing, LapAnimation, LapId, LapScheduler};
use ribbon_core::{DriveState, MountToken};

/// Map a raw offset into the canonical `[-2W, 0]` window
///
/// Wraps by whole copy-widths, so the result is congruent to the input
/// modulo `unit_width` and the rendered content is identical. A
/// non-finite input is an upstream layout bug; it resets to the start
/// of the middle copy rather than propagating NaN into rendering.
pub fn normalize_offset(raw: f32, unit_width: f32) -> f32 {
    if unit_width <= 0.0 || !unit_width.is_finite() {
        return raw;
    }
    if !raw.is_finite() {
        tracing::warn!("non-finite carousel offset {raw}, resetting to -{unit_width}");
        return -unit_width;
    }
    let mut x = raw;
    // Euclidean remainder wraps in one step; repeated x -= W would
    // stall once |x| is large enough that the subtraction rounds back
    // to x
    if x > 0.0 || x < -2.0 * unit_width {
        x = x.rem_euclid(unit_width) - unit_width;
    }
    x
}

/// Position state for one carousel instance
pub struct CarouselPhysics {
    /// Current horizontal translation of the 3-copy strip
    offset: f32,
    /// Pixel span of one track copy (W)
    unit_width: f32,
    /// Time to traverse exactly one W at nominal speed
    lap_duration_ms: f32,
    /// Delay after drag release before auto-motion resumes
    grace_period_ms: f32,
    /// Which driver currently owns the offset
    drive: DriveState,
    /// Pointer is over the container
    hovered: bool,
    /// An item's detail view is open
    detail_open: bool,
    /// Remaining post-drag grace time (also the click-suppression window)
    grace_remaining_ms: f32,
    /// Live lap in the scheduler (only while `Animating`)
    lap: Option<LapId>,
    /// Weak reference to the shared animation scheduler
    scheduler: Weak<Mutex<LapScheduler>>,
    /// Liveness token; once revoked, ticks stop writing the offset
    mount: Option<MountToken>,
}

impl CarouselPhysics {
    /// Create physics with the offset at the start of the middle copy
    pub fn new(unit_width: f32, lap_duration_ms: f32, grace_period_ms: f32) -> Self {
        Self {
            offset: -unit_width,
            unit_width,
            lap_duration_ms,
            grace_period_ms,
            drive: DriveState::Paused,
            hovered: false,
            detail_open: false,
            grace_remaining_ms: 0.0,
            lap: None,
            scheduler: Weak::new(),
            mount: None,
        }
    }

    /// Create physics wired to a shared scheduler
    pub fn with_scheduler(
        unit_width: f32,
        lap_duration_ms: f32,
        grace_period_ms: f32,
        scheduler: &Arc<Mutex<LapScheduler>>,
    ) -> Self {
        let mut physics = Self::new(unit_width, lap_duration_ms, grace_period_ms);
        physics.scheduler = Arc::downgrade(scheduler);
        physics
    }

    /// Attach the scheduler after construction
    pub fn set_scheduler(&mut self, scheduler: &Arc<Mutex<LapScheduler>>) {
        self.scheduler = Arc::downgrade(scheduler);
    }

    /// Attach the owner's liveness token
    ///
    /// Ticks read animated values back from the shared scheduler after
    /// the owning component may already be gone; a revoked token turns
    /// them into no-ops.
    pub fn set_mount_token(&mut self, token: MountToken) {
        self.mount = Some(token);
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn drive(&self) -> DriveState {
        self.drive
    }

    pub fn unit_width(&self) -> f32 {
        self.unit_width
    }

    /// New unit width after a relayout; the current offset is not
    /// rescaled, subsequent normalization simply uses the new W
    pub fn set_unit_width(&mut self, unit_width: f32) {
        self.unit_width = unit_width;
    }

    /// Whether automatic motion is currently held off
    ///
    /// Logical OR of hover, drag, open detail view, and the trailing
    /// post-drag grace window.
    pub fn suppressed(&self) -> bool {
        self.hovered
            || self.detail_open
            || self.drive.is_dragging()
            || self.grace_remaining_ms > 0.0
    }

    /// Remaining grace time in milliseconds (0 when expired)
    pub fn grace_remaining_ms(&self) -> f32 {
        self.grace_remaining_ms
    }

    pub fn is_animating(&self) -> bool {
        self.drive.is_animating()
    }

    // =========================================================================
    // Automatic motion
    // =========================================================================

    /// Begin a lap toward the far edge of the normalization window
    ///
    /// The lap runs at the nominal speed of one W per `lap_duration_ms`
    /// regardless of where it starts, so a lap resumed after a pause
    /// takes proportionally less time. No-op while suppressed, without
    /// a scheduler, or with an invalid width (degrades to a static
    /// strip per the error design).
    pub fn start_auto(&mut self) {
        if self.suppressed() || self.drive.is_animating() {
            return;
        }
        if self.unit_width <= 0.0 || !self.unit_width.is_finite() {
            tracing::warn!(
                "carousel unit width {} is invalid, refusing to animate",
                self.unit_width
            );
            return;
        }
        let Some(scheduler_arc) = self.scheduler.upgrade() else {
            return;
        };

        self.offset = normalize_offset(self.offset, self.unit_width);
        // The far window edge is congruent to -W, so the lap-end reset
        // is invisible no matter where the lap started
        let target = -2.0 * self.unit_width;
        let distance = (target - self.offset).abs();
        let duration_ms = distance / self.unit_width * self.lap_duration_ms;

        tracing::trace!(
            "carousel lap start: offset={:.1} target={:.1} duration={:.0}ms",
            self.offset,
            target,
            duration_ms
        );

        let lap = LapAnimation::new(self.offset, target, duration_ms, Easing::Linear);
        let mut scheduler = scheduler_arc.lock().unwrap();
        self.lap = Some(scheduler.add_lap(lap));
        drop(scheduler);
        self.drive = DriveState::Animating;
    }

    /// Stop mid-lap without snapping; the offset holds where it is
    pub fn stop_in_place(&mut self) {
        self.cancel_lap();
        if self.drive.is_animating() {
            self.drive = DriveState::Paused;
        }
    }

    fn cancel_lap(&mut self) {
        if let Some(id) = self.lap.take() {
            if let Some(scheduler) = self.scheduler.upgrade() {
                scheduler.lock().unwrap().remove_lap(id);
            }
        }
    }

    // =========================================================================
    // Hover / detail suppression
    // =========================================================================

    pub fn on_hover_enter(&mut self) {
        self.hovered = true;
        if self.drive.is_animating() {
            self.stop_in_place();
        }
    }

    pub fn on_hover_leave(&mut self) {
        self.hovered = false;
    }

    pub fn on_detail_open(&mut self) {
        self.detail_open = true;
        if self.drive.is_animating() {
            self.stop_in_place();
        }
    }

    pub fn on_detail_close(&mut self) {
        self.detail_open = false;
    }

    // =========================================================================
    // Drag motion
    // =========================================================================

    /// Hand the offset to the drag driver
    ///
    /// The captured start offset is exactly the value the previous
    /// driver last wrote, which is what keeps the hand-off seamless.
    pub fn on_drag_start(&mut self, pointer_x: f32) {
        self.cancel_lap();
        self.drive = DriveState::Dragging {
            start_offset: self.offset,
            pointer_origin: pointer_x,
        };
    }

    /// Follow the pointer, normalizing continuously
    ///
    /// Normalizing on every move (not just at release) lets a single
    /// unbroken gesture traverse many copy-widths without ever dragging
    /// the strip off the end of its three copies.
    pub fn on_drag_move(&mut self, pointer_x: f32) {
        let DriveState::Dragging {
            start_offset,
            pointer_origin,
        } = self.drive
        else {
            return;
        };
        let raw = start_offset + (pointer_x - pointer_origin);
        self.offset = normalize_offset(raw, self.unit_width);
        tracing::trace!("carousel drag: raw={:.1} offset={:.1}", raw, self.offset);
    }

    /// Release the drag and arm the grace period
    pub fn on_drag_end(&mut self) {
        if !self.drive.is_dragging() {
            return;
        }
        self.offset = normalize_offset(self.offset, self.unit_width);
        self.drive = DriveState::Paused;
        self.grace_remaining_ms = self.grace_period_ms;
    }

    // =========================================================================
    // Frame tick
    // =========================================================================

    /// Advance timers and pull the animated offset for this frame
    ///
    /// Returns true while motion is active. The scheduler itself is
    /// ticked by the host once per frame; this reads the lap value
    /// back and handles lap completion and grace expiry.
    pub fn tick(&mut self, dt_ms: f32) -> bool {
        if let Some(token) = &self.mount {
            if !token.is_alive() {
                return false;
            }
        }
        if self.grace_remaining_ms > 0.0 {
            self.grace_remaining_ms = (self.grace_remaining_ms - dt_ms).max(0.0);
        }

        match self.drive {
            DriveState::Dragging { .. } => true,
            DriveState::Paused => {
                if !self.suppressed() {
                    self.start_auto();
                }
                self.drive.is_animating()
            }
            DriveState::Animating => {
                let Some(scheduler_arc) = self.scheduler.upgrade() else {
                    // Scheduler gone mid-lap; hold position
                    self.lap = None;
                    self.drive = DriveState::Paused;
                    return false;
                };
                let finished = {
                    let scheduler = scheduler_arc.lock().unwrap();
                    if let Some(lap) = self.lap.and_then(|id| scheduler.get_lap(id)) {
                        self.offset = normalize_offset(lap.value(), self.unit_width);
                        lap.is_finished()
                    } else {
                        true
                    }
                };
                if finished {
                    self.cancel_lap();
                    // Exact reset, not the general normalizer: float
                    // drift must not accumulate across laps
                    self.offset = -self.unit_width;
                    self.drive = DriveState::Paused;
                    if !self.suppressed() {
                        self.start_auto();
                    }
                }
                self.drive.is_animating()
            }
        }
    }
}
