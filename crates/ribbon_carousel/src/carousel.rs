//! Carousel controller
//!
//! Wires the track, physics, and gesture arbiter into one unit a page
//! can mount: feed it pointer [`Event`]s, tick it once per frame, and
//! read back a [`CarouselRenderInfo`] snapshot to draw the strip.

use std::sync::{Arc, Mutex};

use ribbon_animation::LapScheduler;
use ribbon_core::events::Event;
use ribbon_core::{CarouselError, InteractionState, MountGuard};

use crate::gesture::{GestureArbiter, GestureOutcome};
use crate::physics::CarouselPhysics;
use crate::track::Track;

/// Carousel configuration
///
/// Visual parameters are configuration constants, never re-derived
/// from content.
#[derive(Debug, Clone, Copy)]
pub struct CarouselConfig {
    /// Card width in pixels
    pub item_width: f32,
    /// Gap between cards in pixels
    pub gap: f32,
    /// Time to traverse exactly one copy-width at nominal speed
    pub lap_duration_ms: f32,
    /// Post-drag delay before auto-motion resumes; doubles as the
    /// click-suppression window
    pub grace_period_ms: f32,
    /// Cumulative pointer travel that classifies a press as a drag
    pub drag_threshold: f32,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            item_width: 220.0,
            gap: 24.0,
            lap_duration_ms: 12_000.0,
            grace_period_ms: 150.0,
            drag_threshold: 4.0,
        }
    }
}

impl CarouselConfig {
    /// Set the card width
    pub fn item_width(mut self, width: f32) -> Self {
        self.item_width = width;
        self
    }

    /// Set the inter-card gap
    pub fn gap(mut self, gap: f32) -> Self {
        self.gap = gap;
        self
    }

    /// Set the nominal lap duration
    pub fn lap_duration_ms(mut self, ms: f32) -> Self {
        self.lap_duration_ms = ms;
        self
    }

    /// Set the grace period
    pub fn grace_period_ms(mut self, ms: f32) -> Self {
        self.grace_period_ms = ms;
        self
    }

    /// Set the drag classification threshold
    pub fn drag_threshold(mut self, px: f32) -> Self {
        self.drag_threshold = px;
        self
    }
}

/// Snapshot of carousel state for a renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarouselRenderInfo {
    /// Horizontal translation to apply to the 3-copy strip
    pub offset: f32,
    /// Pixel span of one copy
    pub unit_width: f32,
    /// Whether automatic motion is running
    pub is_animating: bool,
    /// Current interaction state
    pub interaction: InteractionState,
    /// Selected item index, if a detail view is open
    pub selected: Option<usize>,
}

/// A seamless looping, draggable carousel
pub struct Carousel<T> {
    track: Track<T>,
    config: CarouselConfig,
    physics: Arc<Mutex<CarouselPhysics>>,
    arbiter: GestureArbiter,
    /// Activation callback, invoked only on genuine clicks
    on_item_activate: Option<Box<dyn FnMut(&T) + Send>>,
    /// Item whose detail view is open
    selected: Option<usize>,
    guard: MountGuard,
}

impl<T> Carousel<T> {
    /// Create a carousel without a scheduler (renders statically)
    pub fn new(items: Vec<T>, config: CarouselConfig) -> Result<Self, CarouselError> {
        let track = Track::new(items, config.item_width, config.gap)?;
        let guard = MountGuard::new();
        let mut physics = CarouselPhysics::new(
            track.unit_width(),
            config.lap_duration_ms,
            config.grace_period_ms,
        );
        physics.set_mount_token(guard.token());
        Ok(Self {
            track,
            config,
            physics: Arc::new(Mutex::new(physics)),
            arbiter: GestureArbiter::new(config.drag_threshold, config.grace_period_ms),
            on_item_activate: None,
            selected: None,
            guard,
        })
    }

    /// Create a carousel wired to a shared animation scheduler
    pub fn with_scheduler(
        items: Vec<T>,
        config: CarouselConfig,
        scheduler: &Arc<Mutex<LapScheduler>>,
    ) -> Result<Self, CarouselError> {
        let carousel = Self::new(items, config)?;
        carousel.physics.lock().unwrap().set_scheduler(scheduler);
        Ok(carousel)
    }

    /// Set the activation callback
    pub fn on_item_activate<F: FnMut(&T) + Send + 'static>(mut self, callback: F) -> Self {
        self.on_item_activate = Some(Box::new(callback));
        self
    }

    pub fn track(&self) -> &Track<T> {
        &self.track
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    /// Responsive relayout: new card metrics, recomputed unit width
    ///
    /// The in-flight offset is not rescaled; subsequent normalization
    /// simply uses the new W. No-op after unmount.
    pub fn set_metrics(&mut self, item_width: f32, gap: f32) -> Result<(), CarouselError> {
        if !self.guard.is_alive() {
            return Ok(());
        }
        self.track.set_metrics(item_width, gap)?;
        self.config.item_width = item_width;
        self.config.gap = gap;
        self.physics
            .lock()
            .unwrap()
            .set_unit_width(self.track.unit_width());
        Ok(())
    }

    /// The item whose detail view is open, if any
    pub fn selected_item(&self) -> Option<&T> {
        self.selected.and_then(|index| self.track.item(index))
    }

    /// Handle a pointer or lifecycle event
    ///
    /// No-op after unmount; events must never write to a torn-down
    /// carousel.
    pub fn handle_event(&mut self, event: &Event) {
        if !self.guard.is_alive() {
            return;
        }
        let outcome = self.arbiter.handle_event(event);
        let mut physics = self.physics.lock().unwrap();
        match outcome {
            GestureOutcome::None => {}
            GestureOutcome::HoverStart => physics.on_hover_enter(),
            GestureOutcome::HoverEnd => physics.on_hover_leave(),
            GestureOutcome::DragStart { pointer_x } => physics.on_drag_start(pointer_x),
            GestureOutcome::DragMove { pointer_x } => physics.on_drag_move(pointer_x),
            GestureOutcome::DragEnd => {
                physics.on_drag_end();
                // A drag abandoned over the container edge also ends the hover
                if self.arbiter.state() == InteractionState::Idle {
                    physics.on_hover_leave();
                }
            }
            GestureOutcome::Click { x, .. } => {
                let strip_x = x - physics.offset();
                if let Some(index) = self.track.item_at(strip_x) {
                    tracing::trace!("carousel item {index} activated at x={x:.1}");
                    self.selected = Some(index);
                    self.arbiter.open_detail();
                    physics.on_detail_open();
                    drop(physics);
                    if let (Some(callback), Some(item)) =
                        (self.on_item_activate.as_mut(), self.track.item(index))
                    {
                        callback(item);
                    }
                }
            }
        }
    }

    /// Dismiss the open detail view and restore the previous state
    pub fn close_detail(&mut self) {
        if !self.guard.is_alive() {
            return;
        }
        self.selected = None;
        self.arbiter.close_detail();
        let mut physics = self.physics.lock().unwrap();
        physics.on_detail_close();
        if self.arbiter.state() == InteractionState::Idle {
            physics.on_hover_leave();
        }
    }

    /// Advance timers and motion by one frame
    ///
    /// The shared scheduler must be ticked by the host first; this
    /// reads the animated offset back. Returns true while motion is
    /// active. No-op after unmount.
    pub fn tick(&mut self, dt_ms: f32) -> bool {
        if !self.guard.is_alive() {
            return false;
        }
        self.arbiter.tick(dt_ms);
        self.physics.lock().unwrap().tick(dt_ms)
    }

    /// Snapshot for the renderer
    pub fn render_info(&self) -> CarouselRenderInfo {
        let physics = self.physics.lock().unwrap();
        CarouselRenderInfo {
            offset: physics.offset(),
            unit_width: physics.unit_width(),
            is_animating: physics.is_animating(),
            interaction: self.arbiter.state(),
            selected: self.selected,
        }
    }

    /// Tear down: cancel motion and revoke every pending callback
    ///
    /// After this, ticks and events are no-ops; nothing writes to the
    /// offset again.
    pub fn unmount(&mut self) {
        let mut physics = self.physics.lock().unwrap();
        physics.stop_in_place();
        drop(physics);
        self.guard.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ribbon_core::events::event_types;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const W: f32 = 1750.0; // 7 x (220 + 30)

    fn items() -> Vec<&'static str> {
        vec!["a", "b", "c", "d", "e", "f", "g"]
    }

    fn config() -> CarouselConfig {
        CarouselConfig::default().gap(30.0).lap_duration_ms(1000.0)
    }

    fn mounted() -> (Carousel<&'static str>, Arc<Mutex<LapScheduler>>) {
        let scheduler = Arc::new(Mutex::new(LapScheduler::new()));
        let carousel = Carousel::with_scheduler(items(), config(), &scheduler).unwrap();
        (carousel, scheduler)
    }

    fn run_frames(
        carousel: &mut Carousel<&'static str>,
        scheduler: &Arc<Mutex<LapScheduler>>,
        frames: usize,
        dt_ms: f32,
    ) {
        for _ in 0..frames {
            scheduler.lock().unwrap().tick_by(dt_ms);
            carousel.tick(dt_ms);
        }
    }

    fn pointer(event_type: u32, x: f32) -> Event {
        Event::pointer(event_type, 0, x, 20.0)
    }

    #[test]
    fn test_full_lap_end_to_end() {
        let (mut carousel, scheduler) = mounted();
        assert_eq!(carousel.render_info().offset, -W);

        carousel.tick(0.0); // arm the first lap

        // 999ms in: approaching -2W
        run_frames(&mut carousel, &scheduler, 999, 1.0);
        let info = carousel.render_info();
        assert!(info.is_animating);
        assert!(info.offset < -3495.0 && info.offset >= -3500.0);

        // Lap completes: exact reset to -W, motion continues
        run_frames(&mut carousel, &scheduler, 1, 1.0);
        assert_eq!(carousel.render_info().offset, -W);
        assert!(carousel.render_info().is_animating);

        run_frames(&mut carousel, &scheduler, 100, 1.0);
        assert!(carousel.render_info().offset < -W);
    }

    #[test]
    fn test_hover_mid_lap_freezes_and_resumes_from_held_offset() {
        let (mut carousel, scheduler) = mounted();
        carousel.tick(0.0);

        // Run to roughly -2572, mid-lap
        run_frames(&mut carousel, &scheduler, 470, 1.0);
        let held = carousel.render_info().offset;
        assert!((held - (-2572.5)).abs() < 5.0);

        carousel.handle_event(&pointer(event_types::POINTER_ENTER, 10.0));
        run_frames(&mut carousel, &scheduler, 200, 1.0);
        let info = carousel.render_info();
        assert_eq!(info.offset, held);
        assert!(!info.is_animating);
        assert_eq!(info.interaction, InteractionState::Hovering);

        // Hover out: the next lap starts from the held offset
        carousel.handle_event(&pointer(event_types::POINTER_LEAVE, 10.0));
        run_frames(&mut carousel, &scheduler, 10, 1.0);
        let resumed = carousel.render_info().offset;
        assert!(resumed < held && resumed > held - 20.0);
    }

    #[test]
    fn test_click_activates_item_under_pointer() {
        let activated: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
        let log = activated.clone();

        let scheduler = Arc::new(Mutex::new(LapScheduler::new()));
        let mut carousel = Carousel::with_scheduler(items(), config(), &scheduler)
            .unwrap()
            .on_item_activate(move |item: &&str| {
                log.lock().unwrap().push(item.to_string());
            });

        // Offset is -W; viewport x 250 is strip x 2000: second slot of
        // the middle copy, item "b"
        carousel.handle_event(&pointer(event_types::POINTER_ENTER, 250.0));
        carousel.handle_event(&pointer(event_types::POINTER_DOWN, 250.0));
        carousel.handle_event(&pointer(event_types::POINTER_UP, 250.0));

        assert_eq!(activated.lock().unwrap().as_slice(), ["b"]);
        let info = carousel.render_info();
        assert_eq!(info.selected, Some(1));
        assert_eq!(info.interaction, InteractionState::DetailOpen);
        assert_eq!(carousel.selected_item(), Some(&"b"));
    }

    #[test]
    fn test_drag_release_does_not_activate() {
        let count = Arc::new(AtomicUsize::new(0));
        let count_clone = count.clone();

        let scheduler = Arc::new(Mutex::new(LapScheduler::new()));
        let mut carousel = Carousel::with_scheduler(items(), config(), &scheduler)
            .unwrap()
            .on_item_activate(move |_| {
                count_clone.fetch_add(1, Ordering::SeqCst);
            });

        carousel.handle_event(&pointer(event_types::POINTER_ENTER, 250.0));
        carousel.handle_event(&pointer(event_types::POINTER_DOWN, 250.0));
        // First move classifies the press as a drag, second one moves it
        carousel.handle_event(&pointer(event_types::POINTER_MOVE, 150.0));
        carousel.handle_event(&pointer(event_types::POINTER_MOVE, 100.0));
        carousel.handle_event(&pointer(event_types::POINTER_UP, 100.0));

        // The release landed on a card but the gesture was a drag
        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert_eq!(carousel.render_info().selected, None);

        // The strip followed the 50px of post-classification travel
        assert_eq!(carousel.render_info().offset, -W - 50.0);
    }

    #[test]
    fn test_detail_close_resumes_motion() {
        let (mut carousel, scheduler) = mounted();
        carousel.handle_event(&pointer(event_types::POINTER_ENTER, 250.0));
        carousel.handle_event(&pointer(event_types::POINTER_DOWN, 250.0));
        carousel.handle_event(&pointer(event_types::POINTER_UP, 250.0));
        assert_eq!(carousel.render_info().interaction, InteractionState::DetailOpen);

        carousel.close_detail();
        assert_eq!(carousel.render_info().interaction, InteractionState::Hovering);
        assert_eq!(carousel.render_info().selected, None);

        // Still hovered, so motion stays paused until the pointer leaves
        run_frames(&mut carousel, &scheduler, 5, 1.0);
        assert!(!carousel.render_info().is_animating);

        carousel.handle_event(&pointer(event_types::POINTER_LEAVE, 250.0));
        run_frames(&mut carousel, &scheduler, 1, 1.0);
        assert!(carousel.render_info().is_animating);
    }

    #[test]
    fn test_relayout_recomputes_unit_width_mid_animation() {
        let (mut carousel, scheduler) = mounted();
        carousel.tick(0.0);
        run_frames(&mut carousel, &scheduler, 100, 1.0);
        let before = carousel.render_info().offset;

        carousel.set_metrics(100.0, 25.0).unwrap();
        let info = carousel.render_info();
        assert_eq!(info.unit_width, 875.0); // 7 x (100 + 25)
        assert_eq!(carousel.track().unit_width(), 875.0);
        // The in-flight offset is not rescaled by the relayout itself
        assert_eq!(info.offset, before);

        // Subsequent frames normalize against the new width
        run_frames(&mut carousel, &scheduler, 5, 1.0);
        let offset = carousel.render_info().offset;
        assert!((-2.0 * 875.0..=0.0).contains(&offset));

        assert!(carousel.set_metrics(-5.0, 0.0).is_err());
    }

    #[test]
    fn test_unmount_makes_everything_a_no_op() {
        let (mut carousel, scheduler) = mounted();
        carousel.tick(0.0);
        run_frames(&mut carousel, &scheduler, 100, 1.0);
        let frozen = carousel.render_info().offset;

        carousel.unmount();
        assert_eq!(scheduler.lock().unwrap().lap_count(), 0);

        // Late frames and events write nothing
        run_frames(&mut carousel, &scheduler, 100, 1.0);
        carousel.handle_event(&pointer(event_types::POINTER_DOWN, 10.0));
        carousel.handle_event(&pointer(event_types::POINTER_MOVE, 200.0));
        assert_eq!(carousel.render_info().offset, frozen);
        assert!(!carousel.tick(16.0));
    }

    #[test]
    fn test_empty_items_rejected() {
        let result = Carousel::<&str>::new(vec![], CarouselConfig::default());
        assert!(matches!(result, Err(CarouselError::EmptyTrack)));
    }
}
