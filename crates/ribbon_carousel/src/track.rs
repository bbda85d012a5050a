//! Track model
//!
//! The canonical, finite list of items being carouseled, plus the
//! layout metrics needed to derive the unit width W. The rendered
//! sequence is the track repeated [`TRACK_COPIES`] times end-to-end;
//! normalization in the physics module guarantees the visible window
//! stays inside the middle copy.

use ribbon_core::CarouselError;

/// Number of back-to-back copies in the render list
///
/// Three copies (not two) keep at least one full copy-width of content
/// on both sides of the viewport for the whole normalization window,
/// whichever direction the user drags.
pub const TRACK_COPIES: usize = 3;

/// One slot in the 3-copy render list
///
/// The same item appears once per copy; `(copy, index)` is the stable
/// identity a renderer should key on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderEntry {
    /// Which copy this slot belongs to (0..TRACK_COPIES)
    pub copy: usize,
    /// Index into the item list (0..len)
    pub index: usize,
}

/// The item list and its layout metrics
///
/// Items are fixed for the carousel's lifetime; metrics can change
/// (responsive relayout), in which case `unit_width()` simply reports
/// the new W and subsequent normalization uses it. An in-flight offset
/// is never retroactively rescaled.
#[derive(Debug, Clone)]
pub struct Track<T> {
    items: Vec<T>,
    item_width: f32,
    gap: f32,
}

impl<T> Track<T> {
    /// Create a track; fails on an empty item list or non-positive span
    pub fn new(items: Vec<T>, item_width: f32, gap: f32) -> Result<Self, CarouselError> {
        if items.is_empty() {
            return Err(CarouselError::EmptyTrack);
        }
        if item_width + gap <= 0.0 || !(item_width + gap).is_finite() {
            return Err(CarouselError::NonPositiveWidth { item_width, gap });
        }
        Ok(Self {
            items,
            item_width,
            gap,
        })
    }

    /// Number of items in one copy
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Pixel span of exactly one copy: N x (item width + gap)
    pub fn unit_width(&self) -> f32 {
        self.items.len() as f32 * (self.item_width + self.gap)
    }

    /// Update layout metrics (responsive relayout)
    pub fn set_metrics(&mut self, item_width: f32, gap: f32) -> Result<(), CarouselError> {
        if item_width + gap <= 0.0 || !(item_width + gap).is_finite() {
            return Err(CarouselError::NonPositiveWidth { item_width, gap });
        }
        self.item_width = item_width;
        self.gap = gap;
        Ok(())
    }

    pub fn item_width(&self) -> f32 {
        self.item_width
    }

    pub fn gap(&self) -> f32 {
        self.gap
    }

    /// Item lookup for one copy
    pub fn item(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// The 3-copy render sequence with stable per-copy keys
    pub fn render_list(&self) -> impl Iterator<Item = (RenderEntry, &T)> {
        (0..TRACK_COPIES).flat_map(move |copy| {
            self.items.iter().enumerate().map(move |(index, item)| {
                (RenderEntry { copy, index }, item)
            })
        })
    }

    /// Map an x position inside the 3-copy strip to the item under it
    ///
    /// `strip_x` is measured from the strip's left edge (offset already
    /// applied by the caller). Positions that land in an inter-item gap
    /// still resolve to the slot that owns the gap.
    pub fn item_at(&self, strip_x: f32) -> Option<usize> {
        if strip_x < 0.0 {
            return None;
        }
        let slot = (strip_x / (self.item_width + self.gap)) as usize;
        if slot >= self.items.len() * TRACK_COPIES {
            return None;
        }
        Some(slot % self.items.len())
    }
}
