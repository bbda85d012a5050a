//! Carousel error types
//!
//! All errors are configuration-time. At runtime the carousel degrades
//! to a static presentation instead of failing; see the physics module
//! in `ribbon_carousel`.

use thiserror::Error;

/// Errors raised while configuring a carousel
#[derive(Debug, Error, PartialEq)]
pub enum CarouselError {
    /// The item list is empty; a carousel needs at least one item
    #[error("carousel track is empty (need at least one item)")]
    EmptyTrack,

    /// Item width plus gap does not produce a positive unit width
    #[error("carousel unit width is not positive (item_width={item_width}, gap={gap})")]
    NonPositiveWidth { item_width: f32, gap: f32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            CarouselError::EmptyTrack.to_string(),
            "carousel track is empty (need at least one item)"
        );
        let err = CarouselError::NonPositiveWidth {
            item_width: 0.0,
            gap: 0.0,
        };
        assert!(err.to_string().contains("item_width=0"));
    }
}
