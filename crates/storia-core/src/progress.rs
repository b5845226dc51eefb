//! Per-panel progress segments shown above the active story.
//!
//! Pure functions: the segment fills are re-derived from the playback
//! position on every render and hold no state of their own.

use alloc::vec::Vec;

/// Fill fraction of one progress segment, in `0.0..=1.0`.
pub type SegmentFill = f32;

/// Clamps a progress fraction into `0.0..=1.0`. `NaN` counts as empty.
pub fn clamp_fraction(progress: f32) -> f32 {
    if progress.is_nan() {
        return 0.0;
    }
    progress.clamp(0.0, 1.0)
}

/// Fill of segment `index` given the active panel and its progress.
pub fn segment_fill(index: usize, current: usize, current_progress: f32) -> SegmentFill {
    match index.cmp(&current) {
        core::cmp::Ordering::Less => 1.0,
        core::cmp::Ordering::Equal => clamp_fraction(current_progress),
        core::cmp::Ordering::Greater => 0.0,
    }
}

/// One fill per panel: completed panels are full, the active panel shows
/// its progress and upcoming panels are empty.
pub fn segments(total: usize, current: usize, current_progress: f32) -> Vec<SegmentFill> {
    (0..total)
        .map(|index| segment_fill(index, current, current_progress))
        .collect()
}

/// Percentage (0..=100) used by renderers that draw integer widths.
pub fn fill_percent(fill: SegmentFill) -> u8 {
    (clamp_fraction(fill) * 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn middle_panel_is_partially_filled() {
        assert_eq!(segments(4, 2, 0.25), [1.0, 1.0, 0.25, 0.0]);
    }

    #[test]
    fn progress_is_clamped() {
        assert_eq!(segments(2, 0, 3.0), [1.0, 0.0]);
        assert_eq!(segments(2, 1, -1.0), [1.0, 0.0]);
        assert_eq!(segments(1, 0, f32::NAN), [0.0]);
    }

    #[test]
    fn empty_story_has_no_segments() {
        assert!(segments(0, 0, 0.5).is_empty());
    }

    #[test]
    fn percent_rounds_down() {
        assert_eq!(fill_percent(0.999), 99);
        assert_eq!(fill_percent(1.0), 100);
        assert_eq!(fill_percent(-0.5), 0);
    }
}
