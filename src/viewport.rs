//! Row arithmetic for a fixed-row-height scrolling window.

use std::ops::Range;

use intentional::Cast;

/// The number of rows instantiated beyond the rows that fit the viewport: one
/// above and one below.
pub const OVERSCAN_ROWS: usize = 2;

/// Returns the number of elements needed to cover a viewport of
/// `viewport_height` showing rows of `row_height`, clamped to `count`.
///
/// ```rust
/// use recycling_list::viewport::pool_capacity;
///
/// assert_eq!(pool_capacity(200., 40., 10_000), 7);
/// assert_eq!(pool_capacity(200., 40., 3), 3);
/// ```
#[must_use]
pub fn pool_capacity(viewport_height: f32, row_height: f32, count: usize) -> usize {
    let rows = (viewport_height / row_height).ceil();
    let rows = if rows.is_finite() && rows > 0. {
        float_to_index(rows)
    } else {
        0
    };
    rows.saturating_add(OVERSCAN_ROWS).min(count)
}

/// Returns the index of the first row visible at `scroll_offset`.
///
/// Offsets above the first row clamp to row 0.
#[must_use]
pub fn start_index(scroll_offset: f32, row_height: f32) -> usize {
    let row = (scroll_offset / row_height).floor();
    if row.is_nan() || row <= 0. {
        0
    } else {
        float_to_index(row)
    }
}

/// Returns the vertical position of the center of the row at `index`.
///
/// Rows are laid out from the top of the content area downwards, along
/// negative `y`.
#[must_use]
pub fn row_center(index: usize, row_height: f32) -> f32 {
    -(index.cast::<f32>() * row_height + row_height / 2.)
}

/// Returns the total height of `count` rows.
#[must_use]
pub fn content_height(count: usize, row_height: f32) -> f32 {
    count.cast::<f32>() * row_height
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn float_to_index(rows: f32) -> usize {
    // Saturates for values past usize::MAX.
    rows as usize
}

/// The portion of a list that a recycled pool currently represents.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WindowState {
    start: usize,
    last_scroll: Option<f32>,
}

impl WindowState {
    /// Returns the list index bound to the pool's first slot.
    #[must_use]
    pub const fn start(&self) -> usize {
        self.start
    }

    /// Returns the scroll offset the window was last computed from, if any.
    #[must_use]
    pub const fn last_scroll(&self) -> Option<f32> {
        self.last_scroll
    }

    /// Returns the list indices covered by a pool of `pool_len` slots,
    /// clamped to a list of `count` entries.
    #[must_use]
    pub fn range(&self, pool_len: usize, count: usize) -> Range<usize> {
        let end = self.start.saturating_add(pool_len).min(count);
        self.start.min(end)..end
    }

    /// Moves the window to `scroll_offset`.
    ///
    /// Movement of less than one row since the last recorded offset is
    /// ignored and `None` is returned. Otherwise the offset is recorded and
    /// the new start index is returned.
    pub fn scroll_to(&mut self, scroll_offset: f32, row_height: f32) -> Option<usize> {
        if let Some(last) = self.last_scroll {
            if (scroll_offset - last).abs() < row_height {
                return None;
            }
        }

        self.last_scroll = Some(scroll_offset);
        self.start = start_index(scroll_offset, row_height);
        Some(self.start)
    }

    /// Returns the window to the top of the list and forgets the last
    /// offset, so the next [`scroll_to`](Self::scroll_to) always moves.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::{content_height, pool_capacity, row_center, start_index, WindowState};

    #[test]
    fn capacity_adds_overscan() {
        assert_eq!(pool_capacity(200., 40., 10_000), 7);
        assert_eq!(pool_capacity(210., 40., 10_000), 8);
        assert_eq!(pool_capacity(0., 40., 10_000), 2);
    }

    #[test]
    fn capacity_clamps_to_count() {
        assert_eq!(pool_capacity(200., 40., 4), 4);
        assert_eq!(pool_capacity(200., 40., 0), 0);
    }

    #[test]
    fn capacity_tolerates_degenerate_viewports() {
        assert_eq!(pool_capacity(-50., 40., 100), 2);
        assert_eq!(pool_capacity(f32::NAN, 40., 100), 2);
    }

    #[test]
    fn start_index_floors() {
        assert_eq!(start_index(123., 40.), 3);
        assert_eq!(start_index(120., 40.), 3);
        assert_eq!(start_index(119.9, 40.), 2);
        assert_eq!(start_index(0., 40.), 0);
    }

    #[test]
    fn start_index_clamps_overscroll() {
        assert_eq!(start_index(-80., 40.), 0);
        assert_eq!(start_index(f32::NAN, 40.), 0);
    }

    #[test]
    fn rows_are_centered_in_their_band() {
        assert!((row_center(0, 40.) - -20.).abs() < f32::EPSILON);
        assert!((row_center(3, 40.) - -140.).abs() < f32::EPSILON);
        assert!((content_height(10_000, 40.) - 400_000.).abs() < f32::EPSILON);
    }

    #[test]
    fn window_coalesces_sub_row_movement() {
        let mut window = WindowState::default();

        assert_eq!(window.scroll_to(0., 40.), Some(0));
        assert_eq!(window.scroll_to(39., 40.), None);
        assert_eq!(window.scroll_to(-39., 40.), None);
        assert_eq!(window.scroll_to(123., 40.), Some(3));
        assert_eq!(window.last_scroll(), Some(123.));
        assert_eq!(window.scroll_to(83., 40.), Some(2));
    }

    #[test]
    fn reset_forces_next_scroll() {
        let mut window = WindowState::default();
        window.scroll_to(400., 40.);
        window.reset();

        assert_eq!(window.start(), 0);
        assert_eq!(window.scroll_to(401., 40.), Some(10));
    }

    #[test]
    fn range_clamps_to_list() {
        let mut window = WindowState::default();
        window.scroll_to(400., 40.);

        assert_eq!(window.range(7, 100), 10..17);
        assert_eq!(window.range(7, 12), 10..12);
        assert_eq!(window.range(7, 5), 5..5);
    }
}
