//! Windowing math for uniform-height rows.
//!
//! Everything here is a pure function of its inputs. Given the number of
//! items, the row height, the viewport height and the scroll offset,
//! [`compute_window`] decides which rows must exist; [`scroll_to_row`] decides
//! how far to scroll so that one particular row is fully visible.
//!
//! ```
//! use gamelist::window::{compute_window, scroll_to_row};
//!
//! // 100 rows of 30px in a 300px viewport, bring row 50 into view.
//! let offset = scroll_to_row(Some(50), 100, 30.0, 300.0, 0.0);
//! assert_eq!(offset, 1230.0);
//!
//! let window = compute_window(100, 30.0, 300.0, offset, 15).unwrap();
//! assert_eq!((window.start, window.stop), (41, 50));
//! assert_eq!((window.overscan_start, window.overscan_stop), (26, 65));
//! ```

use std::ops::RangeInclusive;

use crate::config::is_valid_row_height;

/// The range of rows a render pass materializes.
///
/// All indices are inclusive and satisfy
/// `overscan_start <= start <= stop <= overscan_stop < item_count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowWindow {
    /// First row intersecting the viewport.
    pub start: usize,
    /// Last row intersecting the viewport.
    pub stop: usize,
    /// First row rendered, including overscan.
    pub overscan_start: usize,
    /// Last row rendered, including overscan.
    pub overscan_stop: usize,
}

impl RowWindow {
    /// Whether `index` is rendered (inside the overscan range).
    pub fn contains(&self, index: usize) -> bool {
        self.overscan_range().contains(&index)
    }

    /// Whether `index` intersects the viewport.
    pub fn is_visible(&self, index: usize) -> bool {
        (self.start..=self.stop).contains(&index)
    }

    /// Number of rows intersecting the viewport.
    pub fn visible_len(&self) -> usize {
        self.stop - self.start + 1
    }

    /// Number of rows rendered.
    pub fn rendered_len(&self) -> usize {
        self.overscan_stop - self.overscan_start + 1
    }

    /// The rendered rows.
    pub fn overscan_range(&self) -> RangeInclusive<usize> {
        self.overscan_start..=self.overscan_stop
    }
}

/// Two-dimensional range report for hosts that speak in rows and columns.
///
/// The list only has one column, so both column ranges are always `0..=0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SectionRendered {
    pub row_start_index: usize,
    pub row_stop_index: usize,
    pub row_overscan_start_index: usize,
    pub row_overscan_stop_index: usize,
    pub column_start_index: usize,
    pub column_stop_index: usize,
    pub column_overscan_start_index: usize,
    pub column_overscan_stop_index: usize,
}

impl SectionRendered {
    /// Report a row window as a single-column section.
    pub fn from_rows(window: RowWindow) -> Self {
        Self {
            row_start_index: window.start,
            row_stop_index: window.stop,
            row_overscan_start_index: window.overscan_start,
            row_overscan_stop_index: window.overscan_stop,
            column_start_index: 0,
            column_stop_index: 0,
            column_overscan_start_index: 0,
            column_overscan_stop_index: 0,
        }
    }
}

impl From<RowWindow> for SectionRendered {
    fn from(window: RowWindow) -> Self {
        Self::from_rows(window)
    }
}

/// Height of all rows together.
pub fn total_height(item_count: usize, row_height: f32) -> f32 {
    (item_count as f64 * f64::from(row_height)) as f32
}

/// Distance from the top of the content to the top of row `index`.
pub fn row_offset(index: usize, row_height: f32) -> f32 {
    (index as f64 * f64::from(row_height)) as f32
}

/// Largest meaningful scroll offset.
pub fn max_scroll_offset(item_count: usize, row_height: f32, viewport_height: f32) -> f32 {
    (total_height(item_count, row_height) - viewport_height.max(0.0)).max(0.0)
}

fn clamp_offset(offset: f32, item_count: usize, row_height: f32, viewport_height: f32) -> f32 {
    if !offset.is_finite() {
        return 0.0;
    }
    offset.clamp(0.0, max_scroll_offset(item_count, row_height, viewport_height))
}

/// Compute the rows to render for a scroll position.
///
/// Returns `None` when there is nothing to render: no items, or a row height
/// that is not a positive number of pixels.
pub fn compute_window(
    item_count: usize,
    row_height: f32,
    viewport_height: f32,
    scroll_offset: f32,
    overscan: usize,
) -> Option<RowWindow> {
    if item_count == 0 || !is_valid_row_height(row_height) {
        return None;
    }

    let last = item_count - 1;
    let viewport_height = if viewport_height.is_finite() {
        f64::from(viewport_height.max(0.0))
    } else {
        0.0
    };
    let offset = f64::from(clamp_offset(
        scroll_offset,
        item_count,
        row_height,
        viewport_height as f32,
    ));
    let row_height = f64::from(row_height);

    let start = ((offset / row_height).floor() as usize).min(last);
    let end_edge = ((offset + viewport_height) / row_height).ceil() as usize;
    let stop = end_edge.saturating_sub(1).clamp(start, last);

    let window = RowWindow {
        start,
        stop,
        overscan_start: start.saturating_sub(overscan),
        overscan_stop: stop.saturating_add(overscan).min(last),
    };

    tracing::trace!(
        target: gamelist_core::logging::targets::WINDOW,
        item_count,
        offset,
        ?window,
        "window computed"
    );

    Some(window)
}

/// Minimal scroll offset that shows the whole of row `target`.
///
/// The current offset is kept when the row is already fully visible, when
/// there is no target, or when the target is out of range. A row taller than
/// the viewport is aligned to its bottom edge.
pub fn scroll_to_row(
    target: Option<usize>,
    item_count: usize,
    row_height: f32,
    viewport_height: f32,
    current_offset: f32,
) -> f32 {
    if !is_valid_row_height(row_height) {
        return current_offset.max(0.0);
    }
    let current = clamp_offset(current_offset, item_count, row_height, viewport_height);
    let Some(target) = target.filter(|&t| t < item_count) else {
        return current;
    };

    let top = row_offset(target, row_height);
    let bottom = row_offset(target + 1, row_height);
    let viewport_height = viewport_height.max(0.0);

    // Largest offset showing the row's top, smallest showing its bottom.
    let offset = current.min(top).max(bottom - viewport_height);

    clamp_offset(offset, item_count, row_height, viewport_height)
}

/// Row index under a viewport y coordinate, if any.
pub fn row_at(
    y: f32,
    item_count: usize,
    row_height: f32,
    scroll_offset: f32,
) -> Option<usize> {
    if !is_valid_row_height(row_height) || !y.is_finite() {
        return None;
    }
    let content_y = f64::from(y) + f64::from(scroll_offset.max(0.0));
    if content_y < 0.0 {
        return None;
    }
    let index = (content_y / f64::from(row_height)).floor() as usize;
    (index < item_count).then_some(index)
}
