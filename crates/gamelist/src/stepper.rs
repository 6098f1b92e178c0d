//! Keyboard navigation between rows.

use crate::events::Key;

/// Where a navigation key moves the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepTarget {
    /// The row to select.
    pub row: usize,
    /// Whether `row` differs from the starting row.
    pub changed: bool,
}

/// Maps navigation keys to target rows.
///
/// The stepper holds no state: the current row is whatever the selected
/// item resolves to at the time of the key press.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArrowKeyStepper;

impl ArrowKeyStepper {
    /// Create a stepper.
    pub fn new() -> Self {
        Self
    }

    /// Whether `key` is one the stepper handles.
    pub fn handles(key: Key) -> bool {
        matches!(
            key,
            Key::ArrowUp | Key::ArrowDown | Key::PageUp | Key::PageDown | Key::Home | Key::End
        )
    }

    /// Compute the row `key` moves to from `current`.
    ///
    /// `visible_rows` is the page size used by PageUp and PageDown. Returns
    /// `None` for keys the stepper does not handle and for an empty list.
    pub fn step(
        &self,
        current: Option<usize>,
        key: Key,
        item_count: usize,
        visible_rows: usize,
    ) -> Option<StepTarget> {
        if item_count == 0 || !Self::handles(key) {
            return None;
        }

        let last = item_count - 1;
        let page = visible_rows.max(1);
        let current = current.map(|row| row.min(last));

        let row = match (key, current) {
            (Key::Home, _) => 0,
            (Key::End, _) => last,
            (_, None) => 0,
            (Key::ArrowUp, Some(row)) => row.saturating_sub(1),
            (Key::ArrowDown, Some(row)) => (row + 1).min(last),
            (Key::PageUp, Some(row)) => row.saturating_sub(page),
            (Key::PageDown, Some(row)) => row.saturating_add(page).min(last),
            _ => return None,
        };

        Some(StepTarget {
            row,
            changed: current != Some(row),
        })
    }
}
