//! Property tests for the windowing math and keyboard stepping.

use gamelist::window::{compute_window, max_scroll_offset, row_offset, scroll_to_row};
use gamelist::{ArrowKeyStepper, Key};
use proptest::prelude::*;

// Pixel values are whole numbers well inside f32's exact integer range, so
// the assertions below can compare offsets exactly.
fn row_height() -> impl Strategy<Value = f32> {
    (1u16..200).prop_map(f32::from)
}

fn viewport_height() -> impl Strategy<Value = f32> {
    (0u16..2000).prop_map(f32::from)
}

fn scroll_offset() -> impl Strategy<Value = f32> {
    (0u32..2_000_000).prop_map(|offset| offset as f32)
}

fn nav_key() -> impl Strategy<Value = Key> {
    prop_oneof![
        Just(Key::ArrowUp),
        Just(Key::ArrowDown),
        Just(Key::PageUp),
        Just(Key::PageDown),
        Just(Key::Home),
        Just(Key::End),
    ]
}

proptest! {
    #[test]
    fn window_ordering_holds(
        item_count in 0usize..5000,
        h in row_height(),
        viewport in viewport_height(),
        offset in scroll_offset(),
        overscan in 0usize..40,
    ) {
        match compute_window(item_count, h, viewport, offset, overscan) {
            None => prop_assert_eq!(item_count, 0),
            Some(window) => {
                prop_assert!(window.overscan_start <= window.start);
                prop_assert!(window.start <= window.stop);
                prop_assert!(window.stop <= window.overscan_stop);
                prop_assert!(window.overscan_stop < item_count);
            }
        }
    }

    #[test]
    fn visible_rows_are_bounded(
        item_count in 1usize..5000,
        h in row_height(),
        viewport in viewport_height(),
        offset in scroll_offset(),
    ) {
        let window = compute_window(item_count, h, viewport, offset, 15).unwrap();
        let bound = (viewport / h).ceil() as usize + 1;
        prop_assert!(
            window.visible_len() <= bound,
            "{} visible rows exceed bound {}", window.visible_len(), bound
        );
    }

    #[test]
    fn compute_window_is_pure(
        item_count in 0usize..5000,
        h in row_height(),
        viewport in viewport_height(),
        offset in scroll_offset(),
        overscan in 0usize..40,
    ) {
        let first = compute_window(item_count, h, viewport, offset, overscan);
        let second = compute_window(item_count, h, viewport, offset, overscan);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn scroll_target_is_rendered(
        (item_count, target) in (1usize..5000).prop_flat_map(|n| (Just(n), 0..n)),
        h in row_height(),
        viewport in 1u16..2000,
        current in scroll_offset(),
        overscan in 0usize..40,
    ) {
        let viewport = f32::from(viewport);
        let offset = scroll_to_row(Some(target), item_count, h, viewport, current);
        prop_assert!(offset >= 0.0);
        prop_assert!(offset <= max_scroll_offset(item_count, h, viewport));

        let window = compute_window(item_count, h, viewport, offset, overscan).unwrap();
        prop_assert!(window.contains(target));
        prop_assert!(window.is_visible(target));

        if h <= viewport {
            prop_assert!(row_offset(target, h) >= offset);
            prop_assert!(row_offset(target + 1, h) <= offset + viewport);
        }
    }

    #[test]
    fn scroll_to_row_is_idempotent(
        (item_count, target) in (1usize..5000).prop_flat_map(|n| (Just(n), 0..n)),
        h in row_height(),
        viewport in 1u16..2000,
        current in scroll_offset(),
    ) {
        let viewport = f32::from(viewport);
        let once = scroll_to_row(Some(target), item_count, h, viewport, current);
        let twice = scroll_to_row(Some(target), item_count, h, viewport, once);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn stepping_stays_in_bounds(
        item_count in 1usize..500,
        start in proptest::option::of(0usize..500),
        keys in proptest::collection::vec(nav_key(), 1..30),
        page in 0usize..40,
    ) {
        let stepper = ArrowKeyStepper::new();
        let mut current = start.map(|row| row.min(item_count - 1));
        for key in keys {
            let step = stepper.step(current, key, item_count, page).unwrap();
            prop_assert!(step.row < item_count);
            prop_assert_eq!(step.changed, current != Some(step.row));
            current = Some(step.row);
        }
    }
}
