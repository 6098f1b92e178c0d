//! End-to-end scenarios for the game list: rendering, scrolling the
//! selection into view, and routing input on rows to the owner's callbacks.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use gamelist::{
    ContextMenuEvent, DragEvent, ElementError, ElementId, ElementResult, GameList,
    GameListError, GameListProps, Item, ItemList, Key, KeyPressEvent, ListEvent, PointerEvent,
    RenderOutcome, ResizeEvent, RowBuilder, RowState, SELECTED_CLASS, ScrollEvent,
    SectionRendered, Size,
};
use parking_lot::Mutex;

#[derive(Debug)]
struct Game {
    id: String,
    title: String,
    platform: String,
}

impl Item for Game {
    fn id(&self) -> &str {
        &self.id
    }
}

fn library(count: usize) -> ItemList<Game> {
    (0..count)
        .map(|i| Game {
            id: format!("game-{i}"),
            title: format!("Game {i}"),
            platform: if i % 2 == 0 { "PC" } else { "Switch" }.to_string(),
        })
        .collect::<Vec<_>>()
        .into()
}

/// Each row renders `div > span.title + span.platform > em`.
fn render_row(row: &mut RowBuilder<'_>, game: &Game, _state: &RowState) -> ElementResult<()> {
    let title = row.append_child("span")?;
    row.add_class(title, "title")?;
    row.set_text(title, game.title.clone())?;

    let platform = row.append_child("span")?;
    row.add_class(platform, "platform")?;
    let badge = row.append(platform, "em")?;
    row.set_text(badge, game.platform.clone())
}

fn mounted(games: &ItemList<Game>, viewport_height: f32) -> (GameList<Game>, ElementId) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("gamelist=debug")
        .with_test_writer()
        .try_init();

    let mut list = GameList::new();
    list.set_row_renderer(render_row);
    list.set_no_rows_renderer(|placeholder: &mut RowBuilder<'_>| {
        let message = placeholder.append_child("p")?;
        placeholder.set_text(message, "No games found")
    });
    list.set_games(games.clone());
    list.set_row_height(30.0).unwrap();
    let container = list.mount().unwrap();
    list.handle_event(&ListEvent::Resize(ResizeEvent {
        size: Size::new(640.0, viewport_height),
    }))
    .unwrap();
    (list, container)
}

/// A shared log plus a slot that appends every emission to it.
fn recorder<A>() -> (Arc<Mutex<Vec<A>>>, impl Fn(&A) + Send + Sync + 'static)
where
    A: Clone + Send + Sync + 'static,
{
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    (seen, move |args: &A| sink.lock().push(args.clone()))
}

/// A descendant element several levels inside the rendered row `index`.
fn badge_in_row(list: &GameList<Game>, index: usize) -> ElementId {
    let row = list.row_element(index).expect("row is rendered");
    let tree = list.tree();
    let platform = tree.children(row).unwrap()[1];
    tree.children(platform).unwrap()[0]
}

#[test]
fn selected_row_is_scrolled_into_view() {
    let games = library(100);
    let mut list = GameList::new();
    list.set_row_renderer(render_row);
    list.set_props(GameListProps {
        games: games.clone(),
        selected: games.get(50).cloned(),
        dragged: None,
        row_height: 30.0,
        order_by: "title".to_string(),
        order_reverse: false,
    })
    .unwrap();
    list.mount().unwrap();
    list.handle_event(&ListEvent::Resize(ResizeEvent {
        size: Size::new(640.0, 300.0),
    }))
    .unwrap();

    let window = list.window().unwrap();
    assert!(window.contains(50));
    assert_eq!(window.visible_len(), 10);

    let offset = list.scroll_offset();
    assert!(50.0 * 30.0 >= offset);
    assert!(51.0 * 30.0 <= offset + 300.0);
    assert_eq!(list.selected_index(), Some(50));
}

#[test]
fn empty_list_shows_placeholder_only() {
    let games = library(0);
    let (mut list, container) = mounted(&games, 300.0);

    let (clicks, on_click) = recorder::<Option<(Arc<Game>, usize)>>();
    list.selection_changed.connect(on_click);
    let (launches, on_launch) = recorder::<(Arc<Game>, usize)>();
    list.launched.connect(on_launch);

    assert_eq!(list.render().unwrap(), RenderOutcome::Empty);
    assert_eq!(list.window(), None);

    let placeholder = list.placeholder().expect("placeholder is shown");
    let tree = list.tree();
    let message = tree.children(placeholder).unwrap()[0];
    assert_eq!(tree.text(message).unwrap(), Some("No games found"));
    assert!(tree.is_inclusive_ancestor(container, placeholder).unwrap());

    let handled = list
        .handle_event(&ListEvent::Click(PointerEvent::new(placeholder)))
        .unwrap();
    assert!(!handled);
    list.handle_event(&ListEvent::KeyPress(KeyPressEvent::new(container, Key::Enter)))
        .unwrap();

    assert!(clicks.lock().is_empty());
    assert!(launches.lock().is_empty());
}

#[test]
fn placeholder_is_removed_once_games_arrive() {
    let (mut list, _) = mounted(&library(0), 300.0);
    list.render().unwrap();
    let placeholder = list.placeholder().unwrap();

    list.set_games(library(5));
    let outcome = list.render().unwrap();

    assert!(matches!(outcome, RenderOutcome::Rendered(_)));
    assert!(list.placeholder().is_none());
    assert!(!list.tree().contains(placeholder));
}

#[test]
fn context_menu_on_descendant_reports_its_row() {
    let games = library(20);
    let (mut list, _) = mounted(&games, 300.0);
    let (menus, on_menu) = recorder::<(Arc<Game>, usize)>();
    list.context_menu_requested.connect(on_menu);

    let badge = badge_in_row(&list, 3);
    assert!(list
        .handle_event(&ListEvent::ContextMenu(ContextMenuEvent::new(badge)))
        .unwrap());

    let menus = menus.lock();
    assert_eq!(menus.len(), 1);
    let (item, index) = &menus[0];
    assert_eq!(*index, 3);
    assert!(Arc::ptr_eq(item, games.get(3).unwrap()));
}

#[test]
fn context_menu_outside_rows_is_an_error() {
    let games = library(20);
    let (mut list, container) = mounted(&games, 300.0);
    let (_, on_menu) = recorder::<(Arc<Game>, usize)>();
    list.context_menu_requested.connect(on_menu);

    let err = list
        .handle_event(&ListEvent::ContextMenu(ContextMenuEvent::new(container)))
        .unwrap_err();
    assert!(matches!(err, GameListError::RowNotFound { element } if element == container));
}

#[test]
fn row_events_after_a_list_swap_resolve_against_the_new_list() {
    let games = library(100);
    let (mut list, _) = mounted(&games, 300.0);
    let (selections, on_select) = recorder::<Option<(Arc<Game>, usize)>>();
    list.selection_changed.connect(on_select);
    let (menus, on_menu) = recorder::<(Arc<Game>, usize)>();
    list.context_menu_requested.connect(on_menu);

    let row = list.row_element(3).unwrap();
    let stale_badge = badge_in_row(&list, 3);

    // The owner reverses the list but the host delivers input before re-rendering.
    let reversed: ItemList<Game> = games.iter().rev().cloned().collect();
    list.set_games(reversed.clone());

    list.handle_event(&ListEvent::Click(PointerEvent::new(row)))
        .unwrap();
    list.handle_event(&ListEvent::ContextMenu(ContextMenuEvent::new(row)))
        .unwrap();

    let (clicked, click_index) = selections.lock()[0].clone().unwrap();
    let (menu_item, menu_index) = menus.lock()[0].clone();
    assert_eq!((clicked.id(), click_index), ("game-96", 3));
    assert_eq!((menu_item.id(), menu_index), ("game-96", 3));
    assert!(Arc::ptr_eq(&clicked, reversed.get(3).unwrap()));

    // Content rendered for the old list is gone.
    assert!(!list.tree().contains(stale_badge));
    let handled = list
        .handle_event(&ListEvent::ContextMenu(ContextMenuEvent::new(stale_badge)))
        .unwrap();
    assert!(!handled);
    assert_eq!(menus.lock().len(), 1);
}

#[test]
fn reordered_rows_drop_decoration_from_the_previous_item() {
    let games = library(100);
    let (mut list, _) = mounted(&games, 300.0);
    list.set_row_renderer_fn(|row: &mut RowBuilder<'_>, game: &Game, state: &RowState| {
        if game.id == "game-0" {
            row.add_class(row.root(), "favorite")?;
            row.set_attribute(row.root(), "data-pinned", "true")?;
        }
        render_row(row, game, state)
    });
    list.render().unwrap();
    let first = list.row_element(0).unwrap();
    assert!(list.tree().has_class(first, "favorite").unwrap());

    let reversed: ItemList<Game> = games.iter().rev().cloned().collect();
    list.set_games(reversed);
    list.render().unwrap();

    let tree = list.tree();
    let first = list.row_element(0).unwrap();
    assert_eq!(tree.attribute(first, "data-game-id").unwrap(), Some("game-99"));
    assert_eq!(tree.attribute(first, "data-index").unwrap(), Some("0"));
    assert!(!tree.has_class(first, "favorite").unwrap());
    assert_eq!(tree.attribute(first, "data-pinned").unwrap(), None);
    assert!(tree.has_class(first, "game-list-row").unwrap());
    assert_eq!(tree.children(first).unwrap().len(), 2);
}

#[test]
fn selection_marking_follows_the_item_across_a_reorder() {
    let games = library(100);
    let (mut list, _) = mounted(&games, 300.0);
    list.set_selected(games.get(2).cloned());
    list.render().unwrap();
    assert!(list
        .tree()
        .has_class(list.row_element(2).unwrap(), SELECTED_CLASS)
        .unwrap());

    let reversed: ItemList<Game> = games.iter().rev().cloned().collect();
    list.set_games(reversed);
    list.render().unwrap();

    assert_eq!(list.selected_index(), Some(97));
    assert!(list.window().unwrap().is_visible(97));
    let tree = list.tree();
    let marked = list.row_element(97).unwrap();
    assert!(tree.has_class(marked, SELECTED_CLASS).unwrap());
    assert_eq!(tree.attribute(marked, "data-game-id").unwrap(), Some("game-2"));
    assert_eq!(tree.attribute(marked, "aria-selected").unwrap(), Some("true"));

    let selected_rows = list
        .window()
        .unwrap()
        .overscan_range()
        .filter(|&i| {
            tree.has_class(list.row_element(i).unwrap(), SELECTED_CLASS)
                .unwrap()
        })
        .count();
    assert_eq!(selected_rows, 1);
}

#[test]
fn failed_render_leaves_no_rows_behind() {
    let games = library(100);
    let (mut list, _) = mounted(&games, 300.0);
    let failing = Arc::new(AtomicBool::new(false));
    let failing_clone = failing.clone();
    list.set_row_renderer_fn(
        move |row: &mut RowBuilder<'_>, game: &Game, state: &RowState| {
            if failing_clone.load(Ordering::SeqCst) && state.index == 5 {
                return Err(ElementError::InvalidElementId(row.root()));
            }
            render_row(row, game, state)
        },
    );
    list.render().unwrap();
    let row = list.row_element(2).unwrap();
    let (selections, on_select) = recorder::<Option<(Arc<Game>, usize)>>();
    list.selection_changed.connect(on_select);

    failing.store(true, Ordering::SeqCst);
    list.set_order("title", true);
    let err = list.render().unwrap_err();
    assert!(matches!(err, GameListError::Element(_)));

    assert_eq!(list.window(), None);
    assert!((0..100).all(|i| list.row_element(i).is_none()));
    let handled = list
        .handle_event(&ListEvent::Click(PointerEvent::new(row)))
        .unwrap();
    assert!(!handled);
    assert!(selections.lock().is_empty());

    failing.store(false, Ordering::SeqCst);
    assert!(matches!(list.render().unwrap(), RenderOutcome::Rendered(_)));
    assert!(list.row_element(2).is_some());
}

#[test]
fn viewport_size_changes_are_observable() {
    let games = library(20);
    let (mut list, _) = mounted(&games, 300.0);
    let (sizes, on_size) = recorder::<Size>();
    list.sizer().size_changed.connect(on_size);

    for height in [300.0, 450.0, 450.0, 0.0] {
        list.handle_event(&ListEvent::Resize(ResizeEvent {
            size: Size::new(640.0, height),
        }))
        .unwrap();
    }

    assert_eq!(
        *sizes.lock(),
        vec![Size::new(640.0, 450.0), Size::new(640.0, 0.0)]
    );
    assert_eq!(list.window(), None);
    assert!(list.row_element(0).is_none());
}

#[test]
fn double_click_launches_without_selecting() {
    let games = library(20);
    let (mut list, _) = mounted(&games, 300.0);
    list.set_selected(games.get(2).cloned());
    list.render().unwrap();

    let (selections, on_select) = recorder::<Option<(Arc<Game>, usize)>>();
    list.selection_changed.connect(on_select);
    let (launches, on_launch) = recorder::<(Arc<Game>, usize)>();
    list.launched.connect(on_launch);

    let title = list.tree().children(list.row_element(7).unwrap()).unwrap()[0];
    list.handle_event(&ListEvent::DoubleClick(PointerEvent::new(title)))
        .unwrap();

    let launches = launches.lock();
    assert_eq!(launches.len(), 1);
    assert_eq!(launches[0].1, 7);
    assert!(Arc::ptr_eq(&launches[0].0, games.get(7).unwrap()));
    assert!(selections.lock().is_empty());
    assert_eq!(list.selected_index(), Some(2));
}

#[test]
fn click_round_trips_through_selected_index() {
    let games = library(20);
    let (mut list, _) = mounted(&games, 300.0);
    let (selections, on_select) = recorder::<Option<(Arc<Game>, usize)>>();
    list.selection_changed.connect(on_select);

    list.handle_event(&ListEvent::Click(PointerEvent::new(badge_in_row(&list, 6))))
        .unwrap();
    let (item, index) = selections.lock()[0].clone().unwrap();
    assert_eq!(index, 6);

    // The owner feeds the selection back.
    list.set_selected(Some(item.clone()));
    assert_eq!(list.selected_index(), Some(6));

    // Reordering moves the index with the item.
    let reversed: ItemList<Game> = games.iter().rev().cloned().collect();
    list.set_games(reversed);
    list.set_order("title", true);
    assert_eq!(list.selected_index(), Some(13));

    // An item no longer in the list resolves to no index.
    list.set_games(library(20));
    assert_eq!(list.selected_index(), None);
}

#[test]
fn missing_selection_callback_is_reported() {
    let games = library(20);
    let (mut list, _) = mounted(&games, 300.0);

    let err = list
        .handle_event(&ListEvent::Click(PointerEvent::new(badge_in_row(&list, 1))))
        .unwrap_err();
    assert!(matches!(
        err,
        GameListError::MissingCallback { callback: "selection_changed" }
    ));
}

#[test]
fn enter_launches_selected_game() {
    let games = library(20);
    let (mut list, container) = mounted(&games, 300.0);
    list.set_selected(games.get(4).cloned());
    list.render().unwrap();
    let (launches, on_launch) = recorder::<(Arc<Game>, usize)>();
    list.launched.connect(on_launch);

    let row = list.row_element(4).unwrap();
    list.handle_event(&ListEvent::KeyPress(KeyPressEvent::new(row, Key::NumpadEnter)))
        .unwrap();
    list.handle_event(&ListEvent::KeyPress(KeyPressEvent::new(container, Key::Enter)))
        .unwrap();

    let launches = launches.lock();
    assert_eq!(launches.iter().map(|(_, i)| *i).collect::<Vec<_>>(), vec![4, 4]);
}

#[test]
fn keyboard_navigation_scrolls_the_new_selection_into_view() {
    let games = library(100);
    let (mut list, container) = mounted(&games, 300.0);
    list.set_selected(games.get(9).cloned());
    list.render().unwrap();

    // The owner accepts every selection change.
    let (selections, on_select) = recorder::<Option<(Arc<Game>, usize)>>();
    list.selection_changed.connect(on_select);

    for key in [Key::ArrowDown, Key::PageDown] {
        list.handle_event(&ListEvent::KeyPress(KeyPressEvent::new(container, key)))
            .unwrap();
        let selected = selections.lock().last().cloned().flatten().map(|(item, _)| item);
        list.set_selected(selected);
        list.render().unwrap();
    }

    assert_eq!(list.selected_index(), Some(20));
    let window = list.window().unwrap();
    assert!(window.is_visible(20));
    assert!(list.row_element(20).is_some());
}

#[test]
fn keys_outside_the_list_are_ignored() {
    let games = library(20);
    let (mut list, _) = mounted(&games, 300.0);
    let (selections, on_select) = recorder::<Option<(Arc<Game>, usize)>>();
    list.selection_changed.connect(on_select);

    let root = list.tree().root();
    let handled = list
        .handle_event(&ListEvent::KeyPress(KeyPressEvent::new(root, Key::ArrowDown)))
        .unwrap();
    assert!(!handled);
    assert!(selections.lock().is_empty());
}

#[test]
fn drag_events_are_forwarded() {
    let games = library(20);
    let (mut list, _) = mounted(&games, 300.0);

    // Unconnected drag callbacks are optional.
    let badge = badge_in_row(&list, 5);
    assert!(list
        .handle_event(&ListEvent::DragStart(DragEvent::new(badge)))
        .unwrap());

    let (starts, on_start) = recorder::<(DragEvent, Arc<Game>, usize)>();
    list.drag_started.connect(on_start);
    let (ends, on_end) = recorder::<(DragEvent, Arc<Game>, usize)>();
    list.drag_ended.connect(on_end);

    list.handle_event(&ListEvent::DragStart(DragEvent::new(badge)))
        .unwrap();
    list.handle_event(&ListEvent::DragEnd(DragEvent::new(badge)))
        .unwrap();

    let starts = starts.lock();
    assert_eq!(starts.len(), 1);
    assert_eq!(starts[0].0.target, badge);
    assert_eq!(starts[0].2, 5);
    assert_eq!(ends.lock()[0].2, 5);
}

#[test]
fn row_height_custom_property_is_written() {
    let games = library(3);
    let (mut list, container) = mounted(&games, 0.0);

    assert_eq!(list.render().unwrap(), RenderOutcome::Deferred);
    assert_eq!(
        list.tree().style_property(container, "--game-row-height").unwrap(),
        Some("30px")
    );

    list.set_row_height(42.5).unwrap();
    list.render().unwrap();
    assert_eq!(
        list.tree().style_property(container, "--game-row-height").unwrap(),
        Some("42.5px")
    );
}

#[test]
fn scrolling_never_duplicates_rows() {
    let games = library(500);
    let (mut list, _) = mounted(&games, 300.0);
    let (sections, on_section) = recorder::<SectionRendered>();
    list.sections_rendered.connect(on_section);

    for offset in [0.0, 450.0, 460.0, 3000.0, 120.0, 14_700.0, 99_999.0] {
        list.handle_event(&ListEvent::Scroll(ScrollEvent { scroll_top: offset }))
            .unwrap();

        let window = list.window().unwrap();
        let content = list
            .tree()
            .children(list.container().unwrap())
            .unwrap()[0];
        let rows = list.tree().children(content).unwrap();
        assert_eq!(rows.len(), window.rendered_len());

        let indices: Vec<usize> = rows
            .iter()
            .map(|&row| {
                list.tree()
                    .attribute(row, "data-index")
                    .unwrap()
                    .unwrap()
                    .parse()
                    .unwrap()
            })
            .collect();
        let expected: Vec<usize> = window.overscan_range().collect();
        assert_eq!(indices, expected);
    }

    let sections = sections.lock();
    assert_eq!(sections.len(), 7);
    assert!(sections.iter().all(|s| s.column_start_index == 0 && s.column_stop_index == 0));
    assert_eq!(sections.last().unwrap().row_stop_index, 499);
}

#[test]
fn element_ref_is_delivered_on_mount() {
    let mut list = GameList::<Game>::new();
    let (refs, on_ref) = recorder::<Option<ElementId>>();
    list.element_ref.connect(on_ref);

    let container = list.mount().unwrap();
    list.set_games(library(1));
    list.render().unwrap();

    assert_eq!(*refs.lock(), vec![Some(container)]);
    assert!(list.tree().has_class(container, "game-list").unwrap());
}

#[test]
fn operations_before_mount_fail() {
    let mut list = GameList::<Game>::new();
    list.set_games(library(3));
    assert!(matches!(list.render(), Err(GameListError::NotMounted)));
    assert!(matches!(
        list.handle_event(&ListEvent::Scroll(ScrollEvent { scroll_top: 0.0 })),
        Err(GameListError::NotMounted)
    ));
}
