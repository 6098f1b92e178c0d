//! The windowed game list component.
//!
//! [`GameList`] shows an externally owned [`ItemList`] as a vertically
//! scrolling list of fixed-height rows, materializing only the rows near the
//! viewport. It keeps the selected item scrolled into view, turns pointer and
//! keyboard input on rows into selection, launch, drag and context-menu
//! callbacks, and never sorts, filters or otherwise changes the data.
//!
//! # Rendered structure
//!
//! ```text
//! div.game-list            container (tabindex, --game-row-height)
//! +-- div.game-list-content     full content height
//! |   +-- div.game-list-row     data-game-id, data-index, top
//! |   `-- ...                   one per rendered index
//! `-- div.game-list-empty       only while the item list is empty
//! ```
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use gamelist::{GameList, Item, ItemList, ListEvent, ResizeEvent, RowBuilder, RowState, Size};
//!
//! struct Game { id: String, title: String }
//! impl Item for Game {
//!     fn id(&self) -> &str { &self.id }
//! }
//!
//! let games: ItemList<Game> = (0..100)
//!     .map(|i| Game { id: format!("g{i}"), title: format!("Game {i}") })
//!     .collect::<Vec<_>>()
//!     .into();
//!
//! let mut list = GameList::new();
//! list.set_row_renderer_fn(|row: &mut RowBuilder<'_>, game: &Game, _state: &RowState| {
//!     let title = row.append_child("span")?;
//!     row.set_text(title, game.title.clone())
//! });
//! list.set_games(games.clone());
//! list.set_row_height(30.0).unwrap();
//! list.set_selected(games.get(50).cloned());
//!
//! list.mount().unwrap();
//! list.handle_event(&ListEvent::Resize(ResizeEvent { size: Size::new(400.0, 300.0) })).unwrap();
//!
//! let window = list.window().unwrap();
//! assert!(window.is_visible(50));
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use gamelist_core::logging::targets;
use gamelist_core::{
    ElementId, ElementResult, ElementTree, ElementTreeDebug, PerfSpan, Property, Signal,
};

use crate::config::{GameListConfig, is_valid_row_height};
use crate::error::{GameListError, Result};
use crate::events::{ContextMenuEvent, DragEvent, KeyPressEvent, ListEvent, PointerEvent};
use crate::item::{Item, ItemList, same_item};
use crate::render::{NoRowsRenderer, RowBuilder, RowRenderer, RowState};
use crate::sizer::ViewportSizer;
use crate::stepper::ArrowKeyStepper;
use crate::window::{self, RowWindow, SectionRendered};

/// Class toggled on the row showing the selected item.
pub const SELECTED_CLASS: &str = "selected";

/// Class toggled on the row showing the dragged item.
pub const DRAGGING_CLASS: &str = "dragging";

/// All owner-supplied inputs at once, for [`GameList::set_props`].
pub struct GameListProps<T> {
    /// The items to show.
    pub games: ItemList<T>,
    /// The selected item, compared by identity.
    pub selected: Option<Arc<T>>,
    /// The item being dragged, compared by identity.
    pub dragged: Option<Arc<T>>,
    /// Height of every row in pixels.
    pub row_height: f32,
    /// Sort key the owner used; changing it forces a re-render.
    pub order_by: String,
    /// Sort direction the owner used; changing it forces a re-render.
    pub order_reverse: bool,
}

/// Result of a render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// Rows were materialized for this window.
    Rendered(RowWindow),
    /// The item list is empty; the placeholder is shown.
    Empty,
    /// The viewport has no usable size yet; no rows are rendered.
    Deferred,
}

impl RenderOutcome {
    /// The rendered window, if rows were rendered.
    pub fn window(&self) -> Option<RowWindow> {
        match self {
            RenderOutcome::Rendered(window) => Some(*window),
            _ => None,
        }
    }
}

/// A virtualized list of games with selection, launch and drag callbacks.
///
/// # Signals
///
/// - `selection_changed`: a row was clicked or keyboard navigation moved the
///   selection. Carries the item and its index, or `None` to deselect.
///   Required.
/// - `launched`: a row was double-clicked or Enter was pressed on the
///   selection. Required.
/// - `context_menu_requested`: a context menu was requested inside a row.
///   Required.
/// - `drag_started` / `drag_ended`: optional drag notifications.
/// - `element_ref`: the container element was created or removed.
/// - `rows_rendered` / `sections_rendered`: the rendered range changed.
///
/// Required signals must have a connected slot when their action happens,
/// otherwise the action fails with [`GameListError::MissingCallback`].
pub struct GameList<T: Item> {
    tree: ElementTree,
    config: GameListConfig,
    sizer: ViewportSizer,
    stepper: ArrowKeyStepper,

    games: Option<ItemList<T>>,
    selected: Option<Arc<T>>,
    dragged: Option<Arc<T>>,
    order: Property<(String, bool)>,

    row_renderer: Option<Box<dyn RowRenderer<T>>>,
    no_rows_renderer: Option<NoRowsRenderer>,

    container: Option<ElementId>,
    content: Option<ElementId>,
    placeholder: Option<ElementId>,
    rows: HashMap<usize, ElementId>,
    reported_container: Option<ElementId>,

    scroll_offset: f32,
    window: Option<RowWindow>,
    needs_render: bool,
    pending_scroll: bool,

    /// Selection changed through a row click or keyboard navigation.
    pub selection_changed: Signal<Option<(Arc<T>, usize)>>,
    /// The user asked to launch an item.
    pub launched: Signal<(Arc<T>, usize)>,
    /// A context menu was requested for an item.
    pub context_menu_requested: Signal<(Arc<T>, usize)>,
    /// A drag started on a row.
    pub drag_started: Signal<(DragEvent, Arc<T>, usize)>,
    /// A drag ended on a row.
    pub drag_ended: Signal<(DragEvent, Arc<T>, usize)>,
    /// The container element, delivered when it is created or removed.
    pub element_ref: Signal<Option<ElementId>>,
    /// The rendered row range after every window computation.
    pub rows_rendered: Signal<RowWindow>,
    /// The rendered range in row/column form.
    pub sections_rendered: Signal<SectionRendered>,
}

impl<T: Item> Default for GameList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Item> GameList<T> {
    /// Create an unmounted list with the default configuration.
    pub fn new() -> Self {
        Self::build(GameListConfig::default())
    }

    /// Create an unmounted list with a custom configuration.
    pub fn with_config(config: GameListConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: GameListConfig) -> Self {
        Self {
            tree: ElementTree::new(),
            config,
            sizer: ViewportSizer::new(),
            stepper: ArrowKeyStepper::new(),
            games: None,
            selected: None,
            dragged: None,
            order: Property::new((String::new(), false)),
            row_renderer: None,
            no_rows_renderer: None,
            container: None,
            content: None,
            placeholder: None,
            rows: HashMap::new(),
            reported_container: None,
            scroll_offset: 0.0,
            window: None,
            needs_render: true,
            pending_scroll: true,
            selection_changed: Signal::new(),
            launched: Signal::new(),
            context_menu_requested: Signal::new(),
            drag_started: Signal::new(),
            drag_ended: Signal::new(),
            element_ref: Signal::new(),
            rows_rendered: Signal::new(),
            sections_rendered: Signal::new(),
        }
    }

    // =========================================================================
    // Props
    // =========================================================================

    /// Replace the item list. Returns `true` if it is a different list.
    pub fn set_games(&mut self, games: ItemList<T>) -> bool {
        let changed = !self
            .games
            .as_ref()
            .is_some_and(|current| current.same_list(&games));
        if changed {
            tracing::debug!(target: targets::GAME_LIST, count = games.len(), "item list replaced");
            self.games = Some(games);
            self.invalidate(true);
        }
        changed
    }

    /// Set the selected item. Returns `true` if it is a different item.
    pub fn set_selected(&mut self, selected: Option<Arc<T>>) -> bool {
        let changed = !same_option(&self.selected, &selected);
        if changed {
            self.selected = selected;
            self.invalidate(true);
        }
        changed
    }

    /// Set the item being dragged. Returns `true` if it is a different item.
    pub fn set_dragged(&mut self, dragged: Option<Arc<T>>) -> bool {
        let changed = !same_option(&self.dragged, &dragged);
        if changed {
            self.dragged = dragged;
            self.invalidate(false);
        }
        changed
    }

    /// Set the row height in pixels.
    ///
    /// Fails for zero, negative or non-finite heights.
    pub fn set_row_height(&mut self, row_height: f32) -> Result<bool> {
        if !is_valid_row_height(row_height) {
            return Err(GameListError::InvalidRowHeight { value: row_height });
        }
        let changed = self.config.row_height != row_height;
        if changed {
            self.config.row_height = row_height;
            self.invalidate(true);
        }
        Ok(changed)
    }

    /// Record the owner's sort order.
    ///
    /// The list never sorts; a changed order only forces the next render.
    pub fn set_order(&mut self, order_by: impl Into<String>, order_reverse: bool) -> bool {
        let changed = self.order.set((order_by.into(), order_reverse));
        if changed {
            self.invalidate(false);
        }
        changed
    }

    /// Apply all props at once. Returns `true` if any of them changed.
    pub fn set_props(&mut self, props: GameListProps<T>) -> Result<bool> {
        let mut changed = self.set_row_height(props.row_height)?;
        changed |= self.set_games(props.games);
        changed |= self.set_selected(props.selected);
        changed |= self.set_dragged(props.dragged);
        changed |= self.set_order(props.order_by, props.order_reverse);
        Ok(changed)
    }

    /// Set the renderer that fills each row.
    pub fn set_row_renderer(&mut self, renderer: impl RowRenderer<T> + 'static) {
        self.row_renderer = Some(Box::new(renderer));
        self.invalidate(false);
    }

    /// Set the row renderer from a closure.
    pub fn set_row_renderer_fn<F>(&mut self, renderer: F)
    where
        F: Fn(&mut RowBuilder<'_>, &T, &RowState) -> ElementResult<()> + Send + Sync + 'static,
    {
        self.set_row_renderer(renderer);
    }

    /// Set the renderer for the empty-list placeholder.
    pub fn set_no_rows_renderer<F>(&mut self, renderer: F)
    where
        F: Fn(&mut RowBuilder<'_>) -> ElementResult<()> + Send + Sync + 'static,
    {
        self.no_rows_renderer = Some(Box::new(renderer));
        self.invalidate(false);
    }

    fn invalidate(&mut self, scroll_to_selection: bool) {
        self.needs_render = true;
        self.pending_scroll |= scroll_to_selection;
    }

    /// The current item list.
    pub fn games(&self) -> Option<&ItemList<T>> {
        self.games.as_ref()
    }

    /// The selected item.
    pub fn selected(&self) -> Option<&Arc<T>> {
        self.selected.as_ref()
    }

    /// The item being dragged.
    pub fn dragged(&self) -> Option<&Arc<T>> {
        self.dragged.as_ref()
    }

    /// Height of every row in pixels.
    pub fn row_height(&self) -> f32 {
        self.config.row_height
    }

    /// The owner's sort key.
    pub fn order_by(&self) -> String {
        self.order.with(|(order_by, _)| order_by.clone())
    }

    /// The owner's sort direction.
    pub fn order_reverse(&self) -> bool {
        self.order.with(|(_, reverse)| *reverse)
    }

    /// The active configuration.
    pub fn config(&self) -> &GameListConfig {
        &self.config
    }

    /// Whether a prop changed since the last render.
    pub fn needs_render(&self) -> bool {
        self.needs_render
    }

    // =========================================================================
    // Derived state
    // =========================================================================

    /// Index of the selected item in the current list.
    ///
    /// Resolved by identity on every call, so it follows the item when the
    /// owner reorders or replaces the list. `None` when nothing is selected
    /// or the selected item is not in the list.
    pub fn selected_index(&self) -> Option<usize> {
        self.index_of(self.selected.as_ref())
    }

    /// Index of the dragged item in the current list, resolved like
    /// [`selected_index`](Self::selected_index).
    pub fn dragged_index(&self) -> Option<usize> {
        self.index_of(self.dragged.as_ref())
    }

    fn index_of(&self, item: Option<&Arc<T>>) -> Option<usize> {
        self.games.as_ref()?.index_of(item?)
    }

    fn item_count(&self) -> usize {
        self.games.as_ref().map_or(0, ItemList::len)
    }

    /// Current vertical scroll offset in pixels.
    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    /// The most recently rendered window.
    pub fn window(&self) -> Option<RowWindow> {
        self.window
    }

    /// The container element, while mounted.
    pub fn container(&self) -> Option<ElementId> {
        self.container
    }

    /// The rendered row element for `index`, if that row is materialized.
    pub fn row_element(&self, index: usize) -> Option<ElementId> {
        self.rows.get(&index).copied()
    }

    /// The placeholder element, while the empty-list placeholder is shown.
    pub fn placeholder(&self) -> Option<ElementId> {
        self.placeholder
    }

    /// The element tree the list renders into.
    pub fn tree(&self) -> &ElementTree {
        &self.tree
    }

    /// Render the mounted element structure as indented text, for debugging.
    pub fn format_tree(&self) -> Result<String> {
        let container = self.container.ok_or(GameListError::NotMounted)?;
        Ok(ElementTreeDebug::new().format_subtree(&self.tree, container)?)
    }

    /// The viewport sizer.
    pub fn sizer(&self) -> &ViewportSizer {
        &self.sizer
    }

    /// Row index under a viewport y coordinate.
    pub fn row_at(&self, y: f32) -> Option<usize> {
        window::row_at(y, self.item_count(), self.config.row_height, self.scroll_offset)
    }

    // =========================================================================
    // Mounting
    // =========================================================================

    /// Create the container element and deliver it through `element_ref`.
    pub fn mount(&mut self) -> Result<ElementId> {
        if let Some(container) = self.container {
            return Err(GameListError::AlreadyMounted(container));
        }

        let root = self.tree.root();
        let container = self.tree.create_element("div");
        self.tree.append_child(root, container)?;
        self.tree.add_class(container, &self.config.container_class)?;
        self.tree.set_attribute(container, "role", "listbox")?;
        self.tree.set_attribute(container, "tabindex", "0")?;

        let content = self.tree.create_element("div");
        self.tree.append_child(container, content)?;
        self.tree
            .add_class(content, &format!("{}-content", self.config.container_class))?;
        self.tree.set_style_property(content, "position", "relative")?;

        self.container = Some(container);
        self.content = Some(content);
        self.write_row_height_property(container)?;
        self.invalidate(true);

        tracing::debug!(target: targets::GAME_LIST, ?container, "mounted");
        self.deliver_element_ref();
        Ok(container)
    }

    /// Remove the container element and deliver `None` through `element_ref`.
    pub fn unmount(&mut self) -> Result<()> {
        let container = self.container.take().ok_or(GameListError::NotMounted)?;
        self.tree.remove(container)?;
        self.content = None;
        self.placeholder = None;
        self.rows.clear();
        self.window = None;
        self.scroll_offset = 0.0;
        self.sizer.reset();

        tracing::debug!(target: targets::GAME_LIST, ?container, "unmounted");
        self.deliver_element_ref();
        Ok(())
    }

    fn deliver_element_ref(&mut self) {
        if self.reported_container != self.container {
            self.reported_container = self.container;
            self.element_ref.emit(self.container);
        }
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Run one render pass.
    ///
    /// Resolves the selected index, scrolls it into view if a prop or the
    /// viewport size changed, computes the window, reconciles the row
    /// elements, emits the range notifications and writes the row-height
    /// custom property on the container.
    pub fn render(&mut self) -> Result<RenderOutcome> {
        let apply_scroll_target = self.pending_scroll;
        self.render_pass(apply_scroll_target)
    }

    /// Render only if a prop changed since the last pass.
    pub fn render_if_needed(&mut self) -> Result<Option<RenderOutcome>> {
        if !self.needs_render {
            return Ok(None);
        }
        self.render().map(Some)
    }

    fn render_pass(&mut self, apply_scroll_target: bool) -> Result<RenderOutcome> {
        let container = self.container.ok_or(GameListError::NotMounted)?;
        let games = self.games.clone().ok_or(GameListError::MissingItems)?;
        let _span = PerfSpan::new("game_list_render");

        let outcome = if games.is_empty() {
            self.clear_rows()?;
            self.window = None;
            if let Err(err) = self.show_placeholder(container) {
                self.hide_placeholder()?;
                return Err(err);
            }
            self.scroll_offset = 0.0;
            self.pending_scroll = false;
            RenderOutcome::Empty
        } else {
            self.hide_placeholder()?;
            match self.sizer.size() {
                None => {
                    self.clear_rows()?;
                    self.window = None;
                    RenderOutcome::Deferred
                }
                Some(size) => {
                    let row_height = self.config.row_height;
                    if apply_scroll_target {
                        self.scroll_offset = window::scroll_to_row(
                            self.selected_index(),
                            games.len(),
                            row_height,
                            size.height,
                            self.scroll_offset,
                        );
                        self.pending_scroll = false;
                    }
                    let window = window::compute_window(
                        games.len(),
                        row_height,
                        size.height,
                        self.scroll_offset,
                        self.config.overscan_rows,
                    )
                    .ok_or(GameListError::InvalidRowHeight { value: row_height })?;

                    if let Err(err) = self.reconcile_rows(&games, window) {
                        // Never leave a partial window behind.
                        self.window = None;
                        self.clear_rows()?;
                        tracing::warn!(target: targets::GAME_LIST, %err, "render pass failed");
                        return Err(err);
                    }
                    self.window = Some(window);
                    self.rows_rendered.emit(window);
                    self.sections_rendered.emit(SectionRendered::from_rows(window));
                    RenderOutcome::Rendered(window)
                }
            }
        };

        self.write_row_height_property(container)?;
        self.deliver_element_ref();
        self.needs_render = false;

        tracing::debug!(target: targets::GAME_LIST, ?outcome, offset = self.scroll_offset, "render pass");
        Ok(outcome)
    }

    fn reconcile_rows(&mut self, games: &ItemList<T>, window: RowWindow) -> Result<()> {
        let content = self.content.ok_or(GameListError::NotMounted)?;
        let selected = self.selected_index();
        let dragged = self.dragged_index();
        let renderer = self
            .row_renderer
            .as_deref()
            .ok_or(GameListError::missing_callback("row_renderer"))?;

        let stale: Vec<usize> = self
            .rows
            .keys()
            .copied()
            .filter(|index| !window.contains(*index))
            .collect();
        for index in stale {
            if let Some(row) = self.rows.remove(&index) {
                self.tree.remove(row)?;
            }
        }

        let config = &self.config;
        let row_height = config.row_height;

        for index in window.overscan_range() {
            let Some(item) = games.get(index) else {
                break;
            };

            let row = match self.rows.get(&index) {
                Some(&row) => {
                    // The renderer may have decorated the row root for another item.
                    self.tree.reset(row)?;
                    row
                }
                None => {
                    let row = self.tree.create_element("div");
                    self.rows.insert(index, row);
                    row
                }
            };
            // Re-appending keeps the rows in index order.
            self.tree.append_child(content, row)?;

            let state = RowState {
                index,
                selected: selected == Some(index),
                dragged: dragged == Some(index),
            };
            self.tree.add_class(row, &config.row_class)?;
            self.tree.toggle_class(row, SELECTED_CLASS, state.selected)?;
            self.tree.toggle_class(row, DRAGGING_CLASS, state.dragged)?;
            self.tree.set_attribute(row, "role", "option")?;
            self.tree
                .set_attribute(row, "aria-selected", state.selected.to_string())?;
            self.tree
                .set_attribute(row, &config.item_id_attribute, item.id())?;
            self.tree
                .set_attribute(row, &config.item_index_attribute, index.to_string())?;
            self.tree.set_style_property(row, "position", "absolute")?;
            self.tree.set_style_property(
                row,
                "top",
                format!("{}px", window::row_offset(index, row_height)),
            )?;
            self.tree.set_style_property(
                row,
                "height",
                format!("var({})", config.row_height_property),
            )?;

            renderer.render_row(&mut RowBuilder::new(&mut self.tree, row), item, &state)?;
        }

        self.tree.set_style_property(
            content,
            "height",
            format!("{}px", window::total_height(games.len(), row_height)),
        )?;

        tracing::trace!(
            target: targets::GAME_LIST,
            rows = self.rows.len(),
            elements = self.tree.len(),
            "rows reconciled"
        );
        Ok(())
    }

    fn clear_rows(&mut self) -> Result<()> {
        for (_, row) in self.rows.drain() {
            self.tree.remove(row)?;
        }
        if let Some(content) = self.content {
            self.tree.set_style_property(content, "height", "0px")?;
        }
        Ok(())
    }

    fn show_placeholder(&mut self, container: ElementId) -> Result<()> {
        let Some(renderer) = self.no_rows_renderer.as_deref() else {
            return Ok(());
        };
        let placeholder = match self.placeholder {
            Some(placeholder) => {
                self.tree.clear_children(placeholder)?;
                placeholder
            }
            None => {
                let placeholder = self.tree.create_element("div");
                self.tree.append_child(container, placeholder)?;
                self.tree
                    .add_class(placeholder, &format!("{}-empty", self.config.container_class))?;
                self.placeholder = Some(placeholder);
                placeholder
            }
        };
        renderer(&mut RowBuilder::new(&mut self.tree, placeholder))?;
        Ok(())
    }

    fn hide_placeholder(&mut self) -> Result<()> {
        if let Some(placeholder) = self.placeholder.take() {
            self.tree.remove(placeholder)?;
        }
        Ok(())
    }

    fn write_row_height_property(&mut self, container: ElementId) -> Result<()> {
        self.tree.set_style_property(
            container,
            &self.config.row_height_property,
            format!("{}px", self.config.row_height),
        )?;
        Ok(())
    }

    // =========================================================================
    // Event handling
    // =========================================================================

    /// Route an input event.
    ///
    /// Returns `Ok(true)` if the event was handled. Events aimed at elements
    /// outside the container are ignored. Pending prop changes are rendered
    /// before a targeted event is resolved; if that render removed the
    /// target, the event is not handled.
    pub fn handle_event(&mut self, event: &ListEvent) -> Result<bool> {
        let container = self.container.ok_or(GameListError::NotMounted)?;

        if let Some(target) = event.target()
            && !self.is_inside(container, target)
        {
            tracing::trace!(target: targets::GAME_LIST, ?target, "event outside the list");
            return Ok(false);
        }

        // Rows must reflect the current props before a row event is resolved.
        if let Some(target) = event.target()
            && self.games.is_some()
            && self.render_if_needed()?.is_some()
            && !self.is_inside(container, target)
        {
            tracing::trace!(target: targets::GAME_LIST, ?target, "event target replaced by render");
            return Ok(false);
        }

        match event {
            ListEvent::Resize(resize) => {
                if self.sizer.observe(resize.size) {
                    self.invalidate(true);
                    if self.games.is_some() {
                        self.render()?;
                    }
                }
                Ok(true)
            }
            ListEvent::Scroll(scroll) => {
                self.handle_scroll(scroll.scroll_top)?;
                Ok(true)
            }
            ListEvent::KeyPress(key) => self.handle_key_press(key),
            ListEvent::Click(click) => self.handle_click(click),
            ListEvent::DoubleClick(click) => self.handle_double_click(click),
            ListEvent::DragStart(drag) => self.handle_drag(drag, true),
            ListEvent::DragEnd(drag) => self.handle_drag(drag, false),
            ListEvent::ContextMenu(menu) => self.handle_context_menu(menu),
        }
    }

    fn handle_scroll(&mut self, scroll_top: f32) -> Result<()> {
        let viewport_height = self.sizer.size().map_or(0.0, |size| size.height);
        let max = window::max_scroll_offset(self.item_count(), self.config.row_height, viewport_height);
        self.scroll_offset = if scroll_top.is_finite() {
            scroll_top.clamp(0.0, max)
        } else {
            0.0
        };

        if self.games.is_some() {
            // A user scroll never snaps back to the selection.
            self.render_pass(false)?;
        }
        Ok(())
    }

    fn handle_key_press(&mut self, event: &KeyPressEvent) -> Result<bool> {
        if event.key.is_activation() {
            let Some(entry) = self.selected_entry() else {
                return Ok(false);
            };
            require(&self.launched, "launched")?;
            tracing::debug!(target: targets::GAME_LIST, index = entry.1, "launch from keyboard");
            self.launched.emit(entry);
            return Ok(true);
        }

        let visible_rows = self.sizer.size().map_or(1, |size| {
            (size.height / self.config.row_height).floor() as usize
        });
        let Some(step) = self.stepper.step(
            self.selected_index(),
            event.key,
            self.item_count(),
            visible_rows,
        ) else {
            return Ok(false);
        };

        if step.changed {
            self.scroll_to_change(Some(step.row))?;
        }
        Ok(true)
    }

    fn handle_click(&mut self, event: &PointerEvent) -> Result<bool> {
        let Some(entry) = self.row_entry(event.target)? else {
            return Ok(false);
        };
        require(&self.selection_changed, "selection_changed")?;
        tracing::debug!(target: targets::GAME_LIST, index = entry.1, "row clicked");
        self.selection_changed.emit(Some(entry));
        Ok(true)
    }

    fn handle_double_click(&mut self, event: &PointerEvent) -> Result<bool> {
        let Some(entry) = self.row_entry(event.target)? else {
            return Ok(false);
        };
        require(&self.launched, "launched")?;
        tracing::debug!(target: targets::GAME_LIST, index = entry.1, "row double-clicked");
        self.launched.emit(entry);
        Ok(true)
    }

    fn handle_drag(&mut self, event: &DragEvent, started: bool) -> Result<bool> {
        let Some((item, index)) = self.row_entry(event.target)? else {
            return Ok(false);
        };
        let signal = if started {
            &self.drag_started
        } else {
            &self.drag_ended
        };
        signal.emit((event.clone(), item, index));
        Ok(true)
    }

    fn handle_context_menu(&mut self, event: &ContextMenuEvent) -> Result<bool> {
        let not_found = || GameListError::RowNotFound {
            element: event.target,
        };
        let row = self.find_row(event.target)?.ok_or_else(not_found)?;
        let id = self
            .tree
            .attribute(row, &self.config.item_id_attribute)?
            .ok_or_else(not_found)?;

        let games = self.games.as_ref().ok_or(GameListError::MissingItems)?;
        let (index, item) = games
            .find_by_id(id)
            .ok_or_else(|| GameListError::unknown_item(id))?;
        let entry = (Arc::clone(item), index);

        require(&self.context_menu_requested, "context_menu_requested")?;
        tracing::debug!(target: targets::GAME_LIST, index, "context menu requested");
        self.context_menu_requested.emit(entry);
        Ok(true)
    }

    /// Move the selection to `row` by notifying the owner.
    ///
    /// The owner is expected to answer with [`set_selected`](Self::set_selected);
    /// the next render scrolls the new selection into view. `None`, or a row
    /// past the end of the list, clears the selection.
    pub fn scroll_to_change(&mut self, row: Option<usize>) -> Result<()> {
        require(&self.selection_changed, "selection_changed")?;
        let entry = row.and_then(|index| {
            let item = self.games.as_ref()?.get(index)?;
            Some((Arc::clone(item), index))
        });
        tracing::debug!(target: targets::GAME_LIST, row = ?row, "selection step");
        self.selection_changed.emit(entry);
        Ok(())
    }

    fn selected_entry(&self) -> Option<(Arc<T>, usize)> {
        let index = self.selected_index()?;
        let item = self.games.as_ref()?.get(index)?;
        Some((Arc::clone(item), index))
    }

    fn is_inside(&self, container: ElementId, target: ElementId) -> bool {
        matches!(self.tree.is_inclusive_ancestor(container, target), Ok(true))
    }

    /// Nearest row element at or above `target`.
    fn find_row(&self, target: ElementId) -> Result<Option<ElementId>> {
        let row_class = self.config.row_class.as_str();
        let content = self.content;
        let row = self
            .tree
            .closest(target, |el| el.parent() == content && el.has_class(row_class))?;
        Ok(row)
    }

    /// The item and index of the row containing `target`.
    fn row_entry(&self, target: ElementId) -> Result<Option<(Arc<T>, usize)>> {
        let Some(row) = self.find_row(target)? else {
            return Ok(None);
        };
        let index = self
            .tree
            .attribute(row, &self.config.item_index_attribute)?
            .and_then(|value| value.parse::<usize>().ok());
        let entry = index.and_then(|index| {
            let item = self.games.as_ref()?.get(index)?;
            Some((Arc::clone(item), index))
        });
        Ok(entry)
    }
}

fn same_option<T>(a: &Option<Arc<T>>, b: &Option<Arc<T>>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => same_item(a, b),
        (None, None) => true,
        _ => false,
    }
}

fn require<Args: 'static>(signal: &Signal<Args>, callback: &'static str) -> Result<()> {
    if signal.is_connected() {
        Ok(())
    } else {
        Err(GameListError::missing_callback(callback))
    }
}
