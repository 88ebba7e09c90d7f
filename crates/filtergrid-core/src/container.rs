//! The grid container: owns the item records, derives grid geometry and mediates
//! lifecycle events.

use std::rc::Rc;

use crate::error::GridError;
use crate::events::{EventRegistry, LifecycleCallbacks, LifecycleEvent};
use crate::geometry::{Position, StyleProperty};
use crate::host::{resolve_one, NodeHost};
use crate::item::FilterItem;
use crate::options::GridOptions;

/// Lifecycle of a [`FilterContainer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContainerState {
    /// Items are indexed but no height has been laid out yet.
    Created,
    /// At least one layout pass wrote the container height.
    Active,
    /// [`FilterContainer::destroy`] ran; every operation is rejected.
    Destroyed,
}

/// Layout state of a grid container and its items.
///
/// All reads of the live document go through the [`NodeHost`] the container was
/// created with. Cached values (`width`, item sizes) only change when one of the
/// `update_*` operations runs.
///
/// # Example
///
/// ```rust
/// use filtergrid_core::{FilterContainer, GridOptions, MemoryHost, Size};
///
/// let host = MemoryHost::new();
/// let root = host.create_element("div", &["filtr-container"]);
/// host.set_size(root, Size::new(900.0, 0.0)).unwrap();
/// for _ in 0..6 {
///     host.insert(root, "div", &["filtr-item"], Size::new(300.0, 200.0)).unwrap();
/// }
///
/// let mut grid = FilterContainer::new(host, ".filtr-container", GridOptions::default()).unwrap();
/// assert_eq!(grid.calc_columns().unwrap(), 3);
/// grid.update_height(400.0).unwrap();
/// ```
pub struct FilterContainer<H: NodeHost> {
    host: H,
    node: H::Node,
    items: Vec<FilterItem<H::Node>>,
    /// Inner width cached at construction or by [`FilterContainer::update_width`].
    width: f32,
    /// Last height written by [`FilterContainer::update_height`].
    height: f32,
    options: Rc<GridOptions>,
    events: EventRegistry,
    state: ContainerState,
}

impl<H: NodeHost> FilterContainer<H> {
    /// Resolves `locator` to the container element and indexes its items.
    ///
    /// Items are the descendants matching `options.item_selector`, indexed in
    /// document order. The container gets `padding: 0; position: relative` so
    /// that item positioning is relative to its content box.
    pub fn new(host: H, locator: &str, options: GridOptions) -> Result<Self, GridError> {
        let node = resolve_one(&host, locator)?;
        let options = Rc::new(options);

        let items = host
            .find_descendants(&node, &options.item_selector)?
            .into_iter()
            .enumerate()
            .map(|(index, item)| FilterItem::new(&host, item, index, Rc::clone(&options)))
            .collect::<Vec<_>>();
        let width = host.inner_width(&node);

        host.set_style(
            &node,
            &[
                StyleProperty::Padding(0.0),
                StyleProperty::Position(Position::Relative),
            ],
        )?;

        log::debug!(
            "filter container `{}` initialised with {} items, width {}",
            locator,
            items.len(),
            width
        );

        Ok(Self {
            host,
            node,
            items,
            width,
            height: 0.0,
            options,
            events: EventRegistry::new(),
            state: ContainerState::Created,
        })
    }

    /// Creates a container located by [`GridOptions::selector`].
    pub fn with_default_locator(host: H, options: GridOptions) -> Result<Self, GridError> {
        let locator = options.selector.clone();
        Self::new(host, &locator, options)
    }

    /// Appends `node` to the container element and indexes it after every
    /// existing item. Returns the new item's index.
    pub fn push(
        &mut self,
        node: H::Node,
        options: impl Into<Rc<GridOptions>>,
    ) -> Result<usize, GridError> {
        self.ensure_alive("push")?;
        self.host.append_child(&self.node, &node)?;

        let index = self.items.len();
        let item = FilterItem::new(&self.host, node, index, options.into());
        log::trace!("pushed item {} ({}x{})", index, item.width(), item.height());
        self.items.push(item);
        Ok(index)
    }

    /// Number of grid columns: the container width divided by the first item's
    /// width, rounded to the nearest integer.
    ///
    /// Assumes `items[0]` is representative of all item widths.
    pub fn calc_columns(&self) -> Result<usize, GridError> {
        self.ensure_alive("calc_columns")?;
        let reference = self.items.first().ok_or(GridError::EmptyCollection)?;

        let item_width = reference.width();
        if !(item_width.is_finite() && item_width > 0.0) {
            log::warn!("cannot derive columns from reference item width {}", item_width);
            return Err(GridError::DegenerateItemWidth { width: item_width });
        }

        let columns = (self.width / item_width).round();
        Ok(if columns > 0.0 { columns as usize } else { 0 })
    }

    /// Writes `height` to the container element and caches it.
    pub fn update_height(&mut self, height: f32) -> Result<(), GridError> {
        self.ensure_alive("update_height")?;
        self.host.set_style(&self.node, &[StyleProperty::Height(height)])?;
        self.height = height;
        self.state = ContainerState::Active;
        Ok(())
    }

    /// Re-measures the container's inner width.
    pub fn update_width(&mut self) -> Result<(), GridError> {
        self.ensure_alive("update_width")?;
        self.width = self.host.inner_width(&self.node);
        log::trace!("container width refreshed to {}", self.width);
        Ok(())
    }

    /// Re-measures every item, in index order. All items are refreshed before
    /// this returns, so a layout pass may run right after.
    pub fn update_filter_items_dimensions(&mut self) -> Result<(), GridError> {
        self.ensure_alive("update_filter_items_dimensions")?;
        for item in &mut self.items {
            item.refresh_dimensions(&self.host);
        }
        log::trace!("refreshed dimensions of {} items", self.items.len());
        Ok(())
    }

    /// Registers the lifecycle callbacks present in `callbacks`.
    pub fn bind_events(&mut self, callbacks: LifecycleCallbacks) -> Result<(), GridError> {
        self.ensure_alive("bind_events")?;
        let bound = self.events.bind(callbacks);
        log::trace!("bound {} lifecycle listeners", bound);
        Ok(())
    }

    /// Removes every lifecycle listener this container registered.
    pub fn unbind_events(&mut self) -> Result<(), GridError> {
        self.ensure_alive("unbind_events")?;
        self.events.unbind_all();
        Ok(())
    }

    /// Fires `event`: runs the bound listeners synchronously, then mirrors the
    /// event to the container element.
    pub fn trigger(&mut self, event: LifecycleEvent) -> Result<(), GridError> {
        self.ensure_alive("trigger")?;
        let invoked = self.events.dispatch(event);
        log::trace!("{} dispatched to {} listeners", event, invoked);
        self.host.emit(&self.node, event)?;
        Ok(())
    }

    /// Clears inline presentation state from the container and every item, then
    /// unbinds all lifecycle events. The container rejects every later call.
    ///
    /// Items are cleared before the container element. If the host fails partway
    /// the container keeps its reset and height, so it stays usable and the call
    /// may be repeated. Items cleared before the failure get their positioning
    /// back from the next layout pass.
    pub fn destroy(&mut self) -> Result<(), GridError> {
        self.ensure_alive("destroy")?;
        for item in &self.items {
            self.host.clear_style(item.node())?;
        }
        self.host.clear_style(&self.node)?;
        self.events.unbind_all();
        self.state = ContainerState::Destroyed;
        log::debug!("filter container destroyed ({} items released)", self.items.len());
        Ok(())
    }

    fn ensure_alive(&self, operation: &'static str) -> Result<(), GridError> {
        if self.state == ContainerState::Destroyed {
            return Err(GridError::InvalidState { operation });
        }
        Ok(())
    }

    pub fn items(&self) -> &[FilterItem<H::Node>] {
        &self.items
    }

    pub fn item(&self, index: usize) -> Option<&FilterItem<H::Node>> {
        self.items.iter().find(|item| item.index() == index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn state(&self) -> ContainerState {
        self.state
    }

    pub fn is_laid_out(&self) -> bool {
        self.state == ContainerState::Active
    }

    pub fn node(&self) -> &H::Node {
        &self.node
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn options(&self) -> &GridOptions {
        &self.options
    }

    pub fn events(&self) -> &EventRegistry {
        &self.events
    }
}

impl<H: NodeHost> std::fmt::Debug for FilterContainer<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterContainer")
            .field("node", &self.node)
            .field("items", &self.items.len())
            .field("width", &self.width)
            .field("height", &self.height)
            .field("state", &self.state)
            .field("events", &self.events)
            .finish()
    }
}
