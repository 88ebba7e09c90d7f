//! Item records managed by a [`FilterContainer`](crate::FilterContainer).

use std::rc::Rc;

use crate::geometry::Size;
use crate::host::NodeHost;
use crate::options::GridOptions;

/// One managed child element of the grid.
///
/// A passive value holder: it remembers where it was discovered, caches the
/// element's measured size until [`FilterItem::refresh_dimensions`] runs, and
/// keeps the options snapshot it was created with.
#[derive(Clone, Debug)]
pub struct FilterItem<N> {
    /// Position in discovery/insertion order at creation. Never renumbered.
    index: usize,

    node: N,

    /// Last measured size of `node`.
    size: Size,

    options: Rc<GridOptions>,
}

impl<N: Clone + std::fmt::Debug> FilterItem<N> {
    /// Wraps `node`, measuring it eagerly through `host`.
    pub fn new<H>(host: &H, node: N, index: usize, options: Rc<GridOptions>) -> Self
    where
        H: NodeHost<Node = N> + ?Sized,
    {
        let size = host.measure(&node);
        Self {
            index,
            node,
            size,
            options,
        }
    }

    /// Re-measures the cached size from the live element.
    pub fn refresh_dimensions<H>(&mut self, host: &H)
    where
        H: NodeHost<Node = N> + ?Sized,
    {
        self.size = host.measure(&self.node);
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn node(&self) -> &N {
        &self.node
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn width(&self) -> f32 {
        self.size.width
    }

    pub fn height(&self) -> f32 {
        self.size.height
    }

    pub fn options(&self) -> &GridOptions {
        &self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryHost;

    #[test]
    fn test_new_measures_eagerly() {
        let host = MemoryHost::new();
        let node = host.create_element("div", &["filtr-item"]);
        host.set_size(node, Size::new(120.0, 80.0)).unwrap();

        let item = FilterItem::new(&host, node, 4, Rc::new(GridOptions::default()));

        assert_eq!(item.index(), 4);
        assert_eq!(*item.node(), node);
        assert_eq!(item.width(), 120.0);
        assert_eq!(item.height(), 80.0);
    }

    #[test]
    fn test_size_is_cached_until_refreshed() {
        let host = MemoryHost::new();
        let node = host.create_element("div", &[]);
        host.set_size(node, Size::new(100.0, 100.0)).unwrap();
        let mut item = FilterItem::new(&host, node, 0, Rc::new(GridOptions::default()));

        host.set_size(node, Size::new(50.0, 75.0)).unwrap();
        assert_eq!(item.size(), Size::new(100.0, 100.0));

        item.refresh_dimensions(&host);
        assert_eq!(item.size(), Size::new(50.0, 75.0));
    }

    #[test]
    fn test_options_snapshot_is_shared() {
        let host = MemoryHost::new();
        let options = Rc::new(GridOptions::default().filter("3"));
        let first = FilterItem::new(&host, host.create_element("div", &[]), 0, Rc::clone(&options));
        let second =
            FilterItem::new(&host, host.create_element("div", &[]), 1, Rc::clone(&options));

        assert_eq!(first.options().filter, "3");
        assert!(std::ptr::eq(first.options(), second.options()));
    }
}
