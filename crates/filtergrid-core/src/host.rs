//! Node capability the grid core consumes from its environment.
//!
//! The core never touches a document directly. Everything it needs (locating
//! elements, measuring them, writing inline presentation properties, appending
//! children, mirroring lifecycle events) goes through a [`NodeHost`]. A browser
//! build plugs in a DOM-backed host; tests use [`MemoryHost`](crate::MemoryHost).

use std::fmt::Debug;

use crate::error::{GridError, NodeError};
use crate::events::LifecycleEvent;
use crate::geometry::{Size, StyleProperty};

pub trait NodeHost {
    /// Handle to one element owned by the host.
    type Node: Clone + Debug;

    /// Returns every element matching `locator`, in document order.
    fn resolve(&self, locator: &str) -> Result<Vec<Self::Node>, NodeError>;

    /// Inner width of `node` (content plus padding).
    fn inner_width(&self, node: &Self::Node) -> f32;

    /// Outer dimensions of `node`.
    fn measure(&self, node: &Self::Node) -> Size;

    /// Writes inline presentation properties, replacing earlier values of the same properties.
    fn set_style(&self, node: &Self::Node, properties: &[StyleProperty]) -> Result<(), NodeError>;

    /// Removes every inline presentation property from `node`.
    fn clear_style(&self, node: &Self::Node) -> Result<(), NodeError>;

    /// Moves `child` to the end of `container`'s children.
    fn append_child(&self, container: &Self::Node, child: &Self::Node) -> Result<(), NodeError>;

    /// Returns descendants of `container` matching `selector`, in document order.
    fn find_descendants(
        &self,
        container: &Self::Node,
        selector: &str,
    ) -> Result<Vec<Self::Node>, NodeError>;

    /// Mirrors a lifecycle event onto `node` for listeners the host manages.
    ///
    /// The default implementation does nothing.
    fn emit(&self, node: &Self::Node, event: LifecycleEvent) -> Result<(), NodeError> {
        let _ = (node, event);
        Ok(())
    }
}

/// Resolves `locator` to exactly one element.
pub fn resolve_one<H: NodeHost + ?Sized>(host: &H, locator: &str) -> Result<H::Node, GridError> {
    let mut matches = host.resolve(locator)?;
    if matches.len() != 1 {
        return Err(GridError::Resolution {
            locator: locator.to_string(),
            matches: matches.len(),
        });
    }
    // Length checked above
    Ok(matches.swap_remove(0))
}
