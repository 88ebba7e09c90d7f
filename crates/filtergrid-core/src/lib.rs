//! Layout state for filterable, sortable grids.
//!
//! A [`FilterContainer`] wraps one container element and the item elements found
//! inside it. It derives the column count, keeps the container height in sync with
//! the layout computed by the caller, and fires lifecycle events around filtering,
//! shuffling and sorting.
//!
//! The core talks to its environment only through [`NodeHost`]: the browser build
//! uses a DOM-backed host, tests and benchmarks use [`MemoryHost`].
//!
//! # Modules
//!
//! - [`container`] - [`FilterContainer`] and its lifecycle
//! - [`item`] - per-item records with cached dimensions
//! - [`events`] - lifecycle events and the listener registry
//! - [`host`] - the node capability trait
//! - [`memory`] - in-memory host
//! - [`options`] - user configuration

pub mod collections;
pub mod container;
pub mod error;
pub mod events;
pub mod geometry;
pub mod host;
pub mod item;
pub mod memory;
pub mod options;

pub use container::{ContainerState, FilterContainer};
pub use error::{GridError, NodeError};
pub use events::{
    EventRegistry, LifecycleCallbacks, LifecycleEvent, LifecycleOperation, Listener,
    ParseEventError, EVENT_NAMESPACE,
};
pub use geometry::{Position, Size, StyleProperty};
pub use host::{resolve_one, NodeHost};
pub use item::FilterItem;
pub use memory::{MemoryHost, MemoryNodeId};
pub use options::{
    DelayMode, GridOptions, LayoutMode, DEFAULT_CONTAINER_SELECTOR, DEFAULT_ITEM_SELECTOR,
};
