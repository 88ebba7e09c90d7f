//! Error types for the grid core.

use thiserror::Error;

/// Failure reported by a [`NodeHost`](crate::NodeHost).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum NodeError {
    #[error("unknown node #{0}")]
    UnknownNode(u64),

    #[error("node is not attached to a document")]
    Detached,

    #[error("host error: {0}")]
    Host(String),
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GridError {
    #[error("locator `{locator}` matched {matches} elements, expected exactly one")]
    Resolution { locator: String, matches: usize },

    #[error("cannot calculate columns: the container holds no items")]
    EmptyCollection,

    #[error("reference item width {width} cannot be used to calculate columns")]
    DegenerateItemWidth { width: f32 },

    #[error("`{operation}` called on a destroyed container")]
    InvalidState { operation: &'static str },

    #[error(transparent)]
    Node(#[from] NodeError),
}
