//! Error types for the knot graph.

use knot_types::NodeId;

/// Errors that can occur while building or revising the graph.
///
/// Every variant is an invariant break by the caller: the graph never
/// substitutes a null or default for an identity it cannot find.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// A referenced node is not registered in the store.
    #[error("node not found: {0:?}")]
    NodeNotFound(NodeId),

    /// Attempted to register a node whose identity already exists.
    #[error("duplicate node: {0:?}")]
    DuplicateNode(NodeId),

    /// A previous or parent link names a node that is not registered.
    #[error("dangling reference: node {node:?} links to missing {target:?}")]
    DanglingReference {
        /// The node holding the bad link.
        node: NodeId,
        /// The missing target.
        target: NodeId,
    },

    /// Two nodes name the same previous sibling.
    #[error("forked sequence: {previous:?} is followed by both {first:?} and {second:?}")]
    ForkedSequence {
        /// The shared previous sibling.
        previous: NodeId,
        /// The successor registered first.
        first: NodeId,
        /// The successor that collided with it.
        second: NodeId,
    },
}

/// Convenience alias for graph results.
pub type GraphResult<T> = Result<T, GraphError>;
