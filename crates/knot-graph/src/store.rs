//! Registry of knots keyed by stable identity.
//!
//! [`NodeStore`] keeps knots in insertion order, which is the order the
//! creation rows are emitted in and the order children are indexed in.

use std::collections::HashMap;

use tracing::debug;

use knot_types::{NodeId, VersionId};

use crate::error::{GraphError, GraphResult};
use crate::node::VersionedNode;

/// Insertion-ordered registry of every knot.
#[derive(Clone, Debug, Default)]
pub struct NodeStore {
    nodes: Vec<VersionedNode>,
    positions: HashMap<NodeId, usize>,
}

impl NodeStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of registered knots.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if no knot is registered.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Register a knot. Fails if its identity is already present.
    pub fn insert(&mut self, node: VersionedNode) -> GraphResult<()> {
        if self.positions.contains_key(node.id()) {
            return Err(GraphError::DuplicateNode(node.id().clone()));
        }
        debug!(node = %node.id().short_id(), content = node.content(), "registered knot");
        self.positions.insert(node.id().clone(), self.nodes.len());
        self.nodes.push(node);
        Ok(())
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.positions.contains_key(id)
    }

    /// Look up a knot by identity.
    pub fn get(&self, id: &NodeId) -> GraphResult<&VersionedNode> {
        self.positions
            .get(id)
            .map(|&pos| &self.nodes[pos])
            .ok_or_else(|| GraphError::NodeNotFound(id.clone()))
    }

    pub(crate) fn get_mut(&mut self, id: &NodeId) -> GraphResult<&mut VersionedNode> {
        match self.positions.get(id) {
            Some(&pos) => Ok(&mut self.nodes[pos]),
            None => Err(GraphError::NodeNotFound(id.clone())),
        }
    }

    /// Resolve an identity to the referenced knot's current version.
    pub fn resolve(&self, id: &NodeId) -> GraphResult<&VersionId> {
        self.get(id).map(VersionedNode::current_version)
    }

    /// Resolve an optional link, keeping `None` as `None`.
    pub fn resolve_link(&self, link: Option<&NodeId>) -> GraphResult<Option<VersionId>> {
        link.map(|id| self.resolve(id).cloned()).transpose()
    }

    /// All knots in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &VersionedNode> {
        self.nodes.iter()
    }

    /// Identities of knots whose base content equals `content`, in
    /// insertion order.
    pub fn find_by_content<'a>(&'a self, content: &'a str) -> impl Iterator<Item = &'a NodeId> {
        self.nodes
            .iter()
            .filter(move |node| node.content() == content)
            .map(VersionedNode::id)
    }
}
