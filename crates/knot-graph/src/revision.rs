//! The revision engine.
//!
//! [`RevisionEngine`] seals a fully populated [`NodeStore`], derives the
//! [`RelationshipIndex`] once, and from then on is the only thing that
//! mutates knots. Each revision appends a version and re-emits the
//! relationship rows of every knot whose links now resolve differently.
//!
//! # Invariants
//!
//! - Links are resolved to current versions at the moment a row is built.
//! - A revision of `X` emits, in order: the node row of `X`, the
//!   relationship row of `X`, of its successor (if any), and of each child
//!   in construction order.
//! - Re-emission only flows down the reference graph: revising `X` never
//!   re-emits a row for the knot `X` itself points at.

use tracing::debug;

use knot_types::{NodeId, RowId};

use crate::error::GraphResult;
use crate::index::RelationshipIndex;
use crate::node::VersionedNode;
use crate::row::{NodeRow, RelationshipRow, Row};
use crate::store::NodeStore;

/// Owns the sealed store and its index and produces the row stream.
#[derive(Debug)]
pub struct RevisionEngine {
    store: NodeStore,
    index: RelationshipIndex,
}

impl RevisionEngine {
    /// Seal `store` and build its relationship index.
    ///
    /// No knot can be added afterwards; the index would not know about it.
    pub fn new(store: NodeStore) -> GraphResult<Self> {
        let index = RelationshipIndex::build(&store)?;
        Ok(Self { store, index })
    }

    pub fn store(&self) -> &NodeStore {
        &self.store
    }

    pub fn index(&self) -> &RelationshipIndex {
        &self.index
    }

    /// Give the store back, dropping the index.
    pub fn into_store(self) -> NodeStore {
        self.store
    }

    /// Node row for a knot at its current version.
    pub fn node_row(&self, id: &NodeId) -> GraphResult<NodeRow> {
        let node = self.store.get(id)?;
        Ok(node_row(node))
    }

    /// Relationship row for a knot, with links resolved right now.
    pub fn relationship_row(&self, id: &NodeId) -> GraphResult<RelationshipRow> {
        let node = self.store.get(id)?;
        Ok(RelationshipRow {
            id: RowId::generate(),
            subject: node.current_version().clone(),
            previous: self.store.resolve_link(node.previous())?,
            parent: self.store.resolve_link(node.parent())?,
        })
    }

    /// Initial emission: a node row and a relationship row per knot, in
    /// store order.
    pub fn creation_rows(&self) -> GraphResult<Vec<Row>> {
        let mut rows = Vec::with_capacity(self.store.len() * 2);
        for node in self.store.iter() {
            rows.push(node_row(node).into());
            rows.push(self.relationship_row(node.id())?.into());
        }
        Ok(rows)
    }

    /// Append a version to `id` and return every row that must be emitted
    /// for it.
    ///
    /// Fails with [`GraphError::NodeNotFound`](crate::GraphError::NodeNotFound)
    /// without mutating anything if `id` is not registered.
    pub fn revise(&mut self, id: &NodeId) -> GraphResult<Vec<Row>> {
        let version = self.store.get_mut(id)?.add_version().clone();

        let children = self.index.children_of(id);
        let successor = self.index.successor_of(id);
        let mut rows = Vec::with_capacity(2 + usize::from(successor.is_some()) + children.len());

        rows.push(self.node_row(id)?.into());
        rows.push(self.relationship_row(id)?.into());
        if let Some(successor) = successor {
            rows.push(self.relationship_row(successor)?.into());
        }
        for child in children {
            rows.push(self.relationship_row(child)?.into());
        }

        debug!(
            node = %id.short_id(),
            version = %version.short_id(),
            rows = rows.len(),
            "revised knot"
        );
        Ok(rows)
    }
}

fn node_row(node: &VersionedNode) -> NodeRow {
    NodeRow {
        version: node.current_version().clone(),
        node: node.id().clone(),
        tree: node.tree().clone(),
        content: node.rendered_content(),
    }
}
