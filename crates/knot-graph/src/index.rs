//! Reverse-link index derived from a complete [`NodeStore`].
//!
//! Knots only know who comes *before* them and who contains them. A
//! revision needs the opposite direction: who follows a knot and which
//! knots it contains. [`RelationshipIndex`] answers both, keyed by
//! identity, so it never goes stale when versions are appended.

use std::collections::HashMap;

use tracing::debug;

use knot_types::NodeId;

use crate::error::{GraphError, GraphResult};
use crate::store::NodeStore;

/// Successor and children lookups built in a single pass over the store.
#[derive(Clone, Debug, Default)]
pub struct RelationshipIndex {
    /// previous -> the knot that names it as previous.
    successors: HashMap<NodeId, NodeId>,
    /// parent -> children in store order.
    children: HashMap<NodeId, Vec<NodeId>>,
}

impl RelationshipIndex {
    /// Build the index from every knot in `store`.
    ///
    /// Every link must name a registered knot, and at most one knot may
    /// name a given knot as its previous sibling.
    pub fn build(store: &NodeStore) -> GraphResult<Self> {
        let mut index = Self::default();

        for node in store.iter() {
            if let Some(previous) = node.previous() {
                if !store.contains(previous) {
                    return Err(GraphError::DanglingReference {
                        node: node.id().clone(),
                        target: previous.clone(),
                    });
                }
                if let Some(first) = index.successors.get(previous) {
                    return Err(GraphError::ForkedSequence {
                        previous: previous.clone(),
                        first: first.clone(),
                        second: node.id().clone(),
                    });
                }
                index
                    .successors
                    .insert(previous.clone(), node.id().clone());
            }

            if let Some(parent) = node.parent() {
                if !store.contains(parent) {
                    return Err(GraphError::DanglingReference {
                        node: node.id().clone(),
                        target: parent.clone(),
                    });
                }
                index
                    .children
                    .entry(parent.clone())
                    .or_default()
                    .push(node.id().clone());
            }
        }

        debug!(
            successors = index.successors.len(),
            parents = index.children.len(),
            "built relationship index"
        );
        Ok(index)
    }

    /// The knot that directly follows `id`, if any.
    pub fn successor_of(&self, id: &NodeId) -> Option<&NodeId> {
        self.successors.get(id)
    }

    /// Children of `id` in construction order (empty if none).
    pub fn children_of(&self, id: &NodeId) -> &[NodeId] {
        self.children.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of knots that have a successor.
    pub fn successor_count(&self) -> usize {
        self.successors.len()
    }

    /// Number of knots that have at least one child.
    pub fn parent_count(&self) -> usize {
        self.children.len()
    }
}

#[cfg(test)]
mod tests {
    use knot_types::TreeId;

    use super::*;
    use crate::node::VersionedNode;

    fn add(
        store: &mut NodeStore,
        parent: Option<&NodeId>,
        previous: Option<&NodeId>,
        content: &str,
    ) -> NodeId {
        let node = VersionedNode::create(
            None,
            TreeId::generate(None),
            parent.cloned(),
            previous.cloned(),
            content,
        );
        let id = node.id().clone();
        store.insert(node).unwrap();
        id
    }

    #[test]
    fn empty_store_builds_empty_index() {
        let index = RelationshipIndex::build(&NodeStore::new()).unwrap();
        assert_eq!(index.successor_count(), 0);
        assert_eq!(index.parent_count(), 0);
    }

    #[test]
    fn records_successors_and_children() {
        let mut store = NodeStore::new();
        let a = add(&mut store, None, None, "A");
        let aa = add(&mut store, Some(&a), None, "AA");
        let ab = add(&mut store, Some(&a), Some(&aa), "AB");
        let ac = add(&mut store, Some(&a), Some(&ab), "AC");
        let b = add(&mut store, None, Some(&a), "B");

        let index = RelationshipIndex::build(&store).unwrap();

        assert_eq!(index.successor_of(&a), Some(&b));
        assert_eq!(index.successor_of(&aa), Some(&ab));
        assert_eq!(index.successor_of(&ab), Some(&ac));
        assert_eq!(index.successor_of(&ac), None);
        assert_eq!(index.successor_of(&b), None);

        assert_eq!(index.children_of(&a), &[aa.clone(), ab, ac]);
        assert!(index.children_of(&aa).is_empty());
        assert!(index.children_of(&b).is_empty());
        assert_eq!(index.successor_count(), 3);
        assert_eq!(index.parent_count(), 1);
    }

    #[test]
    fn children_follow_store_order() {
        let mut store = NodeStore::new();
        let root = add(&mut store, None, None, "A");
        let ids: Vec<NodeId> = ["AC", "AA", "AB"]
            .iter()
            .map(|label| add(&mut store, Some(&root), None, label))
            .collect();

        let index = RelationshipIndex::build(&store).unwrap();
        assert_eq!(index.children_of(&root), ids.as_slice());
    }

    #[test]
    fn dangling_parent_is_rejected() {
        let mut store = NodeStore::new();
        let ghost = NodeId::generate(None);
        let orphan = add(&mut store, Some(&ghost), None, "AA");

        let err = RelationshipIndex::build(&store).unwrap_err();
        assert_eq!(
            err,
            GraphError::DanglingReference {
                node: orphan,
                target: ghost,
            }
        );
    }

    #[test]
    fn dangling_previous_is_rejected() {
        let mut store = NodeStore::new();
        let ghost = NodeId::generate(None);
        add(&mut store, None, Some(&ghost), "B");

        assert!(matches!(
            RelationshipIndex::build(&store),
            Err(GraphError::DanglingReference { target, .. }) if target == ghost
        ));
    }

    #[test]
    fn forked_sequence_is_rejected() {
        let mut store = NodeStore::new();
        let a = add(&mut store, None, None, "A");
        let b = add(&mut store, None, Some(&a), "B");
        let c = add(&mut store, None, Some(&a), "C");

        let err = RelationshipIndex::build(&store).unwrap_err();
        assert_eq!(
            err,
            GraphError::ForkedSequence {
                previous: a,
                first: b,
                second: c,
            }
        );
    }
}
