//! Alphabetic forest construction.
//!
//! Every tree has the same shape: `fanout[0]` top-level knots labelled
//! `A`, `B`, ...; under each, `fanout[1]` children labelled `AA`, `AB`, ...;
//! and so on. Siblings are chained through their previous link and every
//! knot below the top level points at its enclosing knot.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use knot_graph::{NodeStore, VersionedNode};
use knot_types::{NodeId, TreeId};

use crate::error::{SeedError, SeedResult};

const ALPHABET_LEN: u8 = 26;

/// Per-level fanout and the letter labels start from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeShape {
    /// Number of children per knot at each level, top level first.
    pub fanout: Vec<u8>,
    pub first_label: char,
}

impl Default for TreeShape {
    fn default() -> Self {
        Self {
            fanout: vec![5, 3, 3],
            first_label: 'A',
        }
    }
}

impl TreeShape {
    pub fn validate(&self) -> SeedResult<()> {
        if self.fanout.is_empty() {
            return Err(SeedError::InvalidShape("fanout must name at least one level".into()));
        }
        if let Some(level) = self
            .fanout
            .iter()
            .position(|&n| n == 0 || n > ALPHABET_LEN)
        {
            return Err(SeedError::InvalidShape(format!(
                "fanout at level {level} is {}, expected 1..={ALPHABET_LEN}",
                self.fanout[level]
            )));
        }
        if !self.first_label.is_ascii_uppercase() {
            return Err(SeedError::InvalidShape(format!(
                "first label {:?} is not an ASCII uppercase letter",
                self.first_label
            )));
        }
        if self.checked_nodes_per_tree().is_none() {
            return Err(SeedError::InvalidShape(format!(
                "fanout {:?} yields more knots per tree than fit in usize",
                self.fanout
            )));
        }
        let widest = self.fanout.iter().copied().max().unwrap_or(1);
        let last = self.first_label as u32 + u32::from(widest) - 1;
        if last > u32::from(b'Z') {
            return Err(SeedError::InvalidShape(format!(
                "labels starting at {:?} run past 'Z' with fanout {widest}",
                self.first_label
            )));
        }
        Ok(())
    }

    /// Number of levels.
    pub fn depth(&self) -> usize {
        self.fanout.len()
    }

    /// Number of knots in one tree, saturating at `usize::MAX`.
    pub fn nodes_per_tree(&self) -> usize {
        self.checked_nodes_per_tree().unwrap_or(usize::MAX)
    }

    fn checked_nodes_per_tree(&self) -> Option<usize> {
        let mut width = 1usize;
        let mut total = 0usize;
        for &n in &self.fanout {
            width = width.checked_mul(usize::from(n))?;
            total = total.checked_add(width)?;
        }
        Some(total)
    }

    fn letter(&self, index: u8) -> char {
        char::from(self.first_label as u8 + index)
    }
}

/// Populates a [`NodeStore`] with trees of a fixed [`TreeShape`].
#[derive(Clone, Debug)]
pub struct TreeBuilder {
    shape: TreeShape,
}

impl TreeBuilder {
    pub fn new(shape: TreeShape) -> SeedResult<Self> {
        shape.validate()?;
        Ok(Self { shape })
    }

    pub fn shape(&self) -> &TreeShape {
        &self.shape
    }

    /// Build `trees` trees, tagging tree `i` and all its ids with `i`.
    pub fn build_forest(&self, store: &mut NodeStore, trees: usize) -> SeedResult<Vec<TreeId>> {
        let ids = (0..trees)
            .map(|index| {
                let tag = u32::try_from(index).map_err(|_| SeedError::TooManyTrees(trees))?;
                self.build_tree(store, tag)
            })
            .collect::<SeedResult<Vec<_>>>()?;
        info!(
            trees,
            nodes = store.len(),
            per_tree = self.shape.nodes_per_tree(),
            "built forest"
        );
        Ok(ids)
    }

    /// Build a single tree in depth-first pre-order.
    pub fn build_tree(&self, store: &mut NodeStore, tag: u32) -> SeedResult<TreeId> {
        let tree = TreeId::generate(Some(tag));
        self.build_level(store, &tree, tag, 0, None, "")?;
        debug!(tree = %tree.short_id(), tag, "built tree");
        Ok(tree)
    }

    fn build_level(
        &self,
        store: &mut NodeStore,
        tree: &TreeId,
        tag: u32,
        level: usize,
        parent: Option<&NodeId>,
        prefix: &str,
    ) -> SeedResult<()> {
        let mut previous: Option<NodeId> = None;
        for index in 0..self.shape.fanout[level] {
            let mut label = String::with_capacity(prefix.len() + 1);
            label.push_str(prefix);
            label.push(self.shape.letter(index));

            let node = VersionedNode::create(
                Some(tag),
                tree.clone(),
                parent.cloned(),
                previous.take(),
                label.as_str(),
            );
            let id = node.id().clone();
            store.insert(node)?;

            if level + 1 < self.shape.depth() {
                self.build_level(store, tree, tag, level + 1, Some(&id), &label)?;
            }
            previous = Some(id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use proptest::prelude::*;

    use super::*;

    fn by_label(store: &NodeStore) -> HashMap<String, VersionedNode> {
        store
            .iter()
            .map(|node| (node.content().to_string(), node.clone()))
            .collect()
    }

    #[test]
    fn default_shape_has_65_nodes_per_tree() {
        let shape = TreeShape::default();
        assert_eq!(shape.depth(), 3);
        assert_eq!(shape.nodes_per_tree(), 5 + 15 + 45);
    }

    #[test]
    fn oversized_shape_is_rejected() {
        let shape = TreeShape {
            fanout: vec![26; 64],
            first_label: 'A',
        };
        assert_eq!(shape.nodes_per_tree(), usize::MAX);
        assert!(matches!(
            TreeBuilder::new(shape),
            Err(SeedError::InvalidShape(_))
        ));
    }

    #[test]
    fn builds_labels_in_pre_order() {
        let builder = TreeBuilder::new(TreeShape {
            fanout: vec![2, 2],
            first_label: 'A',
        })
        .unwrap();
        let mut store = NodeStore::new();
        builder.build_tree(&mut store, 0).unwrap();

        let labels: Vec<&str> = store.iter().map(VersionedNode::content).collect();
        assert_eq!(labels, vec!["A", "AA", "AB", "B", "BA", "BB"]);
    }

    #[test]
    fn wires_siblings_and_parents() {
        let builder = TreeBuilder::new(TreeShape::default()).unwrap();
        let mut store = NodeStore::new();
        let tree = builder.build_tree(&mut store, 4).unwrap();
        assert_eq!(store.len(), 65);
        let nodes = by_label(&store);

        let id = |label: &str| nodes[label].id().clone();

        assert!(nodes["A"].is_root() && nodes["A"].is_first());
        assert_eq!(nodes["B"].previous(), Some(&id("A")));
        assert_eq!(nodes["E"].previous(), Some(&id("D")));
        assert!(nodes["E"].is_root());

        assert_eq!(nodes["AA"].parent(), Some(&id("A")));
        assert!(nodes["AA"].is_first());
        assert_eq!(nodes["AB"].previous(), Some(&id("AA")));
        assert_eq!(nodes["AC"].previous(), Some(&id("AB")));
        assert!(nodes["BA"].is_first());

        assert_eq!(nodes["ACB"].parent(), Some(&id("AC")));
        assert_eq!(nodes["ACB"].previous(), Some(&id("ACA")));
        assert!(nodes["BAA"].is_first());
        assert_eq!(nodes["BAA"].parent(), Some(&id("BA")));
        assert!(!nodes.contains_key("ADA"));
        assert_eq!(nodes["EC"].parent(), Some(&id("E")));

        assert!(nodes.values().all(|n| n.tree() == &tree));
        assert!(nodes.values().all(|n| n.id().tag() == Some(4)));
    }

    #[test]
    fn siblings_share_the_enclosing_parent() {
        let builder = TreeBuilder::new(TreeShape::default()).unwrap();
        let mut store = NodeStore::new();
        builder.build_tree(&mut store, 0).unwrap();
        let nodes = by_label(&store);

        let a = nodes["A"].id();
        for label in ["AA", "AB", "AC"] {
            assert_eq!(nodes[label].parent(), Some(a), "{label}");
        }
        let engine = knot_graph::RevisionEngine::new(store).unwrap();
        let under_aa = engine.index().children_of(nodes["AA"].id());
        assert_eq!(under_aa.len(), 3);
        assert!(!under_aa.contains(nodes["AB"].id()));
    }

    #[test]
    fn forest_tags_each_tree() {
        let builder = TreeBuilder::new(TreeShape::default()).unwrap();
        let mut store = NodeStore::new();
        let trees = builder.build_forest(&mut store, 3).unwrap();
        assert_eq!(trees.len(), 3);
        assert_eq!(store.len(), 3 * 65);
        for (index, tree) in trees.iter().enumerate() {
            assert_eq!(tree.tag(), Some(index as u32));
        }
        // The top-level chain restarts in every tree.
        let firsts = store
            .iter()
            .filter(|n| n.content() == "A")
            .filter(|n| n.is_first())
            .count();
        assert_eq!(firsts, 3);
    }

    #[test]
    fn zero_trees_builds_nothing() {
        let builder = TreeBuilder::new(TreeShape::default()).unwrap();
        let mut store = NodeStore::new();
        assert!(builder.build_forest(&mut store, 0).unwrap().is_empty());
        assert!(store.is_empty());
    }

    #[test]
    fn rejects_invalid_shapes() {
        let cases = [
            TreeShape {
                fanout: vec![],
                first_label: 'A',
            },
            TreeShape {
                fanout: vec![3, 0],
                first_label: 'A',
            },
            TreeShape {
                fanout: vec![27],
                first_label: 'A',
            },
            TreeShape {
                fanout: vec![3],
                first_label: 'a',
            },
            TreeShape {
                fanout: vec![5],
                first_label: 'X',
            },
        ];
        for shape in cases {
            assert!(
                matches!(TreeBuilder::new(shape.clone()), Err(SeedError::InvalidShape(_))),
                "{shape:?} should be rejected"
            );
        }
        assert!(TreeBuilder::new(TreeShape {
            fanout: vec![26],
            first_label: 'A',
        })
        .is_ok());
    }

    #[test]
    fn forest_seals_into_a_consistent_index() {
        let builder = TreeBuilder::new(TreeShape::default()).unwrap();
        let mut store = NodeStore::new();
        builder.build_forest(&mut store, 2).unwrap();
        let engine = knot_graph::RevisionEngine::new(store).unwrap();
        let nodes = by_label(engine.store());
        let a = nodes["A"].id();
        // A has three children (AA..AC) and is followed by B.
        assert!(engine.index().successor_of(a).is_some());
        assert_eq!(engine.index().children_of(a).len(), 3);
    }

    proptest! {
        #[test]
        fn store_size_matches_shape(
            fanout in proptest::collection::vec(1u8..=4, 1..4),
            trees in 0usize..3,
        ) {
            let shape = TreeShape { fanout, first_label: 'A' };
            let per_tree = shape.nodes_per_tree();
            let builder = TreeBuilder::new(shape).unwrap();
            let mut store = NodeStore::new();
            builder.build_forest(&mut store, trees).unwrap();
            prop_assert_eq!(store.len(), trees * per_tree);
            let roots = store.iter().filter(|n| n.is_root()).count();
            prop_assert_eq!(roots, trees * usize::from(builder.shape().fanout[0]));
        }
    }
}
