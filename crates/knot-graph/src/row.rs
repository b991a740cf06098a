//! Rows emitted by the revision engine.
//!
//! A [`NodeRow`] records one version of a knot; a [`RelationshipRow`]
//! records where a version sits in the hierarchy. Relationship rows point
//! at versions, not identities, which is why every neighbour of a revised
//! knot needs a fresh one.

use serde::Serialize;

use knot_types::{NodeId, RowId, TreeId, VersionId};

/// One version of a knot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NodeRow {
    pub version: VersionId,
    pub node: NodeId,
    pub tree: TreeId,
    /// Rendered content, including one marker per revision.
    pub content: String,
}

/// Placement of a knot version among its siblings and under its parent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RelationshipRow {
    /// Fresh identity of this row.
    pub id: RowId,
    /// Current version of the knot this row describes.
    pub subject: VersionId,
    /// Current version of the previous sibling, resolved at emission.
    pub previous: Option<VersionId>,
    /// Current version of the parent, resolved at emission.
    pub parent: Option<VersionId>,
}

/// A single entry of the output stream.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "row", rename_all = "snake_case")]
pub enum Row {
    Node(NodeRow),
    Relationship(RelationshipRow),
}

impl Row {
    pub fn as_node(&self) -> Option<&NodeRow> {
        match self {
            Self::Node(row) => Some(row),
            Self::Relationship(_) => None,
        }
    }

    pub fn as_relationship(&self) -> Option<&RelationshipRow> {
        match self {
            Self::Relationship(row) => Some(row),
            Self::Node(_) => None,
        }
    }

    pub fn is_node(&self) -> bool {
        matches!(self, Self::Node(_))
    }
}

impl From<NodeRow> for Row {
    fn from(row: NodeRow) -> Self {
        Self::Node(row)
    }
}

impl From<RelationshipRow> for Row {
    fn from(row: RelationshipRow) -> Self {
        Self::Relationship(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_row_tag() {
        let row = Row::from(RelationshipRow {
            id: RowId::generate(),
            subject: VersionId::generate(Some(1)),
            previous: None,
            parent: None,
        });
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["row"], "relationship");
        assert!(json["previous"].is_null());
        assert!(json["parent"].is_null());
    }

    #[test]
    fn accessors_match_variant() {
        let row = Row::from(NodeRow {
            version: VersionId::generate(None),
            node: NodeId::generate(None),
            tree: TreeId::generate(None),
            content: "A".into(),
        });
        assert!(row.is_node());
        assert_eq!(row.as_node().map(|r| r.content.as_str()), Some("A"));
        assert!(row.as_relationship().is_none());
    }
}
