//! Versioned knot graph for knotgen.
//!
//! A knot has a stable [`NodeId`](knot_types::NodeId) and an append-only
//! chain of [`VersionId`](knot_types::VersionId)s. Sibling and parent links
//! are stored by identity and resolved to the referenced knot's *current*
//! version at the moment a row is emitted. The [`RevisionEngine`] owns the
//! sealed [`NodeStore`] and the derived [`RelationshipIndex`] and produces
//! the ordered [`Row`] stream for every revision.

pub mod error;
pub mod index;
pub mod node;
pub mod revision;
pub mod row;
pub mod store;

pub use error::{GraphError, GraphResult};
pub use index::RelationshipIndex;
pub use node::VersionedNode;
pub use revision::RevisionEngine;
pub use row::{NodeRow, RelationshipRow, Row};
pub use store::NodeStore;
