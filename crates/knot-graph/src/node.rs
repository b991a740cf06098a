//! The versioned knot.
//!
//! A [`VersionedNode`] pairs a stable identity with an append-only list of
//! physical versions. Its sibling and parent links are identities, never
//! versions, so they stay valid however many times either end is revised.

use serde::Serialize;

use knot_types::{NodeId, TreeId, VersionId};

/// Marker appended to the rendered content once per revision.
pub const REVISION_MARKER: char = '\u{2019}';

/// A knot with a stable identity and a growing version history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VersionedNode {
    id: NodeId,
    tree: TreeId,
    tag: Option<u32>,
    /// Never empty; the last entry is the current version.
    versions: Vec<VersionId>,
    content: String,
    previous: Option<NodeId>,
    parent: Option<NodeId>,
}

impl VersionedNode {
    /// Create a knot with a fresh identity and a single initial version.
    pub fn create(
        tag: Option<u32>,
        tree: TreeId,
        parent: Option<NodeId>,
        previous: Option<NodeId>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: NodeId::generate(tag),
            tree,
            tag,
            versions: vec![VersionId::generate(tag)],
            content: content.into(),
            previous,
            parent,
        }
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn tree(&self) -> &TreeId {
        &self.tree
    }

    pub fn tag(&self) -> Option<u32> {
        self.tag
    }

    /// Full version history, oldest first.
    pub fn versions(&self) -> &[VersionId] {
        &self.versions
    }

    /// Base content as assigned at creation.
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn previous(&self) -> Option<&NodeId> {
        self.previous.as_ref()
    }

    pub fn parent(&self) -> Option<&NodeId> {
        self.parent.as_ref()
    }

    /// Returns `true` if this knot has no parent.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Returns `true` if this knot is first among its siblings.
    pub fn is_first(&self) -> bool {
        self.previous.is_none()
    }

    /// The current (latest) version.
    pub fn current_version(&self) -> &VersionId {
        self.versions
            .last()
            .unwrap_or_else(|| unreachable!("versioned node {:?} has no versions", self.id))
    }

    /// Number of revisions applied since creation.
    pub fn revision_count(&self) -> usize {
        self.versions.len() - 1
    }

    /// Content as emitted: the base text plus one marker per revision.
    pub fn rendered_content(&self) -> String {
        let mut rendered = String::with_capacity(
            self.content.len() + self.revision_count() * REVISION_MARKER.len_utf8(),
        );
        rendered.push_str(&self.content);
        rendered.extend(std::iter::repeat(REVISION_MARKER).take(self.revision_count()));
        rendered
    }

    /// Append a new version minted with this knot's tag and return it.
    pub fn add_version(&mut self) -> &VersionId {
        self.versions.push(VersionId::generate(self.tag));
        self.current_version()
    }
}
