//! Foundation types for knotgen.
//!
//! Every knot, every version of a knot, every tree and every emitted
//! hierarchy row is named by an opaque, process-unique token. This crate
//! mints those tokens and wraps them in distinct newtypes so a version can
//! never be passed where a stable identity is expected.
//!
//! # Key Types
//!
//! - [`NodeId`]: Stable identity of a knot, constant across revisions
//! - [`VersionId`]: Physical token naming one immutable version of a knot
//! - [`TreeId`]: Identity shared by every knot of one tree
//! - [`RowId`]: Fresh identity for each emitted hierarchy row

pub mod error;
pub mod id;

pub use error::TypeError;
pub use id::{mint, NodeId, RowId, TreeId, VersionId};
