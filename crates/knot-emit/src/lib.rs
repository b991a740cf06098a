//! Row serializers for knotgen.
//!
//! Turns the [`Row`](knot_graph::Row) stream produced by the revision
//! engine into text: PostgreSQL `INSERT` statements for the knot and
//! hierarchy tables, or one JSON object per line.

pub mod config;
pub mod error;
pub mod json;
pub mod sql;
pub mod writer;

pub use config::{InsertTime, OutputFormat, RenderConfig};
pub use error::{EmitError, EmitResult};
pub use json::JsonLinesWriter;
pub use sql::{quote_literal, SqlRenderer, SqlWriter};
pub use writer::{open_writer, RowWriter, VecWriter};
