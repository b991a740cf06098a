//! JSON lines encoding of the row stream.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde_json::{Map, Value};
use tracing::debug;

use knot_graph::Row;

use crate::config::RenderConfig;
use crate::error::EmitResult;
use crate::writer::RowWriter;

/// Writes one JSON object per row, carrying the fixed column values that
/// the SQL form would insert.
pub struct JsonLinesWriter<W: Write> {
    config: RenderConfig,
    out: W,
    rows: u64,
}

impl JsonLinesWriter<BufWriter<File>> {
    /// Create (or truncate) `path` and write records to it.
    pub fn create(path: &Path, config: RenderConfig) -> EmitResult<Self> {
        let file = File::create(path)?;
        debug!(path = %path.display(), "writing JSON lines");
        Self::new(BufWriter::new(file), config)
    }
}

impl<W: Write> JsonLinesWriter<W> {
    pub fn new(out: W, config: RenderConfig) -> EmitResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            out,
            rows: 0,
        })
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn record(&self, row: &Row) -> EmitResult<Value> {
        let mut value = serde_json::to_value(row)?;
        if let Value::Object(fields) = &mut value {
            let mut extra = Map::new();
            if row.is_node() {
                extra.insert("table".into(), self.config.node_table.clone().into());
                extra.insert("type".into(), self.config.kind.clone().into());
                extra.insert("namespace".into(), self.config.namespace.clone().into());
                extra.insert("delete_time".into(), Value::Null);
            } else {
                extra.insert("table".into(), self.config.hierarchy_table.clone().into());
            }
            extra.insert(
                "insert_time".into(),
                serde_json::to_value(self.config.insert_time.resolve())?,
            );
            fields.extend(extra);
        }
        Ok(value)
    }
}

impl<W: Write> RowWriter for JsonLinesWriter<W> {
    fn write_row(&mut self, row: &Row) -> EmitResult<()> {
        let record = self.record(row)?;
        serde_json::to_writer(&mut self.out, &record)?;
        self.out.write_all(b"\n")?;
        self.rows += 1;
        Ok(())
    }

    fn flush(&mut self) -> EmitResult<()> {
        self.out.flush()?;
        Ok(())
    }

    fn rows_written(&self) -> u64 {
        self.rows
    }
}
