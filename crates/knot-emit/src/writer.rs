use std::io::Write;

use knot_graph::Row;

use crate::config::{OutputFormat, RenderConfig};
use crate::error::EmitResult;
use crate::json::JsonLinesWriter;
use crate::sql::SqlWriter;

/// Sink for the ordered row stream.
pub trait RowWriter {
    /// Append one row to the output.
    fn write_row(&mut self, row: &Row) -> EmitResult<()>;

    /// Flush buffered output.
    fn flush(&mut self) -> EmitResult<()>;

    /// Number of rows written so far.
    fn rows_written(&self) -> u64;

    /// Append rows in order.
    fn write_rows(&mut self, rows: &[Row]) -> EmitResult<()> {
        rows.iter().try_for_each(|row| self.write_row(row))
    }
}

/// Open a writer for `format` over an arbitrary byte sink.
pub fn open_writer(
    format: OutputFormat,
    config: RenderConfig,
    out: Box<dyn Write>,
) -> EmitResult<Box<dyn RowWriter>> {
    Ok(match format {
        OutputFormat::Sql => Box::new(SqlWriter::new(out, config)?),
        OutputFormat::JsonLines => Box::new(JsonLinesWriter::new(out, config)?),
    })
}

/// Collects rows in memory.
#[derive(Clone, Debug, Default)]
pub struct VecWriter {
    pub rows: Vec<Row>,
}

impl VecWriter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RowWriter for VecWriter {
    fn write_row(&mut self, row: &Row) -> EmitResult<()> {
        self.rows.push(row.clone());
        Ok(())
    }

    fn flush(&mut self) -> EmitResult<()> {
        Ok(())
    }

    fn rows_written(&self) -> u64 {
        self.rows.len() as u64
    }
}
