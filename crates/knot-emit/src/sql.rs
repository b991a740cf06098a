//! PostgreSQL `INSERT` rendering.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::debug;

use knot_graph::{NodeRow, RelationshipRow, Row};

use crate::config::{InsertTime, RenderConfig};
use crate::error::EmitResult;
use crate::writer::RowWriter;

/// Quote `value` as a SQL string literal, doubling embedded quotes.
pub fn quote_literal(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    for c in value.chars() {
        if c == '\'' {
            quoted.push('\'');
        }
        quoted.push(c);
    }
    quoted.push('\'');
    quoted
}

fn quote_optional(value: Option<&str>) -> String {
    value.map_or_else(|| "null".to_string(), quote_literal)
}

/// Renders rows as single-line `INSERT` statements.
#[derive(Clone, Debug)]
pub struct SqlRenderer {
    config: RenderConfig,
    /// Pre-rendered `insert_time` expression.
    insert_time: String,
}

impl SqlRenderer {
    /// Create a renderer, rejecting table names that are not identifiers.
    pub fn new(config: RenderConfig) -> EmitResult<Self> {
        config.validate()?;
        let insert_time = match &config.insert_time {
            InsertTime::Now => "CURRENT_TIMESTAMP".to_string(),
            fixed => quote_optional(fixed.fixed_text().as_deref()),
        };
        Ok(Self {
            config,
            insert_time,
        })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn render(&self, row: &Row) -> String {
        match row {
            Row::Node(row) => self.render_node(row),
            Row::Relationship(row) => self.render_relationship(row),
        }
    }

    pub fn render_node(&self, row: &NodeRow) -> String {
        format!(
            "INSERT INTO {}(id, meta_id, tree_id, \"content\", \"type\", \"namespace\", delete_time, insert_time) VALUES({}, {}, {}, {}, {}, {}, null, {});",
            self.config.node_table,
            quote_literal(row.version.as_str()),
            quote_literal(row.node.as_str()),
            quote_literal(row.tree.as_str()),
            quote_literal(&row.content),
            quote_literal(&self.config.kind),
            quote_literal(&self.config.namespace),
            self.insert_time,
        )
    }

    pub fn render_relationship(&self, row: &RelationshipRow) -> String {
        format!(
            "INSERT INTO {}(id, chnot_id, prev_id, parent_id, insert_time) VALUES ({}, {}, {}, {}, {});",
            self.config.hierarchy_table,
            quote_literal(row.id.as_str()),
            quote_literal(row.subject.as_str()),
            quote_optional(row.previous.as_ref().map(|v| v.as_str())),
            quote_optional(row.parent.as_ref().map(|v| v.as_str())),
            self.insert_time,
        )
    }
}

/// Writes one SQL statement per line.
pub struct SqlWriter<W: Write> {
    renderer: SqlRenderer,
    out: W,
    rows: u64,
}

impl SqlWriter<BufWriter<File>> {
    /// Create (or truncate) `path` and write statements to it.
    pub fn create(path: &Path, config: RenderConfig) -> EmitResult<Self> {
        let file = File::create(path)?;
        debug!(path = %path.display(), "writing SQL statements");
        Self::new(BufWriter::new(file), config)
    }
}

impl<W: Write> SqlWriter<W> {
    pub fn new(out: W, config: RenderConfig) -> EmitResult<Self> {
        Ok(Self {
            renderer: SqlRenderer::new(config)?,
            out,
            rows: 0,
        })
    }

    /// Unwrap the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RowWriter for SqlWriter<W> {
    fn write_row(&mut self, row: &Row) -> EmitResult<()> {
        writeln!(self.out, "{}", self.renderer.render(row))?;
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
