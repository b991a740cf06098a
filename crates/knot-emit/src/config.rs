use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EmitError, EmitResult};

/// Value written to every row's `insert_time` column.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsertTime {
    /// Let the database stamp the row (`CURRENT_TIMESTAMP`).
    #[default]
    Now,
    /// A fixed instant, for reproducible output.
    Fixed(DateTime<Utc>),
}

impl InsertTime {
    /// RFC 3339 text of a fixed instant.
    pub fn fixed_text(&self) -> Option<String> {
        match self {
            Self::Now => None,
            Self::Fixed(at) => Some(at.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
        }
    }

    /// The instant to report for a row emitted right now.
    pub fn resolve(&self) -> DateTime<Utc> {
        match self {
            Self::Now => Utc::now(),
            Self::Fixed(at) => *at,
        }
    }
}

/// Target schema and fixed column values.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Table receiving node rows.
    pub node_table: String,
    /// Table receiving relationship rows.
    pub hierarchy_table: String,
    /// Value of the `"type"` column.
    pub kind: String,
    /// Value of the `"namespace"` column.
    pub namespace: String,
    pub insert_time: InsertTime,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            node_table: "public.chnots".into(),
            hierarchy_table: "public.chnot_hierarchies".into(),
            kind: "mwdt".into(),
            namespace: "public".into(),
            insert_time: InsertTime::Now,
        }
    }
}

impl RenderConfig {
    /// Check that both table names are plain (optionally schema-qualified)
    /// SQL identifiers. They are spliced into statements unquoted.
    pub fn validate(&self) -> EmitResult<()> {
        validate_table_name(&self.node_table)?;
        validate_table_name(&self.hierarchy_table)
    }
}

fn validate_table_name(name: &str) -> EmitResult<()> {
    let valid = !name.is_empty()
        && name.split('.').all(|segment| {
            let mut chars = segment.chars();
            matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        });
    if valid {
        Ok(())
    } else {
        Err(EmitError::InvalidIdentifier(name.to_string()))
    }
}

/// Text encoding of the row stream.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// One `INSERT` statement per line.
    #[default]
    Sql,
    /// One JSON object per line.
    JsonLines,
}
