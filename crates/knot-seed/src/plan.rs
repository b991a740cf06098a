//! Revision plans.
//!
//! A plan is a list of groups of labels. Groups run in order; within a
//! group every label is applied in order to every knot carrying that base
//! content, in store order across all trees.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use knot_emit::RowWriter;
use knot_graph::RevisionEngine;
use knot_types::NodeId;

use crate::error::SeedResult;

/// Counts produced by [`RevisionPlan::apply`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlanStats {
    /// Knot revisions performed.
    pub revisions: usize,
    /// Rows written, node and relationship rows together.
    pub rows: usize,
}

/// Ordered groups of labels to revise.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RevisionPlan {
    groups: Vec<Vec<String>>,
}

impl Default for RevisionPlan {
    fn default() -> Self {
        Self::new(vec![
            vec!["AA".into(), "ACB".into()],
            vec!["AB".into(), "AAC".into(), "ADA".into()],
        ])
    }
}

impl RevisionPlan {
    pub fn new(groups: Vec<Vec<String>>) -> Self {
        Self { groups }
    }

    /// A plan that revises nothing.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Parse a comma separated group such as `"AA, ACB"`.
    pub fn parse_group(text: &str) -> Vec<String> {
        text.split(',')
            .map(str::trim)
            .filter(|label| !label.is_empty())
            .map(String::from)
            .collect()
    }

    pub fn groups(&self) -> &[Vec<String>] {
        &self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(Vec::is_empty)
    }

    /// Revise every matching knot and stream the resulting rows.
    pub fn apply(
        &self,
        engine: &mut RevisionEngine,
        writer: &mut dyn RowWriter,
    ) -> SeedResult<PlanStats> {
        let mut stats = PlanStats::default();

        for (group, labels) in self.groups.iter().enumerate() {
            let before = stats;
            for label in labels {
                let targets: Vec<NodeId> = engine.store().find_by_content(label).cloned().collect();
                if targets.is_empty() {
                    warn!(label = %label, group, "revision label matches no knot");
                    continue;
                }
                for id in &targets {
                    let rows = engine.revise(id)?;
                    writer.write_rows(&rows)?;
                    stats.rows += rows.len();
                }
                stats.revisions += targets.len();
            }
            info!(
                group,
                labels = labels.len(),
                revisions = stats.revisions - before.revisions,
                rows = stats.rows - before.rows,
                "applied revision group"
            );
        }

        Ok(stats)
    }
}
