//! End-to-end seed run.

use serde::Serialize;
use tracing::info;

use knot_emit::RowWriter;
use knot_graph::{NodeStore, RevisionEngine};

use crate::builder::TreeBuilder;
use crate::config::SeedConfig;
use crate::error::SeedResult;

/// Summary of a finished seed run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub trees: usize,
    pub nodes: usize,
    pub node_rows: usize,
    pub relationship_rows: usize,
    pub revisions: usize,
}

impl SeedReport {
    /// Total rows written.
    pub fn rows(&self) -> usize {
        self.node_rows + self.relationship_rows
    }
}

/// Builds the forest, emits creation rows, then applies the revision plan.
#[derive(Clone, Debug)]
pub struct Seeder {
    config: SeedConfig,
    builder: TreeBuilder,
}

impl Seeder {
    /// Validate the configuration and prepare a run.
    pub fn new(config: SeedConfig) -> SeedResult<Self> {
        let builder = TreeBuilder::new(config.shape.clone())?;
        Ok(Self { config, builder })
    }

    pub fn config(&self) -> &SeedConfig {
        &self.config
    }

    /// Build the forest and seal it into a revision engine.
    pub fn build(&self) -> SeedResult<RevisionEngine> {
        let mut store = NodeStore::new();
        self.builder.build_forest(&mut store, self.config.trees)?;
        Ok(RevisionEngine::new(store)?)
    }

    /// Run the whole seed and stream every row to `writer`.
    pub fn run(&self, writer: &mut dyn RowWriter) -> SeedResult<SeedReport> {
        let mut engine = self.build()?;

        let creation = engine.creation_rows()?;
        writer.write_rows(&creation)?;
        let nodes = engine.store().len();
        info!(nodes, rows = creation.len(), "emitted creation rows");
        drop(creation);

        let stats = self.config.revisions.apply(&mut engine, writer)?;
        writer.flush()?;

        let report = SeedReport {
            trees: self.config.trees,
            nodes,
            node_rows: nodes + stats.revisions,
            relationship_rows: nodes + stats.rows - stats.revisions,
            revisions: stats.revisions,
        };
        info!(
            trees = report.trees,
            nodes = report.nodes,
            revisions = report.revisions,
            rows = report.rows(),
            "seed complete"
        );
        Ok(report)
    }
}
