//! Seed data driver for knotgen.
//!
//! Builds a forest of alphabetically labelled knots, seals it into a
//! [`RevisionEngine`](knot_graph::RevisionEngine), emits the creation rows
//! and then replays a [`RevisionPlan`] against it, streaming every row to a
//! [`RowWriter`](knot_emit::RowWriter).

pub mod builder;
pub mod config;
pub mod error;
pub mod plan;
pub mod seeder;

pub use builder::{TreeBuilder, TreeShape};
pub use config::SeedConfig;
pub use error::{SeedError, SeedResult};
pub use plan::RevisionPlan;
pub use seeder::{SeedReport, Seeder};
