use serde::{Deserialize, Serialize};

use crate::builder::TreeShape;
use crate::plan::RevisionPlan;

/// Everything the seeder needs to know: how many trees, their shape, and
/// which knots to revise afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    pub trees: usize,
    pub revisions: RevisionPlan,
    pub shape: TreeShape,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            trees: 1000,
            revisions: RevisionPlan::default(),
            shape: TreeShape::default(),
        }
    }
}
