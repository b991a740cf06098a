use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use knot_emit::{InsertTime, OutputFormat, RenderConfig};
use knot_seed::{RevisionPlan, SeedConfig};

use crate::cli::GenerateArgs;

/// Contents of a `knotgen` TOML configuration file.
///
/// Every key is optional; missing keys fall back to the built-in defaults.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub format: OutputFormat,
    pub seed: SeedConfig,
    pub render: RenderConfig,
}

impl AppConfig {
    /// Load `path`, or the defaults when no file is given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn to_toml(&self) -> anyhow::Result<String> {
        Ok(toml::to_string(self)?)
    }

    /// Command-line flags win over file values.
    pub fn apply_overrides(&mut self, args: &GenerateArgs) {
        if let Some(trees) = args.trees {
            self.seed.trees = trees;
        }
        if let Some(format) = args.format {
            self.format = format.into();
        }
        if !args.revise.is_empty() {
            self.seed.revisions = RevisionPlan::new(
                args.revise
                    .iter()
                    .map(|group| RevisionPlan::parse_group(group))
                    .collect(),
            );
        }
        if let Some(at) = args.fixed_time {
            self.render.insert_time = InsertTime::Fixed(at);
        }
    }
}
