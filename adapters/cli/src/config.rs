//! Run configuration loaded from TOML and refined by command-line flags.

use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use monster_steps_core::{PlacementRules, PlayerExclusion};
use serde::Deserialize;

/// Parameters of a single simulated run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct RunConfig {
    pub(crate) seed: u64,
    pub(crate) steps: u64,
    pub(crate) level: u32,
    pub(crate) player_exclusion: PlayerExclusion,
    pub(crate) max_attempts: Option<u32>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            steps: 200,
            level: 13,
            player_exclusion: PlayerExclusion::default(),
            max_attempts: None,
        }
    }
}

impl RunConfig {
    /// Reads the configuration stored at `path`.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read run configuration at {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("invalid run configuration in {}", path.display()))
    }

    fn parse(contents: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(contents).context("failed to parse run configuration toml contents")?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects combinations that cannot produce a meaningful run.
    pub(crate) fn validate(&self) -> Result<()> {
        if self.steps == 0 {
            bail!("a run needs at least one step");
        }
        Ok(())
    }

    pub(crate) const fn rules(&self) -> PlacementRules {
        PlacementRules::new(self.player_exclusion, self.max_attempts)
    }
}
