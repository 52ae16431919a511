//! Immutable per-level configuration and the updater contract.

use std::fmt;

use monster_steps_core::{Event, GridSize, PlacementError, PlacementRules};
use rand::RngCore;

use crate::GameState;

/// Callback invoked once per simulation step to drive a level's scripted events.
///
/// Updaters receive exclusive access to the state for the duration of the
/// call, mutate it exclusively through [`crate::apply`], and append the
/// resulting events to `out_events` so the step loop can act on them.
pub type LevelUpdater = fn(
    state: &mut GameState,
    level: &LevelConfig,
    rng: &mut dyn RngCore,
    out_events: &mut Vec<Event>,
) -> Result<(), PlacementError>;

/// Parameters that stay fixed for the lifetime of a level.
#[derive(Clone)]
pub struct LevelConfig {
    grid_size: GridSize,
    level_number: u32,
    title: String,
    description: String,
    updater: LevelUpdater,
    placement: PlacementRules,
}

impl LevelConfig {
    /// Side length of the level's grid.
    #[must_use]
    pub const fn grid_size(&self) -> GridSize {
        self.grid_size
    }

    /// One-based index of the level within the campaign.
    #[must_use]
    pub const fn level_number(&self) -> u32 {
        self.level_number
    }

    /// Short name shown when the level starts.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// One-line description of the level's objective.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Placement rules applied by every random placement in the level.
    #[must_use]
    pub const fn placement(&self) -> PlacementRules {
        self.placement
    }

    /// Replaces the placement rules, keeping every other parameter.
    #[must_use]
    pub fn with_placement_rules(mut self, placement: PlacementRules) -> Self {
        self.placement = placement;
        self
    }

    /// Runs the level's updater for the current step.
    pub fn update(
        &self,
        state: &mut GameState,
        rng: &mut dyn RngCore,
        out_events: &mut Vec<Event>,
    ) -> Result<(), PlacementError> {
        (self.updater)(state, self, rng, out_events)
    }
}

impl fmt::Debug for LevelConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LevelConfig")
            .field("grid_size", &self.grid_size)
            .field("level_number", &self.level_number)
            .field("title", &self.title)
            .field("description", &self.description)
            .field("placement", &self.placement)
            .finish_non_exhaustive()
    }
}

/// Builds the configuration skeleton shared by every level.
#[must_use]
pub fn generate_base_config(
    grid_size: GridSize,
    level_number: u32,
    title: impl Into<String>,
    description: impl Into<String>,
    updater: LevelUpdater,
) -> LevelConfig {
    LevelConfig {
        grid_size,
        level_number,
        title: title.into(),
        description: description.into(),
        updater,
        placement: PlacementRules::default(),
    }
}
