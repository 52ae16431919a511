#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Monster Steps engine.
//!
//! This crate defines the message surface that connects the command-line
//! adapter, the authoritative game state, and the pure systems. Systems and
//! level updaters submit [`Command`] values describing desired mutations, the
//! world executes those commands via its `apply` entry point, and then
//! reports [`Event`] values that the step loop consumes for side effects such
//! as sound and logging.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Location of a single grid cell expressed as x (column) and y (row).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    x: u32,
    y: u32,
}

impl Position {
    /// Creates a new grid position.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Position of the top-left cell.
    #[must_use]
    pub const fn origin() -> Self {
        Self::new(0, 0)
    }

    /// Zero-based column index.
    #[must_use]
    pub const fn x(&self) -> u32 {
        self.x
    }

    /// Zero-based row index.
    #[must_use]
    pub const fn y(&self) -> u32 {
        self.y
    }

    /// Computes the Manhattan distance between two positions.
    #[must_use]
    pub fn manhattan_distance(self, other: Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

/// Side length of the square grid a level is played on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridSize(u32);

impl GridSize {
    /// Creates a grid description with the provided side length.
    #[must_use]
    pub const fn new(side: u32) -> Self {
        Self(side)
    }

    /// Number of cells along one edge.
    #[must_use]
    pub const fn side(&self) -> u32 {
        self.0
    }

    /// Total number of cells on the grid.
    #[must_use]
    pub const fn cell_count(&self) -> u64 {
        self.0 as u64 * self.0 as u64
    }

    /// Reports whether the grid has no cells at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Reports whether the position lies inside the grid bounds.
    #[must_use]
    pub const fn contains(&self, position: Position) -> bool {
        position.x < self.0 && position.y < self.0
    }

    /// Iterates every cell of the grid in row-major order.
    pub fn cells(self) -> impl Iterator<Item = Position> {
        let side = self.0;
        (0..side).flat_map(move |y| (0..side).map(move |x| Position::new(x, y)))
    }
}

/// Collectible bonuses that can be placed on the grid or surfaced as active effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BonusType {
    /// Makes the player invisible to monsters for a while.
    CapOfInvisibility,
    /// Confuses monsters so they wander instead of chasing.
    ConfusedMonsters,
    /// Fires a shot that destroys monsters in a line.
    Blaster,
    /// Explodes after a countdown, clearing nearby monsters.
    TimeBomb,
    /// Lets the player crush obstacles by walking into them.
    Crusher,
    /// Moves the player to a random free cell.
    Teleport,
    /// Makes the player slide until blocked.
    Slide,
    /// Leaves a mine that destroys the first monster stepping on it.
    LandMine,
    /// Lets the player place new obstacles.
    Builder,
    /// Lets the player climb onto obstacles.
    Climber,
    /// Washes obstacles away.
    Tsunami,
    /// Lets the player push obstacles.
    Sokoban,
    /// Surfaces a tooltip pointing at something of interest, such as the goal.
    Hint,
}

/// Sound effects that the step loop may be asked to play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundEffect {
    /// A monster appeared on the grid.
    MonsterSpawn,
    /// A bonus appeared on the grid.
    BonusSpawn,
}

/// Bonus effect currently in play or surfaced to the player interface.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActiveBonus {
    /// Kind of bonus that is active.
    pub kind: BonusType,
    /// Text shown next to the bonus, if any.
    pub tooltip: Option<String>,
    /// Cell the tooltip points at, if any.
    pub tooltip_position: Option<Position>,
}

impl ActiveBonus {
    /// Creates a hint pointing at the provided position.
    #[must_use]
    pub fn hint(tooltip: impl Into<String>, position: Position) -> Self {
        Self {
            kind: BonusType::Hint,
            tooltip: Some(tooltip.into()),
            tooltip_position: Some(position),
        }
    }
}

/// Progress of a level whose exit stays hidden until a spawn quota is met.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LevelPhase {
    /// Monsters are still being spawned toward the quota.
    Spawning {
        /// Monsters spawned so far.
        spawned: u32,
        /// Monsters required before the goal is revealed.
        quota: u32,
    },
    /// The quota is met but the goal has not been placed yet.
    RevealPending,
    /// The goal has been revealed.
    GoalActive,
}

impl LevelPhase {
    /// Derives the phase from the spawn counter and goal presence.
    ///
    /// A present goal always wins, so levels that start with a visible goal
    /// are reported as [`LevelPhase::GoalActive`] regardless of the counter.
    #[must_use]
    pub const fn derive(spawned: u32, quota: u32, goal_present: bool) -> Self {
        if goal_present {
            Self::GoalActive
        } else if spawned >= quota {
            Self::RevealPending
        } else {
            Self::Spawning { spawned, quota }
        }
    }
}

/// Rule deciding which cells around the player are off limits for placements.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlayerExclusion {
    /// Rejects every cell sharing a row or a column with the player.
    #[default]
    RowAndColumn,
    /// Rejects only the cell the player stands on.
    Cell,
}

impl PlayerExclusion {
    /// Reports whether the candidate cell is excluded by this rule.
    #[must_use]
    pub fn excludes(self, player: Position, candidate: Position) -> bool {
        match self {
            Self::RowAndColumn => candidate.x() == player.x() || candidate.y() == player.y(),
            Self::Cell => candidate == player,
        }
    }
}

/// Tunables shared by every random placement performed within a level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PlacementRules {
    player_exclusion: PlayerExclusion,
    max_attempts: Option<u32>,
}

impl PlacementRules {
    /// Creates placement rules with an explicit exclusion rule and retry budget.
    ///
    /// A `max_attempts` of `None` lets the sampler derive a budget from the
    /// grid size.
    #[must_use]
    pub const fn new(player_exclusion: PlayerExclusion, max_attempts: Option<u32>) -> Self {
        Self {
            player_exclusion,
            max_attempts,
        }
    }

    /// Rule applied around the player.
    #[must_use]
    pub const fn player_exclusion(&self) -> PlayerExclusion {
        self.player_exclusion
    }

    /// Explicit rejection-sampling budget, if configured.
    #[must_use]
    pub const fn max_attempts(&self) -> Option<u32> {
        self.max_attempts
    }
}

/// Commands that express all permissible game state mutations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Advances the simulation by one discrete step.
    AdvanceStep,
    /// Adds a monster at the provided position.
    SpawnMonster {
        /// Cell the monster appears on.
        position: Position,
    },
    /// Adds a collectible bonus at the provided position.
    PlaceBonus {
        /// Cell the bonus appears on.
        position: Position,
        /// Kind of bonus placed.
        kind: BonusType,
    },
    /// Counts one more monster toward the level's spawn quota.
    RecordMonsterSpawn,
    /// Restarts the countdown toward the next periodic monster spawn.
    ResetSpawnCountdown,
    /// Places the exit and surfaces a hint pointing at it.
    RevealGoal {
        /// Cell that becomes the goal.
        position: Position,
        /// Text surfaced alongside the hint.
        tooltip: String,
    },
    /// Asks the step loop to play a sound effect.
    PlaySound {
        /// Effect to play.
        effect: SoundEffect,
    },
}

/// Events reported by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Event {
    /// The simulation clock advanced.
    StepAdvanced {
        /// Step counter after advancing.
        step: u64,
    },
    /// A monster was added to the grid.
    MonsterSpawned {
        /// Cell the monster occupies.
        position: Position,
    },
    /// A bonus was added to the grid.
    BonusPlaced {
        /// Cell the bonus occupies.
        position: Position,
        /// Kind of bonus placed.
        kind: BonusType,
    },
    /// The spawn counter was incremented.
    MonsterSpawnRecorded {
        /// Spawn counter after incrementing.
        total: u32,
    },
    /// The goal was revealed.
    GoalRevealed {
        /// Cell that became the goal.
        position: Position,
    },
    /// A sound effect should be played by the presentation layer.
    SoundRequested {
        /// Effect to play.
        effect: SoundEffect,
    },
}

/// Reasons a random placement may fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum PlacementError {
    /// The grid has no cells to place anything on.
    #[error("grid has no cells")]
    EmptyGrid,
    /// Every cell is occupied or excluded.
    #[error("no valid position found after {attempts} random attempts and a full grid scan")]
    NoValidPosition {
        /// Number of random draws made before scanning the grid.
        attempts: u32,
    },
}
