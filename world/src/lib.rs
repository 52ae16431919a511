#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative game state management for Monster Steps.

mod entities;
mod level;

use monster_steps_core::{ActiveBonus, Command, Event, GridSize, Position};

pub use entities::{Bonus, Monster, Obstacle, Player};
pub use level::{generate_base_config, LevelConfig, LevelUpdater};

/// Represents the authoritative state of a level in progress.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    player: Player,
    monsters: Vec<Monster>,
    obstacles: Vec<Obstacle>,
    bonuses: Vec<Bonus>,
    active_bonuses: Vec<ActiveBonus>,
    goal: Option<Position>,
    steps: u64,
    spawned_monster_count: u32,
    monster_spawn_steps: u32,
}

impl GameState {
    /// Moves the player to a new starting cell.
    #[must_use]
    pub fn with_player(mut self, player: Player) -> Self {
        self.player = player;
        self
    }

    /// Adds the provided obstacles to the level layout.
    #[must_use]
    pub fn with_obstacles(mut self, obstacles: impl IntoIterator<Item = Obstacle>) -> Self {
        self.obstacles.extend(obstacles);
        self
    }

    /// Adds the provided bonuses to the level layout.
    #[must_use]
    pub fn with_bonuses(mut self, bonuses: impl IntoIterator<Item = Bonus>) -> Self {
        self.bonuses.extend(bonuses);
        self
    }

    /// Replaces the goal; `None` hides it until it is revealed.
    #[must_use]
    pub fn with_goal(mut self, goal: Option<Position>) -> Self {
        self.goal = goal;
        self
    }
}

/// Builds the state skeleton shared by every level.
///
/// The player starts on the origin and the goal sits in the opposite corner;
/// levels that hide the goal remove it with [`GameState::with_goal`].
#[must_use]
pub fn generate_base_state(grid_size: GridSize) -> GameState {
    let far_corner = grid_size.side().checked_sub(1);
    GameState {
        player: Player::at(Position::origin()),
        monsters: Vec::new(),
        obstacles: Vec::new(),
        bonuses: Vec::new(),
        active_bonuses: Vec::new(),
        goal: far_corner.map(|edge| Position::new(edge, edge)),
        steps: 0,
        spawned_monster_count: 0,
        monster_spawn_steps: 0,
    }
}

/// Applies the provided command to the state, mutating it deterministically.
pub fn apply(state: &mut GameState, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::AdvanceStep => {
            state.steps = state.steps.saturating_add(1);
            state.monster_spawn_steps = state.monster_spawn_steps.saturating_add(1);
            out_events.push(Event::StepAdvanced { step: state.steps });
        }
        Command::SpawnMonster { position } => {
            state.monsters.push(Monster::at(position));
            out_events.push(Event::MonsterSpawned { position });
        }
        Command::PlaceBonus { position, kind } => {
            state.bonuses.push(Bonus::at(position, kind));
            out_events.push(Event::BonusPlaced { position, kind });
        }
        Command::RecordMonsterSpawn => {
            state.spawned_monster_count = state.spawned_monster_count.saturating_add(1);
            out_events.push(Event::MonsterSpawnRecorded {
                total: state.spawned_monster_count,
            });
        }
        Command::ResetSpawnCountdown => {
            state.monster_spawn_steps = 0;
        }
        Command::RevealGoal { position, tooltip } => {
            if state.goal.is_some() {
                return;
            }
            state.goal = Some(position);
            state.active_bonuses.push(ActiveBonus::hint(tooltip, position));
            out_events.push(Event::GoalRevealed { position });
        }
        Command::PlaySound { effect } => {
            out_events.push(Event::SoundRequested { effect });
        }
    }
}

/// Query functions that provide read-only access to the game state.
pub mod query {
    use monster_steps_core::{ActiveBonus, LevelPhase, Position};

    use super::{Bonus, GameState, Monster, Obstacle, Player};

    /// Provides read-only access to the player.
    #[must_use]
    pub fn player(state: &GameState) -> Player {
        state.player
    }

    /// Monsters on the grid in spawn order.
    #[must_use]
    pub fn monsters(state: &GameState) -> &[Monster] {
        &state.monsters
    }

    /// Obstacles on the grid in placement order.
    #[must_use]
    pub fn obstacles(state: &GameState) -> &[Obstacle] {
        &state.obstacles
    }

    /// Uncollected bonuses on the grid in placement order.
    #[must_use]
    pub fn bonuses(state: &GameState) -> &[Bonus] {
        &state.bonuses
    }

    /// Bonus effects currently surfaced to the player.
    #[must_use]
    pub fn active_bonuses(state: &GameState) -> &[ActiveBonus] {
        &state.active_bonuses
    }

    /// Exit cell, if it has been revealed.
    #[must_use]
    pub fn goal(state: &GameState) -> Option<Position> {
        state.goal
    }

    /// Number of simulation steps taken since the level started.
    #[must_use]
    pub fn steps(state: &GameState) -> u64 {
        state.steps
    }

    /// Number of monsters spawned since the level started.
    #[must_use]
    pub fn spawned_monster_count(state: &GameState) -> u32 {
        state.spawned_monster_count
    }

    /// Steps elapsed since the last periodic monster spawn.
    #[must_use]
    pub fn monster_spawn_steps(state: &GameState) -> u32 {
        state.monster_spawn_steps
    }

    /// Derives the level phase for a level revealing its goal after `quota` spawns.
    #[must_use]
    pub fn phase(state: &GameState, quota: u32) -> LevelPhase {
        LevelPhase::derive(state.spawned_monster_count, quota, state.goal.is_some())
    }

    /// Reports whether a monster, obstacle, or bonus occupies the cell.
    #[must_use]
    pub fn is_occupied(state: &GameState, position: Position) -> bool {
        state.obstacles.iter().any(|obstacle| obstacle.position() == position)
            || state.monsters.iter().any(|monster| monster.position() == position)
            || state.bonuses.iter().any(|bonus| bonus.position() == position)
    }
}
