#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Random placement of entities on the level grid.
//!
//! Candidates are drawn uniformly from the grid and checked against the
//! current state. Every search is bounded: once the attempt budget is spent
//! the sampler scans the grid for the remaining free cells and picks one of
//! them, reporting [`PlacementError::NoValidPosition`] only when none exist.

use monster_steps_core::{GridSize, PlacementError, PlacementRules, PlayerExclusion, Position};
use monster_steps_world::{query, GameState};
use rand::{Rng, RngCore};

const ATTEMPTS_PER_CELL: u64 = 4;

/// Draws a position with each coordinate uniform in `[0, side)`.
///
/// Occupied cells are not excluded. A zero-sized grid degenerates to the
/// origin.
pub fn random_position(rng: &mut dyn RngCore, grid_size: GridSize) -> Position {
    let side = grid_size.side().max(1);
    let x = rng.gen_range(0..side);
    let y = rng.gen_range(0..side);
    Position::new(x, y)
}

/// Manhattan distance between two cells.
#[must_use]
pub fn distance_between(first: Position, second: Position) -> u32 {
    first.manhattan_distance(second)
}

/// Reports whether the cell is free of obstacles, monsters and bonuses and is
/// not excluded by the player rule.
#[must_use]
pub fn is_position_valid(
    position: Position,
    state: &GameState,
    player_exclusion: PlayerExclusion,
) -> bool {
    let player = query::player(state).position();
    !query::is_occupied(state, position) && !player_exclusion.excludes(player, position)
}

/// Requirements a sampled cell must satisfy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Constraints {
    player_exclusion: PlayerExclusion,
    min_player_distance: u32,
    max_attempts: Option<u32>,
}

impl Constraints {
    /// Creates constraints from the level's placement rules and a minimum
    /// Manhattan distance from the player.
    #[must_use]
    pub const fn new(rules: PlacementRules, min_player_distance: u32) -> Self {
        Self {
            player_exclusion: rules.player_exclusion(),
            min_player_distance,
            max_attempts: rules.max_attempts(),
        }
    }

    /// Minimum Manhattan distance required between the cell and the player.
    #[must_use]
    pub const fn min_player_distance(&self) -> u32 {
        self.min_player_distance
    }

    /// Reports whether the cell satisfies every requirement.
    #[must_use]
    pub fn accepts(&self, position: Position, state: &GameState) -> bool {
        let player = query::player(state).position();
        is_position_valid(position, state, self.player_exclusion)
            && distance_between(position, player) >= self.min_player_distance
    }

    fn attempt_budget(&self, grid_size: GridSize) -> u32 {
        self.max_attempts.unwrap_or_else(|| {
            let attempts = grid_size.cell_count().saturating_mul(ATTEMPTS_PER_CELL);
            u32::try_from(attempts).unwrap_or(u32::MAX)
        })
    }
}

/// Collects every in-bounds cell accepted by the constraints, in row-major order.
#[must_use]
pub fn free_cells(
    state: &GameState,
    grid_size: GridSize,
    constraints: &Constraints,
) -> Vec<Position> {
    grid_size
        .cells()
        .filter(|cell| constraints.accepts(*cell, state))
        .collect()
}

/// Samples a cell satisfying the constraints.
///
/// # Errors
///
/// Returns [`PlacementError::EmptyGrid`] for a zero-sized grid and
/// [`PlacementError::NoValidPosition`] when no cell satisfies the constraints.
pub fn sample_position(
    rng: &mut dyn RngCore,
    state: &GameState,
    grid_size: GridSize,
    constraints: &Constraints,
) -> Result<Position, PlacementError> {
    if grid_size.is_empty() {
        return Err(PlacementError::EmptyGrid);
    }

    let attempts = constraints.attempt_budget(grid_size);
    for _ in 0..attempts {
        let candidate = random_position(rng, grid_size);
        if constraints.accepts(candidate, state) {
            return Ok(candidate);
        }
    }

    let free = free_cells(state, grid_size, constraints);
    if free.is_empty() {
        tracing::warn!(attempts, "no free cell left on the grid");
        return Err(PlacementError::NoValidPosition { attempts });
    }

    tracing::debug!(
        attempts,
        free = free.len(),
        "rejection sampling exhausted, picking from grid scan"
    );
    let index = rng.gen_range(0..free.len());
    Ok(free[index])
}
