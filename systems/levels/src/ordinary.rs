//! Procedurally laid out levels driven by the periodic spawn tick.

use monster_steps_core::{GridSize, PlacementError, PlacementRules};
use monster_steps_system_placement::{sample_position, Constraints};
use monster_steps_system_spawning::{
    simple_level_updater, DYNAMIC_BONUS_POOL, SPAWN_INTERVAL_STEPS,
};
use monster_steps_world::{
    generate_base_config, generate_base_state, Bonus, GameState, LevelConfig, Obstacle,
};
use rand::{Rng, RngCore};

const BASE_GRID_SIDE: u32 = 8;
const BASE_OBSTACLES: u32 = 4;
const OBSTACLES_PER_LEVEL: u32 = 2;
const BONUS_EVERY_LEVELS: u32 = 4;
const LAYOUT_MIN_DISTANCE: u32 = 1;

/// Grid used by an ordinary level; later levels play on larger grids.
#[must_use]
pub const fn grid_size_for(number: u32) -> GridSize {
    GridSize::new(BASE_GRID_SIDE.saturating_add(number))
}

/// Title shown when an ordinary level starts.
#[must_use]
pub fn title_for(number: u32) -> String {
    format!("Level {number}")
}

/// Lays out an ordinary level.
///
/// Obstacles and bonuses are scattered with the shared placement rules, and
/// the exit is placed at least a grid side away from the player.
///
/// # Errors
///
/// Returns a [`PlacementError`] when the grid cannot fit the layout.
pub fn generate_level(
    number: u32,
    rules: PlacementRules,
    rng: &mut dyn RngCore,
) -> Result<(GameState, LevelConfig, String), PlacementError> {
    let grid_size = grid_size_for(number);
    let config = generate_base_config(
        grid_size,
        number,
        title_for(number),
        "Reach the exit before the monsters close in.",
        simple_level_updater,
    )
    .with_placement_rules(rules);

    let layout = Constraints::new(rules, LAYOUT_MIN_DISTANCE);
    let mut state = generate_base_state(grid_size).with_goal(None);

    let obstacle_count = OBSTACLES_PER_LEVEL
        .saturating_mul(number)
        .saturating_add(BASE_OBSTACLES);
    for _ in 0..obstacle_count {
        let position = sample_position(rng, &state, grid_size, &layout)?;
        state = state.with_obstacles([Obstacle::at(position)]);
    }

    for _ in 0..=number / BONUS_EVERY_LEVELS {
        let kind = DYNAMIC_BONUS_POOL[rng.gen_range(0..DYNAMIC_BONUS_POOL.len())];
        let position = sample_position(rng, &state, grid_size, &layout)?;
        state = state.with_bonuses([Bonus::at(position, kind)]);
    }

    let exit = Constraints::new(rules, grid_size.side());
    let goal = sample_position(rng, &state, grid_size, &exit)?;
    let state = state.with_goal(Some(goal));

    tracing::debug!(
        level = number,
        side = grid_size.side(),
        goal_x = goal.x(),
        goal_y = goal.y(),
        "ordinary level laid out"
    );

    let intro = format!(
        "Level {number}: a monster appears every {SPAWN_INTERVAL_STEPS} steps. \
         Find the exit before they corner you!"
    );
    Ok((state, config, intro))
}
