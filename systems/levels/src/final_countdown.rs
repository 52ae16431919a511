//! Level 13, "The Chaos Nexus".
//!
//! The exit is hidden at the start. Every thirteenth step a monster spawns
//! together with two bonuses, and once thirteen monsters have appeared the
//! exit is revealed far from the player with a hint pointing at it.

use monster_steps_core::{
    BonusType, Command, Event, GridSize, LevelPhase, PlacementError, Position,
};
use monster_steps_system_placement::{sample_position, Constraints};
use monster_steps_system_spawning::spawn_dynamic_bonus;
use monster_steps_world::{
    apply, generate_base_config, generate_base_state, query, Bonus, GameState, LevelConfig,
    Obstacle, Player,
};
use rand::RngCore;

/// Position of this level within the campaign.
pub const LEVEL_NUMBER: u32 = 13;
/// Minimum Manhattan distance between the player and any spawned monster or the exit.
pub const MIN_DISTANCE_FROM_PLAYER: u32 = 5;
/// Monsters that must spawn before the exit is revealed.
pub const REQUIRED_MONSTER_COUNT: u32 = 13;
/// Steps between two monster spawns.
pub const SPAWN_CADENCE: u64 = 13;
/// Name shown when the level starts.
pub const TITLE: &str = "The Chaos Nexus";
/// Text of the hint pointing at the revealed exit.
pub const GOAL_HINT: &str = "A path to victory has emerged!";

const GRID_SIZE: GridSize = GridSize::new(18);
const BONUSES_PER_SPAWN: usize = 2;
const DESCRIPTION: &str = "Survive the chaos and uncover the true path to victory!";
const INTRO_TEXT: &str = "Welcome to the Chaos Nexus! The path forward is shrouded in mystery. \
    As chaos grows, so does the chance of escape. \
    Remember, in this realm, 13 is not just an unlucky number - it might be your salvation. \
    Can you decipher the true nature of this challenge and find your way out?";

/// Hand-placed obstacles: an L-shaped cluster near each corner and a short diagonal in the centre.
pub const PREDEFINED_OBSTACLES: [Position; 15] = [
    Position::new(4, 4),
    Position::new(4, 5),
    Position::new(5, 4),
    Position::new(13, 13),
    Position::new(13, 14),
    Position::new(14, 13),
    Position::new(4, 13),
    Position::new(5, 13),
    Position::new(4, 14),
    Position::new(13, 4),
    Position::new(14, 4),
    Position::new(13, 5),
    Position::new(8, 8),
    Position::new(9, 9),
    Position::new(10, 10),
];

/// Hand-placed bonuses available from the first step.
pub const PREDEFINED_BONUSES: [(Position, BonusType); 8] = [
    (Position::new(2, 2), BonusType::CapOfInvisibility),
    (Position::new(15, 15), BonusType::Blaster),
    (Position::new(2, 15), BonusType::TimeBomb),
    (Position::new(15, 2), BonusType::Crusher),
    (Position::new(9, 0), BonusType::Teleport),
    (Position::new(0, 9), BonusType::Teleport),
    (Position::new(17, 9), BonusType::Slide),
    (Position::new(9, 17), BonusType::LandMine),
];

/// Builds the initial state, configuration and intro text of the level.
#[must_use]
pub fn generate_level() -> (GameState, LevelConfig, &'static str) {
    let config = generate_base_config(
        GRID_SIZE,
        LEVEL_NUMBER,
        TITLE,
        DESCRIPTION,
        update_dynamic_level,
    );

    let state = generate_base_state(GRID_SIZE)
        .with_goal(None)
        .with_player(Player::at(Position::origin()))
        .with_obstacles(PREDEFINED_OBSTACLES.into_iter().map(Obstacle::at))
        .with_bonuses(
            PREDEFINED_BONUSES
                .into_iter()
                .map(|(position, kind)| Bonus::at(position, kind)),
        );

    (state, config, INTRO_TEXT)
}

/// Per-step updater driving the level's spawns and the exit reveal.
///
/// Both the last spawn and the reveal may happen within the same call.
///
/// # Errors
///
/// Returns a [`PlacementError`] when no cell satisfies the placement
/// constraints for a monster or the exit.
pub fn update_dynamic_level(
    state: &mut GameState,
    level: &LevelConfig,
    rng: &mut dyn RngCore,
    out_events: &mut Vec<Event>,
) -> Result<(), PlacementError> {
    let phase = match query::phase(state, REQUIRED_MONSTER_COUNT) {
        LevelPhase::Spawning { .. } if query::steps(state) % SPAWN_CADENCE == 0 => {
            spawn_wave(state, level, rng, out_events)?;
            query::phase(state, REQUIRED_MONSTER_COUNT)
        }
        phase => phase,
    };

    if phase == LevelPhase::RevealPending {
        reveal_goal(state, level, rng, out_events)?;
    }

    Ok(())
}

fn spawn_wave(
    state: &mut GameState,
    level: &LevelConfig,
    rng: &mut dyn RngCore,
    out_events: &mut Vec<Event>,
) -> Result<(), PlacementError> {
    let constraints = Constraints::new(level.placement(), MIN_DISTANCE_FROM_PLAYER);
    let position = sample_position(rng, state, level.grid_size(), &constraints)?;
    apply(state, Command::SpawnMonster { position }, out_events);

    for _ in 0..BONUSES_PER_SPAWN {
        spawn_dynamic_bonus(state, level, rng, out_events);
    }

    apply(state, Command::RecordMonsterSpawn, out_events);
    tracing::debug!(
        spawned = query::spawned_monster_count(state),
        quota = REQUIRED_MONSTER_COUNT,
        "chaos nexus spawned a monster"
    );
    Ok(())
}

fn reveal_goal(
    state: &mut GameState,
    level: &LevelConfig,
    rng: &mut dyn RngCore,
    out_events: &mut Vec<Event>,
) -> Result<(), PlacementError> {
    let constraints = Constraints::new(level.placement(), MIN_DISTANCE_FROM_PLAYER);
    let position = sample_position(rng, state, level.grid_size(), &constraints)?;
    apply(
        state,
        Command::RevealGoal {
            position,
            tooltip: GOAL_HINT.to_owned(),
        },
        out_events,
    );
    tracing::info!(x = position.x(), y = position.y(), "chaos nexus exit revealed");
    Ok(())
}
