#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Step-driven spawning system responsible for monster and bonus drops.

use monster_steps_core::{BonusType, Command, Event, PlacementError, Position, SoundEffect};
use monster_steps_system_placement::{sample_position, Constraints};
use monster_steps_world::{apply, query, GameState, LevelConfig};
use rand::{Rng, RngCore};

/// Steps that must elapse between two periodic monster spawns.
pub const SPAWN_INTERVAL_STEPS: u32 = 13;

/// Minimum Manhattan distance between the player and a periodically spawned monster.
pub const MONSTER_MIN_DISTANCE: u32 = 3;

const BONUS_MIN_DISTANCE: u32 = 1;

/// Bonus kinds that may drop onto the grid while a level is running.
pub const DYNAMIC_BONUS_POOL: [BonusType; 12] = [
    BonusType::CapOfInvisibility,
    BonusType::ConfusedMonsters,
    BonusType::Blaster,
    BonusType::TimeBomb,
    BonusType::Crusher,
    BonusType::Teleport,
    BonusType::Slide,
    BonusType::LandMine,
    BonusType::Builder,
    BonusType::Climber,
    BonusType::Tsunami,
    BonusType::Sokoban,
];

/// Spawns one monster once the countdown reaches [`SPAWN_INTERVAL_STEPS`].
///
/// The `spawn` factory picks the cell; when it yields `None` the state is
/// left untouched so the attempt repeats on the next step. Returns whether a
/// monster was spawned.
pub fn tick<F>(
    state: &mut GameState,
    level: &LevelConfig,
    mut spawn: F,
    out_events: &mut Vec<Event>,
) -> bool
where
    F: FnMut(&GameState, &LevelConfig) -> Option<Position>,
{
    if query::monster_spawn_steps(state) < SPAWN_INTERVAL_STEPS {
        return false;
    }

    let Some(position) = spawn(state, level) else {
        tracing::debug!(
            step = query::steps(state),
            "no cell available for periodic monster spawn"
        );
        return false;
    };

    apply(state, Command::SpawnMonster { position }, out_events);
    apply(state, Command::ResetSpawnCountdown, out_events);
    apply(
        state,
        Command::PlaySound {
            effect: SoundEffect::MonsterSpawn,
        },
        out_events,
    );
    apply(state, Command::RecordMonsterSpawn, out_events);
    true
}

/// Picks a free cell for a new monster away from the player.
///
/// Returns `None` when the grid has no acceptable cell left.
pub fn spawn_monster(
    state: &GameState,
    level: &LevelConfig,
    rng: &mut dyn RngCore,
) -> Option<Position> {
    let constraints = Constraints::new(level.placement(), MONSTER_MIN_DISTANCE);
    match sample_position(rng, state, level.grid_size(), &constraints) {
        Ok(position) => Some(position),
        Err(error) => {
            tracing::warn!(%error, "monster spawn skipped");
            None
        }
    }
}

/// Level updater used by ordinary levels: periodic monster spawns only.
///
/// A full grid never fails the step; the spawn is retried on the next one.
pub fn simple_level_updater(
    state: &mut GameState,
    level: &LevelConfig,
    rng: &mut dyn RngCore,
    out_events: &mut Vec<Event>,
) -> Result<(), PlacementError> {
    let _ = tick(
        state,
        level,
        |state, level| spawn_monster(state, level, rng),
        out_events,
    );
    Ok(())
}

/// Drops a random bonus from [`DYNAMIC_BONUS_POOL`] onto a free cell.
///
/// Nothing happens when the grid has no free cell left.
pub fn spawn_dynamic_bonus(
    state: &mut GameState,
    level: &LevelConfig,
    rng: &mut dyn RngCore,
    out_events: &mut Vec<Event>,
) {
    let kind = DYNAMIC_BONUS_POOL[rng.gen_range(0..DYNAMIC_BONUS_POOL.len())];
    let constraints = Constraints::new(level.placement(), BONUS_MIN_DISTANCE);
    match sample_position(rng, state, level.grid_size(), &constraints) {
        Ok(position) => {
            apply(state, Command::PlaceBonus { position, kind }, out_events);
            apply(
                state,
                Command::PlaySound {
                    effect: SoundEffect::BonusSpawn,
                },
                out_events,
            );
        }
        Err(error) => {
            tracing::debug!(%error, ?kind, "dynamic bonus skipped");
        }
    }
}
