use monster_steps_core::{
    ActiveBonus, BonusType, Command, Event, LevelPhase, PlacementError, PlacementRules,
    PlayerExclusion, Position,
};
use monster_steps_system_levels::final_countdown::{
    generate_level, update_dynamic_level, GOAL_HINT, MIN_DISTANCE_FROM_PLAYER,
    PREDEFINED_BONUSES, PREDEFINED_OBSTACLES, REQUIRED_MONSTER_COUNT, SPAWN_CADENCE,
};
use monster_steps_system_placement::is_position_valid;
use monster_steps_world::{self as world, query, GameState, Monster, Obstacle};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn apply_repeated(state: &mut GameState, command: Command, times: u64) {
    let mut events = Vec::new();
    for _ in 0..times {
        world::apply(state, command.clone(), &mut events);
    }
}

#[test]
fn generate_level_places_literal_layout() {
    let (state, config, intro) = generate_level();

    assert_eq!(config.grid_size().side(), 18);
    assert_eq!(config.level_number(), 13);
    assert_eq!(config.title(), "The Chaos Nexus");
    assert_eq!(query::player(&state).position(), Position::origin());
    assert_eq!(query::goal(&state), None);
    assert!(query::monsters(&state).is_empty());
    assert!(query::active_bonuses(&state).is_empty());
    assert!(intro.starts_with("Welcome to the Chaos Nexus!"));

    let obstacles: Vec<Position> = query::obstacles(&state)
        .iter()
        .map(Obstacle::position)
        .collect();
    assert_eq!(obstacles.len(), 15);
    assert_eq!(obstacles, PREDEFINED_OBSTACLES.to_vec());
    assert!(obstacles.contains(&Position::new(13, 14)));
    assert!(obstacles.contains(&Position::new(10, 10)));

    let bonuses: Vec<(Position, BonusType)> = query::bonuses(&state)
        .iter()
        .map(|bonus| (bonus.position(), bonus.kind()))
        .collect();
    assert_eq!(bonuses.len(), 8);
    assert_eq!(bonuses, PREDEFINED_BONUSES.to_vec());
    assert_eq!(bonuses[0], (Position::new(2, 2), BonusType::CapOfInvisibility));
    assert_eq!(bonuses[7], (Position::new(9, 17), BonusType::LandMine));
}

#[test]
fn thirteenth_step_spawns_exactly_one_monster() {
    let (mut state, config, _) = generate_level();
    apply_repeated(&mut state, Command::AdvanceStep, SPAWN_CADENCE);
    let mut rng = ChaCha8Rng::seed_from_u64(13);
    let mut events = Vec::new();

    update_dynamic_level(&mut state, &config, &mut rng, &mut events).expect("room to spawn");

    assert_eq!(query::monsters(&state).len(), 1);
    assert_eq!(query::spawned_monster_count(&state), 1);
    assert_eq!(query::bonuses(&state).len(), PREDEFINED_BONUSES.len() + 2);
    assert_eq!(query::goal(&state), None);

    let monster = query::monsters(&state)[0].position();
    let player = query::player(&state).position();
    assert!(monster.manhattan_distance(player) >= MIN_DISTANCE_FROM_PLAYER);
    assert!(monster.x() != player.x() && monster.y() != player.y());
    assert!(!PREDEFINED_OBSTACLES.contains(&monster));
}

#[test]
fn spawned_monster_avoids_cells_occupied_before_the_call() {
    let (mut state, config, _) = generate_level();
    apply_repeated(&mut state, Command::AdvanceStep, SPAWN_CADENCE);
    let before = state.clone();

    for seed in 0..24 {
        let mut state = before.clone();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut events = Vec::new();
        update_dynamic_level(&mut state, &config, &mut rng, &mut events).expect("room to spawn");

        let monster = query::monsters(&state)[0].position();
        assert!(
            is_position_valid(monster, &before, PlayerExclusion::RowAndColumn),
            "seed {seed} placed monster on {monster:?}"
        );
    }
}

#[test]
fn off_cadence_step_does_not_spawn() {
    let (mut state, config, _) = generate_level();
    apply_repeated(&mut state, Command::AdvanceStep, SPAWN_CADENCE + 1);
    let before = state.clone();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut events = Vec::new();

    update_dynamic_level(&mut state, &config, &mut rng, &mut events).expect("no-op");

    assert_eq!(state, before);
    assert!(events.is_empty());
}

#[test]
fn quota_reached_reveals_goal_with_single_hint() {
    let (mut state, config, _) = generate_level();
    apply_repeated(&mut state, Command::RecordMonsterSpawn, u64::from(REQUIRED_MONSTER_COUNT));
    apply_repeated(&mut state, Command::AdvanceStep, 1);
    assert_eq!(query::phase(&state, REQUIRED_MONSTER_COUNT), LevelPhase::RevealPending);
    let mut rng = ChaCha8Rng::seed_from_u64(77);
    let mut events = Vec::new();

    update_dynamic_level(&mut state, &config, &mut rng, &mut events).expect("room for exit");

    let goal = query::goal(&state).expect("goal revealed");
    let player = query::player(&state).position();
    assert!(config.grid_size().contains(goal));
    assert!(goal.manhattan_distance(player) >= MIN_DISTANCE_FROM_PLAYER);
    assert_eq!(
        query::active_bonuses(&state),
        &[ActiveBonus::hint(GOAL_HINT, goal)]
    );
    assert_eq!(events, vec![Event::GoalRevealed { position: goal }]);
    assert!(query::monsters(&state).is_empty());
}

#[test]
fn revealed_goal_makes_updater_a_no_op() {
    let (mut state, config, _) = generate_level();
    let mut events = Vec::new();
    world::apply(
        &mut state,
        Command::RevealGoal {
            position: Position::new(16, 16),
            tooltip: GOAL_HINT.to_owned(),
        },
        &mut events,
    );
    apply_repeated(&mut state, Command::AdvanceStep, 20);
    let before = state.clone();
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    let mut events = Vec::new();

    update_dynamic_level(&mut state, &config, &mut rng, &mut events).expect("no-op");

    assert_eq!(query::monsters(&state), query::monsters(&before));
    assert_eq!(query::goal(&state), Some(Position::new(16, 16)));
    assert_eq!(query::active_bonuses(&state), query::active_bonuses(&before));
    assert!(events.is_empty());
}

#[test]
fn full_run_reveals_goal_on_last_spawn_step() {
    let (mut state, config, _) = generate_level();
    let mut rng = ChaCha8Rng::seed_from_u64(0x13);
    let last_spawn_step = SPAWN_CADENCE * u64::from(REQUIRED_MONSTER_COUNT);
    let mut revealed_at = None;

    for _ in 0..last_spawn_step + 50 {
        let mut events = Vec::new();
        world::apply(&mut state, Command::AdvanceStep, &mut events);
        config
            .update(&mut state, &mut rng, &mut events)
            .expect("grid has room");
        if events
            .iter()
            .any(|event| matches!(event, Event::GoalRevealed { .. }))
        {
            assert_eq!(revealed_at, None, "goal revealed twice");
            revealed_at = Some(query::steps(&state));
        }
    }

    assert_eq!(revealed_at, Some(last_spawn_step));
    assert_eq!(query::monsters(&state).len(), REQUIRED_MONSTER_COUNT as usize);
    assert_eq!(query::spawned_monster_count(&state), REQUIRED_MONSTER_COUNT);
    assert_eq!(query::active_bonuses(&state).len(), 1);
    assert_eq!(
        query::bonuses(&state).len(),
        PREDEFINED_BONUSES.len() + 2 * REQUIRED_MONSTER_COUNT as usize
    );
    assert_eq!(query::phase(&state, REQUIRED_MONSTER_COUNT), LevelPhase::GoalActive);
}

#[test]
fn saturated_grid_reports_placement_error() {
    let (state, config, _) = generate_level();
    let grid = config.grid_size();
    let mut state = state.with_obstacles(grid.cells().map(Obstacle::at));
    apply_repeated(&mut state, Command::AdvanceStep, SPAWN_CADENCE);
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    let mut events = Vec::new();

    let result = update_dynamic_level(&mut state, &config, &mut rng, &mut events);

    assert!(matches!(result, Err(PlacementError::NoValidPosition { .. })));
    assert!(query::monsters(&state).is_empty());
}

#[test]
fn cell_exclusion_allows_spawns_in_player_row() {
    let (state, config, _) = generate_level();
    let config = config.with_placement_rules(PlacementRules::new(PlayerExclusion::Cell, None));
    let grid = config.grid_size();
    let player_row = Position::new(6, 0);
    let mut state = state.with_obstacles(
        grid.cells()
            .filter(|cell| *cell != player_row && *cell != Position::origin())
            .map(Obstacle::at),
    );
    apply_repeated(&mut state, Command::AdvanceStep, SPAWN_CADENCE);
    let mut rng = ChaCha8Rng::seed_from_u64(6);
    let mut events = Vec::new();

    update_dynamic_level(&mut state, &config, &mut rng, &mut events).expect("one cell left");

    assert_eq!(query::monsters(&state), &[Monster::at(player_row)]);
}
