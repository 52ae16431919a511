use monster_steps_core::{BonusType, PlacementRules, PlayerExclusion, Position};
use monster_steps_system_levels::{
    catalog::{self, FINAL_LEVEL},
    final_countdown, ordinary, LevelError,
};
use monster_steps_world::query;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[test]
fn campaign_ends_with_the_chaos_nexus() {
    assert_eq!(FINAL_LEVEL, 13);
    assert_eq!(catalog::level_numbers().count(), 13);
    assert_eq!(catalog::title(13).as_deref(), Some("The Chaos Nexus"));
    assert_eq!(catalog::title(1).as_deref(), Some("Level 1"));
    assert_eq!(catalog::title(0), None);
    assert_eq!(catalog::title(14), None);
}

#[test]
fn unknown_levels_are_rejected() {
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    for number in [0, 14, u32::MAX] {
        let error = catalog::generate(number, PlacementRules::default(), &mut rng)
            .expect_err("outside the campaign");
        assert_eq!(error, LevelError::UnknownLevel { number, last: 13 });
    }
}

#[test]
fn final_level_keeps_requested_rules() {
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let rules = PlacementRules::new(PlayerExclusion::Cell, Some(40));

    let start = catalog::generate(FINAL_LEVEL, rules, &mut rng).expect("final level");

    assert_eq!(start.config.placement(), rules);
    assert_eq!(start.config.title(), final_countdown::TITLE);
    assert_eq!(query::goal(&start.state), None);
    assert_eq!(query::obstacles(&start.state).len(), 15);
}

#[test]
fn ordinary_levels_lay_out_a_reachable_exit() {
    for number in 1..FINAL_LEVEL {
        let mut rng = ChaCha8Rng::seed_from_u64(u64::from(number));
        let start = catalog::generate(number, PlacementRules::default(), &mut rng)
            .unwrap_or_else(|error| panic!("level {number}: {error}"));
        let grid = ordinary::grid_size_for(number);

        assert_eq!(start.config.grid_size(), grid);
        assert_eq!(start.config.level_number(), number);
        assert_eq!(query::player(&start.state).position(), Position::origin());
        assert_eq!(
            query::obstacles(&start.state).len(),
            (4 + 2 * number) as usize
        );
        assert_eq!(
            query::bonuses(&start.state).len(),
            (number / 4 + 1) as usize
        );
        assert!(query::bonuses(&start.state)
            .iter()
            .all(|bonus| bonus.kind() != BonusType::Hint));

        let goal = query::goal(&start.state).expect("ordinary levels start with an exit");
        assert!(grid.contains(goal));
        assert!(goal.manhattan_distance(Position::origin()) >= grid.side());
        assert!(!query::is_occupied(&start.state, goal));
        assert!(start.intro.contains("every 13 steps"));
    }
}

#[test]
fn ordinary_layout_is_reproducible_from_seed() {
    let generate = |seed| {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        catalog::generate(5, PlacementRules::default(), &mut rng).expect("level 5")
    };

    let first = generate(99);
    let second = generate(99);

    assert_eq!(first.state, second.state);
}
