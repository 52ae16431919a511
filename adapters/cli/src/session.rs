//! Step loop driving a level from its starting state.

use std::{borrow::Cow, fmt};

use anyhow::{Context, Result};
use monster_steps_core::{Command, Event, Position, SoundEffect};
use monster_steps_system_levels::catalog;
use monster_steps_world::{apply, query, GameState, LevelConfig};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::RunConfig;

/// Owns the state of the level being played and the random source feeding it.
#[derive(Debug)]
pub(crate) struct Session {
    state: GameState,
    config: LevelConfig,
    rng: ChaCha8Rng,
    intro: Cow<'static, str>,
}

impl Session {
    /// Generates the configured level from the configured seed.
    pub(crate) fn start(run: &RunConfig) -> Result<Self> {
        let mut rng = ChaCha8Rng::seed_from_u64(run.seed);
        let start = catalog::generate(run.level, run.rules(), &mut rng)
            .with_context(|| format!("failed to start level {}", run.level))?;
        tracing::info!(
            level = start.config.level_number(),
            title = start.config.title(),
            side = start.config.grid_size().side(),
            seed = run.seed,
            "level started"
        );
        Ok(Self {
            state: start.state,
            config: start.config,
            rng,
            intro: start.intro,
        })
    }

    pub(crate) fn intro(&self) -> &str {
        &self.intro
    }

    /// Advances the level `steps` times and summarises the outcome.
    pub(crate) fn run(mut self, steps: u64) -> Result<Summary> {
        let mut sounds = SoundTally::default();
        let mut goal_revealed_at = None;
        let mut events = Vec::new();

        for _ in 0..steps {
            events.clear();
            apply(&mut self.state, Command::AdvanceStep, &mut events);
            self.config
                .update(&mut self.state, &mut self.rng, &mut events)
                .with_context(|| {
                    format!(
                        "level {} stalled at step {}",
                        self.config.level_number(),
                        query::steps(&self.state)
                    )
                })?;

            for event in &events {
                match event {
                    Event::SoundRequested { effect } => sounds.record(*effect),
                    Event::GoalRevealed { position } => {
                        goal_revealed_at = Some(query::steps(&self.state));
                        tracing::info!(x = position.x(), y = position.y(), "exit revealed");
                    }
                    Event::MonsterSpawned { position } => {
                        tracing::debug!(x = position.x(), y = position.y(), "monster spawned");
                    }
                    _ => {}
                }
            }
        }

        Ok(Summary {
            level: self.config.level_number(),
            title: self.config.title().to_owned(),
            steps: query::steps(&self.state),
            monsters: query::monsters(&self.state).len(),
            bonuses: query::bonuses(&self.state).len(),
            goal: query::goal(&self.state),
            goal_revealed_at,
            sounds,
        })
    }
}

/// Number of sound cues requested during a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct SoundTally {
    monster_spawn: u32,
    bonus_spawn: u32,
}

impl SoundTally {
    fn record(&mut self, effect: SoundEffect) {
        match effect {
            SoundEffect::MonsterSpawn => {
                self.monster_spawn = self.monster_spawn.saturating_add(1);
            }
            SoundEffect::BonusSpawn => self.bonus_spawn = self.bonus_spawn.saturating_add(1),
        }
    }
}

/// Outcome of a run, printed once the loop ends.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Summary {
    level: u32,
    title: String,
    steps: u64,
    monsters: usize,
    bonuses: usize,
    goal: Option<Position>,
    goal_revealed_at: Option<u64>,
    sounds: SoundTally,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "level {} \"{}\" after {} steps",
            self.level, self.title, self.steps
        )?;
        writeln!(f, "monsters: {}", self.monsters)?;
        writeln!(f, "bonuses on grid: {}", self.bonuses)?;
        match (self.goal, self.goal_revealed_at) {
            (Some(goal), Some(step)) => writeln!(
                f,
                "goal: ({}, {}) revealed at step {step}",
                goal.x(),
                goal.y()
            )?,
            (Some(goal), None) => writeln!(f, "goal: ({}, {})", goal.x(), goal.y())?,
            (None, _) => writeln!(f, "goal: hidden")?,
        }
        write!(
            f,
            "sounds: {} monster spawn, {} bonus spawn",
            self.sounds.monster_spawn, self.sounds.bonus_spawn
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(level: u32, seed: u64, steps: u64) -> RunConfig {
        RunConfig {
            seed,
            steps,
            level,
            ..RunConfig::default()
        }
    }

    #[test]
    fn final_level_reveals_exit_after_thirteen_waves() {
        let session = Session::start(&config(13, 5, 200)).expect("level starts");
        assert!(session.intro().contains("Chaos Nexus"));

        let summary = session.run(200).expect("grid has room");

        assert_eq!(summary.steps, 200);
        assert_eq!(summary.monsters, 13);
        assert_eq!(summary.bonuses, 8 + 26);
        assert_eq!(summary.goal_revealed_at, Some(169));
        assert_eq!(
            summary.sounds,
            SoundTally {
                monster_spawn: 0,
                bonus_spawn: 26,
            }
        );
        assert!(summary.to_string().contains("revealed at step 169"));
    }

    #[test]
    fn ordinary_level_spawns_on_the_interval() {
        let session = Session::start(&config(2, 9, 130)).expect("level starts");

        let summary = session.run(130).expect("grid has room");

        assert_eq!(summary.monsters, 10);
        assert_eq!(summary.sounds.monster_spawn, 10);
        assert!(summary.goal.is_some());
        assert_eq!(summary.goal_revealed_at, None);
    }

    #[test]
    fn same_seed_replays_identically() {
        let run = |seed| {
            let mut session = Session::start(&config(13, seed, 0)).expect("level starts");
            let mut events = Vec::new();
            for _ in 0..180 {
                apply(&mut session.state, Command::AdvanceStep, &mut events);
                session
                    .config
                    .update(&mut session.state, &mut session.rng, &mut events)
                    .expect("grid has room");
            }
            (session.state, events)
        };

        assert_eq!(run(21), run(21));
    }

    #[test]
    fn unknown_level_fails_with_context() {
        let error = Session::start(&config(14, 0, 10)).expect_err("no level 14");
        let message = format!("{error:#}");
        assert!(message.contains("failed to start level 14"));
        assert!(message.contains("levels run from 1 to 13"));
    }
}
