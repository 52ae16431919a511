//! Lookup of every level in the campaign by number.

use std::{borrow::Cow, ops::RangeInclusive};

use monster_steps_core::PlacementRules;
use rand::RngCore;

use crate::{final_countdown, ordinary, LevelError, LevelStart};

/// Number of the last, hand-authored level.
pub const FINAL_LEVEL: u32 = final_countdown::LEVEL_NUMBER;

/// Every playable level number, in campaign order.
#[must_use]
pub const fn level_numbers() -> RangeInclusive<u32> {
    1..=FINAL_LEVEL
}

/// Title of the level, or `None` when the number is outside the campaign.
#[must_use]
pub fn title(number: u32) -> Option<String> {
    if number == FINAL_LEVEL {
        Some(final_countdown::TITLE.to_owned())
    } else if level_numbers().contains(&number) {
        Some(ordinary::title_for(number))
    } else {
        None
    }
}

/// Builds the starting state of the requested level.
///
/// `rules` apply to every random placement the level makes, both while it is
/// laid out and while it runs.
///
/// # Errors
///
/// Returns [`LevelError::UnknownLevel`] for numbers outside the campaign and
/// [`LevelError::Layout`] when an ordinary level cannot be laid out.
pub fn generate(
    number: u32,
    rules: PlacementRules,
    rng: &mut dyn RngCore,
) -> Result<LevelStart, LevelError> {
    if number == FINAL_LEVEL {
        let (state, config, intro) = final_countdown::generate_level();
        return Ok(LevelStart {
            state,
            config: config.with_placement_rules(rules),
            intro: Cow::Borrowed(intro),
        });
    }

    if !level_numbers().contains(&number) {
        return Err(LevelError::UnknownLevel {
            number,
            last: FINAL_LEVEL,
        });
    }

    let (state, config, intro) = ordinary::generate_level(number, rules, rng)
        .map_err(|source| LevelError::Layout { number, source })?;
    Ok(LevelStart {
        state,
        config,
        intro: Cow::Owned(intro),
    })
}
