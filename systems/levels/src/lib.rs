#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Level generators for Monster Steps.
//!
//! Each level produces its initial [`GameState`], an immutable
//! [`LevelConfig`] carrying the per-step updater, and the intro text shown
//! once when the level starts.

use std::borrow::Cow;

use monster_steps_core::PlacementError;
use monster_steps_world::{GameState, LevelConfig};
use thiserror::Error;

pub mod catalog;
pub mod final_countdown;
pub mod ordinary;

/// Everything needed to start playing a level.
#[derive(Clone, Debug)]
pub struct LevelStart {
    /// Initial state of the level.
    pub state: GameState,
    /// Fixed parameters and updater of the level.
    pub config: LevelConfig,
    /// Narrative shown once before the first step.
    pub intro: Cow<'static, str>,
}

/// Reasons a level cannot be started.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum LevelError {
    /// The requested level is not part of the campaign.
    #[error("level {number} does not exist, levels run from 1 to {last}")]
    UnknownLevel {
        /// Requested level number.
        number: u32,
        /// Number of the last level.
        last: u32,
    },
    /// The level layout could not be placed on its grid.
    #[error("failed to lay out level {number}")]
    Layout {
        /// Level being laid out.
        number: u32,
        /// Placement failure that stopped the layout.
        #[source]
        source: PlacementError,
    },
}
