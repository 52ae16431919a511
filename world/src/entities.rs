//! Entities stored inside the authoritative game state.

use monster_steps_core::{BonusType, Position};

/// The character controlled by the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Player {
    position: Position,
}

impl Player {
    /// Creates a player standing on the provided cell.
    #[must_use]
    pub const fn at(position: Position) -> Self {
        Self { position }
    }

    /// Cell the player stands on.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }
}

/// A monster roaming the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Monster {
    position: Position,
}

impl Monster {
    /// Creates a monster on the provided cell.
    #[must_use]
    pub const fn at(position: Position) -> Self {
        Self { position }
    }

    /// Cell the monster occupies.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }
}

/// An impassable cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Obstacle {
    position: Position,
}

impl Obstacle {
    /// Creates an obstacle on the provided cell.
    #[must_use]
    pub const fn at(position: Position) -> Self {
        Self { position }
    }

    /// Cell the obstacle blocks.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }
}

/// A collectible bonus waiting on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Bonus {
    position: Position,
    kind: BonusType,
}

impl Bonus {
    /// Creates a bonus of the given kind on the provided cell.
    #[must_use]
    pub const fn at(position: Position, kind: BonusType) -> Self {
        Self { position, kind }
    }

    /// Cell the bonus lies on.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Effect granted when the bonus is collected.
    #[must_use]
    pub const fn kind(&self) -> BonusType {
        self.kind
    }
}
