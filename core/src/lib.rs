//! Board engine for a single-player mine deduction puzzle on a square grid.
//!
//! A [`GameSession`] owns the current [`Grid`] and routes reveal and flag actions to it while a
//! game is in progress. Boards are built by a [`BoardGenerator`], usually the seeded
//! [`RandomBoardGenerator`].
#![cfg_attr(not(test), no_std)]

extern crate alloc;

use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

pub use cell::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use session::*;
pub use types::*;

mod cell;
mod engine;
mod error;
mod generator;
mod grid;
mod session;
mod types;

/// Validated board dimensions: a `size` × `size` grid holding `mines` mines.
///
/// At least one cell is always left safe, so placing the mines terminates.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawConfig")]
pub struct GameConfig {
    size: Coord,
    mines: CellCount,
}

#[derive(Deserialize)]
struct RawConfig {
    size: Coord,
    mines: CellCount,
}

impl TryFrom<RawConfig> for GameConfig {
    type Error = GameError;

    fn try_from(raw: RawConfig) -> Result<Self> {
        Self::new(raw.size, raw.mines)
    }
}

impl GameConfig {
    pub(crate) const fn new_unchecked(size: Coord, mines: CellCount) -> Self {
        Self { size, mines }
    }

    pub fn new(size: Coord, mines: CellCount) -> Result<Self> {
        if size == 0 {
            return Err(GameError::EmptyBoard);
        }
        if mines >= mult(size, size) {
            return Err(GameError::TooManyMines);
        }
        Ok(Self::new_unchecked(size, mines))
    }

    pub const fn size(&self) -> Coord {
        self.size
    }

    pub const fn mines(&self) -> CellCount {
        self.mines
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size, self.size)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells() - self.mines
    }
}

impl From<Difficulty> for GameConfig {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.config()
    }
}

/// Board presets offered by the difficulty menu.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];

    pub const fn config(self) -> GameConfig {
        use Difficulty::*;
        match self {
            Easy => GameConfig::new_unchecked(8, 10),
            Medium => GameConfig::new_unchecked(12, 20),
            Hard => GameConfig::new_unchecked(16, 40),
        }
    }

    pub const fn name(self) -> &'static str {
        use Difficulty::*;
        match self {
            Easy => "easy",
            Medium => "medium",
            Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.name().eq_ignore_ascii_case(s.trim()))
            .ok_or(GameError::UnknownDifficulty)
    }
}

/// Outcome of toggling a flag
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    NoChange,
    Placed,
    Removed,
}

impl FlagOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }

    /// Change applied to the mines-left counter
    pub const fn counter_delta(self) -> i32 {
        match self {
            Self::NoChange => 0,
            Self::Placed => -1,
            Self::Removed => 1,
        }
    }
}

/// Outcome of revealing a cell
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    /// Cell was already revealed, flagged, out of bounds, or the game is not in progress
    NoChange,
    /// Safe cells were revealed and the game goes on
    Revealed,
    /// A mine was revealed, the game is lost
    HitMine,
    /// The last safe cell was revealed
    Won,
}

impl RevealOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }

    /// Whether this outcome ends the game
    pub const fn is_final(self) -> bool {
        matches!(self, Self::HitMine | Self::Won)
    }
}
