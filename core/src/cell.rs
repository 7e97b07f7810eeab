use serde::{Deserialize, Serialize};

/// One grid position.
///
/// Fields are only mutated by the board generator and the reveal/flag entry points, which keep
/// `flagged` and `revealed` mutually exclusive.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub(crate) mine: bool,
    pub(crate) revealed: bool,
    pub(crate) flagged: bool,
    pub(crate) adjacent_mines: u8,
}

impl Cell {
    pub const fn is_mine(self) -> bool {
        self.mine
    }

    pub const fn is_revealed(self) -> bool {
        self.revealed
    }

    pub const fn is_flagged(self) -> bool {
        self.flagged
    }

    /// Number of mines in the Moore neighbourhood, only meaningful for safe cells.
    pub const fn adjacent_mines(self) -> u8 {
        self.adjacent_mines
    }

    /// Neither revealed nor flagged
    pub const fn is_hidden(self) -> bool {
        !self.revealed && !self.flagged
    }

    pub const fn visible(self) -> VisibleCell {
        match (self.revealed, self.flagged, self.mine) {
            (true, _, true) => VisibleCell::Mine,
            (true, _, false) => VisibleCell::Revealed(self.adjacent_mines),
            (false, true, _) => VisibleCell::Flagged,
            (false, false, _) => VisibleCell::Hidden,
        }
    }
}

/// What a player is allowed to see of a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisibleCell {
    Hidden,
    Flagged,
    Revealed(u8),
    /// A revealed mine, only the one that ended the game
    Mine,
}

impl VisibleCell {
    pub const fn is_unrevealed(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged)
    }
}
