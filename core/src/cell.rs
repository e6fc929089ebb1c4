use serde::{Deserialize, Serialize};

/// State of a single board cell.
///
/// `adjacent_mines` only carries meaning for cells without a mine; it is the exact number of mines among the up to 8
/// surrounding cells.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub is_mine: bool,
    pub is_revealed: bool,
    pub is_flagged: bool,
    pub adjacent_mines: u8,
}

impl Cell {
    /// Revealed and not a mine, counts towards the win condition.
    pub const fn is_revealed_safe(self) -> bool {
        self.is_revealed && !self.is_mine
    }

    /// Whether a reveal aimed at this cell would have any effect.
    pub const fn can_reveal(self) -> bool {
        !self.is_revealed && !self.is_flagged
    }

    /// Revealed empty cells spread the reveal to their neighbors.
    pub const fn opens_neighbors(self) -> bool {
        self.is_revealed && !self.is_mine && self.adjacent_mines == 0
    }
}
