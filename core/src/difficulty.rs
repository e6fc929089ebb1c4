use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::*;

/// Cells kept clear around the first click: the click itself and its 8 neighbors.
pub const SAFE_AREA: CellCount = 9;

/// Named presets offered to the player.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Board setup for each [`Difficulty`], indexed by its discriminant.
pub const DIFFICULTY_CONFIGS: [DifficultyConfig; 3] = [
    DifficultyConfig::new_unchecked(8, 8, 10),
    DifficultyConfig::new_unchecked(12, 12, 25),
    DifficultyConfig::new_unchecked(16, 16, 50),
];

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];

    pub const fn config(self) -> DifficultyConfig {
        DIFFICULTY_CONFIGS[self as usize]
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Easy
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
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| GameError::UnknownDifficulty(name.to_string()))
    }
}

/// Board dimensions and mine count for one game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyConfig {
    pub rows: Coord,
    pub cols: Coord,
    pub mines: CellCount,
}

impl DifficultyConfig {
    pub const fn new_unchecked(rows: Coord, cols: Coord, mines: CellCount) -> Self {
        Self { rows, cols, mines }
    }

    /// Validates a custom setup. Mine placement keeps a 3x3 block around the first click clear, so at most
    /// `rows * cols - 9` mines fit regardless of where the player clicks first.
    pub fn new(rows: Coord, cols: Coord, mines: CellCount) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(GameError::InvalidBoardSize);
        }

        let max = Self::max_mines(rows, cols);
        if mines > max {
            return Err(GameError::TooManyMines { max });
        }

        Ok(Self::new_unchecked(rows, cols, mines))
    }

    pub const fn max_mines(rows: Coord, cols: Coord) -> CellCount {
        mult(rows, cols).saturating_sub(SAFE_AREA)
    }

    pub const fn size(&self) -> Coord2 {
        (self.rows, self.cols)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.rows, self.cols)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }
}

impl From<Difficulty> for DifficultyConfig {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.config()
    }
}
