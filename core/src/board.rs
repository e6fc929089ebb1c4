use core::ops::{Index, IndexMut};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Rectangular grid of cells addressed by zero-based `(row, col)`.
///
/// The dimensions are fixed at creation. Mines are placed once by a [`MinefieldGenerator`], after which the board is
/// only mutated by reveals and flags.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
}

impl Board {
    /// Creates a board where no cell is mined, revealed or flagged. Zero dimensions are bumped to 1.
    pub fn new(rows: Coord, cols: Coord) -> Self {
        let size: Coord2 = (rows.max(1), cols.max(1));
        Self {
            cells: Array2::default(size.to_nd_index()),
        }
    }

    /// Builds a board with mines at exactly `mine_coords`, with adjacency counts already computed.
    pub fn from_mine_coords((rows, cols): Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(GameError::InvalidBoardSize);
        }

        let mut board = Self::new(rows, cols);
        for &coords in mine_coords {
            if !board.contains(coords) {
                return Err(GameError::InvalidCoords);
            }
            board[coords].is_mine = true;
        }
        board.recount_adjacent_mines();

        Ok(board)
    }

    pub fn rows(&self) -> Coord {
        self.cells.nrows() as Coord
    }

    pub fn cols(&self) -> Coord {
        self.cells.ncols() as Coord
    }

    pub fn size(&self) -> Coord2 {
        (self.rows(), self.cols())
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.rows(), self.cols())
    }

    pub fn contains(&self, (row, col): Coord2) -> bool {
        row < self.rows() && col < self.cols()
    }

    pub fn cell(&self, coords: Coord2) -> Option<Cell> {
        self.contains(coords).then(|| self[coords])
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }

    /// All coordinates in row-major order.
    pub fn iter_coords(&self) -> impl Iterator<Item = Coord2> + use<> {
        let (rows, cols) = self.size();
        (0..rows).flat_map(move |row| (0..cols).map(move |col| (row, col)))
    }

    pub fn iter_cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn mine_count(&self) -> CellCount {
        self.count_where(|cell| cell.is_mine)
    }

    pub fn flag_count(&self) -> CellCount {
        self.count_where(|cell| cell.is_flagged)
    }

    pub fn revealed_safe_count(&self) -> CellCount {
        self.count_where(|cell| cell.is_revealed_safe())
    }

    /// Counts mines around `coords` by looking at the board, ignoring the cached `adjacent_mines`.
    pub fn count_adjacent_mines(&self, coords: Coord2) -> u8 {
        self.iter_neighbors(coords)
            .filter(|&pos| self[pos].is_mine)
            .count() as u8
    }

    /// Refreshes `adjacent_mines` on every cell without a mine. Mined cells are left at 0.
    pub fn recount_adjacent_mines(&mut self) {
        for coords in self.iter_coords() {
            let count = if self[coords].is_mine {
                0
            } else {
                self.count_adjacent_mines(coords)
            };
            self[coords].adjacent_mines = count;
        }
    }

    /// Resets the board to its freshly created state.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// Marks every cell as revealed, used to show the whole board once the game is lost.
    pub fn reveal_all(&mut self) {
        self.cells.iter_mut().for_each(|cell| cell.is_revealed = true);
    }

    /// Flips the flag on an unrevealed cell. Revealed or out of range cells are left alone.
    pub fn toggle_flag(&mut self, coords: Coord2) -> MarkOutcome {
        match self.cell(coords) {
            Some(cell) if !cell.is_revealed => {
                self[coords].is_flagged = !cell.is_flagged;
                MarkOutcome::Changed
            }
            _ => MarkOutcome::NoChange,
        }
    }

    fn count_where(&self, predicate: impl Fn(&Cell) -> bool) -> CellCount {
        self.cells.iter().filter(|cell| predicate(cell)).count() as CellCount
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for Board {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.cells[coords.to_nd_index()]
    }
}
