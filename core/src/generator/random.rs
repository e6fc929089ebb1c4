use super::*;

/// Purely random placement that keeps the first clicked cell and its neighbors clear, so the opening click always
/// lands on a zero and opens an area.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMinefieldGenerator {
    seed: u64,
    safe: Coord2,
}

impl RandomMinefieldGenerator {
    pub fn new(seed: u64, safe: Coord2) -> Self {
        Self { seed, safe }
    }

    fn is_free(&self, board: &Board, coords: Coord2) -> bool {
        !board[coords].is_mine && !is_adjacent_or_same(coords, self.safe)
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn place_mines(self, board: &mut Board, mines: CellCount) {
        use rand::prelude::*;

        for coords in board.iter_coords() {
            board[coords].is_mine = false;
        }

        let free_cells = board
            .iter_coords()
            .filter(|&coords| !is_adjacent_or_same(coords, self.safe))
            .count() as CellCount;

        // an overfull request would never finish sampling
        let mines = if mines > free_cells {
            log::warn!(
                "Too many mines for board, requested {} but only {} fit around {:?}",
                mines,
                free_cells,
                self.safe
            );
            free_cells
        } else {
            mines
        };

        let (rows, cols) = board.size();
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut mines_placed = 0;
        while mines_placed < mines {
            let coords = (rng.random_range(0..rows), rng.random_range(0..cols));
            if self.is_free(board, coords) {
                board[coords].is_mine = true;
                mines_placed += 1;
            }
        }

        board.recount_adjacent_mines();
        log::debug!(
            "Placed {} mines on {}x{} board, safe around {:?}",
            mines_placed,
            rows,
            cols,
            self.safe
        );
    }
}
