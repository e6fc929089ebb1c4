use std::collections::{HashSet, VecDeque};

use crate::*;

impl Board {
    /// Reveals the cell at `coords` and flood-fills from it when it has no adjacent mines.
    ///
    /// Out of range, already revealed and flagged targets are ignored. The fill spreads through zero cells and stops
    /// at the first ring of numbered cells, skipping flags, so a mine is never uncovered by the fill. Returns how many
    /// cells were newly revealed.
    pub fn reveal(&mut self, coords: Coord2) -> CellCount {
        match self.cell(coords) {
            Some(cell) if cell.can_reveal() => {}
            _ => return 0,
        }

        self[coords].is_revealed = true;
        let mut revealed_count = 1;
        log::debug!(
            "Reveal cell at {:?}, mine: {}, count: {}",
            coords,
            self[coords].is_mine,
            self[coords].adjacent_mines
        );

        if !self[coords].opens_neighbors() {
            return revealed_count;
        }

        let mut visited = HashSet::from([coords]);
        let mut to_visit: VecDeque<Coord2> = VecDeque::new();
        self.enqueue_neighbors(coords, &mut visited, &mut to_visit);
        log::trace!(
            "Starting flood-fill from {:?}, initial neighbors: {:?}",
            coords,
            to_visit
        );

        while let Some(visit_coords) = to_visit.pop_front() {
            if !self[visit_coords].can_reveal() {
                continue;
            }

            self[visit_coords].is_revealed = true;
            revealed_count += 1;
            log::trace!(
                "Flood revealed cell at {:?}, count: {}",
                visit_coords,
                self[visit_coords].adjacent_mines
            );

            if self[visit_coords].opens_neighbors() {
                self.enqueue_neighbors(visit_coords, &mut visited, &mut to_visit);
            }
        }

        revealed_count
    }

    /// True once every cell without a mine has been revealed. Flags play no part.
    pub fn check_win(&self, total_mines: CellCount) -> bool {
        self.revealed_safe_count() == self.total_cells().saturating_sub(total_mines)
    }

    fn enqueue_neighbors(
        &self,
        coords: Coord2,
        visited: &mut HashSet<Coord2>,
        to_visit: &mut VecDeque<Coord2>,
    ) {
        for pos in self.iter_neighbors(coords) {
            if self[pos].can_reveal() && visited.insert(pos) {
                to_visit.push_back(pos);
            }
        }
    }
}
