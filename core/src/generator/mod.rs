use crate::*;
pub use random::*;

mod random;

pub trait MinefieldGenerator {
    /// Lays `mines` onto `board`, replacing any earlier layout, and refreshes every adjacency count. Reveal and flag
    /// state is left untouched.
    fn place_mines(self, board: &mut Board, mines: CellCount);
}
