use core::fmt::Write;
use sapper_core::{Board, Cell, GameSession, Scoreboard, SessionState};

const CELL_WIDTH: usize = 3;

fn cell_symbol(cell: Cell) -> char {
    match cell {
        Cell {
            is_revealed: false,
            is_flagged: true,
            ..
        } => 'F',
        Cell {
            is_revealed: false, ..
        } => '#',
        Cell { is_mine: true, .. } => '*',
        Cell {
            adjacent_mines: 0, ..
        } => '.',
        Cell { adjacent_mines, .. } => char::from_digit(adjacent_mines.into(), 10).unwrap_or('?'),
    }
}

/// Grid with row and column indices, as typed in `r <row> <col>`.
pub fn render_board(board: &Board) -> String {
    let mut out = String::new();

    out.push_str("   ");
    for col in 0..board.cols() {
        let _ = write!(out, "{:>width$}", col, width = CELL_WIDTH);
    }
    out.push('\n');

    for row in 0..board.rows() {
        let _ = write!(out, "{:>width$}", row, width = CELL_WIDTH);
        for col in 0..board.cols() {
            let _ = write!(out, "{:>width$}", cell_symbol(board[(row, col)]), width = CELL_WIDTH);
        }
        out.push('\n');
    }

    out
}

pub fn render_status(session: &GameSession) -> String {
    let difficulty = session
        .difficulty()
        .map(|difficulty| difficulty.name())
        .unwrap_or_default();

    match session.state() {
        SessionState::NotStarted => "Pick a difficulty: d easy, d medium or d hard".to_string(),
        SessionState::InProgress => format!(
            "[{}] flags left: {}  time: {}s",
            difficulty,
            session.flags_remaining(),
            session.elapsed_secs()
        ),
        SessionState::Won => format!(
            "[{}] You won in {}s! Type n to play again",
            difficulty,
            session.elapsed_secs()
        ),
        SessionState::Lost => format!("[{}] Boom! Type n to play again", difficulty),
    }
}

/// Everything the player sees after an event: the board, if any, then the status line.
pub fn render_session(session: &GameSession) -> String {
    let mut out = session.board().map(render_board).unwrap_or_default();
    out.push_str(&render_status(session));
    out
}

pub fn render_scores(scoreboard: &Scoreboard) -> String {
    if scoreboard.is_empty() {
        return "No scores yet".to_string();
    }

    let mut out = String::from(" #  difficulty   time  completed\n");
    for (rank, score) in scoreboard.entries().iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>2}  {:<10} {:>6}  {}",
            rank + 1,
            score.difficulty.name(),
            score.formatted_time(),
            score.completed_at.format("%Y-%m-%d %H:%M")
        );
    }
    out.pop();
    out
}
