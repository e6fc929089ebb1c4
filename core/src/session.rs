use chrono::Utc;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - NotStarted -> InProgress
/// - InProgress -> Won
/// - InProgress -> Lost
/// - any -> NotStarted, on a new game request
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// No difficulty picked yet, there is no board
    NotStarted,
    /// Board exists, mines are placed on the first reveal
    InProgress,
    /// Every safe cell was revealed
    Won,
    /// A mine was revealed
    Lost,
}

impl SessionState {
    pub const fn is_initial(self) -> bool {
        matches!(self, Self::NotStarted)
    }

    pub const fn is_active(self) -> bool {
        matches!(self, Self::InProgress)
    }

    /// The game has ended and no moves can be made anymore
    pub const fn is_final(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::NotStarted
    }
}

/// Input accepted by [`GameSession::handle`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Event {
    SelectDifficulty(Difficulty),
    NewGame,
    Reveal(Coord2),
    ToggleFlag(Coord2),
    /// One second of play time has passed
    Tick,
}

/// One game from difficulty selection to win or loss.
///
/// All mutation goes through `&mut self`, one event at a time. Mines are only placed when the first cell is revealed,
/// around that cell, so the first click is always safe.
#[derive(Clone, Debug)]
pub struct GameSession {
    rng: SmallRng,
    state: SessionState,
    difficulty: Option<Difficulty>,
    board: Option<Board>,
    mines_placed: bool,
    flags_remaining: isize,
    elapsed_secs: u32,
    timer_running: bool,
}

impl GameSession {
    /// `seed` drives every board this session generates.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            state: Default::default(),
            difficulty: None,
            board: None,
            mines_placed: false,
            flags_remaining: 0,
            elapsed_secs: 0,
            timer_running: false,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    pub fn mines_placed(&self) -> bool {
        self.mines_placed
    }

    /// Mines minus flags placed, negative when the player over-flags.
    pub fn flags_remaining(&self) -> isize {
        self.flags_remaining
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    pub fn is_timer_running(&self) -> bool {
        self.timer_running
    }

    /// Applies one event and returns whether anything observable changed.
    pub fn handle<R: ScoreRecorder + ?Sized>(&mut self, event: Event, recorder: &mut R) -> bool {
        log::trace!("Handling {:?} in {:?}", event, self.state);
        match event {
            Event::SelectDifficulty(difficulty) => {
                self.start(difficulty);
                true
            }
            Event::NewGame => {
                self.reset();
                true
            }
            Event::Reveal(coords) => self.reveal(coords, recorder).has_update(),
            Event::ToggleFlag(coords) => self.toggle_flag(coords).has_update(),
            Event::Tick => self.tick(),
        }
    }

    /// Throws away any current game and starts a fresh board for `difficulty`.
    pub fn start(&mut self, difficulty: Difficulty) {
        let config = difficulty.config();
        self.state = SessionState::InProgress;
        self.difficulty = Some(difficulty);
        self.board = Some(Board::new(config.rows, config.cols));
        self.mines_placed = false;
        self.flags_remaining = config.mines as isize;
        self.elapsed_secs = 0;
        self.timer_running = false;
        log::info!(
            "New {} game, {}x{} with {} mines",
            difficulty,
            config.rows,
            config.cols,
            config.mines
        );
    }

    /// Back to difficulty selection.
    pub fn reset(&mut self) {
        self.state = SessionState::NotStarted;
        self.difficulty = None;
        self.board = None;
        self.mines_placed = false;
        self.flags_remaining = 0;
        self.elapsed_secs = 0;
        self.timer_running = false;
        log::debug!("Session reset");
    }

    /// Reveals `coords`, placing mines first if this is the opening move.
    ///
    /// Ignored unless a game is in progress and the target is an in-range, hidden, unflagged cell. A win hands the
    /// score to `recorder`.
    pub fn reveal<R: ScoreRecorder + ?Sized>(
        &mut self,
        coords: Coord2,
        recorder: &mut R,
    ) -> RevealOutcome {
        if !self.state.is_active() {
            return RevealOutcome::NoChange;
        }

        let (Some(difficulty), Some(board)) = (self.difficulty, self.board.as_mut()) else {
            return RevealOutcome::NoChange;
        };

        if !board.cell(coords).is_some_and(Cell::can_reveal) {
            return RevealOutcome::NoChange;
        }

        let mines = difficulty.config().mines;
        if !self.mines_placed {
            RandomMinefieldGenerator::new(self.rng.next_u64(), coords).place_mines(board, mines);
            self.mines_placed = true;
            self.timer_running = true;
        } else if board[coords].is_mine {
            board.reveal_all();
            self.state = SessionState::Lost;
            self.timer_running = false;
            log::info!(
                "Hit mine at {:?} after {}s",
                coords,
                self.elapsed_secs
            );
            return RevealOutcome::HitMine;
        }

        board.reveal(coords);

        if board.check_win(mines) {
            self.state = SessionState::Won;
            self.timer_running = false;
            log::info!("Won {} game in {}s", difficulty, self.elapsed_secs);
            recorder.record_score(GameScore::new(difficulty, self.elapsed_secs, Utc::now()));
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        }
    }

    /// Flags or unflags a hidden cell. Only allowed once the mines are placed and while the game is in progress.
    pub fn toggle_flag(&mut self, coords: Coord2) -> MarkOutcome {
        if !self.state.is_active() || !self.mines_placed {
            return MarkOutcome::NoChange;
        }

        let Some(board) = self.board.as_mut() else {
            return MarkOutcome::NoChange;
        };

        let outcome = board.toggle_flag(coords);
        if outcome.has_update() {
            self.flags_remaining += if board[coords].is_flagged { -1 } else { 1 };
            log::debug!(
                "Flag toggled at {:?}, {} flags remaining",
                coords,
                self.flags_remaining
            );
        }
        outcome
    }

    /// Advances the clock by one second while it runs. The clock starts with the first reveal and stops for good when
    /// the game ends or is reset.
    pub fn tick(&mut self) -> bool {
        if self.timer_running && self.state.is_active() {
            self.elapsed_secs = self.elapsed_secs.saturating_add(1);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started(difficulty: Difficulty, seed: u64) -> GameSession {
        let mut session = GameSession::new(seed);
        session.start(difficulty);
        session
    }

    /// A game past its opening move that is still in progress.
    fn opened(difficulty: Difficulty, click: Coord2) -> GameSession {
        (0..)
            .map(|seed| {
                let mut session = started(difficulty, seed);
                session.reveal(click, &mut Vec::<GameScore>::new());
                session
            })
            .find(|session| session.state().is_active())
            .unwrap()
    }

    fn find(session: &GameSession, predicate: impl Fn(Cell) -> bool) -> Option<Coord2> {
        let board = session.board()?;
        board.iter_coords().find(|&coords| predicate(board[coords]))
    }

    #[test]
    fn new_session_has_no_board() {
        let mut session = GameSession::new(0);
        let mut scores: Vec<GameScore> = Vec::new();

        assert_eq!(session.state(), SessionState::NotStarted);
        assert!(session.board().is_none());
        assert_eq!(session.reveal((0, 0), &mut scores), RevealOutcome::NoChange);
        assert_eq!(session.toggle_flag((0, 0)), MarkOutcome::NoChange);
        assert!(!session.tick());
    }

    #[test]
    fn selecting_difficulty_builds_empty_board() {
        let session = started(Difficulty::Medium, 1);

        assert_eq!(session.state(), SessionState::InProgress);
        assert_eq!(session.difficulty(), Some(Difficulty::Medium));
        let board = session.board().unwrap();
        assert_eq!(board.size(), (12, 12));
        assert_eq!(board.mine_count(), 0);
        assert_eq!(session.flags_remaining(), 25);
        assert!(!session.mines_placed());
        assert!(!session.is_timer_running());
    }

    #[test]
    fn first_click_is_always_safe() {
        for seed in 0..30 {
            let mut session = started(Difficulty::Easy, seed);
            let outcome = session.reveal((4, 4), &mut Vec::<GameScore>::new());

            assert!(matches!(outcome, RevealOutcome::Revealed | RevealOutcome::Won));
            let board = session.board().unwrap();
            assert_eq!(board.mine_count(), 10);
            for row in 3..=5 {
                for col in 3..=5 {
                    assert!(!board[(row, col)].is_mine);
                }
            }
            assert!(board[(4, 4)].is_revealed);
            assert!(session.mines_placed());
            assert!(session.is_timer_running());
        }
    }

    #[test]
    fn flagging_before_first_reveal_is_ignored() {
        let mut session = started(Difficulty::Easy, 2);

        assert_eq!(session.toggle_flag((0, 0)), MarkOutcome::NoChange);
        assert_eq!(session.flags_remaining(), 10);
        assert!(!session.board().unwrap()[(0, 0)].is_flagged);
    }

    #[test]
    fn flag_toggle_restores_budget() {
        let mut session = opened(Difficulty::Easy, (4, 4));
        let hidden = find(&session, |cell| !cell.is_revealed).unwrap();

        assert_eq!(session.toggle_flag(hidden), MarkOutcome::Changed);
        assert_eq!(session.flags_remaining(), 9);
        assert!(session.board().unwrap()[hidden].is_flagged);

        assert_eq!(session.toggle_flag(hidden), MarkOutcome::Changed);
        assert_eq!(session.flags_remaining(), 10);
        assert!(!session.board().unwrap()[hidden].is_flagged);

        assert_eq!(session.toggle_flag((4, 4)), MarkOutcome::NoChange);
        assert_eq!(session.toggle_flag((8, 8)), MarkOutcome::NoChange);
        assert_eq!(session.flags_remaining(), 10);
    }

    #[test]
    fn flag_budget_can_go_negative() {
        let mut session = opened(Difficulty::Easy, (4, 4));

        // an unfinished game always has at least one hidden safe cell on top of the mines
        let hidden: Vec<_> = {
            let board = session.board().unwrap();
            board.iter_coords().filter(|&c| !board[c].is_revealed).take(11).collect()
        };
        assert_eq!(hidden.len(), 11);
        for coords in hidden {
            session.toggle_flag(coords);
        }
        assert_eq!(session.flags_remaining(), -1);
    }

    #[test]
    fn flagged_cell_cannot_be_revealed() {
        let mut session = opened(Difficulty::Easy, (4, 4));
        let mine = find(&session, |cell| cell.is_mine).unwrap();
        session.toggle_flag(mine);

        assert_eq!(session.reveal(mine, &mut Vec::<GameScore>::new()), RevealOutcome::NoChange);
        assert_eq!(session.state(), SessionState::InProgress);
    }

    #[test]
    fn revealing_mine_loses_and_uncovers_board() {
        let mut session = opened(Difficulty::Easy, (4, 4));
        let mut scores: Vec<GameScore> = Vec::new();
        session.tick();
        let mine = find(&session, |cell| cell.is_mine).unwrap();

        assert_eq!(session.reveal(mine, &mut scores), RevealOutcome::HitMine);
        assert_eq!(session.state(), SessionState::Lost);
        assert!(session.board().unwrap().iter_cells().all(|cell| cell.is_revealed));
        assert!(scores.is_empty());

        // clock and input are frozen once lost
        assert!(!session.is_timer_running());
        assert!(!session.tick());
        assert_eq!(session.elapsed_secs(), 1);
        assert_eq!(session.toggle_flag((0, 0)), MarkOutcome::NoChange);
        assert_eq!(session.reveal((0, 0), &mut scores), RevealOutcome::NoChange);
    }

    #[test]
    fn revealing_every_safe_cell_wins_once() {
        let mut session = opened(Difficulty::Easy, (4, 4));
        let mut scores: Vec<GameScore> = Vec::new();

        for _ in 0..42 {
            session.tick();
        }

        // flag a mine and a safe cell, neither matters for the win
        let mine = find(&session, |cell| cell.is_mine).unwrap();
        session.toggle_flag(mine);

        let safe_cells: Vec<_> = {
            let board = session.board().unwrap();
            board.iter_coords().filter(|&c| !board[c].is_mine).collect()
        };
        assert_eq!(safe_cells.len(), 54);

        let mut last = RevealOutcome::NoChange;
        for coords in safe_cells {
            let outcome = session.reveal(coords, &mut scores);
            if outcome.has_update() {
                last = outcome;
            }
        }

        assert_eq!(last, RevealOutcome::Won);
        assert_eq!(session.state(), SessionState::Won);
        assert!(session.board().unwrap().check_win(10));
        assert_eq!(scores.len(), 1);
        assert_eq!(scores[0].difficulty, Difficulty::Easy);
        assert_eq!(scores[0].time, 42);

        assert!(!session.tick());
        assert_eq!(session.reveal(mine, &mut scores), RevealOutcome::NoChange);
        assert_eq!(scores.len(), 1);
    }

    #[test]
    fn repeated_reveal_is_a_no_op() {
        let mut session = started(Difficulty::Hard, 8);
        session.reveal((0, 0), &mut Vec::<GameScore>::new());
        let snapshot = session.board().unwrap().clone();

        assert_eq!(session.reveal((0, 0), &mut Vec::<GameScore>::new()), RevealOutcome::NoChange);
        assert_eq!(session.reveal((16, 0), &mut Vec::<GameScore>::new()), RevealOutcome::NoChange);
        assert_eq!(session.board().unwrap(), &snapshot);
    }

    #[test]
    fn timer_only_runs_after_first_reveal() {
        let mut session = started(Difficulty::Easy, 9);
        assert!(!session.tick());
        assert_eq!(session.elapsed_secs(), 0);

        let mut session = opened(Difficulty::Easy, (0, 0));
        assert!(session.tick());
        assert!(session.tick());
        assert_eq!(session.elapsed_secs(), 2);
    }

    #[test]
    fn new_game_stops_everything() {
        let mut session = started(Difficulty::Easy, 10);
        let mut scores = Scoreboard::new();
        session.reveal((0, 0), &mut scores);
        session.tick();

        assert!(session.handle(Event::NewGame, &mut scores));
        assert_eq!(session.state(), SessionState::NotStarted);
        assert!(session.board().is_none());
        assert!(!session.is_timer_running());
        assert!(!session.handle(Event::Tick, &mut scores));
        assert_eq!(session.elapsed_secs(), 0);
    }

    #[test]
    fn events_apply_in_order() {
        let mut session = GameSession::new(11);
        let mut scores = Scoreboard::new();

        assert!(!session.handle(Event::Reveal((0, 0)), &mut scores));
        assert!(session.handle(Event::SelectDifficulty(Difficulty::Hard), &mut scores));
        assert!(!session.handle(Event::ToggleFlag((0, 0)), &mut scores));
        assert!(session.handle(Event::Reveal((8, 8)), &mut scores));
        assert!(!session.handle(Event::Reveal((8, 8)), &mut scores));
        assert!(session.handle(Event::Tick, &mut scores));
        assert_eq!(session.elapsed_secs(), 1);

        assert!(session.handle(Event::SelectDifficulty(Difficulty::Easy), &mut scores));
        assert_eq!(session.board().unwrap().size(), (8, 8));
        assert_eq!(session.elapsed_secs(), 0);
        assert!(!session.mines_placed());
    }

    #[test]
    fn sessions_with_same_seed_match() {
        let mut a = started(Difficulty::Medium, 99);
        let mut b = started(Difficulty::Medium, 99);
        a.reveal((5, 5), &mut Vec::<GameScore>::new());
        b.reveal((5, 5), &mut Vec::<GameScore>::new());

        assert_eq!(a.board(), b.board());
    }
}
