pub use board::*;
pub use cell::*;
pub use difficulty::*;
pub use error::*;
pub use generator::*;
pub use score::*;
pub use session::*;
pub use types::*;

mod board;
mod cell;
mod difficulty;
mod engine;
mod error;
mod generator;
mod score;
mod session;
mod types;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }
}
