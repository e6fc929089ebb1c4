use core::str::FromStr;
use sapper_core::{Coord, Coord2, Difficulty, Event, GameError};
use thiserror::Error;

pub const HELP: &str = "\
Commands:
  r <row> <col>     reveal a cell
  f <row> <col>     flag or unflag a cell
  d <difficulty>    start a game: easy, medium or hard
  n [difficulty]    new game, back to difficulty selection without a name
  s                 list best times
  c                 clear best times
  h                 show this help
  q                 quit";

/// One line of player input.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Command {
    Game(Event),
    NewGame(Option<Difficulty>),
    Scores,
    ClearScores,
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq)]
pub enum CommandError {
    #[error("Empty command, type `h` for help")]
    Empty,
    #[error("Unknown command {0:?}, type `h` for help")]
    Unknown(String),
    #[error("Expected `{0} <row> <col>`")]
    MissingCoords(&'static str),
    #[error("Invalid coordinate {0:?}")]
    InvalidCoord(String),
    #[error("Expected `d <difficulty>`")]
    MissingDifficulty,
    #[error(transparent)]
    Difficulty(#[from] GameError),
    #[error("Unexpected input {0:?}")]
    Trailing(String),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let name = words.next().ok_or(CommandError::Empty)?.to_ascii_lowercase();

        let command = match name.as_str() {
            "r" | "reveal" => Command::Game(Event::Reveal(parse_coords(&mut words, "r")?)),
            "f" | "flag" => Command::Game(Event::ToggleFlag(parse_coords(&mut words, "f")?)),
            "d" | "difficulty" => {
                let difficulty = words.next().ok_or(CommandError::MissingDifficulty)?;
                Command::Game(Event::SelectDifficulty(difficulty.parse()?))
            }
            "n" | "new" => Command::NewGame(words.next().map(str::parse::<Difficulty>).transpose()?),
            "s" | "scores" => Command::Scores,
            "c" | "clear" => Command::ClearScores,
            "h" | "help" | "?" => Command::Help,
            "q" | "quit" | "exit" => Command::Quit,
            _ => return Err(CommandError::Unknown(name)),
        };

        match words.next() {
            Some(extra) => Err(CommandError::Trailing(extra.to_string())),
            None => Ok(command),
        }
    }
}

fn parse_coords<'a>(
    words: &mut impl Iterator<Item = &'a str>,
    name: &'static str,
) -> Result<Coord2, CommandError> {
    let mut next = || -> Result<Coord, CommandError> {
        let word = words.next().ok_or(CommandError::MissingCoords(name))?;
        word.parse()
            .map_err(|_| CommandError::InvalidCoord(word.to_string()))
    };
    Ok((next()?, next()?))
}
