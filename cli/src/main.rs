use anyhow::{Context, Result};
use clap::Parser;
use sapper_core::{Difficulty, Event, GameSession, SessionState};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;

use crate::clock::Ticker;
use crate::command::{Command, HELP};
use crate::scores::ScoreFile;

mod clock;
mod command;
mod render;
mod scores;

#[derive(Parser, Debug)]
#[command(version, about = "Reveal every safe cell without hitting a mine", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Start right away instead of asking: easy, medium or hard
    #[arg(short, long)]
    difficulty: Option<Difficulty>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Where best times are kept
    #[arg(long)]
    scores_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.verbose.tracing_level_filter())
        .with_writer(io::stderr)
        .init();

    let scores_path = args
        .scores_file
        .or_else(scores::default_path)
        .context("Could not determine a data directory, pass --scores-file")?;
    let mut scores = ScoreFile::load(scores_path);

    let seed = args.seed.unwrap_or_else(rand::random);
    log::debug!("seed: {}", seed);

    let mut session = GameSession::new(seed);
    if let Some(difficulty) = args.difficulty {
        session.handle(Event::SelectDifficulty(difficulty), &mut scores);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}\n", HELP)?;
    writeln!(out, "{}", render::render_session(&session))?;
    prompt(&mut out)?;

    let mut ticker = Ticker::new();
    for line in io::stdin().lock().lines() {
        let line = line.context("Could not read input")?;
        if line.trim().is_empty() {
            prompt(&mut out)?;
            continue;
        }

        let now = Instant::now();
        for _ in 0..ticker.due(now) {
            session.handle(Event::Tick, &mut scores);
        }

        let redraw = match line.parse::<Command>() {
            Ok(Command::Quit) => break,
            Ok(Command::Game(event)) => session.handle(event, &mut scores),
            Ok(Command::NewGame(difficulty)) => {
                session.handle(Event::NewGame, &mut scores);
                if let Some(difficulty) = difficulty {
                    session.handle(Event::SelectDifficulty(difficulty), &mut scores);
                }
                true
            }
            Ok(Command::Scores) => {
                writeln!(out, "{}", render::render_scores(scores.scoreboard()))?;
                false
            }
            Ok(Command::ClearScores) => {
                scores.clear()?;
                writeln!(out, "Scores cleared")?;
                false
            }
            Ok(Command::Help) => {
                writeln!(out, "{}", HELP)?;
                false
            }
            Err(err) => {
                writeln!(out, "{}", err)?;
                false
            }
        };
        ticker.sync(session.is_timer_running(), now);

        if redraw {
            writeln!(out, "{}", render::render_session(&session))?;
            if session.state() == SessionState::Won {
                writeln!(out, "{}", render::render_scores(scores.scoreboard()))?;
            }
        }
        prompt(&mut out)?;
    }

    Ok(())
}

fn prompt(out: &mut impl Write) -> io::Result<()> {
    write!(out, "> ")?;
    out.flush()
}
