use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::*;

/// How many entries a [`Scoreboard`] keeps.
pub const MAX_SCORES: usize = 10;

/// Record of a won game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameScore {
    pub difficulty: Difficulty,
    /// Elapsed seconds when the last safe cell was revealed.
    pub time: u32,
    pub completed_at: DateTime<Utc>,
}

impl GameScore {
    pub fn new(difficulty: Difficulty, time: u32, completed_at: DateTime<Utc>) -> Self {
        Self {
            difficulty,
            time,
            completed_at,
        }
    }

    /// Elapsed time as `m:ss`.
    pub fn formatted_time(&self) -> String {
        format!("{}:{:02}", self.time / 60, self.time % 60)
    }
}

/// Receives the score of every won game, exactly once per win.
pub trait ScoreRecorder {
    fn record_score(&mut self, score: GameScore);
}

impl ScoreRecorder for Vec<GameScore> {
    fn record_score(&mut self, score: GameScore) {
        self.push(score);
    }
}

impl<R: ScoreRecorder + ?Sized> ScoreRecorder for &mut R {
    fn record_score(&mut self, score: GameScore) {
        (**self).record_score(score);
    }
}

/// Best times, fastest first, capped at [`MAX_SCORES`] entries across all difficulties.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scoreboard {
    entries: Vec<GameScore>,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sorts and truncates arbitrary entries, e.g. loaded from storage.
    pub fn from_entries(mut entries: Vec<GameScore>) -> Self {
        entries.sort_by_key(|score| score.time);
        entries.truncate(MAX_SCORES);
        Self { entries }
    }

    /// Parses a JSON array of scores. Entries are re-sorted since the source may have been edited.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let entries: Vec<GameScore> = serde_json::from_str(json)?;
        Ok(Self::from_entries(entries))
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.entries)
    }

    /// Adds `score` after any entry with an equal or better time. Returns the zero-based rank when it made the cut.
    pub fn insert(&mut self, score: GameScore) -> Option<usize> {
        let rank = self.entries.partition_point(|entry| entry.time <= score.time);
        if rank >= MAX_SCORES {
            log::debug!("Score of {}s did not make the board", score.time);
            return None;
        }

        self.entries.insert(rank, score);
        self.entries.truncate(MAX_SCORES);
        Some(rank)
    }

    pub fn entries(&self) -> &[GameScore] {
        &self.entries
    }

    pub fn for_difficulty(&self, difficulty: Difficulty) -> impl Iterator<Item = &GameScore> {
        self.entries
            .iter()
            .filter(move |score| score.difficulty == difficulty)
    }

    pub fn best(&self, difficulty: Difficulty) -> Option<&GameScore> {
        self.for_difficulty(difficulty).next()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl ScoreRecorder for Scoreboard {
    fn record_score(&mut self, score: GameScore) {
        self.insert(score);
    }
}
