use anyhow::{Context, Result};
use sapper_core::{GameScore, ScoreRecorder, Scoreboard};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// `<data dir>/sapper/scores.json`, when the platform has a data directory.
pub fn default_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("sapper").join("scores.json"))
}

/// Best times kept in a JSON file, rewritten after every change.
#[derive(Debug)]
pub struct ScoreFile {
    path: PathBuf,
    scoreboard: Scoreboard,
}

impl ScoreFile {
    /// Reads the scores at `path`. A missing or unreadable file starts an empty board.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let scoreboard = match fs::read_to_string(&path) {
            Ok(json) => Scoreboard::from_json(&json).unwrap_or_else(|err| {
                log::warn!("Ignoring corrupt score file {}: {}", path.display(), err);
                Scoreboard::new()
            }),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Scoreboard::new(),
            Err(err) => {
                log::warn!("Could not read score file {}: {}", path.display(), err);
                Scoreboard::new()
            }
        };
        log::debug!("Loaded {} scores from {}", scoreboard.len(), path.display());
        Self { path, scoreboard }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    pub fn save(&self) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Could not create {}", dir.display()))?;
        }
        let json = self.scoreboard.to_json()?;
        fs::write(&self.path, json)
            .with_context(|| format!("Could not write {}", self.path.display()))?;
        Ok(())
    }

    pub fn clear(&mut self) -> Result<()> {
        self.scoreboard.clear();
        self.save()
    }
}

impl ScoreRecorder for ScoreFile {
    fn record_score(&mut self, score: GameScore) {
        let Some(rank) = self.scoreboard.insert(score) else {
            return;
        };
        log::info!("New best time, rank {}", rank + 1);
        if let Err(err) = self.save() {
            log::error!("{:#}", err);
        }
    }
}
