use std::time::{Duration, Instant};

const TICK: Duration = Duration::from_secs(1);

/// Turns wall-clock time into whole-second ticks for the session timer.
///
/// The ticker only counts while armed. Disarming drops any partial second so a stopped or replaced game never
/// receives stale ticks.
#[derive(Debug, Default)]
pub struct Ticker {
    last_tick: Option<Instant>,
}

impl Ticker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms or disarms the ticker to follow the session's timer.
    pub fn sync(&mut self, running: bool, now: Instant) {
        match (running, self.last_tick) {
            (true, None) => self.last_tick = Some(now),
            (false, Some(_)) => self.last_tick = None,
            _ => {}
        }
    }

    /// Ticks owed since the last call, keeping the leftover fraction of a second for next time.
    pub fn due(&mut self, now: Instant) -> u32 {
        let Some(last_tick) = self.last_tick else {
            return 0;
        };

        let ticks = now.saturating_duration_since(last_tick).as_secs();
        self.last_tick = Some(last_tick + TICK * ticks as u32);
        ticks as u32
    }
}
