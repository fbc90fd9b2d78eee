use timer_core::{Lap, LapLedger, Result, StopwatchEngine, StopwatchPhase};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LapMark {
    Best,
    Worst,
}

pub struct StopwatchState {
    pub engine: StopwatchEngine,
}

impl StopwatchState {
    pub fn restore(laps: LapLedger) -> Self {
        Self {
            engine: StopwatchEngine::with_laps(laps),
        }
    }

    /// Enter: start from zero, pause while running, resume while paused.
    /// Returns the phase after the transition.
    pub fn toggle(&mut self, now_ms: u64) -> Result<StopwatchPhase> {
        match self.engine.phase() {
            StopwatchPhase::Stopped => self.engine.start(now_ms)?,
            StopwatchPhase::Running => self.engine.pause(now_ms)?,
            StopwatchPhase::Paused => self.engine.resume(now_ms)?,
        }
        Ok(self.engine.phase())
    }

    pub fn record_lap(&mut self, now_ms: u64) -> Result<Lap> {
        self.engine.lap(now_ms)
    }

    pub fn reset(&mut self) {
        self.engine.reset();
    }

    /// Laps newest first, with best/worst highlighting.
    pub fn lap_rows(&self) -> Vec<(Lap, Option<LapMark>)> {
        let best = self.engine.best_lap().map(|l| l.id);
        let worst = self.engine.worst_lap().map(|l| l.id);
        self.engine
            .laps()
            .iter()
            .map(|lap| {
                let mark = if Some(lap.id) == best {
                    Some(LapMark::Best)
                } else if Some(lap.id) == worst {
                    Some(LapMark::Worst)
                } else {
                    None
                };
                (*lap, mark)
            })
            .collect()
    }
}
