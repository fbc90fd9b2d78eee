use crate::error::{Result, TimerError};
use crate::laps::{Lap, LapLedger};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum StopwatchPhase {
    Stopped,
    Running,
    Paused,
}

impl StopwatchPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            StopwatchPhase::Stopped => "stopped",
            StopwatchPhase::Running => "running",
            StopwatchPhase::Paused => "paused",
        }
    }
}

/// Count-up timer anchored to the host clock.
///
/// Elapsed time is `accumulated_ms` plus the length of the open running
/// segment, recomputed from `now_ms` on every read. Nothing is accumulated
/// per refresh, so irregular or skipped refreshes cannot cause drift.
#[derive(Clone, Debug)]
pub struct StopwatchEngine {
    phase: StopwatchPhase,
    accumulated_ms: u64,
    running_since_ms: Option<u64>,
    laps: LapLedger,
}

impl Default for StopwatchEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl StopwatchEngine {
    pub fn new() -> Self {
        Self {
            phase: StopwatchPhase::Stopped,
            accumulated_ms: 0,
            running_since_ms: None,
            laps: LapLedger::new(),
        }
    }

    /// Restore a previously recorded lap history. A non-empty history
    /// leaves the stopwatch paused at the newest lap's total.
    pub fn with_laps(laps: LapLedger) -> Self {
        if laps.is_empty() {
            return Self::new();
        }
        Self {
            phase: StopwatchPhase::Paused,
            accumulated_ms: laps.total_ms(),
            running_since_ms: None,
            laps,
        }
    }

    pub fn phase(&self) -> StopwatchPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == StopwatchPhase::Running
    }

    pub fn start(&mut self, now_ms: u64) -> Result<()> {
        if self.phase != StopwatchPhase::Stopped {
            return Err(TimerError::transition("start", self.phase.as_str()));
        }
        self.running_since_ms = Some(now_ms);
        self.phase = StopwatchPhase::Running;
        Ok(())
    }

    pub fn pause(&mut self, now_ms: u64) -> Result<()> {
        let since = match (self.phase, self.running_since_ms) {
            (StopwatchPhase::Running, Some(since)) => since,
            _ => return Err(TimerError::transition("pause", self.phase.as_str())),
        };
        self.accumulated_ms += now_ms.saturating_sub(since);
        self.running_since_ms = None;
        self.phase = StopwatchPhase::Paused;
        Ok(())
    }

    pub fn resume(&mut self, now_ms: u64) -> Result<()> {
        if self.phase != StopwatchPhase::Paused {
            return Err(TimerError::transition("resume", self.phase.as_str()));
        }
        self.running_since_ms = Some(now_ms);
        self.phase = StopwatchPhase::Running;
        Ok(())
    }

    /// Valid from any phase. Clears elapsed time and laps.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Record a lap at the current elapsed time. Only while running.
    pub fn lap(&mut self, now_ms: u64) -> Result<Lap> {
        if self.phase != StopwatchPhase::Running {
            return Err(TimerError::transition("lap", self.phase.as_str()));
        }
        let elapsed = self.current_elapsed_ms(now_ms);
        Ok(self.laps.record(elapsed))
    }

    pub fn current_elapsed_ms(&self, now_ms: u64) -> u64 {
        match self.running_since_ms {
            Some(since) => self.accumulated_ms + now_ms.saturating_sub(since),
            None => self.accumulated_ms,
        }
    }

    pub fn laps(&self) -> &LapLedger {
        &self.laps
    }

    pub fn best_lap(&self) -> Option<&Lap> {
        self.laps.best()
    }

    pub fn worst_lap(&self) -> Option<&Lap> {
        self.laps.worst()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stopwatch_basic() {
        let mut sw = StopwatchEngine::new();
        assert_eq!(sw.phase(), StopwatchPhase::Stopped);
        assert_eq!(sw.current_elapsed_ms(0), 0);

        sw.start(1000).unwrap();
        assert_eq!(sw.phase(), StopwatchPhase::Running);
        assert_eq!(sw.current_elapsed_ms(1500), 500);
        assert_eq!(sw.current_elapsed_ms(2000), 1000);

        sw.pause(2000).unwrap();
        assert_eq!(sw.phase(), StopwatchPhase::Paused);
        assert_eq!(sw.current_elapsed_ms(5000), 1000); // frozen while paused

        sw.resume(5000).unwrap();
        assert_eq!(sw.current_elapsed_ms(5250), 1250);
        sw.pause(5500).unwrap();
        assert_eq!(sw.current_elapsed_ms(9000), 1500);

        sw.reset();
        assert_eq!(sw.phase(), StopwatchPhase::Stopped);
        assert_eq!(sw.current_elapsed_ms(10_000), 0);
        assert!(sw.laps().is_empty());
    }

    #[test]
    fn test_reads_do_not_mutate() {
        let mut sw = StopwatchEngine::new();
        sw.start(0).unwrap();
        for now in [10, 10, 3, 5000, 20] {
            sw.current_elapsed_ms(now);
        }
        assert_eq!(sw.current_elapsed_ms(700), 700);
    }

    #[test]
    fn test_clock_behind_anchor_counts_as_zero() {
        let mut sw = StopwatchEngine::new();
        sw.start(1000).unwrap();
        assert_eq!(sw.current_elapsed_ms(900), 0);
        sw.pause(900).unwrap();
        assert_eq!(sw.current_elapsed_ms(2000), 0);
    }

    #[test]
    fn test_lap_ordering() {
        let mut sw = StopwatchEngine::new();
        sw.start(0).unwrap();
        sw.lap(300).unwrap();
        let second = sw.lap(700).unwrap();
        assert_eq!(second, Lap { id: 2, split_ms: 400, total_ms: 700 });

        let laps = sw.laps().to_vec();
        assert_eq!(laps[0], Lap { id: 2, split_ms: 400, total_ms: 700 });
        assert_eq!(laps[1], Lap { id: 1, split_ms: 300, total_ms: 300 });
    }

    #[test]
    fn test_lap_does_not_reset_elapsed() {
        let mut sw = StopwatchEngine::new();
        sw.start(0).unwrap();
        sw.lap(5000).unwrap();
        assert_eq!(sw.current_elapsed_ms(5000), 5000);
        sw.pause(6000).unwrap();
        sw.resume(10_000).unwrap();
        let lap = sw.lap(12_000).unwrap();
        assert_eq!(lap, Lap { id: 2, split_ms: 3000, total_ms: 8000 });
    }

    #[test]
    fn test_best_worst_lap() {
        let mut sw = StopwatchEngine::new();
        sw.start(0).unwrap();
        sw.lap(300).unwrap();
        assert!(sw.best_lap().is_none());
        assert!(sw.worst_lap().is_none());
        sw.lap(700).unwrap();
        sw.lap(800).unwrap();
        assert_eq!(sw.best_lap().map(|l| l.id), Some(3));
        assert_eq!(sw.worst_lap().map(|l| l.id), Some(2));
    }

    #[test]
    fn test_lap_rejected_unless_running() {
        let mut sw = StopwatchEngine::new();
        assert_eq!(
            sw.lap(100),
            Err(TimerError::InvalidTransition { command: "lap", phase: "stopped" })
        );
        sw.start(0).unwrap();
        sw.pause(100).unwrap();
        assert_eq!(
            sw.lap(200),
            Err(TimerError::InvalidTransition { command: "lap", phase: "paused" })
        );
        assert!(sw.laps().is_empty());
    }

    #[test]
    fn test_invalid_transitions_leave_state_unchanged() {
        let mut sw = StopwatchEngine::new();
        assert!(sw.pause(0).is_err());
        assert!(sw.resume(0).is_err());

        sw.start(0).unwrap();
        assert!(sw.start(50).is_err());
        assert!(sw.resume(50).is_err());
        assert_eq!(sw.current_elapsed_ms(100), 100);

        sw.pause(1000).unwrap();
        assert_eq!(
            sw.pause(2000),
            Err(TimerError::InvalidTransition { command: "pause", phase: "paused" })
        );
        assert!(sw.start(2000).is_err());
        assert_eq!(sw.phase(), StopwatchPhase::Paused);
        assert_eq!(sw.current_elapsed_ms(3000), 1000);
    }

    #[test]
    fn test_reset_from_running() {
        let mut sw = StopwatchEngine::new();
        sw.start(0).unwrap();
        sw.lap(100).unwrap();
        sw.reset();
        assert_eq!(sw.phase(), StopwatchPhase::Stopped);
        assert_eq!(sw.current_elapsed_ms(500), 0);
        assert!(sw.laps().is_empty());
        sw.start(500).unwrap();
    }

    #[test]
    fn test_restore_laps_pauses_at_last_total() {
        let mut ledger = LapLedger::new();
        ledger.record(300);
        ledger.record(700);
        let mut sw = StopwatchEngine::with_laps(ledger);
        assert_eq!(sw.phase(), StopwatchPhase::Paused);
        assert_eq!(sw.current_elapsed_ms(0), 700);

        sw.resume(1000).unwrap();
        let lap = sw.lap(1200).unwrap();
        assert_eq!(lap, Lap { id: 3, split_ms: 200, total_ms: 900 });

        let fresh = StopwatchEngine::with_laps(LapLedger::new());
        assert_eq!(fresh.phase(), StopwatchPhase::Stopped);
    }
}
