use crate::error::{Result, TimerError};
use crate::format::{parse_to_ms, progress, validate};
use crate::reminder::{MessagePicker, ReminderScheduler, ReminderSettings};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CountdownPhase {
    Idle,
    Running,
    Paused,
    Completed,
}

impl CountdownPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            CountdownPhase::Idle => "idle",
            CountdownPhase::Running => "running",
            CountdownPhase::Paused => "paused",
            CountdownPhase::Completed => "completed",
        }
    }
}

/// Emitted by [`CountdownEngine::tick`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CountdownEvent {
    ReminderFired {
        message: &'static str,
        boundary_ms: u64,
    },
    Completed,
}

/// Count-down timer anchored to the host clock.
///
/// While running only the target instant is stored; remaining time is
/// `target - now`, so a late or skipped tick never shifts the end time.
#[derive(Clone, Debug)]
pub struct CountdownEngine {
    phase: CountdownPhase,
    total_ms: u64,
    remaining_ms: u64,
    target_ms: Option<u64>,
    reminder: ReminderScheduler,
    picker: MessagePicker,
}

impl Default for CountdownEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl CountdownEngine {
    pub fn new() -> Self {
        Self::with_picker(MessagePicker::from_entropy())
    }

    pub fn with_picker(picker: MessagePicker) -> Self {
        Self {
            phase: CountdownPhase::Idle,
            total_ms: 0,
            remaining_ms: 0,
            target_ms: None,
            reminder: ReminderScheduler::default(),
            picker,
        }
    }

    pub fn phase(&self) -> CountdownPhase {
        self.phase
    }

    pub fn total_ms(&self) -> u64 {
        self.total_ms
    }

    /// Remaining time as of the last `configure`, `pause` or `tick`.
    pub fn remaining_ms(&self) -> u64 {
        self.remaining_ms
    }

    /// Remaining time at `now_ms` without committing it.
    pub fn remaining_at(&self, now_ms: u64) -> u64 {
        match (self.phase, self.target_ms) {
            (CountdownPhase::Running, Some(target)) => {
                target.saturating_sub(now_ms).min(self.total_ms)
            }
            _ => self.remaining_ms,
        }
    }

    pub fn progress_at(&self, now_ms: u64) -> f32 {
        progress(self.remaining_at(now_ms), self.total_ms)
    }

    pub fn reminder(&self) -> ReminderSettings {
        self.reminder.settings()
    }

    pub fn last_reminder_boundary_ms(&self) -> u64 {
        self.reminder.last_boundary_ms()
    }

    pub fn is_configured(&self) -> bool {
        self.total_ms > 0
    }

    pub fn configure(
        &mut self,
        hours: i64,
        minutes: i64,
        seconds: i64,
        reminder: ReminderSettings,
    ) -> Result<()> {
        if self.phase != CountdownPhase::Idle {
            return Err(TimerError::transition("configure", self.phase.as_str()));
        }
        if !validate(hours, minutes, seconds) {
            return Err(TimerError::InvalidDuration {
                hours,
                minutes,
                seconds,
            });
        }
        self.total_ms = parse_to_ms(hours as u64, minutes as u64, seconds as u64);
        self.remaining_ms = self.total_ms;
        self.reminder = ReminderScheduler::new(reminder);
        Ok(())
    }

    pub fn start(&mut self, now_ms: u64) -> Result<()> {
        if self.phase != CountdownPhase::Idle || !self.is_configured() {
            return Err(TimerError::transition("start", self.phase.as_str()));
        }
        self.target_ms = Some(now_ms.saturating_add(self.total_ms));
        self.phase = CountdownPhase::Running;
        log::trace!("countdown started for {} ms", self.total_ms);
        Ok(())
    }

    /// `configure` followed by `start`. Nothing changes if either fails.
    pub fn start_with(
        &mut self,
        hours: i64,
        minutes: i64,
        seconds: i64,
        reminder: ReminderSettings,
        now_ms: u64,
    ) -> Result<()> {
        self.configure(hours, minutes, seconds, reminder)?;
        self.start(now_ms)
    }

    pub fn pause(&mut self, now_ms: u64) -> Result<()> {
        let target = match (self.phase, self.target_ms) {
            (CountdownPhase::Running, Some(target)) => target,
            _ => return Err(TimerError::transition("pause", self.phase.as_str())),
        };
        self.remaining_ms = target.saturating_sub(now_ms).min(self.total_ms);
        self.target_ms = None;
        self.phase = CountdownPhase::Paused;
        Ok(())
    }

    pub fn resume(&mut self, now_ms: u64) -> Result<()> {
        if self.phase != CountdownPhase::Paused {
            return Err(TimerError::transition("resume", self.phase.as_str()));
        }
        self.target_ms = Some(now_ms.saturating_add(self.remaining_ms));
        self.phase = CountdownPhase::Running;
        Ok(())
    }

    /// Back to an unconfigured `Idle` from any phase.
    pub fn reset(&mut self) {
        self.phase = CountdownPhase::Idle;
        self.total_ms = 0;
        self.remaining_ms = 0;
        self.target_ms = None;
        self.reminder = ReminderScheduler::default();
    }

    /// Advance the countdown to `now_ms`. Does nothing outside `Running`, so
    /// redundant calls after completion emit nothing.
    pub fn tick(&mut self, now_ms: u64) -> Vec<CountdownEvent> {
        let mut events = Vec::new();
        let target = match (self.phase, self.target_ms) {
            (CountdownPhase::Running, Some(target)) => target,
            _ => return events,
        };
        self.remaining_ms = target.saturating_sub(now_ms).min(self.total_ms);

        let elapsed = self.total_ms - self.remaining_ms;
        if let Some(boundary_ms) = self.reminder.check(elapsed, self.remaining_ms) {
            events.push(CountdownEvent::ReminderFired {
                message: self.picker.pick(),
                boundary_ms,
            });
        }

        if self.remaining_ms == 0 {
            self.target_ms = None;
            self.phase = CountdownPhase::Completed;
            events.push(CountdownEvent::Completed);
        }
        events
    }
}
