use timer_core::{
    validate, CountdownEngine, CountdownEvent, CountdownPhase, ReminderSettings, Result,
};

use crate::storage::truncate_name;

/// Hours/minutes/seconds typed in before the timer starts.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct DurationInput {
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl DurationInput {
    /// Out-of-range fields are pulled back into 0..=23 / 0..=59.
    pub fn clamped(hours: i64, minutes: i64, seconds: i64) -> Self {
        Self {
            hours: hours.clamp(0, 23),
            minutes: minutes.clamp(0, 59),
            seconds: seconds.clamp(0, 59),
        }
    }

    pub fn is_valid(&self) -> bool {
        validate(self.hours, self.minutes, self.seconds)
    }
}

pub struct CountdownState {
    pub engine: CountdownEngine,
    pub input: DurationInput,
    pub name: String,
    pub reminder: ReminderSettings,
}

impl CountdownState {
    pub fn new(engine: CountdownEngine, name: String, reminder: ReminderSettings) -> Self {
        Self {
            engine,
            input: DurationInput::default(),
            name: truncate_name(&name),
            reminder,
        }
    }

    pub fn set_input(&mut self, hours: i64, minutes: i64, seconds: i64) -> DurationInput {
        self.input = DurationInput::clamped(hours, minutes, seconds);
        self.input
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = truncate_name(name.trim());
    }

    pub fn set_reminder_enabled(&mut self, enabled: bool) {
        self.reminder.enabled = enabled;
    }

    pub fn set_reminder_interval(&mut self, minutes: u32) {
        self.reminder = ReminderSettings::every(ReminderSettings::clamp_interval(minutes));
    }

    /// Enter: start from the typed duration, pause, resume, or clear a
    /// finished timer. Returns the phase after the transition.
    pub fn toggle(&mut self, now_ms: u64) -> Result<CountdownPhase> {
        match self.engine.phase() {
            CountdownPhase::Idle => {
                let DurationInput { hours, minutes, seconds } = self.input;
                self.engine
                    .start_with(hours, minutes, seconds, self.reminder, now_ms)?;
            }
            CountdownPhase::Running => self.engine.pause(now_ms)?,
            CountdownPhase::Paused => self.engine.resume(now_ms)?,
            CountdownPhase::Completed => self.engine.reset(),
        }
        Ok(self.engine.phase())
    }

    pub fn tick(&mut self, now_ms: u64) -> Vec<CountdownEvent> {
        self.engine.tick(now_ms)
    }

    pub fn reset(&mut self) {
        self.engine.reset();
    }
}
