//! Periodic reminders during a countdown run.

use std::collections::hash_map::RandomState;
use std::hash::{BuildHasher, Hasher};

use crate::format::MS_PER_MINUTE;

pub const DEFAULT_INTERVAL_MINUTES: u32 = 30;
pub const MIN_INTERVAL_MINUTES: u32 = 1;
pub const MAX_INTERVAL_MINUTES: u32 = 120;
pub const PRESET_INTERVALS: [u32; 6] = [5, 10, 15, 30, 45, 60];

pub const MOTIVATIONAL_MESSAGES: [&str; 8] = [
    "Keep going, you're doing great!",
    "Stay on it, you're right on track.",
    "Push through, the finish is closer than it looks.",
    "Small steps add up. Keep them coming.",
    "Still moving forward. Don't stop now!",
    "Nice rhythm. Hold it.",
    "Heads down, focus on.",
    "Every minute counts. You've got this!",
];

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ReminderSettings {
    pub enabled: bool,
    pub interval_minutes: u32,
}

impl Default for ReminderSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            interval_minutes: DEFAULT_INTERVAL_MINUTES,
        }
    }
}

impl ReminderSettings {
    pub fn every(interval_minutes: u32) -> Self {
        Self {
            enabled: true,
            interval_minutes,
        }
    }

    /// Clamp a user-entered interval into the accepted range.
    pub fn clamp_interval(minutes: u32) -> u32 {
        minutes.clamp(MIN_INTERVAL_MINUTES, MAX_INTERVAL_MINUTES)
    }

    /// `None` when reminders are off or the interval is zero.
    pub fn interval_ms(&self) -> Option<u64> {
        if !self.enabled || self.interval_minutes == 0 {
            return None;
        }
        Some(self.interval_minutes as u64 * MS_PER_MINUTE)
    }
}

/// Tracks the last reminder boundary crossed in elapsed countdown time.
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct ReminderScheduler {
    settings: ReminderSettings,
    last_boundary_ms: u64,
}

impl ReminderScheduler {
    pub fn new(settings: ReminderSettings) -> Self {
        Self {
            settings,
            last_boundary_ms: 0,
        }
    }

    pub fn settings(&self) -> ReminderSettings {
        self.settings
    }

    pub fn last_boundary_ms(&self) -> u64 {
        self.last_boundary_ms
    }

    /// Returns the newly crossed boundary if a reminder is due. When several
    /// boundaries were passed since the last check only the latest counts;
    /// the skipped ones are not replayed.
    pub fn check(&mut self, elapsed_ms: u64, remaining_ms: u64) -> Option<u64> {
        let interval_ms = self.settings.interval_ms()?;
        if remaining_ms == 0 {
            return None;
        }
        if elapsed_ms.saturating_sub(self.last_boundary_ms) < interval_ms {
            return None;
        }
        self.last_boundary_ms = (elapsed_ms / interval_ms) * interval_ms;
        Some(self.last_boundary_ms)
    }
}

/// Uniform pick from [`MOTIVATIONAL_MESSAGES`] (xorshift64*).
#[derive(Clone, Debug)]
pub struct MessagePicker {
    state: u64,
}

impl MessagePicker {
    pub fn with_seed(seed: u64) -> Self {
        // xorshift is stuck at zero forever
        let state = if seed == 0 { 0x9E37_79B9_7F4A_7C15 } else { seed };
        Self { state }
    }

    pub fn from_entropy() -> Self {
        let mut hasher = RandomState::new().build_hasher();
        hasher.write_u64(std::process::id() as u64);
        Self::with_seed(hasher.finish())
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545_F491_4F6C_DD1D)
    }

    pub fn pick(&mut self) -> &'static str {
        let idx = (self.next_u64() % MOTIVATIONAL_MESSAGES.len() as u64) as usize;
        MOTIVATIONAL_MESSAGES[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIN: u64 = MS_PER_MINUTE;

    #[test]
    fn test_fires_once_per_boundary() {
        let mut sched = ReminderScheduler::new(ReminderSettings::every(1));
        assert_eq!(sched.check(59_999, 540_001), None);
        assert_eq!(sched.check(60_000, 540_000), Some(MIN));
        assert_eq!(sched.check(60_000, 540_000), None);
        assert_eq!(sched.check(119_000, 481_000), None);
        assert_eq!(sched.check(120_050, 479_950), Some(2 * MIN));
    }

    #[test]
    fn test_late_check_jumps_to_latest_boundary() {
        let mut sched = ReminderScheduler::new(ReminderSettings::every(1));
        assert_eq!(sched.check(125_000, 475_000), Some(2 * MIN));
        assert_eq!(sched.last_boundary_ms(), 120_000);
        assert_eq!(sched.check(170_000, 430_000), None);
        assert_eq!(sched.check(180_000, 420_000), Some(3 * MIN));
    }

    #[test]
    fn test_disabled_or_zero_interval_never_fires() {
        let mut off = ReminderScheduler::new(ReminderSettings::default());
        assert_eq!(off.check(10 * MIN, 1), None);

        let mut zero = ReminderScheduler::new(ReminderSettings::every(0));
        assert_eq!(zero.check(10 * MIN, 1), None);
        assert_eq!(zero.last_boundary_ms(), 0);
    }

    #[test]
    fn test_no_reminder_at_zero_remaining() {
        let mut sched = ReminderScheduler::new(ReminderSettings::every(1));
        assert_eq!(sched.check(MIN, 0), None);
        assert_eq!(sched.last_boundary_ms(), 0);
    }

    #[test]
    fn test_clamp_interval() {
        assert_eq!(ReminderSettings::clamp_interval(0), 1);
        assert_eq!(ReminderSettings::clamp_interval(45), 45);
        assert_eq!(ReminderSettings::clamp_interval(500), 120);
        assert_eq!(ReminderSettings::default().interval_minutes, 30);
        assert!(!ReminderSettings::default().enabled);
    }

    #[test]
    fn test_picker_is_deterministic_per_seed() {
        let mut a = MessagePicker::with_seed(42);
        let mut b = MessagePicker::with_seed(42);
        for _ in 0..16 {
            let msg = a.pick();
            assert_eq!(msg, b.pick());
            assert!(MOTIVATIONAL_MESSAGES.contains(&msg));
        }
    }

    #[test]
    fn test_picker_covers_the_set() {
        let mut picker = MessagePicker::with_seed(0);
        let mut seen = [false; MOTIVATIONAL_MESSAGES.len()];
        for _ in 0..1000 {
            let msg = picker.pick();
            if let Some(i) = MOTIVATIONAL_MESSAGES.iter().position(|m| *m == msg) {
                seen[i] = true;
            }
        }
        assert!(seen.iter().all(|&s| s));
    }
}
