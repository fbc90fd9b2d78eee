//! Pure timing logic library with no platform dependencies.
//!
//! Engines never read a clock: every time-dependent call takes `now_ms`, a
//! monotonic millisecond reading owned by the host. That keeps them
//! testable with simulated time and immune to irregular refresh cadence.

pub mod countdown;
pub mod error;
pub mod format;
pub mod laps;
pub mod reminder;
pub mod stopwatch;

pub use countdown::{CountdownEngine, CountdownEvent, CountdownPhase};
pub use error::{Result, TimerError};
pub use format::{format_duration, format_time, parse_to_ms, progress, validate};
pub use laps::{Lap, LapLedger};
pub use reminder::{MessagePicker, ReminderScheduler, ReminderSettings};
pub use stopwatch::{StopwatchEngine, StopwatchPhase};
