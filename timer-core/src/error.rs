use thiserror::Error;

/// Why an engine refused a command. The engine state is unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TimerError {
    #[error("cannot {command} while {phase}")]
    InvalidTransition {
        command: &'static str,
        phase: &'static str,
    },

    #[error("invalid countdown duration {hours}h {minutes}m {seconds}s")]
    InvalidDuration {
        hours: i64,
        minutes: i64,
        seconds: i64,
    },
}

pub type Result<T> = core::result::Result<T, TimerError>;

impl TimerError {
    pub(crate) fn transition(command: &'static str, phase: &'static str) -> Self {
        TimerError::InvalidTransition { command, phase }
    }
}
