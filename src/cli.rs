use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::prefs::AppMode;

pub const DEFAULT_REFRESH_MS: u64 = 50;
const MIN_REFRESH_MS: u64 = 10;
const MAX_REFRESH_MS: u64 = 1000;

#[derive(Parser, Debug)]
#[command(name = "clock-timers")]
#[command(about = "Stopwatch with laps and countdown timer with reminders")]
pub struct Cli {
    /// Directory for saved preferences and lap history
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Display refresh and timer tick period in milliseconds
    #[arg(long, default_value_t = DEFAULT_REFRESH_MS)]
    pub refresh_ms: u64,

    /// Open directly in this mode
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Do not read or write any saved state
    #[arg(long)]
    pub no_persist: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModeArg {
    Stopwatch,
    Timer,
}

impl From<ModeArg> for AppMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Stopwatch => AppMode::Stopwatch,
            ModeArg::Timer => AppMode::Timer,
        }
    }
}

impl Cli {
    pub fn refresh_ms(&self) -> u64 {
        self.refresh_ms.clamp(MIN_REFRESH_MS, MAX_REFRESH_MS)
    }

    /// `--data-dir`, else `<data dir>/clock-timers`, else `./.clock-timers`.
    pub fn data_dir(&self) -> PathBuf {
        if let Some(dir) = &self.data_dir {
            return dir.clone();
        }
        dirs::data_dir()
            .map(|d| d.join("clock-timers"))
            .unwrap_or_else(|| PathBuf::from(".clock-timers"))
    }
}
