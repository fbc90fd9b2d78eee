use std::fmt::Write;

use timer_core::format::MS_PER_SECOND;
use timer_core::reminder::PRESET_INTERVALS;
use timer_core::{format_duration, CountdownPhase, StopwatchPhase};

use crate::countdown::CountdownState;
use crate::prefs::{AppMode, DisplayStyle, Theme};
use crate::stopwatch::{LapMark, StopwatchState};

const PROGRESS_WIDTH: usize = 30;
const RULE: &str = "----------------------------------------";

/// Hand angles in degrees, clockwise from twelve.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct ClockHands {
    pub hour: f64,
    pub minute: f64,
    pub second: f64,
}

impl ClockHands {
    pub fn at(ms: u64) -> Self {
        let total_secs = ms as f64 / MS_PER_SECOND as f64;
        let hours = total_secs / 3600.0;
        let minutes = (total_secs % 3600.0) / 60.0;
        let seconds = total_secs % 60.0;
        Self {
            hour: (hours.floor() % 12.0) * 30.0 + minutes * 0.5,
            minute: minutes * 6.0,
            second: seconds * 6.0,
        }
    }
}

pub fn clock_face(ms: u64, style: DisplayStyle, show_centiseconds: bool) -> String {
    match style {
        DisplayStyle::Digital => format_duration(ms, show_centiseconds),
        DisplayStyle::Analog => {
            let hands = ClockHands::at(ms);
            format!(
                "hour {:5.1}°  minute {:5.1}°  second {:5.1}°",
                hands.hour, hands.minute, hands.second
            )
        }
    }
}

/// "5 10 15 30 45 60".
pub fn preset_intervals() -> String {
    PRESET_INTERVALS
        .iter()
        .map(|m| m.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn progress_bar(fraction: f32) -> String {
    let fraction = fraction.clamp(0.0, 1.0);
    let filled = (fraction * PROGRESS_WIDTH as f32).round() as usize;
    format!(
        "[{}{}] {:>3}% complete",
        "#".repeat(filled),
        "-".repeat(PROGRESS_WIDTH - filled),
        (fraction * 100.0).round() as u32
    )
}

fn header(s: &mut String, title: &str, theme: &Theme, muted: bool) {
    writeln!(s, "{}", RULE).ok();
    writeln!(
        s,
        "{}   theme: {}{}",
        title,
        theme.name,
        if muted { "   [muted]" } else { "" }
    )
    .ok();
    writeln!(s, "{}", RULE).ok();
}

pub fn draw_mode_select(theme: &Theme, muted: bool) -> String {
    let mut s = String::new();
    header(&mut s, "CLOCK", theme, muted);
    writeln!(s, "  s   Stopwatch   count up with laps").ok();
    writeln!(s, "  t   Timer       count down with reminders").ok();
    writeln!(s, "  h   Help        quit  Exit").ok();
    s
}

pub fn stopwatch_line(sw: &StopwatchState, now_ms: u64, style: DisplayStyle) -> String {
    let elapsed = sw.engine.current_elapsed_ms(now_ms);
    format!("  {}  ({})", clock_face(elapsed, style, true), sw.engine.phase().as_str())
}

pub fn draw_stopwatch(
    sw: &StopwatchState,
    now_ms: u64,
    style: DisplayStyle,
    theme: &Theme,
    muted: bool,
) -> String {
    let mut s = String::new();
    header(&mut s, "STOPWATCH", theme, muted);
    writeln!(s, "{}", stopwatch_line(sw, now_ms, style)).ok();

    let rows = sw.lap_rows();
    if !rows.is_empty() {
        writeln!(s, "\n  Laps").ok();
        for (lap, mark) in rows {
            let tag = match mark {
                Some(LapMark::Best) => "  best",
                Some(LapMark::Worst) => "  worst",
                None => "",
            };
            writeln!(
                s,
                "  Lap {:<3} {}  {}{}",
                lap.id,
                format_duration(lap.split_ms, true),
                format_duration(lap.total_ms, true),
                tag
            )
            .ok();
        }
    }

    let keys = match sw.engine.phase() {
        StopwatchPhase::Stopped => "Enter start",
        StopwatchPhase::Running => "l lap   Enter pause",
        StopwatchPhase::Paused => "Enter resume   r reset",
    };
    writeln!(s, "\n  {}   q back", keys).ok();
    s
}

pub fn countdown_line(cd: &CountdownState, now_ms: u64, style: DisplayStyle) -> String {
    let remaining = cd.engine.remaining_at(now_ms);
    format!(
        "  {}  {}",
        clock_face(remaining, style, false),
        progress_bar(cd.engine.progress_at(now_ms))
    )
}

pub fn draw_countdown(
    cd: &CountdownState,
    now_ms: u64,
    style: DisplayStyle,
    theme: &Theme,
    muted: bool,
) -> String {
    let mut s = String::new();
    header(&mut s, "TIMER", theme, muted);
    if !cd.name.is_empty() {
        writeln!(s, "  {}", cd.name).ok();
    }

    let phase = cd.engine.phase();
    if phase == CountdownPhase::Idle {
        let input = cd.input;
        writeln!(
            s,
            "  duration  {:02}:{:02}:{:02}{}",
            input.hours,
            input.minutes,
            input.seconds,
            if input.is_valid() { "" } else { "   (set a duration first)" }
        )
        .ok();
        if cd.reminder.enabled {
            writeln!(s, "  reminders every {} min", cd.reminder.interval_minutes).ok();
        } else {
            writeln!(s, "  reminders off").ok();
        }
        writeln!(s, "  presets   {} min", preset_intervals()).ok();
        writeln!(s, "\n  set H:M:S   name TEXT   remind on|off|MIN   Enter start   q back").ok();
        return s;
    }

    writeln!(s, "{}", countdown_line(cd, now_ms, style)).ok();
    let keys = match phase {
        CountdownPhase::Running => "Enter pause   r reset",
        CountdownPhase::Paused => "Enter resume   r reset",
        _ => "Enter new timer",
    };
    writeln!(s, "\n  {}   q back", keys).ok();
    s
}

pub fn help_text(mode: Option<AppMode>) -> String {
    let text = match mode {
        None => {
            "Clock\n\
             \n\
             s       Stopwatch\n\
             t       Timer\n\
             m       Toggle sound\n\
             d       Toggle digital/analog\n\
             theme N Pick a theme (Cyan Glow, Neon Blue, Aqua, Electric, Hot Pink, Lime)\n\
             theme bg|clock|accent #rrggbb  Custom colour\n\
             quit    Exit"
        }
        Some(AppMode::Stopwatch) => {
            "Stopwatch\n\
             \n\
             Enter   Start / Pause / Resume\n\
             l       Record lap (while running)\n\
             r       Reset time and laps\n\
             q       Back to mode select"
        }
        Some(AppMode::Timer) => {
            "Timer\n\
             \n\
             set H:M:S     Duration, up to 23:59:59\n\
             name TEXT     Label shown while running\n\
             remind on|off Interval reminders\n\
             remind MIN    Reminder every MIN minutes (1-120)\n\
             Enter         Start / Pause / Resume\n\
             r             Reset\n\
             q             Back to mode select"
        }
    };
    if mode == Some(AppMode::Timer) {
        format!("{}\n\nReminder presets: {} min", text, preset_intervals())
    } else {
        text.to_string()
    }
}
