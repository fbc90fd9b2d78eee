//! One command per input line.

use crate::prefs::ColorSlot;

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Command {
    /// Empty line: start, pause or resume whatever is on screen.
    Enter,
    Lap,
    Reset,
    Back,
    Quit,
    Help,
    Mute,
    Display,
    Stopwatch,
    Timer,
    Theme(String),
    ThemeColor { slot: ColorSlot, color: String },
    Set { hours: i64, minutes: i64, seconds: i64 },
    Name(String),
    Remind(Remind),
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Remind {
    On,
    Off,
    Every(u32),
}

pub fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let cmd = match word.to_ascii_lowercase().as_str() {
        "" => Command::Enter,
        "l" | "lap" => Command::Lap,
        "r" | "reset" => Command::Reset,
        "q" | "back" => Command::Back,
        "quit" | "exit" => Command::Quit,
        "h" | "help" | "?" => Command::Help,
        "m" | "mute" => Command::Mute,
        "d" | "display" => Command::Display,
        "s" | "stopwatch" => Command::Stopwatch,
        "t" | "timer" => Command::Timer,
        "theme" if !rest.is_empty() => parse_theme(rest),
        "name" => Command::Name(rest.to_string()),
        "set" => {
            let (hours, minutes, seconds) = parse_hms(rest)?;
            Command::Set { hours, minutes, seconds }
        }
        "remind" => Command::Remind(match rest.to_ascii_lowercase().as_str() {
            "on" => Remind::On,
            "off" => Remind::Off,
            n => Remind::Every(n.trim_end_matches('m').parse().ok()?),
        }),
        _ => return None,
    };
    Some(cmd)
}

/// "theme <preset name>" or "theme bg|clock|accent #rrggbb".
fn parse_theme(rest: &str) -> Command {
    if let Some((slot, color)) = rest.split_once(char::is_whitespace) {
        if let Some(slot) = ColorSlot::parse(slot) {
            return Command::ThemeColor {
                slot,
                color: color.trim().to_string(),
            };
        }
    }
    Command::Theme(rest.to_string())
}

/// "H M S", "H:M:S", "M:S" or "S".
fn parse_hms(s: &str) -> Option<(i64, i64, i64)> {
    let parts: Vec<i64> = s
        .split(|c: char| c == ':' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .map(|p| p.parse::<i64>())
        .collect::<Result<_, _>>()
        .ok()?;
    match parts[..] {
        [s] => Some((0, 0, s)),
        [m, s] => Some((0, m, s)),
        [h, m, s] => Some((h, m, s)),
        _ => None,
    }
}
