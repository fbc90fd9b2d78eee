use std::io::{self, Write};

use timer_core::CountdownEvent;

const BELL: &str = "\x07";

/// Context for everything that makes noise. The mute flag lives here and
/// nowhere else.
#[derive(Clone, Debug, Default)]
pub struct AlertConfig {
    pub muted: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Alert<'a> {
    Reminder { message: &'a str },
    Completed { timer_name: &'a str },
}

impl<'a> Alert<'a> {
    pub fn from_event(event: &CountdownEvent, timer_name: &'a str) -> Self {
        match *event {
            CountdownEvent::ReminderFired { message, .. } => Alert::Reminder { message },
            CountdownEvent::Completed => Alert::Completed { timer_name },
        }
    }

    pub fn text(&self) -> String {
        match self {
            Alert::Reminder { message } => format!("Reminder: {}", message),
            Alert::Completed { timer_name } if timer_name.is_empty() => {
                "Target achieved! Great job staying focused.".to_string()
            }
            Alert::Completed { timer_name } => {
                format!("Target achieved! \"{}\" completed.", timer_name)
            }
        }
    }

    /// A short chime for reminders, a longer one for completion.
    fn chimes(&self) -> usize {
        match self {
            Alert::Reminder { .. } => 1,
            Alert::Completed { .. } => 3,
        }
    }
}

pub fn fire_alert(config: &AlertConfig, out: &mut impl Write, alert: &Alert) -> io::Result<()> {
    let text = alert.text();
    log::info!("{}", text);
    if !config.muted {
        out.write_all(BELL.repeat(alert.chimes()).as_bytes())?;
    }
    writeln!(out, "\n*** {} ***", text)?;
    out.flush()
}
