mod alerts;
mod cli;
mod commands;
mod countdown;
mod prefs;
mod stopwatch;
mod storage;
mod ui;

use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use timer_core::{CountdownEngine, CountdownPhase, StopwatchPhase, TimerError};

use crate::alerts::{fire_alert, Alert, AlertConfig};
use crate::cli::Cli;
use crate::commands::{parse_command, Command, Remind};
use crate::countdown::CountdownState;
use crate::prefs::{AppMode, DisplayStyle, Theme};
use crate::stopwatch::StopwatchState;
use crate::storage::TimerStorage;

#[derive(Debug)]
enum AppOp {
    Input(String),
    Pump,
    Quit,
}

#[derive(Debug)]
enum PumpOp {
    Start(u64),
    Stop,
    Quit,
}

struct TimersApp {
    epoch: Instant,
    storage: TimerStorage,
    refresh_ms: u64,

    mode: Option<AppMode>,
    alert_config: AlertConfig,
    theme: Theme,
    display: DisplayStyle,

    stopwatch: StopwatchState,
    countdown: CountdownState,

    pump_tx: Sender<PumpOp>,
    pump_running: bool,
}

impl TimersApp {
    fn new(cli: &Cli, pump_tx: Sender<PumpOp>) -> Self {
        let storage = if cli.no_persist {
            TimerStorage::disabled()
        } else {
            TimerStorage::new(cli.data_dir())
        };
        if let Some(dir) = storage.dir() {
            log::info!("Preferences in {}", dir.display());
        }

        let mode = cli.mode.map(AppMode::from).or_else(|| storage.load_mode());
        let countdown = CountdownState::new(
            CountdownEngine::new(),
            storage.load_timer_name(),
            storage.load_reminder(),
        );

        Self {
            epoch: Instant::now(),
            refresh_ms: cli.refresh_ms(),
            mode,
            alert_config: AlertConfig {
                muted: storage.load_muted(),
            },
            theme: storage.load_theme(),
            display: storage.load_display_style(),
            stopwatch: StopwatchState::restore(storage.load_laps()),
            countdown,
            storage,
            pump_tx,
            pump_running: false,
        }
    }

    fn now_ms(&self) -> u64 {
        self.epoch.elapsed().as_millis() as u64
    }

    fn print(&self, text: &str) {
        let mut out = io::stdout().lock();
        if let Err(e) = out.write_all(text.as_bytes()).and_then(|_| out.flush()) {
            log::error!("can't write to terminal: {}", e);
        }
    }

    fn notice(&self, msg: &str) {
        self.print(&format!("\n  ! {}\n", msg));
    }

    fn rejected(&self, e: TimerError) {
        log::debug!("command rejected: {}", e);
        self.notice(&e.to_string());
    }

    fn redraw(&self) {
        let now = self.now_ms();
        let muted = self.alert_config.muted;
        let screen = match self.mode {
            None => ui::draw_mode_select(&self.theme, muted),
            Some(AppMode::Stopwatch) => {
                ui::draw_stopwatch(&self.stopwatch, now, self.display, &self.theme, muted)
            }
            Some(AppMode::Timer) => {
                ui::draw_countdown(&self.countdown, now, self.display, &self.theme, muted)
            }
        };
        self.print(&format!("\n{}", screen));
    }

    /// Rewrite only the clock line in place.
    fn refresh(&self, line: String) {
        self.print(&format!("\r{:<72}", line));
    }

    fn start_pump(&mut self) {
        if !self.pump_running {
            self.pump_running = true;
            self.pump_tx.send(PumpOp::Start(self.refresh_ms)).ok();
        }
    }

    fn stop_pump(&mut self) {
        if self.pump_running {
            self.pump_running = false;
            self.pump_tx.send(PumpOp::Stop).ok();
        }
    }

    fn set_theme(&mut self, theme: Theme) {
        log::info!("theme: {}", theme.name);
        self.theme = theme;
        self.storage.save_theme(&self.theme);
        self.redraw();
    }

    fn switch_mode(&mut self, mode: Option<AppMode>) {
        self.stop_pump();
        self.mode = mode;
        self.storage.save_mode(mode);
        log::info!("mode: {}", mode.map(|m| m.label()).unwrap_or("select"));
        self.redraw();
    }

    fn handle_pump(&mut self) {
        let now = self.now_ms();
        match self.mode {
            Some(AppMode::Stopwatch) => {
                self.refresh(ui::stopwatch_line(&self.stopwatch, now, self.display));
            }
            Some(AppMode::Timer) => {
                let fired = match self.tick_timer(now, &mut io::stdout().lock()) {
                    Ok(fired) => fired,
                    Err(e) => {
                        log::error!("can't show alert: {}", e);
                        1
                    }
                };
                if fired == 0 && self.pump_running {
                    self.refresh(ui::countdown_line(&self.countdown, now, self.display));
                } else {
                    self.redraw();
                }
            }
            None => self.stop_pump(),
        }
    }

    /// Advance the countdown, write its alerts to `out` and stop the pump
    /// once it is no longer running. Returns the number of alerts.
    fn tick_timer(&mut self, now_ms: u64, out: &mut impl Write) -> io::Result<usize> {
        let events = self.countdown.tick(now_ms);
        if self.countdown.engine.phase() != CountdownPhase::Running {
            self.stop_pump();
        }
        for event in &events {
            let alert = Alert::from_event(event, &self.countdown.name);
            fire_alert(&self.alert_config, out, &alert)?;
        }
        Ok(events.len())
    }

    /// Returns false when the app should exit.
    fn handle_input(&mut self, line: &str) -> bool {
        let Some(cmd) = parse_command(line) else {
            self.notice("unknown command, h for help");
            return true;
        };
        match cmd {
            Command::Quit => return false,
            Command::Back if self.mode.is_none() => return false,
            Command::Help => self.print(&format!("\n{}\n", ui::help_text(self.mode))),
            Command::Mute => {
                self.alert_config.muted = !self.alert_config.muted;
                self.storage.save_muted(self.alert_config.muted);
                self.redraw();
            }
            Command::Display => {
                self.display = self.display.toggled();
                self.storage.save_display_style(self.display);
                self.redraw();
            }
            Command::Theme(name) => match Theme::preset(&name) {
                Some(theme) => self.set_theme(theme),
                None => self.notice(&format!("no theme named {:?}", name)),
            },
            Command::ThemeColor { slot, color } => match self.theme.with_color(slot, &color) {
                Some(theme) => self.set_theme(theme),
                None => self.notice(&format!("{:?} is not a #rrggbb colour", color)),
            },
            cmd => match self.mode {
                None => self.handle_mode_select(cmd),
                Some(AppMode::Stopwatch) => self.handle_stopwatch(cmd),
                Some(AppMode::Timer) => self.handle_timer(cmd),
            },
        }
        true
    }

    fn handle_mode_select(&mut self, cmd: Command) {
        match cmd {
            Command::Stopwatch => self.switch_mode(Some(AppMode::Stopwatch)),
            Command::Timer => self.switch_mode(Some(AppMode::Timer)),
            _ => self.notice("pick s (stopwatch) or t (timer)"),
        }
    }

    fn handle_stopwatch(&mut self, cmd: Command) {
        let now = self.now_ms();
        match cmd {
            Command::Enter => match self.stopwatch.toggle(now) {
                Ok(StopwatchPhase::Running) => self.start_pump(),
                Ok(_) => self.stop_pump(),
                Err(e) => self.rejected(e),
            },
            Command::Lap => match self.stopwatch.record_lap(now) {
                Ok(lap) => {
                    log::debug!("lap {} split {} ms", lap.id, lap.split_ms);
                    self.storage.save_laps(self.stopwatch.engine.laps());
                }
                Err(e) => self.rejected(e),
            },
            Command::Reset => {
                self.stop_pump();
                self.stopwatch.reset();
                self.storage.save_laps(self.stopwatch.engine.laps());
            }
            Command::Back => {
                if self.stopwatch.engine.is_running() {
                    self.stopwatch.engine.pause(now).ok();
                }
                self.switch_mode(None);
                return;
            }
            _ => {
                self.notice("not available in stopwatch, h for help");
                return;
            }
        }
        self.redraw();
    }

    fn handle_timer(&mut self, cmd: Command) {
        let now = self.now_ms();
        match cmd {
            Command::Set {
                hours,
                minutes,
                seconds,
            } => {
                if self.countdown.engine.phase() != CountdownPhase::Idle {
                    self.notice("reset the timer before changing its duration");
                    return;
                }
                self.countdown.set_input(hours, minutes, seconds);
            }
            Command::Name(name) => {
                self.countdown.set_name(&name);
                self.storage.save_timer_name(&self.countdown.name);
            }
            Command::Remind(remind) => {
                match remind {
                    Remind::On => self.countdown.set_reminder_enabled(true),
                    Remind::Off => self.countdown.set_reminder_enabled(false),
                    Remind::Every(minutes) => self.countdown.set_reminder_interval(minutes),
                }
                self.storage.save_reminder(&self.countdown.reminder);
            }
            Command::Enter => match self.countdown.toggle(now) {
                Ok(CountdownPhase::Running) => self.start_pump(),
                Ok(_) => self.stop_pump(),
                Err(e) => self.rejected(e),
            },
            Command::Reset => {
                self.stop_pump();
                self.countdown.reset();
            }
            Command::Back => {
                self.countdown.reset();
                self.switch_mode(None);
                return;
            }
            _ => {
                self.notice("not available in timer, h for help");
                return;
            }
        }
        self.redraw();
    }

    fn shutdown(&mut self) {
        let now = self.now_ms();
        if self.stopwatch.engine.is_running() {
            self.stopwatch.engine.pause(now).ok();
        }
        self.stop_pump();
        self.pump_tx.send(PumpOp::Quit).ok();
    }
}

/// Sends `Pump` every period while started; blocks while stopped.
fn pump_thread(ctl: Receiver<PumpOp>, main: Sender<AppOp>) {
    let mut period: Option<Duration> = None;

    loop {
        let op = match period {
            Some(p) => match ctl.recv_timeout(p) {
                Ok(op) => op,
                Err(RecvTimeoutError::Timeout) => {
                    if main.send(AppOp::Pump).is_err() {
                        break;
                    }
                    continue;
                }
                Err(RecvTimeoutError::Disconnected) => break,
            },
            None => match ctl.recv() {
                Ok(op) => op,
                Err(_) => break,
            },
        };

        match op {
            PumpOp::Start(ms) => period = Some(Duration::from_millis(ms.max(1))),
            PumpOp::Stop => period = None,
            PumpOp::Quit => break,
        }
    }
}

fn input_thread(main: Sender<AppOp>) {
    for line in io::stdin().lock().lines() {
        match line {
            Ok(line) => {
                if main.send(AppOp::Input(line)).is_err() {
                    return;
                }
            }
            Err(e) => {
                log::error!("can't read input: {}", e);
                break;
            }
        }
    }
    main.send(AppOp::Quit).ok();
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let (main_tx, main_rx) = mpsc::channel();
    let (pump_tx, pump_rx) = mpsc::channel();

    let pump_main = main_tx.clone();
    let pump = thread::Builder::new()
        .name("pump".into())
        .spawn(move || pump_thread(pump_rx, pump_main))
        .context("can't spawn pump thread")?;
    thread::Builder::new()
        .name("input".into())
        .spawn(move || input_thread(main_tx))
        .context("can't spawn input thread")?;

    let mut app = TimersApp::new(&cli, pump_tx);
    app.redraw();

    for op in main_rx.iter() {
        match op {
            AppOp::Input(line) => {
                if !app.handle_input(&line) {
                    break;
                }
            }
            AppOp::Pump => app.handle_pump(),
            AppOp::Quit => break,
        }
    }

    app.shutdown();
    pump.join().ok();
    Ok(())
}
