use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use timer_core::reminder::{MAX_INTERVAL_MINUTES, MIN_INTERVAL_MINUTES};
use timer_core::{Lap, LapLedger, ReminderSettings};

use crate::prefs::{AppMode, DisplayStyle, Theme};

const KEY_MODE: &str = "clock-mode";
const KEY_THEME: &str = "clock-theme";
const KEY_MUTED: &str = "clock-sound-muted";
const KEY_DISPLAY: &str = "clock-display-mode";
const KEY_LAPS: &str = "clock-laps";
const KEY_TIMER_NAME: &str = "clock-timer-name";
const KEY_REMINDER_ENABLED: &str = "clock-reminder-enabled";
const KEY_REMINDER_INTERVAL: &str = "clock-reminder-interval";

pub const MAX_TIMER_NAME_CHARS: usize = 40;

/// One JSON document per preference key. Missing or malformed values load
/// as their default; write failures are logged and dropped.
pub struct TimerStorage {
    dir: Option<PathBuf>,
}

impl TimerStorage {
    pub fn new(dir: PathBuf) -> Self {
        if let Err(e) = fs::create_dir_all(&dir) {
            log::error!("Failed to create data dir {}: {}", dir.display(), e);
        }
        Self { dir: Some(dir) }
    }

    /// Storage that remembers nothing.
    pub fn disabled() -> Self {
        Self { dir: None }
    }

    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }

    fn path(&self, key: &str) -> Option<PathBuf> {
        self.dir.as_ref().map(|d| d.join(format!("{}.json", key)))
    }

    fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let path = self.path(key)?;
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                log::warn!("Failed to read {}: {}", path.display(), e);
                return None;
            }
        };
        match serde_json::from_str(&text) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("Ignoring malformed {}: {}", key, e);
                None
            }
        }
    }

    fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let Some(path) = self.path(key) else {
            return;
        };
        let data = match serde_json::to_string(value) {
            Ok(data) => data,
            Err(e) => {
                log::error!("Failed to encode {}: {}", key, e);
                return;
            }
        };
        let tmp = path.with_extension("json.tmp");
        let result = fs::write(&tmp, data).and_then(|_| fs::rename(&tmp, &path));
        if let Err(e) = result {
            log::error!("Failed to save {}: {}", key, e);
        }
    }

    /// `None` means the mode selection screen.
    pub fn load_mode(&self) -> Option<AppMode> {
        self.load::<Option<AppMode>>(KEY_MODE).flatten()
    }

    pub fn save_mode(&self, mode: Option<AppMode>) {
        self.save(KEY_MODE, &mode);
    }

    pub fn load_theme(&self) -> Theme {
        match self.load::<Theme>(KEY_THEME) {
            Some(theme) if theme.is_valid() => theme,
            Some(theme) => {
                log::warn!("Ignoring theme {:?} with invalid colours", theme.name);
                Theme::default()
            }
            None => Theme::default(),
        }
    }

    pub fn save_theme(&self, theme: &Theme) {
        self.save(KEY_THEME, theme);
    }

    pub fn load_muted(&self) -> bool {
        self.load(KEY_MUTED).unwrap_or(false)
    }

    pub fn save_muted(&self, muted: bool) {
        self.save(KEY_MUTED, &muted);
    }

    pub fn load_display_style(&self) -> DisplayStyle {
        self.load(KEY_DISPLAY).unwrap_or_default()
    }

    pub fn save_display_style(&self, style: DisplayStyle) {
        self.save(KEY_DISPLAY, &style);
    }

    pub fn load_laps(&self) -> LapLedger {
        let Some(laps) = self.load::<Vec<Lap>>(KEY_LAPS) else {
            return LapLedger::new();
        };
        LapLedger::from_newest_first(&laps).unwrap_or_else(|| {
            log::warn!("Ignoring inconsistent lap history ({} laps)", laps.len());
            LapLedger::new()
        })
    }

    pub fn save_laps(&self, laps: &LapLedger) {
        self.save(KEY_LAPS, &laps.to_vec());
    }

    pub fn load_timer_name(&self) -> String {
        let name: String = self.load(KEY_TIMER_NAME).unwrap_or_default();
        truncate_name(&name)
    }

    pub fn save_timer_name(&self, name: &str) {
        self.save(KEY_TIMER_NAME, name);
    }

    pub fn load_reminder(&self) -> ReminderSettings {
        let defaults = ReminderSettings::default();
        let enabled = self.load(KEY_REMINDER_ENABLED).unwrap_or(defaults.enabled);
        let interval_minutes = match self.load::<u32>(KEY_REMINDER_INTERVAL) {
            Some(m) if (MIN_INTERVAL_MINUTES..=MAX_INTERVAL_MINUTES).contains(&m) => m,
            Some(m) => {
                log::warn!("Ignoring out-of-range reminder interval {}", m);
                defaults.interval_minutes
            }
            None => defaults.interval_minutes,
        };
        ReminderSettings {
            enabled,
            interval_minutes,
        }
    }

    pub fn save_reminder(&self, reminder: &ReminderSettings) {
        self.save(KEY_REMINDER_ENABLED, &reminder.enabled);
        self.save(KEY_REMINDER_INTERVAL, &reminder.interval_minutes);
    }
}

pub fn truncate_name(name: &str) -> String {
    name.chars().take(MAX_TIMER_NAME_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage() -> (tempfile::TempDir, TimerStorage) {
        let dir = tempfile::tempdir().unwrap();
        let storage = TimerStorage::new(dir.path().to_path_buf());
        (dir, storage)
    }

    fn write_raw(dir: &tempfile::TempDir, key: &str, text: &str) {
        fs::write(dir.path().join(format!("{}.json", key)), text).unwrap();
    }

    #[test]
    fn test_defaults_when_empty() {
        let (_dir, storage) = storage();
        assert_eq!(storage.load_mode(), None);
        assert_eq!(storage.load_theme(), Theme::default());
        assert!(!storage.load_muted());
        assert_eq!(storage.load_display_style(), DisplayStyle::Digital);
        assert!(storage.load_laps().is_empty());
        assert_eq!(storage.load_timer_name(), "");
        assert_eq!(storage.load_reminder(), ReminderSettings::default());
    }

    #[test]
    fn test_save_and_load() {
        let (_dir, storage) = storage();
        storage.save_mode(Some(AppMode::Timer));
        storage.save_muted(true);
        storage.save_display_style(DisplayStyle::Analog);
        storage.save_timer_name("Study Session");
        storage.save_reminder(&ReminderSettings::every(15));
        let theme = Theme::preset("Aqua").unwrap();
        storage.save_theme(&theme);

        assert_eq!(storage.load_mode(), Some(AppMode::Timer));
        assert!(storage.load_muted());
        assert_eq!(storage.load_display_style(), DisplayStyle::Analog);
        assert_eq!(storage.load_timer_name(), "Study Session");
        assert_eq!(storage.load_reminder(), ReminderSettings::every(15));
        assert_eq!(storage.load_theme(), theme);

        storage.save_mode(None);
        assert_eq!(storage.load_mode(), None);
    }

    #[test]
    fn test_laps_persist_newest_first() {
        let (dir, storage) = storage();
        let mut ledger = LapLedger::new();
        ledger.record(300);
        ledger.record(700);
        storage.save_laps(&ledger);

        let text = fs::read_to_string(dir.path().join("clock-laps.json")).unwrap();
        assert!(text.starts_with(r#"[{"id":2,"splitMs":400,"totalMs":700}"#));
        assert_eq!(storage.load_laps(), ledger);
    }

    #[test]
    fn test_malformed_values_fall_back() {
        let (dir, storage) = storage();
        write_raw(&dir, KEY_MODE, "\"sundial\"");
        write_raw(&dir, KEY_MUTED, "yes please");
        write_raw(&dir, KEY_DISPLAY, "42");
        write_raw(&dir, KEY_LAPS, r#"[{"id":5,"splitMs":1,"totalMs":1}]"#);
        write_raw(&dir, KEY_REMINDER_ENABLED, "{");
        write_raw(&dir, KEY_REMINDER_INTERVAL, "500");
        write_raw(
            &dir,
            KEY_THEME,
            r##"{"name":"Mine","bg":"black","clockColor":"#ffffff","accent":"#ffffff"}"##,
        );

        assert_eq!(storage.load_mode(), None);
        assert!(!storage.load_muted());
        assert_eq!(storage.load_display_style(), DisplayStyle::Digital);
        assert!(storage.load_laps().is_empty());
        assert_eq!(storage.load_reminder(), ReminderSettings::default());
        assert_eq!(storage.load_theme(), Theme::default());
    }

    #[test]
    fn test_keys_are_independent() {
        let (dir, storage) = storage();
        storage.save_muted(true);
        write_raw(&dir, KEY_REMINDER_INTERVAL, "0");
        storage.save(KEY_REMINDER_ENABLED, &true);
        assert!(storage.load_muted());
        assert_eq!(storage.load_reminder(), ReminderSettings::every(30));
    }

    #[test]
    fn test_long_name_truncated() {
        let (_dir, storage) = storage();
        storage.save_timer_name(&"x".repeat(60));
        assert_eq!(storage.load_timer_name().chars().count(), MAX_TIMER_NAME_CHARS);
    }

    #[test]
    fn test_disabled_storage() {
        let storage = TimerStorage::disabled();
        storage.save_muted(true);
        assert!(!storage.load_muted());
        assert!(storage.dir().is_none());
    }
}
