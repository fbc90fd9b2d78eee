use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppMode {
    Stopwatch,
    Timer,
}

impl AppMode {
    pub fn label(&self) -> &'static str {
        match self {
            AppMode::Stopwatch => "Stopwatch",
            AppMode::Timer => "Timer",
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayStyle {
    #[default]
    Digital,
    Analog,
}

impl DisplayStyle {
    pub fn toggled(self) -> Self {
        match self {
            DisplayStyle::Digital => DisplayStyle::Analog,
            DisplayStyle::Analog => DisplayStyle::Digital,
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub name: String,
    pub bg: String,
    pub clock_color: String,
    pub accent: String,
}

impl Default for Theme {
    fn default() -> Self {
        PRESET_THEMES[0].to_theme()
    }
}

impl Theme {
    /// Every colour must be `#rrggbb`.
    pub fn is_valid(&self) -> bool {
        [&self.bg, &self.clock_color, &self.accent]
            .iter()
            .all(|c| is_hex_color(c))
    }

    /// Copy of this theme with one colour replaced. `None` unless `color`
    /// is `#rrggbb`.
    pub fn with_color(&self, slot: ColorSlot, color: &str) -> Option<Theme> {
        let color = color.trim();
        if !is_hex_color(color) {
            return None;
        }
        let mut theme = self.clone();
        theme.name = CUSTOM_THEME_NAME.to_string();
        let field = match slot {
            ColorSlot::Background => &mut theme.bg,
            ColorSlot::Clock => &mut theme.clock_color,
            ColorSlot::Accent => &mut theme.accent,
        };
        *field = color.to_ascii_lowercase();
        Some(theme)
    }

    pub fn preset(name: &str) -> Option<Theme> {
        PRESET_THEMES
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name.trim()))
            .map(PresetTheme::to_theme)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ColorSlot {
    Background,
    Clock,
    Accent,
}

impl ColorSlot {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "bg" | "background" => Some(ColorSlot::Background),
            "clock" => Some(ColorSlot::Clock),
            "accent" => Some(ColorSlot::Accent),
            _ => None,
        }
    }
}

pub struct PresetTheme {
    pub name: &'static str,
    pub bg: &'static str,
    pub clock_color: &'static str,
    pub accent: &'static str,
}

impl PresetTheme {
    fn to_theme(&self) -> Theme {
        Theme {
            name: self.name.to_string(),
            bg: self.bg.to_string(),
            clock_color: self.clock_color.to_string(),
            accent: self.accent.to_string(),
        }
    }
}

pub const CUSTOM_THEME_NAME: &str = "Custom";

pub const PRESET_THEMES: [PresetTheme; 6] = [
    PresetTheme { name: "Cyan Glow", bg: "#060b18", clock_color: "#e0ffff", accent: "#00e5ff" },
    PresetTheme { name: "Neon Blue", bg: "#050a15", clock_color: "#d0e0ff", accent: "#448aff" },
    PresetTheme { name: "Aqua", bg: "#051a1a", clock_color: "#b2ffff", accent: "#00bfa5" },
    PresetTheme { name: "Electric", bg: "#0a0520", clock_color: "#e8d5ff", accent: "#b040ff" },
    PresetTheme { name: "Hot Pink", bg: "#15050f", clock_color: "#ffe0f0", accent: "#ff2d87" },
    PresetTheme { name: "Lime", bg: "#0a1205", clock_color: "#e8ffe0", accent: "#76ff03" },
];

fn is_hex_color(s: &str) -> bool {
    s.len() == 7 && s.starts_with('#') && s[1..].chars().all(|c| c.is_ascii_hexdigit())
}
