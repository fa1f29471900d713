//! Player-facing game settings and their persisted form.
//!
//! The settings file is a flat JSON object. Unknown keys are ignored, missing
//! keys take their default, and a value of the wrong type or an unrecognised
//! enum variant falls back to that field's default instead of discarding the
//! whole file.

use crate::constants::{MAX_INITIAL_SPEED_MS, MIN_INITIAL_SPEED_MS, SETTINGS_KEY};
use crate::storage::{load_json_or_default, save_json, Storage, StorageError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// Generate `ALL`, `name()` and `next()` for a closed, cyclable option enum.
macro_rules! cycle_enum_impl {
    ($name:ident, [$($variant:ident),+ $(,)?]) => {
        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant)),+
                }
            }

            /// The following option, wrapping around after the last one.
            pub fn next(&self) -> Self {
                let index = Self::ALL.iter().position(|v| v == self).unwrap_or(0);
                Self::ALL[(index + 1) % Self::ALL.len()]
            }
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Extreme,
}

cycle_enum_impl!(Difficulty, [Easy, Medium, Hard, Extreme]);

impl Difficulty {
    /// Tick interval a fresh game starts with, in milliseconds.
    pub fn initial_speed_ms(&self) -> u64 {
        match self {
            Self::Easy => 200,
            Self::Medium => 150,
            Self::Hard => 100,
            Self::Extreme => 60,
        }
    }
}

/// Named field presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FieldSize {
    Small,
    #[default]
    Medium,
    Large,
    Classic,
}

cycle_enum_impl!(FieldSize, [Small, Medium, Large, Classic]);

impl FieldSize {
    /// Field width in cells.
    pub fn width(&self) -> i32 {
        match self {
            Self::Small => 15,
            Self::Medium => 20,
            Self::Large => 30,
            Self::Classic => 25,
        }
    }

    /// Field height in cells.
    pub fn height(&self) -> i32 {
        match self {
            Self::Small => 10,
            Self::Medium => 15,
            Self::Large => 20,
            Self::Classic => 18,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Small => "Small field, quick games",
            Self::Medium => "Balanced size",
            Self::Large => "Large field, long games",
            Self::Classic => "The old handset layout",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Theme {
    #[default]
    Classic,
    Modern,
    Retro,
    Neon,
}

cycle_enum_impl!(Theme, [Classic, Modern, Retro, Neon]);

/// Persisted game settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// Starting tick interval in milliseconds. Rewritten when the difficulty changes.
    #[serde(deserialize_with = "lenient_speed")]
    pub initial_speed: u64,
    #[serde(deserialize_with = "lenient")]
    pub difficulty: Difficulty,
    #[serde(deserialize_with = "lenient_on")]
    pub show_grid: bool,
    #[serde(deserialize_with = "lenient_on")]
    pub smooth_animation: bool,
    #[serde(deserialize_with = "lenient")]
    pub sound_effects: bool,
    #[serde(deserialize_with = "lenient")]
    pub theme: Theme,
    #[serde(deserialize_with = "lenient")]
    pub field_size: FieldSize,
    #[serde(deserialize_with = "lenient_on")]
    pub timer_mode: bool,
    #[serde(deserialize_with = "lenient_on")]
    pub auto_speed_increase: bool,
    #[serde(deserialize_with = "lenient_on")]
    pub vibration: bool,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            initial_speed: Difficulty::Medium.initial_speed_ms(),
            difficulty: Difficulty::Medium,
            show_grid: true,
            smooth_animation: true,
            sound_effects: false,
            theme: Theme::Classic,
            field_size: FieldSize::Medium,
            timer_mode: true,
            auto_speed_increase: true,
            vibration: true,
        }
    }
}

/// Deserialize a field, falling back to `fallback` when the value is not understood.
fn lenient_or<'de, D, T>(deserializer: D, fallback: T) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or(fallback))
}

fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    lenient_or(deserializer, T::default())
}

fn lenient_on<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    lenient_or(deserializer, true)
}

fn lenient_speed<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    lenient_or(deserializer, Difficulty::Medium.initial_speed_ms())
}

impl GameSettings {
    /// Clamp values that came from disk into their legal ranges.
    pub fn validated(mut self) -> Self {
        self.initial_speed = self
            .initial_speed
            .clamp(MIN_INITIAL_SPEED_MS, MAX_INITIAL_SPEED_MS);
        self
    }

    /// Load settings from the store, falling back to defaults.
    pub fn load(store: &dyn Storage) -> Self {
        load_json_or_default::<GameSettings>(store, SETTINGS_KEY).validated()
    }

    pub fn save(&self, store: &dyn Storage) -> Result<(), StorageError> {
        save_json(store, SETTINGS_KEY, self)
    }

    /// Cycle difficulty and rewrite the bound starting speed.
    pub fn cycle_difficulty(&mut self) {
        self.difficulty = self.difficulty.next();
        self.initial_speed = self.difficulty.initial_speed_ms();
    }

    pub fn cycle_field_size(&mut self) {
        self.field_size = self.field_size.next();
    }

    pub fn cycle_theme(&mut self) {
        self.theme = self.theme.next();
    }
}

/// One row of the settings menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsItem {
    Difficulty,
    FieldSize,
    ShowGrid,
    SmoothAnimation,
    TimerMode,
    AutoSpeedIncrease,
    SoundEffects,
    Vibration,
    Theme,
    SaveAndExit,
}

impl SettingsItem {
    /// Menu order. `SaveAndExit` is always last.
    pub const ALL: [SettingsItem; 10] = [
        SettingsItem::Difficulty,
        SettingsItem::FieldSize,
        SettingsItem::ShowGrid,
        SettingsItem::SmoothAnimation,
        SettingsItem::TimerMode,
        SettingsItem::AutoSpeedIncrease,
        SettingsItem::SoundEffects,
        SettingsItem::Vibration,
        SettingsItem::Theme,
        SettingsItem::SaveAndExit,
    ];

    pub fn from_index(index: usize) -> Self {
        Self::ALL
            .get(index)
            .copied()
            .unwrap_or(SettingsItem::SaveAndExit)
    }

    /// Apply a "select" on this row. Returns false for `SaveAndExit`, which
    /// the state machine handles itself.
    pub fn activate(&self, settings: &mut GameSettings) -> bool {
        match self {
            Self::Difficulty => settings.cycle_difficulty(),
            Self::FieldSize => settings.cycle_field_size(),
            Self::ShowGrid => settings.show_grid = !settings.show_grid,
            Self::SmoothAnimation => settings.smooth_animation = !settings.smooth_animation,
            Self::TimerMode => settings.timer_mode = !settings.timer_mode,
            Self::AutoSpeedIncrease => {
                settings.auto_speed_increase = !settings.auto_speed_increase
            }
            Self::SoundEffects => settings.sound_effects = !settings.sound_effects,
            Self::Vibration => settings.vibration = !settings.vibration,
            Self::Theme => settings.cycle_theme(),
            Self::SaveAndExit => return false,
        }
        true
    }

    /// Display string for the settings screen.
    pub fn label(&self, settings: &GameSettings) -> String {
        fn yes_no(flag: bool) -> &'static str {
            if flag {
                "On"
            } else {
                "Off"
            }
        }

        match self {
            Self::Difficulty => format!(
                "Difficulty: {} ({}ms)",
                settings.difficulty.name(),
                settings.initial_speed
            ),
            Self::FieldSize => format!(
                "Field size: {} ({}x{})",
                settings.field_size.name(),
                settings.field_size.width(),
                settings.field_size.height()
            ),
            Self::ShowGrid => format!("Show grid: {}", yes_no(settings.show_grid)),
            Self::SmoothAnimation => {
                format!("Smooth animation: {}", yes_no(settings.smooth_animation))
            }
            Self::TimerMode => format!("Timer mode: {}", yes_no(settings.timer_mode)),
            Self::AutoSpeedIncrease => {
                format!("Auto speed-up: {}", yes_no(settings.auto_speed_increase))
            }
            Self::SoundEffects => format!("Sound effects: {}", yes_no(settings.sound_effects)),
            Self::Vibration => format!("Vibration: {}", yes_no(settings.vibration)),
            Self::Theme => format!("Theme: {}", settings.theme.name()),
            Self::SaveAndExit => "Save & exit".to_string(),
        }
    }
}

/// Display strings for every settings row, in menu order.
pub fn settings_labels(settings: &GameSettings) -> Vec<String> {
    SettingsItem::ALL
        .iter()
        .map(|item| item.label(settings))
        .collect()
}
