// Scoring
pub const FOOD_REWARD: u32 = 10;

// Snake spawn
pub const INITIAL_SNAKE_LENGTH: usize = 3;

// Food placement: rejection-sampling attempts before accepting a candidate as-is
pub const FOOD_PLACEMENT_ATTEMPTS: u32 = 100;

// Settings limits
pub const MIN_INITIAL_SPEED_MS: u64 = 30;
pub const MAX_INITIAL_SPEED_MS: u64 = 500;

// Display speed shown to the player is this minus the tick interval
pub const DISPLAY_SPEED_BASE: i64 = 200;

// Time-based speed ramp period (timer mode)
pub const TIME_RAMP_EVERY_MS: u64 = 30_000;

// Name entry
pub const MAX_NAME_LENGTH: usize = 20;
pub const ANONYMOUS_NAME: &str = "Anonymous";

// Persistence keys (file names under the data directory)
pub const SETTINGS_KEY: &str = "snake_settings.json";
pub const SCORES_KEY: &str = "snake_scores.json";
pub const LOG_FILE_NAME: &str = "snake.log";
pub const DATA_DIR_NAME: &str = ".snake";

// Terminal front end
pub const MIN_TERMINAL_COLS: u16 = 60;
pub const MIN_TERMINAL_ROWS: u16 = 24;
pub const FRAME_SLEEP_MS: u64 = 10;

// Main menu
pub const MENU_ITEMS: [&str; 4] = ["Play", "Settings", "High Scores", "Quit"];
