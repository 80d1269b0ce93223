/// Application name, used for the environment prefix and config file name.
pub const APP_NAME: &str = "almanac";
pub const ENV_PREFIX: &str = "ALMANAC";
pub const CONFIG_FILE_NAME: &str = const_str::concat!(APP_NAME, ".toml");

/// Timezone assumed for events stored without one.
pub const DEFAULT_TIMEZONE: &str = "America/New_York";

/// Largest expansion window accepted by default (roughly three years).
pub const DEFAULT_MAX_WINDOW_DAYS: u32 = 1100;

/// `strftime` pattern for calendar-date keys (`2024-01-31`).
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";
