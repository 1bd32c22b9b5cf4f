use crate::core::rules::LedgerRules;
use crate::errors::{AppError, AppResult};
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub mod migrate; // use submodule at src/config/migrate.rs

pub const WEEKDAYS: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_travel_offset")]
    pub travel_offset_minutes: i64,
    #[serde(default = "default_break_threshold")]
    pub auto_break_threshold_hours: f64,
    #[serde(default = "default_break_deduction")]
    pub auto_break_deduction_minutes: i64,
    /// Weekday name → expected hours. A weekday left out expects nothing.
    #[serde(default = "default_expected_hours")]
    pub expected_hours: BTreeMap<String, f64>,
    /// Year → opening balance in hours.
    #[serde(default)]
    pub carry_over_balance: BTreeMap<i32, f64>,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_travel_offset() -> i64 {
    2
}
fn default_break_threshold() -> f64 {
    6.0
}
fn default_break_deduction() -> i64 {
    30
}
fn default_expected_hours() -> BTreeMap<String, f64> {
    WEEKDAYS
        .iter()
        .enumerate()
        .map(|(i, d)| (d.to_string(), if i < 5 { 8.0 } else { 0.0 }))
        .collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            travel_offset_minutes: default_travel_offset(),
            auto_break_threshold_hours: default_break_threshold(),
            auto_break_deduction_minutes: default_break_deduction(),
            expected_hours: default_expected_hours(),
            carry_over_balance: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("stempel")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".stempel")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("stempel.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("stempel.sqlite")
    }

    /// Load configuration from `path` (or the standard file), falling back to
    /// defaults when the file does not exist.
    pub fn load_from(path: Option<&Path>) -> AppResult<Self> {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::config_file);

        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).map_err(|e| {
            AppError::Configuration(format!("cannot read {}: {}", path.display(), e))
        })?;
        let cfg: Config = serde_yaml::from_str(&content).map_err(|e| {
            AppError::Configuration(format!("cannot parse {}: {}", path.display(), e))
        })?;

        tracing::debug!(path = %path.display(), "config loaded");
        Ok(cfg)
    }

    /// Validate the calculation settings and convert them into minutes.
    pub fn rules(&self) -> AppResult<LedgerRules> {
        if self.travel_offset_minutes < 0 {
            return Err(invalid("travel_offset_minutes", "must not be negative"));
        }
        if self.auto_break_deduction_minutes < 0 {
            return Err(invalid("auto_break_deduction_minutes", "must not be negative"));
        }
        let threshold = hours_to_minutes("auto_break_threshold_hours", self.auto_break_threshold_hours)?;
        if threshold < 0 {
            return Err(invalid("auto_break_threshold_hours", "must not be negative"));
        }

        let mut rules = LedgerRules::default()
            .with_travel_offset(self.travel_offset_minutes)
            .with_break(threshold, self.auto_break_deduction_minutes);

        // weekdays missing from the map expect nothing
        for i in 0..WEEKDAYS.len() {
            rules = rules.with_expected(weekday_from_index(i), 0);
        }

        for (name, hours) in &self.expected_hours {
            let field = format!("expected_hours.{name}");
            let weekday = parse_weekday(name).ok_or_else(|| invalid(&field, "unknown weekday"))?;
            let minutes = hours_to_minutes(&field, *hours)?;
            if !(0..=24 * 60).contains(&minutes) {
                return Err(invalid(&field, "must be between 0 and 24 hours"));
            }
            rules = rules.with_expected(weekday, minutes);
        }

        for (year, hours) in &self.carry_over_balance {
            let field = format!("carry_over_balance.{year}");
            rules = rules.with_carry_over(*year, hours_to_minutes(&field, *hours)?);
        }

        Ok(rules)
    }

    /// Create the configuration directory and, unless `is_test`, write the
    /// configuration file when it does not exist yet.
    /// Returns the resolved database path.
    pub fn init_all(&self, config_path: Option<&Path>, is_test: bool) -> AppResult<PathBuf> {
        let conf_file = config_path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::config_file);

        if !is_test {
            if let Some(dir) = conf_file.parent() {
                fs::create_dir_all(dir)?;
            }
            if !conf_file.exists() {
                let yaml = serde_yaml::to_string(self)?;
                fs::write(&conf_file, yaml)?;
                tracing::info!(path = %conf_file.display(), "config file written");
            }
        }

        let db_path = PathBuf::from(&self.database);
        if let Some(dir) = db_path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir)?;
        }
        Ok(db_path)
    }
}

fn invalid(field: &str, reason: &str) -> AppError {
    AppError::Configuration(format!("invalid value for '{field}': {reason}"))
}

/// Hours → minutes, rounded to the nearest minute.
fn hours_to_minutes(field: &str, hours: f64) -> AppResult<i64> {
    if !hours.is_finite() {
        return Err(invalid(field, "not a finite number"));
    }
    Ok((hours * 60.0).round() as i64)
}

pub fn parse_weekday(name: &str) -> Option<Weekday> {
    WEEKDAYS
        .iter()
        .position(|d| d.eq_ignore_ascii_case(name.trim()))
        .map(weekday_from_index)
}

fn weekday_from_index(i: usize) -> Weekday {
    match i {
        0 => Weekday::Mon,
        1 => Weekday::Tue,
        2 => Weekday::Wed,
        3 => Weekday::Thu,
        4 => Weekday::Fri,
        5 => Weekday::Sat,
        _ => Weekday::Sun,
    }
}
