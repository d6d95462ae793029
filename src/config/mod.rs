pub mod init;
mod schema;

pub use schema::Config;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

use crate::scoring::{validate_weights, ScoringContext};

/// Date format accepted for `reference_date` and `--as-of`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Get the config directory path (~/.config/community-score/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("community-score"))
}

/// Get the default config file path (~/.config/community-score/config.yaml)
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.yaml"))
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses the default path,
///   and a missing default file simply yields the built-in defaults.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let explicit = path.is_some();
    let config_path = match path {
        Some(p) => p,
        None => get_config_path()?,
    };

    if !config_path.exists() {
        if explicit {
            anyhow::bail!("Config file not found at {}", config_path.display());
        }
        tracing::debug!("No config at {}, using defaults", config_path.display());
        return Ok(Config::default());
    }

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content).with_context(|| {
        format!(
            "Failed to parse config: invalid YAML in {}",
            config_path.display()
        )
    })?;

    Ok(config)
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .with_context(|| format!("invalid date '{}', expected YYYY-MM-DD", s.trim()))
}

/// Validate the whole config at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(ref date) = config.reference_date {
        if let Err(e) = parse_date(date) {
            errors.push(format!("reference_date: {}", e));
        }
    }

    if let Some(ref weights) = config.weights {
        if let Err(weight_errors) = validate_weights(weights) {
            errors.extend(weight_errors);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

impl Config {
    /// Build the scoring context. Explicit arguments win over config values;
    /// `today` fills in whatever neither provides.
    pub fn scoring_context(
        &self,
        as_of: Option<NaiveDate>,
        year: Option<i32>,
        today: NaiveDate,
    ) -> Result<ScoringContext> {
        let reference_date = match (as_of, self.reference_date.as_deref()) {
            (Some(date), _) => date,
            (None, Some(raw)) => parse_date(raw).context("reference_date")?,
            (None, None) => today,
        };

        let mut context = ScoringContext::for_date(reference_date);
        if let Some(year) = year.or(self.current_year) {
            context.current_year = year;
        }
        Ok(context)
    }
}
