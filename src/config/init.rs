use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use crate::config::{get_config_path, parse_date, Config};
use crate::registry::DEFAULT_TOP_VCS_FILE;
use crate::scoring::{SubScoreKind, WeightConfig};

/// Prompt user with a message and return their trimmed input.
fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    std::io::stdout()
        .flush()
        .context("Failed to flush stdout")?;
    let mut input = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut input)
        .context("Failed to read input")?;
    Ok(input.trim().to_string())
}

/// Prompt user with a message and a default value. Returns default if input is empty.
fn prompt_with_default(message: &str, default: &str) -> Result<String> {
    let input = prompt(&format!("{} [{}]: ", message, default))?;
    if input.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(input)
    }
}

/// Prompt user with a yes/no question. Returns bool based on input and default.
fn prompt_yes_no(message: &str, default_yes: bool) -> Result<bool> {
    let hint = if default_yes { "Y/n" } else { "y/N" };
    let input = prompt(&format!("{} [{}]: ", message, hint))?;
    let input = input.to_lowercase();
    if input.is_empty() {
        Ok(default_yes)
    } else {
        Ok(input == "y" || input == "yes")
    }
}

/// Parse a weight typed at the prompt. "none" leaves the sub-score out.
fn parse_weight_input(input: &str) -> Result<Option<f64>, String> {
    if input.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    match input.parse::<f64>() {
        Ok(v) if (0.0..=1.0).contains(&v) => Ok(Some(v)),
        Ok(_) => Err("must be between 0 and 1".to_string()),
        Err(_) => Err("must be a number between 0 and 1, or 'none'".to_string()),
    }
}

/// Serialize and write the config atomically, creating parent directories.
pub fn write_config(path: &Path, config: &Config) -> Result<()> {
    let yaml = serde_saphyr::to_string(config)
        .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(yaml.as_bytes())
        .with_context(|| format!("Failed to write config to {}", path.display()))?;
    file.commit().context("Failed to save config")?;

    Ok(())
}

/// Run the interactive init wizard to create a config file.
///
/// If `default_path` is Some, uses that as the config file path.
/// Otherwise, prompts the user with the default config path.
pub fn run_init_wizard(default_path: Option<PathBuf>) -> Result<()> {
    println!();
    println!("Community Score Configuration Wizard");
    println!("====================================");
    println!();

    // 1. Top VC list
    println!("The top VC list is a text file with one investor name per line.");
    let top_vcs = prompt_with_default("Top VC list path", DEFAULT_TOP_VCS_FILE)?;

    // 2. Reference date
    println!();
    println!("Financing within 365 days of the reference date counts as recent.");
    println!("Leave it as 'today' to always use the current date.");
    let reference_date = loop {
        let input = prompt_with_default("Reference date (YYYY-MM-DD)", "today")?;
        if input == "today" {
            break None;
        }
        match parse_date(&input) {
            Ok(_) => break Some(input),
            Err(e) => println!("  Invalid: {}. Try again.", e),
        }
    };

    // 3. Weights
    println!();
    let defaults = WeightConfig::default();
    let configure_weights = prompt_yes_no("Adjust weights? (n accepts defaults)", true)?;
    let weights = if configure_weights {
        println!();
        println!("Each weight is between 0 and 1. They need not sum to 1.");
        println!("Type 'none' to leave a sub-score out of the overall score.");
        let mut weights = WeightConfig::empty();
        for kind in SubScoreKind::ALL {
            let default = defaults
                .get(kind)
                .map(|w| w.to_string())
                .unwrap_or_else(|| "none".to_string());
            let weight = loop {
                let input = prompt_with_default(&format!("{} weight", kind), &default)?;
                match parse_weight_input(&input) {
                    Ok(w) => break w,
                    Err(e) => println!("  Invalid: {}. Try again.", e),
                }
            };
            weights.set(kind, weight);
        }
        weights
    } else {
        defaults
    };

    // 4. Config path
    let default_config_path = match default_path {
        Some(p) => p,
        None => get_config_path()?,
    };
    println!();
    let path_str = prompt_with_default(
        "Where should the config be saved?",
        &default_config_path.display().to_string(),
    )?;
    let config_path = PathBuf::from(&path_str);

    // Check if file already exists
    if config_path.exists() {
        let overwrite = prompt_yes_no(
            &format!(
                "Config already exists at {}. Overwrite?",
                config_path.display()
            ),
            false,
        )?;
        if !overwrite {
            println!("Aborted.");
            return Ok(());
        }
    }

    // 5. Write config
    let config = Config {
        top_vcs: Some(top_vcs),
        reference_date,
        current_year: None,
        weights: Some(weights),
    };
    write_config(&config_path, &config)?;

    println!();
    println!("Config written to {}", config_path.display());
    println!("Run `community-score score <companies.csv>` to get started.");

    Ok(())
}
