use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use community_score::config::{self, Config};
use community_score::scoring::WeightConfig;
use community_score::{output, ScoreError};

const EXIT_SUCCESS: i32 = 0;
const EXIT_STARTUP: i32 = 1;
const EXIT_INPUT: i32 = 2;
const EXIT_OUTPUT: i32 = 3;
const EXIT_CONFIG: i32 = 4;

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Format {
    /// Ranked table for humans
    Table,
    /// Tab-separated values for scripting
    Tsv,
    /// JSON document with summary and rows
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score and rank the companies in a CSV file
    Score {
        /// Input CSV with an 'Employee History' column
        input: PathBuf,

        /// Top VC list, one investor per line (defaults to config, then ./VCtop_latest.txt)
        #[arg(long)]
        top_vcs: Option<PathBuf>,

        /// Write the scored dataset, sorted by Overall Score, to this CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Reference date for the recent financing window (YYYY-MM-DD, default: today)
        #[arg(long, value_parser = parse_as_of)]
        as_of: Option<NaiveDate>,

        /// Year used for the growth window and company age (default: reference year)
        #[arg(long)]
        year: Option<i32>,

        /// Override a weight, e.g. --weight raised=0.25 (repeatable)
        #[arg(short, long = "weight", value_name = "NAME=VALUE")]
        weights: Vec<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Table)]
        format: Format,

        /// Show each company's per-sub-score breakdown
        #[arg(long)]
        breakdown: bool,
    },
    /// Show the effective weights
    Weights {
        /// Override a weight, e.g. --weight raised=0.25 (repeatable)
        #[arg(short, long = "weight", value_name = "NAME=VALUE")]
        weights: Vec<String>,
    },
    /// Interactively create a config file
    Init {
        /// Where to write the config (defaults to ~/.config/community-score/config.yaml)
        path: Option<PathBuf>,
    },
}

#[derive(Parser, Debug)]
#[command(name = "community-score")]
#[command(about = "Rank companies by a weighted community score", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/community-score/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

fn parse_as_of(s: &str) -> Result<NaiveDate, String> {
    config::parse_date(s).map_err(|e| e.to_string())
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "community_score=debug"
    } else {
        "community_score=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

/// Exit with the config error code after listing every problem.
fn exit_config_errors(errors: &[String]) -> ! {
    eprintln!("Config errors:");
    for error in errors {
        eprintln!("  - {}", error);
    }
    std::process::exit(EXIT_CONFIG);
}

/// Config weights (or defaults), then command-line overrides, validated.
fn effective_weights(config: &Config, overrides: &[String]) -> WeightConfig {
    let mut weights = config.weights.clone().unwrap_or_default();
    let mut errors = Vec::new();
    for assignment in overrides {
        if let Err(e) = weights.apply_override(assignment) {
            errors.push(format!("--weight: {}", e));
        }
    }
    if let Err(weight_errors) = community_score::scoring::validate_weights(&weights) {
        errors.extend(weight_errors);
    }
    if !errors.is_empty() {
        exit_config_errors(&errors);
    }
    weights
}

/// Load and validate the config, exiting with the config error code on failure.
fn load_validated_config(path: Option<String>) -> Config {
    let config = match config::load_config(path.map(PathBuf::from)) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if let Err(errors) = config::validate_config(&config) {
        exit_config_errors(&errors);
    }
    config
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let start_time = Instant::now();

    match cli.command {
        Commands::Init { path } => {
            if let Err(e) = config::init::run_init_wizard(path) {
                eprintln!("Init failed: {:#}", e);
                std::process::exit(EXIT_CONFIG);
            }
        }
        Commands::Weights { weights } => {
            let config = load_validated_config(cli.config);
            let weights = effective_weights(&config, &weights);
            println!("{}", output::format_weights(&weights));
        }
        Commands::Score {
            input,
            top_vcs,
            output: output_path,
            as_of,
            year,
            weights,
            format,
            breakdown,
        } => {
            let config = load_validated_config(cli.config);
            let weights = effective_weights(&config, &weights);
            let context = match config.scoring_context(as_of, year, Local::now().date_naive()) {
                Ok(c) => c,
                Err(e) => {
                    eprintln!("Config error: {:#}", e);
                    std::process::exit(EXIT_CONFIG);
                }
            };
            tracing::debug!(
                "Scoring as of {} (year {})",
                context.reference_date,
                context.current_year
            );

            // The registry must be in place before any dataset is accepted
            let top_vcs_path =
                community_score::registry::resolve_top_vcs_path(top_vcs, config.top_vcs.as_deref());
            let registry = match community_score::TopVcRegistry::load(&top_vcs_path) {
                Ok(r) => r,
                Err(e) => {
                    eprintln!("{}", e);
                    eprintln!("Please ensure the top VC list is available, or pass --top-vcs.");
                    std::process::exit(EXIT_STARTUP);
                }
            };
            if registry.is_empty() {
                tracing::warn!("Top VC list at {} is empty", top_vcs_path.display());
            }

            let dataset = match community_score::dataset::read_companies_from_path(&input) {
                Ok(d) => d,
                Err(e) => {
                    eprintln!("Input error: {:#}", e);
                    std::process::exit(EXIT_INPUT);
                }
            };

            let ranking =
                match community_score::rank_companies(dataset, &registry, &weights, &context) {
                    Ok(r) => r,
                    Err(e @ ScoreError::MissingColumn(_)) => {
                        eprintln!("Input error: {}", e);
                        std::process::exit(EXIT_INPUT);
                    }
                    Err(e) => {
                        eprintln!("{}", e);
                        std::process::exit(EXIT_STARTUP);
                    }
                };

            let use_colors = output::should_use_colors();
            match format {
                Format::Table => {
                    if breakdown {
                        for scored in &ranking.companies {
                            println!("{}", output::format_breakdown(scored, use_colors));
                            println!();
                        }
                    } else {
                        println!(
                            "{}",
                            output::format_ranking_table(&ranking.companies, use_colors)
                        );
                        println!();
                    }
                    println!("{}", output::format_summary(&ranking.summary));
                }
                Format::Tsv => {
                    let tsv = output::format_tsv(&ranking.companies);
                    if !tsv.is_empty() {
                        println!("{}", tsv);
                    }
                }
                Format::Json => match output::format_json(&ranking) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        eprintln!("Failed to render JSON: {}", e);
                        std::process::exit(EXIT_OUTPUT);
                    }
                },
            }

            if let Some(path) = output_path {
                if let Err(e) = community_score::dataset::write_ranking(&path, &ranking) {
                    eprintln!("Output error: {:#}", e);
                    std::process::exit(EXIT_OUTPUT);
                }
                eprintln!("Scored data written to {}", path.display());
            }

            tracing::debug!(
                "Total: {} companies in {:?}",
                ranking.summary.count,
                start_time.elapsed()
            );
        }
    }

    std::process::exit(EXIT_SUCCESS);
}
