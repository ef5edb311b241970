mod inspect;
mod score;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use fuzzysat_core::AppConfig;
use fuzzysat_engine::satisfaction::{REVIEW_LENGTH, SATISFACTION, SENTIMENT};
use fuzzysat_engine::{satisfaction_system, ControlSystem, InferenceSettings};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "fuzzysat-cli")]
#[command(about = "Fuzzy customer satisfaction scoring for product reviews")]
struct Cli {
    /// YAML system definition to use instead of the builtin rule base.
    /// `score` and `predict` require antecedents named `sentiment` and
    /// `review_length` and a consequent named `satisfaction`.
    #[arg(long, global = true)]
    system: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Score a JSON Lines file of reviews
    Score {
        /// Input reviews, one JSON object per line
        input: PathBuf,
        /// Where to write scored reviews (JSON Lines)
        #[arg(long, short)]
        output: PathBuf,
        /// Score only the first N reviews
        #[arg(long)]
        limit: Option<usize>,
        /// Score on the rayon thread pool
        #[arg(long)]
        parallel: bool,
    },
    /// Evaluate a single sentiment / review length pair
    Predict {
        /// Sentiment score in [-1, 1]
        #[arg(long, allow_hyphen_values = true)]
        sentiment: f64,
        /// Review length in words
        #[arg(long)]
        length: f64,
    },
    /// Print the variables, terms and rules of the active system
    Describe,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = fuzzysat_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("fuzzysat-cli: use `score`, `predict` or `describe` (see --help)");
        return Ok(());
    };

    let system = build_system(&config, cli.system.as_ref())?;

    match command {
        Commands::Score {
            input,
            output,
            limit,
            parallel,
        } => {
            require_satisfaction_variables(&system)?;
            score::run_score(
                &system,
                &config,
                &input,
                &output,
                limit,
                parallel || config.parallel,
            )
        }
        Commands::Predict { sentiment, length } => {
            require_satisfaction_variables(&system)?;
            inspect::run_predict(&system, &config, sentiment, length)
        }
        Commands::Describe => {
            inspect::run_describe(&system);
            Ok(())
        }
    }
}

/// Build the control system from `--system`, `FUZZYSAT_SYSTEM_PATH`, or the
/// builtin rule base, in that order.
///
/// # Errors
///
/// Returns an error if the definition file cannot be loaded or describes an
/// invalid system.
fn build_system(config: &AppConfig, path: Option<&PathBuf>) -> anyhow::Result<ControlSystem> {
    let settings = InferenceSettings::from_app_config(config);
    let system = match path.or(config.system_path.as_ref()) {
        Some(path) => {
            let definition = fuzzysat_core::load_system(path)?;
            ControlSystem::from_definition(&definition, settings)
                .with_context(|| format!("invalid system definition in {}", path.display()))?
        }
        None => satisfaction_system(&config.grid_steps, settings)
            .context("failed to build the builtin satisfaction system")?,
    };

    tracing::info!(
        antecedents = system.antecedents().len(),
        consequents = system.consequents().len(),
        rules = system.rules().len(),
        defuzzification = %config.defuzzification,
        "control system ready"
    );
    Ok(system)
}

/// Check that a loaded system speaks the satisfaction vocabulary.
///
/// # Errors
///
/// Returns an error naming the first missing variable.
fn require_satisfaction_variables(system: &ControlSystem) -> anyhow::Result<()> {
    for name in [SENTIMENT, REVIEW_LENGTH] {
        if system.antecedent(name).is_none() {
            anyhow::bail!("system has no antecedent named '{name}'; score and predict need it");
        }
    }
    if system.consequent(SATISFACTION).is_none() {
        anyhow::bail!("system has no consequent named '{SATISFACTION}'; score and predict need it");
    }
    Ok(())
}

#[cfg(test)]
mod tests;
