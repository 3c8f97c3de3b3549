//! Candidate Tiering CLI
//!
//! Classifies assessment answer files, prints the scoring table and the
//! answer JSON schema, and runs batch registrations through the candidate
//! registry.

use chrono::Utc;
use clap::{Parser, Subcommand};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use candidate_tiering::candidate::export_filename;
use candidate_tiering::{
    AssessmentResponse, CandidateInput, CandidateRegistry, Error, ExportFilter, Result,
    ScoringConfig, SkillTier, TierClassifier,
};

// =============================================================================
// CLI Arguments
// =============================================================================

/// Candidate Tiering - deterministic skill-tier classification
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "warn", global = true)]
    log_level: String,

    /// Output logs as JSON
    #[arg(long, env = "LOG_JSON", global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify one answer sheet (`-` reads stdin)
    Classify {
        input: String,

        /// Scoring table YAML
        #[arg(long, env = "SCORING_CONFIG")]
        config: Option<PathBuf>,

        /// Print the full classification as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the tier threshold table
    Tiers {
        /// Scoring table YAML
        #[arg(long, env = "SCORING_CONFIG")]
        config: Option<PathBuf>,
    },

    /// Print the JSON schema of an answer sheet
    Schema,

    /// Register a JSON array of candidates and print statistics
    Batch {
        input: PathBuf,

        /// Scoring table YAML
        #[arg(long, env = "SCORING_CONFIG")]
        config: Option<PathBuf>,

        /// Print a CSV export instead of statistics
        #[arg(long)]
        export: bool,

        /// Write the CSV export into this directory instead of stdout
        #[arg(long, requires = "export")]
        out_dir: Option<PathBuf>,
    },
}

// =============================================================================
// Main
// =============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args);
    debug!("{} {}", candidate_tiering::NAME, candidate_tiering::VERSION);

    match args.command {
        Command::Classify {
            input,
            config,
            json,
        } => run_classify(&input, config.as_deref(), json).await,
        Command::Tiers { config } => run_tiers(config.as_deref()),
        Command::Schema => run_schema(),
        Command::Batch {
            input,
            config,
            export,
            out_dir,
        } => run_batch(&input, config.as_deref(), export, out_dir.as_deref()).await,
    }
}

// =============================================================================
// Commands
// =============================================================================

fn load_classifier(config: Option<&Path>) -> Result<TierClassifier> {
    match config {
        Some(path) => {
            let classifier = TierClassifier::with_config(ScoringConfig::from_file(path)?)?;
            info!("Loaded scoring table from {}", path.display());
            Ok(classifier)
        }
        None => Ok(TierClassifier::new()),
    }
}

async fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut buffer = String::new();
        tokio::io::stdin().read_to_string(&mut buffer).await?;
        Ok(buffer)
    } else {
        Ok(tokio::fs::read_to_string(input).await?)
    }
}

async fn run_classify(input: &str, config: Option<&Path>, json: bool) -> Result<()> {
    let classifier = load_classifier(config)?;
    let document: Value = serde_json::from_str(&read_input(input).await?)?;

    // Accept either a full registration payload or the bare answers
    let answers = match document.get("assessmentResponses") {
        Some(answers) => answers,
        None => &document,
    };

    let result = classifier.classify_value(Some(answers))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{} {}", result.tier, result.tier.name());
        println!("score: {}/{}", result.score, result.max_score);
        println!("{}", result.rationale);
    }

    Ok(())
}

fn run_tiers(config: Option<&Path>) -> Result<()> {
    let classifier = load_classifier(config)?;
    let table = classifier.config();

    println!("{:<6} {:<7} {:<32} Requires", "Tier", "Above", "Name");
    println!(
        "{:<6} {:<7} {:<32} -",
        SkillTier::Tier0.value(),
        "-",
        SkillTier::Tier0.name()
    );
    for row in table.thresholds() {
        let requires = if row.requires.is_empty() {
            "-".to_string()
        } else {
            row.requires
                .iter()
                .map(|axis| axis.label())
                .collect::<Vec<_>>()
                .join(", ")
        };
        println!(
            "{:<6} {:<7} {:<32} {}",
            row.tier.value(),
            row.above,
            row.tier.name(),
            requires
        );
    }
    println!();
    println!(
        "max score {}, all-basic baseline {}",
        table.max_score(),
        table.baseline_score()
    );

    Ok(())
}

fn run_schema() -> Result<()> {
    let schema = schemars::schema_for!(AssessmentResponse);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}

async fn run_batch(
    input: &Path,
    config: Option<&Path>,
    export: bool,
    out_dir: Option<&Path>,
) -> Result<()> {
    let registry = CandidateRegistry::with_classifier(load_classifier(config)?);

    let mut events = registry.subscribe();
    let event_log = tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => debug!("Registry event: {:?}", event),
                Err(RecvError::Lagged(skipped)) => warn!("Event log skipped {} events", skipped),
                Err(RecvError::Closed) => break,
            }
        }
    });

    let entries: Vec<Value> = serde_json::from_str(&tokio::fs::read_to_string(input).await?)?;
    info!("Registering {} candidates from {}", entries.len(), input.display());

    let mut skipped = 0usize;
    for (index, entry) in entries.into_iter().enumerate() {
        let registered = serde_json::from_value::<CandidateInput>(entry)
            .map_err(Error::from)
            .and_then(|candidate| registry.register(candidate));

        if let Err(e) = registered {
            warn!("Skipping entry {}: {}", index, e);
            skipped += 1;
        }
    }
    info!("Registered {}, skipped {}", registry.len(), skipped);

    if export {
        let csv = registry.export_csv(&ExportFilter::default())?;
        match out_dir {
            Some(dir) => {
                let path = dir.join(export_filename(Utc::now().date_naive()));
                tokio::fs::write(&path, csv).await?;
                info!("Wrote export to {}", path.display());
            }
            None => println!("{}", csv),
        }
    } else {
        println!("{}", serde_json::to_string_pretty(&registry.stats())?);
    }

    drop(registry);
    event_log
        .await
        .map_err(|e| Error::Internal(format!("Event log task failed: {}", e)))?;

    Ok(())
}

// =============================================================================
// Logging Setup
// =============================================================================

fn init_logging(args: &Args) {
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    // stdout carries command output
    if args.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }
}
