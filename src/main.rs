use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use cohort_match::utils::logging::{print_study_report, print_study_report_json};
use cohort_match::{DuplicatePolicy, StudyConfig, run_study};
use log::info;

#[derive(Parser)]
#[command(name = "cohort-match")]
#[command(about = "Match controls to abstainers and relapsers by age using optimal assignment")]
struct Cli {
    /// Subject table (CSV with header: id, relapse flag, age, sex)
    input: PathBuf,

    /// Study configuration file (JSON); the bundled configuration is used otherwise
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Control cohort file (JSON object of identifier to age), replacing the configured controls
    #[arg(long)]
    controls: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Fail when an identifier repeats within a cohort instead of keeping the later row
    #[arg(long)]
    reject_duplicates: bool,
}

fn main() -> Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => StudyConfig::from_file(path)
            .with_context(|| format!("Failed to load configuration {}", path.display()))?,
        None => StudyConfig::bundled().context("Failed to load bundled configuration")?,
    };
    if let Some(path) = &cli.controls {
        config
            .load_controls(path)
            .with_context(|| format!("Failed to load controls {}", path.display()))?;
    }
    if cli.reject_duplicates {
        config.builder.duplicate_policy = DuplicatePolicy::Reject;
    }

    info!(
        "Using {} controls; matching {:?} subjects",
        config.controls.len(),
        config.builder.sex
    );

    let report = run_study(&cli.input, &config)
        .with_context(|| format!("Matching failed for {}", cli.input.display()))?;

    if cli.json {
        print_study_report_json(&report).context("Failed to write JSON report")?;
    } else {
        print_study_report(&report).context("Failed to write report")?;
    }

    Ok(())
}
