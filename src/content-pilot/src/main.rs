//! Content Pilot analytics CLI.
//!
//! Reads a campaign or A/B test exported from the hosted store as JSON and
//! prints its ROI series or comparison table.

mod render;

use anyhow::Context;
use clap::{Parser, Subcommand};
use pilot_analytics::{build_comparison, build_roi_report_with, Granularity};
use pilot_core::config::AppConfig;
use pilot_core::{AbTest, Campaign};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "content-pilot")]
#[command(about = "Performance analytics for short-form video campaigns and A/B tests")]
#[command(version)]
struct Cli {
    /// Emit JSON instead of a text table
    #[arg(long, global = true, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Cost-per-follower report for an ad campaign
    Roi {
        /// Campaign JSON file
        #[arg(long)]
        file: PathBuf,

        /// day, week or month (overrides config)
        #[arg(long, env = "CONTENT_PILOT__ANALYTICS__DEFAULT_GRANULARITY")]
        granularity: Option<String>,
    },
    /// Variant A vs B comparison for an A/B test
    Ab {
        /// A/B test JSON file
        #[arg(long)]
        file: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().unwrap_or_else(|e| {
        eprintln!("Failed to load config, using defaults: {e}");
        AppConfig::default()
    });

    init_tracing(&config);

    let cli = Cli::parse();
    info!(command = ?cli.command, "Content Pilot analytics starting");

    match cli.command {
        Command::Roi { file, granularity } => {
            let mut campaign: Campaign = read_json(&file)?;
            if campaign.target_cpf <= 0.0 {
                warn!(
                    campaign_id = %campaign.id,
                    default = config.analytics.default_target_cpf,
                    "Campaign has no target cost per follower, using default"
                );
                campaign.target_cpf = config.analytics.default_target_cpf;
            }

            let granularity: Granularity = granularity
                .as_deref()
                .unwrap_or(&config.analytics.default_granularity)
                .parse()?;

            let report =
                build_roi_report_with(&campaign, granularity, config.analytics.marginal_multiplier);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", render::roi_table(&report));
            }
        }
        Command::Ab { file } => {
            let test: AbTest = read_json(&file)?;
            match build_comparison(&test) {
                Some(comparison) if cli.json => {
                    println!("{}", serde_json::to_string_pretty(&comparison)?);
                }
                Some(comparison) => print!("{}", render::ab_table(&test, &comparison)),
                None => {
                    warn!(test_id = %test.id, "Both variants need a logged result");
                    anyhow::bail!("test {} has no result for one of its variants", test.id);
                }
            }
        }
    }

    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.log.filter.clone().into());
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if config.log.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let value = serde_json::from_str(&raw)
        .map_err(pilot_core::PilotError::from)
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(value)
}
