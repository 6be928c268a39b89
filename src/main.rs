use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use kitecheck::meetnet::CurrentValue;
use kitecheck::{
    CheckSettings, ConditionEvaluator, KiteCheckConfig, KiteCheckError, MeetnetClient, SpeedUnit,
    WebhookNotifier, logging, run_check,
};

/// Kitesurf condition checker for the Meetnet Vlaamse Banken measurement network
#[derive(Parser)]
#[command(name = "kitecheck", version, about)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(long, global = true, env = "KITECHECK_CONFIG")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch the latest window, evaluate it and notify when conditions are good
    Check {
        /// Evaluate without sending a notification
        #[arg(long)]
        dry_run: bool,
    },
    /// Log in and test the connection to the measurement network
    Ping,
    /// Show the latest measured direction and speed
    Current,
    /// Evaluate literal samples without network access
    Evaluate {
        /// Wind directions in degrees, comma separated
        #[arg(long, value_delimiter = ',', required = true, allow_hyphen_values = true)]
        direction: Vec<f64>,
        /// Wind speeds in the measured unit, comma separated
        #[arg(long, value_delimiter = ',', required = true)]
        speed: Vec<f64>,
        /// Report speeds in knots
        #[arg(long)]
        knots: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<KiteCheckError>() {
                Some(error) => eprintln!("Error: {}\n{}", error, error.user_message()),
                None => eprintln!("Error: {e:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = KiteCheckConfig::load_from_path(cli.config.clone())?;
    logging::init(&config.logging, cli.verbose)?;

    if cli.verbose {
        let path = cli.config.clone().unwrap_or_else(KiteCheckConfig::default_config_path);
        tracing::debug!("Using config from: {}", path.display());
    }

    let evaluator = ConditionEvaluator::new(config.calibration)?;

    match cli.command {
        Command::Check { dry_run } => {
            config.validate_credentials()?;
            let client = MeetnetClient::login(&config.meetnet)
                .await
                .context("Login at the measurement network failed")?;
            let notifier = if dry_run {
                None
            } else {
                Some(WebhookNotifier::new(
                    &config.notification,
                    config.meetnet.timeout_seconds,
                )?)
            };
            let settings = CheckSettings::from(&config.meetnet);

            let outcome = run_check(&client, notifier.as_ref(), &settings, &evaluator).await?;
            print_output(cli.json, &outcome)?;
        }
        Command::Ping => {
            config.validate_credentials()?;
            let client = MeetnetClient::login(&config.meetnet).await?;
            if client.ping().await? {
                println!("Connection to {} is OK", config.meetnet.base_url);
            } else {
                anyhow::bail!("Ping to {} failed", config.meetnet.base_url);
            }
        }
        Command::Current => {
            config.validate_credentials()?;
            let client = MeetnetClient::login(&config.meetnet).await?;
            let current = client.get_current_data().await?;
            let series = [
                config.meetnet.direction_series.as_str(),
                config.meetnet.speed_series.as_str(),
            ];
            for value in CurrentValue::select(&current, &series) {
                match value.value {
                    Some(measured) => println!("{} {} {}", value.id, value.timestamp, measured),
                    None => println!("{} {} -", value.id, value.timestamp),
                }
            }
        }
        Command::Evaluate {
            direction,
            speed,
            knots,
        } => {
            let unit = if knots { SpeedUnit::Knots } else { SpeedUnit::Raw };
            let report = evaluator.evaluate(&direction, &speed, unit)?;
            print_output(cli.json, &report)?;
        }
    }

    Ok(())
}

fn print_output<T: Serialize + std::fmt::Display>(json: bool, value: &T) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{value}");
    }
    Ok(())
}
