// SPDX-License-Identifier: MPL-2.0
//! `alert-stack` demo driver.
//!
//! Reads one alert per stdin line (`"<severity>: <message>"`), `clear` to
//! dismiss everything and `quit` to stop reading. Every change of the stack
//! is rendered to stdout; logs go to stderr.

use alert_stack::alerts::{Alert, AlertStack, Command};
use alert_stack::config;
use alert_stack::error::{Error, Result};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{mpsc, watch};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const HELP: &str = "\
alert-stack

USAGE:
  alert-stack [OPTIONS]

OPTIONS:
  --max-len N          Maximum number of alerts held at once
  --living-time SECS   Seconds between two evictions
  --config-dir DIR     Directory holding settings.toml
  -h, --help           Print this help
";

struct Flags {
    max_len: Option<usize>,
    living_time: Option<u64>,
    config_dir: Option<PathBuf>,
}

fn parse_flags() -> std::result::Result<Option<Flags>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }
    Ok(Some(Flags {
        max_len: args.opt_value_from_str("--max-len")?,
        living_time: args.opt_value_from_str("--living-time")?,
        config_dir: args.opt_value_from_str("--config-dir")?,
    }))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let flags = match parse_flags() {
        Ok(Some(flags)) => flags,
        Ok(None) => {
            print!("{HELP}");
            return Ok(());
        }
        Err(e) => return Err(Error::Config(e.to_string())),
    };

    let (mut config, warning) = config::load_with_override(flags.config_dir);
    if let Some(warning) = warning {
        tracing::warn!("{warning}");
    }
    config.apply_env_overrides()?;
    if let Some(max_len) = flags.max_len {
        config.stack.max_len = max_len;
    }
    if let Some(secs) = flags.living_time {
        config.stack.living_time_secs = secs;
    }
    let stack = AlertStack::new(config.stack_settings()?)?;
    let settings = stack.settings();
    tracing::info!(
        max_len = settings.capacity().value(),
        living_time = ?settings.living_time().as_duration(),
        "alert stack ready"
    );

    let renderer = tokio::spawn(render(stack.subscribe()));

    let (tx, rx) = mpsc::channel(64);
    let driver = {
        let stack = stack.clone();
        tokio::spawn(async move { stack.run(rx).await })
    };

    read_commands(tx).await?;
    driver
        .await
        .map_err(|e| Error::Runtime(e.to_string()))?;

    // Let the remaining alerts expire before leaving.
    let mut updates = stack.subscribe();
    updates
        .wait_for(Vec::is_empty)
        .await
        .map_err(|e| Error::Runtime(e.to_string()))?;
    drop(updates);
    drop(stack);

    renderer
        .await
        .map_err(|e| Error::Runtime(e.to_string()))?;
    tracing::info!("alert stack drained");
    Ok(())
}

async fn read_commands(tx: mpsc::Sender<Command<Alert>>) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match line.trim() {
            "" => continue,
            "quit" => break,
            "clear" => Command::Clear,
            text => Command::Insert(Alert::parse_line(text)),
        };
        if tx.send(command).await.is_err() {
            break;
        }
    }
    Ok(())
}

async fn render(mut updates: watch::Receiver<Vec<Alert>>) {
    while updates.changed().await.is_ok() {
        let alerts = updates.borrow_and_update().clone();
        if alerts.is_empty() {
            println!("(no alerts)");
            continue;
        }
        println!("{} alert(s):", alerts.len());
        for alert in &alerts {
            println!("  {alert}");
        }
    }
}
