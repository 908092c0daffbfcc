use std::{
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
    sync::OnceLock,
    time::{Duration, Instant},
};

use anyhow::Context;
use thermosim_common::{RuntimeConfig, ThermostatConfig};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    time::{Interval, MissedTickBehavior},
};
use tracing::{info, warn};

use crate::{
    coordinator::{Coordinator, SubmitOutcome},
    display::{ConsoleDisplay, DisplaySink},
};

#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Quit,
    Status,
    Setpoint(&'a str),
}

fn parse_command(line: &str) -> Command<'_> {
    match line.trim().to_ascii_lowercase().as_str() {
        "quit" | "exit" => Command::Quit,
        "status" => Command::Status,
        _ => Command::Setpoint(line),
    }
}

pub async fn run() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config_path = config_path();
    let mut runtime = load_runtime_config(&config_path).await.unwrap_or_else(|err| {
        warn!(
            "failed to load runtime config from {}: {err:#}",
            config_path.display()
        );
        RuntimeConfig::default()
    });
    apply_env_overrides(&mut runtime.thermostat);
    runtime.thermostat.sanitize();
    info!("thermostat config: {:?}", runtime.thermostat);

    let mut coordinator =
        Coordinator::new(&runtime.thermostat, ConsoleDisplay::new(std::io::stdout()));
    coordinator
        .refresh(monotonic_ms())
        .context("failed to render initial display")?;

    let mut interval = tick_interval(runtime.thermostat.tick_interval_ms);
    // The first tick completes immediately; the engine should wait one period.
    interval.tick().await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    info!("thermostat started; enter a target temperature, 'status' or 'quit'");

    loop {
        tokio::select! {
            _ = interval.tick() => {
                coordinator
                    .on_tick(monotonic_ms())
                    .context("failed to render display")?;
            }
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read console input")? else {
                    break;
                };
                match parse_command(&line) {
                    Command::Quit => break,
                    Command::Status => print_status(&coordinator)?,
                    Command::Setpoint(raw) => {
                        let outcome = coordinator
                            .submit(raw, monotonic_ms())
                            .context("failed to render display")?;
                        log_submission(raw, &outcome);
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    info!("thermostat stopped");
    Ok(())
}

// Missed periods collapse into one late tick so a stall never replays a
// burst of convergence steps.
fn tick_interval(period_ms: u64) -> Interval {
    let mut interval = tokio::time::interval(Duration::from_millis(period_ms));
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}

fn print_status<D: DisplaySink>(coordinator: &Coordinator<D>) -> anyhow::Result<()> {
    let body = serde_json::to_string(&coordinator.engine().snapshot())
        .context("failed to serialize thermostat snapshot")?;
    let mut out = std::io::stdout().lock();
    writeln!(out, "{body}").context("failed to write status")?;
    Ok(())
}

fn log_submission(raw: &str, outcome: &SubmitOutcome) {
    match outcome {
        SubmitOutcome::Accepted(target) => info!("target set to {target:.1}"),
        SubmitOutcome::Rejected(err) => warn!("setpoint {:?} rejected: {err}", raw.trim()),
        SubmitOutcome::Unparseable(err) => {
            warn!("unparseable setpoint input {:?}: {err:?}", raw.trim())
        }
    }
}

fn config_path() -> PathBuf {
    std::env::var("THERMOSIM_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("./thermosim.json"))
}

async fn load_runtime_config(path: &Path) -> anyhow::Result<RuntimeConfig> {
    match tokio::fs::read(path).await {
        Ok(raw) => Ok(RuntimeConfig::from_json_slice(&raw)?),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(RuntimeConfig::default()),
        Err(err) => Err(err.into()),
    }
}

fn apply_env_overrides(config: &mut ThermostatConfig) {
    if let Some(value) = env_u64("THERMOSIM_TICK_MS") {
        config.tick_interval_ms = value;
    }
    if let Some(value) = env_u64("THERMOSIM_MESSAGE_TIMEOUT_MS") {
        config.message_timeout_ms = value;
    }
}

fn env_u64(key: &str) -> Option<u64> {
    std::env::var(key)
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
}

fn monotonic_ms() -> u64 {
    static START: OnceLock<Instant> = OnceLock::new();
    START
        .get_or_init(Instant::now)
        .elapsed()
        .as_millis()
        .try_into()
        .unwrap_or(u64::MAX)
}
