use std::sync::Arc;

use anyhow::Result;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, BufReader};

use somnus::{insights, Clock, DemoEngine, HistoryAggregator, Session, SystemClock, TelemetrySimulator};

/// Line-oriented demo console: the explicit command surface a presenter uses
/// to drive the engine and inspect the synthesized data.
#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (reads RUST_LOG env var)
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Somnus demo console starting up...");

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let session = Arc::new(Session::new(clock.as_ref()));
    let telemetry = TelemetrySimulator::new(clock.clone(), session.clone());
    let history = HistoryAggregator::new(clock.clone(), session.clone());
    let engine = DemoEngine::new(clock.clone());
    let mut rng = StdRng::from_entropy();

    engine
        .add_listener(|event| {
            let message = event.message.as_deref().unwrap_or("-");
            info!("[{}] {}: {}", event.kind.as_str(), event.action, message);
        })
        .await;

    print_help();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let mut parts = line.split_whitespace();
        let Some(command) = parts.next() else {
            continue;
        };

        match command {
            "scenarios" => print_json(&engine.list_scenarios())?,
            "start" => {
                let name = parts.collect::<Vec<_>>().join(" ");
                if name.is_empty() {
                    println!("usage: start <scenario name>");
                } else if engine.start(&name).await {
                    println!("started: {name}");
                } else {
                    println!("no such scenario: {name}");
                }
            }
            "stop" => {
                engine.stop().await;
                println!("stopped");
            }
            "status" => {
                println!("running: {}", engine.is_running().await);
                if let Some(name) = engine.current_scenario().await {
                    println!(
                        "scenario: {} ({:.0}% complete)",
                        name,
                        engine.progress().await * 100.0
                    );
                }
            }
            "reading" => print_json(&telemetry.current_reading())?,
            "history" => {
                let hours = parts.next().and_then(|raw| raw.parse().ok()).unwrap_or(8);
                print_json(&history.historical_series(hours))?;
            }
            "log" => print_json(&telemetry.activity_log())?,
            "trends" => print_json(&insights::weekly_sleep_trends(&mut rng))?,
            "correlations" => print_json(&insights::environmental_correlations())?,
            "metrics" => print_json(&insights::system_metrics(&mut rng))?,
            "spike" => engine.trigger_temperature_spike().await,
            "hr" => engine.trigger_heart_rate_change().await,
            "co2" => engine.trigger_co2_alert().await,
            "sleep" => engine.trigger_sleep_phase_change().await,
            "help" => print_help(),
            "quit" | "exit" => break,
            other => println!("unknown command: {other} (try \"help\")"),
        }
    }

    engine.stop().await;
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_help() {
    println!("commands:");
    println!("  scenarios            list available demo scenarios");
    println!("  start <name>         start a scenario by exact name");
    println!("  stop                 stop the running scenario");
    println!("  status               engine state and progress");
    println!("  reading              current sensor snapshot");
    println!("  history [hours]      hourly session series (default 8)");
    println!("  log                  activity feed");
    println!("  trends               weekly sleep trends");
    println!("  correlations         environmental correlations");
    println!("  metrics              system health metrics");
    println!("  spike | hr | co2 | sleep   manual demo triggers");
    println!("  help | quit");
}
