//! Headless battle driver: plays one encounter with the auto-pilot party and
//! prints the combat log.
mod autopilot;
mod config;

use anyhow::{Context, Result, anyhow};
use battle_content::{ContentBundle, ContentFactory};
use battle_core::{BattleOutcome, CombatConfig, Phase};
use battle_runtime::{BattleEvent, OracleManager, Runtime, RuntimeConfig};
use tokio::sync::broadcast::error::RecvError;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use autopilot::Autopilot;
use config::CliConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = CliConfig::from_env();
    let _guard = setup_logging(&config)?;

    let bundle = load_content(&config)?;
    let monsters = bundle
        .encounter(&config.encounter)
        .ok_or_else(|| anyhow!("unknown encounter '{}'", config.encounter))?
        .to_vec();

    let combat = if config.paced {
        bundle.config.clone()
    } else {
        CombatConfig {
            monster_turn_delay_ms: 0,
            victory_delay_ms: 0,
            ..bundle.config.clone()
        }
    };
    let seed = config.seed.unwrap_or_else(rand::random);

    let mut runtime = Runtime::builder()
        .config(RuntimeConfig {
            combat,
            seed: Some(seed),
            difficulty: config.difficulty,
            ..RuntimeConfig::default()
        })
        .oracles(OracleManager::from_bundle(&bundle))
        .party_provider(Autopilot::new(config.accuracy, seed))
        .build()
        .await?;

    let events = runtime.subscribe_events();
    let printer = tokio::spawn(print_events(events));

    tracing::info!(seed, encounter = %config.encounter, party = ?config.party, "starting battle");
    runtime
        .handle()
        .start_battle(config.party.clone(), monsters)
        .await
        .context("failed to start battle")?;

    let outcome = runtime.run_battle().await?;
    let state = runtime.handle().query_state().await?;
    runtime.shutdown().await?;
    printer.await?;

    println!();
    match outcome {
        BattleOutcome::Victory => println!("Victory after {} turn(s).", state.turn_count),
        BattleOutcome::Defeat => println!("Defeat after {} turn(s).", state.turn_count),
    }
    for unit in &state.party {
        println!(
            "  {:<8} {:>3}/{:<3} HP{}",
            unit.name,
            unit.current_health,
            unit.max_health,
            if unit.is_dead { " (fallen)" } else { "" }
        );
    }

    Ok(())
}

fn load_content(config: &CliConfig) -> Result<ContentBundle> {
    match &config.content_dir {
        Some(dir) => ContentFactory::new(dir).load_all(),
        None => Ok(ContentFactory::builtin()),
    }
}

/// Prints log lines until the event channel closes.
async fn print_events(mut events: tokio::sync::broadcast::Receiver<BattleEvent>) {
    loop {
        match events.recv().await {
            Ok(BattleEvent::LogAppended(line)) => println!("{line}"),
            Ok(BattleEvent::PhaseChanged {
                to: Phase::PlayerTurn,
                ..
            }) => println!("--"),
            Ok(_) => {}
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "log printer fell behind");
            }
            Err(RecvError::Closed) => break,
        }
    }
}

/// Setup logging to stderr and, when a log directory is configured, to file
fn setup_logging(config: &CliConfig) -> Result<Option<WorkerGuard>> {
    let env_filter = tracing_subscriber::EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let (file_layer, guard) = match &config.log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("failed to create log directory {}", dir.display()))?;
            let file_appender = tracing_appender::rolling::never(dir, "battle.log");
            let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking_file)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    if let Some(dir) = &config.log_dir {
        tracing::info!("Log file: {}/battle.log", dir.display());
    }

    Ok(guard)
}
