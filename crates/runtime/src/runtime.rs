//! High-level runtime orchestrator.
//!
//! The runtime owns the session worker, wires up command/event channels, and
//! exposes a builder-based API for clients to drive battles.

use tokio::sync::broadcast::{self, error::RecvError};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use battle_core::{ActionOptions, BattleOutcome, CombatConfig, CombatSession, Difficulty, Phase};

use crate::api::{
    BattleEvent, PartyCommand, PartyProvider, Result, RuntimeError, RuntimeHandle,
};
use crate::challenge::ChallengePurpose;
use crate::oracle::OracleManager;
use crate::workers::{Command, SessionWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub combat: CombatConfig,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Session seed. Drawn from the OS when unset.
    pub seed: Option<u64>,
    /// Difficulty of issued math challenges.
    pub difficulty: Difficulty,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            combat: CombatConfig::default(),
            event_buffer_size: 100,
            command_buffer_size: 32,
            seed: None,
            difficulty: Difficulty::default(),
        }
    }
}

/// Main runtime that orchestrates battles
///
/// Runtime owns the worker and coordinates execution.
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    party_provider: Option<Box<dyn PartyProvider>>,
    worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Subscribe to battle events
    pub fn subscribe_events(&self) -> broadcast::Receiver<BattleEvent> {
        self.handle.subscribe()
    }

    /// Set the party provider
    pub fn set_party_provider(&mut self, provider: impl PartyProvider + 'static) {
        self.party_provider = Some(Box::new(provider));
    }

    /// Drive the current battle with the party provider until it ends.
    ///
    /// Waits out monster turns and pending transitions on the worker's clock.
    pub async fn run_battle(&mut self) -> Result<BattleOutcome> {
        let provider = self
            .party_provider
            .as_deref()
            .ok_or(RuntimeError::ProviderNotSet)?;
        let mut events = self.handle.subscribe();

        loop {
            let state = self.handle.query_state().await?;
            if let Some(outcome) = state.outcome() {
                return Ok(outcome);
            }
            if state.phase == Phase::Init {
                return Err(RuntimeError::NoActiveBattle);
            }

            if !state.accepts_input() {
                wait_for_change(&mut events, state.version).await?;
                continue;
            }

            let command = provider.choose_command(&state).await?;
            execute_party_command(&self.handle, provider, command).await?;
        }
    }

    /// Shutdown the runtime gracefully
    ///
    /// Outstanding handle clones fail with `CommandChannelClosed` afterwards.
    pub async fn shutdown(self) -> Result<()> {
        self.handle.shutdown().await;
        drop(self.handle);
        self.worker_handle.await.map_err(RuntimeError::WorkerJoin)
    }
}

async fn execute_party_command(
    handle: &RuntimeHandle,
    provider: &dyn PartyProvider,
    command: PartyCommand,
) -> Result<()> {
    debug!(target: "runtime", ?command, "executing party command");

    let purpose = match command {
        PartyCommand::Basic {
            unit,
            challenge: false,
        } => {
            handle.perform_action(unit, ActionOptions::default()).await?;
            return Ok(());
        }
        PartyCommand::Basic { .. } => ChallengePurpose::Critical,
        PartyCommand::Special { .. } => ChallengePurpose::Special,
    };

    let unit = command.unit();
    let problem = handle.request_challenge(unit, purpose).await?;
    let answer = provider.answer(unit, &problem).await?;
    let outcome = handle.answer_challenge(unit, answer).await?;
    debug!(
        target: "runtime",
        unit = %unit,
        prompt = %outcome.problem.prompt(),
        answer,
        correct = outcome.correct,
        "challenge resolved"
    );
    Ok(())
}

/// Blocks until the worker commits a state newer than `version`.
async fn wait_for_change(
    events: &mut broadcast::Receiver<BattleEvent>,
    version: u64,
) -> Result<()> {
    loop {
        match events.recv().await {
            Ok(BattleEvent::StateChanged { version: seen, .. }) if seen > version => return Ok(()),
            Ok(_) => {}
            Err(RecvError::Lagged(skipped)) => {
                warn!(target: "runtime", skipped, "event receiver lagged");
                return Ok(());
            }
            Err(RecvError::Closed) => return Err(RuntimeError::EventChannelClosed),
        }
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    oracles: Option<OracleManager>,
    party_provider: Option<Box<dyn PartyProvider>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            oracles: None,
            party_provider: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set required oracle manager
    pub fn oracles(mut self, oracles: OracleManager) -> Self {
        self.oracles = Some(oracles);
        self
    }

    /// Set party provider (optional)
    pub fn party_provider(mut self, provider: impl PartyProvider + 'static) -> Self {
        self.party_provider = Some(Box::new(provider));
        self
    }

    /// Build the runtime and spawn its worker
    pub async fn build(self) -> Result<Runtime> {
        let oracles = self.oracles.ok_or(RuntimeError::MissingOracles)?;
        let seed = self.config.seed.unwrap_or_else(rand::random);

        let session = CombatSession::new(
            self.config.combat.clone(),
            oracles.shared_units(),
            oracles.shared_rng(),
            seed,
        );

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let (event_tx, _event_rx) =
            broadcast::channel::<BattleEvent>(self.config.event_buffer_size);

        let handle = RuntimeHandle::new(command_tx, event_tx.clone());

        let worker = SessionWorker::new(
            session,
            oracles,
            self.config.difficulty,
            command_rx,
            event_tx,
        );
        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        debug!(target: "runtime", seed, "runtime started");

        Ok(Runtime {
            handle,
            party_provider: self.party_provider,
            worker_handle,
        })
    }
}
