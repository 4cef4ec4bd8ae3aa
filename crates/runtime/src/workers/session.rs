//! Session worker that owns the authoritative [`CombatSession`].
//!
//! Receives commands from [`crate::RuntimeHandle`], runs them through the
//! session, fires deferred transitions when their delay has elapsed in real
//! time, and publishes [`BattleEvent`] notifications.

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::time::{Instant, sleep};
use tracing::{debug, error, info, warn};

use battle_core::{
    ActionOptions, CombatSession, CombatState, Difficulty, MonsterDef, Phase, Problem, Resolution,
    UnitId,
};

use crate::api::{BattleEvent, ChallengeOutcome, Result};
use crate::challenge::{ChallengeBook, ChallengePurpose};
use crate::oracle::OracleManager;

/// Commands that can be sent to the session worker
pub enum Command {
    /// Replace the current battle with a fresh one.
    StartBattle {
        party: Vec<String>,
        monsters: Vec<MonsterDef>,
        reply: oneshot::Sender<Result<Arc<CombatState>>>,
    },
    /// Basic action without a challenge.
    PerformAction {
        unit: UnitId,
        options: ActionOptions,
        reply: oneshot::Sender<Result<Resolution>>,
    },
    /// Special ability with an externally judged verdict. Consumes the
    /// unit's pending special challenge.
    ResolveSpecial {
        unit: UnitId,
        success: bool,
        reply: oneshot::Sender<Result<Resolution>>,
    },
    SelectUnit {
        unit: Option<UnitId>,
        reply: oneshot::Sender<bool>,
    },
    RequestChallenge {
        unit: UnitId,
        purpose: ChallengePurpose,
        reply: oneshot::Sender<Result<Problem>>,
    },
    AnswerChallenge {
        unit: UnitId,
        answer: i64,
        reply: oneshot::Sender<Result<ChallengeOutcome>>,
    },
    /// Query the current snapshot (read-only).
    QueryState {
        reply: oneshot::Sender<Arc<CombatState>>,
    },
    /// Stop the worker even while handle clones are still alive.
    Shutdown,
}

/// Background task that processes battle commands.
pub struct SessionWorker {
    session: CombatSession,
    oracles: OracleManager,
    challenges: ChallengeBook,
    difficulty: Difficulty,
    command_rx: mpsc::Receiver<Command>,
    event_tx: broadcast::Sender<BattleEvent>,
    last_tick: Instant,
}

impl SessionWorker {
    /// Creates a new session worker.
    pub fn new(
        session: CombatSession,
        oracles: OracleManager,
        difficulty: Difficulty,
        command_rx: mpsc::Receiver<Command>,
        event_tx: broadcast::Sender<BattleEvent>,
    ) -> Self {
        Self {
            session,
            oracles,
            challenges: ChallengeBook::new(),
            difficulty,
            command_rx,
            event_tx,
            last_tick: Instant::now(),
        }
    }

    /// Main worker loop.
    ///
    /// Ends on [`Command::Shutdown`] or when every command sender has been
    /// dropped.
    pub async fn run(mut self) {
        loop {
            self.fire_due_transitions();
            let due = self.session.next_due();

            tokio::select! {
                cmd = self.command_rx.recv() => match cmd {
                    Some(Command::Shutdown) | None => break,
                    Some(cmd) => self.handle_command(cmd),
                },
                _ = sleep(due.unwrap_or_default()), if due.is_some() => {}
            }
        }
        debug!(target: "runtime::worker", "session worker stopped");
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::StartBattle {
                party,
                monsters,
                reply,
            } => {
                let result = self.start_battle(&party, &monsters);
                let _ = reply.send(result);
            }
            Command::PerformAction {
                unit,
                options,
                reply,
            } => {
                let result = self.perform_action(unit, options);
                let _ = reply.send(result);
            }
            Command::ResolveSpecial {
                unit,
                success,
                reply,
            } => {
                let taken = self
                    .challenges
                    .take(self.session.state(), unit, ChallengePurpose::Special);
                let result = match taken {
                    Ok(_) => self.resolve_special(unit, success),
                    Err(err) => {
                        warn!(target: "runtime::worker", unit = %unit, %err, "special refused");
                        Err(err)
                    }
                };
                let _ = reply.send(result);
            }
            Command::SelectUnit { unit, reply } => {
                let changed = self.session.select_unit(unit);
                if changed {
                    self.publish_state();
                }
                let _ = reply.send(changed);
            }
            Command::RequestChallenge {
                unit,
                purpose,
                reply,
            } => {
                let result = self.challenges.request(
                    self.session.state(),
                    unit,
                    purpose,
                    self.difficulty,
                    self.oracles.math(),
                    self.oracles.rng(),
                );
                if let Err(err) = &result {
                    warn!(target: "runtime::worker", unit = %unit, ?purpose, %err, "challenge refused");
                }
                let _ = reply.send(result);
            }
            Command::AnswerChallenge {
                unit,
                answer,
                reply,
            } => {
                let result = self.answer_challenge(unit, answer);
                let _ = reply.send(result);
            }
            Command::QueryState { reply } => {
                let _ = reply.send(self.session.snapshot());
            }
            Command::Shutdown => {}
        }
    }

    fn start_battle(&mut self, party: &[String], monsters: &[MonsterDef]) -> Result<Arc<CombatState>> {
        let phase_before = self.session.state().phase;
        let resolution = self.session.initialize_combat(party, monsters)?;
        self.challenges.clear();
        self.last_tick = Instant::now();

        info!(
            target: "runtime::worker",
            party = ?party,
            monsters = monsters.len(),
            "battle started"
        );
        self.publish(phase_before, &resolution);
        Ok(self.session.snapshot())
    }

    fn perform_action(&mut self, unit: UnitId, options: ActionOptions) -> Result<Resolution> {
        let phase_before = self.session.state().phase;
        match self.session.perform_action(unit, options) {
            Ok(resolution) => {
                self.challenges.clear_unit(unit);
                self.publish(phase_before, &resolution);
                Ok(resolution)
            }
            Err(err) => {
                warn!(target: "runtime::worker", unit = %unit, %err, "action rejected");
                Err(err.into())
            }
        }
    }

    fn resolve_special(&mut self, unit: UnitId, success: bool) -> Result<Resolution> {
        let phase_before = self.session.state().phase;
        match self.session.resolve_special_attack(unit, success) {
            Ok(resolution) => {
                self.challenges.clear_unit(unit);
                self.publish(phase_before, &resolution);
                Ok(resolution)
            }
            Err(err) => {
                warn!(target: "runtime::worker", unit = %unit, %err, "special rejected");
                Err(err.into())
            }
        }
    }

    fn answer_challenge(&mut self, unit: UnitId, answer: i64) -> Result<ChallengeOutcome> {
        let (challenge, verdict) =
            self.challenges
                .answer(self.session.state(), unit, answer, self.oracles.math())?;
        debug!(
            target: "runtime::worker",
            unit = %unit,
            purpose = ?challenge.purpose,
            correct = verdict.is_correct,
            "challenge answered"
        );

        let resolution = match challenge.purpose {
            ChallengePurpose::Critical => self.perform_action(
                unit,
                ActionOptions {
                    is_critical: verdict.is_correct,
                },
            )?,
            ChallengePurpose::Special => self.resolve_special(unit, verdict.is_correct)?,
        };

        Ok(ChallengeOutcome {
            problem: challenge.problem,
            correct: verdict.is_correct,
            resolution,
        })
    }

    /// Advances the session clock by the real time elapsed since the last
    /// tick and publishes whatever fired.
    fn fire_due_transitions(&mut self) {
        let now = Instant::now();
        let elapsed = now.saturating_duration_since(self.last_tick);
        self.last_tick = now;

        let phase_before = self.session.state().phase;
        match self.session.advance(elapsed) {
            Ok(fired) if fired.is_empty() => {}
            Ok(fired) => {
                for resolution in &fired {
                    self.publish_log(resolution);
                }
                self.publish_transition(phase_before);
            }
            Err(err) => {
                error!(target: "runtime::worker", %err, "deferred transition failed");
            }
        }
    }

    fn publish(&self, phase_before: Phase, resolution: &Resolution) {
        self.publish_log(resolution);
        self.publish_transition(phase_before);
    }

    fn publish_log(&self, resolution: &Resolution) {
        for line in &resolution.log_entries {
            let _ = self.event_tx.send(BattleEvent::LogAppended(line.clone()));
        }
    }

    fn publish_transition(&self, phase_before: Phase) {
        let state = self.session.state();
        let phase_changed = state.phase != phase_before;
        if phase_changed {
            debug!(
                target: "runtime::worker",
                from = %phase_before,
                to = %state.phase,
                "phase changed"
            );
            let _ = self.event_tx.send(BattleEvent::PhaseChanged {
                from: phase_before,
                to: state.phase,
            });
        }

        self.publish_state();

        if phase_changed && let Some(outcome) = state.outcome() {
            info!(target: "runtime::worker", %outcome, turn = state.turn_count, "battle ended");
            let _ = self.event_tx.send(BattleEvent::BattleEnded(outcome));
        }
    }

    fn publish_state(&self) {
        let state = self.session.state();
        let _ = self.event_tx.send(BattleEvent::StateChanged {
            version: state.version,
            phase: state.phase,
        });
    }
}
