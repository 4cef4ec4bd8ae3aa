//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! driving a battle or streaming its events.
use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, oneshot};

use battle_core::{ActionOptions, CombatState, MonsterDef, Problem, Resolution, UnitId};

use super::errors::{Result, RuntimeError};
use super::events::BattleEvent;
use crate::challenge::ChallengePurpose;
use crate::workers::Command;

/// Result of answering a challenge: the problem, the verdict, and the action
/// it resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChallengeOutcome {
    pub problem: Problem,
    pub correct: bool,
    pub resolution: Resolution,
}

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_tx: broadcast::Sender<BattleEvent>,
}

impl RuntimeHandle {
    pub(crate) fn new(
        command_tx: mpsc::Sender<Command>,
        event_tx: broadcast::Sender<BattleEvent>,
    ) -> Self {
        Self {
            command_tx,
            event_tx,
        }
    }

    /// Start a new battle, replacing the current one.
    pub async fn start_battle(
        &self,
        party: Vec<String>,
        monsters: Vec<MonsterDef>,
    ) -> Result<Arc<CombatState>> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::StartBattle {
                party,
                monsters,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Basic action with the verdict already decided by the caller.
    pub async fn perform_action(&self, unit: UnitId, options: ActionOptions) -> Result<Resolution> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::PerformAction {
                unit,
                options,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Special ability with the verdict already decided by the caller.
    ///
    /// The unit needs a pending special challenge (see
    /// [`RuntimeHandle::request_challenge`]), which this consumes.
    pub async fn resolve_special_attack(&self, unit: UnitId, success: bool) -> Result<Resolution> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::ResolveSpecial {
                unit,
                success,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Change the UI selection. Returns whether it changed.
    pub async fn select_unit(&self, unit: Option<UnitId>) -> Result<bool> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::SelectUnit {
                unit,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Issue a math problem for `unit`. The action runs once it is answered.
    pub async fn request_challenge(
        &self,
        unit: UnitId,
        purpose: ChallengePurpose,
    ) -> Result<Problem> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::RequestChallenge {
                unit,
                purpose,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Answer the unit's pending problem and resolve the gated action.
    pub async fn answer_challenge(&self, unit: UnitId, answer: i64) -> Result<ChallengeOutcome> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::AnswerChallenge {
                unit,
                answer,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Query the current battle state (read-only snapshot)
    pub async fn query_state(&self) -> Result<Arc<CombatState>> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::QueryState { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Asks the worker to stop. A worker that is already gone is fine.
    pub(crate) async fn shutdown(&self) {
        let _ = self.command_tx.send(Command::Shutdown).await;
    }

    /// Subscribe to battle events
    pub fn subscribe(&self) -> broadcast::Receiver<BattleEvent> {
        self.event_tx.subscribe()
    }
}
