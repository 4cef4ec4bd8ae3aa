//! Owned battle session with copy-on-write snapshots.
//!
//! [`CombatSession`] is the explicitly constructed home of one battle at a
//! time. It keeps the state behind an [`Arc`] so readers can hold a snapshot
//! while the next command mutates a private copy, and it queues deferred
//! transitions on a virtual clock that the driver advances.

mod scheduler;

pub use scheduler::Scheduler;

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::config::CombatConfig;
use crate::engine::{ActionOptions, ActionRejected, CombatEngine, Resolution};
use crate::env::{CombatEnv, Env, MonsterDef, OracleError, RngOracle, UnitOracle, compute_seed};
use crate::state::{CombatState, InitializationError, PendingTransition, UnitId};

/// One battle at a time plus everything needed to drive it.
pub struct CombatSession {
    state: Arc<CombatState>,
    config: CombatConfig,
    units: Arc<dyn UnitOracle>,
    rng: Arc<dyn RngOracle>,
    scheduler: Scheduler,
    base_seed: u64,
    battles_started: u64,
}

impl CombatSession {
    pub fn new(
        config: CombatConfig,
        units: Arc<dyn UnitOracle>,
        rng: Arc<dyn RngOracle>,
        base_seed: u64,
    ) -> Self {
        Self {
            state: Arc::new(CombatState::new(base_seed)),
            config,
            units,
            rng,
            scheduler: Scheduler::new(),
            base_seed,
            battles_started: 0,
        }
    }

    /// Shared, immutable view of the current state.
    pub fn snapshot(&self) -> Arc<CombatState> {
        Arc::clone(&self.state)
    }

    pub fn state(&self) -> &CombatState {
        &self.state
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    pub fn units(&self) -> &Arc<dyn UnitOracle> {
        &self.units
    }

    pub fn rng(&self) -> &Arc<dyn RngOracle> {
        &self.rng
    }

    /// Starts a fresh battle, discarding the previous one and anything it
    /// had scheduled. Each battle draws a new seed from the session seed.
    pub fn initialize_combat<S: AsRef<str>>(
        &mut self,
        party_template_ids: &[S],
        monster_defs: &[MonsterDef],
    ) -> Result<Resolution, InitializationError> {
        let seed = compute_seed(self.base_seed, self.battles_started, 0, 0);
        let resolution = self.apply(|engine, env| {
            engine.initialize_combat(env, party_template_ids, monster_defs, seed)
        })?;

        self.battles_started += 1;
        self.scheduler.clear();
        self.schedule_follow_up(&resolution);
        info!(battle = self.battles_started, seed, "battle started");
        Ok(resolution)
    }

    pub fn perform_action(
        &mut self,
        unit_id: UnitId,
        options: ActionOptions,
    ) -> Result<Resolution, ActionRejected> {
        let result = self.apply(|engine, env| engine.perform_action(env, unit_id, options));
        self.after_command(unit_id, result)
    }

    pub fn resolve_special_attack(
        &mut self,
        unit_id: UnitId,
        success: bool,
    ) -> Result<Resolution, ActionRejected> {
        let result =
            self.apply(|engine, env| engine.resolve_special_attack(env, unit_id, success));
        self.after_command(unit_id, result)
    }

    pub fn select_unit(&mut self, unit_id: Option<UnitId>) -> bool {
        self.apply(|engine, _| engine.select_unit(unit_id))
    }

    /// Time left until the next deferred transition, if one is queued.
    pub fn next_due(&self) -> Option<Duration> {
        self.scheduler.next_due()
    }

    pub fn has_pending(&self) -> bool {
        !self.scheduler.is_empty()
    }

    /// Moves the virtual clock forward by `elapsed` and fires every
    /// transition that comes due, including ones scheduled along the way.
    pub fn advance(&mut self, elapsed: Duration) -> Result<Vec<Resolution>, OracleError> {
        let deadline = self.scheduler.now() + elapsed;
        let mut fired = Vec::new();
        while let Some(transition) = self.scheduler.pop_due(deadline) {
            if let Some(resolution) = self.fire(transition)? {
                fired.push(resolution);
            }
        }
        self.scheduler.advance_to(deadline);
        Ok(fired)
    }

    /// Fires queued transitions until none remain, regardless of delays.
    pub fn run_pending(&mut self) -> Result<Vec<Resolution>, OracleError> {
        let mut fired = Vec::new();
        while let Some(remaining) = self.scheduler.next_due() {
            let deadline = self.scheduler.now() + remaining;
            while let Some(transition) = self.scheduler.pop_due(deadline) {
                if let Some(resolution) = self.fire(transition)? {
                    fired.push(resolution);
                }
            }
        }
        Ok(fired)
    }

    fn fire(&mut self, transition: PendingTransition) -> Result<Option<Resolution>, OracleError> {
        let resolution = self.apply(|engine, env| engine.run_transition(env, transition))?;
        match &resolution {
            Some(resolution) => self.schedule_follow_up(resolution),
            None => debug!(?transition, "stale transition skipped"),
        }
        Ok(resolution)
    }

    fn after_command(
        &mut self,
        unit_id: UnitId,
        result: Result<Resolution, ActionRejected>,
    ) -> Result<Resolution, ActionRejected> {
        match &result {
            Ok(resolution) => self.schedule_follow_up(resolution),
            Err(err) => debug!(unit = %unit_id, %err, "command rejected"),
        }
        result
    }

    fn schedule_follow_up(&mut self, resolution: &Resolution) {
        let Some(transition) = resolution.follow_up else {
            return;
        };
        let delay = match transition {
            PendingTransition::MonsterTurn => self.config.monster_turn_delay(),
            PendingTransition::Victory => self.config.victory_delay(),
        };
        self.scheduler.schedule(transition, delay);
    }

    /// Runs `f` against a private copy of the state; readers holding an older
    /// snapshot keep seeing it unchanged.
    fn apply<T>(&mut self, f: impl FnOnce(&mut CombatEngine<'_>, CombatEnv<'_>) -> T) -> T {
        let env: CombatEnv<'_> = Env::with_all(self.units.as_ref(), self.rng.as_ref());
        let state = Arc::make_mut(&mut self.state);
        let mut engine = CombatEngine::new(state, &self.config);
        f(&mut engine, env)
    }
}
