//! Math challenges gating critical and special actions.
//!
//! A party member asks for a challenge, the player answers, and the verdict
//! decides whether the basic action lands as a critical or whether the special
//! ability succeeds. The engine only ever sees the resulting boolean.

use std::collections::HashMap;

use battle_core::{
    ActionRejected, CombatState, Difficulty, MathOracle, Operation, Phase, Problem, RngOracle,
    UnitId, Verdict, compute_seed,
};

use crate::api::{Result, RuntimeError};

/// Draw context reserved for challenge generation, clear of engine draws.
const CHALLENGE_CONTEXT: u32 = 0x00C0_FFEE;

const OPERATIONS: [Operation; 4] = [
    Operation::Addition,
    Operation::Subtraction,
    Operation::Multiplication,
    Operation::Division,
];

/// What a challenge unlocks when answered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChallengePurpose {
    /// Basic action, critical on a correct answer.
    Critical,
    /// Special ability, succeeds on a correct answer.
    Special,
}

/// A problem waiting for the player's answer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingChallenge {
    pub purpose: ChallengePurpose,
    pub problem: Problem,
}

/// One pending challenge per unit, cleared whenever a battle starts.
#[derive(Debug, Default)]
pub struct ChallengeBook {
    pending: HashMap<UnitId, PendingChallenge>,
    issued: u32,
}

impl ChallengeBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Drops the unit's challenge once it has acted some other way.
    pub fn clear_unit(&mut self, unit: UnitId) {
        self.pending.remove(&unit);
    }

    pub fn pending(&self, unit: UnitId) -> Option<&PendingChallenge> {
        self.pending.get(&unit)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Issues a challenge for `unit`, replacing any earlier one.
    ///
    /// The unit must be able to act right now; a special challenge also needs
    /// a full spirit meter.
    pub fn request(
        &mut self,
        state: &CombatState,
        unit: UnitId,
        purpose: ChallengePurpose,
        difficulty: Difficulty,
        math: &dyn MathOracle,
        rng: &dyn RngOracle,
    ) -> Result<Problem> {
        ensure_can_use(state, unit, purpose)?;

        let seed = compute_seed(
            state.seed,
            state.nonce,
            unit.0,
            CHALLENGE_CONTEXT.wrapping_add(self.issued),
        );
        self.issued = self.issued.wrapping_add(1);

        let operation = rng
            .pick_index(seed, OPERATIONS.len())
            .map(|index| OPERATIONS[index])
            .unwrap_or(Operation::Addition);
        let problem = math.generate_problem(operation, difficulty, seed);

        tracing::debug!(
            target: "runtime::challenge",
            unit = %unit,
            ?purpose,
            prompt = %problem.prompt(),
            "challenge issued"
        );

        self.pending.insert(
            unit,
            PendingChallenge {
                purpose,
                problem: problem.clone(),
            },
        );
        Ok(problem)
    }

    /// Judges the answer and consumes the unit's challenge.
    ///
    /// The gated action is checked first; a rejection leaves the challenge
    /// pending.
    pub fn answer(
        &mut self,
        state: &CombatState,
        unit: UnitId,
        answer: i64,
        math: &dyn MathOracle,
    ) -> Result<(PendingChallenge, Verdict)> {
        let purpose = self
            .pending
            .get(&unit)
            .map(|challenge| challenge.purpose)
            .ok_or(RuntimeError::NoPendingChallenge(unit))?;
        let challenge = self.take(state, unit, purpose)?;
        let verdict = math.validate_answer(answer, &challenge.problem);
        Ok((challenge, verdict))
    }

    /// Consumes the unit's challenge of the given purpose without judging an
    /// answer, for verdicts decided elsewhere.
    pub fn take(
        &mut self,
        state: &CombatState,
        unit: UnitId,
        purpose: ChallengePurpose,
    ) -> Result<PendingChallenge> {
        if self.pending.get(&unit).map(|challenge| challenge.purpose) != Some(purpose) {
            return Err(RuntimeError::NoPendingChallenge(unit));
        }
        ensure_can_use(state, unit, purpose)?;
        self.pending
            .remove(&unit)
            .ok_or(RuntimeError::NoPendingChallenge(unit))
    }
}

fn ensure_can_use(state: &CombatState, unit: UnitId, purpose: ChallengePurpose) -> Result<()> {
    ensure_can_act(state, unit)?;
    if purpose == ChallengePurpose::Special
        && !state.unit(unit).is_some_and(|u| u.is_special_ready())
    {
        return Err(RuntimeError::SpecialNotReady(unit));
    }
    Ok(())
}

fn ensure_can_act(state: &CombatState, unit: UnitId) -> Result<()> {
    if state.phase != Phase::PlayerTurn {
        return Err(ActionRejected::NotPlayerTurn { phase: state.phase }.into());
    }
    if state.pending.is_some() {
        return Err(ActionRejected::TransitionPending.into());
    }
    let member = state
        .party
        .iter()
        .find(|member| member.id == unit)
        .ok_or(ActionRejected::UnitNotFound(unit))?;
    if member.is_dead {
        return Err(ActionRejected::UnitDefeated(unit).into());
    }
    if member.has_acted {
        return Err(ActionRejected::AlreadyActed(unit).into());
    }
    Ok(())
}
