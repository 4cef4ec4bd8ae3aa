//! Heuristic for the single-enemy mission duel.

use tracing::debug;

use crate::env::RngOracle;
use crate::state::UnitState;

/// Health ratio under which the enemy considers defending.
pub const DEFEND_THRESHOLD: f32 = 0.3;

const ATTACK_VALUE: u32 = 10;
const DEFEND_VALUE: u32 = 5;

/// Health snapshot of one side of a mission duel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MissionCombatant {
    pub current_health: u32,
    pub max_health: u32,
}

impl MissionCombatant {
    pub fn new(current_health: u32, max_health: u32) -> Self {
        Self {
            current_health,
            max_health,
        }
    }

    /// `current / max`; a zero max counts as empty.
    pub fn health_ratio(&self) -> f32 {
        if self.max_health == 0 {
            return 0.0;
        }
        self.current_health as f32 / self.max_health as f32
    }
}

impl From<&UnitState> for MissionCombatant {
    fn from(unit: &UnitState) -> Self {
        Self::new(unit.current_health, unit.max_health)
    }
}

/// Enemy decision in a mission duel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EnemyAction {
    Attack { value: u32 },
    Defend { value: u32 },
}

impl EnemyAction {
    pub const fn value(&self) -> u32 {
        match *self {
            EnemyAction::Attack { value } | EnemyAction::Defend { value } => value,
        }
    }
}

/// Decides the enemy's next move.
///
/// Below [`DEFEND_THRESHOLD`] the enemy flips a coin and defends on heads.
/// Every other case, tails included, is a plain attack. `_player` is part of
/// the decision input but not consulted by this policy.
pub fn decide_enemy_action(
    enemy: &MissionCombatant,
    _player: &MissionCombatant,
    rng: &dyn RngOracle,
    seed: u64,
) -> EnemyAction {
    let ratio = enemy.health_ratio();
    if ratio < DEFEND_THRESHOLD && rng.coin_flip(seed) {
        debug!(ratio, "enemy defends");
        return EnemyAction::Defend {
            value: DEFEND_VALUE,
        };
    }
    debug!(ratio, "enemy attacks");
    EnemyAction::Attack {
        value: ATTACK_VALUE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::PcgRng;

    #[test]
    fn healthy_enemy_always_attacks() {
        let enemy = MissionCombatant::new(80, 100);
        let player = MissionCombatant::new(50, 100);
        for seed in 0..256 {
            assert_eq!(
                decide_enemy_action(&enemy, &player, &PcgRng, seed),
                EnemyAction::Attack { value: 10 }
            );
        }
    }

    #[test]
    fn threshold_is_exclusive() {
        let enemy = MissionCombatant::new(30, 100);
        let player = MissionCombatant::new(50, 100);
        for seed in 0..64 {
            assert_eq!(decide_enemy_action(&enemy, &player, &PcgRng, seed).value(), 10);
        }
    }

    #[test]
    fn wounded_enemy_mixes_attack_and_defend() {
        let enemy = MissionCombatant::new(10, 100);
        let player = MissionCombatant::new(50, 100);
        let actions: Vec<_> = (0..256)
            .map(|seed| decide_enemy_action(&enemy, &player, &PcgRng, seed))
            .collect();

        assert!(actions.contains(&EnemyAction::Defend { value: 5 }));
        assert!(actions.contains(&EnemyAction::Attack { value: 10 }));
    }

    #[test]
    fn zero_max_health_counts_as_wounded() {
        assert_eq!(MissionCombatant::new(0, 0).health_ratio(), 0.0);
    }
}
