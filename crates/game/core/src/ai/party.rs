use crate::config::CombatConfig;
use crate::env::RngOracle;
use crate::state::{UnitId, UnitState};

/// Attack a monster commits to during the monster turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MonsterAttack {
    pub target: UnitId,
    pub damage: u32,
}

/// Picks a uniformly random living party member as the target.
///
/// Returns `None` when nobody in the party is left standing.
pub fn plan_monster_attack(
    party: &[UnitState],
    rng: &dyn RngOracle,
    seed: u64,
    config: &CombatConfig,
) -> Option<MonsterAttack> {
    let living: Vec<&UnitState> = party.iter().filter(|unit| unit.is_alive()).collect();
    let pick = rng.pick_index(seed, living.len())?;
    Some(MonsterAttack {
        target: living[pick].id,
        damage: config.monster_base_damage,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{CompanionTemplate, PcgRng, Role};

    fn party() -> Vec<UnitState> {
        let template = CompanionTemplate::builder("Ally", Role::Warrior).build();
        (0..3)
            .map(|id| UnitState::companion(UnitId(id), "ally", &template, 0, 100))
            .collect()
    }

    #[test]
    fn never_targets_the_dead() {
        let mut party = party();
        party[0].is_dead = true;
        party[2].is_dead = true;

        for seed in 0..64 {
            let attack = plan_monster_attack(&party, &PcgRng, seed, &CombatConfig::default());
            assert_eq!(attack.map(|a| a.target), Some(UnitId(1)));
        }
    }

    #[test]
    fn no_target_when_party_wiped() {
        let mut party = party();
        for unit in &mut party {
            unit.is_dead = true;
        }
        assert!(plan_monster_attack(&party, &PcgRng, 1, &CombatConfig::default()).is_none());
    }

    #[test]
    fn uses_flat_base_damage() {
        let config = CombatConfig::default();
        let attack = plan_monster_attack(&party(), &PcgRng, 9, &config);
        assert_eq!(attack.map(|a| a.damage), Some(config.monster_base_damage));
    }
}
