//! Player action resolvers: basic role actions and special abilities.

use tracing::debug;

use crate::combat::{add_shield, apply_damage, heal, scale};
use crate::env::{CombatEnv, CompanionTemplate, RngOracle, Role, SpecialAbility, SpecialEffect};
use crate::state::{Phase, UnitId};

use super::{ActionOptions, ActionRejected, CombatEngine, Resolution};

impl<'a> CombatEngine<'a> {
    /// Resolves the acting unit's role action.
    ///
    /// - Warrior: `ability_damage` to the first living monster.
    /// - Guardian: `ability_shield` to a random living ally (self included).
    /// - Support: `ability_heal` to the most wounded living ally.
    ///
    /// Critical actions scale by `crit_multiplier`.
    pub fn perform_action(
        &mut self,
        env: CombatEnv<'_>,
        unit_id: UnitId,
        options: ActionOptions,
    ) -> Result<Resolution, ActionRejected> {
        let actor = self.validate_actor(unit_id)?;
        let template = self.lookup_template(env, actor)?;
        let rng = env.rng()?;

        let log_start = self.state.combat_log.len();
        let prefix = if options.is_critical { "CRITICAL! " } else { "" };
        let actor_name = self.state.party[actor].name.clone();
        let ability = &template.ability_name;

        match template.role {
            Role::Warrior => {
                let amount = scale(
                    template.ability_damage,
                    options.is_critical,
                    self.config.crit_multiplier,
                );
                match self.first_living_monster() {
                    Some(target) => {
                        self.state.combat_log.push(format!(
                            "{prefix}{actor_name} uses {ability} on {} for {amount} damage!",
                            self.state.monsters[target].name
                        ));
                        self.damage_monster(target, amount);
                    }
                    None => self.state.combat_log.push(format!(
                        "{prefix}{actor_name} uses {ability}, but there is nothing to hit."
                    )),
                }
            }
            Role::Guardian => {
                let amount = scale(
                    template.ability_shield,
                    options.is_critical,
                    self.config.crit_multiplier,
                );
                let living: Vec<usize> = self.living_party_indices();
                let seed = self.draw_seed(unit_id, 0);
                if let Some(pick) = rng.pick_index(seed, living.len()) {
                    let target = &mut self.state.party[living[pick]];
                    add_shield(target, amount);
                    debug!(actor = %unit_id, target = %target.id, amount, "shield granted");
                    let line = format!(
                        "{prefix}{actor_name} uses {ability}, shielding {} for {amount}!",
                        target.name
                    );
                    self.state.combat_log.push(line);
                }
            }
            Role::Support => {
                let amount = scale(
                    template.ability_heal,
                    options.is_critical,
                    self.config.crit_multiplier,
                );
                match self.most_wounded_ally() {
                    Some(target) => {
                        let target = &mut self.state.party[target];
                        let restored = heal(target, amount);
                        let line = format!(
                            "{prefix}{actor_name} uses {ability}, healing {} for {restored}!",
                            target.name
                        );
                        self.state.combat_log.push(line);
                    }
                    None => self.state.combat_log.push(format!(
                        "{prefix}{actor_name} uses {ability}, but everyone is at full health."
                    )),
                }
            }
        }

        self.state.party[actor].has_acted = true;
        self.settle_player_resolution();
        Ok(self.commit(log_start))
    }

    /// Resolves a special ability cast whose challenge verdict is `success`.
    ///
    /// The charge is spent and the unit's turn ends whatever the verdict.
    pub fn resolve_special_attack(
        &mut self,
        env: CombatEnv<'_>,
        unit_id: UnitId,
        success: bool,
    ) -> Result<Resolution, ActionRejected> {
        let actor = self.validate_actor(unit_id)?;
        let template = self.lookup_template(env, actor)?;
        let rng = env.rng()?;

        let log_start = self.state.combat_log.len();
        let actor_name = self.state.party[actor].name.clone();
        {
            let unit = &mut self.state.party[actor];
            unit.current_spirit = 0;
            unit.has_acted = true;
        }

        match template.special_ability {
            None => {
                self.state
                    .combat_log
                    .push(format!("{actor_name} has no special ability. Charge lost."));
            }
            Some(SpecialAbility { name, .. }) if !success => {
                self.state
                    .combat_log
                    .push(format!("{actor_name}'s {name} FAILED! Charge lost."));
            }
            Some(SpecialAbility { name, effect }) => {
                self.state
                    .combat_log
                    .push(format!("{actor_name} unleashes {name}!"));
                self.apply_special(actor, effect, rng);
            }
        }

        self.settle_player_resolution();
        Ok(self.commit(log_start))
    }

    fn apply_special(&mut self, actor: usize, effect: SpecialEffect, rng: &dyn RngOracle) {
        match effect {
            SpecialEffect::DamageAllEnemies { value } => {
                let targets: Vec<usize> = (0..self.state.monsters.len())
                    .filter(|&index| self.state.monsters[index].is_alive())
                    .collect();
                self.state
                    .combat_log
                    .push(format!("All enemies take {value} damage!"));
                for target in targets {
                    self.damage_monster(target, value);
                }
            }
            SpecialEffect::DamageSingleEnemy { value } => {
                if let Some(target) = self.first_living_monster() {
                    self.state.combat_log.push(format!(
                        "{} takes {value} damage!",
                        self.state.monsters[target].name
                    ));
                    self.damage_monster(target, value);
                }
            }
            SpecialEffect::HealAllAllies { value } => {
                for unit in self.state.party.iter_mut().filter(|unit| unit.is_alive()) {
                    heal(unit, value);
                }
                self.state
                    .combat_log
                    .push(format!("The party recovers {value} health!"));
            }
            SpecialEffect::LastStand { value } => {
                let floor = self.config.last_stand_shield;
                let unit = &mut self.state.party[actor];
                heal(unit, value);
                unit.current_shield = unit.current_shield.max(floor);
                let line = format!("{} makes a last stand!", unit.name);
                self.state.combat_log.push(line);
            }
            SpecialEffect::ShieldAllAllies { value } => {
                for unit in self.state.party.iter_mut().filter(|unit| unit.is_alive()) {
                    add_shield(unit, value);
                }
                self.state
                    .combat_log
                    .push(format!("The party gains {value} shield!"));
            }
            SpecialEffect::MultiHit { value, count } => {
                let hits = count.unwrap_or(self.config.multi_hit_default_count);
                let caster = self.state.party[actor].id;
                for hit in 0..hits {
                    let living: Vec<usize> = (0..self.state.monsters.len())
                        .filter(|&index| self.state.monsters[index].is_alive())
                        .collect();
                    let seed = self.draw_seed(caster, hit);
                    let Some(pick) = rng.pick_index(seed, living.len()) else {
                        break;
                    };
                    let target = living[pick];
                    self.state.combat_log.push(format!(
                        "Hit {} strikes {} for {value}!",
                        hit + 1,
                        self.state.monsters[target].name
                    ));
                    self.damage_monster(target, value);
                }
            }
        }
    }

    /// Gate shared by both resolvers. Returns the actor's party index.
    fn validate_actor(&self, unit_id: UnitId) -> Result<usize, ActionRejected> {
        if self.state.phase != Phase::PlayerTurn {
            return Err(ActionRejected::NotPlayerTurn {
                phase: self.state.phase,
            });
        }
        if self.state.pending.is_some() {
            return Err(ActionRejected::TransitionPending);
        }

        let index = self
            .state
            .party_index(unit_id)
            .ok_or(ActionRejected::UnitNotFound(unit_id))?;
        let unit = &self.state.party[index];
        if unit.is_dead {
            return Err(ActionRejected::UnitDefeated(unit_id));
        }
        if unit.has_acted {
            return Err(ActionRejected::AlreadyActed(unit_id));
        }
        Ok(index)
    }

    fn lookup_template(
        &self,
        env: CombatEnv<'_>,
        actor: usize,
    ) -> Result<CompanionTemplate, ActionRejected> {
        let template_id = &self.state.party[actor].template_id;
        env.units()?
            .companion(template_id)
            .ok_or_else(|| ActionRejected::TemplateMissing(template_id.clone()))
    }

    fn first_living_monster(&self) -> Option<usize> {
        self.state.monsters.iter().position(|unit| unit.is_alive())
    }

    fn living_party_indices(&self) -> Vec<usize> {
        (0..self.state.party.len())
            .filter(|&index| self.state.party[index].is_alive())
            .collect()
    }

    /// Living ally with the lowest health among those below max; first wins ties.
    fn most_wounded_ally(&self) -> Option<usize> {
        let mut best: Option<usize> = None;
        for (index, unit) in self.state.party.iter().enumerate() {
            if !unit.is_alive() || unit.current_health >= unit.max_health {
                continue;
            }
            match best {
                Some(current) if self.state.party[current].current_health <= unit.current_health => {}
                _ => best = Some(index),
            }
        }
        best
    }

    fn damage_monster(&mut self, index: usize, amount: u32) {
        let monster = &mut self.state.monsters[index];
        let report = apply_damage(monster, amount);
        debug!(target = %monster.id, amount, absorbed = report.absorbed, "monster hit");
        if report.killed {
            let line = format!("{} is defeated!", monster.name);
            self.state.combat_log.push(line);
        }
    }
}
