//! Combat flow controller: battle setup and phase transitions.

use tracing::{debug, info};

use crate::ai::party::plan_monster_attack;
use crate::combat::apply_damage;
use crate::env::{CombatEnv, MonsterDef, OracleError, compute_seed};
use crate::state::{
    CombatState, InitializationError, PendingTransition, Phase, UnitId, UnitState,
};

use super::{CombatEngine, Resolution};

pub(super) const COMBAT_STARTED: &str = "Combat Started!";
pub(super) const VICTORY_LINE: &str = "Victory! All monsters defeated!";
pub(super) const DEFEAT_LINE: &str = "Your party has been defeated!";

impl<'a> CombatEngine<'a> {
    /// Replaces the current battle with a fresh one.
    ///
    /// Party members get ids `0..party.len()` in slot order, monsters follow.
    /// Starting spirit is drawn from `initial_spirit_min..=initial_spirit_max`.
    /// On error the previous battle is left untouched.
    ///
    /// An empty monster list leaves a pending victory; a party without
    /// living members hands the turn straight to the monsters.
    pub fn initialize_combat<S: AsRef<str>>(
        &mut self,
        env: CombatEnv<'_>,
        party_template_ids: &[S],
        monster_defs: &[MonsterDef],
        seed: u64,
    ) -> Result<Resolution, InitializationError> {
        let units = env.units()?;
        let rng = env.rng()?;

        let mut next = CombatState::new(seed);

        for (slot, template_id) in party_template_ids.iter().enumerate() {
            let template_id = template_id.as_ref();
            let template = units.companion(template_id).ok_or_else(|| {
                InitializationError::UnknownTemplate {
                    template_id: template_id.to_string(),
                    slot,
                }
            })?;

            let id = UnitId(slot as u32);
            let spirit = rng.range(
                compute_seed(seed, 0, id.0, 0),
                self.config.initial_spirit_min,
                self.config.initial_spirit_max,
            );
            next.party.push(UnitState::companion(
                id,
                template_id,
                &template,
                spirit,
                self.config.max_spirit,
            ));
        }

        let offset = next.party.len() as u32;
        for (index, def) in monster_defs.iter().enumerate() {
            next.monsters
                .push(UnitState::monster(UnitId(offset + index as u32), def));
        }

        next.phase = Phase::PlayerTurn;
        next.turn_count = 1;
        next.combat_log.push(COMBAT_STARTED);
        next.version = self.state.version + 1;

        *self.state = next;

        info!(
            party = self.state.party.len(),
            monsters = self.state.monsters.len(),
            seed,
            "combat initialized"
        );

        if self.state.all_monsters_dead() {
            self.declare_victory();
        } else if self.state.living_party().next().is_none() {
            self.end_player_turn();
        }

        self.state.nonce = 1;

        Ok(Resolution {
            log_entries: self.state.combat_log.entries().to_vec(),
            follow_up: self.state.pending,
        })
    }

    /// Runs a deferred transition if it is still the pending one.
    ///
    /// Returns `Ok(None)` for a stale transition (e.g. one scheduled by a
    /// battle that has since been replaced).
    pub fn run_transition(
        &mut self,
        env: CombatEnv<'_>,
        transition: PendingTransition,
    ) -> Result<Option<Resolution>, OracleError> {
        match transition {
            PendingTransition::MonsterTurn => self.process_monster_turn(env),
            PendingTransition::Victory => Ok(self.complete_victory()),
        }
    }

    /// MONSTER_TURN → PLAYER_TURN | DEFEAT.
    ///
    /// Each living monster, in list order, attacks a random living party
    /// member. The loss check runs after every monster has resolved.
    pub fn process_monster_turn(
        &mut self,
        env: CombatEnv<'_>,
    ) -> Result<Option<Resolution>, OracleError> {
        if self.state.pending != Some(PendingTransition::MonsterTurn) {
            return Ok(None);
        }
        let rng = env.rng()?;

        let log_start = self.state.combat_log.len();
        self.state.pending = None;

        for index in 0..self.state.monsters.len() {
            if self.state.monsters[index].is_dead {
                continue;
            }

            let monster_id = self.state.monsters[index].id;
            let seed = self.draw_seed(monster_id, 0);
            let Some(attack) = plan_monster_attack(&self.state.party, rng, seed, self.config)
            else {
                debug!(monster = %monster_id, "no living party member left");
                break;
            };

            self.state.monsters[index].has_acted = true;
            let monster_name = self.state.monsters[index].name.clone();

            let Some(target) = self
                .state
                .party
                .iter_mut()
                .find(|unit| unit.id == attack.target)
            else {
                continue;
            };

            let report = apply_damage(target, attack.damage);
            debug!(
                monster = %monster_id,
                target = %attack.target,
                damage = attack.damage,
                absorbed = report.absorbed,
                "monster attack"
            );

            let mut line = format!(
                "{} attacks {} for {} damage!",
                monster_name, target.name, attack.damage
            );
            if report.absorbed > 0 {
                line.push_str(&format!(" ({} absorbed by shield)", report.absorbed));
            }
            if report.killed {
                line.push_str(&format!(" {} has fallen!", target.name));
            }
            self.state.combat_log.push(line);
        }

        let regen = self.config.spirit_regen;
        for unit in &mut self.state.party {
            unit.has_acted = false;
            if unit.is_alive() {
                unit.current_spirit = unit.current_spirit.saturating_add(regen).min(unit.max_spirit);
            }
        }
        self.state.turn_count += 1;

        if self.state.all_party_dead() {
            self.state.phase = Phase::Defeat;
            self.state.combat_log.push(DEFEAT_LINE);
            info!(turn = self.state.turn_count, "party defeated");
        } else {
            self.state.phase = Phase::PlayerTurn;
            debug!(turn = self.state.turn_count, "player turn begins");
        }

        Ok(Some(self.commit(log_start)))
    }

    /// Flips the phase to VICTORY once the pending victory comes due.
    pub fn complete_victory(&mut self) -> Option<Resolution> {
        if self.state.pending != Some(PendingTransition::Victory) {
            return None;
        }
        let log_start = self.state.combat_log.len();
        self.state.pending = None;
        self.state.phase = Phase::Victory;
        info!(turn = self.state.turn_count, "victory");
        Some(self.commit(log_start))
    }

    /// Updates the UI selection. Only living party members can be selected;
    /// `None` clears the selection. Returns whether anything changed.
    pub fn select_unit(&mut self, unit_id: Option<UnitId>) -> bool {
        if let Some(id) = unit_id {
            let selectable = self
                .state
                .party
                .iter()
                .any(|unit| unit.id == id && unit.is_alive());
            if !selectable {
                return false;
            }
        }
        if self.state.selected_unit_id == unit_id {
            return false;
        }
        self.state.selected_unit_id = unit_id;
        self.state.version += 1;
        true
    }

    /// Victory check, or end of the player turn once everyone has acted.
    pub(super) fn settle_player_resolution(&mut self) {
        if self.state.all_monsters_dead() {
            self.declare_victory();
        } else if self.state.all_living_party_acted() {
            self.end_player_turn();
        }
    }

    fn declare_victory(&mut self) {
        self.state.combat_log.push(VICTORY_LINE);
        self.state.pending = Some(PendingTransition::Victory);
        debug!("victory pending");
    }

    /// PLAYER_TURN → MONSTER_TURN; monster resolution is left pending.
    fn end_player_turn(&mut self) {
        for monster in &mut self.state.monsters {
            monster.has_acted = false;
        }
        self.state.phase = Phase::MonsterTurn;
        self.state.pending = Some(PendingTransition::MonsterTurn);
        debug!(turn = self.state.turn_count, "player turn ended");
    }
}
