//! End-to-end battle flows through `CombatSession` on a virtual clock.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use battle_core::{
    ActionOptions, ActionRejected, BattleOutcome, CombatConfig, CombatEngine, CombatEnv,
    CombatSession, CombatState, CompanionTemplate, Env, InitializationError, MonsterDef, PcgRng,
    PendingTransition, Phase, RngOracle, Role, SpecialEffect, UnitId, UnitOracle,
};

/// Always returns the same raw value, so every pick lands on the first
/// candidate and every range on its minimum.
struct FixedRng(u32);

impl RngOracle for FixedRng {
    fn next_u32(&self, _seed: u64) -> u32 {
        self.0
    }
}

struct Catalog(HashMap<String, CompanionTemplate>);

impl UnitOracle for Catalog {
    fn companion(&self, template_id: &str) -> Option<CompanionTemplate> {
        self.0.get(template_id).cloned()
    }

    fn all_ids(&self) -> Vec<String> {
        self.0.keys().cloned().collect()
    }
}

fn catalog() -> Catalog {
    let entries = [
        (
            "warrior",
            CompanionTemplate::builder("Bram", Role::Warrior)
                .ability_name("Cleave")
                .ability_damage(50)
                .build(),
        ),
        (
            "guardian",
            CompanionTemplate::builder("Tova", Role::Guardian)
                .ability_name("Bulwark")
                .ability_shield(50)
                .build(),
        ),
        (
            "support",
            CompanionTemplate::builder("Mira", Role::Support)
                .ability_name("Mend")
                .ability_heal(20)
                .build(),
        ),
        (
            "fragile",
            CompanionTemplate::builder("Pip", Role::Warrior)
                .max_health(5)
                .ability_damage(1)
                .build(),
        ),
        (
            "mage",
            CompanionTemplate::builder("Ilse", Role::Warrior)
                .ability_damage(5)
                .special("Meteor", SpecialEffect::DamageAllEnemies { value: 30 })
                .build(),
        ),
        (
            "twin",
            CompanionTemplate::builder("Kael", Role::Warrior)
                .ability_damage(5)
                .special("Flurry", SpecialEffect::MultiHit { value: 10, count: None })
                .build(),
        ),
        (
            "sentinel",
            CompanionTemplate::builder("Oren", Role::Guardian)
                .max_health(100)
                .special("Last Stand", SpecialEffect::LastStand { value: 40 })
                .build(),
        ),
        (
            "sniper",
            CompanionTemplate::builder("Vesk", Role::Warrior)
                .special("Piercing Shot", SpecialEffect::DamageSingleEnemy { value: 40 })
                .build(),
        ),
        (
            "cleric",
            CompanionTemplate::builder("Aldis", Role::Support)
                .special("Prayer", SpecialEffect::HealAllAllies { value: 30 })
                .build(),
        ),
        (
            "warden",
            CompanionTemplate::builder("Hale", Role::Guardian)
                .special("Rampart", SpecialEffect::ShieldAllAllies { value: 20 })
                .build(),
        ),
    ];
    Catalog(
        entries
            .into_iter()
            .map(|(id, template)| (id.to_string(), template))
            .collect(),
    )
}

fn session() -> CombatSession {
    session_with(CombatConfig::headless(), Arc::new(FixedRng(0)))
}

fn session_with(config: CombatConfig, rng: Arc<dyn RngOracle>) -> CombatSession {
    CombatSession::new(config, Arc::new(catalog()), rng, 42)
}

fn monster(name: &str, health: u32) -> MonsterDef {
    MonsterDef::new(name.to_lowercase(), name, health, 4)
}

#[test]
fn initialization_builds_fresh_battle() {
    let mut session = session();
    let resolution = session
        .initialize_combat(&["warrior", "support"], &[monster("Slime", 40).with_max_shield(15)])
        .unwrap();

    let state = session.state();
    assert_eq!(state.phase, Phase::PlayerTurn);
    assert_eq!(state.turn_count, 1);
    assert_eq!(state.combat_log.entries(), &["Combat Started!".to_string()]);
    assert_eq!(resolution.log_entries, vec!["Combat Started!".to_string()]);
    assert_eq!(resolution.follow_up, None);

    assert_eq!(state.party[0].id, UnitId(0));
    assert_eq!(state.party[1].id, UnitId(1));
    assert_eq!(state.monsters[0].id, UnitId(2));
    for unit in &state.party {
        assert_eq!(unit.current_health, unit.max_health);
        assert_eq!(unit.current_shield, 0);
        assert!((25..=50).contains(&unit.current_spirit));
        assert!(!unit.has_acted);
    }
    assert_eq!(state.monsters[0].current_shield, 0);
    assert_eq!(state.monsters[0].current_spirit, 0);
}

#[test]
fn starting_spirit_stays_in_band_with_real_rng() {
    let mut session = session_with(CombatConfig::headless(), Arc::new(PcgRng));
    for _ in 0..20 {
        session
            .initialize_combat(&["warrior", "guardian", "support"], &[monster("Slime", 40)])
            .unwrap();
        assert!(
            session
                .state()
                .party
                .iter()
                .all(|unit| (25..=50).contains(&unit.current_spirit))
        );
    }
}

#[test]
fn unknown_template_fails_and_keeps_previous_battle() {
    let mut session = session();
    session
        .initialize_combat(&["warrior"], &[monster("Slime", 40)])
        .unwrap();
    let before = session.snapshot();

    let err = session
        .initialize_combat(&["warrior", "ghost"], &[monster("Slime", 40)])
        .unwrap_err();

    assert_eq!(
        err,
        InitializationError::UnknownTemplate {
            template_id: "ghost".into(),
            slot: 1,
        }
    );
    assert_eq!(*session.state(), *before);
}

#[test]
fn warrior_kill_schedules_victory() {
    let mut session = session();
    session
        .initialize_combat(&["warrior", "support"], &[monster("Slime", 50)])
        .unwrap();

    let resolution = session
        .perform_action(UnitId(0), ActionOptions::default())
        .unwrap();

    assert_eq!(resolution.follow_up, Some(PendingTransition::Victory));
    assert_eq!(
        resolution.log_entries.last().map(String::as_str),
        Some("Victory! All monsters defeated!")
    );
    assert_eq!(session.state().phase, Phase::PlayerTurn);
    assert!(session.state().monsters[0].is_dead);

    // Input stays closed until the flip.
    assert_eq!(
        session.perform_action(UnitId(1), ActionOptions::default()),
        Err(ActionRejected::TransitionPending)
    );

    session.run_pending().unwrap();
    assert_eq!(session.state().phase, Phase::Victory);
    assert_eq!(session.state().outcome(), Some(BattleOutcome::Victory));
    assert_eq!(
        session.perform_action(UnitId(1), ActionOptions::default()),
        Err(ActionRejected::NotPlayerTurn {
            phase: Phase::Victory
        })
    );
}

#[test]
fn fragile_party_is_defeated() {
    let mut session = session();
    session
        .initialize_combat(&["fragile"], &[monster("Ogre", 100)])
        .unwrap();

    let resolution = session
        .perform_action(UnitId(0), ActionOptions::default())
        .unwrap();
    assert_eq!(resolution.follow_up, Some(PendingTransition::MonsterTurn));
    assert_eq!(session.state().phase, Phase::MonsterTurn);

    let fired = session.run_pending().unwrap();
    assert_eq!(fired.len(), 1);

    let state = session.state();
    assert_eq!(state.phase, Phase::Defeat);
    assert_eq!(state.party[0].current_health, 0);
    assert!(state.party[0].is_dead);
    assert_eq!(state.combat_log.last(), Some("Your party has been defeated!"));
}

#[test]
fn shield_absorbs_monster_damage() {
    let mut session = session();
    session
        .initialize_combat(&["guardian"], &[monster("Ogre", 100)])
        .unwrap();

    session
        .perform_action(UnitId(0), ActionOptions::default())
        .unwrap();
    assert_eq!(session.state().party[0].current_shield, 50);

    session.run_pending().unwrap();
    let guardian = &session.state().party[0];
    assert_eq!(guardian.current_shield, 42);
    assert_eq!(guardian.current_health, guardian.max_health);
}

#[test]
fn acting_twice_changes_nothing() {
    let mut session = session();
    session
        .initialize_combat(&["warrior", "support"], &[monster("Ogre", 200)])
        .unwrap();
    session
        .perform_action(UnitId(0), ActionOptions::default())
        .unwrap();

    let before = session.snapshot();
    assert_eq!(
        session.perform_action(UnitId(0), ActionOptions::critical()),
        Err(ActionRejected::AlreadyActed(UnitId(0)))
    );
    assert_eq!(
        session.resolve_special_attack(UnitId(0), true),
        Err(ActionRejected::AlreadyActed(UnitId(0)))
    );
    assert_eq!(
        session.perform_action(UnitId(9), ActionOptions::default()),
        Err(ActionRejected::UnitNotFound(UnitId(9)))
    );
    assert_eq!(
        session.perform_action(UnitId(2), ActionOptions::default()),
        Err(ActionRejected::UnitNotFound(UnitId(2)))
    );
    assert_eq!(*session.state(), *before);
}

#[test]
fn monster_turn_starts_after_every_living_member_acted() {
    let mut session = session();
    session
        .initialize_combat(&["warrior", "guardian", "support"], &[monster("Ogre", 500)])
        .unwrap();

    session
        .perform_action(UnitId(0), ActionOptions::default())
        .unwrap();
    let second = session
        .perform_action(UnitId(1), ActionOptions::default())
        .unwrap();
    assert_eq!(second.follow_up, None);
    assert_eq!(session.state().phase, Phase::PlayerTurn);

    let third = session
        .perform_action(UnitId(2), ActionOptions::default())
        .unwrap();
    assert_eq!(third.follow_up, Some(PendingTransition::MonsterTurn));
    assert_eq!(session.state().phase, Phase::MonsterTurn);
    assert!(session.state().monsters.iter().all(|m| !m.has_acted));

    session.run_pending().unwrap();
    let state = session.state();
    assert_eq!(state.phase, Phase::PlayerTurn);
    assert_eq!(state.turn_count, 2);
    assert!(state.party.iter().all(|unit| !unit.has_acted));
    // FixedRng starts everyone at the band minimum.
    assert!(state.party.iter().all(|unit| unit.current_spirit == 60));
}

#[test]
fn dead_members_stay_dead_and_are_skipped() {
    let mut session = session();
    session
        .initialize_combat(&["fragile", "support"], &[monster("Ogre", 500)])
        .unwrap();
    session
        .perform_action(UnitId(0), ActionOptions::default())
        .unwrap();
    session
        .perform_action(UnitId(1), ActionOptions::default())
        .unwrap();
    session.run_pending().unwrap();

    let spirit_at_death = session.state().party[0].current_spirit;
    assert!(session.state().party[0].is_dead);
    assert_eq!(session.state().phase, Phase::PlayerTurn);

    assert_eq!(
        session.perform_action(UnitId(0), ActionOptions::default()),
        Err(ActionRejected::UnitDefeated(UnitId(0)))
    );

    // Support finds nobody to heal; the fallen member is not a candidate.
    let resolution = session
        .perform_action(UnitId(1), ActionOptions::default())
        .unwrap();
    assert_eq!(resolution.follow_up, Some(PendingTransition::MonsterTurn));
    session.run_pending().unwrap();

    let state = session.state();
    assert!(state.party[0].is_dead);
    assert_eq!(state.party[0].current_health, 0);
    assert_eq!(state.party[0].current_spirit, spirit_at_death);
    assert_eq!(state.party[1].current_health, 100 - 8);
}

#[test]
fn critical_action_doubles_and_is_announced() {
    let mut session = session();
    session
        .initialize_combat(&["warrior", "support"], &[monster("Ogre", 200)])
        .unwrap();

    let resolution = session
        .perform_action(UnitId(0), ActionOptions::critical())
        .unwrap();

    assert_eq!(session.state().monsters[0].current_health, 100);
    assert!(resolution.log_entries[0].starts_with("CRITICAL! "));
}

#[test]
fn special_spends_charge_on_any_verdict() {
    for success in [true, false] {
        let mut session = session();
        session
            .initialize_combat(&["mage", "support"], &[monster("Ogre", 200)])
            .unwrap();

        let resolution = session.resolve_special_attack(UnitId(0), success).unwrap();

        let mage = &session.state().party[0];
        assert_eq!(mage.current_spirit, 0);
        assert!(mage.has_acted);
        if success {
            assert_eq!(session.state().monsters[0].current_health, 170);
        } else {
            assert_eq!(session.state().monsters[0].current_health, 200);
            assert_eq!(
                resolution.log_entries,
                vec!["Ilse's Meteor FAILED! Charge lost.".to_string()]
            );
        }
    }
}

#[test]
fn multi_hit_redraws_among_survivors() {
    let mut session = session();
    session
        .initialize_combat(&["twin", "support"], &[monster("Imp", 10), monster("Ogre", 100)])
        .unwrap();

    session.resolve_special_attack(UnitId(0), true).unwrap();

    let monsters = &session.state().monsters;
    assert!(monsters[0].is_dead);
    assert_eq!(monsters[0].current_health, 0);
    assert_eq!(monsters[1].current_health, 80);
}

#[test]
fn last_stand_heals_and_fortifies_caster() {
    let mut session = session();
    session
        .initialize_combat(&["sentinel", "support"], &[monster("Ogre", 100)])
        .unwrap();

    session.resolve_special_attack(UnitId(0), true).unwrap();

    let sentinel = &session.state().party[0];
    assert_eq!(sentinel.current_health, 100);
    assert_eq!(sentinel.current_shield, CombatConfig::DEFAULT_LAST_STAND_SHIELD);
}

#[test]
fn empty_rosters_settle_immediately() {
    let mut session = session();
    let resolution = session
        .initialize_combat(&["warrior"], &[] as &[MonsterDef])
        .unwrap();
    assert_eq!(resolution.follow_up, Some(PendingTransition::Victory));
    session.run_pending().unwrap();
    assert_eq!(session.state().phase, Phase::Victory);

    let empty: [&str; 0] = [];
    let resolution = session
        .initialize_combat(&empty, &[monster("Ogre", 100)])
        .unwrap();
    assert_eq!(resolution.follow_up, Some(PendingTransition::MonsterTurn));
    session.run_pending().unwrap();
    assert_eq!(session.state().phase, Phase::Defeat);
}

#[test]
fn reinitializing_drops_stale_transitions() {
    let mut session = session();
    session
        .initialize_combat(&["warrior"], &[monster("Slime", 50)])
        .unwrap();
    session
        .perform_action(UnitId(0), ActionOptions::default())
        .unwrap();
    assert!(session.has_pending());

    session
        .initialize_combat(&["warrior"], &[monster("Ogre", 500)])
        .unwrap();
    assert!(!session.has_pending());
    assert!(session.run_pending().unwrap().is_empty());
    assert_eq!(session.state().phase, Phase::PlayerTurn);
}

#[test]
fn transitions_wait_for_their_delay() {
    let mut session = session_with(CombatConfig::default(), Arc::new(FixedRng(0)));
    session
        .initialize_combat(&["warrior"], &[monster("Ogre", 500)])
        .unwrap();
    session
        .perform_action(UnitId(0), ActionOptions::default())
        .unwrap();

    assert_eq!(session.next_due(), Some(Duration::from_millis(1000)));
    assert!(session.advance(Duration::from_millis(600)).unwrap().is_empty());
    assert_eq!(session.state().phase, Phase::MonsterTurn);

    let fired = session.advance(Duration::from_millis(400)).unwrap();
    assert_eq!(fired.len(), 1);
    assert_eq!(session.state().phase, Phase::PlayerTurn);
    assert_eq!(session.next_due(), None);
}

#[test]
fn snapshots_are_never_torn() {
    let mut session = session();
    session
        .initialize_combat(&["warrior", "support"], &[monster("Ogre", 200)])
        .unwrap();
    let before = session.snapshot();

    session
        .perform_action(UnitId(0), ActionOptions::default())
        .unwrap();

    assert_eq!(before.monsters[0].current_health, 200);
    assert!(!before.party[0].has_acted);
    assert_eq!(session.state().version, before.version + 1);
}

#[test]
fn selection_only_accepts_living_party_members() {
    let mut session = session();
    session
        .initialize_combat(&["warrior", "support"], &[monster("Ogre", 200)])
        .unwrap();

    assert!(session.select_unit(Some(UnitId(1))));
    assert_eq!(session.state().selected_unit_id, Some(UnitId(1)));
    assert!(!session.select_unit(Some(UnitId(2))));
    assert!(!session.select_unit(Some(UnitId(1))));
    assert_eq!(session.state().selected_unit_id, Some(UnitId(1)));
    assert!(session.select_unit(None));
    assert_eq!(session.state().selected_unit_id, None);
}

#[test]
fn same_seed_replays_same_battle() {
    let play = || {
        let mut session = session_with(CombatConfig::headless(), Arc::new(PcgRng));
        session
            .initialize_combat(&["warrior", "guardian", "support"], &[monster("Ogre", 300), monster("Imp", 60)])
            .unwrap();
        for _ in 0..3 {
            for id in 0..3 {
                let _ = session.perform_action(UnitId(id), ActionOptions::default());
            }
            session.run_pending().unwrap();
        }
        session.snapshot()
    };

    assert_eq!(*play(), *play());
}

#[test]
fn support_heals_most_wounded_first_in_order() {
    let catalog = catalog();
    let rng = FixedRng(0);
    let env: CombatEnv<'_> = Env::with_all(&catalog as &dyn UnitOracle, &rng as &dyn RngOracle);
    let config = CombatConfig::headless();
    let mut state = CombatState::default();
    let mut engine = CombatEngine::new(&mut state, &config);
    engine
        .initialize_combat(env, &["warrior", "guardian", "support"], &[monster("Ogre", 200)], 1)
        .unwrap();
    drop(engine);

    state.party[0].current_health = 60;
    state.party[1].current_health = 60;

    let mut engine = CombatEngine::new(&mut state, &config);
    engine
        .perform_action(env, UnitId(2), ActionOptions::default())
        .unwrap();

    assert_eq!(state.party[0].current_health, 80);
    assert_eq!(state.party[1].current_health, 60);
}

/// Builds a battle directly on the engine so tests can reshape it before acting.
fn engine_battle(party: &[&str], monsters: &[MonsterDef]) -> CombatState {
    let catalog = catalog();
    let rng = FixedRng(0);
    let env: CombatEnv<'_> = Env::with_all(&catalog as &dyn UnitOracle, &rng as &dyn RngOracle);
    let config = CombatConfig::headless();
    let mut state = CombatState::default();
    CombatEngine::new(&mut state, &config)
        .initialize_combat(env, party, monsters, 1)
        .unwrap();
    state
}

fn fall(state: &mut CombatState, index: usize) {
    state.party[index].current_health = 0;
    state.party[index].is_dead = true;
}

fn cast_special(state: &mut CombatState, unit: UnitId) -> Vec<String> {
    let catalog = catalog();
    let rng = FixedRng(0);
    let env: CombatEnv<'_> = Env::with_all(&catalog as &dyn UnitOracle, &rng as &dyn RngOracle);
    let config = CombatConfig::headless();
    CombatEngine::new(state, &config)
        .resolve_special_attack(env, unit, true)
        .unwrap()
        .log_entries
}

#[test]
fn single_enemy_special_hits_first_living_monster() {
    let mut state = engine_battle(&["sniper", "support"], &[monster("Imp", 10), monster("Ogre", 100)]);
    state.monsters[0].current_health = 0;
    state.monsters[0].is_dead = true;

    let log = cast_special(&mut state, UnitId(0));

    assert_eq!(
        log,
        vec![
            "Vesk unleashes Piercing Shot!".to_string(),
            "Ogre takes 40 damage!".to_string(),
        ]
    );
    assert_eq!(state.monsters[0].current_health, 0);
    assert_eq!(state.monsters[1].current_health, 60);
}

#[test]
fn heal_all_is_capped_and_skips_the_fallen() {
    let mut state = engine_battle(&["cleric", "warrior", "support"], &[monster("Ogre", 100)]);
    fall(&mut state, 1);
    state.party[0].current_health = 50;
    state.party[2].current_health = 90;

    let log = cast_special(&mut state, UnitId(0));

    assert_eq!(log.last().map(String::as_str), Some("The party recovers 30 health!"));
    assert_eq!(state.party[0].current_health, 80);
    assert_eq!(state.party[2].current_health, state.party[2].max_health);
    assert!(state.party[1].is_dead);
    assert_eq!(state.party[1].current_health, 0);
}

#[test]
fn shield_all_skips_the_fallen() {
    let mut state = engine_battle(&["warden", "warrior", "support"], &[monster("Ogre", 100)]);
    fall(&mut state, 1);
    state.party[2].current_shield = 15;

    cast_special(&mut state, UnitId(0));

    assert_eq!(state.party[0].current_shield, 20);
    assert_eq!(state.party[1].current_shield, 0);
    assert_eq!(state.party[2].current_shield, 35);
}

#[test]
fn guardian_never_shields_a_fallen_ally() {
    let catalog = catalog();
    let config = CombatConfig::headless();

    for raw in 0..6 {
        let mut state = engine_battle(&["fragile", "guardian", "support"], &[monster("Ogre", 100)]);
        fall(&mut state, 0);

        let rng = FixedRng(raw);
        let env: CombatEnv<'_> =
            Env::with_all(&catalog as &dyn UnitOracle, &rng as &dyn RngOracle);
        CombatEngine::new(&mut state, &config)
            .perform_action(env, UnitId(1), ActionOptions::default())
            .unwrap();

        assert_eq!(state.party[0].current_shield, 0, "raw draw {raw}");
        let granted: u32 = state.party[1..].iter().map(|unit| unit.current_shield).sum();
        assert_eq!(granted, 50, "raw draw {raw}");
    }
}
