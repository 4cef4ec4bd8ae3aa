//! Enemy decision policies.
//!
//! Two independent policies exist for two battle modes:
//!
//! - **Party battles** ([`party`]): every living monster attacks a random
//!   living party member for the flat base damage. This is a placeholder
//!   policy with no health-based strategy.
//! - **Mission duels** ([`mission`]): a single enemy decides between attacking
//!   and defending from its own health ratio.
//!
//! Both are stateless: a decision depends only on the snapshot and seed
//! passed in.

pub mod mission;
pub mod party;

pub use mission::{DEFEND_THRESHOLD, EnemyAction, MissionCombatant, decide_enemy_action};
pub use party::{MonsterAttack, plan_monster_attack};
