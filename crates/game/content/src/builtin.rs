//! Built-in roster shipped with the binary.
//!
//! Mirrors `data/companions.ron` and `data/encounters.ron` so a driver can
//! run without a content directory.

use battle_core::{CombatConfig, CompanionTemplate, MonsterDef, Role, SpecialEffect};

use crate::ContentBundle;

/// Default party composition.
pub const DEFAULT_PARTY: [&str; 3] = ["aria", "borin", "lyra"];

/// Default encounter id.
pub const DEFAULT_ENCOUNTER: &str = "forest";

pub fn bundle() -> ContentBundle {
    ContentBundle {
        companions: companions(),
        encounters: encounters(),
        config: CombatConfig::default(),
    }
}

pub fn companions() -> Vec<(String, CompanionTemplate)> {
    vec![
        (
            "aria".into(),
            CompanionTemplate::builder("Aria", Role::Warrior)
                .max_health(100)
                .icon("sword")
                .color("#e74c3c")
                .ability_name("Sword Slash")
                .ability_damage(15)
                .special("Blade Storm", SpecialEffect::DamageAllEnemies { value: 25 })
                .build(),
        ),
        (
            "borin".into(),
            CompanionTemplate::builder("Borin", Role::Guardian)
                .max_health(130)
                .icon("shield")
                .color("#3498db")
                .ability_name("Shield Wall")
                .ability_shield(12)
                .special("Aegis", SpecialEffect::ShieldAllAllies { value: 20 })
                .build(),
        ),
        (
            "lyra".into(),
            CompanionTemplate::builder("Lyra", Role::Support)
                .max_health(80)
                .icon("sparkle")
                .color("#2ecc71")
                .ability_name("Healing Light")
                .ability_heal(15)
                .special("Sanctuary", SpecialEffect::HealAllAllies { value: 30 })
                .build(),
        ),
        (
            "kai".into(),
            CompanionTemplate::builder("Kai", Role::Warrior)
                .max_health(90)
                .icon("fist")
                .color("#e67e22")
                .ability_name("Quick Jab")
                .ability_damage(10)
                .special(
                    "Flurry",
                    SpecialEffect::MultiHit {
                        value: 12,
                        count: None,
                    },
                )
                .build(),
        ),
        (
            "grom".into(),
            CompanionTemplate::builder("Grom", Role::Guardian)
                .max_health(150)
                .icon("helm")
                .color("#7f8c8d")
                .ability_name("Iron Skin")
                .ability_shield(10)
                .special("Last Stand", SpecialEffect::LastStand { value: 50 })
                .build(),
        ),
        (
            "zara".into(),
            CompanionTemplate::builder("Zara", Role::Warrior)
                .max_health(75)
                .icon("wand")
                .color("#9b59b6")
                .ability_name("Arcane Bolt")
                .ability_damage(18)
                .special("Meteor", SpecialEffect::DamageSingleEnemy { value: 60 })
                .build(),
        ),
    ]
}

pub fn encounters() -> Vec<(String, Vec<MonsterDef>)> {
    vec![
        (
            "forest".into(),
            vec![
                MonsterDef::new("slime", "Slime", 40, 6).with_sprite("slime.png"),
                MonsterDef::new("goblin", "Goblin", 55, 8).with_sprite("goblin.png"),
            ],
        ),
        (
            "cave".into(),
            vec![
                MonsterDef::new("bat", "Cave Bat", 30, 5).with_sprite("bat.png"),
                MonsterDef::new("troll", "Troll", 120, 12)
                    .with_max_shield(20)
                    .with_sprite("troll.png"),
            ],
        ),
        (
            "tower".into(),
            vec![
                MonsterDef::new("imp", "Imp", 35, 6).with_sprite("imp.png"),
                MonsterDef::new("golem", "Stone Golem", 200, 14)
                    .with_max_shield(40)
                    .with_sprite("golem.png"),
                MonsterDef::new("imp", "Imp", 35, 6).with_sprite("imp.png"),
            ],
        ),
    ]
}
