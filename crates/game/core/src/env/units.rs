//! Companion templates, monster definitions, and the unit oracle interface.
//!
//! Companion templates are static, data-driven descriptions of party members
//! (role, health, abilities). Monster definitions travel with an encounter and
//! are passed to the engine directly when a battle starts.

use strum::{Display, EnumString};

/// Closed set of basic-action roles a companion can fill.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum Role {
    /// Strikes the first living monster.
    Warrior,
    /// Shields a random living ally.
    Guardian,
    /// Heals the most injured living ally.
    Support,
}

/// What a special ability does, by category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum EffectKind {
    Damage,
    Heal,
    Shield,
    MultiHit,
}

/// Who a special ability lands on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum EffectTarget {
    AllEnemies,
    SingleEnemy,
    AllAllies,
    SelfOnly,
    RandomEnemies,
}

/// Effect of a special ability.
///
/// Each variant is one valid `(kind, target)` pairing, so content cannot
/// describe a combination the engine does not know how to resolve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpecialEffect {
    /// Flat damage to every living monster.
    DamageAllEnemies { value: u32 },
    /// Flat damage to the first living monster.
    DamageSingleEnemy { value: u32 },
    /// Heal every living party member, capped at max health.
    HealAllAllies { value: u32 },
    /// Heal the caster and raise its shield to the last-stand value.
    LastStand { value: u32 },
    /// Add shield to every living party member, uncapped.
    ShieldAllAllies { value: u32 },
    /// `count` hits of `value`, each on a random monster still alive at that hit.
    MultiHit {
        value: u32,
        #[cfg_attr(feature = "serde", serde(default))]
        count: Option<u32>,
    },
}

impl SpecialEffect {
    pub const fn kind(&self) -> EffectKind {
        match self {
            SpecialEffect::DamageAllEnemies { .. } | SpecialEffect::DamageSingleEnemy { .. } => {
                EffectKind::Damage
            }
            SpecialEffect::HealAllAllies { .. } | SpecialEffect::LastStand { .. } => {
                EffectKind::Heal
            }
            SpecialEffect::ShieldAllAllies { .. } => EffectKind::Shield,
            SpecialEffect::MultiHit { .. } => EffectKind::MultiHit,
        }
    }

    pub const fn target(&self) -> EffectTarget {
        match self {
            SpecialEffect::DamageAllEnemies { .. } => EffectTarget::AllEnemies,
            SpecialEffect::DamageSingleEnemy { .. } => EffectTarget::SingleEnemy,
            SpecialEffect::HealAllAllies { .. } | SpecialEffect::ShieldAllAllies { .. } => {
                EffectTarget::AllAllies
            }
            SpecialEffect::LastStand { .. } => EffectTarget::SelfOnly,
            SpecialEffect::MultiHit { .. } => EffectTarget::RandomEnemies,
        }
    }

    pub const fn value(&self) -> u32 {
        match *self {
            SpecialEffect::DamageAllEnemies { value }
            | SpecialEffect::DamageSingleEnemy { value }
            | SpecialEffect::HealAllAllies { value }
            | SpecialEffect::LastStand { value }
            | SpecialEffect::ShieldAllAllies { value }
            | SpecialEffect::MultiHit { value, .. } => value,
        }
    }
}

/// Named special ability attached to a companion.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpecialAbility {
    pub name: String,
    pub effect: SpecialEffect,
}

impl SpecialAbility {
    pub fn new(name: impl Into<String>, effect: SpecialEffect) -> Self {
        Self {
            name: name.into(),
            effect,
        }
    }
}

/// Static description of a companion, looked up by template id.
///
/// Only the stat matching `role` is used by the basic action; the others are
/// carried so content can describe hybrid companions for the presentation
/// layer.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompanionTemplate {
    pub name: String,
    pub role: Role,
    pub max_health: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub icon: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub color: String,
    pub ability_name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub ability_damage: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub ability_shield: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub ability_heal: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub special_ability: Option<SpecialAbility>,
}

impl CompanionTemplate {
    /// Create a builder for constructing companion templates.
    pub fn builder(name: impl Into<String>, role: Role) -> CompanionTemplateBuilder {
        CompanionTemplateBuilder::new(name, role)
    }
}

/// Builder for constructing companion templates.
pub struct CompanionTemplateBuilder {
    template: CompanionTemplate,
}

impl CompanionTemplateBuilder {
    fn new(name: impl Into<String>, role: Role) -> Self {
        let name = name.into();
        Self {
            template: CompanionTemplate {
                ability_name: format!("{} Strike", name),
                name,
                role,
                max_health: 100,
                icon: String::new(),
                color: String::new(),
                ability_damage: 0,
                ability_shield: 0,
                ability_heal: 0,
                special_ability: None,
            },
        }
    }

    pub fn max_health(mut self, max_health: u32) -> Self {
        self.template.max_health = max_health;
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.template.icon = icon.into();
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.template.color = color.into();
        self
    }

    pub fn ability_name(mut self, ability_name: impl Into<String>) -> Self {
        self.template.ability_name = ability_name.into();
        self
    }

    pub fn ability_damage(mut self, damage: u32) -> Self {
        self.template.ability_damage = damage;
        self
    }

    pub fn ability_shield(mut self, shield: u32) -> Self {
        self.template.ability_shield = shield;
        self
    }

    pub fn ability_heal(mut self, heal: u32) -> Self {
        self.template.ability_heal = heal;
        self
    }

    pub fn special(mut self, name: impl Into<String>, effect: SpecialEffect) -> Self {
        self.template.special_ability = Some(SpecialAbility::new(name, effect));
        self
    }

    pub fn build(self) -> CompanionTemplate {
        self.template
    }
}

/// Monster entry of an encounter.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterDef {
    pub template_id: String,
    pub name: String,
    pub max_health: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_shield: Option<u32>,
    pub attack: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub sprite: Option<String>,
}

impl MonsterDef {
    pub fn new(
        template_id: impl Into<String>,
        name: impl Into<String>,
        max_health: u32,
        attack: u32,
    ) -> Self {
        Self {
            template_id: template_id.into(),
            name: name.into(),
            max_health,
            max_shield: None,
            attack,
            sprite: None,
        }
    }

    pub fn with_max_shield(mut self, max_shield: u32) -> Self {
        self.max_shield = Some(max_shield);
        self
    }

    pub fn with_sprite(mut self, sprite: impl Into<String>) -> Self {
        self.sprite = Some(sprite.into());
        self
    }
}

/// Oracle providing companion templates by id.
///
/// Runtime systems implement this on top of loaded content.
pub trait UnitOracle: Send + Sync {
    /// Returns the companion template for a given template id, if any.
    fn companion(&self, template_id: &str) -> Option<CompanionTemplate>;

    /// Returns every known template id.
    fn all_ids(&self) -> Vec<String> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effect_variants_map_to_kind_and_target() {
        let multi = SpecialEffect::MultiHit {
            value: 12,
            count: None,
        };
        assert_eq!(multi.kind(), EffectKind::MultiHit);
        assert_eq!(multi.target(), EffectTarget::RandomEnemies);
        assert_eq!(multi.value(), 12);

        let last_stand = SpecialEffect::LastStand { value: 40 };
        assert_eq!(last_stand.kind(), EffectKind::Heal);
        assert_eq!(last_stand.target(), EffectTarget::SelfOnly);
    }

    #[test]
    fn role_parses_from_content_strings() {
        assert_eq!("WARRIOR".parse::<Role>().ok(), Some(Role::Warrior));
        assert_eq!(Role::Guardian.to_string(), "GUARDIAN");
        assert!("BARD".parse::<Role>().is_err());
    }

    #[test]
    fn builder_fills_defaults() {
        let template = CompanionTemplate::builder("Mira", Role::Support)
            .ability_heal(15)
            .build();
        assert_eq!(template.max_health, 100);
        assert_eq!(template.ability_heal, 15);
        assert_eq!(template.ability_name, "Mira Strike");
        assert!(template.special_ability.is_none());
    }
}
