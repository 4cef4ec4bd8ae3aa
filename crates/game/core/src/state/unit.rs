use std::fmt;

use crate::env::{CompanionTemplate, MonsterDef, Role};

/// Unique identifier for a unit within one battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitId(pub u32);

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which side of the battlefield a unit fights for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Party,
    Monster,
}

/// Mutable combat state of a party member or monster.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitState {
    pub id: UnitId,
    pub template_id: String,
    pub side: Side,
    pub name: String,
    /// Party members only.
    pub role: Option<Role>,

    pub current_health: u32,
    pub max_health: u32,
    pub current_shield: u32,
    /// Informational cap from the monster definition; shield still starts at 0.
    pub max_shield: Option<u32>,

    pub is_dead: bool,
    pub has_acted: bool,

    pub current_spirit: u32,
    pub max_spirit: u32,

    /// Monster attack stat; the flat monster policy does not read it.
    pub attack: u32,
    pub sprite: Option<String>,
}

impl UnitState {
    /// Spawns a party member at full health with the given starting spirit.
    pub fn companion(
        id: UnitId,
        template_id: impl Into<String>,
        template: &CompanionTemplate,
        spirit: u32,
        max_spirit: u32,
    ) -> Self {
        Self {
            id,
            template_id: template_id.into(),
            side: Side::Party,
            name: template.name.clone(),
            role: Some(template.role),
            current_health: template.max_health,
            max_health: template.max_health,
            current_shield: 0,
            max_shield: None,
            is_dead: template.max_health == 0,
            has_acted: false,
            current_spirit: spirit.min(max_spirit),
            max_spirit,
            attack: 0,
            sprite: None,
        }
    }

    /// Spawns a monster at full health with no shield.
    pub fn monster(id: UnitId, def: &MonsterDef) -> Self {
        Self {
            id,
            template_id: def.template_id.clone(),
            side: Side::Monster,
            name: def.name.clone(),
            role: None,
            current_health: def.max_health,
            max_health: def.max_health,
            current_shield: 0,
            max_shield: def.max_shield,
            is_dead: def.max_health == 0,
            has_acted: false,
            current_spirit: 0,
            max_spirit: 0,
            attack: def.attack,
            sprite: def.sprite.clone(),
        }
    }

    pub fn is_player(&self) -> bool {
        self.side == Side::Party
    }

    pub fn is_alive(&self) -> bool {
        !self.is_dead
    }

    /// Alive and has not used its action this turn.
    pub fn can_act(&self) -> bool {
        self.is_alive() && !self.has_acted
    }

    /// Special ability is charged.
    pub fn is_special_ready(&self) -> bool {
        self.is_alive() && self.max_spirit > 0 && self.current_spirit >= self.max_spirit
    }

    pub fn health_ratio(&self) -> f32 {
        if self.max_health == 0 {
            return 0.0;
        }
        self.current_health as f32 / self.max_health as f32
    }
}
