//! Damage, healing, and shield application.

use crate::state::UnitState;

/// What a single damage application did to its target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageReport {
    /// Portion soaked by the shield.
    pub absorbed: u32,
    /// Portion that reached health.
    pub health_lost: u32,
    /// The hit brought health to 0.
    pub killed: bool,
}

/// Scale a basic action value by the critical multiplier.
pub fn scale(value: u32, is_critical: bool, crit_multiplier: u32) -> u32 {
    if is_critical {
        value.saturating_mul(crit_multiplier)
    } else {
        value
    }
}

/// Apply damage to a unit.
///
/// # Formula
///
/// ```text
/// absorbed = min(shield, damage)
/// shield  -= absorbed
/// health   = max(0, health - (damage - absorbed))
/// ```
///
/// A unit already dead takes nothing.
pub fn apply_damage(unit: &mut UnitState, damage: u32) -> DamageReport {
    if unit.is_dead {
        return DamageReport::default();
    }

    let absorbed = unit.current_shield.min(damage);
    unit.current_shield -= absorbed;

    let remaining = damage - absorbed;
    let health_lost = unit.current_health.min(remaining);
    unit.current_health -= health_lost;

    let killed = unit.current_health == 0;
    if killed {
        unit.is_dead = true;
    }

    DamageReport {
        absorbed,
        health_lost,
        killed,
    }
}

/// Heal a living unit up to its max health. Returns the amount restored.
pub fn heal(unit: &mut UnitState, amount: u32) -> u32 {
    if unit.is_dead {
        return 0;
    }
    let missing = unit.max_health.saturating_sub(unit.current_health);
    let restored = missing.min(amount);
    unit.current_health += restored;
    restored
}

/// Add shield to a living unit. Returns the amount granted.
pub fn add_shield(unit: &mut UnitState, amount: u32) -> u32 {
    if unit.is_dead {
        return 0;
    }
    unit.current_shield = unit.current_shield.saturating_add(amount);
    amount
}
