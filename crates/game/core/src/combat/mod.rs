//! Combat arithmetic.
//!
//! Pure helpers that move health and shield around. They know nothing about
//! phases or turn order; the engine decides who is hit and when.
//!
//! - `apply_damage`: shield absorbs first, health floors at 0, death is sticky
//! - `heal`: capped at max health, never revives
//! - `add_shield`: uncapped, skips the dead
//! - `scale`: critical multiplier for basic actions

pub mod damage;

pub use damage::{DamageReport, add_shield, apply_damage, heal, scale};
