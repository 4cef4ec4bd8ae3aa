use core::time::Duration;

/// Combat balance constants and pacing parameters.
///
/// Balance values feed the resolvers directly. The two delays only pace the
/// deferred phase transitions for presentation and can be zero in headless
/// drivers and tests.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Flat damage every living monster deals on the monster turn.
    pub monster_base_damage: u32,
    /// Spirit restored to each living party member when a new player turn starts.
    pub spirit_regen: u32,
    /// Spirit meter size for party members; a full meter readies the special ability.
    pub max_spirit: u32,
    /// Lower bound (inclusive) of the randomized starting spirit.
    pub initial_spirit_min: u32,
    /// Upper bound (inclusive) of the randomized starting spirit.
    pub initial_spirit_max: u32,
    /// Multiplier applied to basic actions flagged as critical.
    pub crit_multiplier: u32,
    /// Hit count for multi-hit specials that do not declare one.
    pub multi_hit_default_count: u32,
    /// Shield granted by the last-stand (heal self) special.
    pub last_stand_shield: u32,
    /// Delay between the end of the player turn and monster resolution.
    pub monster_turn_delay_ms: u64,
    /// Delay between the final blow and the victory phase flip.
    pub victory_delay_ms: u64,
}

impl CombatConfig {
    // ===== balance defaults =====
    pub const DEFAULT_MONSTER_BASE_DAMAGE: u32 = 8;
    pub const DEFAULT_SPIRIT_REGEN: u32 = 35;
    pub const DEFAULT_MAX_SPIRIT: u32 = 100;
    pub const DEFAULT_INITIAL_SPIRIT_MIN: u32 = 25;
    pub const DEFAULT_INITIAL_SPIRIT_MAX: u32 = 50;
    pub const DEFAULT_CRIT_MULTIPLIER: u32 = 2;
    pub const DEFAULT_MULTI_HIT_COUNT: u32 = 3;
    pub const DEFAULT_LAST_STAND_SHIELD: u32 = 9_999;

    // ===== pacing defaults =====
    pub const DEFAULT_MONSTER_TURN_DELAY_MS: u64 = 1_000;
    pub const DEFAULT_VICTORY_DELAY_MS: u64 = 1_000;

    pub fn new() -> Self {
        Self {
            monster_base_damage: Self::DEFAULT_MONSTER_BASE_DAMAGE,
            spirit_regen: Self::DEFAULT_SPIRIT_REGEN,
            max_spirit: Self::DEFAULT_MAX_SPIRIT,
            initial_spirit_min: Self::DEFAULT_INITIAL_SPIRIT_MIN,
            initial_spirit_max: Self::DEFAULT_INITIAL_SPIRIT_MAX,
            crit_multiplier: Self::DEFAULT_CRIT_MULTIPLIER,
            multi_hit_default_count: Self::DEFAULT_MULTI_HIT_COUNT,
            last_stand_shield: Self::DEFAULT_LAST_STAND_SHIELD,
            monster_turn_delay_ms: Self::DEFAULT_MONSTER_TURN_DELAY_MS,
            victory_delay_ms: Self::DEFAULT_VICTORY_DELAY_MS,
        }
    }

    /// Same balance values with both pacing delays set to zero.
    pub fn headless() -> Self {
        Self {
            monster_turn_delay_ms: 0,
            victory_delay_ms: 0,
            ..Self::new()
        }
    }

    pub fn monster_turn_delay(&self) -> Duration {
        Duration::from_millis(self.monster_turn_delay_ms)
    }

    pub fn victory_delay(&self) -> Duration {
        Duration::from_millis(self.victory_delay_ms)
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}
