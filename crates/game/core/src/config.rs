/// Battle rules: compile-time bounds plus runtime-tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleConfig {
    /// Experience granted to the victor of an encounter.
    pub victory_exp: u32,
    /// Defense gained by the Defend choice.
    pub defend_bonus: i32,
    /// Health below which AI policies try to recover.
    pub low_health_threshold: i32,
    /// Base seed for the encounter's deterministic RNG.
    pub seed: u64,
}

impl BattleConfig {
    // ===== compile-time constants =====
    pub const MAX_HEALTH: i32 = 100;
    pub const MAX_MANA: i32 = 100;
    pub const BASE_EXP_PER_LEVEL: u64 = 100;
    /// Experience granted alongside kill credit for a lethal basic attack.
    pub const KILL_EXP: u32 = 30;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_VICTORY_EXP: u32 = 30;
    pub const DEFAULT_DEFEND_BONUS: i32 = 5;
    pub const DEFAULT_LOW_HEALTH_THRESHOLD: i32 = 30;

    pub fn new() -> Self {
        Self {
            victory_exp: Self::DEFAULT_VICTORY_EXP,
            defend_bonus: Self::DEFAULT_DEFEND_BONUS,
            low_health_threshold: Self::DEFAULT_LOW_HEALTH_THRESHOLD,
            seed: 0,
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::new()
        }
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}
