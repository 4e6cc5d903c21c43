/// Gameplay tuning constants and runtime-adjustable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// Total strikes delivered by one multi-strike action, across however
    /// many targets it ends up hitting.
    pub strike_count: u8,

    /// Period between strike ticks, in milliseconds.
    pub strike_interval_ms: u64,

    /// Maximum targeting range in world units.
    pub max_range: f32,

    /// Dot-product threshold for cheap cone reacquisition checks.
    /// 0.9 is roughly a 25 degree cone.
    pub cone_dot_threshold: f32,

    /// Explicit cone half-angle (radians) for initial, line-of-sight
    /// validated acquisition.
    pub acquisition_cone_radians: f32,

    /// Damage applied per strike, bypassing armor.
    pub strike_damage: f32,

    /// Uses of a single ability after which it counts as mastered.
    pub mastery_threshold: u32,
}

impl GameConfig {
    // ===== defaults =====
    pub const DEFAULT_STRIKE_COUNT: u8 = 3;
    pub const DEFAULT_STRIKE_INTERVAL_MS: u64 = 500;
    pub const DEFAULT_MAX_RANGE: f32 = 50.0;
    pub const DEFAULT_CONE_DOT_THRESHOLD: f32 = 0.9;
    pub const DEFAULT_ACQUISITION_CONE_RADIANS: f32 = 0.45;
    pub const DEFAULT_STRIKE_DAMAGE: f32 = 4.0;
    pub const DEFAULT_MASTERY_THRESHOLD: u32 = 10;

    pub fn new() -> Self {
        Self {
            strike_count: Self::DEFAULT_STRIKE_COUNT,
            strike_interval_ms: Self::DEFAULT_STRIKE_INTERVAL_MS,
            max_range: Self::DEFAULT_MAX_RANGE,
            cone_dot_threshold: Self::DEFAULT_CONE_DOT_THRESHOLD,
            acquisition_cone_radians: Self::DEFAULT_ACQUISITION_CONE_RADIANS,
            strike_damage: Self::DEFAULT_STRIKE_DAMAGE,
            mastery_threshold: Self::DEFAULT_MASTERY_THRESHOLD,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
