use serde::{Deserialize, Serialize};

/// Default weight per prior encounter on a Swiss candidate edge
pub const DEFAULT_REPEAT_PENALTY: i64 = 30;

/// Default largest rank distance allowed between Swiss opponents
pub const DEFAULT_MAX_RANK_DISTANCE: usize = 10;

/// Tunable constants of the pairing engine
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PairingConfig {
    pub swiss: SwissConfig,
    pub random: RandomConfig,
}

impl PairingConfig {
    /// Parse a JSON config; absent keys take their defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid JSON for this structure.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

/// Swiss score-group pairing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwissConfig {
    /// Edge weight cost of each prior meeting
    pub repeat_penalty: i64,
    /// Players further apart than this inside a group are never paired
    pub max_rank_distance: usize,
    /// The bottom group is merged upward while smaller than this
    pub min_group_size: usize,
    /// Give up once the allowed repeat count would exceed this
    pub max_repeat_threshold: u32,
    /// Hard bound on pairing steps
    pub max_iterations: usize,
}

impl Default for SwissConfig {
    fn default() -> Self {
        Self {
            repeat_penalty: DEFAULT_REPEAT_PENALTY,
            max_rank_distance: DEFAULT_MAX_RANK_DISTANCE,
            min_group_size: 6,
            max_repeat_threshold: 16,
            max_iterations: 10_000,
        }
    }
}

/// Random-no-repeat pairing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomConfig {
    /// Random edge weights are drawn from `0..jitter`
    pub jitter: i64,
}

impl Default for RandomConfig {
    fn default() -> Self {
        Self { jitter: 1000 }
    }
}
