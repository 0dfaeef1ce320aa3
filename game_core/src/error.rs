use thiserror::Error;

/// Startup failures. Gameplay itself never returns errors.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("character pool is empty")]
    EmptyPool,

    #[error("character '{glyph}' has no readings")]
    NoReadings { glyph: String },

    #[error("character '{glyph}' has invalid frequency {frequency}")]
    InvalidFrequency { glyph: String, frequency: f64 },

    #[error("character pool has zero total frequency")]
    ZeroTotalWeight,

    #[error("invalid config field `{field}`: {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: &'static str,
    },

    #[error("malformed character data: {0}")]
    CharacterData(#[from] serde_json::Error),
}
