//! Character reference data
//!
//! Loaded once at startup and never mutated. Readings arrive either as a single
//! string or a list of alternates; both shapes are normalized into a set here so
//! nothing downstream has to care.

use crate::error::GameError;
use serde::Deserialize;
use std::collections::BTreeSet;

const BUILTIN_CHARACTERS: &str = include_str!("../data/characters.json");

/// Index of a character inside its pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CharacterId(pub usize);

/// A glyph with its accepted romanized readings and selection weight
#[derive(Debug, Clone, PartialEq)]
pub struct Character {
    pub glyph: String,
    pub readings: BTreeSet<String>,
    pub frequency: f64,
}

impl Character {
    pub fn new<I, S>(glyph: &str, readings: I, frequency: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let readings = readings
            .into_iter()
            .map(|r| normalize_reading(r.as_ref()))
            .filter(|r| !r.is_empty())
            .collect();
        Self {
            glyph: glyph.to_string(),
            readings,
            frequency,
        }
    }

    /// Whether a normalized typed string is one of this character's readings
    pub fn accepts(&self, typed: &str) -> bool {
        self.readings.contains(typed)
    }

    /// Readings joined for the hint overlay
    pub fn hint_text(&self) -> String {
        self.readings
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Lowercase and trim, the same way typed input is normalized
pub fn normalize_reading(raw: &str) -> String {
    raw.trim().to_lowercase()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawReadings {
    One(String),
    Many(Vec<String>),
}

#[derive(Deserialize)]
struct RawCharacter {
    #[serde(rename = "char")]
    glyph: String,
    jyutping: RawReadings,
    #[serde(default = "default_frequency")]
    frequency: f64,
}

fn default_frequency() -> f64 {
    1.0
}

impl From<RawCharacter> for Character {
    fn from(raw: RawCharacter) -> Self {
        match raw.jyutping {
            RawReadings::One(reading) => Character::new(&raw.glyph, [reading], raw.frequency),
            RawReadings::Many(readings) => Character::new(&raw.glyph, readings, raw.frequency),
        }
    }
}

/// The full, validated set of characters a session draws from
#[derive(Debug, Clone)]
pub struct CharacterPool {
    characters: Vec<Character>,
}

impl CharacterPool {
    pub fn new(characters: Vec<Character>) -> Result<Self, GameError> {
        if characters.is_empty() {
            return Err(GameError::EmptyPool);
        }
        for c in &characters {
            if c.readings.is_empty() {
                return Err(GameError::NoReadings {
                    glyph: c.glyph.clone(),
                });
            }
            if !c.frequency.is_finite() || c.frequency < 0.0 {
                return Err(GameError::InvalidFrequency {
                    glyph: c.glyph.clone(),
                    frequency: c.frequency,
                });
            }
        }
        let pool = Self { characters };
        if pool.total_weight() <= 0.0 {
            return Err(GameError::ZeroTotalWeight);
        }
        Ok(pool)
    }

    /// Parse a JSON array of `{ "char", "jyutping", "frequency" }` records
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let raw: Vec<RawCharacter> = serde_json::from_str(json)?;
        Self::new(raw.into_iter().map(Character::from).collect())
    }

    /// The embedded Cantonese dataset
    pub fn builtin() -> Result<Self, GameError> {
        Self::from_json(BUILTIN_CHARACTERS)
    }

    pub fn get(&self, id: CharacterId) -> Option<&Character> {
        self.characters.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CharacterId, &Character)> {
        self.characters
            .iter()
            .enumerate()
            .map(|(i, c)| (CharacterId(i), c))
    }

    pub fn total_weight(&self) -> f64 {
        self.characters.iter().map(|c| c.frequency).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_readings_normalized_into_set() {
        let c = Character::new("好", [" HOU2 ", "hou3", "hou2"], 1.0);
        assert_eq!(c.readings.len(), 2, "Duplicates collapse after normalization");
        assert!(c.accepts("hou2"));
        assert!(c.accepts("hou3"));
        assert!(!c.accepts("HOU2"), "accepts() expects normalized input");
        assert_eq!(c.hint_text(), "hou2, hou3");
    }

    #[test]
    fn test_from_json_accepts_both_reading_shapes() {
        let json = r#"[
            { "char": "你", "jyutping": "nei5", "frequency": 3 },
            { "char": "行", "jyutping": ["haang4", "hong4"], "frequency": 1 }
        ]"#;
        let pool = CharacterPool::from_json(json).unwrap();
        assert_eq!(pool.len(), 2);
        let walk = pool.get(CharacterId(1)).unwrap();
        assert!(walk.accepts("haang4") && walk.accepts("hong4"));
        assert_eq!(pool.total_weight(), 4.0);
    }

    #[test]
    fn test_missing_frequency_defaults_to_one() {
        let pool = CharacterPool::from_json(r#"[{ "char": "你", "jyutping": "nei5" }]"#).unwrap();
        assert_eq!(pool.get(CharacterId(0)).unwrap().frequency, 1.0);
    }

    #[test]
    fn test_empty_pool_is_fatal() {
        assert!(matches!(
            CharacterPool::from_json("[]"),
            Err(GameError::EmptyPool)
        ));
    }

    #[test]
    fn test_invalid_pools_rejected() {
        let negative = vec![Character::new("你", ["nei5"], -1.0)];
        assert!(matches!(
            CharacterPool::new(negative),
            Err(GameError::InvalidFrequency { .. })
        ));

        let silent = vec![Character::new("你", ["  "], 1.0)];
        assert!(matches!(
            CharacterPool::new(silent),
            Err(GameError::NoReadings { .. })
        ));

        let weightless = vec![
            Character::new("你", ["nei5"], 0.0),
            Character::new("我", ["ngo5"], 0.0),
        ];
        assert!(matches!(
            CharacterPool::new(weightless),
            Err(GameError::ZeroTotalWeight)
        ));
    }

    #[test]
    fn test_malformed_json_is_reported() {
        assert!(matches!(
            CharacterPool::from_json("{ not json"),
            Err(GameError::CharacterData(_))
        ));
    }

    #[test]
    fn test_builtin_pool_loads() {
        let pool = CharacterPool::builtin().unwrap();
        assert!(pool.len() > 10);
        assert!(pool.total_weight() > 0.0);
    }
}
