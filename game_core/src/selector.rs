use crate::characters::{CharacterId, CharacterPool};
use crate::resources::GameRng;

/// Weighted character picker that never repeats the previous pick
#[derive(Debug, Clone, Default)]
pub struct CharacterSelector {
    last: Option<CharacterId>,
}

impl CharacterSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<CharacterId> {
        self.last
    }

    pub fn reset(&mut self) {
        self.last = None;
    }

    /// Pick the next character.
    ///
    /// Cumulative-weight sampling over every character except the previous
    /// pick. If only the previous pick carries weight, the draw falls back to
    /// a uniform choice among the others; a single-character pool always
    /// yields that character.
    pub fn select(&mut self, pool: &CharacterPool, rng: &mut GameRng) -> CharacterId {
        let picked = self.draw(pool, rng);
        self.last = Some(picked);
        picked
    }

    fn draw(&self, pool: &CharacterPool, rng: &mut GameRng) -> CharacterId {
        if pool.len() == 1 {
            return CharacterId(0);
        }

        let eligible = |id: CharacterId| Some(id) != self.last;
        let total: f64 = pool
            .iter()
            .filter(|(id, _)| eligible(*id))
            .map(|(_, c)| c.frequency)
            .sum();

        if total <= 0.0 {
            let others: Vec<CharacterId> =
                pool.iter().map(|(id, _)| id).filter(|id| eligible(*id)).collect();
            return others[rng.index(others.len())];
        }

        let target = rng.unit() * total;
        let mut cumulative = 0.0;
        let mut fallback = None;
        for (id, c) in pool.iter().filter(|(id, _)| eligible(*id)) {
            if c.frequency <= 0.0 {
                continue;
            }
            cumulative += c.frequency;
            fallback = Some(id);
            if target < cumulative {
                return id;
            }
        }
        // Float rounding can leave `target` a hair above the final sum
        fallback.unwrap_or(CharacterId(0))
    }
}
