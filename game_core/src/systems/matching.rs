use glam::Vec2;
use hecs::World;

use crate::characters::{normalize_reading, CharacterPool};
use crate::components::{Ball, PowerUp};
use crate::config::Config;
use crate::resources::{Events, Modifiers, Session, SoundCue, Time};
use crate::stats::SessionStats;
use crate::systems::{activate_powerup, balls_in_spawn_order};

/// Result of resolving one submitted line of text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    /// A ball was burst
    Hit {
        glyph: String,
        reading: String,
        powerup: Option<PowerUp>,
        points: u64,
    },
    /// No falling ball accepts the reading
    Miss,
    /// Blank input, or no session in progress
    Ignored,
}

impl MatchOutcome {
    pub fn is_hit(&self) -> bool {
        matches!(self, MatchOutcome::Hit { .. })
    }
}

/// Mutable session state a hit touches
pub struct HitContext<'a> {
    pub time: &'a Time,
    pub config: &'a Config,
    pub session: &'a mut Session,
    pub modifiers: &'a mut Modifiers,
    pub stats: &'a mut SessionStats,
    pub events: &'a mut Events,
}

impl HitContext<'_> {
    /// Power-up first, so a green ball already scores with its own bonus
    fn apply(&mut self, powerup: Option<PowerUp>) -> u64 {
        if let Some(kind) = powerup {
            activate_powerup(kind, self.time.now, self.config, self.session, self.modifiers);
        }
        let points = self
            .config
            .score_increment
            .saturating_mul(self.modifiers.multiplier as u64);
        self.session.award(points);
        self.stats
            .observe(self.session.lives, self.modifiers.multiplier);
        self.events.sounds.push(SoundCue::for_burst(powerup));
        points
    }
}

/// Burst the earliest-spawned falling ball whose character accepts `typed`
pub fn resolve_typed(
    world: &mut World,
    pool: &CharacterPool,
    typed: &str,
    ctx: &mut HitContext<'_>,
) -> MatchOutcome {
    let reading = normalize_reading(typed);
    if reading.is_empty() {
        return MatchOutcome::Ignored;
    }

    for entity in balls_in_spawn_order(world) {
        let Ok(mut ball) = world.get::<&mut Ball>(entity) else {
            continue;
        };
        if ball.is_bursting() {
            continue;
        }
        let Some(character) = pool.get(ball.character) else {
            continue;
        };
        if !character.accepts(&reading) {
            continue;
        }

        ball.trigger_burst();
        let powerup = ball.powerup;
        let points = ctx.apply(powerup);
        ctx.stats.record_match(&reading, powerup);
        return MatchOutcome::Hit {
            glyph: character.glyph.clone(),
            reading,
            powerup,
            points,
        };
    }

    ctx.events.invalid_input = true;
    MatchOutcome::Miss
}

/// Burst every falling ball under `point` while click-to-burst is active,
/// newest first. Returns the number of balls burst.
pub fn resolve_pointer(world: &mut World, point: Vec2, ctx: &mut HitContext<'_>) -> u32 {
    if !ctx.modifiers.click_to_burst_active() {
        return 0;
    }

    let mut burst = 0;
    for entity in balls_in_spawn_order(world).into_iter().rev() {
        let Ok(mut ball) = world.get::<&mut Ball>(entity) else {
            continue;
        };
        if ball.is_bursting() || !ball.contains_point(point) {
            continue;
        }

        ball.trigger_burst();
        let powerup = ball.powerup;
        ctx.apply(powerup);
        ctx.stats.record_click(powerup);
        burst += 1;
    }
    burst
}
