use glam::Vec2;
use hecs::World;

use crate::characters::CharacterPool;
use crate::components::{Ball, PowerUp};
use crate::config::Config;
use crate::resources::{Events, GameRng, Modifiers, SpawnTimer, Time};
use crate::selector::CharacterSelector;

/// Spawn a new ball when the interval has elapsed and nothing is frozen
#[allow(clippy::too_many_arguments)]
pub fn spawn_balls(
    world: &mut World,
    time: &Time,
    config: &Config,
    pool: &CharacterPool,
    selector: &mut CharacterSelector,
    rng: &mut GameRng,
    modifiers: &Modifiers,
    timer: &mut SpawnTimer,
    events: &mut Events,
) {
    if modifiers.is_frozen() || !timer.is_due(time.now, config.spawn_interval_ms) {
        return;
    }

    let character = selector.select(pool, rng);
    let (min_x, max_x) = config.spawn_x_range();
    let pos = Vec2::new(rng.range_f32(min_x, max_x), config.spawn_y());
    let powerup = roll_powerup(config, rng);
    if let Some(kind) = powerup {
        log::debug!("Spawning {} power-up ball at x={:.1}", kind.name(), pos.x);
    }

    let order = timer.record(time.now);
    world.spawn((
        Ball::new(
            pos,
            character,
            powerup,
            config.ball_speed,
            config.ball_diameter(),
        ),
        order,
    ));
    events.spawned += 1;
}

/// Independent roll per spawn, uniform over the catalog
pub fn roll_powerup(config: &Config, rng: &mut GameRng) -> Option<PowerUp> {
    if config.powerup_catalog.is_empty() || rng.unit() >= config.powerup_chance {
        return None;
    }
    let index = rng.index(config.powerup_catalog.len());
    config.powerup_catalog.get(index).copied()
}
