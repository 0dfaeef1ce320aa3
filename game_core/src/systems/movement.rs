use hecs::World;

use crate::components::Ball;
use crate::config::Config;
use crate::resources::{Events, Modifiers, Session};
use crate::systems::{balls_in_spawn_order, lose_life};

/// Advance every ball in spawn order.
///
/// Finished bursts are purged; a falling ball that reaches the deadline while
/// nothing is frozen costs a life and is dropped. Once the last life is gone
/// the rest of the balls are left untouched for this tick.
pub fn update_balls(
    world: &mut World,
    config: &Config,
    session: &mut Session,
    modifiers: &mut Modifiers,
    events: &mut Events,
) {
    let frozen = modifiers.is_frozen();
    let deadline_y = config.deadline_y();
    let mut to_remove = Vec::new();

    for entity in balls_in_spawn_order(world) {
        let Ok(mut ball) = world.get::<&mut Ball>(entity) else {
            continue;
        };

        if ball.advance(frozen, config.burst_ticks) {
            to_remove.push(entity);
            continue;
        }

        if !frozen && !ball.is_bursting() && ball.has_crossed_deadline(deadline_y) {
            to_remove.push(entity);
            if lose_life(session, modifiers, events) {
                events.game_over = true;
                break;
            }
        }
    }

    events.removed += to_remove.len() as u32;
    for entity in to_remove {
        let _ = world.despawn(entity);
    }
}
