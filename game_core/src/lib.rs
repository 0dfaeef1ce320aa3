pub mod characters;
pub mod collaborators;
pub mod components;
pub mod config;
pub mod error;
pub mod fsm;
pub mod game;
pub mod params;
pub mod render;
pub mod resources;
pub mod selector;
pub mod stats;
pub mod systems;

pub use characters::*;
pub use collaborators::*;
pub use components::*;
pub use config::*;
pub use error::*;
pub use fsm::*;
pub use game::*;
pub use params::*;
pub use render::*;
pub use resources::*;
pub use selector::*;
pub use stats::*;
pub use systems::MatchOutcome;

use hecs::World;
use systems::*;

/// Run one deterministic tick of the falling-ball simulation
#[allow(clippy::too_many_arguments)]
pub fn step(
    world: &mut World,
    time: &Time,
    config: &Config,
    pool: &CharacterPool,
    selector: &mut CharacterSelector,
    rng: &mut GameRng,
    session: &mut Session,
    modifiers: &mut Modifiers,
    spawn_timer: &mut SpawnTimer,
    events: &mut Events,
) {
    // 1. Drop timed effects whose expiry this tick has reached
    expire_powerups(time.now, modifiers, events);

    // 2. Spawn (suspended while frozen)
    spawn_balls(
        world,
        time,
        config,
        pool,
        selector,
        rng,
        modifiers,
        spawn_timer,
        events,
    );

    // 3. Advance balls, purge bursts, charge deadline crossings
    update_balls(world, config, session, modifiers, events);
}

/// Helper to create a ball entity
pub fn create_ball(world: &mut World, ball: Ball, order: SpawnOrder) -> hecs::Entity {
    world.spawn((ball, order))
}
