pub mod lives;
pub mod matching;
pub mod movement;
pub mod powerups;
pub mod spawn;

pub use lives::*;
pub use matching::*;
pub use movement::*;
pub use powerups::*;
pub use spawn::*;

use crate::components::{Ball, SpawnOrder};
use hecs::{Entity, World};

/// Ball entities sorted by spawn order (deterministic iteration)
pub fn balls_in_spawn_order(world: &World) -> Vec<Entity> {
    let mut balls: Vec<(Entity, SpawnOrder)> = world
        .query::<(&Ball, &SpawnOrder)>()
        .iter()
        .map(|(e, (_, order))| (e, *order))
        .collect();
    balls.sort_by_key(|(_, order)| *order);
    balls.into_iter().map(|(e, _)| e).collect()
}
