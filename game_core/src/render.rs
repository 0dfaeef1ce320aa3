//! Per-tick draw instructions.
//!
//! The core never touches pixels; a renderer consumes a [`Frame`] built from the
//! state left by the latest tick and draws it however it likes.

use glam::Vec2;
use hecs::World;

use crate::characters::CharacterPool;
use crate::components::{Ball, PowerUp};
use crate::config::Config;
use crate::fsm::GamePhase;
use crate::resources::{Modifiers, Session};
use crate::systems::balls_in_spawn_order;

/// Colour of balls without a power-up
pub const PLAIN_BALL_COLOR: [u8; 3] = [255, 255, 255];

/// One ball, ready to draw
#[derive(Debug, Clone, PartialEq)]
pub struct BallSprite {
    pub pos: Vec2,
    pub radius: f32,
    pub glyph: String,
    /// Accepted readings, present while the hint is held
    pub hint: Option<String>,
    pub color: [u8; 3],
    /// 1.0 while falling, growing to 2.0 over the burst
    pub scale: f32,
    /// 255 while falling, fading to 0 over the burst
    pub alpha: u8,
    pub bursting: bool,
}

/// Seconds left on the timed power-up shown in the HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    pub powerup: PowerUp,
    pub secs: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Hud {
    pub phase: GamePhase,
    pub lives: u32,
    pub score: u64,
    pub multiplier: u32,
    pub countdown: Option<Countdown>,
    pub hint_active: bool,
    pub muted: bool,
    /// Click-to-burst is on; the renderer should show a pointer cursor
    pub pointer_cursor: bool,
    pub hint_icon: Vec2,
    pub mute_icon: Vec2,
    pub icon_size: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub width: f32,
    pub height: f32,
    pub deadline_y: f32,
    pub balls: Vec<BallSprite>,
    pub hud: Hud,
}

/// Freeze wins over click-to-burst when both are running
pub fn countdown(modifiers: &Modifiers, now: f64) -> Option<Countdown> {
    if let Some(secs) = modifiers.freeze.remaining_secs(now) {
        return Some(Countdown {
            powerup: PowerUp::Blue,
            secs,
        });
    }
    modifiers
        .click_to_burst
        .remaining_secs(now)
        .map(|secs| Countdown {
            powerup: PowerUp::Yellow,
            secs,
        })
}

fn sprite(ball: &Ball, pool: &CharacterPool, config: &Config, hint: bool) -> BallSprite {
    let character = pool.get(ball.character);
    let fraction = ball.burst_fraction(config.burst_ticks).unwrap_or(0.0);
    BallSprite {
        pos: ball.pos,
        radius: ball.radius(),
        glyph: character.map(|c| c.glyph.clone()).unwrap_or_default(),
        hint: if hint && !ball.is_bursting() {
            character.map(|c| c.hint_text())
        } else {
            None
        },
        color: ball.powerup.map_or(PLAIN_BALL_COLOR, PowerUp::color),
        scale: 1.0 + fraction,
        alpha: (255.0 * (1.0 - fraction)).round() as u8,
        bursting: ball.is_bursting(),
    }
}

/// Everything a renderer needs, taken in spawn order
pub struct FrameInput<'a> {
    pub world: &'a World,
    pub pool: &'a CharacterPool,
    pub config: &'a Config,
    pub phase: GamePhase,
    pub session: &'a Session,
    pub modifiers: &'a Modifiers,
    pub now: f64,
    pub hint_active: bool,
    pub muted: bool,
}

pub fn build_frame(input: &FrameInput<'_>) -> Frame {
    let balls = balls_in_spawn_order(input.world)
        .into_iter()
        .filter_map(|e| input.world.get::<&Ball>(e).ok().map(|b| *b))
        .map(|b| sprite(&b, input.pool, input.config, input.hint_active))
        .collect();

    Frame {
        width: input.config.canvas_width,
        height: input.config.canvas_height,
        deadline_y: input.config.deadline_y(),
        balls,
        hud: Hud {
            phase: input.phase,
            lives: input.session.lives,
            score: input.session.score,
            multiplier: input.modifiers.multiplier,
            countdown: countdown(input.modifiers, input.now),
            hint_active: input.hint_active,
            muted: input.muted,
            pointer_cursor: input.modifiers.click_to_burst_active(),
            hint_icon: input.config.hint_icon_center(),
            mute_icon: input.config.mute_icon_center(),
            icon_size: input.config.icon_size,
        },
    }
}
