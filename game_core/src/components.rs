use crate::characters::CharacterId;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Power-up tag carried by some balls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerUp {
    /// +1 life, applied immediately
    Red,
    /// Click any ball to burst it, for a limited time
    Yellow,
    /// Freeze falling motion and spawning, for a limited time
    Blue,
    /// +1 score multiplier until the next life is lost
    Green,
}

impl PowerUp {
    pub const ALL: [PowerUp; 4] = [
        PowerUp::Red,
        PowerUp::Yellow,
        PowerUp::Blue,
        PowerUp::Green,
    ];

    /// RGB fill used by the renderer
    pub fn color(self) -> [u8; 3] {
        match self {
            PowerUp::Red => [255, 77, 77],
            PowerUp::Yellow => [255, 255, 102],
            PowerUp::Blue => [77, 77, 255],
            PowerUp::Green => [77, 255, 77],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PowerUp::Red => "red",
            PowerUp::Yellow => "yellow",
            PowerUp::Blue => "blue",
            PowerUp::Green => "green",
        }
    }
}

/// Animation phase of a ball
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BallPhase {
    Falling,
    Bursting { progress: u32 },
}

/// Ball component - a falling character waiting to be typed
#[derive(Debug, Clone, Copy)]
pub struct Ball {
    pub pos: Vec2,
    pub character: CharacterId,
    pub powerup: Option<PowerUp>,
    pub speed: f32,
    pub size: f32, // diameter
    pub phase: BallPhase,
}

impl Ball {
    pub fn new(
        pos: Vec2,
        character: CharacterId,
        powerup: Option<PowerUp>,
        speed: f32,
        size: f32,
    ) -> Self {
        Self {
            pos,
            character,
            powerup,
            speed,
            size,
            phase: BallPhase::Falling,
        }
    }

    pub fn radius(&self) -> f32 {
        self.size / 2.0
    }

    pub fn is_bursting(&self) -> bool {
        matches!(self.phase, BallPhase::Bursting { .. })
    }

    /// Advance one tick. Returns true once the burst animation has run past
    /// `burst_ticks` and the ball should be removed.
    pub fn advance(&mut self, frozen: bool, burst_ticks: u32) -> bool {
        match &mut self.phase {
            BallPhase::Falling => {
                if !frozen {
                    self.pos.y += self.speed;
                }
                false
            }
            BallPhase::Bursting { progress } => {
                *progress += 1;
                *progress > burst_ticks
            }
        }
    }

    /// Lower edge at or past the deadline line
    pub fn has_crossed_deadline(&self, line_y: f32) -> bool {
        self.pos.y + self.size / 2.0 >= line_y
    }

    /// Start the burst animation. No-op if already bursting.
    pub fn trigger_burst(&mut self) {
        if let BallPhase::Falling = self.phase {
            self.phase = BallPhase::Bursting { progress: 0 };
        }
    }

    /// Strictly inside the ball's circle
    pub fn contains_point(&self, point: Vec2) -> bool {
        self.pos.distance(point) < self.radius()
    }

    /// Burst animation completion in [0, 1]; None while falling
    pub fn burst_fraction(&self, burst_ticks: u32) -> Option<f32> {
        match self.phase {
            BallPhase::Falling => None,
            BallPhase::Bursting { progress } => {
                Some((progress as f32 / burst_ticks.max(1) as f32).min(1.0))
            }
        }
    }
}

/// Monotonic spawn sequence; balls are always visited in this order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SpawnOrder(pub u64);
