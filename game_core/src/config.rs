use crate::components::PowerUp;
use crate::error::GameError;
use crate::params::Params;
use glam::Vec2;

/// Game configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub ball_radius: f32,
    pub ball_speed: f32,
    pub spawn_interval_ms: f64,
    pub spawn_margin: f32,
    pub deadline_offset: f32,
    pub burst_ticks: u32,
    pub initial_lives: u32,
    pub score_increment: u64,
    pub powerup_chance: f64,
    pub powerup_catalog: Vec<PowerUp>,
    pub click_to_burst_ms: f64,
    pub freeze_ms: f64,
    pub ui_margin: f32,
    pub icon_size: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            canvas_width: Params::CANVAS_WIDTH,
            canvas_height: Params::CANVAS_HEIGHT,
            ball_radius: Params::BALL_RADIUS,
            ball_speed: Params::BALL_SPEED,
            spawn_interval_ms: Params::BALL_SPAWN_INTERVAL_MS,
            spawn_margin: Params::SPAWN_MARGIN,
            deadline_offset: Params::DEADLINE_OFFSET,
            burst_ticks: Params::BURST_TICKS,
            initial_lives: Params::INITIAL_LIVES,
            score_increment: Params::SCORE_INCREMENT,
            powerup_chance: Params::POWERUP_CHANCE,
            powerup_catalog: PowerUp::ALL.to_vec(),
            click_to_burst_ms: Params::CLICK_TO_BURST_MS,
            freeze_ms: Params::FREEZE_MS,
            ui_margin: Params::UI_MARGIN,
            icon_size: Params::ICON_SIZE,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ball_diameter(&self) -> f32 {
        self.ball_radius * 2.0
    }

    /// Y coordinate of the line an unmatched ball must not reach
    pub fn deadline_y(&self) -> f32 {
        self.canvas_height - self.deadline_offset
    }

    /// Half-open horizontal range new balls are spawned in
    pub fn spawn_x_range(&self) -> (f32, f32) {
        (self.spawn_margin, self.canvas_width - self.spawn_margin)
    }

    /// Balls enter just above the visible area
    pub fn spawn_y(&self) -> f32 {
        -self.ball_radius
    }

    /// Centre of the hint (lightbulb) icon
    pub fn hint_icon_center(&self) -> Vec2 {
        Vec2::new(
            self.canvas_width - self.ui_margin - 20.0,
            self.ui_margin + 15.0,
        )
    }

    /// Centre of the mute icon, drawn below the hint icon
    pub fn mute_icon_center(&self) -> Vec2 {
        self.hint_icon_center() + Vec2::new(0.0, 50.0)
    }

    /// Reject configurations the game loop cannot run with
    pub fn validate(&self) -> Result<(), GameError> {
        fn positive(value: f64, field: &'static str) -> Result<(), GameError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(GameError::InvalidConfig {
                    field,
                    reason: "must be a positive finite number",
                })
            }
        }

        positive(self.canvas_width as f64, "canvas_width")?;
        positive(self.canvas_height as f64, "canvas_height")?;
        positive(self.ball_radius as f64, "ball_radius")?;
        positive(self.spawn_interval_ms, "spawn_interval_ms")?;
        positive(self.click_to_burst_ms, "click_to_burst_ms")?;
        positive(self.freeze_ms, "freeze_ms")?;

        if !self.ball_speed.is_finite() || self.ball_speed < 0.0 {
            return Err(GameError::InvalidConfig {
                field: "ball_speed",
                reason: "must be a non-negative finite number",
            });
        }
        if !(0.0..=1.0).contains(&self.powerup_chance) {
            return Err(GameError::InvalidConfig {
                field: "powerup_chance",
                reason: "must lie in [0, 1]",
            });
        }
        if self.powerup_chance > 0.0 && self.powerup_catalog.is_empty() {
            return Err(GameError::InvalidConfig {
                field: "powerup_catalog",
                reason: "must not be empty when power-ups can spawn",
            });
        }
        if self.initial_lives == 0 {
            return Err(GameError::InvalidConfig {
                field: "initial_lives",
                reason: "must be at least 1",
            });
        }
        if self.score_increment == 0 {
            return Err(GameError::InvalidConfig {
                field: "score_increment",
                reason: "must be at least 1",
            });
        }
        if self.burst_ticks == 0 {
            return Err(GameError::InvalidConfig {
                field: "burst_ticks",
                reason: "must be at least 1",
            });
        }
        if self.spawn_margin < 0.0 || self.spawn_margin * 2.0 >= self.canvas_width {
            return Err(GameError::InvalidConfig {
                field: "spawn_margin",
                reason: "leaves no room to spawn",
            });
        }
        if self.deadline_offset < 0.0 || self.deadline_offset >= self.canvas_height {
            return Err(GameError::InvalidConfig {
                field: "deadline_offset",
                reason: "must lie inside the canvas",
            });
        }
        Ok(())
    }
}
