/// Game tuning parameters for the falling-character game
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Canvas
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    // Ball
    pub const BALL_RADIUS: f32 = 30.0;
    pub const BALL_SPEED: f32 = 1.5; // units per tick
    pub const BALL_SPAWN_INTERVAL_MS: f64 = 2000.0;
    pub const SPAWN_MARGIN: f32 = 60.0; // keep spawns away from the side walls
    pub const BURST_TICKS: u32 = 20;

    // Layout
    pub const DEADLINE_OFFSET: f32 = 80.0; // distance from the bottom edge
    pub const UI_MARGIN: f32 = 20.0;
    pub const ICON_SIZE: f32 = 30.0;

    // Session
    pub const INITIAL_LIVES: u32 = 3;
    pub const SCORE_INCREMENT: u64 = 1;

    // Power-ups
    pub const POWERUP_CHANCE: f64 = 0.15;
    pub const CLICK_TO_BURST_MS: f64 = 5000.0;
    pub const FREEZE_MS: f64 = 5000.0;
}
