use crate::components::{PowerUp, SpawnOrder};
use rand::Rng;

/// Clock sampled once per tick; every subsystem reads `now` from here
#[derive(Debug, Clone, Copy, Default)]
pub struct Time {
    pub now: f64, // ms, monotonic
    pub tick: u64,
}

impl Time {
    pub fn new(now: f64) -> Self {
        Self { now, tick: 0 }
    }

    /// Advance to a freshly sampled clock value
    pub fn advance(&mut self, now: f64) {
        self.now = now;
        self.tick += 1;
    }
}

/// Random number generator
pub struct GameRng(pub rand::rngs::StdRng);

impl GameRng {
    pub fn new(seed: u64) -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::seed_from_u64(seed))
    }

    /// Uniform in [0, 1)
    pub fn unit(&mut self) -> f64 {
        self.0.gen::<f64>()
    }

    /// Uniform in [min, max); returns `min` for an empty range
    pub fn range_f32(&mut self, min: f32, max: f32) -> f32 {
        if max > min {
            self.0.gen_range(min..max)
        } else {
            min
        }
    }

    /// Uniform index in [0, len); `len` must be non-zero
    pub fn index(&mut self, len: usize) -> usize {
        self.0.gen_range(0..len)
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new(12345)
    }
}

/// Lives and score of the running session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub lives: u32,
    pub score: u64,
}

impl Session {
    pub fn new(lives: u32) -> Self {
        Self { lives, score: 0 }
    }

    pub fn award(&mut self, points: u64) {
        self.score = self.score.saturating_add(points);
    }
}

/// A power-up effect that stays on until its expiry timestamp
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TimedEffect {
    expires_at: Option<f64>,
}

impl TimedEffect {
    /// Turn on (or refresh) until `now + duration`. Durations never stack.
    pub fn activate(&mut self, now: f64, duration_ms: f64) {
        self.expires_at = Some(now + duration_ms);
    }

    pub fn is_active(&self) -> bool {
        self.expires_at.is_some()
    }

    pub fn expires_at(&self) -> Option<f64> {
        self.expires_at
    }

    /// Clear the effect once `now` reaches the expiry. Returns true on the
    /// tick it turns off.
    pub fn expire(&mut self, now: f64) -> bool {
        match self.expires_at {
            Some(end) if now >= end => {
                self.expires_at = None;
                true
            }
            _ => false,
        }
    }

    /// Whole seconds left, rounded up
    pub fn remaining_secs(&self, now: f64) -> Option<u32> {
        self.expires_at
            .map(|end| ((end - now) / 1000.0).ceil().max(0.0) as u32)
    }

    pub fn clear(&mut self) {
        self.expires_at = None;
    }
}

/// Loop-global modifiers driven by power-ups
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Modifiers {
    pub click_to_burst: TimedEffect,
    pub freeze: TimedEffect,
    pub multiplier: u32,
}

impl Default for Modifiers {
    fn default() -> Self {
        Self {
            click_to_burst: TimedEffect::default(),
            freeze: TimedEffect::default(),
            multiplier: 1,
        }
    }
}

impl Modifiers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_frozen(&self) -> bool {
        self.freeze.is_active()
    }

    pub fn click_to_burst_active(&self) -> bool {
        self.click_to_burst.is_active()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// When the last ball spawned, and the order tag the next one gets
#[derive(Debug, Clone, Copy, Default)]
pub struct SpawnTimer {
    last_spawn: Option<f64>,
    next_order: u64,
}

impl SpawnTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The first spawn of a session is due immediately; later ones once
    /// strictly more than `interval_ms` has passed.
    /// A timer whose first spawn is one interval after `now`
    pub fn starting_at(now: f64) -> Self {
        Self {
            last_spawn: Some(now),
            next_order: 0,
        }
    }

    pub fn is_due(&self, now: f64, interval_ms: f64) -> bool {
        match self.last_spawn {
            None => true,
            Some(last) => now - last > interval_ms,
        }
    }

    pub fn record(&mut self, now: f64) -> SpawnOrder {
        self.last_spawn = Some(now);
        let order = SpawnOrder(self.next_order);
        self.next_order += 1;
        order
    }

    pub fn last_spawn(&self) -> Option<f64> {
        self.last_spawn
    }
}

/// Audio the client may play in response to a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Pop,
    PowerUp,
    GameOver,
}

impl SoundCue {
    /// Cue for a burst ball, depending on whether it carried a power-up
    pub fn for_burst(powerup: Option<PowerUp>) -> Self {
        if powerup.is_some() {
            SoundCue::PowerUp
        } else {
            SoundCue::Pop
        }
    }
}

/// Events that occurred during this tick
#[derive(Debug, Clone, Default)]
pub struct Events {
    pub spawned: u32,
    pub removed: u32,
    pub lives_lost: u32,
    pub powerups_expired: Vec<PowerUp>,
    pub game_over: bool,
    pub invalid_input: bool,
    pub sounds: Vec<SoundCue>,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.spawned = 0;
        self.removed = 0;
        self.lives_lost = 0;
        self.powerups_expired.clear();
        self.game_over = false;
        self.invalid_input = false;
        self.sounds.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timed_effect_expires_at_boundary() {
        let mut effect = TimedEffect::default();
        effect.activate(1000.0, 5000.0);
        assert!(effect.is_active());
        assert!(!effect.expire(5999.9));
        assert!(effect.is_active());
        assert!(effect.expire(6000.0), "Turns off when now reaches expiry");
        assert!(!effect.is_active());
        assert!(!effect.expire(7000.0), "Only reports the transition once");
    }

    #[test]
    fn test_timed_effect_refresh_does_not_stack() {
        let mut effect = TimedEffect::default();
        effect.activate(0.0, 5000.0);
        effect.activate(2000.0, 5000.0);
        assert_eq!(effect.expires_at(), Some(7000.0));
    }

    #[test]
    fn test_timed_effect_remaining_secs() {
        let mut effect = TimedEffect::default();
        assert_eq!(effect.remaining_secs(0.0), None);
        effect.activate(0.0, 5000.0);
        assert_eq!(effect.remaining_secs(0.0), Some(5));
        assert_eq!(effect.remaining_secs(100.0), Some(5));
        assert_eq!(effect.remaining_secs(4001.0), Some(1));
    }

    #[test]
    fn test_modifiers_reset() {
        let mut modifiers = Modifiers::new();
        modifiers.multiplier = 4;
        modifiers.freeze.activate(0.0, 5000.0);
        modifiers.click_to_burst.activate(0.0, 5000.0);
        modifiers.reset();
        assert_eq!(modifiers.multiplier, 1);
        assert!(!modifiers.is_frozen());
        assert!(!modifiers.click_to_burst_active());
    }

    #[test]
    fn test_session_award() {
        let mut session = Session::new(3);
        session.award(3);
        session.award(2);
        assert_eq!(session.score, 5);
        assert_eq!(session.lives, 3);
    }

    #[test]
    fn test_spawn_timer_strict_interval() {
        let mut timer = SpawnTimer::new();
        assert!(timer.is_due(0.0, 2000.0), "First spawn is immediate");
        assert_eq!(timer.record(100.0), SpawnOrder(0));
        assert!(!timer.is_due(2100.0, 2000.0), "Exactly one interval is not enough");
        assert!(timer.is_due(2100.5, 2000.0));
        assert_eq!(timer.record(2100.5), SpawnOrder(1));
        assert_eq!(timer.last_spawn(), Some(2100.5));
    }

    #[test]
    fn test_spawn_timer_starting_at() {
        let mut timer = SpawnTimer::starting_at(5000.0);
        assert!(!timer.is_due(5016.0, 2000.0));
        assert!(!timer.is_due(7000.0, 2000.0));
        assert!(timer.is_due(7001.0, 2000.0));
        assert_eq!(timer.record(7001.0), SpawnOrder(0));
    }

    #[test]
    fn test_time_advance() {
        let mut time = Time::new(10.0);
        time.advance(26.0);
        assert_eq!(time.now, 26.0);
        assert_eq!(time.tick, 1);
    }

    #[test]
    fn test_events_clear() {
        let mut events = Events::new();
        events.spawned = 1;
        events.removed = 2;
        events.lives_lost = 1;
        events.powerups_expired.push(PowerUp::Blue);
        events.game_over = true;
        events.invalid_input = true;
        events.sounds.push(SoundCue::GameOver);

        events.clear();

        assert_eq!(events.spawned, 0);
        assert_eq!(events.removed, 0);
        assert_eq!(events.lives_lost, 0);
        assert!(events.powerups_expired.is_empty());
        assert!(!events.game_over);
        assert!(!events.invalid_input);
        assert!(events.sounds.is_empty());
    }

    #[test]
    fn test_rng_is_deterministic() {
        let mut a = GameRng::new(7);
        let mut b = GameRng::new(7);
        for _ in 0..10 {
            assert_eq!(a.unit(), b.unit());
        }
        assert_eq!(a.range_f32(5.0, 5.0), 5.0);
    }
}
