use glam::Vec2;
use hecs::World;

use crate::characters::CharacterPool;
use crate::collaborators::{ScoreSink, SubmitReceipt};
use crate::config::Config;
use crate::error::GameError;
use crate::fsm::{GameAction, GameFsm, GamePhase, TransitionResult};
use crate::render::{build_frame, Frame, FrameInput};
use crate::resources::*;
use crate::selector::CharacterSelector;
use crate::stats::SessionStats;
use crate::step;
use crate::systems::{resolve_pointer, resolve_typed, HitContext, MatchOutcome};

/// What a pointer-down ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    HintIcon,
    MuteIcon,
    Balls(u32),
    Nothing,
}

/// One game: the ball world plus every piece of session state, driven by
/// `tick` and the two input events.
pub struct Game {
    world: World,
    config: Config,
    pool: CharacterPool,
    selector: CharacterSelector,
    rng: GameRng,
    time: Time,
    session: Session,
    modifiers: Modifiers,
    spawn_timer: SpawnTimer,
    stats: Option<SessionStats>,
    fsm: GameFsm,
    events: Events,
    hint_active: bool,
    muted: bool,
    sink: Box<dyn ScoreSink>,
    last_receipt: Option<SubmitReceipt>,
}

impl Game {
    /// Fails on a config the loop cannot run with. The pool was validated
    /// when it was built, so a `Game` can always select a character.
    pub fn new(
        config: Config,
        pool: CharacterPool,
        seed: u64,
        sink: Box<dyn ScoreSink>,
    ) -> Result<Self, GameError> {
        config.validate()?;
        let session = Session::new(config.initial_lives);
        Ok(Self {
            world: World::new(),
            config,
            pool,
            selector: CharacterSelector::new(),
            rng: GameRng::new(seed),
            time: Time::default(),
            session,
            modifiers: Modifiers::new(),
            spawn_timer: SpawnTimer::new(),
            stats: None,
            fsm: GameFsm::new(),
            events: Events::new(),
            hint_active: false,
            muted: false,
            sink,
            last_receipt: None,
        })
    }

    /// START -> PLAYING
    pub fn start(&mut self, now: f64) -> TransitionResult {
        let result = self.fsm.transition(GameAction::Start);
        if result.success {
            self.time = Time::new(now);
            self.stats = Some(SessionStats::new(
                now,
                self.session.lives,
                self.modifiers.multiplier,
            ));
        }
        result
    }

    /// Run one tick at the freshly sampled clock value `now`
    pub fn tick(&mut self, now: f64) -> &Events {
        self.events.clear();
        if !self.fsm.is_playing() {
            return &self.events;
        }

        self.time.advance(now);
        step(
            &mut self.world,
            &self.time,
            &self.config,
            &self.pool,
            &mut self.selector,
            &mut self.rng,
            &mut self.session,
            &mut self.modifiers,
            &mut self.spawn_timer,
            &mut self.events,
        );

        if self.events.game_over {
            self.finish_session();
        }
        &self.events
    }

    fn finish_session(&mut self) {
        if !self.fsm.transition(GameAction::LivesExhausted).success {
            return;
        }
        self.hint_active = false;
        self.events.sounds.push(SoundCue::GameOver);

        let Some(stats) = self.stats.as_mut() else {
            return;
        };
        stats.finish(self.time.now, self.session.score);
        log::info!(
            "Game over: score {}, {} balls burst",
            stats.final_score,
            stats.balls_burst
        );

        self.sink.retain_locally(stats);
        match self.sink.submit_score(stats) {
            Ok(receipt) => self.last_receipt = Some(receipt),
            Err(e) => log::warn!("Score submission failed: {}", e),
        }
    }

    /// Resolve an Enter-confirmed line of text
    pub fn submit_text(&mut self, text: &str) -> MatchOutcome {
        if !self.fsm.is_playing() {
            return MatchOutcome::Ignored;
        }
        let Some(stats) = self.stats.as_mut() else {
            return MatchOutcome::Ignored;
        };
        let mut ctx = HitContext {
            time: &self.time,
            config: &self.config,
            session: &mut self.session,
            modifiers: &mut self.modifiers,
            stats,
            events: &mut self.events,
        };
        resolve_typed(&mut self.world, &self.pool, text, &mut ctx)
    }

    /// Route a pointer-down: hint icon, then mute icon, then click-to-burst
    pub fn pointer_down(&mut self, point: Vec2) -> PointerTarget {
        if !self.fsm.is_playing() {
            return PointerTarget::Nothing;
        }

        let icon_radius = self.config.icon_size / 2.0;
        if point.distance(self.config.hint_icon_center()) < icon_radius {
            self.hint_active = true;
            return PointerTarget::HintIcon;
        }
        if point.distance(self.config.mute_icon_center()) < icon_radius {
            self.toggle_mute();
            return PointerTarget::MuteIcon;
        }
        if !self.modifiers.click_to_burst_active() {
            return PointerTarget::Nothing;
        }

        let Some(stats) = self.stats.as_mut() else {
            return PointerTarget::Nothing;
        };
        let mut ctx = HitContext {
            time: &self.time,
            config: &self.config,
            session: &mut self.session,
            modifiers: &mut self.modifiers,
            stats,
            events: &mut self.events,
        };
        PointerTarget::Balls(resolve_pointer(&mut self.world, point, &mut ctx))
    }

    pub fn pointer_up(&mut self) {
        self.hint_active = false;
    }

    /// Returns the new muted state
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    /// GAME_OVER -> START. Mute survives a restart; everything else resets.
    /// The spawn clock restarts at `now`, so the next session's first ball
    /// waits one interval.
    pub fn restart(&mut self, now: f64) -> TransitionResult {
        let result = self.fsm.transition(GameAction::Restart);
        if result.success {
            self.world.clear();
            self.session = Session::new(self.config.initial_lives);
            self.modifiers.reset();
            self.spawn_timer = SpawnTimer::starting_at(now);
            self.selector.reset();
            self.stats = None;
            self.hint_active = false;
            self.last_receipt = None;
            self.events.clear();
        }
        result
    }

    pub fn frame(&self) -> Frame {
        build_frame(&FrameInput {
            world: &self.world,
            pool: &self.pool,
            config: &self.config,
            phase: self.fsm.phase(),
            session: &self.session,
            modifiers: &self.modifiers,
            now: self.time.now,
            hint_active: self.hint_active,
            muted: self.muted,
        })
    }

    pub fn phase(&self) -> GamePhase {
        self.fsm.phase()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn modifiers(&self) -> &Modifiers {
        &self.modifiers
    }

    /// None before the first start and after a restart
    pub fn stats(&self) -> Option<&SessionStats> {
        self.stats.as_ref()
    }

    /// Events of the latest tick, plus those of inputs handled since
    pub fn events(&self) -> &Events {
        &self.events
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn ball_count(&self) -> usize {
        self.world.len() as usize
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn now(&self) -> f64 {
        self.time.now
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn hint_active(&self) -> bool {
        self.hint_active
    }

    pub fn last_receipt(&self) -> Option<&SubmitReceipt> {
        self.last_receipt.as_ref()
    }
}
