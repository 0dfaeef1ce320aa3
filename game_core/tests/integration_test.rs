use std::cell::RefCell;
use std::rc::Rc;

use game_core::systems::MatchOutcome;
use game_core::*;
use glam::Vec2;

const FRAME_MS: f64 = 16.0;

#[derive(Default)]
struct SinkLog {
    submitted: Vec<SessionStats>,
    retained: Vec<SessionStats>,
}

struct MockScoreSink {
    log: Rc<RefCell<SinkLog>>,
    fail: bool,
}

impl ScoreSink for MockScoreSink {
    fn submit_score(&mut self, stats: &SessionStats) -> Result<SubmitReceipt, SubmitError> {
        self.log.borrow_mut().submitted.push(stats.clone());
        if self.fail {
            return Err(SubmitError::Unavailable("connection refused".into()));
        }
        Ok(SubmitReceipt {
            success: true,
            id: Some("42".into()),
        })
    }

    fn retain_locally(&mut self, stats: &SessionStats) {
        self.log.borrow_mut().retained.push(stats.clone());
    }
}

fn single_pool() -> CharacterPool {
    CharacterPool::new(vec![Character::new("你", ["nei5"], 1.0)]).unwrap()
}

fn plain_config() -> Config {
    Config {
        powerup_chance: 0.0,
        ..Config::new()
    }
}

fn only_powerup(kind: PowerUp) -> Config {
    Config {
        powerup_chance: 1.0,
        powerup_catalog: vec![kind],
        ..Config::new()
    }
}

fn new_game(config: Config, fail: bool) -> (Game, Rc<RefCell<SinkLog>>) {
    let log = Rc::new(RefCell::new(SinkLog::default()));
    let sink = MockScoreSink {
        log: log.clone(),
        fail,
    };
    let game = Game::new(config, single_pool(), 12345, Box::new(sink)).unwrap();
    (game, log)
}

/// Tick at frame cadence until the game leaves PLAYING or `max` ticks pass.
/// Returns (ticks run, game-over events seen).
fn run_until_over(game: &mut Game, now: &mut f64, max: usize) -> (usize, usize) {
    let mut game_overs = 0;
    for i in 0..max {
        *now += FRAME_MS;
        if game.tick(*now).game_over {
            game_overs += 1;
        }
        if game.phase() != GamePhase::Playing {
            return (i + 1, game_overs);
        }
    }
    (max, game_overs)
}

#[test]
fn test_typed_match_scores_and_burst_is_purged() {
    let (mut game, _log) = new_game(plain_config(), false);
    assert!(game.start(0.0).success);

    game.tick(FRAME_MS);
    assert_eq!(game.ball_count(), 1);
    let frame = game.frame();
    assert_eq!(frame.balls[0].glyph, "你");
    assert_eq!(frame.balls[0].pos.y, -28.5, "Spawned at -radius, then advanced once");

    assert!(game.submit_text("nei5").is_hit());
    assert_eq!(game.session().score, 1);
    let stats = game.stats().unwrap();
    assert_eq!(stats.tone(5), 1);
    assert_eq!(stats.balls_burst, 1);
    assert!(game.frame().balls[0].bursting);
    assert_eq!(game.events().sounds, vec![SoundCue::Pop]);

    let mut now = FRAME_MS;
    for _ in 0..20 {
        now += FRAME_MS;
        game.tick(now);
    }
    assert_eq!(game.ball_count(), 1, "Burst still animating after 20 ticks");
    now += FRAME_MS;
    game.tick(now);
    assert_eq!(game.ball_count(), 0, "Removed on the 21st tick");
}

#[test]
fn test_miss_leaves_state_unchanged() {
    let (mut game, _log) = new_game(plain_config(), false);
    game.start(0.0);
    game.tick(FRAME_MS);

    assert_eq!(game.submit_text("ngo5"), MatchOutcome::Miss);
    assert!(game.events().invalid_input);
    assert_eq!(game.session().score, 0);
    assert!(!game.frame().balls[0].bursting);
}

#[test]
fn test_deadline_losses_end_the_game_once() {
    let (mut game, log) = new_game(plain_config(), false);
    game.start(0.0);

    let mut now = 0.0;
    let mut lives_seen = vec![game.session().lives];
    let mut game_overs = 0;
    for _ in 0..5000 {
        now += FRAME_MS;
        let events = game.tick(now);
        if events.lives_lost > 0 {
            assert_eq!(events.lives_lost, 1);
            assert!(events.removed >= 1, "Crossing ball is dropped");
        }
        if events.game_over {
            game_overs += 1;
            assert!(events.sounds.contains(&SoundCue::GameOver));
        }
        let lives = game.session().lives;
        if lives != *lives_seen.last().unwrap() {
            lives_seen.push(lives);
        }
        if game.phase() == GamePhase::GameOver {
            break;
        }
    }

    assert_eq!(lives_seen, vec![3, 2, 1, 0]);
    assert_eq!(game_overs, 1);
    assert_eq!(game.phase(), GamePhase::GameOver);

    // Ticking on after game over does nothing
    for _ in 0..500 {
        now += FRAME_MS;
        assert!(!game.tick(now).game_over);
    }
    assert_eq!(game.session().lives, 0);

    let log = log.borrow();
    assert_eq!(log.submitted.len(), 1, "Submitted exactly once");
    assert_eq!(log.retained.len(), 1, "Kept locally as well");
    assert!(log.submitted[0].is_finished());
    assert_eq!(game.last_receipt().and_then(|r| r.id.as_deref()), Some("42"));
}

#[test]
fn test_life_loss_resets_multiplier() {
    let (mut game, _log) = new_game(only_powerup(PowerUp::Green), false);
    game.start(0.0);
    game.tick(FRAME_MS);

    game.submit_text("nei5");
    assert_eq!(game.modifiers().multiplier, 2);
    assert_eq!(game.session().score, 2, "Green counts towards its own hit");

    let mut now = FRAME_MS;
    loop {
        now += FRAME_MS;
        if game.tick(now).lives_lost > 0 {
            break;
        }
        assert!(now < 60_000.0, "A ball should have reached the deadline");
    }
    assert_eq!(game.modifiers().multiplier, 1);
    assert_eq!(game.stats().unwrap().max_multiplier, 2);
}

#[test]
fn test_multiplier_applies_to_score() {
    let (mut game, _log) = new_game(only_powerup(PowerUp::Green), false);
    game.start(0.0);

    let mut now = 0.0;
    let mut scores = Vec::new();
    // Three green balls, one per spawn interval
    for _ in 0..3 {
        loop {
            now += FRAME_MS;
            if game.tick(now).spawned > 0 {
                break;
            }
        }
        game.submit_text("nei5");
        scores.push(game.session().score);
    }
    assert_eq!(scores, vec![2, 5, 9], "Each hit scores the raised multiplier");
    assert_eq!(game.modifiers().multiplier, 4);
    assert_eq!(game.stats().unwrap().green_collected, 3);
    assert_eq!(game.stats().unwrap().repeated_correct, 2);
}

#[test]
fn test_freeze_expiry_and_refresh() {
    let (mut game, _log) = new_game(only_powerup(PowerUp::Blue), false);
    game.start(0.0);
    game.tick(FRAME_MS);
    game.tick(2100.0);
    assert_eq!(game.ball_count(), 2);

    // T = 2100
    game.submit_text("nei5");
    assert_eq!(game.modifiers().freeze.expires_at(), Some(7100.0));

    // Frozen: nothing moves, nothing spawns
    let before: Vec<f32> = game.frame().balls.iter().map(|b| b.pos.y).collect();
    game.tick(4100.0);
    assert_eq!(game.ball_count(), 2);
    assert_eq!(game.frame().balls[1].pos.y, before[1]);

    // T + 2000: refresh, not stack
    game.submit_text("nei5");
    assert_eq!(game.modifiers().freeze.expires_at(), Some(9100.0));
    let countdown = game.frame().hud.countdown.unwrap();
    assert_eq!(countdown.powerup, PowerUp::Blue);
    assert_eq!(countdown.secs, 5);

    let events = game.tick(7100.0).clone();
    assert!(events.powerups_expired.is_empty());
    assert!(game.modifiers().is_frozen());

    game.tick(9099.0);
    assert!(game.modifiers().is_frozen());

    let events = game.tick(9100.0).clone();
    assert_eq!(events.powerups_expired, vec![PowerUp::Blue]);
    assert!(!game.modifiers().is_frozen());
    assert_eq!(events.spawned, 1, "Spawning resumes on the expiry tick");
}

#[test]
fn test_pointer_burst_only_while_click_to_burst() {
    let (mut game, _log) = new_game(only_powerup(PowerUp::Yellow), false);
    game.start(0.0);
    game.tick(FRAME_MS);

    let pos = game.frame().balls[0].pos;
    assert_eq!(game.pointer_down(pos), PointerTarget::Nothing);
    assert!(!game.frame().balls[0].bursting);

    game.submit_text("nei5");
    assert!(game.frame().hud.pointer_cursor);

    let mut now = FRAME_MS;
    loop {
        now += FRAME_MS;
        if game.tick(now).spawned > 0 {
            break;
        }
    }
    let target = game
        .frame()
        .balls
        .iter()
        .find(|b| !b.bursting)
        .map(|b| b.pos)
        .unwrap();
    assert_eq!(game.pointer_down(target), PointerTarget::Balls(1));

    let stats = game.stats().unwrap();
    assert_eq!(stats.balls_clicked, 1);
    assert_eq!(stats.balls_burst, 2);
    assert_eq!(stats.yellow_collected, 2);
    assert_eq!(stats.tone_total(), 1, "Only the typed match counts a tone");

    // Expiry reverts the cursor
    loop {
        now += FRAME_MS;
        if game.tick(now).powerups_expired.contains(&PowerUp::Yellow) {
            break;
        }
        assert!(now < 20_000.0);
    }
    assert!(!game.frame().hud.pointer_cursor);
}

#[test]
fn test_hint_and_mute_icons() {
    let (mut game, _log) = new_game(plain_config(), false);
    game.start(0.0);
    game.tick(FRAME_MS);

    assert_eq!(game.pointer_down(Vec2::new(760.0, 35.0)), PointerTarget::HintIcon);
    let frame = game.frame();
    assert!(frame.hud.hint_active);
    assert_eq!(frame.balls[0].hint.as_deref(), Some("nei5"));

    game.pointer_up();
    assert!(!game.frame().hud.hint_active);
    assert_eq!(game.frame().balls[0].hint, None);

    assert_eq!(game.pointer_down(Vec2::new(760.0, 85.0)), PointerTarget::MuteIcon);
    assert!(game.frame().hud.muted);
    game.pointer_down(Vec2::new(760.0, 85.0));
    assert!(!game.is_muted());

    // Exactly one icon radius away is outside
    assert_eq!(game.pointer_down(Vec2::new(775.0, 35.0)), PointerTarget::Nothing);
}

#[test]
fn test_failed_submission_keeps_local_state() {
    let (mut game, log) = new_game(plain_config(), true);
    game.start(0.0);
    game.tick(FRAME_MS);
    game.submit_text("nei5");

    let mut now = FRAME_MS;
    let (_, game_overs) = run_until_over(&mut game, &mut now, 10_000);

    assert_eq!(game_overs, 1);
    assert_eq!(game.phase(), GamePhase::GameOver);
    assert_eq!(game.session().score, 1);
    assert!(game.last_receipt().is_none());

    let stats = game.stats().unwrap();
    assert_eq!(stats.final_score, 1);
    assert!(stats.is_finished());

    let log = log.borrow();
    assert_eq!(log.submitted.len(), 1);
    assert_eq!(log.retained.len(), 1);
    assert_eq!(log.retained[0].final_score, 1);
}

#[test]
fn test_restart_resets_session() {
    let (mut game, log) = new_game(only_powerup(PowerUp::Green), false);
    game.start(0.0);
    game.tick(FRAME_MS);
    game.submit_text("nei5");
    game.toggle_mute();

    let mut now = FRAME_MS;
    run_until_over(&mut game, &mut now, 10_000);
    assert_eq!(game.phase(), GamePhase::GameOver);

    assert!(!game.start(now).success, "Start is not valid from GAME_OVER");
    assert!(game.restart(now).success);
    assert_eq!(game.phase(), GamePhase::Start);
    assert_eq!(game.ball_count(), 0);
    assert_eq!(game.session().lives, 3);
    assert_eq!(game.session().score, 0);
    assert_eq!(game.modifiers().multiplier, 1);
    assert!(game.stats().is_none());
    assert!(game.is_muted(), "Mute is a preference, not session state");

    assert!(game.start(now).success);
    assert_eq!(game.tick(now + FRAME_MS).spawned, 0, "First ball waits one interval");
    assert_eq!(game.tick(now + 2000.0).spawned, 0);
    assert_eq!(game.tick(now + 2001.0).spawned, 1);
    now += 2001.0;
    run_until_over(&mut game, &mut now, 10_000);
    assert_eq!(log.borrow().submitted.len(), 2);
}

#[test]
fn test_inputs_ignored_outside_playing() {
    let (mut game, _log) = new_game(plain_config(), false);
    assert_eq!(game.submit_text("nei5"), MatchOutcome::Ignored);
    assert_eq!(game.pointer_down(Vec2::new(760.0, 35.0)), PointerTarget::Nothing);
    assert_eq!(game.tick(FRAME_MS).spawned, 0);
    assert_eq!(game.ball_count(), 0);
    assert!(!game.restart(FRAME_MS).success);
}

#[test]
fn test_invalid_config_is_fatal() {
    let config = Config {
        initial_lives: 0,
        ..Config::new()
    };
    let result = Game::new(config, single_pool(), 1, Box::new(NullScoreSink));
    assert!(matches!(result, Err(GameError::InvalidConfig { .. })));
}

#[test]
fn test_same_seed_same_game() {
    let pool = CharacterPool::builtin().unwrap();
    let mut a = Game::new(Config::new(), pool.clone(), 777, Box::new(NullScoreSink)).unwrap();
    let mut b = Game::new(Config::new(), pool, 777, Box::new(NullScoreSink)).unwrap();
    a.start(0.0);
    b.start(0.0);

    let mut now = 0.0;
    for _ in 0..1500 {
        now += FRAME_MS;
        a.tick(now);
        b.tick(now);
    }
    assert_eq!(a.frame(), b.frame());
}

#[test]
fn test_builtin_glyphs_never_repeat_back_to_back() {
    let config = Config {
        spawn_interval_ms: 10.0,
        ..plain_config()
    };
    let pool = CharacterPool::builtin().unwrap();
    let mut game = Game::new(config, pool, 9, Box::new(NullScoreSink)).unwrap();
    game.start(0.0);

    let mut now = 0.0;
    for _ in 0..100 {
        now += FRAME_MS;
        game.tick(now);
    }
    let glyphs: Vec<String> = game.frame().balls.into_iter().map(|b| b.glyph).collect();
    assert!(glyphs.len() > 50);
    for pair in glyphs.windows(2) {
        assert_ne!(pair[0], pair[1]);
    }
}
