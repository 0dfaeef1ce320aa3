//! Browser client for the Jyutping falling-character game
//!
//! JS owns the `requestAnimationFrame` loop and the text field; everything
//! else goes through [`WebGame`].

#![cfg(target_arch = "wasm32")]

mod canvas;
mod input;
mod network;
mod sink;
mod storage;

use game_core::*;
use proto::CommentSubmission;
use sink::BrowserScoreSink;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, MouseEvent};

const DEFAULT_API_BASE: &str = "/api";

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    // A second init (hot reload) keeps the first logger
    let _ = console_log::init_with_level(log::Level::Info);
}

fn sound_name(cue: SoundCue) -> &'static str {
    match cue {
        SoundCue::Pop => "pop",
        SoundCue::PowerUp => "powerup",
        SoundCue::GameOver => "gameover",
    }
}

fn outcome_name(outcome: &MatchOutcome) -> &'static str {
    match outcome {
        MatchOutcome::Hit { .. } => "hit",
        MatchOutcome::Miss => "miss",
        MatchOutcome::Ignored => "ignored",
    }
}

fn random_seed() -> u64 {
    (js_sys::Math::random() * u32::MAX as f64) as u64
}

/// One game bound to a canvas
#[wasm_bindgen]
pub struct WebGame {
    game: Game,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    /// Cues raised by input since the last frame
    pending_sounds: Vec<SoundCue>,
    player_name: String,
}

impl WebGame {
    fn capture_sounds(&mut self, before: usize) {
        let sounds = &self.game.events().sounds;
        self.pending_sounds
            .extend(sounds.iter().skip(before).copied());
    }
}

#[wasm_bindgen]
impl WebGame {
    /// `api_base` defaults to `/api`; pass an empty string to play offline.
    /// A random name is generated when `player_name` is missing or blank.
    #[wasm_bindgen(constructor)]
    pub fn new(
        canvas: HtmlCanvasElement,
        api_base: Option<String>,
        player_name: Option<String>,
    ) -> Result<WebGame, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        let seed = random_seed();
        let player_name = match player_name.map(|n| n.trim().to_string()) {
            Some(name) if !name.is_empty() => name,
            _ => input::random_player_name(&mut GameRng::new(seed ^ 0x9e37_79b9)),
        };
        let api_base = match api_base {
            Some(base) if base.trim().is_empty() => None,
            Some(base) => Some(base),
            None => Some(DEFAULT_API_BASE.to_string()),
        };
        let time_origin = web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.time_origin())
            .unwrap_or_else(js_sys::Date::now);

        let config = Config {
            canvas_width: canvas.width() as f32,
            canvas_height: canvas.height() as f32,
            ..Config::new()
        };
        let pool = CharacterPool::builtin().map_err(|e| JsValue::from_str(&e.to_string()))?;
        let sink = BrowserScoreSink::new(api_base, player_name.clone(), time_origin);
        let game = Game::new(config, pool, seed, Box::new(sink))
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Game ready for player {}", player_name);
        Ok(WebGame {
            game,
            canvas,
            ctx,
            pending_sounds: Vec::new(),
            player_name,
        })
    }

    #[wasm_bindgen(getter)]
    pub fn player_name(&self) -> String {
        self.player_name.clone()
    }

    pub fn start(&mut self, now: f64) -> bool {
        self.game.start(now).success
    }

    /// Tick, draw, and return the names of sounds to play this frame
    pub fn frame(&mut self, now: f64) -> Result<js_sys::Array, JsValue> {
        let mut sounds = std::mem::take(&mut self.pending_sounds);
        sounds.extend(self.game.tick(now).sounds.iter().copied());

        let frame = self.game.frame();
        canvas::draw(&self.ctx, &frame)?;
        canvas::update_cursor(&self.canvas, &frame.hud);

        let out = js_sys::Array::new();
        if !self.game.is_muted() {
            for cue in sounds {
                out.push(&JsValue::from_str(sound_name(cue)));
            }
        }
        Ok(out)
    }

    /// Resolve a typed line: "hit", "miss" or "ignored"
    pub fn submit(&mut self, text: &str) -> String {
        let before = self.game.events().sounds.len();
        let outcome = self.game.submit_text(text);
        self.capture_sounds(before);
        outcome_name(&outcome).to_string()
    }

    /// Enter starts or restarts outside a session and submits during one.
    /// Returns the outcome name, or "none" for other keys.
    pub fn key_down(&mut self, event: &KeyboardEvent, text: &str, now: f64) -> String {
        if !input::is_submit_key(event) {
            return "none".to_string();
        }
        match self.game.phase() {
            GamePhase::Playing => self.submit(text),
            GamePhase::Start => {
                self.game.start(now);
                "started".to_string()
            }
            GamePhase::GameOver => {
                self.pending_sounds.clear();
                self.game.restart(now);
                self.game.start(now);
                "started".to_string()
            }
        }
    }

    pub fn pointer_down(&mut self, event: &MouseEvent) -> String {
        let point = input::canvas_point(&self.canvas, event);
        let before = self.game.events().sounds.len();
        let target = self.game.pointer_down(point);
        self.capture_sounds(before);
        match target {
            PointerTarget::HintIcon => "hint".to_string(),
            PointerTarget::MuteIcon => "mute".to_string(),
            PointerTarget::Balls(n) => format!("burst:{}", n),
            PointerTarget::Nothing => "none".to_string(),
        }
    }

    pub fn pointer_up(&mut self) {
        self.game.pointer_up();
    }

    pub fn toggle_mute(&mut self) -> bool {
        self.game.toggle_mute()
    }

    pub fn restart(&mut self, now: f64) -> bool {
        self.pending_sounds.clear();
        self.game.restart(now).success
    }

    #[wasm_bindgen(getter)]
    pub fn phase(&self) -> String {
        format!("{:?}", self.game.phase())
    }

    #[wasm_bindgen(getter)]
    pub fn score(&self) -> f64 {
        self.game.session().score as f64
    }

    #[wasm_bindgen(getter)]
    pub fn lives(&self) -> u32 {
        self.game.session().lives
    }
}

/// POST a comment; resolves to the server message, rejects on blank text or failure
#[wasm_bindgen]
pub fn submit_comment(api_base: String, text: String) -> js_sys::Promise {
    wasm_bindgen_futures::future_to_promise(async move {
        let timestamp: String = js_sys::Date::new_0().to_iso_string().into();
        let comment = CommentSubmission::new(&text, Some(timestamp))
            .ok_or_else(|| JsValue::from_str("comment is empty"))?;
        let response = network::post_comment(&api_base, &comment)
            .await
            .map_err(|e| JsValue::from_str(&e))?;
        if !response.success {
            return Err(JsValue::from_str(&response.message.unwrap_or_default()));
        }
        Ok(JsValue::from_str(&response.message.unwrap_or_default()))
    })
}

/// Leaderboard as a JSON array string, highest score first
#[wasm_bindgen]
pub fn load_leaderboard(api_base: String) -> js_sys::Promise {
    wasm_bindgen_futures::future_to_promise(async move {
        let entries = network::fetch_leaderboard(&api_base)
            .await
            .map_err(|e| JsValue::from_str(&e))?;
        let json = serde_json::to_string(&entries).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(JsValue::from_str(&json))
    })
}

/// Locally archived scores as a JSON array string
#[wasm_bindgen]
pub fn local_scores() -> Result<String, JsValue> {
    storage::load_archive()
        .to_json()
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
