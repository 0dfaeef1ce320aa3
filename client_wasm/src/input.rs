//! Keyboard and pointer input handling

use game_core::GameRng;
use glam::Vec2;
use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent};

const NAME_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const NAME_LEN: usize = 10;

/// Anonymous player name, 10 characters of [a-z0-9]
pub fn random_player_name(rng: &mut GameRng) -> String {
    (0..NAME_LEN)
        .map(|_| NAME_ALPHABET[rng.index(NAME_ALPHABET.len())] as char)
        .collect()
}

/// Enter confirms the typed line
pub fn is_submit_key(event: &KeyboardEvent) -> bool {
    event.key() == "Enter"
}

/// Pointer position in canvas units, undoing any CSS scaling
pub fn canvas_point(canvas: &HtmlCanvasElement, event: &MouseEvent) -> Vec2 {
    let scale_x = canvas.width() as f32 / canvas.client_width().max(1) as f32;
    let scale_y = canvas.height() as f32 / canvas.client_height().max(1) as f32;
    Vec2::new(
        event.offset_x() as f32 * scale_x,
        event.offset_y() as f32 * scale_y,
    )
}
