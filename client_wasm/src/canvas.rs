//! 2D canvas renderer for [`Frame`]

use std::f64::consts::TAU;

use game_core::{BallSprite, Frame, GamePhase, Hud, PowerUp};
use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

const BACKGROUND: &str = "#1e1e2e";
const DEADLINE: &str = "#ff4d4d";
const TEXT: &str = "#ffffff";
const GLYPH_FONT: &str = "28px 'Noto Sans HK', 'PingFang HK', sans-serif";
const HINT_FONT: &str = "14px 'Fira Code', monospace";
const HUD_FONT: &str = "20px sans-serif";
const BANNER_FONT: &str = "40px sans-serif";

fn rgba(color: [u8; 3], alpha: u8) -> JsValue {
    JsValue::from_str(&format!(
        "rgba({},{},{},{:.3})",
        color[0],
        color[1],
        color[2],
        alpha as f64 / 255.0
    ))
}

pub fn draw(ctx: &CanvasRenderingContext2d, frame: &Frame) -> Result<(), JsValue> {
    ctx.set_fill_style(&JsValue::from_str(BACKGROUND));
    ctx.fill_rect(0.0, 0.0, frame.width as f64, frame.height as f64);

    // Deadline
    ctx.set_stroke_style(&JsValue::from_str(DEADLINE));
    ctx.set_line_width(2.0);
    ctx.begin_path();
    ctx.move_to(0.0, frame.deadline_y as f64);
    ctx.line_to(frame.width as f64, frame.deadline_y as f64);
    ctx.stroke();

    for ball in &frame.balls {
        draw_ball(ctx, ball)?;
    }
    draw_hud(ctx, &frame.hud)?;
    draw_banner(ctx, frame)
}

fn draw_ball(ctx: &CanvasRenderingContext2d, ball: &BallSprite) -> Result<(), JsValue> {
    let x = ball.pos.x as f64;
    let y = ball.pos.y as f64;
    let radius = (ball.radius * ball.scale) as f64;

    ctx.set_fill_style(&rgba(ball.color, ball.alpha));
    ctx.begin_path();
    ctx.arc(x, y, radius, 0.0, TAU)?;
    ctx.fill();

    if ball.bursting {
        return Ok(());
    }

    ctx.set_fill_style(&JsValue::from_str("#000000"));
    ctx.set_font(GLYPH_FONT);
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    ctx.fill_text(&ball.glyph, x, y)?;

    if let Some(hint) = &ball.hint {
        ctx.set_fill_style(&JsValue::from_str(TEXT));
        ctx.set_font(HINT_FONT);
        ctx.fill_text(hint, x, y + radius + 12.0)?;
    }
    Ok(())
}

fn draw_icon(
    ctx: &CanvasRenderingContext2d,
    hud: &Hud,
    center: glam::Vec2,
    label: &str,
    lit: bool,
) -> Result<(), JsValue> {
    let fill = if lit { "#ffd75e" } else { "#555566" };
    ctx.set_fill_style(&JsValue::from_str(fill));
    ctx.begin_path();
    ctx.arc(center.x as f64, center.y as f64, (hud.icon_size / 2.0) as f64, 0.0, TAU)?;
    ctx.fill();

    ctx.set_fill_style(&JsValue::from_str(TEXT));
    ctx.set_font(HINT_FONT);
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    ctx.fill_text(label, center.x as f64, center.y as f64)
}

fn draw_hud(ctx: &CanvasRenderingContext2d, hud: &Hud) -> Result<(), JsValue> {
    ctx.set_fill_style(&JsValue::from_str(TEXT));
    ctx.set_font(HUD_FONT);
    ctx.set_text_align("left");
    ctx.set_text_baseline("top");
    ctx.fill_text(&format!("Lives: {}", hud.lives), 20.0, 20.0)?;
    ctx.fill_text(&format!("Score: {}", hud.score), 20.0, 45.0)?;
    if hud.multiplier > 1 {
        ctx.fill_text(&format!("x{}", hud.multiplier), 20.0, 70.0)?;
    }

    if let Some(countdown) = hud.countdown {
        let label = match countdown.powerup {
            PowerUp::Blue => "Freeze",
            PowerUp::Yellow => "Click",
            PowerUp::Red | PowerUp::Green => "",
        };
        ctx.set_fill_style(&rgba(countdown.powerup.color(), 255));
        ctx.fill_text(&format!("{} {}s", label, countdown.secs), 20.0, 95.0)?;
    }

    draw_icon(ctx, hud, hud.hint_icon, "?", hud.hint_active)?;
    draw_icon(ctx, hud, hud.mute_icon, if hud.muted { "off" } else { "on" }, !hud.muted)
}

fn draw_banner(ctx: &CanvasRenderingContext2d, frame: &Frame) -> Result<(), JsValue> {
    let text = match frame.hud.phase {
        GamePhase::Start => "Press Enter to start".to_string(),
        GamePhase::GameOver => format!("Game over - score {}", frame.hud.score),
        GamePhase::Playing => return Ok(()),
    };
    ctx.set_fill_style(&JsValue::from_str(TEXT));
    ctx.set_font(BANNER_FONT);
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    ctx.fill_text(&text, frame.width as f64 / 2.0, frame.height as f64 / 2.0)
}

/// Pointer cursor while click-to-burst is on
pub fn update_cursor(canvas: &HtmlCanvasElement, hud: &Hud) {
    let cursor = if hud.pointer_cursor { "pointer" } else { "default" };
    let _ = canvas.style().set_property("cursor", cursor);
}
