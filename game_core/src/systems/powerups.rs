use crate::components::PowerUp;
use crate::config::Config;
use crate::resources::{Events, Modifiers, Session};

/// Apply the effect of a collected power-up at `now`.
///
/// Timed effects restart from `now` on re-activation rather than stacking.
pub fn activate_powerup(
    powerup: PowerUp,
    now: f64,
    config: &Config,
    session: &mut Session,
    modifiers: &mut Modifiers,
) {
    match powerup {
        PowerUp::Red => {
            session.lives = session.lives.saturating_add(1);
        }
        PowerUp::Yellow => {
            modifiers.click_to_burst.activate(now, config.click_to_burst_ms);
        }
        PowerUp::Blue => {
            modifiers.freeze.activate(now, config.freeze_ms);
        }
        PowerUp::Green => {
            modifiers.multiplier = modifiers.multiplier.saturating_add(1);
        }
    }
    log::info!(
        "Power-up {} activated (lives {}, multiplier {})",
        powerup.name(),
        session.lives,
        modifiers.multiplier
    );
}

/// Turn off timed effects whose expiry has been reached
pub fn expire_powerups(now: f64, modifiers: &mut Modifiers, events: &mut Events) {
    if modifiers.click_to_burst.expire(now) {
        events.powerups_expired.push(PowerUp::Yellow);
        log::info!("Click-to-burst expired");
    }
    if modifiers.freeze.expire(now) {
        events.powerups_expired.push(PowerUp::Blue);
        log::info!("Freeze expired");
    }
}
