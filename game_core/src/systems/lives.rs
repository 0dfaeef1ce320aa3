use crate::resources::{Events, Modifiers, Session};

/// Take one life and reset the multiplier.
///
/// Returns true only on the call that spends the last life. At zero lives
/// this is a no-op, so a session can never go negative or end twice.
pub fn lose_life(session: &mut Session, modifiers: &mut Modifiers, events: &mut Events) -> bool {
    if session.lives == 0 {
        return false;
    }

    session.lives -= 1;
    modifiers.multiplier = 1;
    events.lives_lost += 1;
    log::info!("Life lost, {} remaining", session.lives);

    session.lives == 0
}
