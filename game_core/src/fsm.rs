//! Session State Machine
//!
//! START -> PLAYING -> GAME_OVER, with restart leading back to START.

/// Session phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Start,
    Playing,
    GameOver,
}

/// Actions that trigger phase transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    Start,
    LivesExhausted,
    Restart,
}

/// Result of a phase transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionResult {
    pub success: bool,
    pub from_phase: GamePhase,
    pub to_phase: GamePhase,
    pub action: GameAction,
}

/// Session finite state machine
#[derive(Debug, Clone)]
pub struct GameFsm {
    phase: GamePhase,
}

impl Default for GameFsm {
    fn default() -> Self {
        Self::new()
    }
}

impl GameFsm {
    pub fn new() -> Self {
        Self {
            phase: GamePhase::Start,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    pub fn can_transition(&self, action: GameAction) -> bool {
        self.get_next_phase(action).is_some()
    }

    /// Attempt a transition; an invalid action leaves the phase unchanged
    pub fn transition(&mut self, action: GameAction) -> TransitionResult {
        let from_phase = self.phase;

        if let Some(next_phase) = self.get_next_phase(action) {
            self.phase = next_phase;
            log::info!("Phase {:?} -> {:?} ({:?})", from_phase, next_phase, action);
            TransitionResult {
                success: true,
                from_phase,
                to_phase: next_phase,
                action,
            }
        } else {
            TransitionResult {
                success: false,
                from_phase,
                to_phase: from_phase,
                action,
            }
        }
    }

    /// Get the next phase for a given action
    fn get_next_phase(&self, action: GameAction) -> Option<GamePhase> {
        match (self.phase, action) {
            (GamePhase::Start, GameAction::Start) => Some(GamePhase::Playing),
            (GamePhase::Playing, GameAction::LivesExhausted) => Some(GamePhase::GameOver),
            (GamePhase::GameOver, GameAction::Restart) => Some(GamePhase::Start),
            _ => None,
        }
    }
}
