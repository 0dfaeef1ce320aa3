use crate::stats::SessionStats;
use thiserror::Error;

/// Acknowledgement from the scoreboard
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubmitReceipt {
    pub success: bool,
    pub id: Option<String>,
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("scoreboard unavailable: {0}")]
    Unavailable(String),

    #[error("scoreboard rejected the submission: {0}")]
    Rejected(String),
}

/// Receives finished sessions at game over.
///
/// Called once per session. `retain_locally` runs first and unconditionally;
/// whatever `submit_score` returns, the game state is unaffected. Sinks that
/// submit asynchronously return a default (pending) receipt.
pub trait ScoreSink {
    fn submit_score(&mut self, stats: &SessionStats) -> Result<SubmitReceipt, SubmitError>;

    fn retain_locally(&mut self, stats: &SessionStats);
}

/// Sink that drops everything (offline play, tests)
#[derive(Debug, Default)]
pub struct NullScoreSink;

impl ScoreSink for NullScoreSink {
    fn submit_score(&mut self, _stats: &SessionStats) -> Result<SubmitReceipt, SubmitError> {
        Ok(SubmitReceipt::default())
    }

    fn retain_locally(&mut self, _stats: &SessionStats) {}
}
