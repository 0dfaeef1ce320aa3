//! Scoreboard protocol
//!
//! JSON bodies exchanged with the scoreboard service, plus the local archive
//! kept when that service cannot be reached.

use game_core::SessionStats;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Most entries the local archive keeps
pub const MAX_ARCHIVED_SCORES: usize = 100;

// ============================================================================
// Score submission
// ============================================================================

/// Body of a score POST
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSubmission {
    pub name: String,
    pub score: u64,
    pub start_time: String,
    pub end_time: String,
    pub max_lives: u32,
    pub max_multiplier: u32,
    pub red_balls_collected: u32,
    pub blue_balls_collected: u32,
    pub yellow_balls_collected: u32,
    pub green_balls_collected: u32,
    pub balls_burst: u32,
    pub balls_clicked: u32,
    pub tone1_correct: u32,
    pub tone2_correct: u32,
    pub tone3_correct: u32,
    pub tone4_correct: u32,
    pub tone5_correct: u32,
    pub tone6_correct: u32,
    pub repeated_correct: u32,
}

impl ScoreSubmission {
    /// Build from finished session stats. Timestamps are ISO-8601 strings
    /// produced by the caller's clock.
    pub fn from_stats(name: &str, stats: &SessionStats, start_time: String, end_time: String) -> Self {
        let [t1, t2, t3, t4, t5, t6] = stats.tone_correct;
        Self {
            name: name.to_string(),
            score: stats.final_score,
            start_time,
            end_time,
            max_lives: stats.max_lives,
            max_multiplier: stats.max_multiplier,
            red_balls_collected: stats.red_collected,
            blue_balls_collected: stats.blue_collected,
            yellow_balls_collected: stats.yellow_collected,
            green_balls_collected: stats.green_collected,
            balls_burst: stats.balls_burst,
            balls_clicked: stats.balls_clicked,
            tone1_correct: t1,
            tone2_correct: t2,
            tone3_correct: t3,
            tone4_correct: t4,
            tone5_correct: t5,
            tone6_correct: t6,
            repeated_correct: stats.repeated_correct,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Record id; backends disagree on numbers vs strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(u64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{}", n),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

/// Response to a score or comment POST
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub success: bool,
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub message: Option<String>,
}

impl SubmitResponse {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl From<SubmitResponse> for game_core::SubmitReceipt {
    fn from(response: SubmitResponse) -> Self {
        Self {
            success: response.success,
            id: response.id.map(|id| id.to_string()),
        }
    }
}

// ============================================================================
// Leaderboard
// ============================================================================

/// One leaderboard row. Older records lack most counters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u64,
    pub date: Option<String>,
    pub time: Option<String>,
    pub max_lives: u32,
    pub max_multiplier: u32,
    pub red_balls_collected: u32,
    pub blue_balls_collected: u32,
    pub yellow_balls_collected: u32,
    pub green_balls_collected: u32,
    pub balls_burst: u32,
    pub balls_clicked: u32,
    pub repeated_correct: u32,
}

/// Parse a leaderboard response, highest score first
pub fn parse_leaderboard(json: &str) -> Result<Vec<LeaderboardEntry>, serde_json::Error> {
    let mut entries: Vec<LeaderboardEntry> = serde_json::from_str(json)?;
    entries.sort_by(|a, b| b.score.cmp(&a.score));
    Ok(entries)
}

// ============================================================================
// Comments
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentSubmission {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl CommentSubmission {
    /// None for blank text, which is never sent
    pub fn new(text: &str, timestamp: Option<String>) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        Some(Self {
            text: text.to_string(),
            timestamp,
        })
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

// ============================================================================
// Local fallback archive
// ============================================================================

/// Submissions kept on the device, best first, capped at
/// [`MAX_ARCHIVED_SCORES`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreArchive {
    entries: Vec<ScoreSubmission>,
}

impl ScoreArchive {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a submission; ties keep their arrival order
    pub fn push(&mut self, submission: ScoreSubmission) {
        self.entries.push(submission);
        self.normalize();
    }

    fn normalize(&mut self) {
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(MAX_ARCHIVED_SCORES);
    }

    pub fn entries(&self) -> &[ScoreSubmission] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn best(&self) -> Option<&ScoreSubmission> {
        self.entries.first()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse a stored archive, re-applying order and cap
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut archive: Self = serde_json::from_str(json)?;
        archive.normalize();
        Ok(archive)
    }
}
