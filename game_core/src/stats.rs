//! Per-session statistics, handed to the score collaborator at game over.

use crate::components::PowerUp;
use serde::{Deserialize, Serialize};

/// Tone class of a reading: its trailing digit when that digit is 1–6
pub fn tone_of(reading: &str) -> Option<u8> {
    reading
        .chars()
        .last()
        .and_then(|c| c.to_digit(10))
        .filter(|d| (1..=6).contains(d))
        .map(|d| d as u8)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    pub started_at: f64,
    pub ended_at: Option<f64>,
    pub final_score: u64,
    pub max_lives: u32,
    pub max_multiplier: u32,
    pub red_collected: u32,
    pub yellow_collected: u32,
    pub blue_collected: u32,
    pub green_collected: u32,
    pub balls_burst: u32,
    pub balls_clicked: u32,
    pub tone_correct: [u32; 6],
    pub repeated_correct: u32,
    #[serde(skip)]
    last_correct: Option<String>,
}

impl SessionStats {
    pub fn new(started_at: f64, lives: u32, multiplier: u32) -> Self {
        Self {
            started_at,
            ended_at: None,
            final_score: 0,
            max_lives: lives,
            max_multiplier: multiplier,
            red_collected: 0,
            yellow_collected: 0,
            blue_collected: 0,
            green_collected: 0,
            balls_burst: 0,
            balls_clicked: 0,
            tone_correct: [0; 6],
            repeated_correct: 0,
            last_correct: None,
        }
    }

    /// A ball burst by typing `reading`
    pub fn record_match(&mut self, reading: &str, powerup: Option<PowerUp>) {
        self.balls_burst += 1;
        self.record_powerup(powerup);
        if let Some(tone) = tone_of(reading) {
            self.tone_correct[tone as usize - 1] += 1;
        }
        // Compares against the last successful reading only; misses in
        // between do not break the streak.
        if self.last_correct.as_deref() == Some(reading) {
            self.repeated_correct += 1;
        }
        self.last_correct = Some(reading.to_string());
    }

    /// A ball burst by pointer while click-to-burst is active
    pub fn record_click(&mut self, powerup: Option<PowerUp>) {
        self.balls_burst += 1;
        self.balls_clicked += 1;
        self.record_powerup(powerup);
    }

    fn record_powerup(&mut self, powerup: Option<PowerUp>) {
        match powerup {
            Some(PowerUp::Red) => self.red_collected += 1,
            Some(PowerUp::Yellow) => self.yellow_collected += 1,
            Some(PowerUp::Blue) => self.blue_collected += 1,
            Some(PowerUp::Green) => self.green_collected += 1,
            None => {}
        }
    }

    /// Track the highest lives and multiplier seen
    pub fn observe(&mut self, lives: u32, multiplier: u32) {
        self.max_lives = self.max_lives.max(lives);
        self.max_multiplier = self.max_multiplier.max(multiplier);
    }

    pub fn finish(&mut self, ended_at: f64, final_score: u64) {
        self.ended_at = Some(ended_at);
        self.final_score = final_score;
    }

    pub fn is_finished(&self) -> bool {
        self.ended_at.is_some()
    }

    pub fn duration_ms(&self) -> Option<f64> {
        self.ended_at.map(|end| (end - self.started_at).max(0.0))
    }

    pub fn typed_matches(&self) -> u32 {
        self.balls_burst - self.balls_clicked
    }

    pub fn tone_total(&self) -> u32 {
        self.tone_correct.iter().sum()
    }

    pub fn tone(&self, tone: u8) -> u32 {
        match tone {
            1..=6 => self.tone_correct[tone as usize - 1],
            _ => 0,
        }
    }
}
