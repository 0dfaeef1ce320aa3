//! Score hand-off for the browser: local archive plus fire-and-forget POST

use game_core::{ScoreSink, SessionStats, SubmitError, SubmitReceipt};
use proto::ScoreSubmission;
use wasm_bindgen::JsValue;

use crate::{network, storage};

pub struct BrowserScoreSink {
    api_base: Option<String>,
    player_name: String,
    /// Epoch ms at which the page clock reads zero
    time_origin: f64,
}

impl BrowserScoreSink {
    pub fn new(api_base: Option<String>, player_name: String, time_origin: f64) -> Self {
        Self {
            api_base,
            player_name,
            time_origin,
        }
    }

    fn iso(&self, clock_ms: f64) -> String {
        js_sys::Date::new(&JsValue::from_f64(self.time_origin + clock_ms))
            .to_iso_string()
            .into()
    }

    fn submission(&self, stats: &SessionStats) -> ScoreSubmission {
        let ended_at = stats.ended_at.unwrap_or(stats.started_at);
        ScoreSubmission::from_stats(
            &self.player_name,
            stats,
            self.iso(stats.started_at),
            self.iso(ended_at),
        )
    }
}

impl ScoreSink for BrowserScoreSink {
    /// Returns a pending receipt at once; the outcome is only logged
    fn submit_score(&mut self, stats: &SessionStats) -> Result<SubmitReceipt, SubmitError> {
        let Some(base) = self.api_base.clone() else {
            return Err(SubmitError::Unavailable("no scoreboard configured".into()));
        };
        let body = self
            .submission(stats)
            .to_json()
            .map_err(|e| SubmitError::Rejected(e.to_string()))?;

        wasm_bindgen_futures::spawn_local(async move {
            match network::post_score(&base, &body).await {
                Ok(response) if response.success => {
                    let receipt: SubmitReceipt = response.into();
                    log::info!("Score saved with id {:?}", receipt.id);
                }
                Ok(response) => log::warn!(
                    "Scoreboard declined score: {}",
                    response.message.unwrap_or_default()
                ),
                Err(e) => log::warn!("Score submission failed: {}", e),
            }
        });
        Ok(SubmitReceipt::default())
    }

    fn retain_locally(&mut self, stats: &SessionStats) {
        storage::archive_score(self.submission(stats));
    }
}
