//! Local fallback archive in `localStorage`

use proto::{ScoreArchive, ScoreSubmission};
use web_sys::Storage;

const SCORES_KEY: &str = "jyutpingScores";

fn local_storage() -> Option<Storage> {
    web_sys::window()?.local_storage().ok()?
}

/// Stored archive, or an empty one if nothing usable is stored
pub fn load_archive() -> ScoreArchive {
    let Some(json) = local_storage().and_then(|s| s.get_item(SCORES_KEY).ok().flatten()) else {
        return ScoreArchive::new();
    };
    match ScoreArchive::from_json(&json) {
        Ok(archive) => archive,
        Err(e) => {
            log::warn!("Discarding unreadable local scores: {}", e);
            ScoreArchive::new()
        }
    }
}

pub fn archive_score(submission: ScoreSubmission) {
    let Some(storage) = local_storage() else {
        log::warn!("localStorage unavailable, score not kept locally");
        return;
    };
    let mut archive = load_archive();
    archive.push(submission);
    match archive.to_json() {
        Ok(json) => {
            if storage.set_item(SCORES_KEY, &json).is_err() {
                log::warn!("Failed to write local scores");
            }
        }
        Err(e) => log::warn!("Failed to encode local scores: {}", e),
    }
}
