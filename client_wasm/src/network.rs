//! Scoreboard HTTP calls

use proto::{parse_leaderboard, CommentSubmission, LeaderboardEntry, SubmitResponse};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

/// `base` joined with `path`, tolerating a trailing slash on `base`
pub fn endpoint(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path)
}

fn describe(err: JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}

async fn send(url: &str, method: &str, body: Option<&str>) -> Result<String, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

    let init = RequestInit::new();
    init.set_method(method);
    if let Some(body) = body {
        init.set_body(&JsValue::from_str(body));
    }
    let request = Request::new_with_str_and_init(url, &init)?;
    request.headers().set("Content-Type", "application/json")?;

    let response: Response = JsFuture::from(window.fetch_with_request(&request))
        .await?
        .dyn_into()?;
    if !response.ok() {
        return Err(JsValue::from_str(&format!("HTTP {}", response.status())));
    }
    let text = JsFuture::from(response.text()?).await?;
    text.as_string()
        .ok_or_else(|| JsValue::from_str("response body is not text"))
}

/// POST an encoded score submission
pub async fn post_score(base: &str, body: &str) -> Result<SubmitResponse, String> {
    let text = send(&endpoint(base, "scores"), "POST", Some(body))
        .await
        .map_err(describe)?;
    SubmitResponse::from_json(&text).map_err(|e| e.to_string())
}

pub async fn fetch_leaderboard(base: &str) -> Result<Vec<LeaderboardEntry>, String> {
    let text = send(&endpoint(base, "scores"), "GET", None)
        .await
        .map_err(describe)?;
    parse_leaderboard(&text).map_err(|e| e.to_string())
}

pub async fn post_comment(base: &str, comment: &CommentSubmission) -> Result<SubmitResponse, String> {
    let body = comment.to_json().map_err(|e| e.to_string())?;
    let text = send(&endpoint(base, "comments"), "POST", Some(&body))
        .await
        .map_err(describe)?;
    SubmitResponse::from_json(&text).map_err(|e| e.to_string())
}
