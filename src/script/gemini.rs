use reqwest::blocking::Client;
use serde_json::json;

use crate::foundation::error::{ReelError, ReelResult};
use crate::net::ensure_success;
use crate::script::TextGenerator;

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Text generation through the Gemini `generateContent` REST endpoint.
///
/// A missing API key is not checked up front: the call fails and the script source falls back
/// to its template, the same as any other generation failure.
pub struct GeminiGenerator {
    client: Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl GeminiGenerator {
    pub fn new(client: Client, api_key: Option<String>, model: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            model: model.into(),
            base_url: GEMINI_BASE_URL.to_owned(),
        }
    }

    /// Point the client at a different API root (proxies, test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[derive(serde::Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(serde::Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(serde::Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(serde::Deserialize)]
struct Part {
    text: Option<String>,
}

impl TextGenerator for GeminiGenerator {
    fn generate(&self, prompt: &str) -> ReelResult<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| ReelError::credentials("GEMINI_API_KEY is not set"))?;

        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        );
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
        });

        let res = self
            .client
            .post(url)
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .map_err(|e| ReelError::service(format!("gemini request failed: {e}")))?;
        let res = ensure_success(res, "gemini generateContent")?;

        let parsed: GenerateResponse = res
            .json()
            .map_err(|e| ReelError::service(format!("gemini response parse failed: {e}")))?;
        extract_text(parsed)
    }
}

fn extract_text(resp: GenerateResponse) -> ReelResult<String> {
    let content = resp
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .ok_or_else(|| ReelError::service("gemini returned no candidates"))?;
    let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
    if text.trim().is_empty() {
        return Err(ReelError::service("gemini returned an empty completion"));
    }
    Ok(text)
}
