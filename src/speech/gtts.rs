use std::io::Write as _;
use std::path::Path;

use reqwest::blocking::Client;

use crate::foundation::artifact::ensure_parent_dir;
use crate::foundation::error::{ReelError, ReelResult};
use crate::net::ensure_success;
use crate::speech::SpeechSynthesizer;

const TTS_URL: &str = "https://translate.google.com/translate_tts";

/// The endpoint rejects requests longer than this many characters.
pub const MAX_CHUNK_CHARS: usize = 100;

/// Speech through the Google Translate TTS endpoint.
///
/// Long narration is split into word-aligned chunks, each fetched as MP3; the MP3 streams are
/// concatenated into one file.
pub struct GoogleTranslateTts {
    client: Client,
    language: String,
    slow: bool,
}

impl GoogleTranslateTts {
    pub fn new(client: Client, language: impl Into<String>, slow: bool) -> Self {
        Self {
            client,
            language: language.into(),
            slow,
        }
    }

    fn fetch_chunk(&self, chunk: &str, idx: usize, total: usize) -> ReelResult<Vec<u8>> {
        let speed = if self.slow { "0.24" } else { "1" };
        let total = total.to_string();
        let idx_s = idx.to_string();
        let textlen = chunk.chars().count().to_string();
        let res = self
            .client
            .get(TTS_URL)
            .query(&[
                ("ie", "UTF-8"),
                ("q", chunk),
                ("tl", self.language.as_str()),
                ("total", total.as_str()),
                ("idx", idx_s.as_str()),
                ("textlen", textlen.as_str()),
                ("client", "tw-ob"),
                ("ttsspeed", speed),
            ])
            .send()
            .map_err(|e| ReelError::service(format!("tts request failed: {e}")))?;
        let res = ensure_success(res, "tts chunk")?;
        let bytes = res
            .bytes()
            .map_err(|e| ReelError::service(format!("failed to read tts response: {e}")))?;
        if bytes.is_empty() {
            return Err(ReelError::service(format!("tts chunk {idx} returned no audio")));
        }
        Ok(bytes.to_vec())
    }
}

impl SpeechSynthesizer for GoogleTranslateTts {
    fn synthesize(&self, text: &str, out_path: &Path) -> ReelResult<()> {
        let chunks = split_tts_chunks(text, MAX_CHUNK_CHARS);
        if chunks.is_empty() {
            return Err(ReelError::validation("nothing to synthesize"));
        }

        ensure_parent_dir(out_path)?;
        let mut f = std::fs::File::create(out_path).map_err(|e| {
            ReelError::synthesis(format!(
                "failed to create audio file '{}': {e}",
                out_path.display()
            ))
        })?;

        let total = chunks.len();
        for (idx, chunk) in chunks.iter().enumerate() {
            tracing::debug!(idx, total, chars = chunk.chars().count(), "fetching tts chunk");
            let audio = self.fetch_chunk(chunk, idx, total)?;
            f.write_all(&audio).map_err(|e| {
                ReelError::synthesis(format!(
                    "failed to write audio file '{}': {e}",
                    out_path.display()
                ))
            })?;
        }
        f.flush()
            .map_err(|e| ReelError::synthesis(format!("failed to flush audio file: {e}")))?;
        Ok(())
    }
}

/// Split `text` into chunks of at most `max_chars` characters, breaking between words.
///
/// Words longer than `max_chars` are hard-split.
pub fn split_tts_chunks(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut out = Vec::new();
    let mut cur = String::new();
    let mut cur_len = 0usize;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > max_chars {
            if cur_len > 0 {
                out.push(std::mem::take(&mut cur));
                cur_len = 0;
            }
            let rest = word.split_off(max_chars);
            out.push(word.into_iter().collect());
            word = rest;
        }
        if word.is_empty() {
            continue;
        }

        let extra = if cur_len == 0 { word.len() } else { word.len() + 1 };
        if cur_len + extra > max_chars {
            out.push(std::mem::take(&mut cur));
            cur_len = 0;
        }
        if cur_len > 0 {
            cur.push(' ');
            cur_len += 1;
        }
        cur.extend(word.iter());
        cur_len += word.len();
    }
    if cur_len > 0 {
        out.push(cur);
    }
    out
}
