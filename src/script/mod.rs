//! Narration script generation.

mod gemini;

pub use gemini::GeminiGenerator;

use std::path::Path;

use crate::foundation::artifact::ensure_parent_dir;
use crate::foundation::error::{ReelError, ReelResult};
use crate::foundation::outcome::Acquired;

/// External text-generation service.
pub trait TextGenerator {
    /// Return the raw text completion for `prompt`.
    fn generate(&self, prompt: &str) -> ReelResult<String>;
}

/// One spoken line of the narration. Always non-empty and trimmed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptLine(String);

impl ScriptLine {
    pub fn new(text: impl AsRef<str>) -> ReelResult<Self> {
        let t = text.as_ref().trim();
        if t.is_empty() {
            return Err(ReelError::validation("script line must be non-empty"));
        }
        Ok(Self(t.to_owned()))
    }

    pub fn text(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ScriptLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ordered, non-empty sequence of script lines. Order is spoken order and visual order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Script {
    lines: Vec<ScriptLine>,
}

impl Script {
    pub fn new(lines: Vec<ScriptLine>) -> ReelResult<Self> {
        if lines.is_empty() {
            return Err(ReelError::validation("script must contain at least one line"));
        }
        Ok(Self { lines })
    }

    /// Build a script from raw strings, trimming each and skipping blank ones.
    pub fn from_texts<I, S>(texts: I) -> ReelResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let lines = texts
            .into_iter()
            .filter(|t| !t.as_ref().trim().is_empty())
            .map(ScriptLine::new)
            .collect::<ReelResult<Vec<_>>>()?;
        Self::new(lines)
    }

    pub fn lines(&self) -> &[ScriptLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Narration text: every line in order, joined by single spaces.
    pub fn full_text(&self) -> String {
        self.lines
            .iter()
            .map(ScriptLine::text)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Human-readable form: `1. line`, entries separated by a blank line.
    pub fn to_numbered_text(&self) -> String {
        self.lines
            .iter()
            .enumerate()
            .map(|(i, l)| format!("{}. {}", i + 1, l))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    pub fn write_numbered(&self, path: &Path) -> ReelResult<()> {
        use anyhow::Context as _;
        ensure_parent_dir(path)?;
        std::fs::write(path, self.to_numbered_text())
            .with_context(|| format!("failed to write script '{}'", path.display()))?;
        Ok(())
    }
}

/// Script tagged with whether it came from the generator or the fallback template.
pub type ScriptOutcome = Acquired<Script>;

/// Produces the narration script for a topic, never failing.
pub struct ScriptSource<'a> {
    generator: &'a dyn TextGenerator,
}

impl<'a> ScriptSource<'a> {
    pub fn new(generator: &'a dyn TextGenerator) -> Self {
        Self { generator }
    }

    /// Generate a script of short spoken lines about `topic`.
    ///
    /// Generator errors and empty responses degrade to [`fallback_script`].
    #[tracing::instrument(skip(self))]
    pub fn generate(&self, topic: &str, target_duration_secs: f64) -> ScriptOutcome {
        let prompt = build_prompt(topic, target_duration_secs);
        let attempt = self
            .generator
            .generate(&prompt)
            .and_then(|raw| parse_script_response(&raw));

        match attempt {
            Ok(script) => {
                tracing::info!(lines = script.len(), "script generated");
                Acquired::Fetched(script)
            }
            Err(e) => {
                tracing::warn!(error = %e, "script generation failed, using template script");
                Acquired::fallback(fallback_script(topic), e.to_string())
            }
        }
    }
}

/// Prompt asking for label-free, standalone spoken lines totalling about `target_secs`.
pub fn build_prompt(topic: &str, target_secs: f64) -> String {
    let secs = target_secs.round() as u64;
    format!(
        "Create a script for a {secs}-second YouTube short about {topic}.\n\
         - Write in a natural, engaging tone as if speaking to a friend\n\
         - Keep each segment 1-2 sentences maximum\n\
         - Make it informative but concise\n\
         - Don't use any labels like 'Visual:' or 'Narrator:'\n\
         - Each line should be a complete thought that can be visualized\n\
         - Total script should be around {secs} seconds when spoken naturally\n\
         \n\
         Example format:\n\
         The US Open is one of tennis's most prestigious tournaments.\n\
         Held annually in New York, it attracts the world's top players."
    )
}

/// Split a raw completion into script lines: one per line break, trimmed, blanks dropped.
pub fn parse_script_response(raw: &str) -> ReelResult<Script> {
    Script::from_texts(raw.lines())
        .map_err(|_| ReelError::service("text generation returned no usable lines"))
}

/// Fixed four-line script used when generation fails.
pub fn fallback_script(topic: &str) -> Script {
    let topic = topic.trim();
    let lines = [
        format!("Here's an interesting quote about {topic}."),
        "The greatest wisdom comes from experience.".to_owned(),
        "Philosophers have pondered this for centuries.".to_owned(),
        "What can we learn from their insights?".to_owned(),
    ];
    Script {
        lines: lines.into_iter().map(ScriptLine).collect(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/script/source.rs"]
mod tests;
