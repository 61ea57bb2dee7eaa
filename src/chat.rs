//! Post-processing of streamed chat responses.
//!
//! The chat model embeds two machine-readable signals in its prose: a full
//! replacement resume between `<updated_resume>` tags and a rescore as
//! `[[SCORE:NN]]`. The assembler accumulates chunks, keeps the display text
//! free of both markers, and surfaces each signal exactly once. The block
//! renderer never sees partial chunks; the app hands it completed snapshots.

use regex::Regex;
use std::sync::LazyLock;

/// Replacement resumes shorter than this are treated as noise (e.g. the
/// model echoing the tags around a one-liner).
const MIN_RESUME_CHARS: usize = 50;

static RESUME_BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<updated_resume>\s*(.*?)\s*</updated_resume>").expect("valid pattern")
});
static RESUME_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</?updated_resume>").expect("valid pattern"));
static SCORE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[SCORE:(\d+)\]\]").expect("valid pattern"));

/// Accumulates one streamed chat response.
#[derive(Debug, Default)]
pub struct StreamAssembler {
    full_text: String,
    resume_emitted: bool,
}

impl StreamAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk. Returns the replacement resume the first time a
    /// complete, non-trivial `<updated_resume>` block is present.
    pub fn push(&mut self, chunk: &str) -> Option<String> {
        self.full_text.push_str(chunk);
        if self.resume_emitted {
            return None;
        }
        let resume = RESUME_BLOCK_RE
            .captures(&self.full_text)
            .map(|caps| caps[1].trim().to_string())
            .filter(|r| r.len() > MIN_RESUME_CHARS)?;
        self.resume_emitted = true;
        Some(resume)
    }

    /// The accumulated text with resume tags and score markers removed.
    /// Resume content itself stays visible in the transcript.
    pub fn display_text(&self) -> String {
        let stripped = RESUME_TAG_RE.replace_all(&self.full_text, "");
        SCORE_RE.replace_all(&stripped, "").into_owned()
    }

    /// The rescore signal, if the response carried one.
    pub fn score(&self) -> Option<u32> {
        SCORE_RE
            .captures(&self.full_text)
            .and_then(|caps| caps[1].parse().ok())
    }
}
