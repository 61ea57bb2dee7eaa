//! Before/After extraction from free-text improvement recommendations.
//!
//! The AI is asked to phrase fixable suggestions as "...intro... Before: ...
//! After: ...", but that shape is not guaranteed. Parsing is best-effort:
//! when the markers are absent the raw text is returned untouched.

use regex::Regex;
use std::sync::LazyLock;

static BOLD_BEFORE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:\*\*|__)(before:?)(?:\*\*|__)").expect("valid pattern"));
static BOLD_AFTER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:\*\*|__)(after:?)(?:\*\*|__)").expect("valid pattern"));
static EXAMPLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)(.*?)(?:\n|\s|^)Before:\s*(.*?)(?:\n|\s)After:\s*(.*)")
        .expect("valid pattern")
});

/// A recommendation, either with an extracted rewrite example or as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recommendation {
    Parsed {
        intro: String,
        before: String,
        after: String,
    },
    Plain(String),
}

/// Extract a `Before:` / `After:` rewrite example from a recommendation.
pub fn parse_recommendation(text: &str) -> Recommendation {
    // The markers themselves are sometimes bolded; normalize first.
    let normalized = BOLD_BEFORE_RE.replace_all(text, "Before:");
    let normalized = BOLD_AFTER_RE.replace_all(&normalized, "After:");

    match EXAMPLE_RE.captures(&normalized) {
        Some(caps) => Recommendation::Parsed {
            intro: caps[1].trim().to_string(),
            before: clean_example(&caps[2]),
            after: clean_example(&caps[3]),
        },
        None => Recommendation::Plain(normalized.into_owned()),
    }
}

/// Trim whitespace and a single layer of surrounding quotes.
fn clean_example(text: &str) -> String {
    let mut t = text.trim();
    t = t.strip_prefix(['\'', '"']).unwrap_or(t);
    t = t.strip_suffix(['\'', '"']).unwrap_or(t);
    t.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_before_and_after() {
        let text = "Your bullet is vague.\nBefore: Managed servers\nAfter: Cut deploy time 40% across 200 servers";
        match parse_recommendation(text) {
            Recommendation::Parsed {
                intro,
                before,
                after,
            } => {
                assert_eq!(intro, "Your bullet is vague.");
                assert_eq!(before, "Managed servers");
                assert_eq!(after, "Cut deploy time 40% across 200 servers");
            }
            other => panic!("expected parsed example, got {:?}", other),
        }
    }

    #[test]
    fn normalizes_bolded_markers() {
        let text = "Tighten this. **Before:** weak line **After:** strong line";
        match parse_recommendation(text) {
            Recommendation::Parsed { before, after, .. } => {
                assert_eq!(before, "weak line");
                assert_eq!(after, "strong line");
            }
            other => panic!("expected parsed example, got {:?}", other),
        }
    }

    #[test]
    fn strips_surrounding_quotes() {
        let text = "Before: \"Managed team\" After: \"Led a team of 6\"";
        match parse_recommendation(text) {
            Recommendation::Parsed { before, after, .. } => {
                assert_eq!(before, "Managed team");
                assert_eq!(after, "Led a team of 6");
            }
            other => panic!("expected parsed example, got {:?}", other),
        }
    }

    #[test]
    fn passes_through_text_without_markers() {
        let text = "Add more metrics to your experience section.";
        assert_eq!(
            parse_recommendation(text),
            Recommendation::Plain(text.to_string())
        );
    }
}
