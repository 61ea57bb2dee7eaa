//! Turns resume markdown into typed display blocks.
//!
//! The AI service is constrained to a tiny markdown dialect: `#`/`##`/`###`
//! headers, `-`/`*` bullets and `**bold**` spans. A handful of prefix checks
//! covers it, so there is no full markdown parser here and none should be
//! added. Each source line becomes exactly one block, annotated with the
//! diff flag from [`crate::diff`] and with keyword emphasis spans.

use crate::diff::compute_line_diff;
use regex::{Regex, RegexBuilder};
use std::sync::LazyLock;

static BOLD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("bold pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    H1,
    H2,
    H3,
    Bullet,
    Blank,
    Paragraph,
}

/// A contiguous text run with uniform inline emphasis. Bold and keyword
/// emphasis are independent; a span can carry both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub bold: bool,
    pub keyword_match: bool,
}

/// One renderable unit derived from a single source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayBlock {
    pub kind: BlockKind,
    pub spans: Vec<Span>,
    pub changed: bool,
}

/// Render `content` into display blocks, flagging lines changed relative to
/// `previous_content` and emphasizing `keywords`.
///
/// When there is no previous version, or it equals the current content
/// exactly, the differ is skipped and every line is unchanged.
pub fn render_blocks(
    content: &str,
    previous_content: Option<&str>,
    keywords: &[String],
) -> Vec<DisplayBlock> {
    let annotated: Vec<(String, bool)> = match previous_content {
        None => content.split('\n').map(|l| (l.to_string(), false)).collect(),
        Some(prev) if prev == content => {
            content.split('\n').map(|l| (l.to_string(), false)).collect()
        }
        Some(prev) => compute_line_diff(prev, content)
            .into_iter()
            .map(|l| (l.text, l.changed))
            .collect(),
    };

    let keyword_re = build_keyword_regex(keywords);

    annotated
        .into_iter()
        .map(|(line, changed)| classify_line(&line, changed, keyword_re.as_ref()))
        .collect()
}

/// Whole-word, case-insensitive matcher over the keyword list. Keywords are
/// escaped so regex metacharacters in them stay literal.
fn build_keyword_regex(keywords: &[String]) -> Option<Regex> {
    let escaped: Vec<String> = keywords
        .iter()
        .filter(|k| !k.trim().is_empty())
        .map(|k| regex::escape(k))
        .collect();
    if escaped.is_empty() {
        return None;
    }
    RegexBuilder::new(&format!(r"\b({})\b", escaped.join("|")))
        .case_insensitive(true)
        .build()
        .ok()
}

fn classify_line(line: &str, changed: bool, keyword_re: Option<&Regex>) -> DisplayBlock {
    let trimmed = line.trim_start();

    let (kind, text) = if let Some(rest) = line.strip_prefix("# ") {
        (BlockKind::H1, rest)
    } else if let Some(rest) = line.strip_prefix("## ") {
        (BlockKind::H2, rest)
    } else if let Some(rest) = line.strip_prefix("### ") {
        (BlockKind::H3, rest)
    } else if let Some(rest) = trimmed.strip_prefix("- ") {
        (BlockKind::Bullet, rest)
    } else if let Some(rest) = trimmed.strip_prefix("* ") {
        (BlockKind::Bullet, rest)
    } else if line.trim().is_empty() {
        return DisplayBlock {
            kind: BlockKind::Blank,
            spans: Vec::new(),
            changed,
        };
    } else {
        (BlockKind::Paragraph, line)
    };

    DisplayBlock {
        kind,
        spans: tokenize(text, keyword_re),
        changed,
    }
}

/// Split on `**bold**` runs first, then keyword matches inside each run.
fn tokenize(text: &str, keyword_re: Option<&Regex>) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut cursor = 0;
    for m in BOLD_RE.find_iter(text) {
        push_keyword_spans(&text[cursor..m.start()], false, keyword_re, &mut spans);
        // Strip the surrounding ** markers.
        push_keyword_spans(
            &text[m.start() + 2..m.end() - 2],
            true,
            keyword_re,
            &mut spans,
        );
        cursor = m.end();
    }
    push_keyword_spans(&text[cursor..], false, keyword_re, &mut spans);
    spans
}

fn push_keyword_spans(
    segment: &str,
    bold: bool,
    keyword_re: Option<&Regex>,
    out: &mut Vec<Span>,
) {
    if segment.is_empty() {
        return;
    }
    let Some(re) = keyword_re else {
        out.push(Span {
            text: segment.to_string(),
            bold,
            keyword_match: false,
        });
        return;
    };

    let mut cursor = 0;
    for m in re.find_iter(segment) {
        if m.start() > cursor {
            out.push(Span {
                text: segment[cursor..m.start()].to_string(),
                bold,
                keyword_match: false,
            });
        }
        out.push(Span {
            text: m.as_str().to_string(),
            bold,
            keyword_match: true,
        });
        cursor = m.end();
    }
    if cursor < segment.len() {
        out.push(Span {
            text: segment[cursor..].to_string(),
            bold,
            keyword_match: false,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_keywords() -> Vec<String> {
        Vec::new()
    }

    fn plain_text(block: &DisplayBlock) -> String {
        block.spans.iter().map(|s| s.text.as_str()).collect()
    }

    #[test]
    fn classifies_every_block_kind() {
        let content = "# Jane Doe\n## Experience\n### Acme Corp\n- Shipped things\n* Also this\n\nA plain paragraph";
        let blocks = render_blocks(content, None, &no_keywords());
        let kinds: Vec<BlockKind> = blocks.iter().map(|b| b.kind).collect();
        assert_eq!(
            kinds,
            vec![
                BlockKind::H1,
                BlockKind::H2,
                BlockKind::H3,
                BlockKind::Bullet,
                BlockKind::Bullet,
                BlockKind::Blank,
                BlockKind::Paragraph,
            ]
        );
    }

    #[test]
    fn header_marker_is_stripped() {
        let blocks = render_blocks("## Experience", None, &no_keywords());
        assert_eq!(blocks[0].kind, BlockKind::H2);
        assert_eq!(plain_text(&blocks[0]), "Experience");
    }

    #[test]
    fn indented_bullet_marker_is_stripped() {
        let blocks = render_blocks("  - Led migrations", None, &no_keywords());
        assert_eq!(blocks[0].kind, BlockKind::Bullet);
        assert_eq!(plain_text(&blocks[0]), "Led migrations");
    }

    #[test]
    fn bold_spans_are_extracted() {
        let blocks = render_blocks("Led **major** launches", None, &no_keywords());
        let spans = &blocks[0].spans;
        assert_eq!(spans.len(), 3);
        assert_eq!(spans[0].text, "Led ");
        assert!(!spans[0].bold);
        assert_eq!(spans[1].text, "major");
        assert!(spans[1].bold);
        assert_eq!(spans[2].text, " launches");
        assert!(!spans[2].bold);
    }

    #[test]
    fn keywords_match_inside_bold_runs() {
        let keywords = vec!["Python".to_string()];
        let blocks = render_blocks("**Led Python team**", None, &keywords);
        let spans = &blocks[0].spans;
        assert_eq!(spans.len(), 3);
        assert!(spans.iter().all(|s| s.bold));
        assert_eq!(spans[0].text, "Led ");
        assert!(!spans[0].keyword_match);
        assert_eq!(spans[1].text, "Python");
        assert!(spans[1].keyword_match);
        assert_eq!(spans[2].text, " team");
        assert!(!spans[2].keyword_match);
    }

    #[test]
    fn keywords_require_word_boundaries() {
        let keywords = vec!["Go".to_string()];
        let blocks = render_blocks("I love Google", None, &keywords);
        assert!(blocks[0].spans.iter().all(|s| !s.keyword_match));
    }

    #[test]
    fn keyword_matching_is_case_insensitive() {
        let keywords = vec!["kubernetes".to_string()];
        let blocks = render_blocks("Deployed to Kubernetes daily", None, &keywords);
        let matched: Vec<&Span> = blocks[0].spans.iter().filter(|s| s.keyword_match).collect();
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].text, "Kubernetes");
    }

    #[test]
    fn regex_metacharacters_in_keywords_stay_literal() {
        let keywords = vec!["(SQL)".to_string()];
        // Must not panic or be treated as a regex group.
        let blocks = render_blocks("Knows (SQL) and more", None, &keywords);
        assert_eq!(blocks.len(), 1);
    }

    #[test]
    fn empty_keyword_list_disables_highlighting() {
        let blocks = render_blocks("Rust everywhere", None, &no_keywords());
        assert_eq!(blocks[0].spans.len(), 1);
        assert!(!blocks[0].spans[0].keyword_match);
    }

    #[test]
    fn changed_flags_come_from_the_diff() {
        let old = "Summary\nBuilt APIs";
        let new = "Summary\nBuilt scalable APIs";
        let blocks = render_blocks(new, Some(old), &no_keywords());
        assert!(!blocks[0].changed);
        assert!(blocks[1].changed);
    }

    #[test]
    fn blank_lines_keep_their_changed_flag() {
        let blocks = render_blocks("a\n\nb", Some("different"), &no_keywords());
        assert_eq!(blocks[1].kind, BlockKind::Blank);
        assert!(blocks[1].changed);
    }

    #[test]
    fn identical_previous_content_short_circuits() {
        let content = "# Same\n- line";
        let blocks = render_blocks(content, Some(content), &no_keywords());
        assert!(blocks.iter().all(|b| !b.changed));
    }

    #[test]
    fn missing_previous_content_marks_nothing_changed() {
        let blocks = render_blocks("fresh\ncontent", None, &no_keywords());
        assert!(blocks.iter().all(|b| !b.changed));
    }

    #[test]
    fn empty_content_yields_one_blank_block() {
        let blocks = render_blocks("", None, &no_keywords());
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].kind, BlockKind::Blank);
    }

    #[test]
    fn empty_content_with_previous_yields_nothing() {
        let blocks = render_blocks("", Some("old text"), &no_keywords());
        assert!(blocks.is_empty());
    }

    #[test]
    fn deterministic_across_calls() {
        let keywords = vec!["Rust".to_string()];
        let a = render_blocks("## Skills\n- **Rust**", Some("## Skills"), &keywords);
        let b = render_blocks("## Skills\n- **Rust**", Some("## Skills"), &keywords);
        assert_eq!(a, b);
    }
}
