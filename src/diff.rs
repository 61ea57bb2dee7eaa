//! Line-based diff between two versions of the resume text.
//!
//! The viewer only ever shows the new text, so the diff answers a single
//! question per line: does this line carry over from the previous version,
//! or was it added/modified? Lines are compared with trailing whitespace
//! stripped, since AI rewrites routinely leave invisible trailing spaces
//! behind.

/// One line of the new text, flagged when it has no match in the old text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffLine {
    pub text: String,
    pub changed: bool,
}

/// Compute a line diff of `new_text` against `old_text` via a Longest Common
/// Subsequence alignment. Returns one entry per line of `new_text`, in order.
///
/// Edge cases:
/// - both inputs empty: empty result
/// - empty `old_text`: every line of `new_text` is changed
/// - empty `new_text`: empty result (there are no lines to annotate)
pub fn compute_line_diff(old_text: &str, new_text: &str) -> Vec<DiffLine> {
    if new_text.is_empty() {
        return Vec::new();
    }
    if old_text.is_empty() {
        return split_lines(new_text)
            .into_iter()
            .map(|line| DiffLine {
                text: line,
                changed: true,
            })
            .collect();
    }

    let old_lines = split_lines(old_text);
    let new_lines = split_lines(new_text);

    let m = old_lines.len();
    let n = new_lines.len();

    // dp[i][j] = length of the LCS of old_lines[..i] and new_lines[..j].
    // Resumes are at most a few hundred lines, so the quadratic table
    // stays small.
    let mut dp = vec![vec![0usize; n + 1]; m + 1];
    for i in 1..=m {
        for j in 1..=n {
            if old_lines[i - 1].trim_end() == new_lines[j - 1].trim_end() {
                dp[i][j] = dp[i - 1][j - 1] + 1;
            } else {
                dp[i][j] = dp[i - 1][j].max(dp[i][j - 1]);
            }
        }
    }

    // Backtrack to find which new lines belong to the LCS (unchanged).
    let mut unchanged = vec![false; n];
    let mut i = m;
    let mut j = n;
    while i > 0 && j > 0 {
        if old_lines[i - 1].trim_end() == new_lines[j - 1].trim_end() {
            unchanged[j - 1] = true;
            i -= 1;
            j -= 1;
        } else if dp[i - 1][j] > dp[i][j - 1] {
            // Line only exists in the old text (deletion).
            i -= 1;
        } else {
            // Line only exists in the new text (addition/modification).
            j -= 1;
        }
    }

    new_lines
        .into_iter()
        .zip(unchanged)
        .map(|(text, kept)| DiffLine {
            text,
            changed: !kept,
        })
        .collect()
}

/// Split into lines after collapsing Windows line endings.
fn split_lines(text: &str) -> Vec<String> {
    text.replace("\r\n", "\n")
        .split('\n')
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn changed_flags(diff: &[DiffLine]) -> Vec<bool> {
        diff.iter().map(|l| l.changed).collect()
    }

    #[test]
    fn both_empty_yields_empty() {
        assert!(compute_line_diff("", "").is_empty());
    }

    #[test]
    fn empty_new_yields_empty() {
        assert!(compute_line_diff("anything\nat all", "").is_empty());
    }

    #[test]
    fn empty_old_marks_every_line_changed() {
        let diff = compute_line_diff("", "a\nb\nc");
        assert_eq!(diff.len(), 3);
        assert_eq!(
            diff,
            vec![
                DiffLine {
                    text: "a".to_string(),
                    changed: true
                },
                DiffLine {
                    text: "b".to_string(),
                    changed: true
                },
                DiffLine {
                    text: "c".to_string(),
                    changed: true
                },
            ]
        );
    }

    #[test]
    fn identical_inputs_mark_nothing_changed() {
        let text = "# Jane Doe\n\n## Experience\n- Built things";
        let diff = compute_line_diff(text, text);
        assert_eq!(diff.len(), 4);
        assert!(diff.iter().all(|l| !l.changed));
    }

    #[test]
    fn length_matches_new_line_count() {
        let old = "one\ntwo";
        let new = "one\ntwo\nthree\nfour";
        let diff = compute_line_diff(old, new);
        assert_eq!(diff.len(), new.split('\n').count());
    }

    #[test]
    fn trailing_whitespace_is_ignored() {
        let diff = compute_line_diff("foo   \n", "foo\n");
        assert_eq!(diff[0].text, "foo");
        assert!(!diff[0].changed, "trailing spaces must not flag the line");
    }

    #[test]
    fn windows_line_endings_are_normalized() {
        let diff = compute_line_diff("a\r\nb", "a\nb");
        assert_eq!(changed_flags(&diff), vec![false, false]);
    }

    #[test]
    fn modified_line_is_flagged() {
        let old = "Summary\nBuilt APIs";
        let new = "Summary\nBuilt scalable APIs";
        let diff = compute_line_diff(old, new);
        assert_eq!(changed_flags(&diff), vec![false, true]);
        assert_eq!(diff[1].text, "Built scalable APIs");
    }

    #[test]
    fn inserted_line_keeps_surrounding_lines_unchanged() {
        let old = "## Skills\n- Rust";
        let new = "## Skills\n- Rust\n- Kubernetes";
        let diff = compute_line_diff(old, new);
        assert_eq!(changed_flags(&diff), vec![false, false, true]);
    }

    #[test]
    fn reordered_text_still_aligns_the_common_subsequence() {
        let old = "a\nb\nc";
        let new = "c\na\nb";
        let diff = compute_line_diff(old, new);
        // LCS is "a", "b"; the relocated "c" falls outside it.
        assert_eq!(changed_flags(&diff), vec![true, false, false]);
    }
}
