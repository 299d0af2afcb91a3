//! Diff rendering for previewing pattern corrections.

use similar::{ChangeTag, TextDiff};
use std::fmt::Write;

/// Renders an inline character diff: deletions as `[-x-]`, insertions as `{+x+}`.
pub fn inline_diff(original: &str, corrected: &str) -> String {
    let diff = TextDiff::from_chars(original, corrected);
    let mut output = String::new();
    let mut open: Option<ChangeTag> = None;

    for change in diff.iter_all_changes() {
        let tag = change.tag();
        if open != Some(tag) {
            close(&mut output, open);
            match tag {
                ChangeTag::Delete => output.push_str("[-"),
                ChangeTag::Insert => output.push_str("{+"),
                ChangeTag::Equal => {}
            }
            open = Some(tag);
        }
        output.push_str(change.value());
    }
    close(&mut output, open);

    output
}

fn close(output: &mut String, tag: Option<ChangeTag>) {
    match tag {
        Some(ChangeTag::Delete) => output.push_str("-]"),
        Some(ChangeTag::Insert) => output.push_str("+}"),
        _ => {}
    }
}

/// Colorized two-line diff for terminal display.
pub fn colorized_diff(original: &str, corrected: &str) -> String {
    let diff = TextDiff::from_chars(original, corrected);
    let mut before = String::new();
    let mut after = String::new();

    // ANSI color codes
    const RED: &str = "\x1b[31m";
    const GREEN: &str = "\x1b[32m";
    const RESET: &str = "\x1b[0m";

    for change in diff.iter_all_changes() {
        match change.tag() {
            ChangeTag::Equal => {
                before.push_str(change.value());
                after.push_str(change.value());
            }
            ChangeTag::Delete => {
                write!(before, "{}{}{}", RED, change.value(), RESET).unwrap();
            }
            ChangeTag::Insert => {
                write!(after, "{}{}{}", GREEN, change.value(), RESET).unwrap();
            }
        }
    }

    format!("- {before}\n+ {after}")
}

/// Counts of changed characters between a pattern and its correction.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DiffSummary {
    pub insertions: usize,
    pub deletions: usize,
}

impl DiffSummary {
    pub fn from_diff(original: &str, corrected: &str) -> Self {
        let diff = TextDiff::from_chars(original, corrected);
        let mut summary = Self::default();

        for change in diff.iter_all_changes() {
            match change.tag() {
                ChangeTag::Insert => summary.insertions += 1,
                ChangeTag::Delete => summary.deletions += 1,
                ChangeTag::Equal => {}
            }
        }

        summary
    }

    pub fn is_empty(&self) -> bool {
        self.insertions == 0 && self.deletions == 0
    }
}

impl std::fmt::Display for DiffSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} insertion(s), {} deletion(s)",
            self.insertions, self.deletions
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_diff_insertion() {
        let diff = inline_diff("function $NAME($$PARAMS)", "function $NAME($$$PARAMS)");
        assert!(diff.contains("{+$+}"));
        assert!(!diff.contains("[-"));
        assert_eq!(diff.replace("{+$+}", ""), "function $NAME($$PARAMS)");
    }

    #[test]
    fn test_inline_diff_append_and_remove() {
        assert_eq!(inline_diff("f(x", "f(x)"), "f(x{+)+}");

        let diff = inline_diff("f(x))", "f(x)");
        assert!(!diff.contains("{+"));
        assert_eq!(diff.replace("[-)-]", ""), "f(x)");
    }

    #[test]
    fn test_inline_diff_identical() {
        assert_eq!(inline_diff("$A", "$A"), "$A");
    }

    #[test]
    fn test_diff_summary() {
        let summary = DiffSummary::from_diff("if ($COND {", "if ($COND {})");
        assert_eq!(summary.insertions, 2);
        assert_eq!(summary.deletions, 0);
        assert_eq!(summary.to_string(), "2 insertion(s), 0 deletion(s)");
        assert!(DiffSummary::from_diff("x", "x").is_empty());
    }

    #[test]
    fn test_colorized_diff_has_both_lines() {
        let diff = colorized_diff("f(x", "f(x)");
        assert!(diff.starts_with("- f(x\n+ f(x"));
        assert!(diff.contains("\x1b[32m)\x1b[0m"));
    }
}
