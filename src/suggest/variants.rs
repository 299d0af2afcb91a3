//! Simplified and mutated variants of a pattern.
//!
//! Each transform fires on a textual cue and contributes at most a few
//! candidates. Nothing here checks whether a variant is valid; variants are
//! things worth trying, not corrections.

use crate::check::{Arity, scan_metavars};
use crate::error::Result;
use regex::{NoExpand, Regex};

/// Produces relaxed variants of a pattern.
#[derive(Debug, Clone)]
pub struct VariantGenerator {
    inner_braces: Regex,
    ternary: Regex,
    inner_parens: Regex,
    any_parens: Regex,
    js_function: Regex,
    js_method: Regex,
}

impl VariantGenerator {
    pub fn new() -> Result<Self> {
        Ok(Self {
            inner_braces: Regex::new(r"\{[^{}]*\}")?,
            ternary: Regex::new(r"\?[^:]*:")?,
            inner_parens: Regex::new(r"\([^()]*\)")?,
            any_parens: Regex::new(r"\([^)]*\)")?,
            js_function: Regex::new(r"(function\s+[$\w]+\s*\([^)]*\))\s*\{")?,
            js_method: Regex::new(r"([$\w]+\s*\([^)]*\))\s*\{")?,
        })
    }

    /// Returns the variants of `pattern` in transform order.
    ///
    /// The result never contains the original pattern, an empty string, or
    /// duplicates.
    pub fn variants(&self, pattern: &str) -> Vec<String> {
        let mut out = Vec::new();

        self.wildcard_captures(pattern, &mut out);

        if self.inner_braces.is_match(pattern) {
            out.push(
                self.inner_braces
                    .replacen(pattern, 1, NoExpand("{ $$$_ }"))
                    .into_owned(),
            );
        }

        if self.ternary.is_match(pattern) {
            out.push(self.ternary.replace_all(pattern, "").into_owned());
        }

        if self.inner_parens.is_match(pattern) {
            out.push(
                self.inner_parens
                    .replacen(pattern, 1, NoExpand("($$$_)"))
                    .into_owned(),
            );
        }

        if pattern.starts_with("class ") && pattern.contains('(') {
            out.push(self.any_parens.replace_all(pattern, "").into_owned());
        }

        self.colon_signatures(pattern, &mut out);

        if let Some((first, _)) = pattern.split_once('\n') {
            out.push(first.trim_end().to_string());
        }

        if out.is_empty() && !pattern.trim_end().ends_with(':') {
            if let Some((head, _)) = pattern.split_once(':') {
                out.push(format!("{head}:"));
            }
        }

        dedup(pattern, out)
    }

    fn wildcard_captures(&self, pattern: &str, out: &mut Vec<String>) {
        let captures = scan_metavars(pattern);

        for var in captures
            .iter()
            .filter(|v| v.arity == Arity::Single && !v.is_unnamed() && !v.is_wildcard())
        {
            out.push(format!(
                "{}$_{}",
                &pattern[..var.start],
                &pattern[var.end..]
            ));
        }

        let multis: Vec<_> = captures
            .iter()
            .filter(|v| v.arity == Arity::Multi && !v.is_unnamed() && !v.is_wildcard())
            .collect();
        if !multis.is_empty() {
            let mut variant = String::with_capacity(pattern.len());
            let mut last = 0;
            for var in multis {
                variant.push_str(&pattern[last..var.start]);
                variant.push_str("$$$_");
                last = var.end;
            }
            variant.push_str(&pattern[last..]);
            out.push(variant);
        }
    }

    // Bridges brace-bodied signatures to colon-terminated ones.
    fn colon_signatures(&self, pattern: &str, out: &mut Vec<String>) {
        if let Some(caps) = self.js_function.captures(pattern) {
            out.push(format!("{}:", &caps[1]));
        }
        if let Some(caps) = self.js_method.captures(pattern) {
            out.push(format!("{}:", &caps[1]));
        }

        if pattern.contains('{') && !pattern.contains(':') {
            let colon = pattern.replace('{', ":");
            if colon.contains('}') {
                let stripped = colon.replace('}', "");
                out.push(colon);
                out.push(stripped.trim_end().to_string());
            } else {
                out.push(colon.trim_end().to_string());
            }
        }
    }
}

fn dedup(original: &str, variants: Vec<String>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::with_capacity(variants.len());
    for variant in variants {
        if variant.trim().is_empty() || variant == original || seen.contains(&variant) {
            continue;
        }
        seen.push(variant);
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variants(pattern: &str) -> Vec<String> {
        VariantGenerator::new().unwrap().variants(pattern)
    }

    #[test]
    fn test_single_captures_become_wildcards() {
        let v = variants("$A + $B");
        assert!(v.contains(&"$_ + $B".to_string()));
        assert!(v.contains(&"$A + $_".to_string()));
    }

    #[test]
    fn test_multi_captures_collapse() {
        let v = variants("foo($$$ARGS)");
        assert!(v.contains(&"foo($$$_)".to_string()));
        assert!(!v.iter().any(|s| s.contains("$$$_$")));
    }

    #[test]
    fn test_brace_body_elided() {
        let v = variants("if ($C) { return $X; }");
        assert!(v.contains(&"if ($C) { $$$_ }".to_string()));
        assert!(v.contains(&"if ($$$_) { return $X; }".to_string()));
    }

    #[test]
    fn test_ternary_stripped() {
        let v = variants("$A ? $B : $C");
        assert!(v.contains(&"$A  $C".to_string()));
    }

    #[test]
    fn test_class_bases_removed() {
        let v = variants("class $NAME(Base):");
        assert!(v.contains(&"class $NAME:".to_string()));
    }

    #[test]
    fn test_js_function_to_colon_signature() {
        let v = variants("function $NAME($$$PARAMS) { $$$BODY }");
        assert!(v.contains(&"function $NAME($$$PARAMS):".to_string()));
        assert!(v.contains(&"function $NAME($$$PARAMS) : $$$BODY".to_string()));
    }

    #[test]
    fn test_first_line_of_multiline() {
        let v = variants("def $F():\n    return $X");
        assert!(v.contains(&"def $F():".to_string()));
    }

    #[test]
    fn test_colon_fallback() {
        assert_eq!(variants("x: int = 1"), vec!["x:".to_string()]);
    }

    #[test]
    fn test_never_returns_original_or_duplicates() {
        for pattern in ["$_", "", "print", "{}", "f(x) { }"] {
            let v = variants(pattern);
            assert!(!v.contains(&pattern.to_string()));
            let mut sorted = v.clone();
            sorted.sort();
            sorted.dedup();
            assert_eq!(sorted.len(), v.len());
            assert!(v.iter().all(|s| !s.trim().is_empty()));
        }
    }
}
